//! `reqwest` implementation of the transport traits.
//!
//! Endpoints (relative to the configured base URL):
//! - `GET  /api/my/restaurant`: owner's restaurant; 404 means none yet
//! - `POST /api/my/restaurant`: create, multipart body
//! - `PUT  /api/my/restaurant`: update, multipart body
//! - `GET  /api/restaurant/search/{city}`: paginated search
//!
//! Error bodies are `{ "message": "..." }`; that text becomes the
//! notification shown to the owner. Pure helpers (`error_message`,
//! `search_url`) are split out for testability.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, StatusCode, Url};
use tracing::debug;

use super::{
    RestaurantSource, RestaurantTransport, SearchParams, SearchResponse, SearchService, TransportError,
    TransportReply,
};
use crate::config::AppConfig;
use crate::form::encode::{PayloadValue, SubmissionPayload};
use crate::form::types::Restaurant;

const MY_RESTAURANT_PATH: &str = "/api/my/restaurant";

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpTransport {
    /// Build a client from typed config.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ClientBuild`] if the TLS backend or client
    /// settings cannot be initialized.
    pub fn new(config: &AppConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.api_base_url.clone(), token: config.api_token.clone() })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn my_restaurant_endpoint(&self) -> String {
        format!("{}{MY_RESTAURANT_PATH}", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send_submission(
        &self,
        request: RequestBuilder,
        payload: SubmissionPayload,
    ) -> Result<TransportReply, TransportError> {
        let form = multipart_form(payload)?;
        let response = self
            .authorize(request)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        read_json(response).await
    }
}

#[async_trait::async_trait]
impl RestaurantTransport for HttpTransport {
    async fn submit_create(&self, payload: SubmissionPayload) -> Result<TransportReply, TransportError> {
        debug!(fields = payload.len(), "POST {MY_RESTAURANT_PATH}");
        let request = self.http.post(self.my_restaurant_endpoint());
        self.send_submission(request, payload).await
    }

    async fn submit_update(&self, payload: SubmissionPayload) -> Result<TransportReply, TransportError> {
        debug!(fields = payload.len(), "PUT {MY_RESTAURANT_PATH}");
        let request = self.http.put(self.my_restaurant_endpoint());
        self.send_submission(request, payload).await
    }
}

#[async_trait::async_trait]
impl RestaurantSource for HttpTransport {
    async fn fetch_my_restaurant(&self) -> Result<Option<Restaurant>, TransportError> {
        let response = self
            .authorize(self.http.get(self.my_restaurant_endpoint()))
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        read_json(response).await.map(Some)
    }
}

#[async_trait::async_trait]
impl SearchService for HttpTransport {
    async fn search(&self, city: &str, params: &SearchParams) -> Result<SearchResponse, TransportError> {
        let url = search_url(&self.base_url, city, params)?;
        debug!(%url, "restaurant search");
        let response = self
            .authorize(self.http.get(url))
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        read_json(response).await
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Turn an encoded submission into a multipart form, preserving field order.
///
/// # Errors
///
/// Returns [`TransportError::Attachment`] if the image content type is not a
/// valid MIME string.
pub fn multipart_form(payload: SubmissionPayload) -> Result<Form, TransportError> {
    let mut form = Form::new();
    for (key, value) in payload.into_entries() {
        form = match value {
            PayloadValue::Text(text) => form.text(key, text),
            PayloadValue::File(file) => {
                let mut part = Part::bytes(file.bytes).file_name(file.file_name);
                if let Some(content_type) = file.content_type {
                    part = part
                        .mime_str(&content_type)
                        .map_err(|e| TransportError::Attachment(e.to_string()))?;
                }
                form.part(key, part)
            }
        };
    }
    Ok(form)
}

/// Build the search URL with the city as a single escaped path segment.
///
/// # Errors
///
/// Returns [`TransportError::InvalidUrl`] if the base URL does not parse or
/// cannot carry a path.
pub fn search_url(base_url: &str, city: &str, params: &SearchParams) -> Result<Url, TransportError> {
    let mut url = Url::parse(base_url).map_err(|e| TransportError::InvalidUrl(format!("{base_url}: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| TransportError::InvalidUrl(format!("base URL cannot carry a path: {base_url}")))?
        .pop_if_empty()
        .extend(["api", "restaurant", "search", city]);
    url.query_pairs_mut()
        .append_pair("searchQuery", &params.search_query)
        .append_pair("page", &params.page.to_string())
        .append_pair("selectedCuisines", &params.selected_cuisines.join(","))
        .append_pair("sortOption", &params.sort_option);
    Ok(url)
}

/// Human-readable message for a failed response.
///
/// Prefers the server's `{ "message" }`, then the raw body, then the status
/// reason phrase.
pub fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(reply) = serde_json::from_str::<TransportReply>(body) {
        if !reply.message.trim().is_empty() {
            return reply.message;
        }
    }
    let body = body.trim();
    if !body.is_empty() {
        return body.to_owned();
    }
    status
        .canonical_reason()
        .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_owned)
}

async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, TransportError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| TransportError::Request(e.to_string()))?;

    if !status.is_success() {
        return Err(TransportError::Status { status: status.as_u16(), message: error_message(status, &text) });
    }

    serde_json::from_str(&text).map_err(|e| TransportError::Decode(e.to_string()))
}
