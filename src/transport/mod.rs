//! External collaborators of the form core.
//!
//! SYSTEM CONTEXT
//! ==============
//! The form never talks to the network directly. Submissions go through
//! [`RestaurantTransport`], edit-mode pre-population through
//! [`RestaurantSource`], search through [`SearchService`], and user-facing
//! messages through [`Notifier`]. `http` provides the `reqwest` implementation;
//! tests supply in-memory mocks.

pub mod http;

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::form::encode::SubmissionPayload;
use crate::form::types::Restaurant;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status. `message` is the
    /// server's own explanation when it sent one.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The image attachment could not be turned into a multipart part.
    #[error("invalid attachment: {0}")]
    Attachment(String),

    /// The configured base URL cannot address an endpoint.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

impl TransportError {
    /// Whether resubmitting the same payload may succeed.
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Status { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// WIRE REPLIES
// =============================================================================

/// Success body of create/update: `{ "message": "..." }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportReply {
    pub message: String,
}

/// Query parameters for restaurant search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchParams {
    pub search_query: String,
    pub page: u32,
    pub selected_cuisines: Vec<String>,
    pub sort_option: String,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            page: 1,
            selected_cuisines: Vec::new(),
            sort_option: "bestMatch".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub pages: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub data: Vec<Restaurant>,
    pub pagination: Pagination,
}

// =============================================================================
// COLLABORATOR TRAITS
// =============================================================================

/// Accepts encoded restaurant submissions.
#[async_trait::async_trait]
pub trait RestaurantTransport: Send + Sync {
    /// Create the owner's restaurant.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] carrying a human-readable message.
    async fn submit_create(&self, payload: SubmissionPayload) -> Result<TransportReply, TransportError>;

    /// Update the owner's existing restaurant.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] carrying a human-readable message.
    async fn submit_update(&self, payload: SubmissionPayload) -> Result<TransportReply, TransportError>;
}

/// Supplies the owner's existing restaurant, if any.
#[async_trait::async_trait]
pub trait RestaurantSource: Send + Sync {
    /// `Ok(None)` means the owner has no restaurant yet (create mode).
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the lookup itself fails.
    async fn fetch_my_restaurant(&self) -> Result<Option<Restaurant>, TransportError>;
}

/// Executes restaurant searches.
#[async_trait::async_trait]
pub trait SearchService: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the search request fails.
    async fn search(&self, city: &str, params: &SearchParams) -> Result<SearchResponse, TransportError>;
}

/// Fire-and-forget user notifications.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notifier that emits notifications as tracing events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(notification = "success", "{message}");
    }

    fn error(&self, message: &str) {
        error!(notification = "error", "{message}");
    }
}
