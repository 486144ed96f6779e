//! Draft and wire records for the restaurant form.
//!
//! SYSTEM CONTEXT
//! ==============
//! `RestaurantDraft` is what the owner edits: every numeric control keeps the
//! raw text the user typed so coercion failures surface as field errors
//! instead of parse panics. `Restaurant` is the server-held record with
//! currency in integer minor units.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// DRAFT
// =============================================================================

/// In-progress restaurant record, bound to the form controls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RestaurantDraft {
    pub name: String,
    pub city: String,
    pub country: String,
    /// Display units (e.g. `"5.50"`).
    #[serde(deserialize_with = "input_text")]
    pub delivery_price: String,
    /// Minutes, as typed.
    #[serde(deserialize_with = "input_text")]
    pub estimated_delivery_time: String,
    /// Selected cuisines in selection order. Never holds duplicates.
    pub cuisines: Vec<String>,
    pub menu_items: Vec<MenuItemDraft>,
    #[serde(skip)]
    pub image_file: Option<ImageFile>,
}

impl Default for RestaurantDraft {
    /// Create-mode defaults: no cuisines and a single blank menu item.
    fn default() -> Self {
        Self {
            name: String::new(),
            city: String::new(),
            country: String::new(),
            delivery_price: String::new(),
            estimated_delivery_time: String::new(),
            cuisines: Vec::new(),
            menu_items: vec![MenuItemDraft::default()],
            image_file: None,
        }
    }
}

/// One editable row of the menu section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuItemDraft {
    pub name: String,
    #[serde(deserialize_with = "input_text")]
    pub price: String,
}

impl Default for MenuItemDraft {
    fn default() -> Self {
        Self { name: String::new(), price: "0".to_owned() }
    }
}

impl MenuItemDraft {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self { name: name.into(), price: price.into() }
    }
}

/// Binary image attachment picked by the owner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Build an attachment, guessing the content type from the file extension.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_image_content_type(&file_name).map(str::to_owned);
        Self { file_name, content_type, bytes }
    }
}

fn guess_image_content_type(file_name: &str) -> Option<&'static str> {
    let (_, ext) = file_name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Search bar input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub search_query: String,
}

impl SearchQuery {
    pub fn new(search_query: impl Into<String>) -> Self {
        Self { search_query: search_query.into() }
    }

    /// An empty query clears the search filter.
    pub fn is_clear(&self) -> bool {
        self.search_query.trim().is_empty()
    }
}

// =============================================================================
// WIRE
// =============================================================================

/// Restaurant as stored by the server; currency fields are minor units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub user: Option<String>,
    pub name: String,
    pub city: String,
    pub country: String,
    pub delivery_price: i64,
    pub estimated_delivery_time: u32,
    #[serde(default)]
    pub cuisines: Vec<String>,
    #[serde(default)]
    pub menu_items: Vec<MenuItem>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub price: i64,
}

// Numeric controls accept either JSON numbers or strings; both are kept as text.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawInput {
    Text(String),
    Number(serde_json::Number),
}

fn input_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawInput::deserialize(deserializer)? {
        RawInput::Text(text) => text,
        RawInput::Number(number) => number.to_string(),
    })
}
