//! Flatten a wire-normalized restaurant into multipart fields.
//!
//! Key layout (fixed by the server's form parser):
//! - scalars: `name`, `city`, `country`, `deliveryPrice`, `estimatedDeliveryTime`
//! - `cuisines[i]` per selected cuisine, in selection order
//! - `menuItems[i][name]` and `menuItems[i][price]` per menu item
//! - `imageFile` only when an attachment is present
//!
//! The encoder trusts its input; validation and unit conversion happen first.

#[cfg(test)]
#[path = "encode_test.rs"]
mod encode_test;

use super::normalize::WireRestaurant;
use super::types::ImageFile;

/// One multipart field value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PayloadValue {
    Text(String),
    File(ImageFile),
}

/// Ordered multipart fields for one submission. Built at submit time only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubmissionPayload {
    entries: Vec<(String, PayloadValue)>,
}

impl SubmissionPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), PayloadValue::Text(value.into())));
    }

    pub fn push_file(&mut self, key: impl Into<String>, file: ImageFile) {
        self.entries.push((key.into(), PayloadValue::File(file)));
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&PayloadValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, value)| value)
    }

    /// Text value for `key`, if present and not a file.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            PayloadValue::Text(text) => Some(text),
            PayloadValue::File(_) => None,
        }
    }

    pub fn has_file(&self) -> bool {
        self.entries.iter().any(|(_, value)| matches!(value, PayloadValue::File(_)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PayloadValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn into_entries(self) -> Vec<(String, PayloadValue)> {
        self.entries
    }
}

/// Encode a restaurant into its multipart payload.
pub fn encode_submission(restaurant: WireRestaurant) -> SubmissionPayload {
    let WireRestaurant {
        name,
        city,
        country,
        delivery_price,
        estimated_delivery_time,
        cuisines,
        menu_items,
        image_file,
    } = restaurant;

    let mut payload = SubmissionPayload::new();
    payload.push_text("name", name);
    payload.push_text("city", city);
    payload.push_text("country", country);
    payload.push_text("deliveryPrice", delivery_price.to_string());
    payload.push_text("estimatedDeliveryTime", estimated_delivery_time.to_string());

    for (index, cuisine) in cuisines.into_iter().enumerate() {
        payload.push_text(format!("cuisines[{index}]"), cuisine);
    }

    for (index, item) in menu_items.into_iter().enumerate() {
        payload.push_text(format!("menuItems[{index}][name]"), item.name);
        payload.push_text(format!("menuItems[{index}][price]"), item.price.to_string());
    }

    if let Some(file) = image_file {
        payload.push_file("imageFile", file);
    }

    payload
}
