//! Schema rules for the restaurant form and the search bar.
//!
//! DESIGN
//! ======
//! Every rule is a small function from raw draft text to either a typed value
//! or an error message. `validate_field` runs a single rule so the editor can
//! revalidate one control per keystroke; `validate_restaurant` runs all of
//! them and only builds a `ValidRestaurant` when no rule failed.
//!
//! ERROR HANDLING
//! ==============
//! Coercion failures (non-numeric price or time) never escape as panics or
//! bare parse errors: they are reported as messages on the offending path.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use std::collections::BTreeMap;
use std::fmt;

use super::normalize::{NormalizeError, parse_amount, parse_whole_number, to_minor_units};
use super::path::{FieldPath, MenuItemField};
use super::types::{ImageFile, MenuItemDraft, RestaurantDraft, SearchQuery};

// =============================================================================
// ERRORS
// =============================================================================

/// Field-path → message pairs, ordered by path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<FieldPath, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: FieldPath, message: impl Into<String>) {
        self.0.insert(path, message.into());
    }

    pub fn remove(&mut self, path: FieldPath) -> Option<String> {
        self.0.remove(&path)
    }

    pub fn get(&self, path: FieldPath) -> Option<&str> {
        self.0.get(&path).map(String::as_str)
    }

    pub fn contains(&self, path: FieldPath) -> bool {
        self.0.contains_key(&path)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldPath, &str)> {
        self.0.iter().map(|(path, message)| (*path, message.as_str()))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Record or clear the error for `path` from a single rule outcome.
    pub fn apply(&mut self, path: FieldPath, outcome: Result<(), String>) {
        match outcome {
            Ok(()) => {
                self.0.remove(&path);
            }
            Err(message) => {
                self.0.insert(path, message);
            }
        }
    }

    /// Drop errors of a removed menu item and shift later entries down.
    pub fn remove_menu_item(&mut self, removed: usize) {
        let entries = std::mem::take(&mut self.0);
        self.0 = entries
            .into_iter()
            .filter_map(|(path, message)| path.after_menu_item_removed(removed).map(|p| (p, message)))
            .collect();
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (path, message)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{path}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// =============================================================================
// VALIDATED RECORD
// =============================================================================

/// Restaurant record that passed every rule, still in display units.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidRestaurant {
    pub name: String,
    pub city: String,
    pub country: String,
    pub delivery_price: f64,
    pub estimated_delivery_time: u32,
    pub cuisines: Vec<String>,
    pub menu_items: Vec<ValidMenuItem>,
    pub image_file: Option<ImageFile>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ValidMenuItem {
    pub name: String,
    pub price: f64,
}

// =============================================================================
// RULES
// =============================================================================

fn required_text(raw: &str, message: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(message.to_owned());
    }
    Ok(trimmed.to_owned())
}

fn check_name(raw: &str) -> Result<String, String> {
    required_text(raw, "Restaurant name is required")
}

fn check_city(raw: &str) -> Result<String, String> {
    required_text(raw, "City is required")
}

fn check_country(raw: &str) -> Result<String, String> {
    required_text(raw, "Country is required")
}

fn amount_message(label: &str, err: &NormalizeError) -> String {
    match err {
        NormalizeError::Empty => format!("{label} is required"),
        NormalizeError::NotANumber(_) => format!("{label} must be a valid number"),
        NormalizeError::NotWhole(_) => format!("{label} must be a whole number"),
        NormalizeError::Negative => format!("{label} must not be negative"),
        NormalizeError::OutOfRange => format!("{label} is too large"),
    }
}

fn check_delivery_price(raw: &str) -> Result<f64, String> {
    const LABEL: &str = "Delivery price";
    let value = parse_amount(raw).map_err(|e| amount_message(LABEL, &e))?;
    to_minor_units(value).map_err(|e| amount_message(LABEL, &e))?;
    Ok(value)
}

fn check_delivery_time(raw: &str) -> Result<u32, String> {
    const LABEL: &str = "Estimated delivery time";
    let minutes = parse_whole_number(raw).map_err(|e| amount_message(LABEL, &e))?;
    if minutes == 0 {
        return Err(format!("{LABEL} must be greater than zero"));
    }
    Ok(minutes)
}

fn check_cuisines(cuisines: &[String]) -> Result<(), String> {
    if cuisines.is_empty() {
        return Err("Please select at least one cuisine".to_owned());
    }
    Ok(())
}

fn check_menu_items(items: &[MenuItemDraft]) -> Result<(), String> {
    if items.is_empty() {
        return Err("Please add at least one menu item".to_owned());
    }
    Ok(())
}

fn check_menu_item_name(raw: &str) -> Result<String, String> {
    required_text(raw, "Menu item name is required")
}

fn check_menu_item_price(raw: &str) -> Result<f64, String> {
    const LABEL: &str = "Menu item price";
    let value = parse_amount(raw).map_err(|e| amount_message(LABEL, &e))?;
    // Positive after rounding to whole minor units, so "0.004" is zero.
    if value <= 0.0 || to_minor_units(value).map_err(|e| amount_message(LABEL, &e))? == 0 {
        return Err(format!("{LABEL} must be greater than zero"));
    }
    Ok(value)
}

fn keep<T>(errors: &mut ValidationErrors, path: FieldPath, outcome: Result<T, String>) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(message) => {
            errors.insert(path, message);
            None
        }
    }
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Run the single rule that owns `path`.
///
/// Paths into menu items that do not exist, and paths the restaurant schema
/// does not constrain (`imageFile`, `searchQuery`), always pass.
///
/// # Errors
///
/// Returns the message to show next to the control.
pub fn validate_field(draft: &RestaurantDraft, path: FieldPath) -> Result<(), String> {
    match path {
        FieldPath::Name => check_name(&draft.name).map(drop),
        FieldPath::City => check_city(&draft.city).map(drop),
        FieldPath::Country => check_country(&draft.country).map(drop),
        FieldPath::DeliveryPrice => check_delivery_price(&draft.delivery_price).map(drop),
        FieldPath::EstimatedDeliveryTime => check_delivery_time(&draft.estimated_delivery_time).map(drop),
        FieldPath::Cuisines => check_cuisines(&draft.cuisines),
        FieldPath::MenuItems => check_menu_items(&draft.menu_items),
        FieldPath::MenuItem(index, field) => match (draft.menu_items.get(index), field) {
            (Some(item), MenuItemField::Name) => check_menu_item_name(&item.name).map(drop),
            (Some(item), MenuItemField::Price) => check_menu_item_price(&item.price).map(drop),
            (None, _) => Ok(()),
        },
        FieldPath::ImageFile | FieldPath::SearchQuery => Ok(()),
    }
}

/// Validate a whole draft.
///
/// # Errors
///
/// Returns every failing path with its message; no partial record is built.
pub fn validate_restaurant(draft: &RestaurantDraft) -> Result<ValidRestaurant, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = keep(&mut errors, FieldPath::Name, check_name(&draft.name));
    let city = keep(&mut errors, FieldPath::City, check_city(&draft.city));
    let country = keep(&mut errors, FieldPath::Country, check_country(&draft.country));
    let delivery_price = keep(&mut errors, FieldPath::DeliveryPrice, check_delivery_price(&draft.delivery_price));
    let estimated_delivery_time = keep(
        &mut errors,
        FieldPath::EstimatedDeliveryTime,
        check_delivery_time(&draft.estimated_delivery_time),
    );
    errors.apply(FieldPath::Cuisines, check_cuisines(&draft.cuisines));
    errors.apply(FieldPath::MenuItems, check_menu_items(&draft.menu_items));

    let mut menu_items = Vec::with_capacity(draft.menu_items.len());
    for (index, item) in draft.menu_items.iter().enumerate() {
        let item_name = keep(&mut errors, FieldPath::menu_item_name(index), check_menu_item_name(&item.name));
        let item_price = keep(&mut errors, FieldPath::menu_item_price(index), check_menu_item_price(&item.price));
        if let (Some(name), Some(price)) = (item_name, item_price) {
            menu_items.push(ValidMenuItem { name, price });
        }
    }

    match (name, city, country, delivery_price, estimated_delivery_time) {
        (Some(name), Some(city), Some(country), Some(delivery_price), Some(estimated_delivery_time))
            if errors.is_empty() =>
        {
            Ok(ValidRestaurant {
                name,
                city,
                country,
                delivery_price,
                estimated_delivery_time,
                cuisines: draft.cuisines.clone(),
                menu_items,
                image_file: draft.image_file.clone(),
            })
        }
        _ => Err(errors),
    }
}

/// Validate the search bar. Any string is accepted; an empty query clears
/// the filter.
///
/// # Errors
///
/// Never fails today; the signature matches the restaurant schema so callers
/// treat both forms alike.
pub fn validate_search(query: &SearchQuery) -> Result<SearchQuery, ValidationErrors> {
    Ok(SearchQuery::new(query.search_query.trim()))
}
