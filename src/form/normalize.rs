//! Conversion between display units and wire units.
//!
//! DESIGN
//! ======
//! Currency travels as integer minor units (cents). While editing, the form
//! shows decimal major units. Load-time conversion formats minor units with
//! integer arithmetic, so it is exact. Submit-time conversion multiplies by
//! 100 and rounds to the nearest minor unit, which is exact for every value
//! with at most two decimal digits and never truncates a fractional cent
//! toward zero.

#[cfg(test)]
#[path = "normalize_test.rs"]
mod normalize_test;

use super::path::FieldPath;
use super::types::{ImageFile, MenuItemDraft, Restaurant, RestaurantDraft};
use super::validate::{ValidRestaurant, ValidationErrors};

pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Largest minor-unit value an `f64` still represents exactly (2^53).
const MAX_EXACT_MINOR: f64 = 9_007_199_254_740_992.0;

/// Coercion failures for numeric form input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("value is required")]
    Empty,
    #[error("`{0}` is not a number")]
    NotANumber(String),
    #[error("`{0}` is not a whole number")]
    NotWhole(String),
    #[error("value must not be negative")]
    Negative,
    #[error("value is too large")]
    OutOfRange,
}

// =============================================================================
// WIRE RECORD
// =============================================================================

/// Validated record with currency in minor units, ready for encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WireRestaurant {
    pub name: String,
    pub city: String,
    pub country: String,
    pub delivery_price: i64,
    pub estimated_delivery_time: u32,
    pub cuisines: Vec<String>,
    pub menu_items: Vec<WireMenuItem>,
    pub image_file: Option<ImageFile>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WireMenuItem {
    pub name: String,
    pub price: i64,
}

// =============================================================================
// COERCION
// =============================================================================

/// Coerce typed text into a finite decimal amount.
///
/// # Errors
///
/// Returns [`NormalizeError::Empty`] for blank input and
/// [`NormalizeError::NotANumber`] for anything that is not a finite number.
pub fn parse_amount(raw: &str) -> Result<f64, NormalizeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NormalizeError::Empty);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(NormalizeError::NotANumber(trimmed.to_owned())),
    }
}

/// Coerce typed text into a non-negative whole number.
///
/// `"30"` and `"30.0"` are both accepted.
///
/// # Errors
///
/// Returns an error for blank, non-numeric, fractional, negative, or
/// oversized input.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_whole_number(raw: &str) -> Result<u32, NormalizeError> {
    let value = parse_amount(raw)?;
    if value.fract() != 0.0 {
        return Err(NormalizeError::NotWhole(raw.trim().to_owned()));
    }
    if value < 0.0 {
        return Err(NormalizeError::Negative);
    }
    if value > f64::from(u32::MAX) {
        return Err(NormalizeError::OutOfRange);
    }
    Ok(value as u32)
}

/// Convert a display amount into integer minor units, rounding to the
/// nearest unit.
///
/// # Errors
///
/// Returns an error for non-finite, negative, or oversized amounts.
#[allow(clippy::cast_possible_truncation)]
pub fn to_minor_units(display: f64) -> Result<i64, NormalizeError> {
    if !display.is_finite() {
        return Err(NormalizeError::NotANumber(display.to_string()));
    }
    if display < 0.0 {
        return Err(NormalizeError::Negative);
    }
    let scaled = (display * 100.0).round();
    if scaled > MAX_EXACT_MINOR {
        return Err(NormalizeError::OutOfRange);
    }
    Ok(scaled as i64)
}

/// Render minor units as display text with at most two decimal digits.
///
/// `1050` becomes `"10.5"`, `500` becomes `"5"`, `1099` becomes `"10.99"`.
pub fn format_display_amount(minor: i64) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    let per_major = MINOR_UNITS_PER_MAJOR.unsigned_abs();
    let whole = abs / per_major;
    let frac = abs % per_major;
    if frac == 0 {
        format!("{sign}{whole}")
    } else if frac % 10 == 0 {
        format!("{sign}{whole}.{}", frac / 10)
    } else {
        format!("{sign}{whole}.{frac:02}")
    }
}

// =============================================================================
// LOAD / SUBMIT
// =============================================================================

/// Build a display-ready draft from a server-held restaurant.
///
/// Currency fields are converted to display units; everything else is copied
/// unchanged. Duplicate cuisines collapse to their first occurrence.
pub fn draft_from_restaurant(restaurant: &Restaurant) -> RestaurantDraft {
    let mut cuisines: Vec<String> = Vec::with_capacity(restaurant.cuisines.len());
    for cuisine in &restaurant.cuisines {
        if !cuisines.contains(cuisine) {
            cuisines.push(cuisine.clone());
        }
    }

    RestaurantDraft {
        name: restaurant.name.clone(),
        city: restaurant.city.clone(),
        country: restaurant.country.clone(),
        delivery_price: format_display_amount(restaurant.delivery_price),
        estimated_delivery_time: restaurant.estimated_delivery_time.to_string(),
        cuisines,
        menu_items: restaurant
            .menu_items
            .iter()
            .map(|item| MenuItemDraft::new(item.name.clone(), format_display_amount(item.price)))
            .collect(),
        image_file: None,
    }
}

/// Convert a validated record into wire units.
///
/// # Errors
///
/// Returns field errors for any amount that cannot be represented in minor
/// units. The validator already rejects these, so this only fires for
/// records built by hand.
pub fn to_wire(valid: ValidRestaurant) -> Result<WireRestaurant, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let delivery_price = match to_minor_units(valid.delivery_price) {
        Ok(minor) => minor,
        Err(e) => {
            errors.insert(FieldPath::DeliveryPrice, e.to_string());
            0
        }
    };

    let menu_items = valid
        .menu_items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let price = match to_minor_units(item.price) {
                Ok(minor) => minor,
                Err(e) => {
                    errors.insert(FieldPath::menu_item_price(index), e.to_string());
                    0
                }
            };
            WireMenuItem { name: item.name, price }
        })
        .collect();

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(WireRestaurant {
        name: valid.name,
        city: valid.city,
        country: valid.country,
        delivery_price,
        estimated_delivery_time: valid.estimated_delivery_time,
        cuisines: valid.cuisines,
        menu_items,
        image_file: valid.image_file,
    })
}
