//! Field paths used to attach validation errors to specific controls.
//!
//! Paths render the way the form names its controls: `deliveryPrice`,
//! `menuItems[2].price`, and parse back from the same syntax.

#[cfg(test)]
#[path = "path_test.rs"]
mod path_test;

use std::fmt;
use std::str::FromStr;

/// Locator for one field of the restaurant or search form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPath {
    Name,
    City,
    Country,
    DeliveryPrice,
    EstimatedDeliveryTime,
    Cuisines,
    /// The menu item list as a whole (minimum size rule).
    MenuItems,
    MenuItem(usize, MenuItemField),
    ImageFile,
    SearchQuery,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MenuItemField {
    Name,
    Price,
}

impl MenuItemField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
        }
    }
}

impl FieldPath {
    pub fn menu_item_name(index: usize) -> Self {
        Self::MenuItem(index, MenuItemField::Name)
    }

    pub fn menu_item_price(index: usize) -> Self {
        Self::MenuItem(index, MenuItemField::Price)
    }

    /// Position of the menu item this path points into, if any.
    pub fn menu_item_index(self) -> Option<usize> {
        match self {
            Self::MenuItem(index, _) => Some(index),
            _ => None,
        }
    }

    /// Re-index this path after the menu item at `removed` is deleted.
    ///
    /// Returns `None` when the path belonged to the removed entry.
    pub fn after_menu_item_removed(self, removed: usize) -> Option<Self> {
        match self {
            Self::MenuItem(index, _) if index == removed => None,
            Self::MenuItem(index, field) if index > removed => Some(Self::MenuItem(index - 1, field)),
            other => Some(other),
        }
    }

    fn scalar_name(self) -> Option<&'static str> {
        match self {
            Self::Name => Some("name"),
            Self::City => Some("city"),
            Self::Country => Some("country"),
            Self::DeliveryPrice => Some("deliveryPrice"),
            Self::EstimatedDeliveryTime => Some("estimatedDeliveryTime"),
            Self::Cuisines => Some("cuisines"),
            Self::MenuItems => Some("menuItems"),
            Self::ImageFile => Some("imageFile"),
            Self::SearchQuery => Some("searchQuery"),
            Self::MenuItem(..) => None,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MenuItem(index, field) => write!(f, "menuItems[{index}].{}", field.as_str()),
            other => f.write_str(other.scalar_name().unwrap_or_default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field path: {0}")]
pub struct ParseFieldPathError(String);

impl FromStr for FieldPath {
    type Err = ParseFieldPathError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let unknown = || ParseFieldPathError(raw.to_owned());
        let scalar = match raw {
            "name" => Some(Self::Name),
            "city" => Some(Self::City),
            "country" => Some(Self::Country),
            "deliveryPrice" => Some(Self::DeliveryPrice),
            "estimatedDeliveryTime" => Some(Self::EstimatedDeliveryTime),
            "cuisines" => Some(Self::Cuisines),
            "menuItems" => Some(Self::MenuItems),
            "imageFile" => Some(Self::ImageFile),
            "searchQuery" => Some(Self::SearchQuery),
            _ => None,
        };
        if let Some(path) = scalar {
            return Ok(path);
        }

        let rest = raw.strip_prefix("menuItems[").ok_or_else(unknown)?;
        let (index, field) = rest.split_once("].").ok_or_else(unknown)?;
        let index: usize = index.parse().map_err(|_| unknown())?;
        let field = match field {
            "name" => MenuItemField::Name,
            "price" => MenuItemField::Price,
            _ => return Err(unknown()),
        };
        Ok(Self::MenuItem(index, field))
    }
}
