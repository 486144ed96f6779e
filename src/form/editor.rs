//! Editable restaurant form session.
//!
//! SYSTEM CONTEXT
//! ==============
//! `RestaurantForm` owns the draft for one editing session. Controls read and
//! write through `get`/`set` keyed by [`FieldPath`]; every write revalidates
//! only the touched path so sibling menu items keep their own error state.
//!
//! DESIGN
//! ======
//! Menu items are a plain `Vec`, so positions are always contiguous. Removing
//! an entry shifts the error map with it. Cuisines are a duplicate-free `Vec`
//! restricted to the session's [`CuisineCatalog`]; toggling appends or
//! removes one value and leaves the others where they were.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use tracing::{debug, warn};

use super::catalog::CuisineCatalog;
use super::normalize::draft_from_restaurant;
use super::path::{FieldPath, MenuItemField};
use super::submit::SubmitMode;
use super::types::{ImageFile, MenuItemDraft, Restaurant, RestaurantDraft};
use super::validate::{ValidRestaurant, ValidationErrors, validate_field, validate_restaurant};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("cuisine `{0}` is not offered")]
    UnknownCuisine(String),
    #[error("menu item {index} does not exist ({len} items)")]
    MenuItemOutOfRange { index: usize, len: usize },
    #[error("field `{0}` is not a text field")]
    NotText(FieldPath),
}

/// Server-side identity kept while editing an existing restaurant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExistingRestaurant {
    pub id: String,
    pub image_url: Option<String>,
    pub last_updated: Option<String>,
}

impl ExistingRestaurant {
    fn from_restaurant(restaurant: &Restaurant) -> Self {
        Self {
            id: restaurant.id.clone(),
            image_url: restaurant.image_url.clone(),
            last_updated: restaurant.last_updated.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RestaurantForm {
    draft: RestaurantDraft,
    errors: ValidationErrors,
    catalog: CuisineCatalog,
    existing: Option<ExistingRestaurant>,
}

impl RestaurantForm {
    /// Blank create-mode session.
    pub fn create(catalog: CuisineCatalog) -> Self {
        Self { draft: RestaurantDraft::default(), errors: ValidationErrors::new(), catalog, existing: None }
    }

    /// Edit-mode session pre-populated from a server record.
    pub fn edit(catalog: CuisineCatalog, restaurant: &Restaurant) -> Self {
        let mut form = Self::create(catalog);
        form.reset(Some(restaurant));
        form
    }

    /// Session for whatever the fetch collaborator returned; `None` means create.
    pub fn from_fetched(catalog: CuisineCatalog, restaurant: Option<&Restaurant>) -> Self {
        match restaurant {
            Some(restaurant) => Self::edit(catalog, restaurant),
            None => Self::create(catalog),
        }
    }

    /// Replace the whole draft, clearing errors. `None` restores create defaults.
    ///
    /// Server cuisines the catalog does not offer are dropped.
    pub fn reset(&mut self, restaurant: Option<&Restaurant>) {
        self.errors.clear();
        match restaurant {
            Some(restaurant) => {
                let mut draft = draft_from_restaurant(restaurant);
                draft.cuisines.retain(|cuisine| {
                    let known = self.catalog.contains(cuisine);
                    if !known {
                        warn!(%cuisine, restaurant = %restaurant.id, "dropping cuisine outside the catalog");
                    }
                    known
                });
                self.draft = draft;
                self.existing = Some(ExistingRestaurant::from_restaurant(restaurant));
            }
            None => {
                self.draft = RestaurantDraft::default();
                self.existing = None;
            }
        }
    }

    /// Replace the draft with externally prepared values, keeping the
    /// session identity.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownCuisine`] if the draft selects a cuisine
    /// outside the catalog; the session is left untouched in that case.
    pub fn load_draft(&mut self, mut draft: RestaurantDraft) -> Result<(), EditError> {
        if let Some(unknown) = draft.cuisines.iter().find(|c| !self.catalog.contains(c)) {
            return Err(EditError::UnknownCuisine(unknown.clone()));
        }
        let mut seen: Vec<String> = Vec::with_capacity(draft.cuisines.len());
        draft.cuisines.retain(|c| {
            let fresh = !seen.contains(c);
            if fresh {
                seen.push(c.clone());
            }
            fresh
        });
        self.draft = draft;
        self.errors.clear();
        Ok(())
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn draft(&self) -> &RestaurantDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error(&self, path: FieldPath) -> Option<&str> {
        self.errors.get(path)
    }

    pub fn catalog(&self) -> &CuisineCatalog {
        &self.catalog
    }

    pub fn existing(&self) -> Option<&ExistingRestaurant> {
        self.existing.as_ref()
    }

    pub fn restaurant_id(&self) -> Option<&str> {
        self.existing.as_ref().map(|e| e.id.as_str())
    }

    pub fn mode(&self) -> SubmitMode {
        if self.existing.is_some() { SubmitMode::Update } else { SubmitMode::Create }
    }

    /// Read the text behind a control.
    ///
    /// # Errors
    ///
    /// Fails for list or attachment paths and for missing menu items.
    pub fn get(&self, path: FieldPath) -> Result<&str, EditError> {
        let draft = &self.draft;
        match path {
            FieldPath::Name => Ok(&draft.name),
            FieldPath::City => Ok(&draft.city),
            FieldPath::Country => Ok(&draft.country),
            FieldPath::DeliveryPrice => Ok(&draft.delivery_price),
            FieldPath::EstimatedDeliveryTime => Ok(&draft.estimated_delivery_time),
            FieldPath::MenuItem(index, field) => {
                let item = self.menu_item(index)?;
                Ok(match field {
                    MenuItemField::Name => &item.name,
                    MenuItemField::Price => &item.price,
                })
            }
            FieldPath::Cuisines | FieldPath::MenuItems | FieldPath::ImageFile | FieldPath::SearchQuery => {
                Err(EditError::NotText(path))
            }
        }
    }

    /// Write the text behind a control and revalidate that control.
    ///
    /// # Errors
    ///
    /// Fails for list or attachment paths and for missing menu items.
    pub fn set(&mut self, path: FieldPath, value: impl Into<String>) -> Result<(), EditError> {
        let value = value.into();
        let draft = &mut self.draft;
        match path {
            FieldPath::Name => draft.name = value,
            FieldPath::City => draft.city = value,
            FieldPath::Country => draft.country = value,
            FieldPath::DeliveryPrice => draft.delivery_price = value,
            FieldPath::EstimatedDeliveryTime => draft.estimated_delivery_time = value,
            FieldPath::MenuItem(index, field) => {
                let len = draft.menu_items.len();
                let item = draft
                    .menu_items
                    .get_mut(index)
                    .ok_or(EditError::MenuItemOutOfRange { index, len })?;
                match field {
                    MenuItemField::Name => item.name = value,
                    MenuItemField::Price => item.price = value,
                }
            }
            FieldPath::Cuisines | FieldPath::MenuItems | FieldPath::ImageFile | FieldPath::SearchQuery => {
                return Err(EditError::NotText(path));
            }
        }
        self.notify(path);
        Ok(())
    }

    /// Re-run the rule for one path and update its stored error.
    pub fn notify(&mut self, path: FieldPath) {
        let outcome = validate_field(&self.draft, path);
        debug!(%path, valid = outcome.is_ok(), "field revalidated");
        self.errors.apply(path, outcome);
    }

    // =========================================================================
    // MENU ITEMS
    // =========================================================================

    fn menu_item(&self, index: usize) -> Result<&MenuItemDraft, EditError> {
        self.draft
            .menu_items
            .get(index)
            .ok_or(EditError::MenuItemOutOfRange { index, len: self.draft.menu_items.len() })
    }

    pub fn menu_items(&self) -> &[MenuItemDraft] {
        &self.draft.menu_items
    }

    /// Append a blank menu item and return its position.
    pub fn add_menu_item(&mut self) -> usize {
        self.draft.menu_items.push(MenuItemDraft::default());
        self.notify(FieldPath::MenuItems);
        self.draft.menu_items.len() - 1
    }

    /// Remove the menu item at `index`; later items move up one position.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::MenuItemOutOfRange`] for a missing position.
    pub fn remove_menu_item(&mut self, index: usize) -> Result<MenuItemDraft, EditError> {
        let len = self.draft.menu_items.len();
        if index >= len {
            return Err(EditError::MenuItemOutOfRange { index, len });
        }
        let removed = self.draft.menu_items.remove(index);
        self.errors.remove_menu_item(index);
        self.notify(FieldPath::MenuItems);
        Ok(removed)
    }

    // =========================================================================
    // CUISINES
    // =========================================================================

    pub fn is_cuisine_selected(&self, cuisine: &str) -> bool {
        self.draft.cuisines.iter().any(|c| c == cuisine)
    }

    /// Flip one cuisine in or out of the selection. Returns whether it is
    /// selected afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownCuisine`] for values outside the catalog.
    pub fn toggle_cuisine(&mut self, cuisine: &str) -> Result<bool, EditError> {
        if !self.catalog.contains(cuisine) {
            return Err(EditError::UnknownCuisine(cuisine.to_owned()));
        }
        let selected = match self.draft.cuisines.iter().position(|c| c == cuisine) {
            Some(pos) => {
                self.draft.cuisines.remove(pos);
                false
            }
            None => {
                self.draft.cuisines.push(cuisine.to_owned());
                true
            }
        };
        self.notify(FieldPath::Cuisines);
        Ok(selected)
    }

    // =========================================================================
    // IMAGE / SUBMIT
    // =========================================================================

    pub fn set_image_file(&mut self, image: Option<ImageFile>) {
        self.draft.image_file = image;
        self.notify(FieldPath::ImageFile);
    }

    pub(crate) fn replace_errors(&mut self, errors: ValidationErrors) {
        self.errors = errors;
    }

    /// Validate the whole draft, replacing stored errors with the result.
    ///
    /// # Errors
    ///
    /// Returns a copy of the full error set when any rule fails.
    pub fn validate_all(&mut self) -> Result<ValidRestaurant, ValidationErrors> {
        match validate_restaurant(&self.draft) {
            Ok(valid) => {
                self.errors.clear();
                Ok(valid)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }
}
