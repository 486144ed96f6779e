//! Search bar form.
//!
//! The bar holds one text field. Submitting hands the validated query to the
//! search callback; resetting clears the field and fires the optional reset
//! hook so the caller can drop its filter.

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;

use super::types::SearchQuery;
use super::validate::{ValidationErrors, validate_search};

type SearchCallback = Box<dyn FnMut(&SearchQuery)>;
type ResetHook = Box<dyn FnMut()>;

pub struct SearchForm {
    query: String,
    placeholder: String,
    errors: ValidationErrors,
    on_search: SearchCallback,
    on_reset: Option<ResetHook>,
}

impl SearchForm {
    pub fn new(initial: impl Into<String>, on_search: impl FnMut(&SearchQuery) + 'static) -> Self {
        Self {
            query: initial.into(),
            placeholder: String::new(),
            errors: ValidationErrors::new(),
            on_search: Box::new(on_search),
            on_reset: None,
        }
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    #[must_use]
    pub fn with_reset_hook(mut self, on_reset: impl FnMut() + 'static) -> Self {
        self.on_reset = Some(Box::new(on_reset));
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Validate and forward the current query to the search callback. The
    /// field keeps the trimmed text that was submitted.
    ///
    /// # Errors
    ///
    /// Returns the validation errors and skips the callback if the query is
    /// rejected.
    pub fn submit(&mut self) -> Result<SearchQuery, ValidationErrors> {
        match validate_search(&SearchQuery::new(self.query.clone())) {
            Ok(query) => {
                self.query.clone_from(&query.search_query);
                self.errors.clear();
                (self.on_search)(&query);
                Ok(query)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }

    /// Clear the query and notify the reset hook, if one is registered.
    pub fn reset(&mut self) {
        self.query.clear();
        self.errors.clear();
        if let Some(on_reset) = self.on_reset.as_mut() {
            on_reset();
        }
    }
}
