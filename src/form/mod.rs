//! Restaurant form core.
//!
//! SYSTEM CONTEXT
//! ==============
//! Raw input flows `editor` → `validate` → `normalize` → `encode` → `submit`.
//! `types` and `path` hold the shared records and field locators, `catalog`
//! the selectable cuisines, and `search` the search bar form.

pub mod catalog;
pub mod editor;
pub mod encode;
pub mod normalize;
pub mod path;
pub mod search;
pub mod submit;
pub mod types;
pub mod validate;
