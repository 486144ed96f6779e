//! Restaurant owner form pipeline and its HTTP client.
//!
//! `form` holds the pure editing, validation, normalization and encoding
//! stages plus the submission orchestrator. `transport` defines the
//! collaborator traits and their `reqwest` implementation. `config` reads
//! the environment.

pub mod config;
pub mod form;
pub mod transport;
