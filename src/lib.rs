//! Dessertbook - the headless core of a dessert recipe browser.
//!
//! This crate provides the everything-behind-the-views layer of a recipe
//! client: a TheMealDB API pipeline and an in-memory image cache with a
//! single-flight loader. UI toolkits consume it through the application use
//! cases and the loader's observable state.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = "dessertbook";
