//! Recipe API infrastructure.
//!
//! A reqwest adapter for the two TheMealDB endpoints and the wire DTOs for
//! its fixed JSON schema.

mod client;
pub mod dto;

pub use client::MealDbClient;
