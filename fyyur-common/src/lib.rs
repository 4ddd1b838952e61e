//! # Fyyur Common Library
//!
//! Shared code for the Fyyur booking service:
//! - Database schema, models and store operations (venues, artists, shows)
//! - Show counter maintenance
//! - Form validation producing field-level errors
//! - Configuration loading
//! - Time parsing and formatting helpers

pub mod config;
pub mod db;
pub mod error;
pub mod time;
pub mod validation;

pub use error::{Error, Result};
