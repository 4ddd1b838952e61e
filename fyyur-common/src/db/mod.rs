//! Database schema, models and store operations
//!
//! Store functions take `&mut SqliteConnection` so callers pass the
//! transaction they opened for the request (`&mut *tx`). Nothing here
//! commits; the caller owns the transaction boundary.

pub mod artists;
pub mod counters;
pub mod init;
pub mod migrations;
pub mod models;
pub mod shows;
pub mod venues;

pub use init::*;
pub use models::*;

/// Case-insensitive substring match of a search term against a name.
///
/// Folding uses Unicode lowercase mapping, so "CAFÉ" finds "Café". The term
/// is matched literally; an empty term matches every name.
pub(crate) fn name_matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}
