//! Storage layer for the cricket scoring engine
//!
//! This module provides a clean abstraction over the SQLite database,
//! organized into logical components:
//! - `models`: Team and player records
//! - `schema`: Database connection, schema and transactions
//! - `queries`: Basic CRUD operations
//! - `repository`: Match, ball and player repositories used while scoring

pub mod models;
pub mod queries;
pub mod repository;
pub mod schema;

#[cfg(test)]
mod tests;

use crate::error::Result;
use std::time::{SystemTime, UNIX_EPOCH};

// Re-export the main types and database struct for easy access
pub use models::*;
pub use repository::{BallRepository, MatchRepository, PlayerRepository};
pub use schema::ScoreDatabase;

/// Seconds since the unix epoch
pub(crate) fn unix_now() -> Result<u64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}
