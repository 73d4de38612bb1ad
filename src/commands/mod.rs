//! Command implementations for the cricket scoring CLI

pub mod balls;
pub mod common;
pub mod matches;
pub mod roster;
pub mod stats;
pub mod verify;


use std::path::PathBuf;

use crate::{storage::ScoreDatabase, Result, DB_PATH_ENV_VAR};

/// Resolve the database path from option, environment variable, or default location
pub fn resolve_db_path(db_path: Option<PathBuf>) -> Result<PathBuf> {
    match db_path.or_else(|| {
        std::env::var_os(DB_PATH_ENV_VAR)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
    }) {
        Some(path) => Ok(path),
        None => ScoreDatabase::default_path(),
    }
}

/// Open the database the command line points at
pub fn open_database(db_path: Option<PathBuf>) -> Result<ScoreDatabase> {
    let path = resolve_db_path(db_path)?;
    tracing::debug!(path = %path.display(), "Opening database");
    ScoreDatabase::open(&path)
}
