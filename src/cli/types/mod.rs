//! Type-safe identifiers shared by the CLI, storage and scoring layers.

pub mod ids;


pub use ids::{MatchId, PlayerId, TeamId};
