//! # Club Stats
//!
//! Player statistics and rankings for a table tennis club, computed from the
//! team-match exports of each playing day ("journée").
//!
//! ## Architecture
//!
//! - **models**: Match corpus, baseline snapshot and computed statistics
//! - **classify**: Which side of a fixture is the club, who played each encounter
//! - **calculate**: Per-journée statistics, merging, club-level figures
//! - **ranking**: Leaderboard and MVP orders, column re-sorting
//! - **history**: One player's encounters match by match, one match in full
//! - **dashboard**: Entry points bound to a loaded corpus
//! - **fetch**: Loading documents from disk or HTTP
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod classify;
pub mod config;
pub mod dashboard;
pub mod fetch;
pub mod history;
pub mod models;
pub mod ranking;

#[cfg(test)]
mod testing;

pub use models::*;
