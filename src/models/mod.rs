//! Core data models.

mod baseline;
mod corpus;
mod de;
mod history;
mod ids;
mod stats;

pub use baseline::*;
pub use corpus::*;
pub use history::*;
pub use ids::*;
pub use stats::*;
