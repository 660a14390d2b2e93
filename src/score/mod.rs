pub mod aggregate;

pub use aggregate::{aggregate, ScoreInput, ScoreResult, Tier, Trend};
