use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::score::{ScoreResult, Tier};
use crate::timing::{RangeSet, TimingSet};

pub const STATE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub version: u32,
    /// Working timing set, updated by every accepted edit
    #[serde(default)]
    pub timing: Option<TimingSet>,
    /// Timing set stored by an explicit "save as default"
    #[serde(default)]
    pub saved_timing: Option<SavedTiming>,
    #[serde(default)]
    pub last_score: Option<ScoreRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedTiming {
    pub timing: TimingSet,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub score: i64,
    pub tier: Tier,
    pub recorded_at: DateTime<Utc>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Create a new empty state with the current version
    pub fn new() -> Self {
        Self {
            version: STATE_VERSION,
            timing: None,
            saved_timing: None,
            last_score: None,
        }
    }

    /// Working set, else saved default, else `fallback`.
    ///
    /// A stored set that no longer fits `ranges` (the config changed since it
    /// was written) is skipped.
    pub fn committed_timing(&self, ranges: &RangeSet, fallback: TimingSet) -> TimingSet {
        [self.timing, self.saved_timing.as_ref().map(|s| s.timing)]
            .into_iter()
            .flatten()
            .find(|t| ranges.violations(t).is_empty())
            .unwrap_or(fallback)
    }

    /// Previous aggregate for trend computation (0 if none recorded)
    pub fn previous_score(&self) -> i64 {
        self.last_score.as_ref().map(|r| r.score).unwrap_or(0)
    }

    pub fn record_score(&mut self, result: &ScoreResult) {
        self.last_score = Some(ScoreRecord {
            score: result.score,
            tier: result.tier,
            recorded_at: Utc::now(),
        });
    }

    pub fn save_timing(&mut self, timing: TimingSet) {
        self.saved_timing = Some(SavedTiming {
            timing,
            saved_at: Utc::now(),
        });
    }
}
