use serde::{Deserialize, Serialize};

/// Lower bound (inclusive) of the `high` tier.
pub const HIGH_THRESHOLD: i64 = 80;
/// Lower bound (inclusive) of the `medium` tier.
pub const MEDIUM_THRESHOLD: i64 = 50;

/// Direction of the aggregate relative to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Flat,
    Down,
}

impl Trend {
    pub fn between(score: i64, previous: i64) -> Self {
        match score.cmp(&previous) {
            std::cmp::Ordering::Greater => Trend::Up,
            std::cmp::Ordering::Equal => Trend::Flat,
            std::cmp::Ordering::Less => Trend::Down,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Flat => "→",
            Trend::Down => "↓",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Flat => "flat",
            Trend::Down => "down",
        }
    }
}

/// Visual bucket for an aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    High,
    Medium,
    Low,
}

impl Tier {
    pub fn from_score(score: i64) -> Self {
        if score >= HIGH_THRESHOLD {
            Tier::High
        } else if score >= MEDIUM_THRESHOLD {
            Tier::Medium
        } else {
            Tier::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::High => "high",
            Tier::Medium => "medium",
            Tier::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: i64,
    pub trend: Trend,
    pub tier: Tier,
}

/// Sub-scores on a 0-100 scale. The range is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreInput {
    pub sleep: f64,
    pub nutrition: f64,
    pub mood: f64,
    pub previous: i64,
}

impl ScoreInput {
    pub fn aggregate(&self) -> ScoreResult {
        aggregate(self.sleep, self.nutrition, self.mood, self.previous)
    }
}

/// Reduce three sub-scores to a wellness score.
///
/// The mean is rounded half-up (`floor(x + 0.5)`). Out-of-range inputs are
/// carried through arithmetically; non-finite means saturate (NaN becomes 0).
pub fn aggregate(sleep: f64, nutrition: f64, mood: f64, previous: i64) -> ScoreResult {
    let mean = (sleep + nutrition + mood) / 3.0;
    let score = round_half_up(mean);

    ScoreResult {
        score,
        trend: Trend::between(score, previous),
        tier: Tier::from_score(score),
    }
}

fn round_half_up(value: f64) -> i64 {
    // `as` saturates on overflow and maps NaN to 0
    (value + 0.5).floor() as i64
}
