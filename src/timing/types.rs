use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the four breathing-timer intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Inhale,
    Exhale,
    HoldIn,
    HoldOut,
}

impl Phase {
    /// All phases in display order.
    pub const ALL: [Phase; 4] = [Self::Inhale, Self::Exhale, Self::HoldIn, Self::HoldOut];

    pub fn name(&self) -> &'static str {
        match self {
            Phase::Inhale => "inhale",
            Phase::Exhale => "exhale",
            Phase::HoldIn => "holdIn",
            Phase::HoldOut => "holdOut",
        }
    }

    /// Human label for tables and popups.
    pub fn title(&self) -> &'static str {
        match self {
            Phase::Inhale => "Inhale",
            Phase::Exhale => "Exhale",
            Phase::HoldIn => "Hold (in)",
            Phase::HoldOut => "Hold (out)",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown phase '{0}' (expected inhale, exhale, holdIn or holdOut)")]
pub struct UnknownPhase(pub String);

impl FromStr for Phase {
    type Err = UnknownPhase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "inhale" => Ok(Phase::Inhale),
            "exhale" => Ok(Phase::Exhale),
            "holdin" => Ok(Phase::HoldIn),
            "holdout" => Ok(Phase::HoldOut),
            _ => Err(UnknownPhase(s.to_string())),
        }
    }
}

/// Committed duration, in whole seconds, for every phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TimingSet {
    pub inhale: u32,
    pub exhale: u32,
    pub hold_in: u32,
    pub hold_out: u32,
}

impl Default for TimingSet {
    fn default() -> Self {
        Self {
            inhale: 4,
            exhale: 4,
            hold_in: 4,
            hold_out: 4,
        }
    }
}

impl TimingSet {
    pub fn get(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Inhale => self.inhale,
            Phase::Exhale => self.exhale,
            Phase::HoldIn => self.hold_in,
            Phase::HoldOut => self.hold_out,
        }
    }

    /// Copy of `self` with only `phase` replaced.
    pub fn with(&self, phase: Phase, seconds: u32) -> Self {
        let mut next = *self;
        match phase {
            Phase::Inhale => next.inhale = seconds,
            Phase::Exhale => next.exhale = seconds,
            Phase::HoldIn => next.hold_in = seconds,
            Phase::HoldOut => next.hold_out = seconds,
        }
        next
    }

    /// Length of one full breathing cycle.
    pub fn cycle_seconds(&self) -> u32 {
        Phase::ALL.iter().map(|p| self.get(*p)).sum()
    }
}

/// Inclusive bound on a phase duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseRange {
    pub min: u32,
    pub max: u32,
}

impl PhaseRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Parse "N-M" with an optional trailing "s" (e.g. "2-10", "0-120s").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let body = s.strip_suffix('s').unwrap_or(s);
        let Some((low, high)) = body.split_once('-') else {
            bail!("expected 'MIN-MAX', got '{}'", s);
        };
        let min: u32 = low.trim().parse()?;
        let max: u32 = high.trim().parse()?;
        if min > max {
            bail!("minimum {} is greater than maximum {}", min, max);
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= i64::from(self.min) && value <= i64::from(self.max)
    }
}

/// Renders as "{min}-{max}s".
impl fmt::Display for PhaseRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}s", self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSet {
    pub inhale: PhaseRange,
    pub exhale: PhaseRange,
    pub hold_in: PhaseRange,
    pub hold_out: PhaseRange,
}

impl Default for RangeSet {
    fn default() -> Self {
        Self {
            inhale: PhaseRange::new(2, 10),
            exhale: PhaseRange::new(2, 15),
            hold_in: PhaseRange::new(0, 20),
            hold_out: PhaseRange::new(0, 120),
        }
    }
}

impl RangeSet {
    pub fn get(&self, phase: Phase) -> PhaseRange {
        match phase {
            Phase::Inhale => self.inhale,
            Phase::Exhale => self.exhale,
            Phase::HoldIn => self.hold_in,
            Phase::HoldOut => self.hold_out,
        }
    }

    pub fn set(&mut self, phase: Phase, range: PhaseRange) {
        match phase {
            Phase::Inhale => self.inhale = range,
            Phase::Exhale => self.exhale = range,
            Phase::HoldIn => self.hold_in = range,
            Phase::HoldOut => self.hold_out = range,
        }
    }

    /// Phases whose value in `timing` falls outside its range.
    pub fn violations(&self, timing: &TimingSet) -> Vec<Phase> {
        Phase::ALL
            .into_iter()
            .filter(|p| !self.get(*p).contains(i64::from(timing.get(*p))))
            .collect()
    }
}
