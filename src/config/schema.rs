use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::timing::{Phase, PhaseRange, RangeSet, TimingSet};

/// Top-level configuration file.
///
/// Example YAML:
/// ```yaml
/// timing:
///   ranges:
///     inhale: "2-10"
///     holdOut: "0-60s"
///   defaults: { inhale: 4, exhale: 6, holdIn: 2, holdOut: 0 }
///   disabled: false
/// theme: dark
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub timing: Option<TimingConfig>,

    #[serde(default)]
    pub theme: ThemeMode,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TimingConfig {
    /// Per-phase range overrides; unset phases keep the built-in range
    #[serde(default)]
    pub ranges: Option<RangeConfig>,

    /// Starting timing set used until one is saved as default
    #[serde(default)]
    pub defaults: Option<TimingSet>,

    /// Reject all timing edits
    #[serde(default)]
    pub disabled: bool,
}

/// Range expressions per phase, e.g. "2-10" or "0-120s".
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RangeConfig {
    #[serde(default)]
    pub inhale: Option<String>,
    #[serde(default)]
    pub exhale: Option<String>,
    #[serde(default)]
    pub hold_in: Option<String>,
    #[serde(default)]
    pub hold_out: Option<String>,
}

impl RangeConfig {
    pub fn get(&self, phase: Phase) -> Option<&str> {
        match phase {
            Phase::Inhale => self.inhale.as_deref(),
            Phase::Exhale => self.exhale.as_deref(),
            Phase::HoldIn => self.hold_in.as_deref(),
            Phase::HoldOut => self.hold_out.as_deref(),
        }
    }

    /// Apply every override that parses to `ranges`. Phases whose expression
    /// does not parse keep their current range and are returned with a message.
    pub fn apply_to(&self, ranges: &mut RangeSet) -> Vec<(Phase, String)> {
        let mut failures = Vec::new();
        for phase in Phase::ALL {
            let Some(expr) = self.get(phase) else {
                continue;
            };
            match PhaseRange::parse(expr) {
                Ok(range) => ranges.set(phase, range),
                Err(e) => {
                    let message = format!("timing.ranges.{phase}: invalid '{expr}' - {e}");
                    failures.push((phase, message));
                }
            }
        }
        failures
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Auto,
    Dark,
    Light,
}

impl Config {
    /// Built-in ranges with the configured overrides applied.
    pub fn range_set(&self) -> Result<RangeSet> {
        let mut ranges = RangeSet::default();
        if let Some(overrides) = self.timing.as_ref().and_then(|t| t.ranges.as_ref()) {
            let failures = overrides.apply_to(&mut ranges);
            if !failures.is_empty() {
                let messages: Vec<String> = failures.into_iter().map(|(_, m)| m).collect();
                anyhow::bail!("{}", messages.join("; "));
            }
        }
        Ok(ranges)
    }

    pub fn default_timing(&self) -> TimingSet {
        self.timing
            .as_ref()
            .and_then(|t| t.defaults)
            .unwrap_or_default()
    }

    pub fn timing_disabled(&self) -> bool {
        self.timing.as_ref().is_some_and(|t| t.disabled)
    }
}
