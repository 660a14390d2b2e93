use anyhow::Result;
use thiserror::Error;

use super::types::{Phase, PhaseRange, RangeSet, TimingSet};

/// Why an edit was not committed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("editing is disabled")]
    Disabled,
    #[error("'{raw}' is not a whole number of seconds")]
    ParseFailure { raw: String },
    #[error("{phase} must be within {range}, got {value}")]
    OutOfRange {
        phase: Phase,
        value: i64,
        range: PhaseRange,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Accepted(TimingSet),
    Rejected(Rejection),
}

impl EditOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, EditOutcome::Accepted(_))
    }

    pub fn is_rejected(&self) -> bool {
        !self.is_accepted()
    }

    pub fn next_timing(&self) -> Option<&TimingSet> {
        match self {
            EditOutcome::Accepted(next) => Some(next),
            EditOutcome::Rejected(_) => None,
        }
    }
}

/// Evaluate a single edit against the committed set.
///
/// `current` is never modified; an accepted edit yields a copy with only
/// `phase` replaced. Values outside the range are rejected, not clamped.
pub fn propose_edit(
    current: &TimingSet,
    ranges: &RangeSet,
    phase: Phase,
    raw_value: &str,
    disabled: bool,
) -> EditOutcome {
    if disabled {
        return EditOutcome::Rejected(Rejection::Disabled);
    }

    let Ok(value) = raw_value.trim().parse::<i64>() else {
        let raw = raw_value.to_string();
        return EditOutcome::Rejected(Rejection::ParseFailure { raw });
    };

    let range = ranges.get(phase);
    if !range.contains(value) {
        let reason = Rejection::OutOfRange {
            phase,
            value,
            range,
        };
        return EditOutcome::Rejected(reason);
    }

    // range bounds are u32, so the cast is lossless
    EditOutcome::Accepted(current.with(phase, value as u32))
}

/// Receives committed timing sets. `on_update` fires after every accepted
/// edit, `on_save` on an explicit "save as default".
pub trait TimingListener {
    fn on_update(&mut self, timing: &TimingSet);

    fn on_save(&mut self, timing: &TimingSet) -> Result<()>;
}

/// Forward `current` to the persistence collaborator without re-validating.
pub fn request_save<L: TimingListener + ?Sized>(
    current: &TimingSet,
    listener: &mut L,
) -> Result<()> {
    listener.on_save(current)
}

/// Holds the committed set and applies edits one at a time.
#[derive(Debug, Clone)]
pub struct TimingEditor {
    current: TimingSet,
    ranges: RangeSet,
    disabled: bool,
}

impl TimingEditor {
    pub fn new(current: TimingSet, ranges: RangeSet) -> Self {
        Self {
            current,
            ranges,
            disabled: false,
        }
    }

    pub fn current(&self) -> &TimingSet {
        &self.current
    }

    pub fn ranges(&self) -> &RangeSet {
        &self.ranges
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Propose an edit; on acceptance commit it and notify `listener`.
    pub fn edit<L: TimingListener + ?Sized>(
        &mut self,
        phase: Phase,
        raw_value: &str,
        listener: &mut L,
    ) -> EditOutcome {
        let disabled = self.disabled;
        let outcome = propose_edit(&self.current, &self.ranges, phase, raw_value, disabled);
        if let EditOutcome::Accepted(next) = &outcome {
            self.current = *next;
            listener.on_update(&self.current);
        }
        outcome
    }

    /// Save the committed set. Does nothing while disabled.
    ///
    /// Returns `Ok(false)` when the save was skipped.
    pub fn save<L: TimingListener + ?Sized>(&self, listener: &mut L) -> Result<bool> {
        if self.disabled {
            return Ok(false);
        }
        request_save(&self.current, listener)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        updates: Vec<TimingSet>,
        saves: Vec<TimingSet>,
    }

    impl TimingListener for Recorder {
        fn on_update(&mut self, timing: &TimingSet) {
            self.updates.push(*timing);
        }

        fn on_save(&mut self, timing: &TimingSet) -> Result<()> {
            self.saves.push(*timing);
            Ok(())
        }
    }

    #[test]
    fn test_accepts_value_in_range() {
        let current = TimingSet::default();
        let ranges = RangeSet::default();
        let outcome = propose_edit(&current, &ranges, Phase::Inhale, "5", false);
        let expected = TimingSet {
            inhale: 5,
            exhale: 4,
            hold_in: 4,
            hold_out: 4,
        };
        assert_eq!(outcome, EditOutcome::Accepted(expected));
        assert_eq!(current, TimingSet::default());
    }

    #[test]
    fn test_rejects_below_minimum() {
        let current = TimingSet::default();
        let ranges = RangeSet::default();
        let outcome = propose_edit(&current, &ranges, Phase::Inhale, "1", false);
        assert_eq!(
            outcome,
            EditOutcome::Rejected(Rejection::OutOfRange {
                phase: Phase::Inhale,
                value: 1,
                range: PhaseRange::new(2, 10),
            })
        );
    }

    #[test]
    fn test_every_phase_accepts_its_whole_range() {
        let ranges = RangeSet::default();
        let current = TimingSet::default();
        for phase in Phase::ALL {
            let range = ranges.get(phase);
            for v in range.min..=range.max {
                let outcome = propose_edit(&current, &ranges, phase, &v.to_string(), false);
                let next = outcome.next_timing().copied().unwrap();
                assert_eq!(next.get(phase), v);
                for other in Phase::ALL.iter().filter(|p| **p != phase) {
                    assert_eq!(next.get(*other), current.get(*other));
                }
            }
        }
    }

    #[test]
    fn test_every_phase_rejects_just_outside_range() {
        let ranges = RangeSet::default();
        let current = TimingSet::default();
        for phase in Phase::ALL {
            let range = ranges.get(phase);
            let below = i64::from(range.min) - 1;
            let above = i64::from(range.max) + 1;
            for v in [below, above, -100, 10_000] {
                let outcome = propose_edit(&current, &ranges, phase, &v.to_string(), false);
                assert!(
                    matches!(outcome, EditOutcome::Rejected(Rejection::OutOfRange { .. })),
                    "{} accepted {}",
                    phase,
                    v
                );
            }
        }
    }

    #[test]
    fn test_rejects_non_numeric_input() {
        let ranges = RangeSet::default();
        let current = TimingSet::default();
        for raw in ["", "abc", "5s", "4.5", "5abc", "99999999999999999999"] {
            let outcome = propose_edit(&current, &ranges, Phase::Exhale, raw, false);
            let expected = Rejection::ParseFailure {
                raw: raw.to_string(),
            };
            assert_eq!(outcome, EditOutcome::Rejected(expected));
        }
    }

    #[test]
    fn test_trims_whitespace() {
        let current = TimingSet::default();
        let ranges = RangeSet::default();
        let outcome = propose_edit(&current, &ranges, Phase::HoldOut, " 60 ", false);
        assert_eq!(outcome.next_timing().map(|t| t.hold_out), Some(60));
    }

    #[test]
    fn test_disabled_rejects_everything() {
        let ranges = RangeSet::default();
        let current = TimingSet::default();
        for phase in Phase::ALL {
            for raw in ["5", "1", "abc"] {
                let outcome = propose_edit(&current, &ranges, phase, raw, true);
                assert_eq!(outcome, EditOutcome::Rejected(Rejection::Disabled));
            }
        }
    }

    #[test]
    fn test_editor_notifies_only_on_acceptance() {
        let mut editor = TimingEditor::new(TimingSet::default(), RangeSet::default());
        let mut recorder = Recorder::default();

        let outcome = editor.edit(Phase::Inhale, "1", &mut recorder);
        assert!(outcome.is_rejected());
        let outcome = editor.edit(Phase::Inhale, "x", &mut recorder);
        assert!(outcome.is_rejected());
        assert!(recorder.updates.is_empty());
        assert_eq!(*editor.current(), TimingSet::default());

        let outcome = editor.edit(Phase::Exhale, "8", &mut recorder);
        assert!(outcome.is_accepted());
        assert_eq!(recorder.updates.len(), 1);
        assert_eq!(recorder.updates[0].exhale, 8);
        assert_eq!(editor.current().exhale, 8);
    }

    #[test]
    fn test_editor_disabled_fires_no_callbacks() {
        let mut editor = TimingEditor::new(TimingSet::default(), RangeSet::default());
        editor.set_disabled(true);
        let mut recorder = Recorder::default();

        let outcome = editor.edit(Phase::Inhale, "5", &mut recorder);
        assert_eq!(outcome, EditOutcome::Rejected(Rejection::Disabled));
        assert!(!editor.save(&mut recorder).unwrap());
        assert!(recorder.updates.is_empty());
        assert!(recorder.saves.is_empty());
    }

    #[test]
    fn test_save_forwards_current_after_rejection() {
        let mut editor = TimingEditor::new(TimingSet::default(), RangeSet::default());
        let mut recorder = Recorder::default();

        editor.edit(Phase::HoldIn, "12", &mut recorder);
        editor.edit(Phase::HoldIn, "21", &mut recorder);
        assert!(editor.save(&mut recorder).unwrap());
        assert_eq!(recorder.saves.len(), 1);
        assert_eq!(recorder.saves[0].hold_in, 12);
    }

    #[test]
    fn test_request_save_does_not_revalidate() {
        let mut recorder = Recorder::default();
        let odd = TimingSet {
            inhale: 99,
            exhale: 0,
            hold_in: 0,
            hold_out: 0,
        };
        request_save(&odd, &mut recorder).unwrap();
        assert_eq!(recorder.saves, vec![odd]);
    }

    #[test]
    fn test_rejection_messages() {
        let rejection = Rejection::OutOfRange {
            phase: Phase::HoldOut,
            value: 130,
            range: PhaseRange::new(0, 120),
        };
        assert_eq!(
            rejection.to_string(),
            "holdOut must be within 0-120s, got 130"
        );
        assert_eq!(Rejection::Disabled.to_string(), "editing is disabled");
    }
}
