use anyhow::{Context, Result};
use owo_colors::{AnsiColors, OwoColorize};
use std::io::IsTerminal;

use crate::score::{ScoreResult, Tier, Trend};
use crate::timing::{EditOutcome, Phase, RangeSet, TimingSet};

const BAR_WIDTH: usize = 20;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Fixed-width bar for a 0-100 score. Values outside the scale are clamped
/// for display only.
pub fn score_bar(score: i64, width: usize) -> (String, String) {
    let ratio = (score.clamp(0, 100) as f64) / 100.0;
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    ("█".repeat(filled), "░".repeat(empty))
}

/// Multi-line score card:
/// ```text
/// Wellness score: 80 ↑ (high)
///   ████████████████░░░░
///   sleep 90 | nutrition 80 | mood 70 | previous 70
/// ```
pub fn format_score_card(
    result: &ScoreResult,
    inputs: (f64, f64, f64),
    previous: i64,
    use_colors: bool,
) -> String {
    let (filled, empty) = score_bar(result.score, BAR_WIDTH);
    let (sleep, nutrition, mood) = inputs;
    let details = format!(
        "sleep {} | nutrition {} | mood {} | previous {}",
        sleep, nutrition, mood, previous
    );

    if use_colors {
        let color = match result.tier {
            Tier::High => AnsiColors::Green,
            Tier::Medium => AnsiColors::Yellow,
            Tier::Low => AnsiColors::Red,
        };
        let score = result.score.to_string().color(color).bold().to_string();
        let bar = filled.color(color).to_string();
        let trend = match result.trend {
            Trend::Up => result.trend.symbol().green().to_string(),
            Trend::Flat => result.trend.symbol().dimmed().to_string(),
            Trend::Down => result.trend.symbol().red().to_string(),
        };
        format!(
            "Wellness score: {} {} ({})\n  {}{}\n  {}",
            score,
            trend,
            result.tier.label(),
            bar,
            empty.dimmed(),
            details.dimmed()
        )
    } else {
        format!(
            "Wellness score: {} {} ({})\n  {}{}\n  {}",
            result.score,
            result.trend.symbol(),
            result.tier.label(),
            filled,
            empty,
            details
        )
    }
}

/// Tab-separated score line for scripting: score, trend, tier
pub fn format_score_tsv(result: &ScoreResult) -> String {
    let trend = result.trend.label();
    let tier = result.tier.label();
    format!("{}\t{trend}\t{tier}", result.score)
}

/// Pretty-printed JSON: `{"score": .., "trend": "up", "tier": "high"}`
pub fn format_score_json(result: &ScoreResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize score")
}

/// One line per phase: "Inhale       5s  (2-10s)"
pub fn format_timing_table(
    timing: &TimingSet,
    ranges: &RangeSet,
    disabled: bool,
    use_colors: bool,
) -> String {
    let mut lines: Vec<String> = Phase::ALL
        .iter()
        .map(|phase| {
            let title = format!("{:<11}", phase.title());
            let value = format!("{:>4}s", timing.get(*phase));
            let range = format!("({})", ranges.get(*phase));
            if use_colors {
                format!("{} {}  {}", title.bold(), value.cyan(), range.dimmed())
            } else {
                format!("{} {}  {}", title, value, range)
            }
        })
        .collect();

    lines.push(format!("Cycle: {}s", timing.cycle_seconds()));
    if disabled {
        let note = "Editing disabled";
        lines.push(if use_colors {
            note.yellow().to_string()
        } else {
            note.to_string()
        });
    }
    lines.join("\n")
}

/// Result line for a single timing edit
pub fn format_edit_outcome(phase: Phase, outcome: &EditOutcome, use_colors: bool) -> String {
    match outcome {
        EditOutcome::Accepted(next) => {
            let msg = format!("{} set to {}s", phase, next.get(phase));
            if use_colors {
                msg.green().to_string()
            } else {
                msg
            }
        }
        EditOutcome::Rejected(reason) => {
            let msg = format!("Rejected: {}", reason);
            if use_colors {
                msg.red().to_string()
            } else {
                msg
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::aggregate;
    use crate::timing::propose_edit;

    #[test]
    fn test_score_card_plain() {
        let result = aggregate(90.0, 80.0, 70.0, 70);
        let card = format_score_card(&result, (90.0, 80.0, 70.0), 70, false);
        let lines: Vec<&str> = card.lines().collect();
        assert_eq!(lines[0], "Wellness score: 80 ↑ (high)");
        let bar = format!("  {}{}", "█".repeat(16), "░".repeat(4));
        assert_eq!(lines[1], bar);
        assert_eq!(
            lines[2],
            "  sleep 90 | nutrition 80 | mood 70 | previous 70"
        );
    }

    #[test]
    fn test_score_bar_clamps() {
        assert_eq!(score_bar(150, 10), ("█".repeat(10), String::new()));
        assert_eq!(score_bar(-5, 10), (String::new(), "░".repeat(10)));
        assert_eq!(score_bar(50, 10), ("█".repeat(5), "░".repeat(5)));
    }

    #[test]
    fn test_score_tsv() {
        let result = aggregate(50.0, 50.0, 50.0, 60);
        assert_eq!(format_score_tsv(&result), "50\tdown\tmedium");
    }

    #[test]
    fn test_score_json() {
        let result = aggregate(90.0, 80.0, 70.0, 70);
        let json = format_score_json(&result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["score"], 80);
        assert_eq!(value["trend"], "up");
        assert_eq!(value["tier"], "high");
    }

    #[test]
    fn test_timing_table_contains_range_labels() {
        let (timing, ranges) = (TimingSet::default(), RangeSet::default());
        let table = format_timing_table(&timing, &ranges, false, false);
        for label in ["2-10s", "2-15s", "0-20s", "0-120s"] {
            assert!(table.contains(label), "missing {}", label);
        }
        assert!(table.contains("Cycle: 16s"));
        assert!(!table.contains("Editing disabled"));
    }

    #[test]
    fn test_timing_table_colored_keeps_labels() {
        let (timing, ranges) = (TimingSet::default(), RangeSet::default());
        let table = format_timing_table(&timing, &ranges, true, true);
        assert!(table.contains("0-120s"));
        assert!(table.contains("Editing disabled"));
    }

    #[test]
    fn test_edit_outcome_messages() {
        let ranges = RangeSet::default();
        let current = TimingSet::default();
        let ok = propose_edit(&current, &ranges, Phase::Inhale, "5", false);
        let line = format_edit_outcome(Phase::Inhale, &ok, false);
        assert_eq!(line, "inhale set to 5s");

        let bad = propose_edit(&current, &ranges, Phase::Inhale, "1", false);
        let line = format_edit_outcome(Phase::Inhale, &bad, false);
        assert_eq!(line, "Rejected: inhale must be within 2-10s, got 1");
    }
}
