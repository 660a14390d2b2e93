use super::schema::Config;
use crate::timing::RangeSet;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let Some(timing) = config.timing.as_ref() else {
        return Ok(());
    };

    let mut ranges = RangeSet::default();
    let mut unparsed = Vec::new();
    if let Some(ref overrides) = timing.ranges {
        for (phase, message) in overrides.apply_to(&mut ranges) {
            unparsed.push(phase);
            errors.push(message);
        }
    }

    // A phase with an unparseable range is already reported above
    if let Some(ref defaults) = timing.defaults {
        for phase in ranges.violations(defaults) {
            if unparsed.contains(&phase) {
                continue;
            }
            errors.push(format!(
                "timing.defaults.{}: {} is outside {}",
                phase,
                defaults.get(phase),
                ranges.get(phase)
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RangeConfig, TimingConfig};
    use crate::timing::TimingSet;

    fn with_timing(timing: TimingConfig) -> Config {
        Config {
            timing: Some(timing),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_valid_config() {
        let config = with_timing(TimingConfig {
            ranges: Some(RangeConfig {
                inhale: Some("3-6".to_string()),
                ..Default::default()
            }),
            defaults: Some(TimingSet {
                inhale: 3,
                exhale: 4,
                hold_in: 0,
                hold_out: 0,
            }),
            disabled: false,
        });
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_inverted_range() {
        let config = with_timing(TimingConfig {
            ranges: Some(RangeConfig {
                hold_in: Some("20-0".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        });
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("timing.ranges.holdIn"));
    }

    #[test]
    fn test_default_outside_range() {
        let config = with_timing(TimingConfig {
            defaults: Some(TimingSet {
                inhale: 1,
                exhale: 4,
                hold_in: 4,
                hold_out: 4,
            }),
            ..Default::default()
        });
        let errors = validate_config(&config).unwrap_err();
        let expected = "timing.defaults.inhale: 1 is outside 2-10s".to_string();
        assert_eq!(errors, vec![expected]);
    }

    #[test]
    fn test_bad_range_does_not_also_flag_its_default() {
        // 20 is outside the built-in exhale range but the override is what failed
        let config = with_timing(TimingConfig {
            ranges: Some(RangeConfig {
                exhale: Some("bad".to_string()),
                ..Default::default()
            }),
            defaults: Some(TimingSet {
                inhale: 4,
                exhale: 20,
                hold_in: 4,
                hold_out: 4,
            }),
            disabled: false,
        });
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("timing.ranges.exhale: invalid"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = with_timing(TimingConfig {
            ranges: Some(RangeConfig {
                exhale: Some("bad".to_string()), // Error 1
                hold_out: Some("0-10".to_string()),
                ..Default::default()
            }),
            // Errors 2, 3
            defaults: Some(TimingSet {
                inhale: 11,
                exhale: 4,
                hold_in: 4,
                hold_out: 30,
            }),
            disabled: false,
        });
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.contains("timing.ranges.exhale")));
        assert!(errors.iter().any(|e| e.contains("timing.defaults.inhale")));
        assert!(errors.iter().any(|e| e.contains("timing.defaults.holdOut")));
    }
}
