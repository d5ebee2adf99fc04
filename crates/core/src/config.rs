//! Engine configuration.
//!
//! Only tick-rate dependent tunables live here. Scores, board size and the
//! spawn anchor are fixed rules.

use std::time::Duration;

use log::warn;

use crate::types::{GRAVITY_PERIOD_TICKS, SHIFT_REPEAT_TICKS, TICK_HZ};

/// Tick-rate dependent tunables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Ticks between two gravity steps
    pub gravity_period_ticks: u32,
    /// Ticks between horizontal repeats while a direction stays held
    pub shift_repeat_ticks: u32,
    /// Rate at which the time base calls `tick`
    pub tick_hz: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gravity_period_ticks: GRAVITY_PERIOD_TICKS,
            shift_repeat_ticks: SHIFT_REPEAT_TICKS,
            tick_hz: TICK_HZ,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables
    ///
    /// - `FALLBLOCK_GRAVITY_TICKS`
    /// - `FALLBLOCK_SHIFT_REPEAT_TICKS`
    /// - `FALLBLOCK_TICK_HZ`
    ///
    /// Missing values use the defaults; zero or unparsable values are logged
    /// and replaced by the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            gravity_period_ticks: positive_or(
                &lookup,
                "FALLBLOCK_GRAVITY_TICKS",
                defaults.gravity_period_ticks,
            ),
            shift_repeat_ticks: positive_or(
                &lookup,
                "FALLBLOCK_SHIFT_REPEAT_TICKS",
                defaults.shift_repeat_ticks,
            ),
            tick_hz: positive_or(&lookup, "FALLBLOCK_TICK_HZ", defaults.tick_hz),
        }
    }

    /// Wall-clock interval between two ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.tick_hz.max(1) as u64)
    }
}

fn positive_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u32) -> u32 {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<u32>() {
        Ok(v) if v > 0 => v,
        _ => {
            warn!("ignoring {}={:?}, using {}", key, raw, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_rule_constants() {
        let c = EngineConfig::default();
        assert_eq!(c.gravity_period_ticks, 50);
        assert_eq!(c.shift_repeat_ticks, 10);
        assert_eq!(c.tick_hz, 100);
        assert_eq!(c.tick_interval(), Duration::from_millis(10));
    }

    #[test]
    fn test_lookup_overrides_and_rejects() {
        let c = EngineConfig::from_lookup(|key| match key {
            "FALLBLOCK_GRAVITY_TICKS" => Some("20".to_string()),
            "FALLBLOCK_SHIFT_REPEAT_TICKS" => Some("0".to_string()),
            "FALLBLOCK_TICK_HZ" => Some("fast".to_string()),
            _ => None,
        });
        assert_eq!(c.gravity_period_ticks, 20);
        assert_eq!(c.shift_repeat_ticks, 10);
        assert_eq!(c.tick_hz, 100);
    }
}
