use std::ops::Range;

/// Tunables for the show. Distances are in surface units, timings in ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowConfig {
    /// Ticks between timed launches.
    pub launch_interval: u32,
    /// Particles per explosion, half-open.
    pub burst: Range<usize>,
    /// Horizontal margin kept clear of launch positions.
    pub padding: f32,
    pub initial_hue: f32,
    /// Added to the shared hue every tick.
    pub hue_step: f32,
    /// Background star count, half-open.
    pub stars: Range<usize>,
    /// Upper bound on live particles.
    pub max_particles: usize,
    /// Alpha of the darkening overlay painted each tick.
    pub fade: f32,
    pub show_targets: bool,
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            launch_interval: 20,
            burst: 80..100,
            padding: 300.0,
            initial_hue: 120.0,
            hue_step: 0.5,
            stars: 100..200,
            max_particles: 6000,
            fade: 0.5,
            show_targets: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("launch interval must be at least one tick")]
    ZeroInterval,

    #[error("{name} range is empty: {start}..{end}")]
    EmptyRange {
        name: &'static str,
        start: usize,
        end: usize,
    },

    #[error("fade must be within (0, 1], got {0}")]
    FadeOutOfRange(f32),

    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("padding must not be negative, got {0}")]
    NegativePadding(f32),

    #[error("invalid hex color `{0}`, expected RRGGBB (e.g. 1a1b26)")]
    InvalidColor(String),
}

impl ShowConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.launch_interval == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        check_range("burst", &self.burst)?;
        check_range("star count", &self.stars)?;
        if !(self.fade > 0.0 && self.fade <= 1.0) {
            return Err(ConfigError::FadeOutOfRange(self.fade));
        }
        if !(self.padding >= 0.0) {
            return Err(ConfigError::NegativePadding(self.padding));
        }
        Ok(())
    }
}

fn check_range(name: &'static str, range: &Range<usize>) -> Result<(), ConfigError> {
    if range.is_empty() {
        return Err(ConfigError::EmptyRange {
            name,
            start: range.start,
            end: range.end,
        });
    }
    Ok(())
}

pub fn parse_hex_color(hex: &str) -> Result<(u8, u8, u8), ConfigError> {
    let invalid = || ConfigError::InvalidColor(hex.to_string());
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(invalid());
    }

    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
    Ok((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ShowConfig::default();
        assert_eq!(config.launch_interval, 20);
        assert_eq!(config.burst, 80..100);
        assert_eq!(config.padding, 300.0);
        assert_eq!(config.hue_step, 0.5);
        assert_eq!(config.stars, 100..200);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_values() {
        let config = ShowConfig {
            launch_interval: 0,
            ..ShowConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroInterval));

        let config = ShowConfig {
            burst: 10..10,
            ..ShowConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyRange { name: "burst", .. })
        ));

        let config = ShowConfig {
            fade: 0.0,
            ..ShowConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::FadeOutOfRange(0.0)));

        let config = ShowConfig {
            padding: -1.0,
            ..ShowConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NegativePadding(-1.0)));
    }

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_hex_color("1a1b26"), Ok((0x1a, 0x1b, 0x26)));
        assert_eq!(parse_hex_color("#FFFFFF"), Ok((255, 255, 255)));
        assert!(parse_hex_color("12345").is_err());
        assert!(parse_hex_color("zzzzzz").is_err());
    }

    #[test]
    fn error_messages_are_readable() {
        let err = ConfigError::EmptyRange {
            name: "burst",
            start: 5,
            end: 5,
        };
        assert_eq!(err.to_string(), "burst range is empty: 5..5");
    }
}
