//! Command-line interface.
//!
//! Every option has an environment-variable fallback so a preferred setup can
//! live in the shell profile.
//!
//! ```bash
//! skyburst                          # default show
//! skyburst --interval 10 --fade 0.3 # busier sky, longer trails
//! skyburst --bg-color 1a1b26        # match the terminal theme
//! skyburst --log-file sky.log -v    # debug log while running
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::{ConfigError, ShowConfig, parse_hex_color};

/// Fireworks over a twinkling starfield, rendered in the terminal.
///
/// Press 'q', ESC, or Ctrl+C to exit. Click anywhere to launch a firework
/// toward the pointer.
#[derive(Parser, Debug, Clone)]
#[command(name = "skyburst", version, about)]
pub struct Cli {
    /// Ticks between launches
    #[arg(long, default_value_t = 20, env = "SKYBURST_INTERVAL")]
    pub interval: u32,

    /// Fewest particles per explosion
    #[arg(long, default_value_t = 80, env = "SKYBURST_BURST_MIN")]
    pub burst_min: usize,

    /// Particles per explosion stay below this
    #[arg(long, default_value_t = 100, env = "SKYBURST_BURST_MAX")]
    pub burst_max: usize,

    /// Horizontal margin kept clear of launches, in surface units
    #[arg(long, default_value_t = 300.0, env = "SKYBURST_PADDING")]
    pub padding: f32,

    /// Hue shift per tick, in degrees
    #[arg(long, default_value_t = 0.5, allow_negative_numbers = true, env = "SKYBURST_HUE_STEP")]
    pub hue_step: f32,

    /// Fewest background stars
    #[arg(long, default_value_t = 100, env = "SKYBURST_STARS_MIN")]
    pub stars_min: usize,

    /// Star count stays below this
    #[arg(long, default_value_t = 200, env = "SKYBURST_STARS_MAX")]
    pub stars_max: usize,

    /// Cap on live particles
    #[arg(long, default_value_t = 6000, env = "SKYBURST_MAX_PARTICLES")]
    pub max_particles: usize,

    /// Fraction of the previous frame erased each tick; lower keeps longer trails
    #[arg(long, default_value_t = 0.5, env = "SKYBURST_FADE")]
    pub fade: f32,

    /// Surface units per terminal pixel
    #[arg(long, default_value_t = 4.0, env = "SKYBURST_SCALE")]
    pub scale: f32,

    /// Simulation ticks per second
    #[arg(long, default_value_t = 60, env = "SKYBURST_FPS")]
    pub fps: u32,

    /// Seed for a reproducible show
    #[arg(long, env = "SKYBURST_SEED")]
    pub seed: Option<u64>,

    /// Background color as hex (e.g. 1a1b26)
    #[arg(long, value_name = "RRGGBB", env = "SKYBURST_BG_COLOR")]
    pub bg_color: Option<String>,

    /// Draw a pulsing marker at each firework's target
    #[arg(long, env = "SKYBURST_SHOW_TARGETS")]
    pub show_targets: bool,

    /// Write logs to this file (the display owns the terminal)
    #[arg(long, value_name = "PATH", env = "SKYBURST_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// More log detail (-v debug, -vv trace); RUST_LOG overrides
    #[arg(long, short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

/// Everything the driver needs, validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub show: ShowConfig,
    pub scale: f32,
    pub fps: u32,
    pub seed: Option<u64>,
    pub bg_color: (u8, u8, u8),
}

impl Cli {
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let show = ShowConfig {
            launch_interval: self.interval,
            burst: self.burst_min..self.burst_max,
            padding: self.padding,
            hue_step: self.hue_step,
            stars: self.stars_min..self.stars_max,
            max_particles: self.max_particles,
            fade: self.fade,
            show_targets: self.show_targets,
            ..ShowConfig::default()
        };
        show.validate()?;

        if !(self.scale > 0.0) {
            return Err(ConfigError::NotPositive {
                name: "scale",
                value: self.scale,
            });
        }
        if self.fps == 0 {
            return Err(ConfigError::NotPositive {
                name: "fps",
                value: 0.0,
            });
        }

        let bg_color = match &self.bg_color {
            Some(hex) => parse_hex_color(hex)?,
            None => (0, 0, 0),
        };

        Ok(Settings {
            show,
            scale: self.scale,
            fps: self.fps,
            seed: self.seed,
            bg_color,
        })
    }
}
