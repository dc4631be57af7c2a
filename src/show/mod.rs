pub mod firework;
pub mod particle;
pub mod star;
pub mod trail;

use tracing::{debug, warn};

use crate::config::ShowConfig;
use crate::random::Random;
use crate::surface::{Blend, Color, Surface};
use firework::Firework;
use particle::Particle;
use star::Star;
pub use trail::Point;

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub launched: bool,
    pub boomed: usize,
    pub spawned: usize,
    pub expired: usize,
    /// Particles not spawned because the particle cap was reached.
    pub dropped: usize,
}

/// Where timed launches start and aim, derived from the surface size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchZone {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
    pub ground: f32,
}

impl LaunchZone {
    /// Padding shrinks to a quarter of the width on narrow surfaces, and the
    /// highest target stays within the top quarter on short ones.
    pub fn new(width: f32, height: f32, padding: f32) -> Self {
        let padding = padding.min(width / 4.0);
        Self {
            x_min: padding,
            x_max: width - padding,
            y_min: 50.0f32.min(height / 4.0),
            y_max: height / 2.0,
            ground: height,
        }
    }
}

/// The firework display: rising shells, their bursts, and the starfield.
///
/// Call [`Show::tick`] once per frame; the caller owns the cadence.
pub struct Show {
    config: ShowConfig,
    rng: Random,
    fireworks: Vec<Firework>,
    particles: Vec<Particle>,
    stars: Vec<Star>,
    hue: f32,
    timer: u32,
}

impl Show {
    pub fn new(config: ShowConfig, mut rng: Random, width: f32, height: f32) -> Self {
        let count = rng.count(config.stars.clone());
        let stars = (0..count)
            .map(|_| {
                let pos = Point::new(rng.uniform(0.0, width), rng.uniform(0.0, height));
                Star::new(pos, &mut rng)
            })
            .collect();

        Self {
            hue: config.initial_hue,
            config,
            rng,
            fireworks: Vec::new(),
            particles: Vec::new(),
            stars,
            timer: 0,
        }
    }

    pub fn fireworks(&self) -> &[Firework] {
        &self.fireworks
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    /// Fades the previous frame, then draws and advances every entity.
    pub fn tick(&mut self, surface: &mut impl Surface) -> TickReport {
        let mut report = TickReport::default();
        let width = surface.width();
        let height = surface.height();

        surface.set_blend(Blend::DestinationOut);
        surface.set_fill_color(Color::rgba(0, 0, 0, self.config.fade));
        surface.fill_rect(0.0, 0.0, width, height);
        surface.set_blend(Blend::Lighter);

        self.hue += self.config.hue_step;

        let show_targets = self.config.show_targets;
        let mut bursts = Vec::new();
        self.fireworks.retain_mut(|firework| {
            firework.render(surface);
            if show_targets {
                firework.render_target(surface);
            }
            firework.advance();
            if firework.boom {
                bursts.push(firework.pos);
                false
            } else {
                true
            }
        });
        for pos in bursts {
            report.boomed += 1;
            self.explode(pos, &mut report);
        }

        let before = self.particles.len();
        self.particles.retain_mut(|particle| {
            particle.render(surface);
            particle.advance();
            !particle.destroyed
        });
        report.expired = before - self.particles.len();

        for star in &mut self.stars {
            star.render(surface, &mut self.rng);
            star.advance();
        }

        self.timer += 1;
        if self.timer >= self.config.launch_interval {
            self.timer = 0;
            self.launch(LaunchZone::new(width, height, self.config.padding));
            report.launched = true;
        }

        report
    }

    /// Launches a shell from the ground straight below `target`.
    pub fn launch_at(&mut self, target: Point, ground: f32) {
        let firework = Firework::new(
            Point::new(target.x, ground),
            target,
            self.hue,
            &mut self.rng,
        );
        debug!(x = target.x, y = target.y, hue = self.hue, "firework launched");
        self.fireworks.push(firework);
    }

    fn launch(&mut self, zone: LaunchZone) {
        let x = self.rng.uniform(zone.x_min, zone.x_max);
        let y = self.rng.uniform(zone.y_min, zone.y_max);
        self.launch_at(Point::new(x, y), zone.ground);
    }

    fn explode(&mut self, pos: Point, report: &mut TickReport) {
        let wanted = self.rng.count(self.config.burst.clone());
        let room = self.config.max_particles.saturating_sub(self.particles.len());
        let count = wanted.min(room);

        self.particles.reserve(count);
        for _ in 0..count {
            self.particles.push(Particle::new(pos, self.hue, &mut self.rng));
        }

        report.spawned += count;
        report.dropped += wanted - count;
        if count < wanted {
            warn!(
                wanted,
                spawned = count,
                live = self.particles.len(),
                "particle cap reached, burst truncated"
            );
        }
        debug!(x = pos.x, y = pos.y, particles = count, "firework burst");
    }
}
