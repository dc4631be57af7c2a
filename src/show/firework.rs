use super::trail::{Point, Trail};
use crate::random::Random;
use crate::surface::{Color, Surface};

/// Remaining distance at which a rising firework bursts.
pub const BOOM_DISTANCE: f32 = 20.0;

const PULSE_MIN: f32 = 1.0;
const PULSE_MAX: f32 = 6.0;
const PULSE_STEP: f32 = 0.1;

/// A shell easing from its launch point toward its target.
#[derive(Debug, Clone)]
pub struct Firework {
    pub launch: Point,
    pub pos: Point,
    pub target: Point,
    pub trail: Trail,
    pub easing: f32,
    pub hue: f32,
    pub brightness: f32,
    /// Radius of the target marker, cycling between 1 and 6.
    pub pulse: f32,
    pub boom: bool,
}

impl Firework {
    pub fn new(launch: Point, target: Point, hue: f32, rng: &mut Random) -> Self {
        Self::with_easing(launch, target, hue, rng.uniform(0.05, 0.15), rng)
    }

    pub fn with_easing(
        launch: Point,
        target: Point,
        hue: f32,
        easing: f32,
        rng: &mut Random,
    ) -> Self {
        Self {
            launch,
            pos: launch,
            target,
            trail: Trail::new(launch),
            easing,
            hue,
            brightness: rng.uniform(50.0, 70.0),
            pulse: PULSE_MIN,
            boom: false,
        }
    }

    pub fn advance(&mut self) {
        self.trail.push(self.pos);

        if self.pulse < PULSE_MAX {
            self.pulse += PULSE_STEP;
        } else {
            self.pulse = PULSE_MIN;
        }

        let traveled = self.launch.distance(self.pos);
        let total = self.launch.distance(self.target);

        if total - traveled < BOOM_DISTANCE {
            self.boom = true;
        } else {
            self.pos.x += (self.target.x - self.pos.x) * self.easing;
            self.pos.y += (self.target.y - self.pos.y) * self.easing;
        }
    }

    pub fn render(&self, surface: &mut impl Surface) {
        surface.save();
        surface.set_stroke_color(Color::hsl(self.hue, 100.0, self.brightness));
        let tail = self.trail.oldest();
        surface.line((tail.x, tail.y), (self.pos.x, self.pos.y));
        surface.restore();
    }

    /// Pulsing ring around the target point.
    pub fn render_target(&self, surface: &mut impl Surface) {
        surface.save();
        surface.set_stroke_color(Color::hsl(self.hue, 100.0, self.brightness));
        surface.stroke_arc(self.target.x, self.target.y, self.pulse);
        surface.restore();
    }
}
