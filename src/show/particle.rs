use super::trail::{Point, Trail};
use crate::random::Random;
use crate::surface::{Color, Surface};

const FRICTION: f32 = 0.95;
const GRAVITY: f32 = 1.0;

/// A fragment of an explosion, fading out as it falls.
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Point,
    pub trail: Trail,
    pub angle: f32,
    pub speed: f32,
    pub hue: f32,
    pub brightness: f32,
    pub opacity: f32,
    pub decay: f32,
    pub destroyed: bool,
}

impl Particle {
    /// Hue is jittered around the burst's `hue` by up to 20 degrees.
    pub fn new(pos: Point, hue: f32, rng: &mut Random) -> Self {
        Self {
            pos,
            trail: Trail::new(pos),
            angle: rng.uniform(0.0, std::f32::consts::TAU),
            speed: rng.uniform(1.0, 10.0),
            hue: rng.uniform(hue - 20.0, hue + 20.0),
            brightness: rng.uniform(50.0, 80.0),
            opacity: 1.0,
            decay: rng.uniform(0.015, 0.03),
            destroyed: false,
        }
    }

    pub fn advance(&mut self) {
        self.trail.push(self.pos);
        self.speed *= FRICTION;
        self.pos.x += self.speed * self.angle.cos();
        self.pos.y += self.speed * self.angle.sin() + GRAVITY;
        self.opacity -= self.decay;
        if self.opacity <= self.decay {
            self.destroyed = true;
        }
    }

    pub fn render(&self, surface: &mut impl Surface) {
        surface.set_stroke_color(Color::hsla(
            self.hue,
            100.0,
            self.brightness,
            self.opacity,
        ));
        let tail = self.trail.oldest();
        surface.line((tail.x, tail.y), (self.pos.x, self.pos.y));
    }
}
