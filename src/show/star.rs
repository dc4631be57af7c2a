use super::trail::Point;
use crate::random::Random;
use crate::surface::{Color, Surface};

/// A background point that twinkles forever.
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Point,
    pub opacity: f32,
    pub decay: f32,
    rising: bool,
}

impl Star {
    pub fn new(pos: Point, rng: &mut Random) -> Self {
        Self {
            pos,
            opacity: 1.0,
            decay: rng.uniform(0.015, 0.03),
            rising: false,
        }
    }

    /// Steps opacity by `decay`, turning around at `decay` and at 1. Between
    /// those thresholds the star keeps moving in its current direction.
    pub fn advance(&mut self) {
        if self.opacity <= self.decay {
            self.rising = true;
        } else if self.opacity >= 1.0 {
            self.rising = false;
        }

        let step = if self.rising { self.decay } else { -self.decay };
        self.opacity = (self.opacity + step).clamp(self.decay, 1.0);
    }

    pub fn render(&self, surface: &mut impl Surface, rng: &mut Random) {
        surface.save();
        surface.set_fill_color(Color::rgba(255, 255, 255, self.opacity));
        surface.fill_arc(self.pos.x, self.pos.y, rng.uniform(0.5, 1.0));
        surface.restore();
    }
}
