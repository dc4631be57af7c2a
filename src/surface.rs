/// How new paint combines with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Blend {
    /// Paint covers the destination in proportion to its alpha.
    #[default]
    SourceOver,
    /// Paint is added to the destination, so overlapping strokes brighten.
    Lighter,
    /// Paint erases the destination in proportion to its alpha.
    DestinationOut,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// Hue in degrees, saturation and lightness in percent.
    Hsla {
        hue: f32,
        saturation: f32,
        lightness: f32,
        alpha: f32,
    },
    Rgba { r: u8, g: u8, b: u8, alpha: f32 },
}

impl Color {
    pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self::hsla(hue, saturation, lightness, 1.0)
    }

    /// Alpha is clamped to `[0, 1]`; decaying entities may pass a value that
    /// dipped just below zero on their last frame.
    pub fn hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        Color::Hsla {
            hue,
            saturation,
            lightness,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    pub fn rgba(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Color::Rgba {
            r,
            g,
            b,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    pub fn alpha(&self) -> f32 {
        match *self {
            Color::Hsla { alpha, .. } | Color::Rgba { alpha, .. } => alpha,
        }
    }

    /// Channels in `[0, 1]`, alpha not applied.
    pub fn to_rgb(&self) -> (f32, f32, f32) {
        match *self {
            Color::Rgba { r, g, b, .. } => {
                (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
            }
            Color::Hsla {
                hue,
                saturation,
                lightness,
                ..
            } => {
                let h = hue.rem_euclid(360.0) / 60.0;
                let s = (saturation / 100.0).clamp(0.0, 1.0);
                let l = (lightness / 100.0).clamp(0.0, 1.0);

                let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
                let x = c * (1.0 - (h % 2.0 - 1.0).abs());
                let m = l - c / 2.0;

                let (r, g, b) = match h as u32 {
                    0 => (c, x, 0.0),
                    1 => (x, c, 0.0),
                    2 => (0.0, c, x),
                    3 => (0.0, x, c),
                    4 => (x, 0.0, c),
                    _ => (c, 0.0, x),
                };
                (r + m, g + m, b + m)
            }
        }
    }
}

/// A 2D immediate-mode drawing sink.
///
/// Coordinates are in surface units. The show issues calls against this
/// trait and never owns pixels itself.
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);

    fn set_blend(&mut self, blend: Blend);
    fn set_line_width(&mut self, width: f32);
    fn set_stroke_color(&mut self, color: Color);
    fn set_fill_color(&mut self, color: Color);

    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    /// Strokes the current path and starts a new one.
    fn stroke(&mut self);

    fn fill_arc(&mut self, x: f32, y: f32, radius: f32);
    fn stroke_arc(&mut self, x: f32, y: f32, radius: f32);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Single stroked segment in the current stroke color.
    fn line(&mut self, from: (f32, f32), to: (f32, f32)) {
        self.move_to(from.0, from.1);
        self.line_to(to.0, to.1);
        self.stroke();
    }
}
