use std::io::{self, Write};

use crate::surface::{Blend, Color, Surface};

#[derive(Debug, Clone, Copy)]
struct State {
    offset: (f32, f32),
    blend: Blend,
    line_width: f32,
    stroke: Color,
    fill: Color,
}

impl Default for State {
    fn default() -> Self {
        Self {
            offset: (0.0, 0.0),
            blend: Blend::SourceOver,
            line_width: 1.0,
            stroke: Color::rgba(0, 0, 0, 1.0),
            fill: Color::rgba(0, 0, 0, 1.0),
        }
    }
}

/// A [`Surface`] backed by terminal half-blocks.
///
/// Each cell holds two vertically stacked pixels. Surface units are mapped
/// to pixels by dividing by `scale`, so the show can work in a coordinate
/// space several times larger than the terminal grid.
pub struct TermCanvas {
    width: usize,
    height: usize,
    scale: f32,
    bg_color: (u8, u8, u8),
    /// Light added over the background, per channel in `[0, 1]`.
    pixels: Vec<(f32, f32, f32)>,
    state: State,
    saved: Vec<State>,
    path: Vec<Vec<(f32, f32)>>,
    output_buf: Vec<u8>,
}

impl TermCanvas {
    pub fn new(cols: usize, rows: usize, scale: f32, bg_color: (u8, u8, u8)) -> Self {
        let width = cols;
        let height = rows * 2;
        Self {
            width,
            height,
            scale,
            bg_color,
            pixels: vec![(0.0, 0.0, 0.0); width * height],
            state: State::default(),
            saved: Vec::new(),
            path: Vec::new(),
            output_buf: Vec::with_capacity(width * height * 25),
        }
    }

    /// Surface units to pixel coordinates, including the current translation.
    fn to_pixel(&self, x: f32, y: f32) -> (f32, f32) {
        let (ox, oy) = self.state.offset;
        ((x + ox) / self.scale, (y + oy) / self.scale)
    }

    fn paint(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        let alpha = color.alpha();
        let (r, g, b) = color.to_rgb();
        let px = &mut self.pixels[idx];

        match self.state.blend {
            Blend::SourceOver => {
                px.0 = px.0 * (1.0 - alpha) + r * alpha;
                px.1 = px.1 * (1.0 - alpha) + g * alpha;
                px.2 = px.2 * (1.0 - alpha) + b * alpha;
            }
            Blend::Lighter => {
                px.0 = (px.0 + r * alpha).min(1.0);
                px.1 = (px.1 + g * alpha).min(1.0);
                px.2 = (px.2 + b * alpha).min(1.0);
            }
            Blend::DestinationOut => {
                px.0 *= 1.0 - alpha;
                px.1 *= 1.0 - alpha;
                px.2 *= 1.0 - alpha;
            }
        }
    }

    /// Square brush sized by the current line width.
    fn plot(&mut self, x: f32, y: f32, color: Color) {
        let size = (self.state.line_width / self.scale).round().max(1.0) as i32;
        let x0 = x.floor() as i32 - (size - 1) / 2;
        let y0 = y.floor() as i32 - (size - 1) / 2;
        for dy in 0..size {
            for dx in 0..size {
                self.paint(x0 + dx, y0 + dy, color);
            }
        }
    }

    fn segment(&mut self, from: (f32, f32), to: (f32, f32), color: Color) {
        let dx = to.0 - from.0;
        let dy = to.1 - from.1;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        let mut last = None;
        for i in 0..=steps {
            let x = from.0 + dx * i as f32 / steps as f32;
            let y = from.1 + dy * i as f32 / steps as f32;
            let cell = (x.floor() as i32, y.floor() as i32);
            // Additive blending would double-count a pixel visited twice
            if last != Some(cell) {
                self.plot(x, y, color);
                last = Some(cell);
            }
        }
    }

    /// Writes the frame as 24-bit colored half-blocks.
    pub fn present(&mut self, out: &mut impl Write) -> io::Result<()> {
        self.output_buf.clear();
        self.output_buf.extend_from_slice(b"\x1b[H");

        let mut prev_top_color: Option<(u8, u8, u8)> = None;
        let mut prev_bot_color: Option<(u8, u8, u8)> = None;

        for y in (0..self.height).step_by(2) {
            for x in 0..self.width {
                let top_idx = y * self.width + x;
                let bot_idx = if y + 1 < self.height {
                    (y + 1) * self.width + x
                } else {
                    top_idx
                };

                let top_color = self.shade(self.pixels[top_idx]);
                let bot_color = self.shade(self.pixels[bot_idx]);

                if prev_top_color != Some(top_color) {
                    write!(
                        self.output_buf,
                        "\x1b[48;2;{};{};{}m",
                        top_color.0, top_color.1, top_color.2
                    )?;
                    prev_top_color = Some(top_color);
                }
                if prev_bot_color != Some(bot_color) {
                    write!(
                        self.output_buf,
                        "\x1b[38;2;{};{};{}m",
                        bot_color.0, bot_color.1, bot_color.2
                    )?;
                    prev_bot_color = Some(bot_color);
                }

                self.output_buf.extend_from_slice("▄".as_bytes());
            }
            self.output_buf.extend_from_slice(b"\x1b[0m");
            // The reset clears both colors, so every row starts fresh
            prev_top_color = None;
            prev_bot_color = None;
            if y + 2 < self.height {
                self.output_buf.extend_from_slice(b"\r\n");
            }
        }

        out.write_all(&self.output_buf)?;
        out.flush()
    }

    /// Pixel light added on top of the background color.
    fn shade(&self, light: (f32, f32, f32)) -> (u8, u8, u8) {
        let add = |bg: u8, l: f32| (bg as f32 + l * 255.0).min(255.0) as u8;
        (
            add(self.bg_color.0, light.0),
            add(self.bg_color.1, light.1),
            add(self.bg_color.2, light.2),
        )
    }
}

impl Surface for TermCanvas {
    fn width(&self) -> f32 {
        self.width as f32 * self.scale
    }

    fn height(&self) -> f32 {
        self.height as f32 * self.scale
    }

    fn save(&mut self) {
        self.saved.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.state.offset.0 += dx;
        self.state.offset.1 += dy;
    }

    fn set_blend(&mut self, blend: Blend) {
        self.state.blend = blend;
    }

    fn set_line_width(&mut self, width: f32) {
        self.state.line_width = width;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke = color;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.to_pixel(x, y);
        self.path.push(vec![p]);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.to_pixel(x, y);
        match self.path.last_mut() {
            Some(sub) => sub.push(p),
            None => self.path.push(vec![p]),
        }
    }

    fn stroke(&mut self) {
        let color = self.state.stroke;
        let path = std::mem::take(&mut self.path);
        for sub in &path {
            match sub.as_slice() {
                [single] => self.plot(single.0, single.1, color),
                points => {
                    for pair in points.windows(2) {
                        self.segment(pair[0], pair[1], color);
                    }
                }
            }
        }
    }

    fn fill_arc(&mut self, x: f32, y: f32, radius: f32) {
        let color = self.state.fill;
        let (cx, cy) = self.to_pixel(x, y);
        let r = radius / self.scale;
        if r < 0.5 {
            self.paint(cx.floor() as i32, cy.floor() as i32, color);
            return;
        }

        let reach = r.ceil() as i32;
        let (px, py) = (cx.floor() as i32, cy.floor() as i32);
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let ox = (px + dx) as f32 + 0.5 - cx;
                let oy = (py + dy) as f32 + 0.5 - cy;
                if ox * ox + oy * oy <= r * r {
                    self.paint(px + dx, py + dy, color);
                }
            }
        }
    }

    fn stroke_arc(&mut self, x: f32, y: f32, radius: f32) {
        let color = self.state.stroke;
        let (cx, cy) = self.to_pixel(x, y);
        let r = radius / self.scale;
        let steps = ((std::f32::consts::TAU * r * 2.0).ceil() as usize).max(8);

        let mut last = None;
        for i in 0..steps {
            let a = i as f32 / steps as f32 * std::f32::consts::TAU;
            let cell = ((cx + r * a.cos()).floor() as i32, (cy + r * a.sin()).floor() as i32);
            if last != Some(cell) {
                self.paint(cell.0, cell.1, color);
                last = Some(cell);
            }
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let color = self.state.fill;
        let (x0, y0) = self.to_pixel(x, y);
        let (x1, y1) = self.to_pixel(x + width, y + height);
        let (x0, x1) = (x0.min(x1).floor() as i32, x0.max(x1).ceil() as i32);
        let (y0, y1) = (y0.min(y1).floor() as i32, y0.max(y1).ceil() as i32);

        for py in y0.max(0)..y1.min(self.height as i32) {
            for px in x0.max(0)..x1.min(self.width as i32) {
                self.paint(px, py, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(canvas: &TermCanvas, x: usize, y: usize) -> (f32, f32, f32) {
        canvas.pixels[y * canvas.width + x]
    }

    fn lit(canvas: &TermCanvas) -> usize {
        canvas
            .pixels
            .iter()
            .filter(|p| p.0 + p.1 + p.2 > 0.0)
            .count()
    }

    #[test]
    fn dimensions_are_scaled_half_blocks() {
        let canvas = TermCanvas::new(80, 24, 4.0, (0, 0, 0));
        assert_eq!(canvas.width(), 320.0);
        assert_eq!(canvas.height(), 192.0);
    }

    #[test]
    fn lighter_blend_accumulates() {
        let mut canvas = TermCanvas::new(10, 5, 1.0, (0, 0, 0));
        canvas.set_blend(Blend::Lighter);
        canvas.set_fill_color(Color::rgba(255, 0, 0, 0.25));
        canvas.fill_rect(0.0, 0.0, 1.0, 1.0);
        canvas.fill_rect(0.0, 0.0, 1.0, 1.0);
        let p = pixel(&canvas, 0, 0);
        assert!((p.0 - 0.5).abs() < 1e-4);
        assert_eq!(lit(&canvas), 1);
    }

    #[test]
    fn destination_out_fades_existing_light() {
        let mut canvas = TermCanvas::new(4, 2, 1.0, (0, 0, 0));
        canvas.set_blend(Blend::Lighter);
        canvas.set_fill_color(Color::rgba(255, 255, 255, 1.0));
        canvas.fill_rect(0.0, 0.0, 4.0, 4.0);

        canvas.set_blend(Blend::DestinationOut);
        canvas.set_fill_color(Color::rgba(0, 0, 0, 0.5));
        canvas.fill_rect(0.0, 0.0, 4.0, 4.0);
        assert!((pixel(&canvas, 3, 3).1 - 0.5).abs() < 1e-4);
    }

    #[test]
    fn stroke_covers_both_endpoints() {
        let mut canvas = TermCanvas::new(20, 10, 2.0, (0, 0, 0));
        canvas.set_blend(Blend::Lighter);
        canvas.set_stroke_color(Color::hsl(0.0, 100.0, 50.0));
        canvas.line((2.0, 2.0), (30.0, 16.0));

        assert!(pixel(&canvas, 1, 1).0 > 0.0);
        assert!(pixel(&canvas, 15, 8).0 > 0.0);
        assert_eq!(lit(&canvas), 15);
    }

    #[test]
    fn drawing_off_canvas_is_ignored() {
        let mut canvas = TermCanvas::new(5, 5, 1.0, (0, 0, 0));
        canvas.set_stroke_color(Color::rgba(255, 255, 255, 1.0));
        canvas.line((-10.0, -10.0), (-1.0, -1.0));
        canvas.fill_arc(100.0, 100.0, 3.0);
        assert_eq!(lit(&canvas), 0);
    }

    #[test]
    fn restore_undoes_translate_and_colors() {
        let mut canvas = TermCanvas::new(10, 5, 1.0, (0, 0, 0));
        canvas.set_fill_color(Color::rgba(255, 255, 255, 1.0));
        canvas.save();
        canvas.translate(3.0, 2.0);
        canvas.set_fill_color(Color::rgba(0, 255, 0, 1.0));
        canvas.fill_arc(0.2, 0.2, 0.1);
        canvas.restore();
        canvas.fill_arc(0.2, 0.2, 0.1);

        assert_eq!(pixel(&canvas, 3, 2), (0.0, 1.0, 0.0));
        assert_eq!(pixel(&canvas, 0, 0), (1.0, 1.0, 1.0));
    }

    #[test]
    fn stroke_arc_draws_a_ring() {
        let mut canvas = TermCanvas::new(20, 10, 1.0, (0, 0, 0));
        canvas.set_stroke_color(Color::rgba(255, 255, 255, 1.0));
        canvas.stroke_arc(10.0, 10.0, 4.0);
        assert!(lit(&canvas) >= 8);
        assert_eq!(pixel(&canvas, 10, 10), (0.0, 0.0, 0.0));
    }

    #[test]
    fn present_writes_one_half_block_per_cell() {
        let mut canvas = TermCanvas::new(6, 3, 1.0, (10, 20, 30));
        canvas.set_fill_color(Color::rgba(255, 0, 0, 1.0));
        canvas.fill_rect(0.0, 0.0, 1.0, 1.0);

        let mut out = Vec::new();
        canvas.present(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("\x1b[H"));
        assert_eq!(text.matches('▄').count(), 18);
        assert_eq!(text.matches("\r\n").count(), 2);
        assert!(text.contains("\x1b[48;2;255;20;30m"));
        assert!(text.contains("\x1b[38;2;10;20;30m"));
    }

    #[test]
    fn white_first_cell_still_gets_color_escapes() {
        let mut canvas = TermCanvas::new(2, 2, 1.0, (255, 255, 255));
        let mut out = Vec::new();
        canvas.present(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        // Once per row, right after the cursor home and after each reset
        assert_eq!(text.matches("\x1b[48;2;255;255;255m").count(), 2);
        assert_eq!(text.matches("\x1b[38;2;255;255;255m").count(), 2);
        assert!(text.starts_with("\x1b[H\x1b[48;2;255;255;255m\x1b[38;2;255;255;255m▄"));
    }

    #[test]
    fn saturated_star_in_first_column_is_not_left_to_terminal_defaults() {
        let mut canvas = TermCanvas::new(3, 1, 1.0, (0, 0, 0));
        canvas.set_blend(Blend::Lighter);
        canvas.set_fill_color(Color::rgba(255, 255, 255, 1.0));
        canvas.fill_arc(0.5, 0.5, 0.2);

        let mut out = Vec::new();
        canvas.present(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\x1b[H\x1b[48;2;255;255;255m"));
    }
}
