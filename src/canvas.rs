//! Terminal framebuffer that the simulation draws on.
//!
//! Each terminal cell holds two vertically stacked pixels, drawn as an upper
//! half block with the top pixel as foreground and the bottom one as
//! background. World coordinates are `world_scale` times pixel coordinates, so
//! the simulation keeps its usual proportions on a coarse grid.

use glam::Vec2;
use ratatui::{buffer::Buffer, layout::Rect, style, widgets::Widget};

use crate::color::Color;
use crate::surface::RenderSurface;

type Rgb = [f32; 3];

pub struct PixelCanvas {
    columns: u16,
    rows: u16,
    scale: f32,
    /// Row-major, `columns` wide and `rows * 2` tall. Channels are kept as floats
    /// so repeated low-alpha washes fade all the way to black.
    pixels: Vec<Rgb>,
    global_alpha: f32,
}

impl PixelCanvas {
    pub fn new(columns: u16, rows: u16, scale: f32) -> Self {
        let len = usize::from(columns) * usize::from(rows) * 2;
        Self {
            columns,
            rows,
            scale,
            pixels: vec![[0.0; 3]; len],
            global_alpha: 1.0,
        }
    }

    fn pixel_width(&self) -> usize {
        usize::from(self.columns)
    }

    fn pixel_height(&self) -> usize {
        usize::from(self.rows) * 2
    }

    /// World position at the middle of a terminal cell (e.g. a mouse click)
    pub fn world_from_cell(&self, column: u16, row: u16) -> Vec2 {
        Vec2::new(
            (f32::from(column) + 0.5) * self.scale,
            (f32::from(row) * 2.0 + 1.0) * self.scale,
        )
    }

    /// Color of the pixel at `(x, y)`, rounded to 8 bits per channel
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.pixel_width() {
            return None;
        }
        self.pixels
            .get(y * self.pixel_width() + x)
            .map(|p| to_color(*p))
    }

    fn blend(&mut self, x: usize, y: usize, color: Color, alpha: f32) {
        let width = self.pixel_width();
        if let Some(pixel) = self.pixels.get_mut(y * width + x) {
            let src = [f32::from(color.r), f32::from(color.g), f32::from(color.b)];
            for (dst, src) in pixel.iter_mut().zip(src) {
                *dst += (src - *dst) * alpha;
            }
        }
    }

    /// Clamp a world-space span to pixel indices on one axis
    fn pixel_span(&self, from: f32, to: f32, limit: usize) -> std::ops::Range<usize> {
        let start = (from / self.scale).floor().max(0.0) as usize;
        let end = ((to / self.scale).ceil().max(0.0) as usize).min(limit);
        start..end
    }
}

fn to_color(pixel: Rgb) -> Color {
    let channel = |v: f32| v.round().clamp(0.0, 255.0) as u8;
    Color::rgb(channel(pixel[0]), channel(pixel[1]), channel(pixel[2]))
}

impl RenderSurface for PixelCanvas {
    fn width(&self) -> f32 {
        self.pixel_width() as f32 * self.scale
    }

    fn height(&self) -> f32 {
        self.pixel_height() as f32 * self.scale
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let alpha = self.global_alpha;
        if radius <= 0.0 || alpha <= 0.0 {
            return;
        }

        // Specks smaller than a pixel still light up the pixel they sit in
        if radius < self.scale / 2.0 {
            if center.x >= 0.0 && center.y >= 0.0 {
                let x = (center.x / self.scale) as usize;
                let y = (center.y / self.scale) as usize;
                if x < self.pixel_width() && y < self.pixel_height() {
                    self.blend(x, y, color, alpha);
                }
            }
            return;
        }

        let xs = self.pixel_span(center.x - radius, center.x + radius, self.pixel_width());
        let ys = self.pixel_span(center.y - radius, center.y + radius, self.pixel_height());
        let radius_sq = radius * radius;
        for y in ys {
            for x in xs.clone() {
                let pixel_center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) * self.scale;
                if pixel_center.distance_squared(center) <= radius_sq {
                    self.blend(x, y, color, alpha);
                }
            }
        }
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color, alpha: f32) {
        let alpha = (alpha * self.global_alpha).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let xs = self.pixel_span(origin.x, origin.x + size.x, self.pixel_width());
        let ys = self.pixel_span(origin.y, origin.y + size.y, self.pixel_height());
        for y in ys {
            for x in xs.clone() {
                self.blend(x, y, color, alpha);
            }
        }
    }

    fn global_alpha(&self) -> f32 {
        self.global_alpha
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.global_alpha = alpha.clamp(0.0, 1.0);
    }
}

impl Widget for &PixelCanvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let columns = area.width.min(self.columns);
        let rows = area.height.min(self.rows);
        for row in 0..rows {
            for column in 0..columns {
                let x = usize::from(column);
                let y = usize::from(row) * 2;
                let (Some(top), Some(bottom)) = (self.pixel(x, y), self.pixel(x, y + 1)) else {
                    continue;
                };
                if let Some(cell) = buf.cell_mut((area.x + column, area.y + row)) {
                    cell.set_char('▀')
                        .set_fg(style::Color::Rgb(top.r, top.g, top.b))
                        .set_bg(style::Color::Rgb(bottom.r, bottom.g, bottom.b));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_size_follows_scale() {
        let canvas = PixelCanvas::new(100, 30, 4.0);
        assert_eq!(canvas.width(), 400.0);
        assert_eq!(canvas.height(), 240.0);
        assert_eq!(canvas.center(), Vec2::new(200.0, 120.0));
    }

    #[test]
    fn test_world_from_cell_hits_cell_middle() {
        let canvas = PixelCanvas::new(100, 30, 4.0);
        assert_eq!(canvas.world_from_cell(0, 0), Vec2::new(2.0, 4.0));
        assert_eq!(canvas.world_from_cell(10, 5), Vec2::new(42.0, 44.0));
    }

    #[test]
    fn test_fill_circle_covers_disc() {
        let mut canvas = PixelCanvas::new(20, 10, 1.0);
        canvas.fill_circle(Vec2::new(10.0, 10.0), 3.0, Color::WHITE);
        assert_eq!(canvas.pixel(10, 10), Some(Color::WHITE));
        assert_eq!(canvas.pixel(8, 9), Some(Color::WHITE));
        assert_eq!(canvas.pixel(14, 10), Some(Color::BLACK));
        assert_eq!(canvas.pixel(0, 0), Some(Color::BLACK));
    }

    #[test]
    fn test_tiny_circle_lights_one_pixel() {
        let mut canvas = PixelCanvas::new(20, 10, 4.0);
        canvas.fill_circle(Vec2::new(9.0, 13.0), 0.5, Color::WHITE);
        assert_eq!(canvas.pixel(2, 3), Some(Color::WHITE));
        assert_eq!(canvas.pixel(2, 2), Some(Color::BLACK));
    }

    #[test]
    fn test_circle_off_canvas_is_clipped() {
        let mut canvas = PixelCanvas::new(20, 10, 1.0);
        canvas.fill_circle(Vec2::new(-30.0, -30.0), 5.0, Color::WHITE);
        canvas.fill_circle(Vec2::new(500.0, 5.0), 5.0, Color::WHITE);
        assert!((0..20).all(|x| (0..20).all(|y| canvas.pixel(x, y) == Some(Color::BLACK))));
    }

    #[test]
    fn test_global_alpha_blends_circle() {
        let mut canvas = PixelCanvas::new(20, 10, 1.0);
        canvas.set_global_alpha(0.5);
        canvas.fill_circle(Vec2::new(10.0, 10.0), 2.0, Color::rgb(200, 100, 0));
        assert_eq!(canvas.pixel(10, 10), Some(Color::rgb(100, 50, 0)));
    }

    #[test]
    fn test_repeated_wash_fades_to_black() {
        let mut canvas = PixelCanvas::new(4, 2, 1.0);
        canvas.fill_rect(Vec2::ZERO, Vec2::new(4.0, 4.0), Color::WHITE, 1.0);
        let size = Vec2::new(canvas.width(), canvas.height());
        for _ in 0..80 {
            canvas.fill_rect(Vec2::ZERO, size, Color::BLACK, 0.1);
        }
        assert_eq!(canvas.pixel(1, 1), Some(Color::BLACK));
    }

    #[test]
    fn test_renders_half_blocks() {
        let mut canvas = PixelCanvas::new(2, 1, 1.0);
        canvas.fill_rect(Vec2::ZERO, Vec2::new(2.0, 1.0), Color::WHITE, 1.0);

        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        (&canvas).render(area, &mut buf);

        let cell = &buf[(0, 0)];
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, style::Color::Rgb(255, 255, 255));
        assert_eq!(cell.bg, style::Color::Rgb(0, 0, 0));
    }
}
