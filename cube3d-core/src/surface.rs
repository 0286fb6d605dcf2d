/// Drawing targets for the rasterizer
use nalgebra::Point2;

use crate::color::Color;

/// The primitives the rasterizer needs from a 2D drawing target.
///
/// Coordinates are in pixels with the origin at the top-left corner.
/// Implementations clip anything outside their bounds.
pub trait Surface {
    /// Width and height in pixels
    fn size(&self) -> (u32, u32);

    fn clear(&mut self, color: Color);

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color);

    fn draw_line(&mut self, from: Point2<f32>, to: Point2<f32>, color: Color);
}

/// An in-memory RGBA pixel buffer
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::WHITE; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// The color at `(x, y)`, or `None` outside the buffer
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index_of(x, y).map(|index| self.pixels[index])
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(index) = self.index_of(x, y) {
            self.pixels[index] = color;
        }
    }

    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }

        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }

        Some(y * self.width + x)
    }
}

impl Surface for Framebuffer {
    fn size(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }

    fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        if width <= 0 || height <= 0 {
            return;
        }

        // Clip to the buffer
        let x_start = x.max(0) as usize;
        let y_start = y.max(0) as usize;
        let x_end = (x.saturating_add(width).max(0) as usize).min(self.width);
        let y_end = (y.saturating_add(height).max(0) as usize).min(self.height);

        for row in y_start..y_end {
            if x_start >= x_end {
                break;
            }
            let line_start = row * self.width;
            self.pixels[line_start + x_start..line_start + x_end].fill(color);
        }
    }

    /// Bresenham line between the rounded endpoints, both ends inclusive.
    ///
    /// The segment is clipped to the buffer first, so the integer walk never
    /// leaves it.
    fn draw_line(&mut self, from: Point2<f32>, to: Point2<f32>, color: Color) {
        if !(from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()) {
            return;
        }
        if self.width == 0 || self.height == 0 {
            return;
        }

        let from = (f64::from(from.x), f64::from(from.y));
        let to = (f64::from(to.x), f64::from(to.y));
        let max = (self.width as f64 - 0.5, self.height as f64 - 0.5);
        let Some((from, to)) = clip_segment(from, to, (-0.5, -0.5), max) else {
            return;
        };

        // Clipping far-away endpoints loses precision, keep the rounded ends inside
        let last_x = self.width as i64 - 1;
        let last_y = self.height as i64 - 1;
        let (mut x0, mut y0) = (
            (from.0.round() as i64).clamp(0, last_x),
            (from.1.round() as i64).clamp(0, last_y),
        );
        let (x1, y1) = (
            (to.0.round() as i64).clamp(0, last_x),
            (to.1.round() as i64).clamp(0, last_y),
        );

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let step_x = if x0 < x1 { 1 } else { -1 };
        let step_y = if y0 < y1 { 1 } else { -1 };
        let mut error = dx + dy;

        loop {
            self.set_pixel(x0 as i32, y0 as i32, color);

            if x0 == x1 && y0 == y1 {
                break;
            }

            let doubled = 2 * error;
            if doubled >= dy {
                error += dy;
                x0 += step_x;
            }
            if doubled <= dx {
                error += dx;
                y0 += step_y;
            }
        }
    }
}

/// Liang-Barsky clip of the segment `from -> to` against the box `min..=max`.
///
/// A clipped endpoint is placed exactly on the box edge that clipped it, so
/// segments with far-away endpoints still end on the boundary.
fn clip_segment(
    from: (f64, f64),
    to: (f64, f64),
    min: (f64, f64),
    max: (f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let mut t_enter = 0.0_f64;
    let mut t_exit = 1.0_f64;
    let mut enter_edge = None;
    let mut exit_edge = None;

    let edges = [
        (-dx, from.0 - min.0),
        (dx, max.0 - from.0),
        (-dy, from.1 - min.1),
        (dy, max.1 - from.1),
    ];
    for (edge, (p, q)) in edges.into_iter().enumerate() {
        if p == 0.0 {
            // Parallel to this edge
            if q < 0.0 {
                return None;
            }
            continue;
        }

        let t = q / p;
        if p < 0.0 {
            if t > t_exit {
                return None;
            }
            if t > t_enter {
                t_enter = t;
                enter_edge = Some(edge);
            }
        } else {
            if t < t_enter {
                return None;
            }
            if t < t_exit {
                t_exit = t;
                exit_edge = Some(edge);
            }
        }
    }

    let clipped = |t: f64, edge: Option<usize>, endpoint: (f64, f64)| {
        let Some(edge) = edge else {
            return endpoint;
        };
        let (x, y) = (from.0 + t * dx, from.1 + t * dy);
        match edge {
            0 => (min.0, y),
            1 => (max.0, y),
            2 => (x, min.1),
            _ => (x, max.1),
        }
    };

    Some((
        clipped(t_enter, enter_edge, from),
        clipped(t_exit, exit_edge, to),
    ))
}
