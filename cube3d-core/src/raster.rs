/// Software rasterizer for quadrilateral faces
use log::trace;
use nalgebra::{Point2, Point3};

use crate::color::{Color, FACE_COLORS};
use crate::geometry::{Face, Solid};
use crate::projection::Camera;
use crate::surface::Surface;

/// A horizontal run of pixels, one pixel tall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub x: i32,
    pub y: i32,
    pub width: i32,
}

/// Draws the faces of a [`Solid`] onto a [`Surface`].
///
/// Faces are drawn in table order with no depth test, so a later face paints
/// over an earlier one wherever they overlap on screen. Nothing is cached
/// between calls.
#[derive(Debug, Clone)]
pub struct Rasterizer {
    pub camera: Camera,
    pub face_colors: [Color; 6],
    pub outline: Color,
}

impl Rasterizer {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            face_colors: FACE_COLORS,
            outline: Color::BLACK,
        }
    }

    pub fn render<S: Surface + ?Sized>(&self, solid: &Solid, surface: &mut S) {
        for (index, face) in solid.faces().iter().enumerate() {
            let color = self.face_colors[index % self.face_colors.len()];
            self.render_face(solid.vertices(), face, color, surface);
        }
    }

    fn render_face<S: Surface + ?Sized>(
        &self,
        vertices: &[Point3<f32>],
        face: &Face,
        color: Color,
        surface: &mut S,
    ) {
        if !self.is_visible(vertices, face) {
            trace!("Culling back face {face:?}");
            return;
        }

        let projected = self.project_face(vertices, face);
        let Ok(quad) = <[Point2<f32>; 4]>::try_from(projected) else {
            trace!("Face {face:?} crosses the near plane, skipping");
            return;
        };

        for span in self.spans(&quad, surface.size()) {
            surface.fill_rect(span.x, span.y, span.width, 1, color);
        }

        for i in 0..quad.len() {
            surface.draw_line(quad[i], quad[(i + 1) % quad.len()], self.outline);
        }
    }

    /// Back-face test on the first three vertices of `face`
    pub fn is_visible(&self, vertices: &[Point3<f32>], face: &Face) -> bool {
        self.camera
            .is_facing(&vertices[face[0]], &vertices[face[1]], &vertices[face[2]])
    }

    /// Indices of the faces of `solid` that pass the back-face test
    pub fn visible_faces(&self, solid: &Solid) -> Vec<usize> {
        solid
            .faces()
            .iter()
            .enumerate()
            .filter(|(_, face)| self.is_visible(solid.vertices(), face))
            .map(|(index, _)| index)
            .collect()
    }

    /// Screen positions of the face's vertices in face order. Vertices at or
    /// behind the near plane are left out, so fewer than four may come back.
    pub fn project_face(&self, vertices: &[Point3<f32>], face: &Face) -> Vec<Point2<f32>> {
        face.iter()
            .filter_map(|&index| self.camera.project(&vertices[index]))
            .collect()
    }

    /// Scanline fill of the closed loop `quad[0] -> .. -> quad[3] -> quad[0]`.
    ///
    /// Spans are cut to a surface of `bounds` (width, height) pixels; the
    /// pixels inside it are the same as for the uncut spans. Assumes the quad
    /// does not self-intersect.
    pub fn spans(&self, quad: &[Point2<f32>; 4], bounds: (u32, u32)) -> Vec<Span> {
        let (columns, rows) = bounds;
        if columns == 0 || rows == 0 {
            return Vec::new();
        }

        let min_y = quad.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_y = quad.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);

        let first_row = (min_y as i32).max(0);
        let last_row = (max_y as i32).min((rows - 1).min(i32::MAX as u32) as i32);
        let right = f64::from(columns.min(i32::MAX as u32));

        let mut spans = Vec::new();
        let mut intersections = Vec::with_capacity(quad.len());

        for y in first_row..=last_row {
            let scan_y = y as f32;
            intersections.clear();

            for i in 0..quad.len() {
                let start = quad[i];
                let end = quad[(i + 1) % quad.len()];

                // Half-open so a vertex shared by two edges is counted once
                if (scan_y >= start.y && scan_y < end.y) || (scan_y >= end.y && scan_y < start.y) {
                    let x = start.x + (scan_y - start.y) * (end.x - start.x) / (end.y - start.y);
                    intersections.push(x);
                }
            }

            intersections.sort_by(f32::total_cmp);

            for pair in intersections.chunks_exact(2) {
                let width = pair[1] - pair[0];
                if width > 0.0 {
                    // Truncate first, then cut to the surface
                    let start = f64::from(pair[0]).trunc();
                    let end = start + f64::from(width).trunc();
                    let (start, end) = (start.clamp(0.0, right), end.clamp(0.0, right));
                    if end > start {
                        spans.push(Span {
                            x: start as i32,
                            y,
                            width: (end - start) as i32,
                        });
                    }
                }
            }
        }

        spans
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new(Camera::default())
    }
}
