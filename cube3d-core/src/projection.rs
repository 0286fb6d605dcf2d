/// Fixed camera: back-face test and perspective projection
use nalgebra::{Point2, Point3};

/// Camera configuration for the fixed perspective view.
///
/// The eye sits on the z axis at `-distance`, looking toward the origin. It
/// cannot move; [`Camera::is_facing`] relies on that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Offset added to every z before the perspective divide
    pub distance: f32,
    /// Vertices with `z + distance` at or below this are dropped
    pub near: f32,
    /// Pixels per unit at depth 1
    pub scale: f32,
    /// Screen position of the optical axis
    pub center: Point2<f32>,
    pub width: u32,
    pub height: u32,
}

impl Camera {
    /// Default camera with the projection centered in a `width` x `height`
    /// viewport
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            distance: 5.0,
            near: 0.1,
            scale: 200.0,
            center: Point2::new(width as f32 / 2.0, height as f32 / 2.0),
            width,
            height,
        }
    }

    /// Whether the face through `p1`, `p2`, `p3` (in winding order) faces
    /// the eye. Only valid for convex, consistently wound faces.
    pub fn is_facing(&self, p1: &Point3<f32>, p2: &Point3<f32>, p3: &Point3<f32>) -> bool {
        let normal = (p2 - p1).cross(&(p3 - p1));
        let view_direction =
            p1.x * normal.x + p1.y * normal.y + (p1.z + self.distance) * normal.z;

        view_direction < 0.0
    }

    /// Project a 3D point to screen space, or `None` if it lies at or behind
    /// the near plane
    pub fn project(&self, point: &Point3<f32>) -> Option<Point2<f32>> {
        let depth = point.z + self.distance;
        if depth <= self.near {
            return None;
        }

        Some(Point2::new(
            (point.x / depth) * self.scale + self.center.x,
            (point.y / depth) * self.scale + self.center.y,
        ))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}
