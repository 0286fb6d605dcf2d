/// Solid model: cube corners, face topology and in-place transforms
use log::debug;
use nalgebra::{Point3, Vector3};

use crate::transform::Transform;

/// A planar quadrilateral, as four vertex indices in winding order
pub type Face = [usize; 4];

/// Corners of the unit cube, in the order the face table refers to them
pub const CUBE_VERTICES: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Back, front, bottom, top, left, right
pub const CUBE_FACES: [Face; 6] = [
    [3, 2, 1, 0],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [2, 3, 7, 6],
    [3, 0, 4, 7],
    [1, 2, 6, 5],
];

/// A solid whose vertices are transformed in place.
///
/// The base vertices are captured at construction and only ever read back by
/// [`Solid::reset`]. Faces never change after construction.
#[derive(Debug, Clone)]
pub struct Solid {
    vertices: Vec<Point3<f32>>,
    base_vertices: Vec<Point3<f32>>,
    faces: Vec<Face>,
}

impl Solid {
    /// The 2x2x2 cube centered on the origin
    pub fn cube() -> Self {
        let vertices: Vec<_> = CUBE_VERTICES
            .iter()
            .map(|&[x, y, z]| Point3::new(x, y, z))
            .collect();

        Self {
            base_vertices: vertices.clone(),
            vertices,
            faces: CUBE_FACES.to_vec(),
        }
    }

    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        let delta = Vector3::new(dx, dy, dz);
        for vertex in &mut self.vertices {
            *vertex += delta;
        }
    }

    /// Rotate every vertex about X, then Y, then Z (radians).
    ///
    /// Each step consumes the previous step's output, so the result depends on
    /// this order.
    pub fn rotate(&mut self, ax: f32, ay: f32, az: f32) {
        let transform = Transform::rotation(ax, ay, az);
        for vertex in &mut self.vertices {
            *vertex = transform.apply(*vertex);
        }
    }

    /// Scale about the origin. Zero and negative factors are applied as given.
    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) {
        let factors = Vector3::new(sx, sy, sz);
        for vertex in &mut self.vertices {
            vertex.coords.component_mul_assign(&factors);
        }
    }

    pub fn reset(&mut self) {
        debug!("Resetting solid to its base vertices");
        self.vertices.copy_from_slice(&self.base_vertices);
    }

    /// Coordinates of vertex 0, used as the position of the whole solid
    pub fn position(&self) -> Point3<f32> {
        self.vertices[0]
    }
}

impl Default for Solid {
    fn default() -> Self {
        Self::cube()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const EPSILON: f32 = 1e-5;

    fn assert_vertices_close(a: &[Point3<f32>], b: &[Point3<f32>]) {
        assert_eq!(a.len(), b.len());
        for (va, vb) in a.iter().zip(b) {
            assert!((va - vb).norm() < EPSILON, "{va:?} != {vb:?}");
        }
    }

    #[test]
    fn test_cube_topology() {
        let solid = Solid::cube();
        assert_eq!(solid.vertices().len(), 8);
        assert_eq!(solid.faces().len(), 6);
        assert!(solid
            .faces()
            .iter()
            .flatten()
            .all(|&index| index < solid.vertices().len()));
    }

    #[test]
    fn test_position_is_first_vertex() {
        let mut solid = Solid::cube();
        assert_eq!(solid.position(), Point3::new(-1.0, -1.0, -1.0));

        solid.translate(0.5, 0.0, 0.0);
        assert_eq!(solid.position(), Point3::new(-0.5, -1.0, -1.0));
    }

    #[test]
    fn test_reset_after_mixed_transforms() {
        let untouched = Solid::cube();
        let mut solid = untouched.clone();

        solid.translate(0.3, -1.2, 4.0);
        solid.rotate(0.4, -1.1, 2.7);
        solid.scale(1.2, 0.0, -3.0);
        solid.rotate(0.1, 0.1, 0.1);
        solid.reset();

        assert_eq!(solid.vertices(), untouched.vertices());
    }

    #[test]
    fn test_translate_inverse() {
        let mut solid = Solid::cube();
        solid.rotate(0.3, 0.2, 0.1);
        let before = solid.vertices().to_vec();

        solid.translate(0.7, -0.1, 2.5);
        solid.translate(-0.7, 0.1, -2.5);

        assert_vertices_close(solid.vertices(), &before);
    }

    #[test]
    fn test_unit_scale_is_noop() {
        let mut solid = Solid::cube();
        solid.rotate(0.5, 0.5, 0.5);
        let before = solid.vertices().to_vec();

        solid.scale(1.0, 1.0, 1.0);

        assert_eq!(solid.vertices(), &before[..]);
    }

    #[test]
    fn test_scale_about_origin() {
        let mut solid = Solid::cube();
        solid.translate(1.0, 0.0, 0.0);
        solid.scale(2.0, 2.0, 2.0);
        // Scaling is about the origin, so the offset grows too
        assert_eq!(solid.position(), Point3::new(0.0, -2.0, -2.0));

        solid.scale(-1.0, 0.0, 1.0);
        assert_eq!(solid.position(), Point3::new(0.0, 0.0, -2.0));
    }

    #[test]
    fn test_full_turn_is_periodic() {
        let untouched = Solid::cube();
        for angles in [(2.0 * PI, 0.0, 0.0), (0.0, 2.0 * PI, 0.0), (0.0, 0.0, 2.0 * PI)] {
            let mut solid = untouched.clone();
            solid.rotate(angles.0, angles.1, angles.2);
            assert_vertices_close(solid.vertices(), untouched.vertices());
        }
    }

    #[test]
    fn test_rotations_accumulate() {
        let mut stepped = Solid::cube();
        for _ in 0..10 {
            stepped.rotate(0.1, 0.0, 0.0);
        }

        let mut direct = Solid::cube();
        direct.rotate(1.0, 0.0, 0.0);

        assert_vertices_close(stepped.vertices(), direct.vertices());
    }
}
