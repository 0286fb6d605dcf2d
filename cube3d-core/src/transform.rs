/// Per-axis rotations and the caller-side rotation readout
use nalgebra::Point3;

/// Running totals of the angles passed to rotate, in radians.
///
/// The solid is rotated in place and never reads these back; they only feed
/// the status line. Resetting the solid does not clear them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationReadout {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationReadout {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Add one rotate call's angles to the totals
    pub fn accumulate(&mut self, ax: f32, ay: f32, az: f32) {
        self.x += ax;
        self.y += ay;
        self.z += az;
    }
}

/// Sine and cosine of one rotation angle, computed once per transform call
#[derive(Debug, Clone, Copy)]
pub struct AxisRotation {
    sin: f32,
    cos: f32,
}

impl AxisRotation {
    pub fn new(angle: f32) -> Self {
        Self {
            sin: angle.sin(),
            cos: angle.cos(),
        }
    }

    pub fn about_x(&self, p: Point3<f32>) -> Point3<f32> {
        Point3::new(
            p.x,
            p.y * self.cos - p.z * self.sin,
            p.y * self.sin + p.z * self.cos,
        )
    }

    pub fn about_y(&self, p: Point3<f32>) -> Point3<f32> {
        Point3::new(
            p.x * self.cos + p.z * self.sin,
            p.y,
            -p.x * self.sin + p.z * self.cos,
        )
    }

    pub fn about_z(&self, p: Point3<f32>) -> Point3<f32> {
        Point3::new(
            p.x * self.cos - p.y * self.sin,
            p.x * self.sin + p.y * self.cos,
            p.z,
        )
    }
}

/// Rotation applied as three sequential steps: X, then Y on the X output,
/// then Z on the Y output.
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    x: AxisRotation,
    y: AxisRotation,
    z: AxisRotation,
}

impl Transform {
    pub fn rotation(ax: f32, ay: f32, az: f32) -> Self {
        Self {
            x: AxisRotation::new(ax),
            y: AxisRotation::new(ay),
            z: AxisRotation::new(az),
        }
    }

    pub fn apply(&self, p: Point3<f32>) -> Point3<f32> {
        let p = self.x.about_x(p);
        let p = self.y.about_y(p);
        self.z.about_z(p)
    }
}
