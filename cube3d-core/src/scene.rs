/// The solid, its rasterizer and the rotation readout, owned together
use log::debug;
use nalgebra::Point3;

use crate::color::Color;
use crate::command::Command;
use crate::geometry::Solid;
use crate::projection::Camera;
use crate::raster::Rasterizer;
use crate::surface::Surface;
use crate::transform::RotationReadout;

/// Everything a front-end needs to drive and draw the cube.
///
/// Mutations and renders go through `&mut self` / `&self`, so whoever owns
/// the scene serializes them.
#[derive(Debug, Clone)]
pub struct Scene {
    solid: Solid,
    rasterizer: Rasterizer,
    rotation: RotationReadout,
    background: Color,
}

impl Scene {
    pub fn new(camera: Camera) -> Self {
        Self {
            solid: Solid::cube(),
            rasterizer: Rasterizer::new(camera),
            rotation: RotationReadout::default(),
            background: Color::WHITE,
        }
    }

    pub fn solid(&self) -> &Solid {
        &self.solid
    }

    pub fn rasterizer(&self) -> &Rasterizer {
        &self.rasterizer
    }

    pub fn camera(&self) -> &Camera {
        &self.rasterizer.camera
    }

    /// Total rotation applied since construction, for display
    pub fn rotation(&self) -> RotationReadout {
        self.rotation
    }

    pub fn position(&self) -> Point3<f32> {
        self.solid.position()
    }

    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.solid.translate(dx, dy, dz);
    }

    pub fn rotate(&mut self, ax: f32, ay: f32, az: f32) {
        self.rotation.accumulate(ax, ay, az);
        self.solid.rotate(ax, ay, az);
    }

    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) {
        self.solid.scale(sx, sy, sz);
    }

    /// Restore the vertices. The rotation readout keeps its running total.
    pub fn reset(&mut self) {
        self.solid.reset();
    }

    pub fn apply(&mut self, command: Command) {
        debug!("Applying {command:?}");
        match command {
            Command::Translate(v) => self.translate(v.x, v.y, v.z),
            Command::Rotate(v) => self.rotate(v.x, v.y, v.z),
            Command::Scale(v) => self.scale(v.x, v.y, v.z),
            Command::Reset => self.reset(),
        }
    }

    pub fn apply_all<I>(&mut self, commands: I)
    where
        I: IntoIterator<Item = Command>,
    {
        for command in commands {
            self.apply(command);
        }
    }

    /// Clear `surface` to the background and draw the current frame
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear(self.background);
        self.rasterizer.render(&self.solid, surface);
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Camera::default())
    }
}
