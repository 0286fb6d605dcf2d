/// cube3d core library - geometry, projection and software rasterization
///
/// This library holds the stateless parts of the renderer: the cube model and
/// its transforms, the fixed camera, the scanline rasterizer and the command
/// script format. Front-ends own a [`Scene`] and hand it a [`Surface`].
pub mod color;
pub mod command;
pub mod geometry;
pub mod projection;
pub mod raster;
pub mod scene;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use color::Color;
pub use command::{parse_script, Action, Command};
pub use geometry::{Face, Solid};
pub use projection::Camera;
pub use raster::{Rasterizer, Span};
pub use scene::Scene;
pub use surface::{Framebuffer, Surface};
pub use transform::{RotationReadout, Transform};
