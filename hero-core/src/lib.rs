/// Fellowship Hero Core - surface-independent page model
///
/// This library holds everything the landing page does regardless of where it
/// is drawn: the procedural tower mesh, the drag-to-orbit controller, camera,
/// lighting and ASCII rasterisation, and the timers behind the text effects.

pub mod content;
pub mod cycle;
pub mod error;
pub mod geometry;
pub mod glyph;
pub mod lighting;
pub mod page;
pub mod projection;
pub mod raster;
pub mod rotation;
pub mod timer;
pub mod tower;
pub mod transform;
pub mod typing;

// Re-export commonly used types
pub use error::{GeometryError, HeroError};
pub use geometry::{Mesh, Primitive, Triangle, Vertex};
pub use glyph::MotionPreference;
pub use lighting::{Light, HERO_LIGHTS};
pub use page::{DetailsSection, HeroPage, LinkOpener, PageRoot};
pub use projection::Camera;
pub use raster::AsciiRaster;
pub use rotation::{RotatingTower, RotationMode};
pub use timer::{Animation, Timer};
pub use transform::{Orientation, Transform};
