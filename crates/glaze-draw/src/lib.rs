//! Draw-data types produced by a GUI layout pass and consumed by a renderer.
//!
//! Canonical CPU space:
//! - Logical display units (DPI-independent)
//! - Origin top-left
//! - +X right, +Y down
//!
//! The backend converts to framebuffer pixels using the per-frame
//! `framebuffer_scale` and to clip space via an orthographic projection.

mod clip;
mod data;
mod vec2;
mod vertex;

pub use clip::ClipRect;
pub use data::{DrawCmd, DrawData, DrawIdx, DrawList, TextureId};
pub use vec2::Vec2;
pub use vertex::Vertex;
