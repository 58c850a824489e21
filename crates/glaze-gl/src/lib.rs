//! OpenGL rendering backend for glaze draw data.
//!
//! This crate owns the GPU-side resources (shader program, shared
//! vertex/index buffers, font atlas texture) and translates a frame's
//! [`glaze_draw::DrawData`] into scissored, textured, alpha-blended draws.
//!
//! All GL work is synchronous and single-threaded: every call assumes the
//! embedder's GL context is current on the calling thread, and nothing here
//! may run concurrently or re-entrantly.

pub mod host;
pub mod logging;
pub mod render;

pub use glaze_draw as draw;
