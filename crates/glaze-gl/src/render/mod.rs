//! GPU rendering subsystem.
//!
//! Translates a frame's draw data into GL state changes and indexed draws.
//!
//! Split in two layers:
//! - `pass` — pure per-frame translation math (framebuffer metrics,
//!   orthographic projection, clip-rect → scissor conversion, frame plan).
//!   No GL calls; this is where the correctness-critical arithmetic lives
//!   and is unit-tested.
//! - `shader` / `atlas` / `frame` — the GL side: program compilation, font
//!   atlas upload, and the frame executor that walks a plan and issues
//!   `glow` calls.

mod atlas;
mod frame;
mod pass;
mod shader;

pub use atlas::{upload_font_atlas, FontAtlas};
pub use frame::GlRenderer;
pub use pass::{plan_frame, ortho_projection, FrameMetrics, FramePlan, ListPlan, PlannedDraw, ScissorRect};
pub use shader::ShaderProgram;
