use anyhow::{Context, Result};
use glow::HasContext;

use glaze_draw::{DrawData, TextureId};

use crate::render::{upload_font_atlas, FontAtlas, GlRenderer};

/// Fixed frame background.
const CLEAR_COLOR: [f32; 4] = [0.45, 0.55, 0.60, 1.00];

/// The external layout/compose step that produces a frame's draw data.
///
/// Implemented by the GUI layout engine. `frame` is called once per
/// [`Backend::render`]; the returned data is consumed read-only within that
/// call and never retained.
pub trait FrameSource {
    fn frame(&mut self) -> &DrawData;
}

/// The rendering backend as seen by the embedding host.
///
/// Owns the GL context handle and all GPU resources created during init.
/// Process-lifetime singleton in effect (one GL context per process), but
/// ownership is explicit: whoever holds the `Backend` holds the resources.
/// Single-threaded by contract — `render` must never be called concurrently
/// or re-entrantly.
pub struct Backend {
    gl: glow::Context,
    renderer: GlRenderer,
}

impl Backend {
    /// One-time setup: compiles the shader, creates the shared vertex/index
    /// buffers, uploads the font atlas.
    ///
    /// Also returns the atlas texture handle, which the host must write back
    /// into the layout engine's font state so draw commands can reference it.
    ///
    /// Errors are unrecoverable (broken shader, missing GL entry points);
    /// the embedder is expected to surface the diagnostic and terminate.
    pub fn init(gl: glow::Context, atlas: &FontAtlas<'_>) -> Result<(Self, TextureId)> {
        let renderer = GlRenderer::new(&gl).context("backend init failed")?;
        let atlas_texture =
            upload_font_atlas(&gl, atlas).context("font atlas upload failed")?;

        Ok((Self { gl, renderer }, atlas_texture))
    }

    /// Renders one frame: clears the framebuffer, obtains draw data from the
    /// layout engine, and draws it.
    ///
    /// Malformed draw data (dangling texture handles, inconsistent index
    /// counts) is an upstream contract violation and produces visual
    /// corruption, not an error.
    pub fn render(&mut self, source: &mut dyn FrameSource) -> Result<()> {
        unsafe {
            self.gl.use_program(Some(self.renderer_program()));
            self.gl.disable(glow::SCISSOR_TEST);
            self.gl
                .clear_color(CLEAR_COLOR[0], CLEAR_COLOR[1], CLEAR_COLOR[2], CLEAR_COLOR[3]);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }

        let data = source.frame();
        self.renderer.render(&self.gl, data)
    }

    /// Access to the GL context, for embedders that interleave their own GL
    /// work between frames.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    fn renderer_program(&self) -> glow::Program {
        self.renderer.program_handle()
    }
}
