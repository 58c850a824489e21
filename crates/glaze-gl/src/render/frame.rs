use anyhow::{anyhow, Context, Result};
use glow::HasContext;

use glaze_draw::{DrawData, DrawIdx, TextureId, Vertex};

use super::pass::{plan_frame, ortho_projection, FrameMetrics, FramePlan};
use super::shader::ShaderProgram;

#[cfg(not(feature = "index32"))]
const INDEX_KIND: u32 = glow::UNSIGNED_SHORT;
#[cfg(feature = "index32")]
const INDEX_KIND: u32 = glow::UNSIGNED_INT;

const INDEX_BYTES: usize = std::mem::size_of::<DrawIdx>();
const VERTEX_STRIDE: i32 = std::mem::size_of::<Vertex>() as i32;

/// Frame renderer: owns the persistent GPU resources and walks a frame plan.
///
/// Owns exactly one vertex buffer and one index buffer; both are overwritten
/// (not appended) once per draw list with a streaming hint, and no geometry
/// survives between frames.
///
/// Not thread-safe: every method assumes the GL context is current on the
/// calling thread.
pub struct GlRenderer {
    program: ShaderProgram,
    vbo: glow::Buffer,
    ebo: glow::Buffer,
    warned_null_texture: bool,
}

impl GlRenderer {
    /// Compiles the shader and creates the shared buffers.
    ///
    /// A shader failure here is unrecoverable and should be treated as fatal
    /// by the embedder; the error carries the driver's diagnostic log.
    pub fn new(gl: &glow::Context) -> Result<Self> {
        let program = ShaderProgram::compile(gl).context("GUI shader setup failed")?;

        let (vbo, ebo) = unsafe {
            let vbo = gl
                .create_buffer()
                .map_err(|e| anyhow!("failed to create vertex buffer: {e}"))?;
            let ebo = gl
                .create_buffer()
                .map_err(|e| anyhow!("failed to create index buffer: {e}"))?;
            (vbo, ebo)
        };

        log::info!(
            "GL renderer initialized ({}-bit indices)",
            INDEX_BYTES * 8
        );

        Ok(Self {
            program,
            vbo,
            ebo,
            warned_null_texture: false,
        })
    }

    /// GL name of the linked GUI program.
    pub fn program_handle(&self) -> glow::Program {
        self.program.handle()
    }

    /// Renders one frame of draw data.
    ///
    /// Degenerate frames (framebuffer dimension ≤ 0) issue zero GL calls.
    /// Lists and commands are drawn strictly in input order.
    pub fn render(&mut self, gl: &glow::Context, data: &DrawData) -> Result<()> {
        let Some(plan) = plan_frame(data) else {
            return Ok(());
        };

        // The VAO lives for this frame only; attribute state is re-declared
        // every frame by setup_frame_state.
        let vao = unsafe {
            gl.create_vertex_array()
                .map_err(|e| anyhow!("failed to create vertex array: {e}"))?
        };

        let projection = ortho_projection(data.display_pos, data.display_size);
        self.setup_frame_state(gl, &plan.metrics, &projection, vao);
        self.draw_lists(gl, data, &plan);

        unsafe {
            gl.delete_vertex_array(vao);
        }
        Ok(())
    }

    /// Per-frame state setup: blending, scissor test, viewport, projection,
    /// buffer bindings, and vertex attribute declarations.
    fn setup_frame_state(
        &self,
        gl: &glow::Context,
        metrics: &FrameMetrics,
        projection: &[f32; 16],
        vao: glow::VertexArray,
    ) {
        unsafe {
            gl.enable(glow::BLEND);
            gl.blend_equation(glow::FUNC_ADD);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
            gl.disable(glow::CULL_FACE);
            gl.disable(glow::DEPTH_TEST);
            gl.enable(glow::SCISSOR_TEST);

            gl.viewport(0, 0, metrics.fb_width, metrics.fb_height);
            gl.use_program(Some(self.program.handle()));
            self.program.set_frame_uniforms(gl, projection);
            gl.active_texture(glow::TEXTURE0);

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(self.ebo));

            gl.enable_vertex_attrib_array(0);
            gl.enable_vertex_attrib_array(1);
            gl.enable_vertex_attrib_array(2);
            gl.vertex_attrib_pointer_f32(0, 2, glow::FLOAT, false, VERTEX_STRIDE, 0);
            gl.vertex_attrib_pointer_f32(1, 2, glow::FLOAT, false, VERTEX_STRIDE, 8);
            gl.vertex_attrib_pointer_f32(2, 4, glow::UNSIGNED_BYTE, true, VERTEX_STRIDE, 16);
        }
    }

    fn draw_lists(&mut self, gl: &glow::Context, data: &DrawData, plan: &FramePlan) {
        for list_plan in &plan.lists {
            let list = &data.lists[list_plan.list];

            unsafe {
                // Full streaming replace: the driver may orphan the previous
                // storage instead of synchronizing on in-flight draws.
                gl.buffer_data_u8_slice(
                    glow::ARRAY_BUFFER,
                    bytemuck::cast_slice(&list.vertices),
                    glow::STREAM_DRAW,
                );
                gl.buffer_data_u8_slice(
                    glow::ELEMENT_ARRAY_BUFFER,
                    bytemuck::cast_slice(&list.indices),
                    glow::STREAM_DRAW,
                );
            }

            for draw in &list_plan.draws {
                let Some(texture) = native_texture(draw.texture) else {
                    if !self.warned_null_texture {
                        log::debug!("draw command carries a null texture handle; skipped");
                        self.warned_null_texture = true;
                    }
                    continue;
                };

                unsafe {
                    let s = draw.scissor;
                    gl.scissor(s.x, s.y, s.width, s.height);
                    gl.bind_texture(glow::TEXTURE_2D, Some(texture));
                    gl.draw_elements(
                        glow::TRIANGLES,
                        draw.elem_count as i32,
                        INDEX_KIND,
                        (draw.idx_offset as usize * INDEX_BYTES) as i32,
                    );
                }
            }
        }
    }
}

/// Converts the opaque handle back into a GL texture name.
///
/// `0` is not a bindable GL object name; commands carrying it are skipped
/// (upstream contract violation, not an error).
fn native_texture(id: TextureId) -> Option<glow::NativeTexture> {
    std::num::NonZeroU32::new(id.raw()).map(glow::NativeTexture)
}
