use anyhow::{anyhow, Context, Result};
use glow::HasContext;

/// Vertex stage: orthographic transform, UV/color pass-through.
const VERTEX_SRC: &str = r#"#version 410 core
precision mediump float;
layout (location = 0) in vec2 Position;
layout (location = 1) in vec2 UV;
layout (location = 2) in vec4 Color;
uniform mat4 ProjMtx;
out vec2 Frag_UV;
out vec4 Frag_Color;
void main()
{
    Frag_UV = UV;
    Frag_Color = Color;
    gl_Position = ProjMtx * vec4(Position.xy, 0, 1);
}
"#;

/// Fragment stage: vertex color × texture sample. Flat-colored primitives
/// sample an opaque-white atlas texel, so one program covers both cases.
const FRAGMENT_SRC: &str = r#"#version 410 core
precision mediump float;
uniform sampler2D Texture;
in vec2 Frag_UV;
in vec4 Frag_Color;
layout (location = 0) out vec4 Out_Color;
void main()
{
    Out_Color = Frag_Color * texture(Texture, Frag_UV.st);
}
"#;

/// The one linked GUI program plus its uniform locations.
///
/// There is no degraded rendering mode: if either stage fails to compile or
/// the program fails to link, the error (with the driver's info log) is
/// propagated and the caller treats init as fatal.
pub struct ShaderProgram {
    program: glow::Program,
    proj_mtx: Option<glow::UniformLocation>,
    texture: Option<glow::UniformLocation>,
}

impl ShaderProgram {
    /// Compiles and links the vertex + fragment program.
    pub fn compile(gl: &glow::Context) -> Result<Self> {
        let vertex = compile_stage(gl, glow::VERTEX_SHADER, VERTEX_SRC)
            .context("vertex shader failed to compile")?;
        let fragment = compile_stage(gl, glow::FRAGMENT_SHADER, FRAGMENT_SRC)
            .context("fragment shader failed to compile")?;

        unsafe {
            let program = gl
                .create_program()
                .map_err(|e| anyhow!("failed to create GL program: {e}"))?;
            gl.attach_shader(program, vertex);
            gl.attach_shader(program, fragment);
            gl.link_program(program);

            // Stage objects are no longer needed once the program exists.
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(anyhow!("GL program failed to link: {log}"));
            }

            let proj_mtx = gl.get_uniform_location(program, "ProjMtx");
            let texture = gl.get_uniform_location(program, "Texture");

            Ok(Self {
                program,
                proj_mtx,
                texture,
            })
        }
    }

    #[inline]
    pub fn handle(&self) -> glow::Program {
        self.program
    }

    /// Uploads the projection matrix (column-major) and binds the sampler to
    /// texture unit 0. The program must be in use.
    pub fn set_frame_uniforms(&self, gl: &glow::Context, projection: &[f32; 16]) {
        unsafe {
            gl.uniform_1_i32(self.texture.as_ref(), 0);
            gl.uniform_matrix_4_f32_slice(self.proj_mtx.as_ref(), false, projection);
        }
    }
}

fn compile_stage(gl: &glow::Context, kind: u32, source: &str) -> Result<glow::Shader> {
    unsafe {
        let shader = gl
            .create_shader(kind)
            .map_err(|e| anyhow!("failed to create GL shader object: {e}"))?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(anyhow!("{log}"));
        }
        Ok(shader)
    }
}
