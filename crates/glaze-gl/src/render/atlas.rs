use anyhow::{anyhow, ensure, Result};
use glow::HasContext;

use glaze_draw::TextureId;

/// Rasterized font atlas pixels, as produced by the external font system.
///
/// The buffer is RGBA8, row-major, tightly packed.
#[derive(Debug, Copy, Clone)]
pub struct FontAtlas<'a> {
    pub pixels: &'a [u8],
    pub width: u32,
    pub height: u32,
}

impl<'a> FontAtlas<'a> {
    /// Wraps an atlas pixel buffer, checking that its length matches the
    /// stated dimensions.
    pub fn new(pixels: &'a [u8], width: u32, height: u32) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        ensure!(
            pixels.len() == expected,
            "atlas buffer is {} bytes, expected {} for {}x{} RGBA8",
            pixels.len(),
            expected,
            width,
            height
        );
        Ok(Self {
            pixels,
            width,
            height,
        })
    }
}

/// Uploads the font atlas to a GL texture, once, during init.
///
/// Linear min/mag filtering. The returned handle is stored by the layout
/// engine's font state and later appears inside draw commands; it stays valid
/// for the lifetime of the GL context.
pub fn upload_font_atlas(gl: &glow::Context, atlas: &FontAtlas<'_>) -> Result<TextureId> {
    unsafe {
        let texture = gl
            .create_texture()
            .map_err(|e| anyhow!("failed to create atlas texture: {e}"))?;
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MIN_FILTER,
            glow::LINEAR as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MAG_FILTER,
            glow::LINEAR as i32,
        );
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            glow::RGBA as i32,
            atlas.width as i32,
            atlas.height as i32,
            0,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            glow::PixelUnpackData::Slice(Some(atlas.pixels)),
        );

        log::info!("font atlas uploaded ({}x{})", atlas.width, atlas.height);
        Ok(TextureId(texture.0.get()))
    }
}
