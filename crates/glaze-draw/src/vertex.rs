use bytemuck::{Pod, Zeroable};

/// One GUI vertex as uploaded to the GPU.
///
/// The field order and packing are part of the GPU contract: the backend
/// declares vertex attributes against these exact byte offsets, so the struct
/// is `repr(C)` and 20 bytes with no padding.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in display space.
    pub pos: [f32; 2],
    /// Texture coordinates.
    pub uv: [f32; 2],
    /// RGBA, normalized to [0,1] by the GPU.
    pub color: [u8; 4],
}

impl Vertex {
    #[inline]
    pub const fn new(pos: [f32; 2], uv: [f32; 2], color: [u8; 4]) -> Self {
        Self { pos, uv, color }
    }
}
