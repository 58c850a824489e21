use super::{ClipRect, Vec2, Vertex};

/// Draw index element type.
///
/// 16-bit by default; enable the `index32` feature when a layout engine can
/// produce more than 65k vertices in a single list.
#[cfg(not(feature = "index32"))]
pub type DrawIdx = u16;
#[cfg(feature = "index32")]
pub type DrawIdx = u32;

/// Opaque GPU texture handle threaded through draw commands.
///
/// The backend hands one out when the font atlas is uploaded; the layout
/// engine stores it and stamps it into every command that samples the atlas.
/// Equality-comparable and copyable, carries no ownership. The backend never
/// produces `0` (GL object names are non-zero).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(pub u32);

impl TextureId {
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// One indexed-triangle draw request within a [`DrawList`].
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCmd {
    /// Clip rectangle in display space (same space as `display_pos`).
    pub clip_rect: ClipRect,
    /// Texture sampled by this draw.
    pub texture: TextureId,
    /// Number of indices consumed.
    pub elem_count: u32,
    /// Offset into the list's index buffer, in elements.
    pub idx_offset: u32,
}

/// One contiguous geometry batch: shared vertex/index arrays subdivided into
/// draw commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<DrawIdx>,
    pub commands: Vec<DrawCmd>,
}

/// A frame's renderable output.
///
/// Produced fresh each frame by the layout engine, consumed read-only by the
/// renderer within the same frame, never retained.
///
/// Lists — and commands within a list — are drawn strictly in order; later
/// draws overlap earlier ones. That ordering is the sole z-ordering mechanism
/// of an immediate-mode 2D scene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawData {
    /// Top-left of the visible display area.
    pub display_pos: Vec2,
    /// Extent of the visible display area, in display units.
    pub display_size: Vec2,
    /// Device pixel ratio: framebuffer pixels per display unit.
    pub framebuffer_scale: Vec2,
    pub lists: Vec<DrawList>,
}

impl DrawData {
    /// Total vertex count across all lists.
    pub fn total_vtx_count(&self) -> usize {
        self.lists.iter().map(|l| l.vertices.len()).sum()
    }

    /// Total index count across all lists.
    pub fn total_idx_count(&self) -> usize {
        self.lists.iter().map(|l| l.indices.len()).sum()
    }
}
