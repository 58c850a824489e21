use super::Vec2;

/// Clip rectangle carried by a draw command, in display space.
///
/// `min` is the top-left corner, `max` the bottom-right. The rectangle lives
/// in the same coordinate space as `DrawData::display_pos`/`display_size`,
/// independent of the framebuffer scale.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ClipRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl ClipRect {
    #[inline]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            min: Vec2::new(left, top),
            max: Vec2::new(right, bottom),
        }
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Shifts both corners by `-offset` and scales by `scale`, component-wise.
    ///
    /// This is the display-space → framebuffer-space projection applied to
    /// every clip rectangle before scissoring.
    #[inline]
    pub fn offset_scale(self, offset: Vec2, scale: Vec2) -> Self {
        Self {
            min: (self.min - offset) * scale,
            max: (self.max - offset) * scale,
        }
    }
}
