//! Pure per-frame translation math.
//!
//! Everything here is plain arithmetic over draw data so the clipping,
//! projection, and culling behavior can be tested without a GL context.
//! Errors in this layer show up as silent visual corruption, not crashes,
//! which is why it is kept GL-free and covered by tests.

use glaze_draw::{ClipRect, DrawData, TextureId, Vec2};

// ── frame metrics ─────────────────────────────────────────────────────────

/// Per-frame coordinate-space facts derived from draw data.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameMetrics {
    /// Framebuffer width in physical pixels (`display_size.x * scale.x`, truncated).
    pub fb_width: i32,
    /// Framebuffer height in physical pixels.
    pub fb_height: i32,
    /// Display-space origin subtracted from every clip rect.
    pub clip_off: Vec2,
    /// Display-unit → framebuffer-pixel scale applied to every clip rect.
    pub clip_scale: Vec2,
}

impl FrameMetrics {
    /// Returns `None` for degenerate frames (either framebuffer dimension
    /// ≤ 0, e.g. a minimized window). Degenerate frames are skipped silently;
    /// they are not errors.
    pub fn of(data: &DrawData) -> Option<Self> {
        let fb = data.display_size * data.framebuffer_scale;
        let fb_width = fb.x as i32;
        let fb_height = fb.y as i32;
        if fb_width <= 0 || fb_height <= 0 {
            return None;
        }
        Some(Self {
            fb_width,
            fb_height,
            clip_off: data.display_pos,
            clip_scale: data.framebuffer_scale,
        })
    }
}

// ── projection ────────────────────────────────────────────────────────────

/// Orthographic projection for the vertex stage, column-major.
///
/// Maps `[L,R] × [T,B]` in display space to `[-1,1] × [1,-1]` in clip space
/// (Y inverted: display space is top-left origin, clip space bottom-left).
/// Z is fixed at -1, W passes through.
pub fn ortho_projection(display_pos: Vec2, display_size: Vec2) -> [f32; 16] {
    let l = display_pos.x;
    let r = display_pos.x + display_size.x;
    let t = display_pos.y;
    let b = display_pos.y + display_size.y;

    #[rustfmt::skip]
    let m = [
        2.0 / (r - l),     0.0,               0.0,  0.0,
        0.0,               2.0 / (t - b),     0.0,  0.0,
        0.0,               0.0,               -1.0, 0.0,
        (r + l) / (l - r), (t + b) / (b - t), 0.0,  1.0,
    ];
    m
}

// ── scissor conversion ────────────────────────────────────────────────────

/// Scissor box in framebuffer pixels, GL convention (origin bottom-left).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ScissorRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Projects a display-space clip rect into a framebuffer-space scissor box.
///
/// Returns `None` when the transformed rect lies fully outside the
/// framebuffer — the draw is skipped entirely. Rects straddling the boundary
/// are clamped, not dropped. The Y origin is flipped to GL's bottom-left
/// convention: `y = fb_height - clamped_bottom`.
pub fn scissor_for(clip: ClipRect, metrics: &FrameMetrics) -> Option<ScissorRect> {
    let r = clip.offset_scale(metrics.clip_off, metrics.clip_scale);
    let fb_w = metrics.fb_width as f32;
    let fb_h = metrics.fb_height as f32;

    // Cull test: fully offscreen on any side.
    if r.min.x >= fb_w || r.min.y >= fb_h || r.max.x < 0.0 || r.max.y < 0.0 {
        return None;
    }

    let x0 = r.min.x.max(0.0);
    let y0 = r.min.y.max(0.0);
    let x1 = r.max.x.min(fb_w);
    let y1 = r.max.y.min(fb_h);

    Some(ScissorRect {
        x: x0 as i32,
        y: (fb_h - y1) as i32,
        width: (x1 - x0) as i32,
        height: (y1 - y0) as i32,
    })
}

// ── frame plan ────────────────────────────────────────────────────────────

/// One draw that survived culling, with its resolved scissor box.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedDraw {
    pub scissor: ScissorRect,
    pub texture: TextureId,
    pub elem_count: u32,
    pub idx_offset: u32,
}

/// Planned work for one draw list: upload its geometry, then issue `draws`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPlan {
    /// Index into `DrawData::lists`.
    pub list: usize,
    pub draws: Vec<PlannedDraw>,
}

/// Planned work for a whole frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    pub metrics: FrameMetrics,
    pub lists: Vec<ListPlan>,
}

impl FramePlan {
    /// Total number of draw calls the frame will issue.
    pub fn draw_count(&self) -> usize {
        self.lists.iter().map(|l| l.draws.len()).sum()
    }
}

/// Translates draw data into an ordered frame plan.
///
/// `None` means a degenerate frame: nothing to upload, zero draw calls.
/// List order and command order are preserved exactly — input order is the
/// only z-ordering mechanism the scene has.
pub fn plan_frame(data: &DrawData) -> Option<FramePlan> {
    let metrics = FrameMetrics::of(data)?;

    let lists = data
        .lists
        .iter()
        .enumerate()
        .map(|(i, list)| ListPlan {
            list: i,
            draws: list
                .commands
                .iter()
                .filter_map(|cmd| {
                    scissor_for(cmd.clip_rect, &metrics).map(|scissor| PlannedDraw {
                        scissor,
                        texture: cmd.texture,
                        elem_count: cmd.elem_count,
                        idx_offset: cmd.idx_offset,
                    })
                })
                .collect(),
        })
        .collect();

    Some(FramePlan { metrics, lists })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glaze_draw::{DrawCmd, DrawList};

    fn data(size: (f32, f32), scale: (f32, f32)) -> DrawData {
        DrawData {
            display_pos: Vec2::zero(),
            display_size: Vec2::new(size.0, size.1),
            framebuffer_scale: Vec2::new(scale.0, scale.1),
            lists: Vec::new(),
        }
    }

    fn cmd(clip: ClipRect) -> DrawCmd {
        DrawCmd {
            clip_rect: clip,
            texture: TextureId(1),
            elem_count: 6,
            idx_offset: 0,
        }
    }

    /// Multiplies the column-major matrix by (x, y, 0, 1).
    fn project(m: &[f32; 16], x: f32, y: f32) -> (f32, f32) {
        let px = m[0] * x + m[4] * y + m[12];
        let py = m[1] * x + m[5] * y + m[13];
        (px, py)
    }

    // ── metrics ───────────────────────────────────────────────────────────

    #[test]
    fn metrics_scale_and_truncate() {
        let m = FrameMetrics::of(&data((800.0, 600.0), (2.0, 2.0))).unwrap();
        assert_eq!((m.fb_width, m.fb_height), (1600, 1200));

        let m = FrameMetrics::of(&data((100.9, 50.9), (1.0, 1.0))).unwrap();
        assert_eq!((m.fb_width, m.fb_height), (100, 50));
    }

    #[test]
    fn degenerate_frames_yield_no_plan() {
        assert!(plan_frame(&data((0.0, 600.0), (1.0, 1.0))).is_none());
        assert!(plan_frame(&data((800.0, 0.0), (1.0, 1.0))).is_none());
        assert!(plan_frame(&data((-800.0, 600.0), (1.0, 1.0))).is_none());
        // Sub-pixel display collapses to a zero-size framebuffer.
        assert!(plan_frame(&data((0.4, 600.0), (1.0, 1.0))).is_none());
    }

    // ── projection ────────────────────────────────────────────────────────

    #[test]
    fn ortho_maps_display_corners_to_clip_corners() {
        let pos = Vec2::new(0.0, 0.0);
        let size = Vec2::new(800.0, 600.0);
        let m = ortho_projection(pos, size);
        assert_eq!(project(&m, 0.0, 0.0), (-1.0, 1.0));
        assert_eq!(project(&m, 800.0, 600.0), (1.0, -1.0));
        assert_eq!(project(&m, 400.0, 300.0), (0.0, 0.0));
    }

    #[test]
    fn ortho_respects_display_offset() {
        // Display origin away from (0,0): corners must still land on ±1.
        let pos = Vec2::new(100.0, 50.0);
        let size = Vec2::new(640.0, 480.0);
        let m = ortho_projection(pos, size);
        assert_eq!(project(&m, 100.0, 50.0), (-1.0, 1.0));
        assert_eq!(project(&m, 740.0, 530.0), (1.0, -1.0));
    }

    // ── scissor ───────────────────────────────────────────────────────────

    fn metrics(fb_w: i32, fb_h: i32, off: Vec2, scale: Vec2) -> FrameMetrics {
        FrameMetrics {
            fb_width: fb_w,
            fb_height: fb_h,
            clip_off: off,
            clip_scale: scale,
        }
    }

    #[test]
    fn scissor_flips_y_to_bottom_left_origin() {
        let m = metrics(800, 600, Vec2::zero(), Vec2::splat(1.0));
        let s = scissor_for(ClipRect::new(10.0, 20.0, 110.0, 120.0), &m).unwrap();
        assert_eq!(s, ScissorRect { x: 10, y: 600 - 120, width: 100, height: 100 });
    }

    #[test]
    fn scissor_with_nontrivial_display_offset() {
        // Display origin (100, 50): clip rects arrive in display space and
        // must be rebased before the Y flip.
        let m = metrics(800, 600, Vec2::new(100.0, 50.0), Vec2::splat(1.0));
        let s = scissor_for(ClipRect::new(100.0, 50.0, 300.0, 250.0), &m).unwrap();
        assert_eq!(s, ScissorRect { x: 0, y: 600 - 200, width: 200, height: 200 });
    }

    #[test]
    fn scissor_retina_literal_case() {
        // 800×600 display at 2× scale: framebuffer 1600×1200, and a clip of
        // (0,0,400,300) covers the top-left display quadrant, i.e. the
        // *bottom*-left GL quadrant starts at y = 1200 - 600.
        let d = DrawData {
            display_pos: Vec2::zero(),
            display_size: Vec2::new(800.0, 600.0),
            framebuffer_scale: Vec2::splat(2.0),
            lists: Vec::new(),
        };
        let m = FrameMetrics::of(&d).unwrap();
        assert_eq!((m.fb_width, m.fb_height), (1600, 1200));

        let s = scissor_for(ClipRect::new(0.0, 0.0, 400.0, 300.0), &m).unwrap();
        assert_eq!(s, ScissorRect { x: 0, y: 600, width: 800, height: 600 });
    }

    #[test]
    fn scissor_culls_fully_offscreen_per_side() {
        let m = metrics(800, 600, Vec2::zero(), Vec2::splat(1.0));
        // left >= fb_width
        assert!(scissor_for(ClipRect::new(800.0, 0.0, 900.0, 100.0), &m).is_none());
        // top >= fb_height
        assert!(scissor_for(ClipRect::new(0.0, 600.0, 100.0, 700.0), &m).is_none());
        // right < 0
        assert!(scissor_for(ClipRect::new(-100.0, 0.0, -1.0, 100.0), &m).is_none());
        // bottom < 0
        assert!(scissor_for(ClipRect::new(0.0, -100.0, 100.0, -1.0), &m).is_none());
    }

    #[test]
    fn scissor_clamps_straddling_rects() {
        let m = metrics(800, 600, Vec2::zero(), Vec2::splat(1.0));
        // Hangs off the top-left corner: clamped, not dropped.
        let s = scissor_for(ClipRect::new(-50.0, -50.0, 100.0, 100.0), &m).unwrap();
        assert_eq!(s, ScissorRect { x: 0, y: 500, width: 100, height: 100 });
        // Hangs off the bottom-right corner.
        let s = scissor_for(ClipRect::new(700.0, 500.0, 900.0, 700.0), &m).unwrap();
        assert_eq!(s, ScissorRect { x: 700, y: 0, width: 100, height: 100 });
    }

    // ── plan ──────────────────────────────────────────────────────────────

    #[test]
    fn plan_preserves_list_and_command_order() {
        let clip = ClipRect::new(0.0, 0.0, 100.0, 100.0);
        let mut d = data((800.0, 600.0), (1.0, 1.0));
        d.lists = vec![
            DrawList {
                commands: vec![
                    DrawCmd { idx_offset: 0, ..cmd(clip) },
                    DrawCmd { idx_offset: 6, ..cmd(clip) },
                ],
                ..DrawList::default()
            },
            DrawList {
                commands: vec![DrawCmd { idx_offset: 12, ..cmd(clip) }],
                ..DrawList::default()
            },
        ];

        let plan = plan_frame(&d).unwrap();
        assert_eq!(plan.lists.len(), 2);
        assert_eq!(plan.lists[0].list, 0);
        assert_eq!(plan.lists[1].list, 1);
        let offsets: Vec<u32> = plan
            .lists
            .iter()
            .flat_map(|l| l.draws.iter().map(|dr| dr.idx_offset))
            .collect();
        assert_eq!(offsets, vec![0, 6, 12]);
        assert_eq!(plan.draw_count(), 3);
    }

    #[test]
    fn plan_drops_only_culled_commands() {
        let mut d = data((800.0, 600.0), (1.0, 1.0));
        d.lists = vec![DrawList {
            commands: vec![
                cmd(ClipRect::new(0.0, 0.0, 100.0, 100.0)),
                cmd(ClipRect::new(1000.0, 0.0, 1100.0, 100.0)), // offscreen
                cmd(ClipRect::new(200.0, 0.0, 300.0, 100.0)),
            ],
            ..DrawList::default()
        }];

        let plan = plan_frame(&d).unwrap();
        assert_eq!(plan.lists[0].draws.len(), 2);
        assert_eq!(plan.lists[0].draws[0].scissor.x, 0);
        assert_eq!(plan.lists[0].draws[1].scissor.x, 200);
    }
}
