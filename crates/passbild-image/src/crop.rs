// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Crop-region model — an aspect-locked rectangle draggable within the
// displayed image.

use tracing::debug;

use passbild_core::config::CropConfig;
use passbild_core::types::{CropRegion, DisplaySize};
use passbild_core::units;

/// Pointer-drag state.
///
/// Dragging records the pointer's offset from the region's top-left corner
/// at drag-start. Every subsequent move recomputes the absolute top-left
/// from the current pointer position, so dropped or coalesced move events
/// cannot accumulate drift the way delta-tracking does.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Dragging { grab_dx: f64, grab_dy: f64 },
}

/// Maintains the crop rectangle over the displayed source image.
///
/// The region keeps the target photo's width/height ratio at all times:
/// width is the free variable of the size control and height is derived.
/// All coordinates are in display space; [`CropRegionModel::to_natural`]
/// converts to source-image pixels for the renderer.
#[derive(Debug, Clone)]
pub struct CropRegionModel {
    region: CropRegion,
    aspect: f64,
    display: DisplaySize,
    limits: CropConfig,
    drag: DragState,
}

impl CropRegionModel {
    /// Create a model centered on a freshly loaded image.
    ///
    /// `aspect` is the target spec's `width_mm / height_mm`.
    pub fn new(display: DisplaySize, aspect: f64, limits: CropConfig) -> Self {
        let mut model = Self {
            region: CropRegion {
                x: 0.0,
                y: 0.0,
                width: 0.0,
                height: 0.0,
            },
            aspect,
            display,
            limits,
            drag: DragState::Idle,
        };
        model.reset(display);
        model
    }

    /// Re-center the region, e.g. when a new source image replaces the
    /// current one. Any in-progress drag is abandoned.
    pub fn reset(&mut self, display: DisplaySize) {
        self.display = display;
        self.drag = DragState::Idle;

        let width = self
            .limits
            .initial_width
            .clamp(self.limits.min_width, self.limits.max_width);
        let height = width / self.aspect;
        self.region = CropRegion {
            x: ((display.width - width) / 2.0).max(0.0),
            y: ((display.height - height) / 2.0).max(0.0),
            width,
            height,
        };
        debug!(region = ?self.region, "Crop region reset");
    }

    /// Current region, in display coordinates.
    pub fn region(&self) -> CropRegion {
        self.region
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Start a drag at the given pointer position.
    pub fn begin_drag(&mut self, pointer_x: f64, pointer_y: f64) {
        self.drag = DragState::Dragging {
            grab_dx: pointer_x - self.region.x,
            grab_dy: pointer_y - self.region.y,
        };
    }

    /// Move the region so it keeps its grab offset under the pointer.
    ///
    /// No-op while idle. Each axis is clamped independently to
    /// `[0, display - region]`; if the region is larger than the display on
    /// an axis, it pins to 0 there.
    pub fn drag_to(&mut self, pointer_x: f64, pointer_y: f64) {
        let DragState::Dragging { grab_dx, grab_dy } = self.drag else {
            return;
        };
        self.region.x = clamp_axis(pointer_x - grab_dx, self.region.width, self.display.width);
        self.region.y = clamp_axis(pointer_y - grab_dy, self.region.height, self.display.height);
    }

    /// Finish the drag (pointer released or left the tracked surface).
    pub fn end_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Resize via the size control: set a new width, derive the height from
    /// the aspect ratio, keep the top-left corner, then re-clamp.
    pub fn set_width(&mut self, width: f64) {
        let width = width.clamp(self.limits.min_width, self.limits.max_width);
        self.region.width = width;
        self.region.height = width / self.aspect;
        self.region.x = clamp_axis(self.region.x, self.region.width, self.display.width);
        self.region.y = clamp_axis(self.region.y, self.region.height, self.display.height);
    }

    /// Map the region into natural-image pixel coordinates.
    pub fn to_natural(&self, natural_width: u32, natural_height: u32) -> CropRegion {
        CropRegion {
            x: units::display_to_natural(self.region.x, natural_width, self.display.width),
            y: units::display_to_natural(self.region.y, natural_height, self.display.height),
            width: units::display_to_natural(self.region.width, natural_width, self.display.width),
            height: units::display_to_natural(
                self.region.height,
                natural_height,
                self.display.height,
            ),
        }
    }
}

fn clamp_axis(pos: f64, region_size: f64, display_size: f64) -> f64 {
    pos.clamp(0.0, (display_size - region_size).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn model() -> CropRegionModel {
        // US spec aspect on a 640x480 display rendering.
        CropRegionModel::new(
            DisplaySize::new(640.0, 480.0),
            35.0 / 45.0,
            CropConfig::default(),
        )
    }

    fn assert_in_bounds(m: &CropRegionModel) {
        let r = m.region();
        assert!(r.x >= 0.0);
        assert!(r.y >= 0.0);
        assert!(r.x + r.width <= 640.0 + EPS);
        assert!(r.y + r.height <= 480.0 + EPS);
    }

    #[test]
    fn initial_region_is_centered_at_200_wide() {
        let m = model();
        let r = m.region();
        assert!((r.width - 200.0).abs() < EPS);
        assert!((r.height - 200.0 * 45.0 / 35.0).abs() < EPS);
        assert!((r.x - (640.0 - r.width) / 2.0).abs() < EPS);
        assert!((r.y - (480.0 - r.height) / 2.0).abs() < EPS);
    }

    #[test]
    fn drag_preserves_grab_offset() {
        let mut m = model();
        let r0 = m.region();
        // Grab 10 units inside the region.
        m.begin_drag(r0.x + 10.0, r0.y + 10.0);
        m.drag_to(100.0, 120.0);
        let r = m.region();
        assert!((r.x - 90.0).abs() < EPS);
        assert!((r.y - 110.0).abs() < EPS);
    }

    #[test]
    fn sparse_move_events_do_not_drift() {
        // Two models receiving different intermediate events but the same
        // final pointer position must agree exactly.
        let mut dense = model();
        let mut sparse = model();
        let r = dense.region();
        dense.begin_drag(r.x + 5.0, r.y + 5.0);
        sparse.begin_drag(r.x + 5.0, r.y + 5.0);

        for i in 0..100 {
            dense.drag_to(f64::from(i) * 3.1, f64::from(i) * 1.7);
        }
        dense.drag_to(300.0, 200.0);
        sparse.drag_to(300.0, 200.0);

        assert_eq!(dense.region(), sparse.region());
    }

    #[test]
    fn drag_is_clamped_to_display_bounds() {
        let mut m = model();
        let r = m.region();
        m.begin_drag(r.x, r.y);
        m.drag_to(-500.0, -500.0);
        assert_in_bounds(&m);
        assert_eq!(m.region().x, 0.0);
        assert_eq!(m.region().y, 0.0);

        m.drag_to(5000.0, 5000.0);
        assert_in_bounds(&m);
        let r = m.region();
        assert!((r.x + r.width - 640.0).abs() < EPS);
        assert!((r.y + r.height - 480.0).abs() < EPS);
    }

    #[test]
    fn moves_while_idle_are_ignored() {
        let mut m = model();
        let before = m.region();
        m.drag_to(0.0, 0.0);
        assert_eq!(m.region(), before);

        m.begin_drag(before.x, before.y);
        m.end_drag();
        m.drag_to(0.0, 0.0);
        assert_eq!(m.region(), before);
    }

    #[test]
    fn resize_keeps_aspect_and_top_left() {
        let mut m = model();
        let before = m.region();
        m.set_width(260.0);
        let r = m.region();
        assert!((r.width / r.height - 35.0 / 45.0).abs() < EPS);
        assert!((r.x - before.x).abs() < EPS);
        assert_in_bounds(&m);
    }

    #[test]
    fn resize_is_clamped_to_the_size_control_range() {
        let mut m = model();
        m.set_width(9999.0);
        assert!((m.region().width - 300.0).abs() < EPS);
        m.set_width(1.0);
        assert!((m.region().width - 100.0).abs() < EPS);
    }

    #[test]
    fn resize_near_the_edge_reclamps_position() {
        let mut m = model();
        let r = m.region();
        // Park the region in the bottom-right corner, then grow it.
        m.begin_drag(r.x, r.y);
        m.drag_to(5000.0, 5000.0);
        m.end_drag();
        m.set_width(300.0);
        assert_in_bounds(&m);
    }

    #[test]
    fn region_larger_than_display_pins_to_origin() {
        // A display smaller than the minimum region size on both axes.
        let mut m = CropRegionModel::new(
            DisplaySize::new(80.0, 60.0),
            35.0 / 45.0,
            CropConfig::default(),
        );
        m.begin_drag(0.0, 0.0);
        m.drag_to(50.0, 50.0);
        let r = m.region();
        assert_eq!(r.x, 0.0);
        assert_eq!(r.y, 0.0);
    }

    #[test]
    fn invariants_hold_after_a_mixed_operation_sequence() {
        let mut m = model();
        for i in 0..50 {
            let f = f64::from(i);
            m.begin_drag(f * 7.0, f * 3.0);
            m.drag_to(f * 13.0 - 100.0, 500.0 - f * 9.0);
            m.end_drag();
            m.set_width(100.0 + f * 4.0);
            assert_in_bounds(&m);
            let r = m.region();
            assert!((r.width / r.height - 35.0 / 45.0).abs() < 1e-6);
        }
    }

    #[test]
    fn reset_recenters_after_new_image() {
        let mut m = model();
        m.begin_drag(m.region().x, m.region().y);
        m.drag_to(0.0, 0.0);
        m.reset(DisplaySize::new(800.0, 600.0));
        assert!(!m.is_dragging());
        let r = m.region();
        assert!((r.x - (800.0 - r.width) / 2.0).abs() < EPS);
        assert!((r.y - (600.0 - r.height) / 2.0).abs() < EPS);
    }

    #[test]
    fn to_natural_applies_per_axis_scale() {
        let m = model();
        // Natural image is twice the display size.
        let natural = m.to_natural(1280, 960);
        let display = m.region();
        assert!((natural.x - display.x * 2.0).abs() < EPS);
        assert!((natural.width - display.width * 2.0).abs() < EPS);
        assert!((natural.height - display.height * 2.0).abs() < EPS);
    }
}
