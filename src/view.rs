//! Pure viewport arithmetic: where in the magnified image the window looks.
//!
//! Two operations, composed by the caller. `recenter` reacts to a scale
//! change by keeping a chosen focal point over the same image content, and
//! `clamp_to_window` corrects the offset against image/window geometry right
//! before a render. Neither touches pixels and neither calls the other.

/// Magnified-image coordinate currently aligned with the window's top-left
/// corner. Pan steps and recentering mutate it; clamping corrects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub left: i32,
    pub top: i32,
}

impl Viewport {
    pub fn new(left: i32, top: i32) -> Self {
        Self { left, top }
    }

    /// Shift by a pan step. May leave the offset out of range; the clamp on
    /// the following render corrects it. Steps accumulate between renders,
    /// so the offset saturates at the i32 limits instead of wrapping.
    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.left = self.left.saturating_add(dx);
        self.top = self.top.saturating_add(dy);
    }
}

/// Recompute the viewport after a scale change so the focal point (a
/// window-relative position) stays over the image content it was on.
///
/// The stored corner first rescales by `new_scale / old_scale`, then the
/// image coordinate under the focal point moves to the window's center.
/// Each step truncates toward zero, and the half-window subtraction happens
/// in f64, so odd window sizes shave the half pixel before truncation.
/// `old_scale` is never zero; the startup call passes 1.0 as the neutral
/// prior. No clamping happens here.
pub fn recenter(
    viewport: Viewport,
    old_scale: f64,
    new_scale: f64,
    focal: (i32, i32),
    window: (u32, u32),
) -> Viewport {
    let delta = new_scale / old_scale;

    // Rescale the stored corner into new-scale image coordinates
    let left = (viewport.left as f64 * delta) as i32;
    let top = (viewport.top as f64 * delta) as i32;

    // Image coordinate sitting under the focal point after the rescale
    let center_x = (left as f64 + focal.0 as f64 * delta) as i32;
    let center_y = (top as f64 + focal.1 as f64 * delta) as i32;

    // Put that coordinate at the window's own center
    Viewport {
        left: (center_x as f64 - window.0 as f64 / 2.0) as i32,
        top: (center_y as f64 - window.1 as f64 / 2.0) as i32,
    }
}

/// Correct the viewport so the image covers the window wherever it can.
///
/// The right/bottom edge rules run first: an edge of the image falling
/// inside the window moves the offset back by the (negative) encroachment.
/// The zero lower bound runs after them, so for an image smaller than the
/// window the edge rule overshoots negative and the lower bound lands the
/// image in the window's top-left corner with a gap on the right/bottom.
/// That ordering is load-bearing and pinned by tests.
pub fn clamp_to_window(viewport: Viewport, image: (u32, u32), window: (u32, u32)) -> Viewport {
    let mut left = viewport.left;
    let mut top = viewport.top;

    let right_encroachment = (image.0 as i32 - left) - window.0 as i32;
    if right_encroachment < 0 {
        left += right_encroachment;
    }
    let bottom_encroachment = (image.1 as i32 - top) - window.1 as i32;
    if bottom_encroachment < 0 {
        top += bottom_encroachment;
    }

    if top < 0 {
        top = 0;
    }
    if left < 0 {
        left = 0;
    }

    Viewport { left, top }
}

// ============================================================================
// Tests
// ============================================================================
