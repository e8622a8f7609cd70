//! Magnifier state and operations.
//!
//! Owns the captured snapshot, the magnified copy at the current scale, and
//! the viewport. The main loop translates commands into calls here; this
//! module does no I/O and no logging.

use crate::config::Config;
use crate::display::{PixelBuffer, ResampleError};
use crate::input::{Direction, FAST_PAN_MULTIPLIER};
use crate::view::{self, Viewport};

/// Which window point stays over the same content during a zoom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    WindowCenter,
    Pointer,
}

/// Everything the dispatcher mutates between renders
pub struct Magnifier {
    captured: PixelBuffer,
    magnified: PixelBuffer,
    scale: f64,
    viewport: Viewport,
    max_scale: f64,
    scale_increment: f64,
    pan_increment: i32,
}

impl Magnifier {
    /// Build the initial state: one resample of the capture at the
    /// configured default scale.
    pub fn new(captured: PixelBuffer, config: &Config) -> Result<Self, ResampleError> {
        let scale = config.default_scale;
        let magnified = captured.resampled(scale)?;
        Ok(Self {
            captured,
            magnified,
            scale,
            viewport: Viewport::default(),
            max_scale: config.max_scale,
            scale_increment: config.scale_increment,
            pan_increment: config.pan_increment,
        })
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Dimensions of the current magnified image
    pub fn image_size(&self) -> (u32, u32) {
        (self.magnified.width(), self.magnified.height())
    }

    /// Startup positioning: the viewport has never been placed, so recenter
    /// from the neutral prior scale 1.0.
    pub fn recenter_initial(&mut self, focal: (i32, i32), window: (u32, u32)) {
        self.viewport = view::recenter(self.viewport, 1.0, self.scale, focal, window);
    }

    /// Step the scale up by one increment, clamped to the maximum.
    /// Returns Ok(false) when the clamp leaves the scale unchanged and the
    /// whole pipeline is skipped.
    pub fn zoom_in(
        &mut self,
        focal: (i32, i32),
        window: (u32, u32),
    ) -> Result<bool, ResampleError> {
        let next = (self.scale + self.scale_increment).min(self.max_scale);
        self.rescale(next, focal, window)
    }

    /// Step the scale down by one increment, floored at 1.0
    pub fn zoom_out(
        &mut self,
        focal: (i32, i32),
        window: (u32, u32),
    ) -> Result<bool, ResampleError> {
        let next = (self.scale - self.scale_increment).max(1.0);
        self.rescale(next, focal, window)
    }

    /// Regenerate the magnified buffer at `new_scale` and recenter on
    /// `focal`. On resample failure nothing changes: the previous scale,
    /// buffer, and viewport all stay in place and keep rendering.
    fn rescale(
        &mut self,
        new_scale: f64,
        focal: (i32, i32),
        window: (u32, u32),
    ) -> Result<bool, ResampleError> {
        if new_scale == self.scale {
            return Ok(false);
        }

        let magnified = self.captured.resampled(new_scale)?;
        self.viewport = view::recenter(self.viewport, self.scale, new_scale, focal, window);
        // Move assignment releases the previous magnified buffer here
        self.magnified = magnified;
        self.scale = new_scale;
        Ok(true)
    }

    /// Shift the viewport by one pan step; the clamp on the next render
    /// corrects any overshoot.
    pub fn pan(&mut self, direction: Direction, fast: bool) {
        // normalized() caps the configured step, but the multiply must not
        // wrap for a step that skipped normalization
        let step = if fast {
            self.pan_increment.saturating_mul(FAST_PAN_MULTIPLIER)
        } else {
            self.pan_increment
        };
        let (dx, dy) = direction.step();
        self.viewport.pan(dx * step, dy * step);
    }

    /// Clamp the stored viewport against current geometry, then compose the
    /// visible sub-rectangle onto `frame` starting at its top-left corner.
    /// Frame area the image does not cover goes black.
    pub fn render_into(&mut self, frame: &mut PixelBuffer) {
        let window = (frame.width(), frame.height());
        let image = (self.magnified.width(), self.magnified.height());
        self.viewport = view::clamp_to_window(self.viewport, image, window);

        frame.clear(0, 0, 0);
        frame.copy_region(
            &self.magnified,
            self.viewport.left as u32,
            self.viewport.top as u32,
        );
    }
}

// ============================================================================
// Tests
// ============================================================================
