use std::collections::TryReserveError;

use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

/// Failure to produce a magnified copy of a buffer.
///
/// Both variants mean the requested output could not be allocated; the source
/// buffer is untouched and the caller keeps whatever it was displaying.
#[derive(Debug, Error)]
pub enum ResampleError {
    /// The output dimensions or byte length overflow the addressable range.
    #[error("magnifying {src_width}x{src_height} by {scale} overflows pixel dimensions")]
    ScaleOverflow {
        src_width: u32,
        src_height: u32,
        scale: f64,
    },
    /// The allocator refused the output buffer.
    #[error("failed to allocate {bytes} bytes for magnified buffer")]
    Allocation {
        bytes: usize,
        #[source]
        source: TryReserveError,
    },
}

// ============================================================================
// Utility Functions
// ============================================================================

/// Write ABGR pixel to slice (RGBA8888 little-endian byte order)
#[inline]
fn write_pixel(dest: &mut [u8], r: u8, g: u8, b: u8) {
    dest[0] = 255; // A
    dest[1] = b; // B
    dest[2] = g; // G
    dest[3] = r; // R
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// RGBA8888 pixel buffer for software rendering
/// Holds the captured screen, its magnified copy, and the composed frame
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Create a zeroed pixel buffer
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Build a buffer from tightly packed RGBA bytes (as screen captures
    /// deliver them), swizzling into the internal ABGR byte order.
    /// Alpha is forced opaque; capture alpha channels are unreliable.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Self {
        let mut buffer = Self::with_size(width, height);
        for (dest, src) in buffer.pixels.chunks_exact_mut(4).zip(rgba.chunks_exact(4)) {
            dest[0] = 255; // A
            dest[1] = src[2]; // B
            dest[2] = src[1]; // G
            dest[3] = src[0]; // R
        }
        buffer
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check if coordinates are within bounds
    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Calculate byte offset for pixel at (x, y)
    /// Widened before multiplying: buffers past 4 GiB overflow u32 byte math
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Clear to a solid color
    /// Optimized: uses u32 fill for maximum speed
    pub fn clear(&mut self, r: u8, g: u8, b: u8) {
        // Create ABGR u32 pattern
        let pixel = u32::from_ne_bytes([255, b, g, r]);

        // Safety: pixels.len() is always divisible by 4 (width * height * 4).
        // We use write_unaligned to avoid assuming alignment of Vec<u8>.
        let ptr = self.pixels.as_mut_ptr() as *mut u32;
        let len = self.pixels.len() / 4;

        // Fill using u32 writes (4x faster than byte-by-byte)
        for i in 0..len {
            // Safety: i < len ensures we stay within bounds, and we use
            // write_unaligned for portability across platforms with different
            // alignment requirements.
            unsafe {
                ptr.add(i).write_unaligned(pixel);
            }
        }
    }

    /// Set a single pixel (bounds checked)
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            write_pixel(&mut self.pixels[idx..idx + 4], r, g, b);
        }
    }

    /// Read a pixel from the buffer (bounds checked)
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<(u8, u8, u8)> {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            Some((
                self.pixels[idx + 3], // R
                self.pixels[idx + 2], // G
                self.pixels[idx + 1], // B
            ))
        } else {
            None
        }
    }

    // ========================================================================
    // Buffer Operations
    // ========================================================================

    /// Copy a region of `src` starting at (src_x, src_y) into this buffer's
    /// top-left corner. The copied area is the intersection of both buffers;
    /// anything outside it keeps its current contents.
    /// Optimized: whole rows move with copy_from_slice.
    pub fn copy_region(&mut self, src: &PixelBuffer, src_x: u32, src_y: u32) {
        let copy_w = self.width.min(src.width.saturating_sub(src_x));
        let copy_h = self.height.min(src.height.saturating_sub(src_y));
        if copy_w == 0 {
            return;
        }

        let row_bytes = copy_w as usize * 4;
        for row in 0..copy_h {
            let src_start = src.pixel_index(src_x, src_y + row);
            let dst_start = self.pixel_index(0, row);
            self.pixels[dst_start..dst_start + row_bytes]
                .copy_from_slice(&src.pixels[src_start..src_start + row_bytes]);
        }
    }

    /// Create a nearest-neighbor magnified copy of this buffer.
    ///
    /// Output dimensions are floor(width * scale) x floor(height * scale);
    /// each output pixel copies the source pixel at (x / scale, y / scale)
    /// truncated. The division per coordinate is deliberate: multiplying by a
    /// precomputed reciprocal shifts truncation boundaries (3.0 * (1.0 / 3.0)
    /// lands just below 1.0) and reads off-by-one source pixels.
    ///
    /// Allocation is fallible so an oversized zoom step reports
    /// `ResampleError` instead of aborting the process.
    pub fn resampled(&self, scale: f64) -> Result<Self, ResampleError> {
        let overflow = || ResampleError::ScaleOverflow {
            src_width: self.width,
            src_height: self.height,
            scale,
        };

        let w = self.width as f64 * scale;
        let h = self.height as f64 * scale;
        if !w.is_finite() || !h.is_finite() || w >= u32::MAX as f64 || h >= u32::MAX as f64 {
            return Err(overflow());
        }
        let out_w = w as u32;
        let out_h = h as u32;

        let bytes = (out_w as usize)
            .checked_mul(out_h as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(overflow)?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(bytes)
            .map_err(|source| ResampleError::Allocation { bytes, source })?;
        pixels.resize(bytes, 0);

        let mut magnified = Self {
            pixels,
            width: out_w,
            height: out_h,
        };

        // Source byte column per destination column; the mapping is identical
        // on every row, so the division happens once per column.
        let mut columns = Vec::new();
        columns
            .try_reserve_exact(out_w as usize)
            .map_err(|source| ResampleError::Allocation {
                bytes: out_w as usize * std::mem::size_of::<usize>(),
                source,
            })?;
        for x in 0..out_w {
            columns.push((x as f64 / scale) as usize * 4);
        }

        for y in 0..out_h {
            let src_y = (y as f64 / scale) as u32;
            let src_row = self.pixel_index(0, src_y);
            let mut dst_idx = magnified.pixel_index(0, y);
            for &src_col in &columns {
                let src_idx = src_row + src_col;
                magnified.pixels[dst_idx..dst_idx + 4]
                    .copy_from_slice(&self.pixels[src_idx..src_idx + 4]);
                dst_idx += 4;
            }
        }

        Ok(magnified)
    }

    /// Raw bytes for SDL texture upload
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }
}

// ============================================================================
// Tests
// ============================================================================
