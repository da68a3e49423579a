//! Reference grid placement.
//!
//! A planar image lives on a reference grid `[x0, x1) x [y0, y1)`. When a
//! decoder builds a new image from a raster it only knows the raster size, so
//! the caller supplies the image offset and the sub-sampling factors through
//! [`GridOptions`]. The grid extent then follows from
//!
//! ```text
//! x1 = x0 + (width  - 1) * dx + 1
//! y1 = y0 + (height - 1) * dy + 1
//! ```

use crate::{Error, Result};

/// Caller-supplied placement of a decoded image on the reference grid.
///
/// # Example
///
/// ```rust
/// use planar_core::GridOptions;
///
/// let grid = GridOptions::default().with_subsampling(2, 2).with_offset(10, 0);
/// assert_eq!(grid.extent(4, 3)?, (10, 0, 17, 5));
/// # Ok::<(), planar_core::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOptions {
    /// Horizontal sub-sampling factor applied to every component. Default: 1.
    pub subsampling_dx: u32,
    /// Vertical sub-sampling factor applied to every component. Default: 1.
    pub subsampling_dy: u32,
    /// Horizontal image offset on the reference grid. Default: 0.
    pub image_offset_x0: u32,
    /// Vertical image offset on the reference grid. Default: 0.
    pub image_offset_y0: u32,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            subsampling_dx: 1,
            subsampling_dy: 1,
            image_offset_x0: 0,
            image_offset_y0: 0,
        }
    }
}

impl GridOptions {
    /// Sets the sub-sampling factors.
    pub fn with_subsampling(mut self, dx: u32, dy: u32) -> Self {
        self.subsampling_dx = dx;
        self.subsampling_dy = dy;
        self
    }

    /// Sets the image offset.
    pub fn with_offset(mut self, x0: u32, y0: u32) -> Self {
        self.image_offset_x0 = x0;
        self.image_offset_y0 = y0;
        self
    }

    /// Rejects zero sub-sampling factors.
    pub fn validate(&self) -> Result<()> {
        if self.subsampling_dx == 0 || self.subsampling_dy == 0 {
            return Err(Error::InvalidSubsampling {
                dx: self.subsampling_dx,
                dy: self.subsampling_dy,
            });
        }
        Ok(())
    }

    /// Computes `(x0, y0, x1, y1)` for a `width x height` image.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidSubsampling`] for zero factors
    /// - [`Error::InvalidDimensions`] for a zero dimension or a grid that
    ///   overflows `u32`
    pub fn extent(&self, width: u32, height: u32) -> Result<(u32, u32, u32, u32)> {
        self.validate()?;
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(width, height, "zero dimension"));
        }
        let span = |offset: u32, size: u32, factor: u32| {
            (size - 1)
                .checked_mul(factor)
                .and_then(|v| v.checked_add(1))
                .and_then(|v| v.checked_add(offset))
        };
        let x1 = span(self.image_offset_x0, width, self.subsampling_dx);
        let y1 = span(self.image_offset_y0, height, self.subsampling_dy);
        match (x1, y1) {
            (Some(x1), Some(y1)) => Ok((self.image_offset_x0, self.image_offset_y0, x1, y1)),
            _ => Err(Error::invalid_dimensions(
                width,
                height,
                "reference grid overflows u32",
            )),
        }
    }
}
