//! Image components.
//!
//! A [`Component`] is one channel plane (R, G, B, luminance or alpha) of a
//! [`PlanarImage`](crate::PlanarImage). Each component carries its own bit
//! precision, signedness and sub-sampling factors, and stores its samples as
//! dense row-major `i32` values regardless of precision:
//!
//! ```text
//! samples: [s(0,0) s(1,0) ... s(w-1,0)]   <- row 0
//!          [s(0,1) s(1,1) ... s(w-1,1)]   <- row 1
//!          ...
//! ```
//!
//! Samples are not range-checked against the precision. Conversions clamp
//! out-of-range values when they emit a raster.

use crate::{Error, Result};

/// Largest supported component precision in bits.
pub const MAX_PRECISION: u32 = 32;

/// Parameters describing a component before its samples exist.
///
/// # Example
///
/// ```rust
/// use planar_core::ComponentParams;
///
/// let params = ComponentParams::new(64, 32, 12, true).with_subsampling(2, 2);
/// assert_eq!(params.dx, 2);
/// assert_eq!(params.sample_count(), Some(64 * 32));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentParams {
    /// Width in samples
    pub width: u32,
    /// Height in samples
    pub height: u32,
    /// Bits per sample (1..=32)
    pub precision: u32,
    /// Whether samples are two's complement signed
    pub signed: bool,
    /// Horizontal sub-sampling factor
    pub dx: u32,
    /// Vertical sub-sampling factor
    pub dy: u32,
}

impl ComponentParams {
    /// Creates parameters with sub-sampling factors of 1.
    pub fn new(width: u32, height: u32, precision: u32, signed: bool) -> Self {
        Self {
            width,
            height,
            precision,
            signed,
            dx: 1,
            dy: 1,
        }
    }

    /// Unsigned 8-bit parameters, the layout produced by raster decoders.
    pub fn unsigned8(width: u32, height: u32) -> Self {
        Self::new(width, height, 8, false)
    }

    /// Sets the sub-sampling factors.
    pub fn with_subsampling(mut self, dx: u32, dy: u32) -> Self {
        self.dx = dx;
        self.dy = dy;
        self
    }

    /// Returns `width * height`, or `None` on overflow.
    pub fn sample_count(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }

    fn validate(&self) -> Result<usize> {
        if self.precision == 0 || self.precision > MAX_PRECISION {
            return Err(Error::InvalidPrecision(self.precision));
        }
        if self.dx == 0 || self.dy == 0 {
            return Err(Error::InvalidSubsampling {
                dx: self.dx,
                dy: self.dy,
            });
        }
        self.sample_count().ok_or_else(|| {
            Error::invalid_dimensions(self.width, self.height, "sample count overflows usize")
        })
    }
}

/// One channel plane of a planar image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    width: u32,
    height: u32,
    precision: u32,
    signed: bool,
    dx: u32,
    dy: u32,
    data: Vec<i32>,
}

impl Component {
    /// Creates a zero-filled component.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPrecision`] if precision is outside `1..=32`
    /// - [`Error::InvalidSubsampling`] if `dx` or `dy` is zero
    /// - [`Error::AllocationFailed`] if the sample buffer cannot be allocated
    pub fn new(params: ComponentParams) -> Result<Self> {
        let count = params.validate()?;
        let mut data = Vec::new();
        data.try_reserve_exact(count).map_err(|e| {
            Error::allocation_failed(count.saturating_mul(size_of::<i32>()), e.to_string())
        })?;
        data.resize(count, 0);
        Ok(Self::from_parts(params, data))
    }

    /// Creates a component from existing samples.
    ///
    /// # Errors
    ///
    /// Same as [`Component::new`], plus [`Error::SampleCountMismatch`] if
    /// `data.len() != width * height`.
    pub fn from_samples(params: ComponentParams, data: Vec<i32>) -> Result<Self> {
        let count = params.validate()?;
        if data.len() != count {
            return Err(Error::SampleCountMismatch {
                expected: count,
                actual: data.len(),
            });
        }
        Ok(Self::from_parts(params, data))
    }

    fn from_parts(params: ComponentParams, data: Vec<i32>) -> Self {
        Self {
            width: params.width,
            height: params.height,
            precision: params.precision,
            signed: params.signed,
            dx: params.dx,
            dy: params.dy,
            data,
        }
    }

    /// Width in samples.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in samples.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bits per sample.
    #[inline]
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Whether samples are signed.
    #[inline]
    pub fn is_signed(&self) -> bool {
        self.signed
    }

    /// Horizontal sub-sampling factor.
    #[inline]
    pub fn dx(&self) -> u32 {
        self.dx
    }

    /// Vertical sub-sampling factor.
    #[inline]
    pub fn dy(&self) -> u32 {
        self.dy
    }

    /// Returns the parameters this component was built from.
    pub fn params(&self) -> ComponentParams {
        ComponentParams {
            width: self.width,
            height: self.height,
            precision: self.precision,
            signed: self.signed,
            dx: self.dx,
            dy: self.dy,
        }
    }

    /// Row-major samples.
    #[inline]
    pub fn samples(&self) -> &[i32] {
        &self.data
    }

    /// Mutable row-major samples.
    #[inline]
    pub fn samples_mut(&mut self) -> &mut [i32] {
        &mut self.data
    }

    /// Returns the sample at `(x, y)`, or `None` if out of bounds.
    #[inline]
    pub fn sample(&self, x: u32, y: u32) -> Option<i32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Sets the sample at `(x, y)`.
    pub fn set_sample(&mut self, x: u32, y: u32, value: i32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.data[idx] = value;
        Ok(())
    }

    /// Largest unsigned code value, `2^precision - 1`.
    #[inline]
    pub fn max_value(&self) -> u64 {
        (1u64 << self.precision) - 1
    }

    /// Offset that maps a signed sample onto `0..2^precision`.
    ///
    /// `2^(precision - 1)` for signed components, 0 otherwise.
    #[inline]
    pub fn sign_bias(&self) -> i64 {
        if self.signed {
            1i64 << (self.precision - 1)
        } else {
            0
        }
    }
}

/// Checks that every component matches component 0 in `dx`, `dy`,
/// `precision` and `signed`.
///
/// An empty or single-component slice is homogeneous.
///
/// # Errors
///
/// [`Error::ComponentMismatch`] naming the first differing component and
/// property.
///
/// # Example
///
/// ```rust
/// use planar_core::{check_homogeneous, Component, ComponentParams};
///
/// let a = Component::new(ComponentParams::new(4, 4, 8, false))?;
/// let b = Component::new(ComponentParams::new(4, 4, 8, true))?;
/// let err = check_homogeneous(&[a, b]).unwrap_err();
/// assert!(err.to_string().contains("signed"));
/// # Ok::<(), planar_core::Error>(())
/// ```
pub fn check_homogeneous(components: &[Component]) -> Result<()> {
    let Some(first) = components.first() else {
        return Ok(());
    };
    for (index, comp) in components.iter().enumerate().skip(1) {
        let property = if comp.dx != first.dx {
            "dx"
        } else if comp.dy != first.dy {
            "dy"
        } else if comp.precision != first.precision {
            "precision"
        } else if comp.signed != first.signed {
            "signed"
        } else {
            continue;
        };
        return Err(Error::ComponentMismatch { index, property });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zero_filled() {
        let comp = Component::new(ComponentParams::new(3, 2, 10, false)).unwrap();
        assert_eq!(comp.samples().len(), 6);
        assert!(comp.samples().iter().all(|&s| s == 0));
        assert_eq!(comp.max_value(), 1023);
        assert_eq!(comp.sign_bias(), 0);
    }

    #[test]
    fn test_params_roundtrip() {
        let params = ComponentParams::new(5, 3, 12, true).with_subsampling(2, 4);
        let comp = Component::new(params).unwrap();
        assert_eq!(comp.params(), params);
        let copy = Component::new(comp.params()).unwrap();
        assert_eq!(copy, comp);
    }

    #[test]
    fn test_precision_bounds() {
        assert!(matches!(
            Component::new(ComponentParams::new(1, 1, 0, false)),
            Err(Error::InvalidPrecision(0))
        ));
        assert!(matches!(
            Component::new(ComponentParams::new(1, 1, 33, false)),
            Err(Error::InvalidPrecision(33))
        ));
        let wide = Component::new(ComponentParams::new(1, 1, 32, true)).unwrap();
        assert_eq!(wide.max_value(), u32::MAX as u64);
        assert_eq!(wide.sign_bias(), 1i64 << 31);
    }

    #[test]
    fn test_zero_subsampling_rejected() {
        let params = ComponentParams::unsigned8(2, 2).with_subsampling(0, 1);
        assert!(matches!(
            Component::new(params),
            Err(Error::InvalidSubsampling { dx: 0, dy: 1 })
        ));
    }

    #[test]
    fn test_from_samples_length_checked() {
        let params = ComponentParams::unsigned8(2, 2);
        let err = Component::from_samples(params, vec![1, 2, 3]).unwrap_err();
        assert!(matches!(
            err,
            Error::SampleCountMismatch {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_sample_access() {
        let params = ComponentParams::new(2, 2, 8, true);
        let mut comp = Component::from_samples(params, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(comp.sample(1, 1), Some(4));
        assert_eq!(comp.sample(2, 0), None);
        comp.set_sample(0, 1, -7).unwrap();
        assert_eq!(comp.samples(), &[1, 2, -7, 4]);
        assert!(comp.set_sample(0, 2, 0).is_err());
        assert_eq!(comp.sign_bias(), 128);
    }

    #[test]
    fn test_homogeneous() {
        let base = ComponentParams::unsigned8(4, 4);
        let comps: Vec<_> = (0..3).map(|_| Component::new(base).unwrap()).collect();
        assert!(check_homogeneous(&comps).is_ok());
        assert!(check_homogeneous(&[]).is_ok());
    }

    #[test]
    fn test_first_mismatch_reported() {
        let base = ComponentParams::unsigned8(4, 4);
        let comps = vec![
            Component::new(base).unwrap(),
            Component::new(base).unwrap(),
            Component::new(base.with_subsampling(1, 2)).unwrap(),
            Component::new(ComponentParams { precision: 12, ..base }).unwrap(),
        ];
        let err = check_homogeneous(&comps).unwrap_err();
        assert!(matches!(
            err,
            Error::ComponentMismatch {
                index: 2,
                property: "dy"
            }
        ));
    }
}
