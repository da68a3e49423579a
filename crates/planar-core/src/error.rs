//! Error types for planar-core operations.
//!
//! Every constructor in this crate validates its input and reports problems
//! through [`Error`] instead of panicking, so a malformed component
//! description never reaches the conversion code in `planar-io`.
//!
//! # Usage
//!
//! ```rust
//! use planar_core::{Error, Result};
//!
//! fn check_precision(bits: u32) -> Result<()> {
//!     if bits == 0 || bits > 32 {
//!         return Err(Error::InvalidPrecision(bits));
//!     }
//!     Ok(())
//! }
//! assert!(check_precision(0).is_err());
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while building or validating a planar image.
///
/// # Categories
///
/// - **Component errors**: [`InvalidPrecision`](Error::InvalidPrecision),
///   [`InvalidSubsampling`](Error::InvalidSubsampling),
///   [`SampleCountMismatch`](Error::SampleCountMismatch)
/// - **Image errors**: [`ComponentMismatch`](Error::ComponentMismatch),
///   [`InvalidDimensions`](Error::InvalidDimensions)
/// - **Access errors**: [`OutOfBounds`](Error::OutOfBounds)
/// - **Allocation errors**: [`AllocationFailed`](Error::AllocationFailed)
#[derive(Debug, Error)]
pub enum Error {
    /// Precision outside `1..=32` bits.
    #[error("invalid precision: {0} bits (expected 1..=32)")]
    InvalidPrecision(u32),

    /// A sub-sampling factor of zero.
    #[error("invalid sub-sampling factors: dx={dx}, dy={dy}")]
    InvalidSubsampling {
        /// Horizontal factor
        dx: u32,
        /// Vertical factor
        dy: u32,
    },

    /// Width or height unusable for the requested operation.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Why the dimensions were rejected
        reason: String,
    },

    /// Sample buffer length does not match `width * height`.
    #[error("sample count mismatch: expected {expected}, got {actual}")]
    SampleCountMismatch {
        /// Expected sample count
        expected: usize,
        /// Provided sample count
        actual: usize,
    },

    /// A component differs from component 0 in a property that must be shared.
    ///
    /// `property` is one of `"dx"`, `"dy"`, `"precision"` or `"signed"`.
    #[error("component {index} differs from component 0 in {property}")]
    ComponentMismatch {
        /// Index of the first mismatching component
        index: usize,
        /// Name of the differing property
        property: &'static str,
    },

    /// Sample coordinates outside the component.
    #[error("sample ({x}, {y}) out of bounds for component {width}x{height}")]
    OutOfBounds {
        /// X coordinate
        x: u32,
        /// Y coordinate
        y: u32,
        /// Component width
        width: u32,
        /// Component height
        height: u32,
    },

    /// Memory allocation failed.
    #[error("failed to allocate {requested} bytes: {reason}")]
    AllocationFailed {
        /// Bytes requested
        requested: usize,
        /// Failure reason
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::AllocationFailed`] error.
    #[inline]
    pub fn allocation_failed(requested: usize, reason: impl Into<String>) -> Self {
        Self::AllocationFailed {
            requested,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns `true` if this error reports heterogeneous components.
    #[inline]
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::ComponentMismatch { .. })
    }

    /// Returns `true` if this is an allocation error.
    #[inline]
    pub fn is_allocation_error(&self) -> bool {
        matches!(self, Self::AllocationFailed { .. })
    }
}
