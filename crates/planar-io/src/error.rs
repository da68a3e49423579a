//! Error types for conversion operations.
//!
//! Every conversion reports failure through [`IoError`]. Validation failures
//! are detected before any output buffer is allocated, so an `Err` never
//! comes with partial output.

use thiserror::Error;

/// Conversion error.
#[derive(Debug, Error)]
pub enum IoError {
    /// The planar image failed a model-level check (heterogeneous
    /// components, bad precision, sub-sampling, ...).
    #[error(transparent)]
    Core(#[from] planar_core::Error),

    /// Unsupported container variant (compressed or palettized TGA).
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Unsupported bit depth.
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(String),

    /// Unsupported number of components or channels.
    #[error("unsupported channel count: {0}")]
    UnsupportedChannels(usize),

    /// Zero-sized or oversized image.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Width
        width: u32,
        /// Height
        height: u32,
        /// Why the dimensions were rejected
        reason: String,
    },

    /// Component sizes disagree.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected size.
        expected: String,
        /// Actual size.
        actual: String,
    },

    /// Invalid, truncated or corrupted input buffer.
    #[error("invalid file: {0}")]
    InvalidFile(String),

    /// Header or raster could not be encoded.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Output buffer allocation failed.
    #[error("failed to allocate {requested} bytes")]
    AllocationFailed {
        /// Bytes requested
        requested: usize,
    },
}

impl IoError {
    /// Creates an [`IoError::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Returns `true` if the input was rejected before any work was done.
    ///
    /// Everything except allocation failure is a validation failure.
    pub fn is_validation(&self) -> bool {
        match self {
            Self::AllocationFailed { .. } => false,
            Self::Core(e) => !e.is_allocation_error(),
            _ => true,
        }
    }
}

/// Result type for conversion operations.
pub type IoResult<T> = Result<T, IoError>;

/// Allocates a zeroed byte buffer, reporting failure instead of aborting.
pub(crate) fn alloc_bytes(len: usize) -> IoResult<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| IoError::AllocationFailed { requested: len })?;
    buf.resize(len, 0);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_is_transparent() {
        let core = planar_core::Error::ComponentMismatch {
            index: 1,
            property: "dx",
        };
        let err: IoError = core.into();
        assert_eq!(err.to_string(), "component 1 differs from component 0 in dx");
        assert!(err.is_validation());
    }

    #[test]
    fn test_allocation_is_not_validation() {
        assert!(!IoError::AllocationFailed { requested: 1 }.is_validation());
        assert!(IoError::UnsupportedChannels(5).is_validation());
    }

    #[test]
    fn test_alloc_bytes_zeroed() {
        let buf = alloc_bytes(16).unwrap();
        assert_eq!(buf.len(), 16);
        assert!(buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_alloc_bytes_reports_failure() {
        assert!(matches!(
            alloc_bytes(usize::MAX),
            Err(IoError::AllocationFailed { requested: usize::MAX })
        ));
    }
}
