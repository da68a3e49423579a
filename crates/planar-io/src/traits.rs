//! Reader and writer traits.
//!
//! These traits define the interface for format-specific conversions. All of
//! them work on in-memory buffers; the caller owns reading and writing files.

use crate::IoResult;
use planar_core::PlanarImage;

/// Builds a planar image from an encoded buffer.
///
/// # Example
///
/// ```rust,ignore
/// use planar_io::{ImageReader, tga::TgaReader};
///
/// let image = TgaReader::new().read_from_memory(&bytes)?;
/// println!("{} components", image.num_components());
/// ```
pub trait ImageReader {
    /// Decodes `data` into a new planar image.
    fn read_from_memory(&self, data: &[u8]) -> IoResult<PlanarImage>;
}

/// Converts a planar image into an owned output value.
///
/// The output carries the buffer together with the metadata a consumer needs
/// to interpret it (dimensions, channel count, depth).
pub trait ImageWriter {
    /// Output produced by this writer.
    type Output;

    /// Converts `image`. No partial output is produced on error.
    fn write_to_memory(&self, image: &PlanarImage) -> IoResult<Self::Output>;
}
