//! BMP-style plane extraction.
//!
//! Packs the components of a planar image into one flat buffer of
//! back-to-back planes, the layout a bitmap consumer interleaves from:
//!
//! ```text
//! [ plane 0: w*h samples ][ plane 1: w*h samples ] ... (at most 4 planes)
//! ```
//!
//! # Sample Packing
//!
//! | Precision | Bytes/sample | Clamp (signed) | Clamp (unsigned) |
//! |-----------|--------------|----------------|------------------|
//! | 1..=8 | 1 | -128..=127 | 0..=255 |
//! | 9..=16 | 2 (little-endian) | -32768..=32767 | 0..=65535 |
//! | 17..=32 | rejected | | |
//!
//! After clamping, each sample is masked with `(1 << precision) - 1`, so a
//! signed sample is stored as its low `precision` bits in two's complement.
//!
//! # Example
//!
//! ```rust
//! use planar_core::{ColorSpace, Component, ComponentParams, PlanarImage};
//! use planar_io::bmp;
//!
//! let comp = Component::from_samples(ComponentParams::unsigned8(2, 1), vec![-5, 300])?;
//! let image = PlanarImage::new(vec![comp], ColorSpace::Gray);
//! let planes = bmp::extract_planes(&image)?;
//! assert_eq!(planes.data, vec![0, 255]);
//! assert_eq!(planes.bits_per_sample, 8);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::error::alloc_bytes;
use crate::{ImageWriter, IoError, IoResult};
use byteorder::{ByteOrder, LittleEndian};
use planar_core::{check_homogeneous, Component, PlanarImage};
use tracing::debug;

/// Maximum number of planes written; further components are ignored.
pub const MAX_PLANES: usize = 4;

/// Flat buffer of packed component planes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Planes {
    /// Planes stored back to back, each `width * height * bytes_per_sample` bytes.
    pub data: Vec<u8>,
    /// Plane width in samples.
    pub width: u32,
    /// Plane height in samples.
    pub height: u32,
    /// Number of planes.
    pub channels: u32,
    /// Storage bits per sample: 8 or 16.
    pub bits_per_sample: u32,
}

impl Planes {
    /// Bytes used by one stored sample.
    #[inline]
    pub fn bytes_per_sample(&self) -> usize {
        (self.bits_per_sample / 8) as usize
    }

    /// Bytes used by one plane.
    #[inline]
    pub fn plane_len(&self) -> usize {
        self.width as usize * self.height as usize * self.bytes_per_sample()
    }

    /// Returns plane `index`.
    pub fn plane(&self, index: usize) -> Option<&[u8]> {
        if index >= self.channels as usize {
            return None;
        }
        let len = self.plane_len();
        self.data.get(index * len..(index + 1) * len)
    }
}

/// [`ImageWriter`] producing [`Planes`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaneExtractor;

impl PlaneExtractor {
    /// Creates a plane extractor.
    pub fn new() -> Self {
        Self
    }
}

impl ImageWriter for PlaneExtractor {
    type Output = Planes;

    fn write_to_memory(&self, image: &PlanarImage) -> IoResult<Planes> {
        extract_planes(image)
    }
}

/// Packs up to [`MAX_PLANES`] components into one flat buffer.
///
/// # Errors
///
/// - [`IoError::InvalidDimensions`] if `components * width * height == 0`
/// - [`IoError::Core`] with `ComponentMismatch` if the used components differ
///   in `dx`, `dy`, `precision` or `signed`
/// - [`IoError::DimensionMismatch`] if a used component is not the size of
///   component 0
/// - [`IoError::UnsupportedBitDepth`] for precision above 16
/// - [`IoError::AllocationFailed`] if the output cannot be allocated
pub fn extract_planes(image: &PlanarImage) -> IoResult<Planes> {
    let components = image.components();
    let (width, height) = components
        .first()
        .map(|c| (c.width(), c.height()))
        .unwrap_or((0, 0));

    if components.is_empty() || width == 0 || height == 0 {
        debug!(
            components = components.len(),
            width, height, "rejecting degenerate image for plane extraction"
        );
        return Err(IoError::invalid_dimensions(
            width,
            height,
            format!("degenerate image with {} components", components.len()),
        ));
    }

    let used = &components[..components.len().min(MAX_PLANES)];
    check_homogeneous(used)?;

    for (index, comp) in used.iter().enumerate().skip(1) {
        if comp.width() != width || comp.height() != height {
            return Err(IoError::DimensionMismatch {
                expected: format!("{}x{}", width, height),
                actual: format!("{}x{} (component {})", comp.width(), comp.height(), index),
            });
        }
    }

    let precision = used[0].precision();
    let bits_per_sample = match precision {
        1..=8 => 8,
        9..=16 => 16,
        _ => {
            debug!(precision, "rejecting precision above 16 bits");
            return Err(IoError::UnsupportedBitDepth(format!(
                "{} bits per component (max 16)",
                precision
            )));
        }
    };

    let plane_samples = width as usize * height as usize;
    let plane_len = plane_samples * (bits_per_sample / 8) as usize;
    let total = plane_len
        .checked_mul(used.len())
        .ok_or(IoError::AllocationFailed { requested: usize::MAX })?;
    let mut data = alloc_bytes(total)?;

    debug!(
        width,
        height,
        channels = used.len(),
        precision,
        bits_per_sample,
        "extracting planes"
    );

    for (comp, out) in used.iter().zip(data.chunks_exact_mut(plane_len)) {
        if bits_per_sample == 8 {
            pack_8bit(comp, out);
        } else {
            pack_16bit(comp, out);
        }
    }

    Ok(Planes {
        data,
        width,
        height,
        channels: used.len() as u32,
        bits_per_sample,
    })
}

fn pack_8bit(comp: &Component, out: &mut [u8]) {
    let mask = (1i32 << comp.precision()) - 1;
    let (lo, hi) = if comp.is_signed() { (-128, 127) } else { (0, 255) };
    for (dst, &sample) in out.iter_mut().zip(comp.samples()) {
        *dst = (sample.clamp(lo, hi) & mask) as u8;
    }
}

fn pack_16bit(comp: &Component, out: &mut [u8]) {
    let mask = (1i32 << comp.precision()) - 1;
    let (lo, hi) = if comp.is_signed() {
        (-32768, 32767)
    } else {
        (0, 65535)
    };
    for (dst, &sample) in out.chunks_exact_mut(2).zip(comp.samples()) {
        LittleEndian::write_u16(dst, (sample.clamp(lo, hi) & mask) as u16);
    }
}
