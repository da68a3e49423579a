//! Uncompressed true-color TGA encode/decode.
//!
//! Converts between a [`PlanarImage`] and an in-memory TGA stream with
//! interleaved BGR or BGRA pixels (image type 2).
//!
//! # Encoding
//!
//! | Components | Pixel depth | Pixel bytes |
//! |------------|-------------|-------------|
//! | 1 (Y) | 24 | Y, Y, Y |
//! | 2 (Y, A) | 32 | Y, Y, Y, A |
//! | 3 (R, G, B) | 24 | B, G, R |
//! | 4 (R, G, B, A) | 32 | B, G, R, A |
//! | 5 or more | 24 | B, G, R from components 0..3 |
//!
//! Samples are rescaled to 8 bits with component 0's precision:
//!
//! ```text
//! out = clamp((sample + bias) * 255 / (2^precision - 1), 0, 255)
//! bias = 2^(precision - 1) for signed components, else 0
//! ```
//!
//! # Decoding
//!
//! Only 24 and 32-bit streams are accepted; they decode to 3 or 4 unsigned
//! 8-bit components in R, G, B[, A] order with an sRGB color space. The
//! id field and color map are skipped, compressed types are rejected.
//!
//! # Example
//!
//! ```rust
//! use planar_core::{ColorSpace, ComponentParams, GridOptions, PlanarImage};
//! use planar_io::tga;
//!
//! let image = PlanarImage::from_params(&[ComponentParams::unsigned8(2, 2); 3], ColorSpace::Srgb)?;
//! let encoded = tga::encode(&image)?;
//! assert_eq!(encoded.data.len(), 18 + 2 * 2 * 3);
//!
//! let decoded = tga::decode(&encoded.data, &GridOptions::default())?;
//! assert_eq!(decoded.num_components(), 3);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod header;

pub use header::{read_header, write_header, HeaderInfo, TgaHeader, TGA_HEADER_SIZE};

use crate::error::alloc_bytes;
use crate::{ImageReader, ImageWriter, IoError, IoResult};
use planar_core::{
    check_homogeneous, ColorSpace, Component, ComponentParams, GridOptions, PlanarImage,
};
use tracing::debug;

/// Highest component precision the encoder rescales.
const MAX_ENCODE_PRECISION: u32 = 16;

/// Pixel byte holding each decoded component (R, G, B, A).
const BYTE_OF_COMPONENT: [usize; 4] = [2, 1, 0, 3];

/// Encoded TGA stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TgaImage {
    /// Header followed by pixel data.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Number of components of the source image.
    pub channels: u32,
}

impl TgaImage {
    /// Pixel data past the header.
    pub fn pixels(&self) -> &[u8] {
        self.data.get(TGA_HEADER_SIZE..).unwrap_or(&[])
    }
}

/// Options for encoding TGA streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TgaWriterOptions {
    /// Declare a top-left origin and store rows top to bottom. When false the
    /// origin is bottom-left and rows are stored bottom to top. Default: true.
    pub flip_image: bool,
}

impl Default for TgaWriterOptions {
    fn default() -> Self {
        Self { flip_image: true }
    }
}

/// TGA encoder.
#[derive(Debug, Clone, Default)]
pub struct TgaWriter {
    options: TgaWriterOptions,
}

impl TgaWriter {
    /// Creates a TGA writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a TGA writer with the given options.
    pub fn with_options(options: TgaWriterOptions) -> Self {
        Self { options }
    }
}

impl ImageWriter for TgaWriter {
    type Output = TgaImage;

    fn write_to_memory(&self, image: &PlanarImage) -> IoResult<TgaImage> {
        encode_with(image, &self.options)
    }
}

/// TGA decoder.
#[derive(Debug, Clone, Default)]
pub struct TgaReader {
    options: GridOptions,
}

impl TgaReader {
    /// Creates a TGA reader that places images at the grid origin with no
    /// sub-sampling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a TGA reader with the given grid placement.
    pub fn with_options(options: GridOptions) -> Self {
        Self { options }
    }
}

impl ImageReader for TgaReader {
    fn read_from_memory(&self, data: &[u8]) -> IoResult<PlanarImage> {
        decode(data, &self.options)
    }
}

/// Encodes `image` with default options.
///
/// See [`encode_with`].
pub fn encode(image: &PlanarImage) -> IoResult<TgaImage> {
    encode_with(image, &TgaWriterOptions::default())
}

/// Encodes `image` as an uncompressed true-color TGA stream.
///
/// # Errors
///
/// - [`IoError::UnsupportedChannels`] for an image without components
/// - [`IoError::Core`] with `ComponentMismatch` for heterogeneous components
/// - [`IoError::InvalidDimensions`] for a zero-sized image or one that does
///   not fit the 16-bit header fields
/// - [`IoError::DimensionMismatch`] if components differ in size
/// - [`IoError::UnsupportedBitDepth`] for precision above 16
/// - [`IoError::AllocationFailed`] if the output cannot be allocated
pub fn encode_with(image: &PlanarImage, options: &TgaWriterOptions) -> IoResult<TgaImage> {
    let comps = image.components();
    let channels = comps.len();
    if channels == 0 {
        debug!("rejecting TGA encode without components");
        return Err(IoError::UnsupportedChannels(channels));
    }
    check_homogeneous(comps)?;

    let first = &comps[0];
    let (width, height) = (first.width(), first.height());
    if width == 0 || height == 0 {
        return Err(IoError::invalid_dimensions(width, height, "zero dimension"));
    }
    for (index, comp) in comps.iter().enumerate().skip(1) {
        if comp.width() != width || comp.height() != height {
            return Err(IoError::DimensionMismatch {
                expected: format!("{}x{}", width, height),
                actual: format!("{}x{} (component {})", comp.width(), comp.height(), index),
            });
        }
    }

    let precision = first.precision();
    if precision > MAX_ENCODE_PRECISION {
        debug!(precision, "rejecting TGA encode precision");
        return Err(IoError::UnsupportedBitDepth(format!(
            "{} bits per component (max {})",
            precision, MAX_ENCODE_PRECISION
        )));
    }

    let has_alpha = channels == 2 || channels == 4;
    let bytes_per_pixel = if has_alpha { 4 } else { 3 };
    let header = write_header(bytes_per_pixel as u32 * 8, width, height, options.flip_image)?;

    let w = width as usize;
    let h = height as usize;
    let total = w
        .checked_mul(h)
        .and_then(|n| n.checked_mul(bytes_per_pixel))
        .and_then(|n| n.checked_add(TGA_HEADER_SIZE))
        .ok_or(IoError::AllocationFailed { requested: usize::MAX })?;
    let mut data = alloc_bytes(total)?;
    data[..TGA_HEADER_SIZE].copy_from_slice(&header);

    debug!(
        width,
        height,
        channels,
        precision,
        bits_per_pixel = bytes_per_pixel * 8,
        flip_image = options.flip_image,
        "encoding TGA"
    );

    let max = first.max_value() as i64;
    let bias = first.sign_bias();
    let rescale =
        |sample: i32| -> u8 { ((sample as i64 + bias) * 255 / max).clamp(0, 255) as u8 };

    let row_len = w * bytes_per_pixel;
    for (file_y, row) in data[TGA_HEADER_SIZE..].chunks_exact_mut(row_len).enumerate() {
        let y = if options.flip_image { file_y } else { h - file_y - 1 };
        let start = y * w;
        for (x, px) in row.chunks_exact_mut(bytes_per_pixel).enumerate() {
            let i = start + x;
            let r = rescale(comps[0].samples()[i]);
            let (g, b) = if channels >= 3 {
                (rescale(comps[1].samples()[i]), rescale(comps[2].samples()[i]))
            } else {
                (r, r)
            };
            px[0] = b;
            px[1] = g;
            px[2] = r;
            if has_alpha {
                px[3] = rescale(comps[channels - 1].samples()[i]);
            }
        }
    }

    Ok(TgaImage {
        data,
        width,
        height,
        channels: channels as u32,
    })
}

/// Decodes an uncompressed 24 or 32-bit TGA stream.
///
/// Sub-sampling factors and the image offset come from `grid`.
///
/// # Errors
///
/// - Header errors from [`read_header`]
/// - [`IoError::UnsupportedBitDepth`] for pixel depths other than 24 and 32
/// - [`IoError::InvalidDimensions`] for a zero-sized header
/// - [`IoError::Core`] with `InvalidSubsampling` for zero factors in `grid`
/// - [`IoError::InvalidFile`] if the pixel data is truncated
pub fn decode(data: &[u8], grid: &GridOptions) -> IoResult<PlanarImage> {
    let info = read_header(data)?;
    let (width, height) = (info.width, info.height);

    let bytes_per_pixel = match info.bits_per_pixel {
        24 => 3,
        32 => 4,
        bpp => {
            debug!(bpp, "rejecting TGA pixel depth");
            return Err(IoError::UnsupportedBitDepth(format!(
                "TGA pixel depth {} (expected 24 or 32)",
                bpp
            )));
        }
    };
    if width == 0 || height == 0 {
        return Err(IoError::invalid_dimensions(width, height, "zero dimension"));
    }
    let (x0, y0, x1, y1) = grid.extent(width, height)?;

    let w = width as usize;
    let h = height as usize;
    let row_len = w * bytes_per_pixel;
    let pixel_len = row_len * h;
    let Some(pixels) = data
        .get(info.data_offset..)
        .and_then(|rest| rest.get(..pixel_len))
    else {
        return Err(IoError::InvalidFile(format!(
            "TGA pixel data truncated: need {} bytes at offset {}, stream is {} bytes",
            pixel_len,
            info.data_offset,
            data.len()
        )));
    };

    let num_comps = bytes_per_pixel;
    if !matches!(num_comps, 3 | 4) {
        return Err(IoError::UnsupportedChannels(num_comps));
    }

    debug!(
        width,
        height,
        components = num_comps,
        flip_image = info.flip_image,
        "decoding TGA"
    );

    let params = ComponentParams::unsigned8(width, height)
        .with_subsampling(grid.subsampling_dx, grid.subsampling_dy);
    let mut comps = (0..num_comps)
        .map(|_| Component::new(params))
        .collect::<planar_core::Result<Vec<_>>>()?;

    for (comp, &byte) in comps.iter_mut().zip(BYTE_OF_COMPONENT.iter()) {
        let samples = comp.samples_mut();
        for (y, row) in pixels.chunks_exact(row_len).enumerate() {
            let dst_y = if info.flip_image { h - y - 1 } else { y };
            let dst = &mut samples[dst_y * w..(dst_y + 1) * w];
            for (d, px) in dst.iter_mut().zip(row.chunks_exact(bytes_per_pixel)) {
                *d = px[byte] as i32;
            }
        }
    }

    let mut image = PlanarImage::new(comps, ColorSpace::Srgb);
    image.set_reference_grid(x0, y0, x1, y1);
    Ok(image)
}
