//! Raw 8-bit bitmap export and import.
//!
//! [`to_raw_bitmap`] interleaves the extracted planes of an 8-bit image into
//! the byte order a bitmap consumer expects (B, G, R[, A]). [`to_targa`]
//! wraps a TGA stream in the same [`RawImage`] container. [`from_raw`] goes
//! the other way and builds an unsigned 8-bit planar image from interleaved
//! or planar caller memory.

use crate::{IoError, IoResult};
use planar_core::{ColorSpace, Component, ComponentParams, GridOptions, PlanarImage};
use tracing::debug;

#[cfg(feature = "bmp")]
use crate::bmp;
#[cfg(feature = "bmp")]
use crate::ImageWriter;
#[cfg(feature = "bmp")]
use planar_core::check_homogeneous;

/// Container produced by a raw export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawImageKind {
    /// Interleaved 8-bit pixels without header.
    Bitmap,
    /// Complete TGA stream, header included.
    Targa,
}

/// Exported raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    /// Raster bytes.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Channels per pixel.
    pub channels: u32,
    /// What `data` holds.
    pub kind: RawImageKind,
}

/// Options for [`RawBitmapWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawBitmapOptions {
    /// Copy the alpha plane of 4-component images. When false the alpha
    /// byte is 255. Default: true.
    pub alpha: bool,
}

impl Default for RawBitmapOptions {
    fn default() -> Self {
        Self { alpha: true }
    }
}

/// [`ImageWriter`](crate::ImageWriter) producing interleaved bitmaps.
#[cfg(feature = "bmp")]
#[derive(Debug, Clone, Default)]
pub struct RawBitmapWriter {
    options: RawBitmapOptions,
}

#[cfg(feature = "bmp")]
impl RawBitmapWriter {
    /// Creates a writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer with the given options.
    pub fn with_options(options: RawBitmapOptions) -> Self {
        Self { options }
    }
}

#[cfg(feature = "bmp")]
impl ImageWriter for RawBitmapWriter {
    type Output = RawImage;

    fn write_to_memory(&self, image: &PlanarImage) -> IoResult<RawImage> {
        to_raw_bitmap(image, self.options.alpha)
    }
}

/// Interleaves an 8-bit image into a headerless bitmap.
///
/// | Channels | Pixel bytes |
/// |----------|-------------|
/// | 1 | Y |
/// | 3 | B, G, R |
/// | 4 | B, G, R, A (255 when `alpha` is false) |
///
/// # Errors
///
/// - Any error of [`bmp::extract_planes`]
/// - [`IoError::UnsupportedBitDepth`] for precision above 8
/// - [`IoError::UnsupportedChannels`] for 2 components
#[cfg(feature = "bmp")]
pub fn to_raw_bitmap(image: &PlanarImage, alpha: bool) -> IoResult<RawImage> {
    // Reject before extract_planes allocates.
    let comps = image.components();
    check_homogeneous(&comps[..comps.len().min(bmp::MAX_PLANES)])?;
    if let Some(first) = image.component(0) {
        if first.precision() > 8 {
            return Err(IoError::UnsupportedBitDepth(format!(
                "raw bitmaps need 8-bit components, got {}",
                first.precision()
            )));
        }
    }
    if image.num_components() == 2 {
        return Err(IoError::UnsupportedChannels(2));
    }

    let planes = bmp::PlaneExtractor::new().write_to_memory(image)?;
    let (width, height, channels) = (planes.width, planes.height, planes.channels);

    debug!(width, height, channels, alpha, "interleaving raw bitmap");

    let data = match channels {
        1 => planes.data,
        3 | 4 => {
            let n = channels as usize;
            let plane_len = planes.plane_len();
            let (r, rest) = planes.data.split_at(plane_len);
            let (g, rest) = rest.split_at(plane_len);
            let (b, a) = rest.split_at(plane_len);

            let mut data = crate::error::alloc_bytes(plane_len * n)?;
            for (i, px) in data.chunks_exact_mut(n).enumerate() {
                px[0] = b[i];
                px[1] = g[i];
                px[2] = r[i];
                if n == 4 {
                    px[3] = if alpha { a[i] } else { 255 };
                }
            }
            data
        }
        other => return Err(IoError::UnsupportedChannels(other as usize)),
    };

    Ok(RawImage {
        data,
        width,
        height,
        channels,
        kind: RawImageKind::Bitmap,
    })
}

/// Encodes `image` as a TGA stream wrapped in a [`RawImage`].
///
/// # Errors
///
/// Any error of [`crate::tga::encode`].
#[cfg(feature = "tga")]
pub fn to_targa(image: &PlanarImage) -> IoResult<RawImage> {
    let encoded = crate::tga::encode(image)?;
    Ok(RawImage {
        data: encoded.data,
        width: encoded.width,
        height: encoded.height,
        channels: encoded.channels,
        kind: RawImageKind::Targa,
    })
}

/// Memory layout of caller-supplied 8-bit samples for [`from_raw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLayout {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Bytes from one row to the next (within one plane when planar).
    pub stride: usize,
    /// Channels, 1 to 4.
    pub channels: u32,
    /// Channels interleaved per pixel; otherwise one plane per channel, each
    /// `stride * height` bytes.
    pub interleaved: bool,
}

impl RawLayout {
    /// Tightly packed interleaved layout.
    pub fn interleaved(width: u32, height: u32, channels: u32) -> Self {
        Self {
            width,
            height,
            stride: width as usize * channels as usize,
            channels,
            interleaved: true,
        }
    }

    /// Tightly packed planar layout.
    pub fn planar(width: u32, height: u32, channels: u32) -> Self {
        Self {
            width,
            height,
            stride: width as usize,
            channels,
            interleaved: false,
        }
    }

    /// Bytes of one row of one plane (planar) or of all channels (interleaved).
    fn row_bytes(&self) -> usize {
        if self.interleaved {
            self.width as usize * self.channels as usize
        } else {
            self.width as usize
        }
    }

    /// Minimum buffer length covering every sample.
    fn required_len(&self) -> Option<usize> {
        let h = self.height as usize;
        let last_row = self.stride.checked_mul(h - 1)?.checked_add(self.row_bytes())?;
        if self.interleaved {
            Some(last_row)
        } else {
            let plane = self.stride.checked_mul(h)?;
            plane.checked_mul(self.channels as usize - 1)?.checked_add(last_row)
        }
    }
}

/// Builds an unsigned 8-bit planar image from raw samples.
///
/// Component `i` takes channel `i`. The color space is gray for 1 or 2
/// channels and sRGB otherwise; the reference grid comes from `grid`.
///
/// # Errors
///
/// - [`IoError::UnsupportedChannels`] outside 1..=4
/// - [`IoError::InvalidDimensions`] for a zero size or a stride shorter than
///   a row
/// - [`IoError::InvalidFile`] if `raw` is too short for `layout`
/// - [`IoError::Core`] for invalid sub-sampling in `grid`
pub fn from_raw(raw: &[u8], layout: &RawLayout, grid: &GridOptions) -> IoResult<PlanarImage> {
    let RawLayout {
        width,
        height,
        stride,
        channels,
        interleaved,
    } = *layout;

    if !(1..=4).contains(&channels) {
        return Err(IoError::UnsupportedChannels(channels as usize));
    }
    if width == 0 || height == 0 {
        return Err(IoError::invalid_dimensions(width, height, "zero dimension"));
    }
    if stride < layout.row_bytes() {
        return Err(IoError::invalid_dimensions(
            width,
            height,
            format!("stride {} shorter than row of {} bytes", stride, layout.row_bytes()),
        ));
    }
    let required = layout
        .required_len()
        .ok_or_else(|| IoError::invalid_dimensions(width, height, "layout overflows usize"))?;
    if raw.len() < required {
        return Err(IoError::InvalidFile(format!(
            "raw buffer holds {} bytes, layout needs {}",
            raw.len(),
            required
        )));
    }
    let (x0, y0, x1, y1) = grid.extent(width, height)?;

    debug!(width, height, channels, stride, interleaved, "importing raw samples");

    let w = width as usize;
    let h = height as usize;
    let n = channels as usize;
    let params = ComponentParams::unsigned8(width, height)
        .with_subsampling(grid.subsampling_dx, grid.subsampling_dy);

    let mut comps = Vec::with_capacity(n);
    for c in 0..n {
        let mut comp = Component::new(params)?;
        let samples = comp.samples_mut();
        for y in 0..h {
            let dst = &mut samples[y * w..(y + 1) * w];
            if interleaved {
                let row = &raw[y * stride..];
                for (x, d) in dst.iter_mut().enumerate() {
                    *d = row[x * n + c] as i32;
                }
            } else {
                let row = &raw[c * stride * h + y * stride..][..w];
                for (d, &s) in dst.iter_mut().zip(row) {
                    *d = s as i32;
                }
            }
        }
        comps.push(comp);
    }

    let color_space = if n <= 2 { ColorSpace::Gray } else { ColorSpace::Srgb };
    let mut image = PlanarImage::new(comps, color_space);
    image.set_reference_grid(x0, y0, x1, y1);
    Ok(image)
}
