//! # planar-io
//!
//! Raster conversions for planar multi-component images.
//!
//! Every conversion works on caller-owned memory and returns a freshly
//! allocated, owned result:
//!
//! | Module | Direction | Output |
//! |--------|-----------|--------|
//! | [`bmp`] | image to flat planes | [`bmp::Planes`] |
//! | [`tga`] | image to TGA stream and back | [`tga::TgaImage`] / `PlanarImage` |
//! | [`raw`] | image to bitmap, raw memory to image | [`raw::RawImage`] / `PlanarImage` |
//!
//! ## Usage
//!
//! ```rust
//! use planar_core::{ColorSpace, ComponentParams, GridOptions, PlanarImage};
//! use planar_io::{ImageReader, ImageWriter};
//! use planar_io::tga::{TgaReader, TgaWriter};
//!
//! let image = PlanarImage::from_params(&[ComponentParams::unsigned8(8, 8); 4], ColorSpace::Srgb)?;
//! let stream = TgaWriter::new().write_to_memory(&image)?;
//! let back = TgaReader::with_options(GridOptions::default()).read_from_memory(&stream.data)?;
//! assert_eq!(back.num_components(), 4);
//! # Ok::<(), planar_io::IoError>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `tga` (default) - TGA encode/decode
//! - `bmp` (default) - Plane extraction and raw bitmap export
//!
//! ## Logging
//!
//! Conversions emit [`tracing`] events at `debug` level (entry points and
//! rejections) and `trace` level (parsed header fields). No subscriber is
//! installed by this crate.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod traits;

#[cfg(feature = "bmp")]
pub mod bmp;
pub mod raw;
#[cfg(feature = "tga")]
pub mod tga;

pub use error::{IoError, IoResult};
pub use traits::{ImageReader, ImageWriter};
