//! TGA header codec.
//!
//! The 18-byte header, all multi-byte fields little-endian:
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 1 | id length |
//! | 1 | 1 | color map type |
//! | 2 | 1 | image type |
//! | 3 | 2 | color map first index |
//! | 5 | 2 | color map length |
//! | 7 | 1 | color map entry size (bits) |
//! | 8 | 2 | x origin |
//! | 10 | 2 | y origin |
//! | 12 | 2 | width |
//! | 14 | 2 | height |
//! | 16 | 1 | pixel depth (bits) |
//! | 17 | 1 | image descriptor |
//!
//! The header is followed by `id length` identifier bytes and by the color
//! map (`length * entry_size / 8` bytes), both skipped on read.
//!
//! Bit 5 of the image descriptor marks a top-left origin. The reader reports
//! `flip_image` when it is clear, meaning rows must be stored bottom-up.

use crate::{IoError, IoResult};
use byteorder::{ByteOrder, LittleEndian};
use tracing::{debug, trace};

/// Size of the fixed header in bytes.
pub const TGA_HEADER_SIZE: usize = 18;

/// Image type for uncompressed true-color data.
pub const IMAGE_TYPE_TRUE_COLOR: u8 = 2;

/// Highest uncompressed image type; RLE variants start at 9.
const MAX_UNCOMPRESSED_TYPE: u8 = 8;

/// Alpha/attribute bits recorded in the descriptor on write.
const DESCRIPTOR_ATTRIBUTE_BITS: u8 = 8;

/// Descriptor bit marking a top-left origin.
const DESCRIPTOR_TOP_ORIGIN: u8 = 0x20;

/// Raw TGA header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TgaHeader {
    /// Length of the identification field following the header.
    pub id_length: u8,
    /// 0 when no color map is present.
    pub color_map_type: u8,
    /// Image type (2 = uncompressed true-color, 9..=11 = RLE).
    pub image_type: u8,
    /// First color map entry index.
    pub color_map_index: u16,
    /// Number of color map entries.
    pub color_map_length: u16,
    /// Bits per color map entry.
    pub color_map_entry_size: u8,
    /// X origin of the image.
    pub x_origin: u16,
    /// Y origin of the image.
    pub y_origin: u16,
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
    /// Bits per pixel.
    pub pixel_depth: u8,
    /// Attribute bits (0..=3) and origin bits (4..=5).
    pub image_descriptor: u8,
}

impl TgaHeader {
    /// Builds an uncompressed true-color header.
    ///
    /// The descriptor records 8 attribute bits and, when `flip_image` is
    /// set, the top-left origin bit.
    ///
    /// # Errors
    ///
    /// - [`IoError::EncodeError`] if `bits_per_pixel` is 0 or does not fit in
    ///   one byte
    /// - [`IoError::InvalidDimensions`] if a dimension is 0 or above 65535
    pub fn true_color(
        bits_per_pixel: u32,
        width: u32,
        height: u32,
        flip_image: bool,
    ) -> IoResult<Self> {
        let pixel_depth = match u8::try_from(bits_per_pixel) {
            Ok(0) | Err(_) => {
                return Err(IoError::EncodeError(format!(
                    "invalid TGA pixel depth: {}",
                    bits_per_pixel
                )));
            }
            Ok(depth) => depth,
        };
        if width == 0 || height == 0 {
            return Err(IoError::invalid_dimensions(width, height, "zero dimension"));
        }
        let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
            return Err(IoError::invalid_dimensions(
                width,
                height,
                "TGA dimensions are limited to 65535",
            ));
        };

        let mut image_descriptor = DESCRIPTOR_ATTRIBUTE_BITS;
        if flip_image {
            image_descriptor |= DESCRIPTOR_TOP_ORIGIN;
        }

        Ok(Self {
            image_type: IMAGE_TYPE_TRUE_COLOR,
            width: w,
            height: h,
            pixel_depth,
            image_descriptor,
            ..Default::default()
        })
    }

    /// Decodes the 18 header bytes without validating them.
    ///
    /// # Errors
    ///
    /// [`IoError::InvalidFile`] if `bytes` is shorter than the header.
    pub fn parse(bytes: &[u8]) -> IoResult<Self> {
        let Some(b) = bytes.get(..TGA_HEADER_SIZE) else {
            return Err(IoError::InvalidFile(format!(
                "TGA header needs {} bytes, got {}",
                TGA_HEADER_SIZE,
                bytes.len()
            )));
        };
        Ok(Self {
            id_length: b[0],
            color_map_type: b[1],
            image_type: b[2],
            color_map_index: LittleEndian::read_u16(&b[3..5]),
            color_map_length: LittleEndian::read_u16(&b[5..7]),
            color_map_entry_size: b[7],
            x_origin: LittleEndian::read_u16(&b[8..10]),
            y_origin: LittleEndian::read_u16(&b[10..12]),
            width: LittleEndian::read_u16(&b[12..14]),
            height: LittleEndian::read_u16(&b[14..16]),
            pixel_depth: b[16],
            image_descriptor: b[17],
        })
    }

    /// Serializes the header.
    pub fn to_bytes(&self) -> [u8; TGA_HEADER_SIZE] {
        let mut b = [0u8; TGA_HEADER_SIZE];
        b[0] = self.id_length;
        b[1] = self.color_map_type;
        b[2] = self.image_type;
        LittleEndian::write_u16(&mut b[3..5], self.color_map_index);
        LittleEndian::write_u16(&mut b[5..7], self.color_map_length);
        b[7] = self.color_map_entry_size;
        LittleEndian::write_u16(&mut b[8..10], self.x_origin);
        LittleEndian::write_u16(&mut b[10..12], self.y_origin);
        LittleEndian::write_u16(&mut b[12..14], self.width);
        LittleEndian::write_u16(&mut b[14..16], self.height);
        b[16] = self.pixel_depth;
        b[17] = self.image_descriptor;
        b
    }

    /// Whether the descriptor marks a top-left origin.
    #[inline]
    pub fn origin_at_top(&self) -> bool {
        self.image_descriptor & DESCRIPTOR_TOP_ORIGIN != 0
    }

    /// Whether rows are stored bottom-up and need a vertical flip on decode.
    #[inline]
    pub fn needs_flip(&self) -> bool {
        !self.origin_at_top()
    }

    /// Whether the image type is run-length encoded (or otherwise above 8).
    #[inline]
    pub fn is_compressed(&self) -> bool {
        self.image_type > MAX_UNCOMPRESSED_TYPE
    }

    /// Size of the color map region in bytes.
    #[inline]
    pub fn palette_size(&self) -> usize {
        self.color_map_length as usize * (self.color_map_entry_size / 8) as usize
    }
}

/// Result of [`read_header`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Parsed header fields.
    pub header: TgaHeader,
    /// Bits per pixel.
    pub bits_per_pixel: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Rows are stored bottom-up (descriptor bit 5 clear).
    pub flip_image: bool,
    /// Offset of the first pixel byte, past the id field and color map.
    pub data_offset: usize,
}

/// Parses the header at the start of `data` and locates the pixel data.
///
/// # Errors
///
/// - [`IoError::InvalidFile`] if `data` is shorter than the header, the id
///   field or the color map it declares
/// - [`IoError::UnsupportedFormat`] for image types above 8 (RLE)
pub fn read_header(data: &[u8]) -> IoResult<HeaderInfo> {
    let header = TgaHeader::parse(data)?;
    trace!(
        id_length = header.id_length,
        image_type = header.image_type,
        color_map_length = header.color_map_length,
        color_map_entry_size = header.color_map_entry_size,
        width = header.width,
        height = header.height,
        pixel_depth = header.pixel_depth,
        image_descriptor = header.image_descriptor,
        "parsed TGA header"
    );

    if header.is_compressed() {
        debug!(image_type = header.image_type, "rejecting compressed TGA");
        return Err(IoError::UnsupportedFormat(format!(
            "compressed TGA (image type {})",
            header.image_type
        )));
    }

    let data_offset = TGA_HEADER_SIZE + header.id_length as usize + header.palette_size();
    if data_offset > data.len() {
        return Err(IoError::InvalidFile(format!(
            "TGA stream truncated: pixel data starts at {}, stream is {} bytes",
            data_offset,
            data.len()
        )));
    }

    Ok(HeaderInfo {
        header,
        bits_per_pixel: header.pixel_depth as u32,
        width: header.width as u32,
        height: header.height as u32,
        flip_image: header.needs_flip(),
        data_offset,
    })
}

/// Serializes an uncompressed true-color header.
///
/// See [`TgaHeader::true_color`] for the field values and errors.
pub fn write_header(
    bits_per_pixel: u32,
    width: u32,
    height: u32,
    flip_image: bool,
) -> IoResult<[u8; TGA_HEADER_SIZE]> {
    Ok(TgaHeader::true_color(bits_per_pixel, width, height, flip_image)?.to_bytes())
}
