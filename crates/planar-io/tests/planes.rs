//! Integration tests for plane extraction and raw bitmaps.

#![cfg(feature = "bmp")]

use planar_core::{ColorSpace, Component, ComponentParams, GridOptions, PlanarImage};
use planar_io::bmp::{self, PlaneExtractor};
use planar_io::raw::{self, RawLayout};
use planar_io::{ImageWriter, IoError};

#[test]
fn planes_match_clamped_masked_samples() {
    for precision in 1..=8u32 {
        for signed in [false, true] {
            let params = ComponentParams::new(4, 1, precision, signed);
            let samples = vec![-300, -1, 100, 300];
            let comp = Component::from_samples(params, samples.clone()).unwrap();
            let image = PlanarImage::new(vec![comp], ColorSpace::Gray);

            let planes = PlaneExtractor::new().write_to_memory(&image).unwrap();
            let (lo, hi) = if signed { (-128, 127) } else { (0, 255) };
            let mask = (1i32 << precision) - 1;
            let expected: Vec<u8> = samples
                .iter()
                .map(|&s| (s.clamp(lo, hi) & mask) as u8)
                .collect();
            assert_eq!(planes.data, expected, "precision {} signed {}", precision, signed);
        }
    }
}

#[test]
fn planes_16bit_little_endian() {
    let params = ComponentParams::new(2, 1, 16, false);
    let comp = Component::from_samples(params, vec![0x1234, 0xBEEF]).unwrap();
    let image = PlanarImage::new(vec![comp], ColorSpace::Gray);
    let planes = bmp::extract_planes(&image).unwrap();
    assert_eq!(planes.bits_per_sample, 16);
    assert_eq!(planes.data, vec![0x34, 0x12, 0xEF, 0xBE]);
}

#[test]
fn planes_reject_each_heterogeneity() {
    let base = ComponentParams::unsigned8(2, 2);
    let variants = [
        base.with_subsampling(2, 1),
        base.with_subsampling(1, 2),
        ComponentParams::new(2, 2, 7, false),
        ComponentParams::new(2, 2, 8, true),
    ];
    for other in variants {
        let image = PlanarImage::from_params(&[base, other], ColorSpace::Unknown).unwrap();
        let err = bmp::extract_planes(&image).unwrap_err();
        assert!(matches!(err, IoError::Core(ref e) if e.is_mismatch()), "{}", err);
    }
}

#[test]
fn planes_reject_empty_image() {
    let image = PlanarImage::new(Vec::new(), ColorSpace::Unknown);
    assert!(matches!(
        bmp::extract_planes(&image),
        Err(IoError::InvalidDimensions { .. })
    ));
}

#[test]
fn raw_import_export_roundtrip() {
    // BGRA bitmap written by to_raw_bitmap reads back with channels swapped
    let bgra = [3u8, 2, 1, 4, 30, 20, 10, 40];
    let layout = RawLayout::interleaved(2, 1, 4);
    let image = raw::from_raw(&bgra, &layout, &GridOptions::default()).unwrap();
    assert_eq!(image.color_space(), ColorSpace::Srgb);

    let exported = raw::to_raw_bitmap(&image, true).unwrap();
    assert_eq!(exported.kind, raw::RawImageKind::Bitmap);
    // components 0..3 hold B, G, R, A of the input and are re-emitted swapped
    assert_eq!(exported.data, vec![1, 2, 3, 4, 10, 20, 30, 40]);
}

#[cfg(feature = "tga")]
#[test]
fn raw_targa_decodes() {
    let layout = RawLayout::planar(2, 2, 1);
    let image = raw::from_raw(&[5, 6, 7, 8], &layout, &GridOptions::default()).unwrap();
    assert_eq!(image.color_space(), ColorSpace::Gray);

    let targa = raw::to_targa(&image).unwrap();
    let decoded = planar_io::tga::decode(&targa.data, &GridOptions::default()).unwrap();
    assert_eq!(decoded.component(1).unwrap().samples(), &[5, 6, 7, 8]);
}
