//! End-to-end decode tests through the public API.

use texdec_api::{decode, DecodeRequest, TextureFormat};
use texdec_common::{DecodeError, PixelFormat, SurfaceFormat};

#[test]
fn rgb565_linear_end_to_end() {
    // 2x2 RGB565: pure red, pure green, pure blue, black.
    let src = [0x00u8, 0xF8, 0xE0, 0x07, 0x1F, 0x00, 0x00, 0x00];
    let img = decode(
        TextureFormat::Linear(PixelFormat::Rgb565),
        &DecodeRequest::new(2, 2, &src),
    )
    .unwrap();
    assert_eq!(img.format(), SurfaceFormat::Argb32);
    assert_eq!(img.pixel(0, 0), 0xFFFF0000);
    assert_eq!(img.pixel(1, 0), 0xFF00FF00);
    assert_eq!(img.pixel(0, 1), 0xFF0000FF);
    assert_eq!(img.pixel(1, 1), 0xFF000000);
}

#[test]
fn ci4_palette_end_to_end() {
    // One byte 0x10 with right-pixel-first nybble order decodes a 2x1
    // image to indices [0, 1]; palette entry 1 is RGB555 white.
    let mut pal = [0u8; 32];
    pal[0..2].copy_from_slice(&0x0000u16.to_le_bytes());
    pal[2..4].copy_from_slice(&0x7FFFu16.to_le_bytes());
    let img = decode(
        TextureFormat::LinearCi4 { palette: PixelFormat::Rgb555, msn_left: false },
        &DecodeRequest::new(2, 1, &[0x10]).with_palette(&pal),
    )
    .unwrap();
    assert_eq!(img.format(), SurfaceFormat::Ci8);
    assert_eq!(img.palette_index(0, 0), 0);
    assert_eq!(img.palette_index(1, 0), 1);
    assert_eq!(img.palette().unwrap()[1], 0xFFFFFFFF);
}

#[test]
fn indexed_formats_require_a_palette() {
    assert!(matches!(
        decode(
            TextureFormat::LinearCi8 { palette: PixelFormat::Rgb565 },
            &DecodeRequest::new(2, 2, &[0u8; 4]),
        ),
        Err(DecodeError::PaletteRequired)
    ));
}

#[test]
fn duplicate_round_trip_preserves_pixels() {
    let src = [0x00u8, 0xF8, 0xE0, 0x07, 0x1F, 0x00, 0x00, 0x00];
    let img = decode(
        TextureFormat::Linear(PixelFormat::Rgb565),
        &DecodeRequest::new(2, 2, &src),
    )
    .unwrap();
    let copy = img.duplicate().unwrap();
    for y in 0..2 {
        for x in 0..2 {
            assert_eq!(copy.pixel(x, y), img.pixel(x, y));
        }
    }
    assert_eq!(copy.significant_bits(), img.significant_bits());
}

#[test]
fn chroma_key_scenario() {
    // Build the 2x2 image [key, key, white, translucent] from raw ARGB32.
    let key = 0xFF00FF00u32;
    let pixels = [key, key, 0xFFFFFFFFu32, 0x00112233u32];
    let mut src = Vec::new();
    for px in pixels {
        src.extend_from_slice(&px.to_le_bytes());
    }
    let mut img = decode(
        TextureFormat::Linear(PixelFormat::Argb8888),
        &DecodeRequest::new(2, 2, &src),
    )
    .unwrap();
    img.apply_chroma_key(key).unwrap();
    assert_eq!(img.pixel(0, 0), 0x00000000);
    assert_eq!(img.pixel(1, 0), 0x00000000);
    assert_eq!(img.pixel(0, 1), 0xFFFFFFFF);
    assert_eq!(img.pixel(1, 1), 0x00112233);
}

#[test]
fn block_formats_round_dimensions_up_then_shrink() {
    // 6x6 DXT5 needs 2x2 blocks (8x8 physical) = 64 bytes.
    let src = vec![0u8; 64];
    let img = decode(TextureFormat::Dxt5, &DecodeRequest::new(6, 6, &src)).unwrap();
    assert_eq!((img.width(), img.height()), (6, 6));

    assert!(matches!(
        decode(TextureFormat::Dxt5, &DecodeRequest::new(6, 6, &src[..63])),
        Err(DecodeError::SourceTooSmall { expected: 64, actual: 63 })
    ));
}

#[test]
fn every_block_family_is_reachable() {
    // Smoke-decode one zero block per family; contents are format-defined
    // but each must produce a full-size surface.
    let cases: &[(TextureFormat, usize)] = &[
        (TextureFormat::Dxt1, 8),
        (TextureFormat::Dxt1Alpha, 8),
        (TextureFormat::Dxt2, 16),
        (TextureFormat::Dxt3, 16),
        (TextureFormat::Dxt4, 16),
        (TextureFormat::Dxt5, 16),
        (TextureFormat::Bc4, 8),
        (TextureFormat::Bc5, 16),
        (TextureFormat::Bc7, 16),
        (TextureFormat::Etc1, 8),
        (TextureFormat::Etc2Rgb, 8),
        (TextureFormat::Etc2Rgba, 16),
        (TextureFormat::Etc2RgbA1, 8),
        (TextureFormat::EacR11, 8),
        (TextureFormat::EacRg11, 16),
    ];
    for &(format, len) in cases {
        let src = vec![0u8; len];
        let img = decode(format, &DecodeRequest::new(4, 4, &src))
            .unwrap_or_else(|e| panic!("{format:?}: {e}"));
        assert_eq!((img.width(), img.height()), (4, 4), "{format:?}");
    }
}

#[test]
fn gcn_and_dreamcast_paths() {
    // GameCube RGB565, one 4x4 tile of red.
    let mut gcn = Vec::new();
    for _ in 0..16 {
        gcn.extend_from_slice(&0xF800u16.to_be_bytes());
    }
    let img = decode(
        TextureFormat::Gcn16(PixelFormat::Rgb565),
        &DecodeRequest::new(4, 4, &gcn),
    )
    .unwrap();
    assert_eq!(img.pixel(0, 0), 0xFFFF0000);

    // Dreamcast twiddled 2x2.
    let mut dc = Vec::new();
    for px in [0xF800u16, 0x07E0, 0x001F, 0x0000] {
        dc.extend_from_slice(&px.to_le_bytes());
    }
    let img = decode(
        TextureFormat::DreamcastTwiddled16(PixelFormat::Rgb565),
        &DecodeRequest::new(2, 2, &dc),
    )
    .unwrap();
    assert_eq!(img.pixel(0, 0), 0xFFFF0000);
    assert_eq!(img.pixel(0, 1), 0xFF00FF00);
}

#[test]
fn squared_pads_with_transparency() {
    let src = [0x00u8, 0xF8, 0xE0, 0x07]; // 2x1 RGB565
    let img = decode(
        TextureFormat::Linear(PixelFormat::Rgb565),
        &DecodeRequest::new(2, 1, &src),
    )
    .unwrap();
    let sq = img.squared().unwrap();
    assert_eq!((sq.width(), sq.height()), (2, 2));
    assert_eq!(sq.pixel(0, 0), 0xFFFF0000);
    assert_eq!(sq.pixel(0, 1), 0x00000000);
}
