use std::io::Cursor;

use super::*;

fn png_bytes(width: u32, height: u32, px: [u8; 4]) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

const RED_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="20" viewBox="0 0 10 20"><rect width="10" height="20" fill="#ff0000"/></svg>"##;

#[test]
fn raster_sprite_keeps_aspect() {
    let src = SourceBytes::raster(png_bytes(2, 4, [1, 2, 3, 255]));
    let img = decode_sprite(&src, 10).unwrap();
    assert_eq!(img.dimensions(), (10, 20));
}

#[test]
fn raster_sprite_at_native_size_is_untouched() {
    let src = SourceBytes::raster(png_bytes(3, 3, [10, 20, 30, 255]));
    let img = decode_sprite(&src, 3).unwrap();
    assert_eq!(img.get_pixel(1, 1).0, [10, 20, 30, 255]);
}

#[test]
fn svg_sprite_rasterizes_at_target_width() {
    let src = SourceBytes::svg(RED_SVG.as_bytes().to_vec());
    let img = decode_sprite(&src, 20).unwrap();
    assert_eq!(img.dimensions(), (20, 40));
    assert_eq!(img.get_pixel(10, 20).0, [255, 0, 0, 255]);
}

#[test]
fn fill_stretches_to_exact_size() {
    let src = SourceBytes::raster(png_bytes(4, 2, [0, 0, 255, 255]));
    let img = decode_fill(&src, 16, 16).unwrap();
    assert_eq!(img.dimensions(), (16, 16));

    let src = SourceBytes::svg(RED_SVG.as_bytes().to_vec());
    let img = decode_fill(&src, 8, 8).unwrap();
    assert_eq!(img.dimensions(), (8, 8));
}

#[test]
fn garbage_bytes_fail() {
    assert!(decode_sprite(&SourceBytes::raster(vec![1, 2, 3]), 10).is_err());
    assert!(decode_sprite(&SourceBytes::svg(b"<nope".to_vec()), 10).is_err());
    let src = SourceBytes::raster(png_bytes(1, 1, [0, 0, 0, 255]));
    assert!(decode_fill(&src, 0, 10).is_err());
}

#[test]
fn demultiply_restores_straight_alpha() {
    let mut px = vec![64u8, 0, 32, 128, 9, 9, 9, 0, 200, 100, 50, 255];
    demultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[0..4], &[128, 0, 64, 128]);
    assert_eq!(&px[4..8], &[0, 0, 0, 0]);
    assert_eq!(&px[8..12], &[200, 100, 50, 255]);
}
