use super::*;

#[test]
fn encodes_decodable_jpeg() {
    let img = RgbImage::from_pixel(16, 8, image::Rgb([200, 100, 50]));
    let bytes = encode_jpeg(&img, DEFAULT_JPEG_QUALITY).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

    let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (16, 8));
    let px = decoded.get_pixel(8, 4).0;
    assert!(px[0].abs_diff(200) < 8 && px[1].abs_diff(100) < 8 && px[2].abs_diff(50) < 8);
}

#[test]
fn quality_bounds() {
    let img = RgbImage::new(2, 2);
    assert!(encode_jpeg(&img, 0).is_err());
    assert!(encode_jpeg(&img, 101).is_err());
    assert!(encode_jpeg(&img, 1).is_ok());
    assert!(encode_jpeg(&img, 100).is_ok());
}
