use anyhow::Context;
use image::RgbaImage;
use image::imageops::FilterType;

use crate::assets::source::{AssetFormat, SourceBytes};

// Avoid pathological allocations from hostile or broken assets.
const MAX_DIM: u32 = 16_384;

/// Decode a sprite and scale it to `width` pixels wide, keeping its aspect ratio.
pub fn decode_sprite(src: &SourceBytes, width: u32) -> anyhow::Result<RgbaImage> {
    match src.format {
        AssetFormat::Svg => {
            let tree = parse_svg(&src.bytes)?;
            let size = tree.size();
            let height = fit_height(size.width(), size.height(), width)?;
            rasterize_svg(&tree, width, height)
        }
        AssetFormat::Raster => {
            let img = decode_raster(&src.bytes)?;
            let (w, h) = img.dimensions();
            let height = fit_height(w as f32, h as f32, width)?;
            Ok(resize_to(img, width, height))
        }
    }
}

/// Decode an image and stretch it to exactly `width × height`.
pub fn decode_fill(src: &SourceBytes, width: u32, height: u32) -> anyhow::Result<RgbaImage> {
    check_dims(width, height)?;
    match src.format {
        AssetFormat::Svg => rasterize_svg(&parse_svg(&src.bytes)?, width, height),
        AssetFormat::Raster => Ok(resize_to(decode_raster(&src.bytes)?, width, height)),
    }
}

fn decode_raster(bytes: &[u8]) -> anyhow::Result<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

fn parse_svg(bytes: &[u8]) -> anyhow::Result<usvg::Tree> {
    let opts = usvg::Options::default();
    usvg::Tree::from_data(bytes, &opts).context("parse svg tree")
}

fn resize_to(img: RgbaImage, width: u32, height: u32) -> RgbaImage {
    if img.dimensions() == (width, height) {
        return img;
    }
    image::imageops::resize(&img, width, height, FilterType::Lanczos3)
}

fn fit_height(src_w: f32, src_h: f32, width: u32) -> anyhow::Result<u32> {
    if !(src_w.is_finite() && src_h.is_finite()) || src_w <= 0.0 || src_h <= 0.0 {
        anyhow::bail!("image has invalid width/height {src_w}x{src_h}");
    }
    let height = ((src_h * width as f32) / src_w).round().max(1.0) as u32;
    check_dims(width, height)?;
    Ok(height)
}

fn check_dims(width: u32, height: u32) -> anyhow::Result<()> {
    if width == 0 || height == 0 || width > MAX_DIM || height > MAX_DIM {
        anyhow::bail!("raster size {width}x{height} out of range (1..={MAX_DIM})");
    }
    Ok(())
}

/// Rasterize an SVG tree into a straight-alpha image of exactly `width × height`.
pub(crate) fn rasterize_svg(tree: &usvg::Tree, width: u32, height: u32) -> anyhow::Result<RgbaImage> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .context("failed to allocate svg pixmap")?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());

    let mut rgba = pixmap.take();
    demultiply_rgba8_in_place(&mut rgba);
    RgbaImage::from_raw(width, height, rgba).context("svg pixmap size mismatch")
}

/// Convert premultiplied RGBA8 (as produced by tiny-skia) to straight alpha.
pub(crate) fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
