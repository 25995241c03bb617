use image::{Rgba, RgbaImage};

pub(crate) type PremulRgba8 = [u8; 4];

/// `x * y / 255`, rounded to nearest.
pub(crate) fn mul_div255(x: u16, y: u16) -> u16 {
    ((u32::from(x) * u32::from(y) + 127) / 255) as u16
}

/// Source-over on premultiplied pixels.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(sa);
    let mut out = [0u8; 4];
    for i in 0..4 {
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = (u16::from(src[i]) + dc).min(255) as u8;
    }
    out
}

pub(crate) fn premultiply(px: Rgba<u8>) -> PremulRgba8 {
    let [r, g, b, a] = px.0;
    let a16 = u16::from(a);
    [
        mul_div255(u16::from(r), a16) as u8,
        mul_div255(u16::from(g), a16) as u8,
        mul_div255(u16::from(b), a16) as u8,
        a,
    ]
}

pub(crate) fn demultiply(px: PremulRgba8) -> Rgba<u8> {
    let a = u16::from(px[3]);
    match a {
        0 => Rgba([0, 0, 0, 0]),
        255 => Rgba(px),
        _ => {
            let un = |c: u8| ((u16::from(c) * 255 + a / 2) / a).min(255) as u8;
            Rgba([un(px[0]), un(px[1]), un(px[2]), px[3]])
        }
    }
}

/// Blend a straight-alpha pixel over another, in place.
pub(crate) fn blend_pixel(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    match src.0[3] {
        0 => {}
        255 => *dst = src,
        _ => *dst = demultiply(over(premultiply(*dst), premultiply(src))),
    }
}

/// Visit the pixels of `(x, y, w, h)` that fall on `img`.
fn for_each_in_rect(
    img: &mut RgbaImage,
    x: i64,
    y: i64,
    w: u32,
    h: u32,
    mut f: impl FnMut(&mut Rgba<u8>),
) {
    let (iw, ih) = (i64::from(img.width()), i64::from(img.height()));
    let x0 = x.clamp(0, iw);
    let y0 = y.clamp(0, ih);
    let x1 = (x + i64::from(w)).clamp(0, iw);
    let y1 = (y + i64::from(h)).clamp(0, ih);
    for py in y0..y1 {
        for px in x0..x1 {
            f(img.get_pixel_mut(px as u32, py as u32));
        }
    }
}

/// Overwrite a rectangle with `color`, clipped to the image.
pub(crate) fn fill_rect(img: &mut RgbaImage, x: i64, y: i64, w: u32, h: u32, color: Rgba<u8>) {
    for_each_in_rect(img, x, y, w, h, |px| *px = color);
}

/// Blend `color` (straight alpha) over a rectangle, clipped to the image.
pub(crate) fn tint_rect(img: &mut RgbaImage, x: i64, y: i64, w: u32, h: u32, color: Rgba<u8>) {
    for_each_in_rect(img, x, y, w, h, |px| blend_pixel(px, color));
}

/// Blend `src` over `dst` with its top-left corner at `(x, y)`; parts outside `dst` are clipped.
pub(crate) fn overlay(dst: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    let (sw, sh) = (i64::from(src.width()), i64::from(src.height()));

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + sw).min(dw);
    let y1 = (y + sh).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    for dy in y0..y1 {
        for dx in x0..x1 {
            let s = *src.get_pixel((dx - x) as u32, (dy - y) as u32);
            blend_pixel(dst.get_pixel_mut(dx as u32, dy as u32), s);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/blend.rs"]
mod tests;
