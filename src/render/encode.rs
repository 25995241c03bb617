use anyhow::Context;
use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;

use crate::foundation::error::{DiagramError, DiagramResult};

/// JPEG quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Encode an opaque diagram as JPEG. `quality` must be in `1..=100`.
pub fn encode_jpeg(img: &RgbImage, quality: u8) -> DiagramResult<Vec<u8>> {
    if !(1..=100).contains(&quality) {
        return Err(DiagramError::validation(format!(
            "jpeg quality must be in 1..=100, got {quality}"
        )));
    }

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality)
        .encode_image(img)
        .context("encode diagram as jpeg")?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/encode.rs"]
mod tests;
