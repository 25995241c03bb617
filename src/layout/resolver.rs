use crate::foundation::core::Rgb8;
use crate::foundation::error::{DiagramError, DiagramResult};
use crate::layout::catalog::Catalog;
use crate::layout::model::{Geometry, VisualConfig};
use crate::layout::request::{DiagramRequest, SizeSpec};
use crate::position::square::parse_square_list;

/// Longest accepted caption, in characters.
pub const MAX_CAPTION_CHARS: usize = 30;

/// Caption font size as a fraction of the cell, for explicit pixel sizes.
pub const CAPTION_FONT_RATIO: f32 = 0.4;
/// Coordinate font size as a fraction of the cell, for explicit pixel sizes.
pub const COORDINATE_FONT_RATIO: f32 = 0.25;

/// Nominal line height as a multiple of the font size.
const LINE_HEIGHT: f32 = 1.2;
/// Caption band height in line heights.
const CAPTION_BAND_LINES: f32 = 1.5;
/// Coordinate band size as a multiple of the label font size.
const COORDINATE_BAND_RATIO: f32 = 2.0;

struct SizeMetrics {
    cell: u32,
    border: u32,
    caption_font: f32,
    coordinate_font: f32,
}

/// Validate `request` against `catalog` and derive everything the compositors need.
///
/// Checks run in a fixed order (size, theme, texture, colors, caption, highlight squares) and the
/// first failure is returned. No asset is touched here.
#[tracing::instrument(level = "debug", skip_all, fields(size = %request.size))]
pub fn resolve(
    request: &DiagramRequest,
    catalog: &Catalog,
) -> DiagramResult<(VisualConfig, Geometry)> {
    let size = resolve_size(request.size, catalog)?;
    let theme = catalog.theme(request.theme_index())?.clone();
    let texture = match request.texture_index() {
        Some(index) => Some(catalog.texture(index)?.clone()),
        None => None,
    };

    let style = &catalog.style;
    let light = resolve_color("lightCellColor", request.light_cell_color.as_deref(), style.light)?;
    let dark = resolve_color("darkCellColor", request.dark_cell_color.as_deref(), style.dark)?;
    let highlight = resolve_color(
        "highlightSquaresColor",
        request.highlight_squares_color.as_deref(),
        style.highlight,
    )?;

    let caption_len = request.caption.chars().count();
    if caption_len > MAX_CAPTION_CHARS {
        return Err(DiagramError::InvalidCaption {
            len: caption_len,
            max: MAX_CAPTION_CHARS,
        });
    }

    let highlights = parse_square_list(&request.highlight_squares)?;

    let config = VisualConfig {
        light,
        dark,
        highlight,
        highlight_alpha: style.highlight_alpha,
        texture,
        theme,
        caption: request.caption.clone(),
        caption_color: style.caption,
        coordinates: request.coordinates,
        coordinate_color: style.coordinates,
        background: style.background,
        border_color: style.border,
        font_family: style.font_family.clone(),
        flipped: request.flip,
        highlights,
    };

    let geometry = Geometry {
        cell_size: size.cell,
        border: size.border,
        caption_font_size: size.caption_font,
        coordinate_font_size: size.coordinate_font,
        // depends on the sprite art; filled in once the theme's sprites are measured
        top_padding: 0,
        caption_band: if config.has_caption() {
            caption_band(size.caption_font)
        } else {
            0
        },
        coordinate_band: if config.coordinates {
            (size.coordinate_font * COORDINATE_BAND_RATIO).ceil() as u32
        } else {
            0
        },
        side_padding: if config.has_caption() { size.cell / 2 } else { 0 },
    };

    tracing::debug!(
        cell = geometry.cell_size,
        theme = %config.theme.name,
        "resolved diagram layout"
    );
    Ok((config, geometry))
}

fn resolve_size(spec: SizeSpec, catalog: &Catalog) -> DiagramResult<SizeMetrics> {
    match spec {
        SizeSpec::Index(index) => {
            let rec = catalog.size(index)?;
            Ok(SizeMetrics {
                cell: rec.cell,
                border: rec.border,
                caption_font: rec.caption_font,
                coordinate_font: rec.coordinate_font,
            })
        }
        SizeSpec::Pixels(px) => {
            let limits = catalog.pixel_limits;
            if px < limits.min_px || px > limits.max_px {
                return Err(DiagramError::SizeOutOfRange {
                    px,
                    min: limits.min_px,
                    max: limits.max_px,
                });
            }
            Ok(SizeMetrics {
                cell: px,
                border: 0,
                caption_font: CAPTION_FONT_RATIO * px as f32,
                coordinate_font: COORDINATE_FONT_RATIO * px as f32,
            })
        }
    }
}

fn resolve_color(field: &'static str, value: Option<&str>, default: Rgb8) -> DiagramResult<Rgb8> {
    match value {
        None => Ok(default),
        Some(v) => Rgb8::from_hex(v).ok_or_else(|| DiagramError::InvalidColor {
            field,
            value: v.to_string(),
        }),
    }
}

/// Caption strip height for a caption font size.
pub fn caption_band(font_size: f32) -> u32 {
    (font_size * LINE_HEIGHT * CAPTION_BAND_LINES).ceil() as u32
}

#[cfg(test)]
#[path = "../../tests/unit/layout/resolver.rs"]
mod tests;
