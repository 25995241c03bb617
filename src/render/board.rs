use image::RgbaImage;

use crate::assets::resolver::AssetResolver;
use crate::foundation::error::{DiagramError, DiagramResult};
use crate::layout::model::{Geometry, VisualConfig};
use crate::position::grid::{BOARD_CELLS, Position};
use crate::position::piece::Piece;
use crate::render::blend::{fill_rect, overlay, tint_rect};

/// Space needed above the top rank so the tallest sprite of `theme` fits at `cell` pixels.
///
/// Looks up all twelve sprites, so the padding does not depend on which pieces are on the board.
pub fn measure_top_padding<R: AssetResolver + ?Sized>(
    theme: &str,
    cell: u32,
    resolver: &R,
) -> DiagramResult<u32> {
    let mut tallest = cell;
    for piece in Piece::all() {
        let sprite = resolver.piece(&piece.short_code(), theme, cell)?;
        tallest = tallest.max(sprite.height());
    }
    Ok(tallest - cell)
}

/// Composite the board layer: texture, cells, highlights, then pieces.
///
/// `position` must already be in display orientation; `config.flipped` is only used to map
/// highlight squares. The result is `8·cell` wide and `8·cell + top_padding` tall, transparent
/// above the grid except where tall sprites reach into the padding. A sprite taller than
/// `cell + top_padding` is a [`DiagramError::Validation`]; use [`measure_top_padding`] to size
/// the padding.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(cell = geometry.cell_size, pieces = position.piece_count())
)]
pub fn composite<R: AssetResolver + ?Sized>(
    position: &Position,
    config: &VisualConfig,
    geometry: &Geometry,
    resolver: &R,
) -> DiagramResult<RgbaImage> {
    let cell = geometry.cell_size;
    let top = i64::from(geometry.top_padding);
    let canvas = geometry.board_canvas();
    let mut img = RgbaImage::new(canvas.width, canvas.height);

    if let Some(texture) = &config.texture {
        let tex = resolver.board_texture(&texture.name, cell)?;
        overlay(&mut img, &tex, 0, top);
    }

    if config.texture.is_none() || !config.highlights.is_empty() {
        let light = config.light.opaque();
        let dark = config.dark.opaque();
        for y in 1..=BOARD_CELLS as u32 {
            for x in 1..=BOARD_CELLS as u32 {
                let color = if (x + y) % 2 == 0 { light } else { dark };
                let px = i64::from((x - 1) * cell);
                let py = i64::from((y - 1) * cell) + top;
                fill_rect(&mut img, px, py, cell, cell, color);
            }
        }
    }

    let tint = config.highlight.with_alpha(config.highlight_alpha);
    for square in &config.highlights {
        let c = square.to_cell(config.flipped);
        let px = i64::from(c.col as u32 * cell);
        let py = i64::from(c.row as u32 * cell) + top;
        tint_rect(&mut img, px, py, cell, cell, tint);
    }

    for (c, piece) in position.pieces() {
        let sprite = resolver.piece(&piece.short_code(), &config.theme.name, cell)?;
        if sprite.height() > cell + geometry.top_padding {
            return Err(DiagramError::validation(format!(
                "sprite {} is {}px tall, board leaves {}px",
                piece.short_code(),
                sprite.height(),
                cell + geometry.top_padding
            )));
        }
        let px = i64::from(c.col as u32 * cell);
        let py = i64::from((c.row as u32 + 1) * cell) - i64::from(sprite.height()) + top;
        overlay(&mut img, &sprite, px, py);
    }

    tracing::trace!(width = img.width(), height = img.height(), "board composited");
    Ok(img)
}

#[cfg(test)]
#[path = "../../tests/unit/render/board.rs"]
mod tests;
