use image::RgbaImage;

use crate::foundation::error::{DiagramError, DiagramResult};
use crate::layout::model::{Geometry, VisualConfig};
use crate::position::grid::BOARD_CELLS;
use crate::render::blend::{fill_rect, overlay};
use crate::render::text::{TextLabel, TextRasterizer};

/// File letters left to right for the given orientation.
pub fn file_labels(flipped: bool) -> [char; BOARD_CELLS] {
    std::array::from_fn(|i| {
        let file = if flipped { BOARD_CELLS - 1 - i } else { i };
        char::from(b'a' + file as u8)
    })
}

/// Rank numbers top to bottom for the given orientation.
pub fn rank_labels(flipped: bool) -> [char; BOARD_CELLS] {
    std::array::from_fn(|i| {
        let rank = if flipped { i + 1 } else { BOARD_CELLS - i };
        char::from(b'0' + rank as u8)
    })
}

/// Final assembly: background, frame, board, coordinate labels and caption.
///
/// The board must be supplied (see [`DiagramCompositor::with_board`]) before
/// [`DiagramCompositor::compose`] can succeed.
#[derive(Debug)]
pub struct DiagramCompositor<'a> {
    config: &'a VisualConfig,
    geometry: Geometry,
    text: &'a TextRasterizer,
    board: Option<RgbaImage>,
}

impl<'a> DiagramCompositor<'a> {
    /// Compositor without a board yet.
    pub fn new(config: &'a VisualConfig, geometry: Geometry, text: &'a TextRasterizer) -> Self {
        Self {
            config,
            geometry,
            text,
            board: None,
        }
    }

    /// Attach the composited board layer.
    pub fn with_board(mut self, board: RgbaImage) -> Self {
        self.board = Some(board);
        self
    }

    /// Whether a board has been attached.
    pub fn has_board(&self) -> bool {
        self.board.is_some()
    }

    /// Assemble the opaque diagram.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn compose(&self) -> DiagramResult<RgbaImage> {
        let board = self.board.as_ref().ok_or(DiagramError::BoardNotConfigured)?;
        let expected = self.geometry.board_canvas();
        if board.dimensions() != (expected.width, expected.height) {
            return Err(DiagramError::validation(format!(
                "board is {}x{}, geometry expects {}x{}",
                board.width(),
                board.height(),
                expected.width,
                expected.height
            )));
        }

        let g = &self.geometry;
        let canvas = g.diagram_canvas();
        let mut img = RgbaImage::from_pixel(
            canvas.width,
            canvas.height,
            self.config.background.opaque(),
        );

        if g.border > 0 {
            let (fx, fy) = g.frame_origin();
            let side = g.grid_extent() + 2 * g.border;
            fill_rect(
                &mut img,
                i64::from(fx),
                i64::from(fy),
                side,
                side,
                self.config.border_color.opaque(),
            );
        }

        let (bx, by) = g.board_origin();
        overlay(&mut img, board, i64::from(bx), i64::from(by));

        let labels = self.labels();
        if let Some(layer) =
            self.text
                .render(canvas.width, canvas.height, &self.config.font_family, &labels)?
        {
            overlay(&mut img, &layer, 0, 0);
        }

        tracing::debug!(width = img.width(), height = img.height(), "diagram composed");
        Ok(img)
    }

    fn labels(&self) -> Vec<TextLabel> {
        let g = &self.geometry;
        let cfg = self.config;
        let cell = g.cell_size as f32;
        let (gx, gy) = g.grid_origin();
        let mut labels = Vec::new();

        if cfg.has_caption() {
            let canvas = g.diagram_canvas();
            let band_top = canvas.height - g.caption_band;
            labels.push(TextLabel {
                text: cfg.caption.clone(),
                cx: canvas.width as f32 / 2.0,
                cy: band_top as f32 + g.caption_band as f32 / 2.0,
                size: g.caption_font_size,
                color: cfg.caption_color,
            });
        }

        if cfg.coordinates {
            let band = g.coordinate_band as f32;
            let rank_cx = g.side_padding as f32 + band / 2.0;
            for (i, rank) in rank_labels(cfg.flipped).into_iter().enumerate() {
                labels.push(TextLabel {
                    text: rank.to_string(),
                    cx: rank_cx,
                    cy: gy as f32 + cell * (i as f32 + 0.5),
                    size: g.coordinate_font_size,
                    color: cfg.coordinate_color,
                });
            }

            let file_cy = (gy + g.grid_extent() + g.border) as f32 + band / 2.0;
            for (i, file) in file_labels(cfg.flipped).into_iter().enumerate() {
                labels.push(TextLabel {
                    text: file.to_string(),
                    cx: gx as f32 + cell * (i as f32 + 0.5),
                    cy: file_cy,
                    size: g.coordinate_font_size,
                    color: cfg.coordinate_color,
                });
            }
        }

        labels
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/diagram.rs"]
mod tests;
