use crate::foundation::core::{Canvas, Rgb8};
use crate::layout::catalog::{TextureRecord, ThemeRecord};
use crate::position::grid::BOARD_CELLS;
use crate::position::square::SquareRef;

/// Fully resolved, validated styling for one render.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualConfig {
    /// Light cell color.
    pub light: Rgb8,
    /// Dark cell color.
    pub dark: Rgb8,
    /// Highlight tint.
    pub highlight: Rgb8,
    /// Alpha of the highlight tint (64 ≈ 25%).
    pub highlight_alpha: u8,
    /// Board texture; `None` paints flat colored cells.
    pub texture: Option<TextureRecord>,
    /// Piece theme.
    pub theme: ThemeRecord,
    /// Caption text (may be empty).
    pub caption: String,
    /// Caption color.
    pub caption_color: Rgb8,
    /// Draw file and rank labels.
    pub coordinates: bool,
    /// Label color.
    pub coordinate_color: Rgb8,
    /// Canvas fill.
    pub background: Rgb8,
    /// Frame color.
    pub border_color: Rgb8,
    /// Font family for text layers.
    pub font_family: String,
    /// Board drawn from Black's side.
    pub flipped: bool,
    /// Squares to tint.
    pub highlights: Vec<SquareRef>,
}

impl VisualConfig {
    /// Whether a caption band is drawn.
    pub fn has_caption(&self) -> bool {
        !self.caption.is_empty()
    }
}

/// Pixel geometry derived from the resolved size, theme and optional layers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// Cell edge in pixels.
    pub cell_size: u32,
    /// Frame thickness around the grid.
    pub border: u32,
    /// Caption font size in pixels.
    pub caption_font_size: f32,
    /// Coordinate label font size in pixels.
    pub coordinate_font_size: f32,
    /// Extra space above the grid for sprites taller than a cell.
    pub top_padding: u32,
    /// Height of the caption strip (0 without caption).
    pub caption_band: u32,
    /// Width of the rank-label column and height of the file-label row (0 without coordinates).
    pub coordinate_band: u32,
    /// Padding added on both sides when a caption is present.
    pub side_padding: u32,
}

impl Geometry {
    /// Width and height of the 8×8 grid.
    pub fn grid_extent(&self) -> u32 {
        self.cell_size * BOARD_CELLS as u32
    }

    /// Board canvas produced by the board compositor: grid plus top padding.
    pub fn board_canvas(&self) -> Canvas {
        Canvas {
            width: self.grid_extent(),
            height: self.grid_extent() + self.top_padding,
        }
    }

    /// Final diagram canvas.
    pub fn diagram_canvas(&self) -> Canvas {
        let framed = self.grid_extent() + 2 * self.border;
        Canvas {
            width: 2 * self.side_padding + self.coordinate_band + framed,
            height: self.top_padding + framed + self.coordinate_band + self.caption_band,
        }
    }

    /// Top-left corner of the frame (outer edge of the border) on the diagram canvas.
    pub fn frame_origin(&self) -> (u32, u32) {
        (self.side_padding + self.coordinate_band, self.top_padding)
    }

    /// Top-left corner of the board canvas on the diagram canvas.
    ///
    /// The board canvas includes the top padding, so its origin sits `top_padding` above the
    /// grid's top edge.
    pub fn board_origin(&self) -> (u32, u32) {
        let (fx, _) = self.frame_origin();
        (fx + self.border, self.border)
    }

    /// Top-left corner of the grid on the diagram canvas.
    pub fn grid_origin(&self) -> (u32, u32) {
        let (bx, by) = self.board_origin();
        (bx, by + self.top_padding)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/model.rs"]
mod tests;
