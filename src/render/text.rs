use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;

use crate::assets::decode::rasterize_svg;
use crate::foundation::core::Rgb8;
use crate::foundation::error::DiagramResult;

// Rough baseline offset for vertically centering a line of text on a point.
const CENTER_BASELINE_RATIO: f32 = 0.35;

/// One line of text, centered on `(cx, cy)`.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLabel {
    /// Text content.
    pub text: String,
    /// Horizontal center.
    pub cx: f32,
    /// Vertical center.
    pub cy: f32,
    /// Font size in pixels.
    pub size: f32,
    /// Fill color.
    pub color: Rgb8,
}

/// Rasterizes text labels through an SVG layer backed by a shared font database.
///
/// When no font matches, usvg drops the glyphs: the layer stays transparent and the render
/// still succeeds.
#[derive(Clone)]
pub struct TextRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl std::fmt::Debug for TextRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRasterizer")
            .field("faces", &self.face_count())
            .finish()
    }
}

impl TextRasterizer {
    /// Build the font database from system fonts (optional) and `*.ttf|otf|ttc` files in
    /// `font_dirs`.
    pub fn new(load_system_fonts: bool, font_dirs: &[PathBuf]) -> Self {
        let mut db = usvg::fontdb::Database::new();
        if load_system_fonts {
            db.load_system_fonts();
        }
        for dir in font_dirs {
            load_fonts_from_dir(&mut db, dir);
        }
        tracing::debug!(faces = db.faces().count(), "font database ready");
        Self {
            fontdb: Arc::new(db),
        }
    }

    /// Rasterizer with an empty font database; text renders as nothing.
    pub fn without_fonts() -> Self {
        Self::new(false, &[])
    }

    /// Number of loaded font faces.
    pub fn face_count(&self) -> usize {
        self.fontdb.faces().count()
    }

    /// Rasterize `labels` into a transparent `width × height` layer.
    ///
    /// Returns `None` when there is nothing to draw.
    pub fn render(
        &self,
        width: u32,
        height: u32,
        family: &str,
        labels: &[TextLabel],
    ) -> DiagramResult<Option<RgbaImage>> {
        if labels.iter().all(|l| l.text.is_empty()) {
            return Ok(None);
        }

        let svg = labels_to_svg(width, height, family, labels);
        let opts = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            font_resolver: make_font_resolver(),
            font_family: family.to_string(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&svg, &opts)
            .map_err(|e| anyhow::anyhow!("parse text layer svg: {e}"))?;
        Ok(Some(rasterize_svg(&tree, width, height)?))
    }
}

pub(crate) fn labels_to_svg(width: u32, height: u32, family: &str, labels: &[TextLabel]) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    for label in labels.iter().filter(|l| !l.text.is_empty()) {
        let baseline = label.cy + label.size * CENTER_BASELINE_RATIO;
        let _ = write!(
            svg,
            r##"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.2}" fill="#{}" text-anchor="middle">{}</text>"##,
            label.cx,
            baseline,
            escape_xml(family),
            label.size,
            label.color.to_hex(),
            escape_xml(&label.text),
        );
    }
    svg.push_str("</svg>");
    svg
}

/// Escape markup and drop characters XML 1.0 cannot carry (most C0 controls, U+FFFE, U+FFFF).
pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\t' | '\n' | '\r' => out.push(c),
            '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => {}
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable font");
        }
    }
}

// Named family first, then generic fallbacks, then any face at all.
fn make_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                });
            }
            families.push(usvg::fontdb::Family::SansSerif);
            families.push(usvg::fontdb::Family::Serif);

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style: usvg::fontdb::Style::Normal,
            };

            if let Some(id) = fontdb.query(&query) {
                return Some(id);
            }
            fontdb.faces().next().map(|f| f.id)
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
