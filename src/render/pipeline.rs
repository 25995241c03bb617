use std::path::{Path, PathBuf};

use image::{DynamicImage, RgbImage};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::assets::resolver::AssetResolver;
use crate::foundation::error::{DiagramError, DiagramResult};
use crate::layout::catalog::Catalog;
use crate::layout::request::DiagramRequest;
use crate::layout::resolver::resolve;
use crate::position::fen;
use crate::render::board::{composite, measure_top_padding};
use crate::render::diagram::DiagramCompositor;
use crate::render::encode::{DEFAULT_JPEG_QUALITY, encode_jpeg};
use crate::render::text::TextRasterizer;

/// Renderer-wide options that are not part of a single request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOpts {
    /// JPEG quality in `1..=100`.
    pub jpeg_quality: u8,
    /// Extra directories scanned for `*.ttf`, `*.otf` and `*.ttc` files.
    pub font_dirs: Vec<PathBuf>,
    /// Whether to load the system font set.
    pub load_system_fonts: bool,
    /// Worker threads for [`Renderer::render_many`]; `None` uses rayon's default.
    pub threads: Option<usize>,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            font_dirs: Vec::new(),
            load_system_fonts: true,
            threads: None,
        }
    }
}

impl RenderOpts {
    /// Parse options from JSON.
    pub fn from_reader<R: std::io::Read>(r: R) -> DiagramResult<Self> {
        let opts: Self =
            serde_json::from_reader(r).map_err(|e| DiagramError::serde(e.to_string()))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Parse options from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> DiagramResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            DiagramError::validation(format!("open render options '{}': {e}", path.display()))
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Check value ranges.
    pub fn validate(&self) -> DiagramResult<()> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(DiagramError::validation(format!(
                "jpeg_quality must be in 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        if self.threads == Some(0) {
            return Err(DiagramError::validation("threads must be >= 1 when set"));
        }
        Ok(())
    }
}

/// End-to-end renderer: request in, opaque image or JPEG bytes out.
///
/// Holds the catalog, an asset resolver and a font database; it is `Sync` whenever the
/// resolver is, so one instance can serve concurrent renders.
pub struct Renderer<'a, R: ?Sized> {
    catalog: &'a Catalog,
    resolver: &'a R,
    text: TextRasterizer,
    opts: RenderOpts,
}

impl<'a, R: AssetResolver + ?Sized> Renderer<'a, R> {
    /// Build a renderer; loads fonts according to `opts`.
    pub fn new(catalog: &'a Catalog, resolver: &'a R, opts: RenderOpts) -> DiagramResult<Self> {
        opts.validate()?;
        let text = TextRasterizer::new(opts.load_system_fonts, &opts.font_dirs);
        Ok(Self {
            catalog,
            resolver,
            text,
            opts,
        })
    }

    /// Options in use.
    pub fn opts(&self) -> &RenderOpts {
        &self.opts
    }

    /// Font faces available to the text layer.
    pub fn font_faces(&self) -> usize {
        self.text.face_count()
    }

    /// Render one request into an opaque RGB image.
    ///
    /// Stages: parse FEN, resolve layout, measure sprites, flip, board, diagram. Any failure
    /// aborts; no asset is requested before the request has been fully validated.
    #[tracing::instrument(level = "debug", skip_all, fields(fen = %request.fen, size = %request.size))]
    pub fn render(&self, request: &DiagramRequest) -> DiagramResult<RgbImage> {
        let mut position = fen::parse(&request.fen)?;
        let (config, mut geometry) = resolve(request, self.catalog)?;
        geometry.top_padding =
            measure_top_padding(&config.theme.name, geometry.cell_size, self.resolver)?;
        if config.flipped {
            position.flip();
        }

        let board = composite(&position, &config, &geometry, self.resolver)?;
        let diagram = DiagramCompositor::new(&config, geometry, &self.text)
            .with_board(board)
            .compose()?;
        Ok(DynamicImage::ImageRgba8(diagram).to_rgb8())
    }

    /// Render one request and encode it as JPEG.
    pub fn render_jpeg(&self, request: &DiagramRequest) -> DiagramResult<Vec<u8>> {
        let img = self.render(request)?;
        let bytes = encode_jpeg(&img, self.opts.jpeg_quality)?;
        tracing::debug!(bytes = bytes.len(), "diagram encoded");
        Ok(bytes)
    }

    /// Render independent requests in parallel; results keep the input order.
    pub fn render_many(
        &self,
        requests: &[DiagramRequest],
    ) -> DiagramResult<Vec<DiagramResult<Vec<u8>>>> {
        let pool = build_thread_pool(self.opts.threads)?;
        Ok(pool.install(|| {
            requests
                .par_iter()
                .map(|request| self.render_jpeg(request))
                .collect()
        }))
    }
}

fn build_thread_pool(threads: Option<usize>) -> DiagramResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| DiagramError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
