use std::sync::Arc;

use parking_lot::Mutex;

use super::*;
use crate::foundation::error::DiagramError;
use crate::layout::catalog::Catalog;
use crate::layout::request::DiagramRequest;
use crate::layout::resolver::resolve;
use crate::position::fen::parse;

const WHITE_SPRITE: [u8; 4] = [250, 250, 250, 255];
const BLACK_SPRITE: [u8; 4] = [5, 5, 5, 255];
const TEXTURE: [u8; 4] = [100, 60, 20, 255];

/// Solid sprites `cell` wide and `cell * height_ratio` tall; records every lookup.
struct FakeResolver {
    height_ratio: u32,
    calls: Mutex<Vec<String>>,
    fail_on: Option<&'static str>,
}

impl FakeResolver {
    fn new(height_ratio: u32) -> Self {
        Self {
            height_ratio,
            calls: Mutex::new(Vec::new()),
            fail_on: None,
        }
    }
}

impl AssetResolver for FakeResolver {
    fn piece(&self, code: &str, theme: &str, cell_size: u32) -> DiagramResult<Arc<RgbaImage>> {
        self.calls.lock().push(format!("{theme}/{code}"));
        if self.fail_on == Some(code) {
            return Err(DiagramError::asset(code, "offline"));
        }
        let px = if code.starts_with('w') { WHITE_SPRITE } else { BLACK_SPRITE };
        let h = cell_size * self.height_ratio;
        Ok(Arc::new(RgbaImage::from_pixel(cell_size, h, image::Rgba(px))))
    }

    fn board_texture(&self, texture: &str, cell_size: u32) -> DiagramResult<Arc<RgbaImage>> {
        self.calls.lock().push(format!("texture/{texture}"));
        let side = cell_size * 8;
        Ok(Arc::new(RgbaImage::from_pixel(side, side, image::Rgba(TEXTURE))))
    }
}

fn setup(request: DiagramRequest) -> (Position, VisualConfig, Geometry) {
    let (config, geometry) = resolve(&request, &Catalog::builtin().unwrap()).unwrap();
    let mut position = parse(&request.fen).unwrap();
    if config.flipped {
        position.flip();
    }
    (position, config, geometry)
}

fn request(fen: &str) -> DiagramRequest {
    DiagramRequest {
        size: "20px".parse().unwrap(),
        ..DiagramRequest::new(fen)
    }
}

fn cell_px(img: &RgbaImage, g: &Geometry, row: u32, col: u32) -> [u8; 4] {
    let c = g.cell_size;
    img.get_pixel(col * c + c / 2, row * c + c / 2 + g.top_padding).0
}

#[test]
fn empty_board_has_dark_a1_and_light_h1() {
    let (pos, cfg, g) = setup(request("8/8/8/8/8/8/8/8"));
    let img = composite(&pos, &cfg, &g, &FakeResolver::new(1)).unwrap();
    assert_eq!(img.dimensions(), (160, 160));

    let light = cfg.light.opaque().0;
    let dark = cfg.dark.opaque().0;
    assert_eq!(cell_px(&img, &g, 7, 0), dark, "a1");
    assert_eq!(cell_px(&img, &g, 0, 7), dark, "h8");
    assert_eq!(cell_px(&img, &g, 7, 7), light, "h1");
    assert_eq!(cell_px(&img, &g, 0, 0), light, "a8");
}

#[test]
fn pieces_are_bottom_aligned_in_their_cells() {
    let (pos, cfg, g) = setup(request("4k3/8/8/8/8/8/8/4K3"));
    let resolver = FakeResolver::new(1);
    let img = composite(&pos, &cfg, &g, &resolver).unwrap();

    assert_eq!(cell_px(&img, &g, 7, 4), WHITE_SPRITE);
    assert_eq!(cell_px(&img, &g, 0, 4), BLACK_SPRITE);
    assert_eq!(*resolver.calls.lock(), vec!["alpha/bK", "alpha/wK"]);
}

#[test]
fn padding_is_measured_from_the_tallest_sprite() {
    let resolver = FakeResolver::new(2);
    assert_eq!(measure_top_padding("staunton", 20, &resolver).unwrap(), 20);
    assert_eq!(resolver.calls.lock().len(), 12);

    assert_eq!(measure_top_padding("alpha", 20, &FakeResolver::new(1)).unwrap(), 0);

    let failing = FakeResolver {
        fail_on: Some("bP"),
        ..FakeResolver::new(1)
    };
    let err = measure_top_padding("alpha", 20, &failing).unwrap_err();
    assert_eq!(err.kind(), "asset_unavailable");
}

#[test]
fn tall_sprites_reach_into_top_padding_unclipped() {
    let (pos, cfg, mut g) = setup(request("r7/8/8/8/8/8/8/8"));
    let resolver = FakeResolver::new(2);
    g.top_padding = measure_top_padding(&cfg.theme.name, g.cell_size, &resolver).unwrap();
    assert_eq!(g.top_padding, 20);

    let img = composite(&pos, &cfg, &g, &resolver).unwrap();
    assert_eq!(img.dimensions(), (160, 180));
    // the 40px rook on a8 starts at the very top of the canvas
    assert_eq!(img.get_pixel(10, 0).0, BLACK_SPRITE);
    assert_eq!(img.get_pixel(10, 39).0, BLACK_SPRITE);
    assert_eq!(img.get_pixel(30, 0).0, [0, 0, 0, 0]);
    assert_eq!(cell_px(&img, &g, 0, 1), cfg.dark.opaque().0);
}

#[test]
fn sprite_taller_than_padding_is_rejected() {
    let (pos, cfg, g) = setup(request("r7/8/8/8/8/8/8/8"));
    assert_eq!(g.top_padding, 0);
    let err = composite(&pos, &cfg, &g, &FakeResolver::new(2)).unwrap_err();
    assert!(matches!(err, DiagramError::Validation(_)), "{err}");
}

#[test]
fn flipped_board_moves_pieces_and_highlights() {
    let mut req = request("8/8/8/8/8/8/8/K7");
    req.flip = true;
    req.highlight_squares = "h8".to_string();
    let (pos, cfg, g) = setup(req);
    let img = composite(&pos, &cfg, &g, &FakeResolver::new(1)).unwrap();

    // a1 is drawn top-right and h8 bottom-left when flipped
    assert_eq!(cell_px(&img, &g, 0, 7), WHITE_SPRITE);
    let h8 = cell_px(&img, &g, 7, 0);
    assert_ne!(h8, cfg.dark.opaque().0);
    assert_ne!(h8, cfg.light.opaque().0);
    assert_eq!(cell_px(&img, &g, 7, 1), cfg.light.opaque().0);
}

#[test]
fn highlight_tints_only_its_cell() {
    let mut req = request("8/8/8/8/8/8/8/8");
    req.highlight_squares = "e4".to_string();
    let (pos, cfg, g) = setup(req);
    let img = composite(&pos, &cfg, &g, &FakeResolver::new(1)).unwrap();

    let e4 = cell_px(&img, &g, 4, 4);
    let dark = cfg.dark.opaque().0;
    let light = cfg.light.opaque().0;
    assert_ne!(e4, dark);
    assert_ne!(e4, light);
    assert_eq!(e4[3], 255);
    assert_eq!(cell_px(&img, &g, 4, 3), dark, "d4 untouched");
}

#[test]
fn texture_replaces_cells_unless_highlights_requested() {
    let mut req = request("8/8/8/8/8/8/8/8");
    req.board_texture = Some(0);
    let (pos, cfg, g) = setup(req.clone());
    let resolver = FakeResolver::new(1);
    let img = composite(&pos, &cfg, &g, &resolver).unwrap();
    assert_eq!(cell_px(&img, &g, 3, 3), TEXTURE);
    assert_eq!(cell_px(&img, &g, 3, 4), TEXTURE);
    assert_eq!(*resolver.calls.lock(), vec!["texture/wood"]);

    req.highlight_squares = "h8".to_string();
    let (pos, cfg, g) = setup(req);
    let img = composite(&pos, &cfg, &g, &FakeResolver::new(1)).unwrap();
    // d5 is light and e5 dark once flat cells are repainted
    assert_eq!(cell_px(&img, &g, 3, 3), cfg.light.opaque().0);
    assert_eq!(cell_px(&img, &g, 3, 4), cfg.dark.opaque().0);
}

#[test]
fn resolver_failure_aborts() {
    let (pos, cfg, g) = setup(request("4k3/8/8/8/8/8/8/4K3"));
    let resolver = FakeResolver {
        fail_on: Some("wK"),
        ..FakeResolver::new(1)
    };
    let err = composite(&pos, &cfg, &g, &resolver).unwrap_err();
    assert_eq!(err.kind(), "asset_unavailable");
}
