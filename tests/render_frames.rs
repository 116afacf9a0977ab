use std::collections::HashMap;

use image::{Rgba, RgbaImage};

use chessgif::{
    ChessgifResult, PgnGame, Piece, PieceColor, PieceKind, RenderConfig, Renderer, SQUARE_SIZE,
    SpriteProvider, Square, square_center, square_origin,
};

/// In-memory sprite provider: one opaque solid tile per piece, each a
/// distinct color, so destination squares are recognizable per pixel.
#[derive(Default)]
struct FakeSprites {
    cache: HashMap<Piece, RgbaImage>,
}

fn sprite_fill(piece: Piece) -> Rgba<u8> {
    let kind = match piece.kind {
        PieceKind::Pawn => 0u8,
        PieceKind::Knight => 1,
        PieceKind::Bishop => 2,
        PieceKind::Rook => 3,
        PieceKind::Queen => 4,
        PieceKind::King => 5,
    };
    let shade = match piece.color {
        PieceColor::White => 200,
        PieceColor::Black => 40,
    };
    Rgba([50 + kind * 30, shade, 90, 255])
}

impl SpriteProvider for FakeSprites {
    fn sprite(&mut self, piece: Piece) -> ChessgifResult<&RgbaImage> {
        Ok(self.cache.entry(piece).or_insert_with(|| {
            RgbaImage::from_pixel(SQUARE_SIZE, SQUARE_SIZE, sprite_fill(piece))
        }))
    }
}

fn renderer(config: RenderConfig) -> Renderer<FakeSprites> {
    Renderer::new(config, FakeSprites::default())
}

fn sq(name: &str) -> Square {
    Square::from_name(name).unwrap()
}

#[test]
fn frame_count_is_one_per_ply_plus_initial() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let mut r = renderer(RenderConfig::default());
    let mut game = PgnGame::from_str("1. e4 e5 2. Nf3").unwrap();
    let frames = r.render_frames(&mut game).unwrap();
    assert_eq!(frames.len(), 3 + 1);
}

#[test]
fn zero_ply_game_still_yields_the_initial_frame() {
    let mut r = renderer(RenderConfig::default());
    let mut game = PgnGame::from_str("").unwrap();
    let frames = r.render_frames(&mut game).unwrap();
    assert_eq!(frames.len(), 1);
}

#[test]
fn initial_frames_are_pixel_identical_across_renders() {
    let mut r = renderer(RenderConfig::default());

    let mut game = PgnGame::from_str("1. e4").unwrap();
    let first = r.render_frames(&mut game).unwrap();

    let mut game = PgnGame::from_str("1. d4").unwrap();
    let second = r.render_frames(&mut game).unwrap();

    assert_eq!(first[0], second[0]);

    // A freshly configured instance agrees too.
    let mut fresh = renderer(RenderConfig::default());
    let mut game = PgnGame::from_str("").unwrap();
    let third = fresh.render_frames(&mut game).unwrap();
    assert_eq!(first[0], third[0]);
}

#[test]
fn color_mutation_invalidates_the_cached_template() {
    let mut r = renderer(RenderConfig::default());
    let mut game = PgnGame::from_str("").unwrap();
    let before = r.render_frames(&mut game).unwrap();

    let lime = Rgba([0, 255, 0, 255]);
    r.set_light_color(lime);
    let mut game = PgnGame::from_str("").unwrap();
    let after = r.render_frames(&mut game).unwrap();

    assert_ne!(before[0], after[0]);
    // e4 is a light square and empty at the start.
    let (x, y) = square_origin(sq("e4"), false);
    assert_eq!(*after[0].get_pixel(x, y), lime);
}

#[test]
fn reversal_mutation_invalidates_the_cached_template() {
    let mut r = renderer(RenderConfig::default());
    let mut game = PgnGame::from_str("").unwrap();
    let unreversed = r.render_frames(&mut game).unwrap();

    r.set_reversed(true);
    let mut game = PgnGame::from_str("").unwrap();
    let reversed = r.render_frames(&mut game).unwrap();

    assert_ne!(unreversed[0], reversed[0]);

    // a1's rook lands in opposite corners of the two renderings.
    let rook = sprite_fill(Piece::new(PieceColor::White, PieceKind::Rook));
    let (x, y) = square_origin(sq("a1"), false);
    assert_eq!(*unreversed[0].get_pixel(x, y), rook);
    let (x, y) = square_origin(sq("a1"), true);
    assert_eq!(*reversed[0].get_pixel(x, y), rook);
}

#[test]
fn e4_scenario_repaints_origin_bare_and_destination_with_the_pawn() {
    let config = RenderConfig::default();
    let mut r = renderer(config);
    let mut game = PgnGame::from_str("1. e4").unwrap();
    let frames = r.render_frames(&mut game).unwrap();
    let after = &frames[1];

    // e2 is a light square; once vacated it shows the bare checker color.
    let (x, y) = square_origin(sq("e2"), false);
    assert_eq!(*after.get_pixel(x, y), config.light);

    let pawn = sprite_fill(Piece::new(PieceColor::White, PieceKind::Pawn));
    let (x, y) = square_origin(sq("e4"), false);
    assert_eq!(*after.get_pixel(x, y), pawn);
}

#[test]
fn arrow_is_drawn_on_the_frame_copy_only() {
    let mut r = renderer(RenderConfig {
        arrow: true,
        ..RenderConfig::default()
    });
    let mut game = PgnGame::from_str("1. e4 e5").unwrap();
    let frames = r.render_frames(&mut game).unwrap();

    // Midpoint of the e2 -> e4 shaft carries the arrow color.
    let from = square_center(sq("e2"), false);
    let to = square_center(sq("e4"), false);
    let mid = ((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0);
    assert_eq!(
        *frames[1].get_pixel(mid.0 as u32, mid.1 as u32),
        chessgif::arrow::ARROW_COLOR
    );

    // The next frame repaints only e7/e5, so e3 (crossed by the previous
    // arrow) must be back to its bare checker color: the live canvas never
    // carried the overlay.
    let (x, y) = (mid.0 as u32, mid.1 as u32);
    assert_ne!(*frames[2].get_pixel(x, y), chessgif::arrow::ARROW_COLOR);
}

#[test]
fn gif_assembly_holds_the_final_frame() {
    use image::{AnimationDecoder as _, codecs::gif::GifDecoder};

    let mut r = renderer(RenderConfig::default());
    let mut game = PgnGame::from_str("1. e4 e5").unwrap();
    let frames = r.render_frames(&mut game).unwrap();
    let core = frames.len();

    let bytes = chessgif::encode_gif::assemble(frames, r.config().duration_ms()).unwrap();
    let decoder = GifDecoder::new(std::io::Cursor::new(bytes)).unwrap();
    let decoded = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(decoded.len(), core + chessgif::encode_gif::FINAL_HOLD_FRAMES);
}

#[test]
fn source_errors_propagate_out_of_the_render() {
    let mut r = renderer(RenderConfig::default());
    let mut game = PgnGame::from_str("1. e4 e4").unwrap();
    assert!(r.render_frames(&mut game).is_err());
}
