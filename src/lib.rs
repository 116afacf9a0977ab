#![forbid(unsafe_code)]

pub mod arrow;
pub mod assets;
pub mod board;
pub mod canvas;
pub mod color;
pub mod encode_gif;
pub mod error;
pub mod game;
pub mod render;

pub use assets::{FsSpriteCache, SpriteProvider};
pub use board::{
    BOARD_SIZE, BoardSnapshot, MoveVector, Piece, PieceColor, PieceKind, SQUARE_SIZE, Square,
    square_center, square_origin,
};
pub use canvas::BoardCanvas;
pub use error::{ChessgifError, ChessgifResult};
pub use game::{GameSource, PgnGame};
pub use render::{RenderConfig, Renderer};
