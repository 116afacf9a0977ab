use crate::error::{ChessgifError, ChessgifResult};

/// Rendered board edge length in pixels.
pub const BOARD_SIZE: u32 = 480;
/// Edge length of one square in pixels.
pub const SQUARE_SIZE: u32 = BOARD_SIZE / 8;
/// Number of squares on the board.
pub const SQUARE_COUNT: usize = 64;

/// One of the 64 board cells, identified by file (a..h) and rank (1..8).
///
/// Stored as 0-based file/rank indices. Squares iterate rank-major from a1
/// to h8; [`BoardSnapshot::diff`] reports changes in that order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Create a square from 0-based file and rank indices.
    pub fn from_indices(file: u8, rank: u8) -> ChessgifResult<Self> {
        if file > 7 || rank > 7 {
            return Err(ChessgifError::malformed_square(format!(
                "file {file}, rank {rank}"
            )));
        }
        Ok(Self { file, rank })
    }

    /// Parse the canonical two-character form, e.g. "e4".
    pub fn from_name(name: &str) -> ChessgifResult<Self> {
        let bytes = name.as_bytes();
        if bytes.len() != 2 {
            return Err(ChessgifError::malformed_square(name));
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file > 7 || rank > 7 {
            return Err(ChessgifError::malformed_square(name));
        }
        Ok(Self { file, rank })
    }

    /// 0-based file index (a = 0).
    pub fn file(self) -> u8 {
        self.file
    }

    /// 0-based rank index (rank 1 = 0).
    pub fn rank(self) -> u8 {
        self.rank
    }

    /// Canonical text form, e.g. "e4".
    pub fn name(self) -> String {
        format!("{}{}", (b'a' + self.file) as char, self.rank + 1)
    }

    /// Flat index in rank-major iteration order.
    pub fn index(self) -> usize {
        usize::from(self.rank) * 8 + usize::from(self.file)
    }

    /// All 64 squares in rank-major order from a1 to h8.
    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..8).flat_map(|rank| (0u8..8).map(move |file| Square { file, rank }))
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Pixel origin (top-left corner) of a square on the rendered board.
///
/// Pure function of (square, reversed): rank 8 sits at the top when not
/// reversed; reversal mirrors both axes, rotating the visual board 180 so it
/// reads from black's side.
pub fn square_origin(square: Square, reversed: bool) -> (u32, u32) {
    let file = u32::from(square.file());
    let rank = u32::from(square.rank());
    if reversed {
        ((7 - file) * SQUARE_SIZE, rank * SQUARE_SIZE)
    } else {
        (file * SQUARE_SIZE, (7 - rank) * SQUARE_SIZE)
    }
}

/// Pixel center of a square, used for arrow endpoints.
pub fn square_center(square: Square, reversed: bool) -> (f32, f32) {
    let (x, y) = square_origin(square, reversed);
    let half = SQUARE_SIZE as f32 / 2.0;
    (x as f32 + half, y as f32 + half)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceColor {
    White,
    Black,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// A colored piece occupying a square; maps 1:1 to a cached sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: PieceColor,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: PieceColor, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Sprite file stem for this piece, e.g. "wp" for the white pawn.
    pub fn sprite_stem(self) -> &'static str {
        use PieceColor::*;
        use PieceKind::*;
        match (self.color, self.kind) {
            (White, Pawn) => "wp",
            (White, Knight) => "wn",
            (White, Bishop) => "wb",
            (White, Rook) => "wr",
            (White, Queen) => "wq",
            (White, King) => "wk",
            (Black, Pawn) => "bp",
            (Black, Knight) => "bn",
            (Black, Bishop) => "bb",
            (Black, Rook) => "br",
            (Black, Queen) => "bq",
            (Black, King) => "bk",
        }
    }
}

/// The last move as an explicit (from, to) descriptor supplied by the game
/// source. Castling is reported as the king's movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveVector {
    pub from: Square,
    pub to: Square,
}

/// A complete assignment of piece-or-empty to every square at one point in
/// game time. Value type; snapshots are immutable once yielded by a source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardSnapshot {
    occupants: [Option<Piece>; SQUARE_COUNT],
}

impl BoardSnapshot {
    /// All squares empty.
    pub fn empty() -> Self {
        Self {
            occupants: [None; SQUARE_COUNT],
        }
    }

    /// The standard chess starting position.
    pub fn standard_start() -> Self {
        use PieceKind::*;
        let back = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut snapshot = Self::empty();
        for (file, kind) in back.into_iter().enumerate() {
            let file = file as u8;
            snapshot.occupants[usize::from(file)] =
                Some(Piece::new(PieceColor::White, kind));
            snapshot.occupants[usize::from(file) + 8] =
                Some(Piece::new(PieceColor::White, Pawn));
            snapshot.occupants[usize::from(file) + 48] =
                Some(Piece::new(PieceColor::Black, Pawn));
            snapshot.occupants[usize::from(file) + 56] =
                Some(Piece::new(PieceColor::Black, kind));
        }
        snapshot
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        self.occupants[square.index()]
    }

    pub fn set(&mut self, square: Square, occupant: Option<Piece>) {
        self.occupants[square.index()] = occupant;
    }

    /// Squares whose occupant differs from `previous`, in rank-major order.
    pub fn diff(&self, previous: &Self) -> Vec<Square> {
        Square::all()
            .filter(|sq| self.occupants[sq.index()] != previous.occupants[sq.index()])
            .collect()
    }
}
