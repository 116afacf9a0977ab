use std::path::Path;

use anyhow::Context as _;
use shakmaty::{
    Chess, Position as _, Role,
    san::{San, SanPlus},
};

use crate::{
    board::{BoardSnapshot, MoveVector, Piece, PieceColor, PieceKind, Square},
    error::{ChessgifError, ChessgifResult},
};

/// Ordered, finite, restartable-by-reconstruction sequence of board
/// snapshots, as produced by the chess/PGN collaborator.
///
/// The renderer only reads `state` before and after each `advance` and never
/// mutates the source otherwise.
pub trait GameSource {
    /// The live snapshot after the most recent [`GameSource::advance`].
    fn state(&self) -> &BoardSnapshot;

    /// Step to the next ply.
    fn advance(&mut self) -> ChessgifResult<()>;

    /// True once the move sequence is exhausted.
    fn is_finished(&self) -> bool;

    /// The (from, to) descriptor of the most recent ply, if any. Castling is
    /// reported as the king's movement.
    fn last_move(&self) -> Option<MoveVector>;
}

/// A PGN-backed game source.
///
/// Construction tokenizes the movetext (tag pairs, comments, nested
/// variations, NAGs, move numbers and results are stripped) and parses each
/// remaining token as SAN; syntax failures surface here as [`ChessgifError::Parse`].
/// Resolution against the running position happens per [`PgnGame::advance`]
/// call and fails with [`ChessgifError::IllegalMove`].
pub struct PgnGame {
    pos: Chess,
    sans: Vec<San>,
    next: usize,
    state: BoardSnapshot,
    last_move: Option<MoveVector>,
}

impl PgnGame {
    pub fn from_str(pgn: &str) -> ChessgifResult<Self> {
        let sans = movetext_tokens(pgn)
            .into_iter()
            .map(|token| {
                SanPlus::from_ascii(token.as_bytes())
                    .map(|sp| sp.san)
                    .map_err(|_| {
                        ChessgifError::parse(format!("unrecognized movetext token '{token}'"))
                    })
            })
            .collect::<ChessgifResult<Vec<_>>>()?;

        let pos = Chess::default();
        let state = snapshot_from_position(&pos);
        Ok(Self {
            pos,
            sans,
            next: 0,
            state,
            last_move: None,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> ChessgifResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read pgn '{}'", path.display()))?;
        Self::from_str(&text)
    }

    /// Number of plies in the parsed movetext.
    pub fn ply_count(&self) -> usize {
        self.sans.len()
    }
}

impl GameSource for PgnGame {
    fn state(&self) -> &BoardSnapshot {
        &self.state
    }

    fn advance(&mut self) -> ChessgifResult<()> {
        let Some(san) = self.sans.get(self.next) else {
            return Err(ChessgifError::illegal_move(
                "the game is already finished",
            ));
        };

        let mv = san
            .to_move(&self.pos)
            .map_err(|_| ChessgifError::illegal_move(format!("'{san}' at ply {}", self.next + 1)))?;

        let (Some(from), to) = (mv.from(), mv.to()) else {
            return Err(ChessgifError::illegal_move(format!(
                "'{san}' has no origin square"
            )));
        };
        self.last_move = Some(MoveVector {
            from: square_from_shakmaty(from)?,
            to: square_from_shakmaty(to)?,
        });

        self.pos = self.pos.clone().play(&mv).map_err(|_| {
            ChessgifError::illegal_move(format!("'{san}' at ply {}", self.next + 1))
        })?;
        self.state = snapshot_from_position(&self.pos);
        self.next += 1;
        Ok(())
    }

    fn is_finished(&self) -> bool {
        self.next >= self.sans.len()
    }

    fn last_move(&self) -> Option<MoveVector> {
        self.last_move
    }
}

/// Split PGN text into bare SAN tokens.
///
/// Tag-pair lines, `{...}` comments (which may span lines), `;` rest-of-line
/// comments, nested `(...)` variations, `$n` NAGs, move numbers, game
/// results and `!?` annotations are all dropped.
fn movetext_tokens(pgn: &str) -> Vec<String> {
    let mut bare = String::with_capacity(pgn.len());
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;

    for line in pgn.lines() {
        if brace_depth == 0 && line.trim_start().starts_with('[') {
            continue;
        }
        for c in line.chars() {
            match c {
                '{' => brace_depth += 1,
                '}' => brace_depth = brace_depth.saturating_sub(1),
                ';' if brace_depth == 0 => break,
                '(' if brace_depth == 0 => paren_depth += 1,
                ')' if brace_depth == 0 => paren_depth = paren_depth.saturating_sub(1),
                _ if brace_depth == 0 && paren_depth == 0 => bare.push(c),
                _ => {}
            }
        }
        bare.push(' ');
    }

    bare.split_whitespace()
        .filter_map(clean_token)
        .collect()
}

fn clean_token(raw: &str) -> Option<String> {
    if matches!(raw, "1-0" | "0-1" | "1/2-1/2" | "*") || raw.starts_with('$') {
        return None;
    }

    // "12." / "12..." prefixes, possibly glued to the move ("1.e4").
    let token = raw.trim_start_matches(|c: char| c.is_ascii_digit() || c == '.');
    let token = token.trim_end_matches(['!', '?']);
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

fn snapshot_from_position(pos: &Chess) -> BoardSnapshot {
    let board = pos.board();
    let mut snapshot = BoardSnapshot::empty();
    for square in Square::all() {
        let sq = shakmaty::Square::from_coords(
            shakmaty::File::new(u32::from(square.file())),
            shakmaty::Rank::new(u32::from(square.rank())),
        );
        snapshot.set(square, board.piece_at(sq).map(piece_from_shakmaty));
    }
    snapshot
}

fn square_from_shakmaty(sq: shakmaty::Square) -> ChessgifResult<Square> {
    Square::from_indices(u32::from(sq.file()) as u8, u32::from(sq.rank()) as u8)
}

fn piece_from_shakmaty(piece: shakmaty::Piece) -> Piece {
    let color = if piece.color.is_white() {
        PieceColor::White
    } else {
        PieceColor::Black
    };
    let kind = match piece.role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    };
    Piece::new(color, kind)
}
