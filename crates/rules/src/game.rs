//! Wrapper around the `shakmaty` engine. The rest of the application only
//! sees the vocabulary types from [`crate::types`]; everything chess-legal
//! is answered in here.

use shakmaty::fen::Fen;
use shakmaty::zobrist::Zobrist64;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, File, Position, Rank};
use thiserror::Error;

use crate::types::{Kind, Move, MoveRecord, Piece, Side, Square};

#[derive(Debug, Error)]
pub enum FenError {
    #[error("invalid FEN text: {0}")]
    Parse(#[from] shakmaty::fen::ParseFenError),
    #[error("position is not playable: {0}")]
    Position(String),
}

// --- Conversions between the vocabulary types and shakmaty ---

fn to_engine_square(sq: Square) -> shakmaty::Square {
    shakmaty::Square::from_coords(File::new(u32::from(sq.file())), Rank::new(u32::from(sq.rank())))
}

fn from_engine_square(sq: shakmaty::Square) -> Square {
    Square::new(u32::from(sq.file()) as u8, u32::from(sq.rank()) as u8)
}

fn kind_of(role: shakmaty::Role) -> Kind {
    match role {
        shakmaty::Role::King => Kind::King,
        shakmaty::Role::Queen => Kind::Queen,
        shakmaty::Role::Bishop => Kind::Bishop,
        shakmaty::Role::Knight => Kind::Knight,
        shakmaty::Role::Rook => Kind::Rook,
        shakmaty::Role::Pawn => Kind::Pawn,
    }
}

fn side_of(color: Color) -> Side {
    match color {
        Color::White => Side::Light,
        Color::Black => Side::Dark,
    }
}

/// The square a user clicks to request this move. Castling is encoded by
/// shakmaty as king-takes-rook, so the target is remapped to the king's
/// destination on the g or c file.
fn ui_target(m: &shakmaty::Move) -> shakmaty::Square {
    match *m {
        shakmaty::Move::Castle { king, rook } => {
            let file = if rook > king { File::G } else { File::C };
            shakmaty::Square::from_coords(file, king.rank())
        }
        _ => m.to(),
    }
}

fn ui_move(m: &shakmaty::Move) -> Option<Move> {
    let from = from_engine_square(m.from()?);
    Some(Move {
        from,
        to: from_engine_square(ui_target(m)),
        promotion: m.promotion().map(kind_of),
        capture: m.capture().map(kind_of),
    })
}

/// One chess game. Holds the current position plus the hash history needed
/// for repetition detection, which shakmaty positions do not carry.
#[derive(Debug, Clone)]
pub struct Game {
    position: Chess,
    history: Vec<Zobrist64>,
}

impl Game {
    /// A fresh game in the standard starting position.
    pub fn new() -> Game {
        Game::from_position(Chess::default())
    }

    pub fn from_fen(text: &str) -> Result<Game, FenError> {
        let fen = Fen::from_ascii(text.as_bytes())?;
        let position = fen
            .into_position(CastlingMode::Standard)
            .map_err(|e: shakmaty::PositionError<Chess>| FenError::Position(e.to_string()))?;
        Ok(Game::from_position(position))
    }

    fn from_position(position: Chess) -> Game {
        let mut game = Game { position, history: Vec::new() };
        game.history.push(game.hash());
        game
    }

    fn hash(&self) -> Zobrist64 {
        self.position.zobrist_hash(EnPassantMode::Legal)
    }

    pub fn turn(&self) -> Side {
        side_of(self.position.turn())
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let piece = self.position.board().piece_at(to_engine_square(square))?;
        Some(Piece { kind: kind_of(piece.role), side: side_of(piece.color) })
    }

    /// The board as rows for rendering, rank 8 first.
    pub fn grid(&self) -> [[Option<Piece>; 8]; 8] {
        let mut rows = [[None; 8]; 8];
        for rank in 0..8u8 {
            for file in 0..8u8 {
                rows[usize::from(7 - rank)][usize::from(file)] =
                    self.piece_at(Square::new(file, rank));
            }
        }
        rows
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.position.legal_moves().iter().filter_map(ui_move).collect()
    }

    pub fn legal_moves_from(&self, square: Square) -> Vec<Move> {
        self.legal_moves().into_iter().filter(|m| m.from == square).collect()
    }

    /// Executes the move identified by its from/to squares and promotion
    /// kind. Returns `None` without touching the position when no legal
    /// move matches, including a promotion requested without a kind.
    pub fn play(&mut self, from: Square, to: Square, promotion: Option<Kind>) -> Option<MoveRecord> {
        let side = self.turn();
        let legals = self.position.legal_moves();
        let chosen = legals.iter().find(|m| {
            m.from().map(from_engine_square) == Some(from)
                && from_engine_square(ui_target(m)) == to
                && m.promotion().map(kind_of) == promotion
        })?;
        let captured = chosen.capture().map(kind_of);
        self.position = self.position.clone().play(chosen.clone()).ok()?;
        self.history.push(self.hash());
        Some(MoveRecord { from, to, side, captured })
    }

    // --- Terminal and check queries ---

    pub fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    pub fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    pub fn is_check(&self) -> bool {
        self.position.is_check()
    }

    pub fn is_insufficient_material(&self) -> bool {
        self.position.is_insufficient_material()
    }

    /// The current position has occurred at least three times.
    pub fn is_threefold_repetition(&self) -> bool {
        let Some(&current) = self.history.last() else { return false };
        self.history.iter().filter(|&&h| h == current).count() >= 3
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.position.halfmoves() >= 100
    }

    pub fn is_game_over(&self) -> bool {
        self.is_checkmate()
            || self.is_stalemate()
            || self.is_threefold_repetition()
            || self.is_insufficient_material()
            || self.is_fifty_move_draw()
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}
