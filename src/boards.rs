use crate::castle_rights::*;
use crate::movement;
use crate::moves::*;
use crate::pieces::*;
use crate::squares::*;
use array_init::array_init;
use std::fmt::{self, Display};
use std::ops;

// ---------------------------------------------
// Board Types
// ---------------------------------------------

pub const STANDARD_DESCRIPTOR: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -";

/// A snapshot of everything the movement rules look at: the pieces, the
/// side to move, castling rights and the en passant target.
///
/// Boards are small and `Copy`, so hypothetical moves are tried on a copy
/// and the copy is thrown away.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    pieces: [Piece; 64],
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
}

// Displays the first 64 items from an iterator in a chessboard style:
//
//   a  b  c  d  e  f  g
// 8 i1 i2 i3 ...        8
// 7 ....
//
// Where i1,...i64 are the items of the iterator.
fn display_chessboard_style<I, C>(it: &mut I, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    I: Iterator<Item = C>,
    C: Display,
{
    write!(f, " ")?;
    for c in 'a'..='h' {
        write!(f, " {}", c)?;
    }
    for row in 0..BOARD_SIZE {
        write!(f, "\n{} ", 8 - row)?;
        for _col in 0..BOARD_SIZE {
            match it.next() {
                Some(i) => write!(f, "{} ", i)?,
                None => return Err(fmt::Error),
            }
        }
        write!(f, "{}", 8 - row)?;
    }
    write!(f, "\n ")?;
    for c in 'a'..='h' {
        write!(f, " {}", c)?;
    }
    Ok(())
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_chessboard_style(&mut self.pieces.iter(), f)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_descriptor())
    }
}

impl ops::Index<Square> for Board {
    type Output = Piece;

    fn index(&self, sq: Square) -> &Piece {
        &self.pieces[sq]
    }
}

impl Board {
    pub fn empty() -> Board {
        Board {
            pieces: array_init(|_| Piece::EMPTY),
            side_to_move: Color::White,
            castling: CastlingRights::none(),
            en_passant: None,
        }
    }

    pub(crate) fn from_parts(
        pieces: [Piece; 64],
        side_to_move: Color,
        castling: CastlingRights,
        en_passant: Option<Square>,
    ) -> Board {
        Board {
            pieces: pieces,
            side_to_move: side_to_move,
            castling: castling,
            en_passant: en_passant,
        }
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Iterates over the occupied squares, a8 first.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all_squares()
            .map(move |sq| (sq, self.pieces[sq]))
            .filter(|(_, p)| !p.is_empty())
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(PieceKind::King, color);
        Square::all_squares().find(|&sq| self.pieces[sq] == king)
    }
}

// -------------------------------------
// Attacks and legality
// ------------------------------------

impl Board {
    /// Pseudo-legal destinations of the piece on `origin`, for whichever
    /// side owns it. Empty squares have none.
    pub fn pseudo_moves(&self, origin: Square) -> Vec<Square> {
        let piece = self.pieces[origin];
        match (piece.kind(), piece.color()) {
            (Some(kind), Some(color)) => movement::destinations(self, kind, color, origin, true),
            _ => Vec::new(),
        }
    }

    /// True if any piece of `attacker` attacks `sq`.
    ///
    /// This rescans every attacking piece and runs once per candidate move
    /// during legality checks, which makes it the hot path of move
    /// validation and of every search.
    pub fn is_attacked_by(&self, sq: Square, attacker: Color) -> bool {
        self.occupied().any(|(origin, p)| match (p.kind(), p.color()) {
            (Some(kind), Some(color)) if color == attacker => {
                movement::attacks(self, kind, color, origin).contains(&sq)
            }
            _ => false,
        })
    }

    /// A side without a king is never in check.
    pub fn in_check(&self, color: Color) -> bool {
        self.king_square(color)
            .map(|k| self.is_attacked_by(k, color.opposite()))
            .unwrap_or(false)
    }

    /// Whether the side to move may play `origin` to `destination`.
    pub fn is_legal(&self, origin: Square, destination: Square) -> bool {
        if !self.pieces[origin].belongs_to(self.side_to_move) {
            return false;
        }
        if !self.pseudo_moves(origin).contains(&destination) {
            return false;
        }
        self.keeps_king_safe(origin, destination)
    }

    /// The king-safety half of `is_legal`, for a move already known to be
    /// pseudo-legal for the side to move.
    fn keeps_king_safe(&self, origin: Square, destination: Square) -> bool {
        let mover = self.side_to_move;
        let piece = self.pieces[origin];

        if piece.is(PieceKind::King, mover) {
            if let Some(side) = CastleSide::from_king_move(mover, origin, destination) {
                // No castling out of or through check
                if self.in_check(mover) {
                    return false;
                }
                let transit = Square::from_row_col(origin.row(), side.rook_dest_col());
                let mut step = *self;
                step.pieces[transit] = piece;
                step.pieces[origin] = Piece::EMPTY;
                if step.is_attacked_by(transit, mover.opposite()) {
                    return false;
                }
            }
        }

        let mut after = *self;
        after.apply_unchecked(origin, destination);
        !after.in_check(mover)
    }

    /// All legal moves of the side to move, in board order.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut res = Vec::new();
        for (origin, piece) in self.occupied() {
            if !piece.belongs_to(self.side_to_move) {
                continue;
            }
            for destination in self.pseudo_moves(origin) {
                if self.keeps_king_safe(origin, destination) {
                    res.push(Move::new(origin, destination));
                }
            }
        }
        res
    }
}

// -------------------------------------
// Moving impls
// ------------------------------------

impl Board {
    /// Plays a move without checking it. The caller must have validated it
    /// with `is_legal`. Pawns reaching the last rank stay pawns until
    /// `promote` is called.
    pub fn apply_unchecked(&mut self, origin: Square, destination: Square) -> MoveType {
        let piece = self.pieces[origin];
        let mover = self.side_to_move;
        let captured = self.pieces[destination];
        let is_pawn = piece.is(PieceKind::Pawn, mover);
        let mut move_type = if captured.is_empty() {
            MoveType::Standard
        } else {
            MoveType::Capture(captured)
        };

        if is_pawn
            && captured.is_empty()
            && destination.col() != origin.col()
            && Some(destination) == self.en_passant
        {
            // The captured pawn stands beside the origin, not on the target
            let victim = Square::from_row_col(origin.row(), destination.col());
            if self.pieces[victim].is(PieceKind::Pawn, mover.opposite()) {
                self.pieces[victim] = Piece::EMPTY;
                move_type = MoveType::EnPassant;
            }
        }

        self.en_passant = None;
        if is_pawn && (destination.row() as i8 - origin.row() as i8).abs() == 2 {
            let passed = (origin.row() + destination.row()) / 2;
            self.en_passant = Some(Square::from_row_col(passed, origin.col()));
            move_type = MoveType::PawnTwostep;
        }

        if piece.is(PieceKind::King, mover) {
            if let Some(side) = CastleSide::from_king_move(mover, origin, destination) {
                let rook_from = side.rook_square(mover);
                let rook_to = Square::from_row_col(origin.row(), side.rook_dest_col());
                self.pieces[rook_to] = self.pieces[rook_from];
                self.pieces[rook_from] = Piece::EMPTY;
                move_type = MoveType::Castle(side);
            }
            self.castling.clear_all(mover);
        }
        self.castling.clear_corner(origin);
        self.castling.clear_corner(destination);

        self.pieces[destination] = piece;
        self.pieces[origin] = Piece::EMPTY;
        self.side_to_move = mover.opposite();
        move_type
    }

    /// Replaces the piece on `sq` by a `kind` piece of the same side.
    pub fn promote(&mut self, sq: Square, kind: PieceKind) {
        if let Some(color) = self.pieces[sq].color() {
            self.pieces[sq] = Piece::new(kind, color);
        }
    }

    /// True if `sq` holds a pawn of `color` standing on its last rank.
    pub fn promotable_pawn(&self, color: Color, sq: Square) -> bool {
        self.pieces[sq].is(PieceKind::Pawn, color) && sq.row() == color.last_row()
    }
}
