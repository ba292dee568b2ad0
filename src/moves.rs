//! Describing the moves that can be done on a chessboard.
use crate::castle_rights::CastleSide;
use crate::pieces::*;
use crate::squares::*;
use std::fmt;

/// An (origin, destination) pair. Everything else about a move follows
/// from the board it is played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub origin: Square,
    pub destination: Square,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.destination)
    }
}

impl Move {
    pub fn new(origin: Square, destination: Square) -> Self {
        Move {
            origin: origin,
            destination: destination,
        }
    }
}

/// What applying a move did to the board, as reported by `Board::apply_unchecked`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveType {
    Standard,
    Capture(Piece),
    EnPassant,
    Castle(CastleSide),
    PawnTwostep,
}

impl MoveType {
    pub fn is_capture(&self) -> bool {
        matches!(self, MoveType::Capture(_) | MoveType::EnPassant)
    }
}

/// Algebraic notation of a move, without check or promotion suffixes.
///
/// Pieces carry their letter, pawns carry the origin file only when capturing:
/// `Nf3`, `Bxc6`, `e4`, `exd5`, `0-0`.
pub fn notation(kind: PieceKind, origin: Square, destination: Square, mt: &MoveType) -> String {
    if let MoveType::Castle(side) = mt {
        return side.notation().to_string();
    }
    let mut s = String::from(kind.notation());
    if mt.is_capture() {
        if kind == PieceKind::Pawn {
            s.push(origin.file_char());
        }
        s.push('x');
    }
    s.push_str(&destination.to_string());
    s
}

/// Destination square of a logged move, if it can be read off the entry.
pub fn logged_destination(entry: &str) -> Option<Square> {
    let body = entry.trim_end_matches(|c| c == '+' || c == '#');
    let body = body.split('=').next()?;
    let start = body.char_indices().rev().nth(1)?.0;
    body[start..].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square_vec;

    #[test]
    fn test_notation() {
        let sq = square_vec!("g1", "f3", "e4", "d5", "e1", "g1");
        assert_eq!(
            notation(PieceKind::Knight, sq[0], sq[1], &MoveType::Standard),
            "Nf3"
        );
        assert_eq!(
            notation(PieceKind::Pawn, sq[2], sq[3], &MoveType::Capture(Piece::EMPTY)),
            "exd5"
        );
        assert_eq!(
            notation(PieceKind::Pawn, sq[2], sq[3], &MoveType::EnPassant),
            "exd5"
        );
        assert_eq!(
            notation(PieceKind::Pawn, sq[3], sq[2], &MoveType::PawnTwostep),
            "e4"
        );
        assert_eq!(
            notation(PieceKind::King, sq[4], sq[5], &MoveType::Castle(CastleSide::Kingside)),
            "0-0"
        );
    }

    #[test]
    fn test_logged_destination() {
        let sq = square_vec!("e8", "f3", "h4");
        assert_eq!(logged_destination("e8"), Some(sq[0]));
        assert_eq!(logged_destination("dxe8+"), Some(sq[0]));
        assert_eq!(logged_destination("e8=Q+"), Some(sq[0]));
        assert_eq!(logged_destination("Nf3"), Some(sq[1]));
        assert_eq!(logged_destination("Qh4+"), Some(sq[2]));
        assert_eq!(logged_destination("0-0"), None);
        assert_eq!(logged_destination(""), None);
    }
}
