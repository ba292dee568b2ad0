//! Material evaluation, shared by every search strategy.
//!
//! Scores are in centipawns from White's point of view: positive favours
//! White, negative favours Black. There are no positional terms.
use crate::boards::Board;
use crate::pieces::PieceKind;

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
pub const KING_VALUE: i32 = 20000;

pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => KING_VALUE,
    }
}

/// Evaluate material balance
pub fn evaluate(board: &Board) -> i32 {
    board
        .occupied()
        .filter_map(|(_, piece)| {
            let value = piece_value(piece.kind()?);
            Some(value * piece.color()?.sign() as i32)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position_material_balance() {
        assert_eq!(evaluate(&Board::standard()), 0);
    }

    #[test]
    fn test_white_up_queen() {
        let board = Board::from_descriptor("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -")
            .unwrap();
        assert_eq!(evaluate(&board), QUEEN_VALUE);
    }

    #[test]
    fn test_black_up_pawn() {
        let board = Board::from_descriptor("rnbqkbnr/pppppppp/8/8/8/8/PPPP1PPP/RNBQKBNR b KQkq -")
            .unwrap();
        assert_eq!(evaluate(&board), -PAWN_VALUE);
    }

    #[test]
    fn test_lone_king_counts() {
        let board = Board::from_descriptor("8/8/8/8/8/8/8/4K3 w - -").unwrap();
        assert_eq!(evaluate(&board), KING_VALUE);
    }
}
