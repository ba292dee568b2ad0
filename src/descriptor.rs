//! The compact four-field position descriptor:
//!
//! ```text
//! rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -
//! ```
//!
//! piece placement (rank 8 first), side to move, castling availability and
//! en passant target. Move clocks are not part of it.
use crate::boards::*;
use crate::castle_rights::CastlingRights;
use crate::chess_errors::*;
use crate::movement;
use crate::pieces::*;
use crate::squares::*;
use array_init::array_init;
use lazy_static::lazy_static;

lazy_static! {
    static ref STANDARD_BOARD: Board = Board::from_descriptor(STANDARD_DESCRIPTOR)
        .expect("Standard setup failed; descriptor in invalid state.");
}

impl Board {
    /// The standard starting arrangement, White to move.
    pub fn standard() -> Board {
        *STANDARD_BOARD
    }

    pub fn from_descriptor(descriptor: &str) -> ChessResult<Board> {
        let fields: Vec<&str> = descriptor.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(ChessError::descriptor(format!(
                "expected 4 fields, found {}",
                fields.len()
            )));
        }

        let pieces = parse_placement(fields[0])?;
        let side = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(ChessError::descriptor(format!(
                    "unknown side to move '{}'",
                    other
                )))
            }
        };
        let castling = CastlingRights::from_field(fields[2]).ok_or_else(|| {
            ChessError::descriptor(format!("bad castling field '{}'", fields[2]))
        })?;
        let en_passant = match fields[3] {
            "-" => None,
            field => {
                let sq = field
                    .parse::<Square>()
                    .map_err(|_| ChessError::descriptor(format!("bad en passant square '{}'", field)))?;
                // Only the square a pawn just passed over, behind the pushing side
                if sq.row() != movement::en_passant_row(side) {
                    return Err(ChessError::descriptor(format!(
                        "en passant square '{}' not on the passed rank",
                        field
                    )));
                }
                Some(sq)
            }
        };

        Ok(Board::from_parts(pieces, side, castling, en_passant))
    }

    /// The inverse of `from_descriptor`.
    pub fn to_descriptor(&self) -> String {
        let side = match self.side_to_move() {
            Color::White => "w",
            Color::Black => "b",
        };
        let en_passant = self
            .en_passant()
            .map(|sq| sq.to_string())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "{} {} {} {}",
            self.placement(),
            side,
            self.castling().to_field(),
            en_passant
        )
    }

    /// Piece placement field alone.
    pub fn placement(&self) -> String {
        let mut res = String::new();
        for row in 0..BOARD_SIZE {
            let mut empty = 0;
            for col in 0..BOARD_SIZE {
                match self[Square::from_row_col(row, col)].to_char() {
                    Some(c) => {
                        if empty > 0 {
                            res.push_str(&empty.to_string());
                            empty = 0;
                        }
                        res.push(c);
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                res.push_str(&empty.to_string());
            }
            if row < BOARD_SIZE - 1 {
                res.push('/');
            }
        }
        res
    }
}

fn parse_placement(field: &str) -> ChessResult<[Piece; 64]> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != BOARD_SIZE as usize {
        return Err(ChessError::descriptor(format!(
            "expected 8 ranks, found {}",
            ranks.len()
        )));
    }

    let mut cells: Vec<Piece> = Vec::with_capacity(64);
    for (row, rank) in ranks.iter().enumerate() {
        let before = cells.len();
        for c in rank.chars() {
            if let Some(n) = c.to_digit(10) {
                if n == 0 || n > 8 {
                    return Err(ChessError::descriptor(format!("bad run length '{}'", c)));
                }
                cells.extend((0..n).map(|_| Piece::EMPTY));
            } else {
                let piece = Piece::from_char(c)
                    .ok_or_else(|| ChessError::descriptor(format!("unknown piece '{}'", c)))?;
                cells.push(piece);
            }
        }
        if cells.len() - before != BOARD_SIZE as usize {
            return Err(ChessError::descriptor(format!(
                "rank {} does not cover 8 files",
                8 - row
            )));
        }
    }
    Ok(array_init(|i| cells[i]))
}
