use crate::chess_errors::*;
use std::fmt::{self, Display};
use std::ops;
use std::str::FromStr;

// Chessboard squares on a 8x8 board.
//
// Numbered as follows (row-major, rank 8 first):
//
//     a  b  c  d  e  f  g  h
//   ---------------------------
// 8 | 0  1  2  3  4  5  6  7  | 8
// 7 | 8  9  10 11 12 13 14 15 | 7
// 6 | 16 17 18 19 20 21 22 23 | 6
// 5 | 24 25 26 27 28 29 30 31 | 5
// 4 | 32 33 34 35 36 37 38 39 | 4
// 3 | 40 41 42 43 44 45 46 47 | 3
// 2 | 48 49 50 51 52 53 54 55 | 2
// 1 | 56 57 58 59 60 61 62 63 | 1
//   ---------------------------
//    a  b  c  d  e  f  g  h
//
// ---------------------------------------------
// Squares
// ---------------------------------------------

pub const BOARD_SIZE: u8 = 8;
const FILES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

/// A (row, column) step. Rows grow towards rank 1, columns towards the h-file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Offset(pub i8, pub i8);

impl From<u8> for Square {
    fn from(u: u8) -> Self {
        debug_assert!(u < 64, "Invalid square: {}", u);
        Square(u)
    }
}

impl From<usize> for Square {
    fn from(u: usize) -> Self {
        (u as u8).into()
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err_closure = || ChessError::InvalidSquare(s.to_string());
        let mut chars = s.chars();

        let file = chars
            .next()
            .map(|c| c.to_ascii_lowercase())
            .and_then(|c| FILES.iter().position(|&f| f == c))
            .ok_or_else(err_closure)?;
        let rank = chars
            .next()
            .and_then(|r| r.to_digit(10))
            .ok_or_else(err_closure)?;

        // Catch invalid ranks early, else we underflow below
        if chars.next().is_some() || rank < 1 || rank > 8 {
            return Err(err_closure());
        }

        Ok(Square::from_row_col(8 - rank as u8, file as u8))
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (row, col) = self.to_row_col();
        write!(f, "{}{}", FILES[col as usize], 8 - row)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

pub struct SquareIterator(u8);

impl Iterator for SquareIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 > 63 {
            None
        } else {
            self.0 += 1;
            Some(Square(self.0 - 1))
        }
    }
}

impl Square {
    /// Returns row and col of the square.
    /// Example: Square 63 (h1) is mapped to (7,7)
    pub const fn to_row_col(self) -> (u8, u8) {
        (self.0 / 8, self.0 % 8)
    }

    /// Row and col must correspond to a square on the board.
    pub fn from_row_col(row: u8, col: u8) -> Square {
        debug_assert!(Square::in_board(row as i16, col as i16));
        (row * 8 + col).into()
    }

    /// Checks if row and col belong to a square on the board.
    pub const fn in_board(row: i16, col: i16) -> bool {
        row >= 0 && col >= 0 && row < BOARD_SIZE as i16 && col < BOARD_SIZE as i16
    }

    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    pub const fn col(self) -> u8 {
        self.0 % 8
    }

    /// File letter of the square, 'a' to 'h'.
    pub fn file_char(self) -> char {
        FILES[self.col() as usize]
    }

    /// True for the dark squares (a1, c1, ..., h8).
    pub const fn is_dark(self) -> bool {
        (self.row() + self.col()) % 2 == 1
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Allows to iterate over all squares on the board, a8 first.
    pub fn all_squares() -> SquareIterator {
        SquareIterator(0)
    }
}

impl<T> ops::Index<Square> for [T; 64] {
    type Output = T;

    fn index(&self, index: Square) -> &T {
        &self[index.0 as usize]
    }
}

impl<T> ops::IndexMut<Square> for [T; 64] {
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self[index.0 as usize]
    }
}

// Stepping off the board yields None.
impl_op_ex!(+ |a: &Square, b: &Offset| -> Option<Square> {
    let row = a.row() as i16 + b.0 as i16;
    let col = a.col() as i16 + b.1 as i16;
    if Square::in_board(row, col) {
        Some(Square::from_row_col(row as u8, col as u8))
    } else {
        None
    }
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_squares() {
        assert_eq!("a8".parse::<Square>().unwrap(), Square(0));
        assert_eq!("h1".parse::<Square>().unwrap(), Square(63));
        assert_eq!("e2".parse::<Square>().unwrap(), Square(52));
        assert_eq!("E2".parse::<Square>().unwrap(), Square(52));
        assert_eq!("e2".parse::<Square>().unwrap().to_string(), "e2");
    }

    #[test]
    fn test_parse_invalid_squares() {
        for s in &["", "e", "e9", "e0", "i1", "e22", "22", "No move"] {
            assert!(s.parse::<Square>().is_err(), "{} parsed", s);
        }
    }

    #[test]
    fn test_offsets() {
        let e4: Square = "e4".parse().unwrap();
        assert_eq!(e4 + Offset(-1, 0), Some("e5".parse().unwrap()));
        assert_eq!(e4 + Offset(1, 1), Some("f3".parse().unwrap()));
        let a1: Square = "a1".parse().unwrap();
        assert_eq!(a1 + Offset(1, 0), None);
        assert_eq!(a1 + Offset(0, -1), None);
    }

    #[test]
    fn test_square_colours() {
        assert!("a1".parse::<Square>().unwrap().is_dark());
        assert!(!"h1".parse::<Square>().unwrap().is_dark());
        assert!(!"a8".parse::<Square>().unwrap().is_dark());
        assert!("h8".parse::<Square>().unwrap().is_dark());
    }

    #[test]
    fn test_iterate_all() {
        assert_eq!(Square::all_squares().count(), 64);
        assert_eq!(Square::all_squares().next(), Some(Square(0)));
    }
}
