use crate::pieces::Color;
use crate::squares::Square;

// ---------------------------------------------
// Castling
// ---------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

/// The four independent castling flags, in descriptor order K, Q, k, q.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights([bool; 4]);

const KING_COL: u8 = 4;

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// Column of the rook this side castles with.
    pub const fn rook_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    /// Column the king lands on.
    pub const fn king_dest_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 2,
        }
    }

    /// Column the rook lands on (the square the king passes over).
    pub const fn rook_dest_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 5,
            CastleSide::Queenside => 3,
        }
    }

    /// Columns between king and rook, all of which must be empty.
    pub fn path_cols(self) -> &'static [u8] {
        match self {
            CastleSide::Kingside => &[5, 6],
            CastleSide::Queenside => &[3, 2, 1],
        }
    }

    pub fn notation(self) -> &'static str {
        match self {
            CastleSide::Kingside => "0-0",
            CastleSide::Queenside => "0-0-0",
        }
    }

    pub fn king_square(color: Color) -> Square {
        Square::from_row_col(color.home_row(), KING_COL)
    }

    pub fn rook_square(self, color: Color) -> Square {
        Square::from_row_col(color.home_row(), self.rook_col())
    }

    /// Recognises a king move from its home square two columns sideways.
    pub fn from_king_move(color: Color, origin: Square, destination: Square) -> Option<CastleSide> {
        if origin != CastleSide::king_square(color) || destination.row() != origin.row() {
            return None;
        }
        CastleSide::BOTH
            .iter()
            .copied()
            .find(|side| side.king_dest_col() == destination.col())
    }
}

impl CastlingRights {
    pub const fn all() -> CastlingRights {
        CastlingRights([true; 4])
    }

    pub const fn none() -> CastlingRights {
        CastlingRights([false; 4])
    }

    fn index(color: Color, side: CastleSide) -> usize {
        let offset = match side {
            CastleSide::Kingside => 0,
            CastleSide::Queenside => 1,
        };
        match color {
            Color::White => offset,
            Color::Black => 2 + offset,
        }
    }

    pub fn has(&self, color: Color, side: CastleSide) -> bool {
        self.0[Self::index(color, side)]
    }

    pub fn set(&mut self, color: Color, side: CastleSide, value: bool) {
        self.0[Self::index(color, side)] = value;
    }

    pub fn clear(&mut self, color: Color, side: CastleSide) {
        self.set(color, side, false);
    }

    pub fn clear_all(&mut self, color: Color) {
        for &side in CastleSide::BOTH.iter() {
            self.clear(color, side);
        }
    }

    /// A piece leaving or arriving on a rook's corner removes the matching right.
    pub fn clear_corner(&mut self, sq: Square) {
        for &color in [Color::White, Color::Black].iter() {
            for &side in CastleSide::BOTH.iter() {
                if side.rook_square(color) == sq {
                    self.clear(color, side);
                }
            }
        }
    }

    /// Descriptor field: a subset of "KQkq", or "-" when empty.
    pub fn to_field(&self) -> String {
        let s: String = "KQkq"
            .chars()
            .zip(self.0.iter())
            .filter(|(_, set)| **set)
            .map(|(c, _)| c)
            .collect();
        if s.is_empty() {
            "-".to_string()
        } else {
            s
        }
    }

    pub fn from_field(field: &str) -> Option<CastlingRights> {
        let mut rights = CastlingRights::none();
        if field == "-" {
            return Some(rights);
        }
        // A strictly ordered subset of "KQkq"
        let mut next = 0;
        for c in field.chars() {
            let i = "KQkq".find(c)?;
            if i < next {
                return None;
            }
            rights.0[i] = true;
            next = i + 1;
        }
        if next == 0 {
            return None;
        }
        Some(rights)
    }
}
