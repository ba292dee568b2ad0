use std::fmt::{self, Display};

// ---------------------------------------------
// Pieces
// ---------------------------------------------

/// A piece as a signed small integer: the magnitude (1-6) is the kind,
/// the sign is the side (positive = White, who moves first). Zero is an
/// empty square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece(i8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const fn sign(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub const fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row the pawns of this side start on.
    pub(crate) const fn pawn_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row the king and rooks of this side start on.
    pub(crate) const fn home_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Row on which pawns of this side promote.
    pub(crate) const fn last_row(self) -> u8 {
        self.opposite().home_row()
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Letter used in move notation. Pawns have none.
    pub fn notation(self) -> &'static str {
        use PieceKind::*;
        match self {
            Pawn => "",
            Knight => "N",
            Bishop => "B",
            Rook => "R",
            Queen => "Q",
            King => "K",
        }
    }

    /// Uppercase letter used in descriptors.
    pub fn letter(self) -> char {
        use PieceKind::*;
        match self {
            Pawn => 'P',
            Knight => 'N',
            Bishop => 'B',
            Rook => 'R',
            Queen => 'Q',
            King => 'K',
        }
    }

    pub fn from_letter(c: char) -> Option<PieceKind> {
        use PieceKind::*;
        match c.to_ascii_uppercase() {
            'P' => Some(Pawn),
            'N' => Some(Knight),
            'B' => Some(Bishop),
            'R' => Some(Rook),
            'Q' => Some(Queen),
            'K' => Some(King),
            _ => None,
        }
    }

    fn from_magnitude(m: i8) -> Option<PieceKind> {
        PieceKind::ALL.get((m as usize).wrapping_sub(1)).copied()
    }
}

impl Piece {
    pub const EMPTY: Piece = Piece(0);

    pub const fn new(kind: PieceKind, color: Color) -> Piece {
        Piece(kind as i8 * color.sign())
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The raw signed encoding.
    pub const fn value(self) -> i8 {
        self.0
    }

    pub fn kind(self) -> Option<PieceKind> {
        PieceKind::from_magnitude(self.0.abs())
    }

    pub fn color(self) -> Option<Color> {
        match self.0.signum() {
            1 => Some(Color::White),
            -1 => Some(Color::Black),
            _ => None,
        }
    }

    pub fn is(self, kind: PieceKind, color: Color) -> bool {
        self == Piece::new(kind, color)
    }

    pub fn belongs_to(self, color: Color) -> bool {
        self.0 * color.sign() > 0
    }

    /// True if the square holds a piece of the other side.
    pub fn is_enemy_of(self, color: Color) -> bool {
        self.0 * color.sign() < 0
    }

    /// Descriptor letter: uppercase for White, lowercase for Black.
    pub fn to_char(self) -> Option<char> {
        let letter = self.kind()?.letter();
        match self.color()? {
            Color::White => Some(letter),
            Color::Black => Some(letter.to_ascii_lowercase()),
        }
    }

    pub fn from_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_letter(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color))
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Color::*;
        use PieceKind::*;
        let symbol = match (self.kind(), self.color()) {
            (Some(King), Some(White)) => '\u{2654}',
            (Some(Queen), Some(White)) => '\u{2655}',
            (Some(Rook), Some(White)) => '\u{2656}',
            (Some(Bishop), Some(White)) => '\u{2657}',
            (Some(Knight), Some(White)) => '\u{2658}',
            (Some(Pawn), Some(White)) => '\u{2659}',
            (Some(King), Some(Black)) => '\u{265a}',
            (Some(Queen), Some(Black)) => '\u{265b}',
            (Some(Rook), Some(Black)) => '\u{265c}',
            (Some(Bishop), Some(Black)) => '\u{265d}',
            (Some(Knight), Some(Black)) => '\u{265e}',
            (Some(Pawn), Some(Black)) => '\u{265f}',
            _ => '.',
        };
        write!(f, "{}", symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_encoding() {
        assert_eq!(Piece::new(PieceKind::Pawn, Color::White).value(), 1);
        assert_eq!(Piece::new(PieceKind::King, Color::Black).value(), -6);
        assert_eq!(Piece::new(PieceKind::Rook, Color::Black).kind(), Some(PieceKind::Rook));
        assert_eq!(Piece::new(PieceKind::Rook, Color::Black).color(), Some(Color::Black));
        assert_eq!(Piece::EMPTY.kind(), None);
        assert_eq!(Piece::EMPTY.color(), None);
    }

    #[test]
    fn test_sides() {
        let knight = Piece::new(PieceKind::Knight, Color::White);
        assert!(knight.belongs_to(Color::White));
        assert!(knight.is_enemy_of(Color::Black));
        assert!(!Piece::EMPTY.belongs_to(Color::White));
        assert!(!Piece::EMPTY.is_enemy_of(Color::White));
    }

    #[test]
    fn test_letters() {
        for &c in &['P', 'N', 'B', 'R', 'Q', 'K', 'p', 'n', 'b', 'r', 'q', 'k'] {
            assert_eq!(Piece::from_char(c).and_then(|p| p.to_char()), Some(c));
        }
        assert_eq!(Piece::from_char('x'), None);
    }
}
