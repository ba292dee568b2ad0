use crate::game_state::*;
use crate::pieces::*;
use crate::squares::Square;
use log::debug;
use std::collections::HashMap;
use std::fmt;

/// Number of logged half-moves the fifty-move rule looks back over.
pub const FIFTY_MOVE_PLIES: usize = 100;
/// Number of logged half-moves the seventy-five-move rule looks back over.
pub const SEVENTY_FIVE_MOVE_PLIES: usize = 150;

/// State of a game as seen from the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Ongoing,
    WhiteWins,
    Draw,
    BlackWins,
}

/// Draws that only end the game when a player asks for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimableDraw {
    FiftyMove,
    ThreefoldRepetition,
}

impl Outcome {
    pub fn win_for(color: Color) -> Outcome {
        match color {
            Color::White => Outcome::WhiteWins,
            Color::Black => Outcome::BlackWins,
        }
    }

    /// The three-slot terminal indicator: (White wins, draw, Black wins).
    /// All zero while the game goes on.
    pub fn indicator(self) -> [u8; 3] {
        match self {
            Outcome::Ongoing => [0, 0, 0],
            Outcome::WhiteWins => [1, 0, 0],
            Outcome::Draw => [0, 1, 0],
            Outcome::BlackWins => [0, 0, 1],
        }
    }

    pub fn is_over(self) -> bool {
        self != Outcome::Ongoing
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::WhiteWins => Some(Color::White),
            Outcome::BlackWins => Some(Color::Black),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Ongoing => "*",
            Outcome::WhiteWins => "1-0",
            Outcome::Draw => "1/2-1/2",
            Outcome::BlackWins => "0-1",
        };
        write!(f, "{}", s)
    }
}

// -------------------------------------
// Checkmate and stalemate
// ------------------------------------

impl GameState {
    /// Decides whether the side to move is mated, given the candidate moves
    /// from `possible_board_moves`. Refills the check-escape cache as a side
    /// effect.
    ///
    /// A missing king counts as a loss for its side.
    pub fn is_checkmate(&mut self, moves: &BoardMoves) -> Outcome {
        let side = self.side_to_move();
        let board = *self.board();
        if board.king_square(side).is_none() {
            return Outcome::win_for(side.opposite());
        }
        if !board.in_check(side) {
            self.set_check_escapes(HashMap::new());
            return Outcome::Ongoing;
        }

        let mut escapes: HashMap<Square, Vec<Square>> = HashMap::new();
        for (origin, destinations) in own_candidates(moves, side) {
            for &destination in destinations {
                if board.is_legal(origin, destination) {
                    escapes
                        .entry(origin)
                        .or_insert_with(Vec::new)
                        .push(destination);
                }
            }
        }

        let mated = escapes.is_empty();
        self.set_check_escapes(escapes);
        if mated {
            debug!("{} is checkmated", side);
            Outcome::win_for(side.opposite())
        } else {
            Outcome::Ongoing
        }
    }

    /// The side to move is not in check and none of its candidates is legal.
    pub fn is_stalemate(&self, moves: &BoardMoves) -> bool {
        let side = self.side_to_move();
        let board = self.board();
        if board.in_check(side) {
            return false;
        }
        !own_candidates(moves, side).any(|(origin, destinations)| {
            destinations.iter().any(|&d| board.is_legal(origin, d))
        })
    }
}

fn own_candidates(
    moves: &BoardMoves,
    side: Color,
) -> impl Iterator<Item = (Square, &Vec<Square>)> + '_ {
    moves.iter().filter_map(move |(label, destinations)| match parse_label(label) {
        Some((origin, color)) if color == side => Some((origin, destinations)),
        _ => None,
    })
}

// -------------------------------------
// Draw rules
// ------------------------------------

impl GameState {
    /// No capture and no pawn move within the last `plies` logged half-moves.
    fn quiet_for(&self, plies: usize) -> bool {
        let log = self.move_log();
        if log.len() < plies {
            return false;
        }
        log[log.len() - plies..].iter().all(|entry| {
            !entry.contains('x') && !entry.starts_with(|c: char| c.is_ascii_lowercase())
        })
    }

    /// Fifty moves by each side without capture or pawn move. Needs a claim.
    pub fn fifty_move_rule(&self) -> bool {
        self.quiet_for(FIFTY_MOVE_PLIES)
    }

    /// Seventy-five moves by each side without capture or pawn move. Automatic.
    pub fn seventy_five_move_rule(&self) -> bool {
        self.quiet_for(SEVENTY_FIVE_MOVE_PLIES)
    }

    /// The current position occurs for exactly the third time. Needs a claim.
    pub fn three_fold_rule(&self) -> bool {
        self.repetitions() == 3
    }

    /// The current position occurred at least five times. Automatic.
    pub fn five_fold_rule(&self) -> bool {
        self.repetitions() >= 5
    }

    /// Neither side can ever mate: bare kings, a single minor piece against a
    /// bare king, or one bishop each on squares of the same colour.
    pub fn is_dead_position(&self) -> bool {
        let board = self.board();
        let mut kings = 0;
        let mut minors: Vec<(Square, Piece)> = Vec::new();
        for (sq, piece) in board.occupied() {
            match piece.kind() {
                Some(PieceKind::King) => kings += 1,
                Some(PieceKind::Bishop) | Some(PieceKind::Knight) => minors.push((sq, piece)),
                _ => return false,
            }
            if kings + minors.len() > 4 {
                return false;
            }
        }
        if kings != 2 {
            return false;
        }

        match minors.as_slice() {
            [] | [_] => true,
            [(sq_a, a), (sq_b, b)] => {
                a.kind() == Some(PieceKind::Bishop)
                    && b.kind() == Some(PieceKind::Bishop)
                    && a.color() != b.color()
                    && sq_a.is_dark() == sq_b.is_dark()
            }
            _ => false,
        }
    }

    /// The draw the side to move could claim right now, if any.
    pub fn claimable_draw(&self) -> Option<ClaimableDraw> {
        if self.fifty_move_rule() {
            Some(ClaimableDraw::FiftyMove)
        } else if self.three_fold_rule() {
            Some(ClaimableDraw::ThreefoldRepetition)
        } else {
            None
        }
    }
}

// -------------------------------------
// Terminal state
// ------------------------------------

impl GameState {
    /// Terminal state of the game. Claimable draws are never claimed.
    pub fn is_end(&mut self) -> Outcome {
        self.is_end_with_claims(|_| false)
    }

    /// Like `is_end`, but asks `claim` whether an available fifty-move or
    /// threefold draw is taken.
    pub fn is_end_with_claims<F>(&mut self, mut claim: F) -> Outcome
    where
        F: FnMut(ClaimableDraw) -> bool,
    {
        let board = self.board();
        match (
            board.king_square(Color::White),
            board.king_square(Color::Black),
        ) {
            (None, None) => return Outcome::Draw,
            (None, Some(_)) => return Outcome::BlackWins,
            (Some(_), None) => return Outcome::WhiteWins,
            _ => (),
        }

        let moves = self.possible_board_moves();
        let outcome = self.is_checkmate(&moves);
        if outcome.is_over() {
            return outcome;
        }

        if self.is_stalemate(&moves)
            || self.seventy_five_move_rule()
            || self.five_fold_rule()
            || self.is_dead_position()
        {
            return Outcome::Draw;
        }

        if self.fifty_move_rule() && claim(ClaimableDraw::FiftyMove) {
            return Outcome::Draw;
        }
        if self.three_fold_rule() && claim(ClaimableDraw::ThreefoldRepetition) {
            return Outcome::Draw;
        }
        Outcome::Ongoing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(g: &mut GameState, moves: &[(&str, &str)]) {
        for (o, d) in moves {
            assert!(g.apply_move(o, d), "{} -> {} rejected\n{}", o, d, g);
        }
    }

    const KNIGHT_DANCE: [(&str, &str); 4] =
        [("g1", "f3"), ("g8", "f6"), ("f3", "g1"), ("f6", "g8")];

    #[test]
    fn test_indicator() {
        assert_eq!(Outcome::Ongoing.indicator(), [0, 0, 0]);
        assert_eq!(Outcome::WhiteWins.indicator(), [1, 0, 0]);
        assert_eq!(Outcome::Draw.indicator(), [0, 1, 0]);
        assert_eq!(Outcome::BlackWins.indicator(), [0, 0, 1]);
        assert_eq!(Outcome::win_for(Color::Black), Outcome::BlackWins);
        assert_eq!(Outcome::Draw.winner(), None);
    }

    #[test]
    fn test_start_is_ongoing() {
        let mut g = GameState::standard_setup();
        assert_eq!(g.is_end(), Outcome::Ongoing);
        assert_eq!(g.claimable_draw(), None);
    }

    #[test]
    fn test_fools_mate() {
        let mut g = GameState::standard_setup();
        play(&mut g, &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")]);
        assert_eq!(g.move_log().last().unwrap(), "Qh4+");
        assert_eq!(g.is_end(), Outcome::BlackWins);
        assert_eq!(g.is_end().indicator(), [0, 0, 1]);
    }

    #[test]
    fn test_back_rank_mate() {
        let mut g: GameState = "6k1/5ppp/8/8/8/8/8/R5K1 w - -".parse().unwrap();
        play(&mut g, &[("a1", "a8")]);
        let moves = g.possible_board_moves();
        assert_eq!(g.is_checkmate(&moves), Outcome::WhiteWins);
        assert_eq!(g.is_end(), Outcome::WhiteWins);
    }

    #[test]
    fn test_check_is_not_mate() {
        let mut g = GameState::standard_setup();
        play(&mut g, &[("e2", "e4"), ("f7", "f6"), ("d1", "h5")]);
        let moves = g.possible_board_moves();
        assert_eq!(g.is_checkmate(&moves), Outcome::Ongoing);
        assert_eq!(g.check_escapes().len(), 1);
    }

    #[test]
    fn test_missing_king() {
        let mut g: GameState = "8/8/8/8/8/8/8/4K3 w - -".parse().unwrap();
        assert_eq!(g.is_end(), Outcome::WhiteWins);
        let mut g: GameState = "4k3/8/8/8/8/8/8/8 w - -".parse().unwrap();
        assert_eq!(g.is_end(), Outcome::BlackWins);
        let mut g: GameState = "8/8/8/8/8/8/8/8 w - -".parse().unwrap();
        assert_eq!(g.is_end(), Outcome::Draw);
    }

    #[test]
    fn test_stalemate() {
        let mut g: GameState = "k7/8/1Q6/8/8/8/8/7K b - -".parse().unwrap();
        let moves = g.possible_board_moves();
        assert!(g.is_stalemate(&moves));
        assert_eq!(g.is_end(), Outcome::Draw);

        let g = GameState::standard_setup();
        assert!(!g.is_stalemate(&g.possible_board_moves()));
    }

    #[test]
    fn test_dead_positions() {
        for d in &[
            "4k3/8/8/8/8/8/8/4K3 w - -",
            "4k3/8/8/8/8/8/8/2B1K3 w - -",
            "4k3/8/8/8/8/8/8/1n2K3 b - -",
            // Bishops on c1 and f8, both dark
            "4kb2/8/8/8/8/8/8/2B1K3 w - -",
        ] {
            let mut g: GameState = d.parse().unwrap();
            assert!(g.is_dead_position(), "{}", d);
            assert_eq!(g.is_end(), Outcome::Draw, "{}", d);
        }
        for d in &[
            "4k3/8/8/8/8/8/4P3/4K3 w - -",
            "4k3/8/8/8/8/8/8/R3K3 w - -",
            "4k3/8/8/8/8/8/8/1NN1K3 w - -",
            // Bishops on c1 (dark) and c8 (light)
            "2b1k3/8/8/8/8/8/8/2B1K3 w - -",
            "4k3/8/8/8/8/8/8/1N2K1n1 w - -",
        ] {
            let g: GameState = d.parse().unwrap();
            assert!(!g.is_dead_position(), "{}", d);
        }
    }

    #[test]
    fn test_repetition_rules() {
        let mut g = GameState::standard_setup();
        play(&mut g, &KNIGHT_DANCE);
        assert_eq!(g.repetitions(), 2);
        assert!(!g.three_fold_rule());

        play(&mut g, &KNIGHT_DANCE);
        assert_eq!(g.repetitions(), 3);
        assert!(g.three_fold_rule());
        assert!(!g.five_fold_rule());
        assert_eq!(g.claimable_draw(), Some(ClaimableDraw::ThreefoldRepetition));
        assert_eq!(g.is_end(), Outcome::Ongoing);
        assert_eq!(
            g.is_end_with_claims(|c| c == ClaimableDraw::ThreefoldRepetition),
            Outcome::Draw
        );

        // The claim window is the third occurrence only
        play(&mut g, &KNIGHT_DANCE);
        assert_eq!(g.repetitions(), 4);
        assert!(!g.three_fold_rule());

        play(&mut g, &KNIGHT_DANCE);
        assert!(g.five_fold_rule());
        assert_eq!(g.is_end(), Outcome::Draw);
    }

    #[test]
    fn test_fifty_and_seventy_five_move_rules() {
        let mut g = GameState::standard_setup();
        play(&mut g, &[("e2", "e4"), ("e7", "e5")]);
        for _ in 0..24 {
            play(&mut g, &KNIGHT_DANCE);
        }
        assert_eq!(g.move_log().len(), 98);
        assert!(!g.fifty_move_rule());

        // The pawn moves are still inside the window
        play(&mut g, &KNIGHT_DANCE[..2]);
        assert!(!g.fifty_move_rule());

        play(&mut g, &KNIGHT_DANCE[2..]);
        assert_eq!(g.move_log().len(), 102);
        assert!(g.fifty_move_rule());
        assert!(!g.seventy_five_move_rule());
        assert_eq!(g.claimable_draw(), Some(ClaimableDraw::FiftyMove));

        for _ in 0..12 {
            play(&mut g, &KNIGHT_DANCE);
        }
        assert_eq!(g.move_log().len(), 150);
        assert!(!g.seventy_five_move_rule());
        play(&mut g, &KNIGHT_DANCE);
        assert!(g.seventy_five_move_rule());
    }

    #[test]
    fn test_captures_break_the_quiet_window() {
        let mut g: GameState = "r3k3/8/8/8/8/8/8/R3K3 w - -".parse().unwrap();
        play(&mut g, &[("a1", "a8"), ("e8", "e7")]);
        assert_eq!(g.move_log()[0], "Rxa8+");
        assert!(!g.quiet_for(2));
        play(&mut g, &[("a8", "a7"), ("e7", "e8")]);
        assert!(g.quiet_for(2));
        assert!(!g.quiet_for(3));
    }
}
