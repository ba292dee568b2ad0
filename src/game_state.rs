use crate::boards::*;
use crate::chess_errors::*;
use crate::evaluation;
use crate::moves::*;
use crate::pieces::*;
use crate::squares::*;
use lazy_static::lazy_static;
use log::trace;
use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Debug, Display};
use std::str::FromStr;

lazy_static! {
    static ref STANDARD_SETUP: GameState = GameState::from_board(Board::standard());
}

/// Legal-move candidates keyed by origin label (see `square_label`).
pub type BoardMoves = BTreeMap<String, Vec<Square>>;

// -------------------------------------
// GameState
// ------------------------------------

/// A Game State is the record of one game: the current board, the move log
/// and everything derived from the history (repetition counts, the moves
/// that answer a check).
///
/// Searches never mutate a game state; they copy its `Board`.
#[derive(Clone, PartialEq)]
pub struct GameState {
    board: Board,
    initial_descriptor: String,
    move_log: Vec<String>,
    // How often each full descriptor has occurred, the starting position included
    position_counts: HashMap<String, u32>,
    // Origin -> destinations that answer the current check. Empty when not in check.
    check_escapes: HashMap<Square, Vec<Square>>,
}

/// Origin label used as key in `possible_board_moves`: the square name with an
/// uppercase file for White pieces and a lowercase one for Black pieces.
pub fn square_label(sq: Square, color: Color) -> String {
    match color {
        Color::White => sq.to_string().to_uppercase(),
        Color::Black => sq.to_string(),
    }
}

/// Inverse of `square_label`.
pub fn parse_label(label: &str) -> Option<(Square, Color)> {
    let first = label.chars().next()?;
    let color = if first.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    Some((label.parse().ok()?, color))
}

// Public Interface
impl GameState {
    /// Returns a game with the pieces placed on standard chess starting squares
    pub fn standard_setup() -> GameState {
        STANDARD_SETUP.clone()
    }

    pub fn from_descriptor(descriptor: &str) -> ChessResult<GameState> {
        Ok(GameState::from_board(Board::from_descriptor(descriptor)?))
    }

    fn from_board(board: Board) -> GameState {
        let initial_descriptor = board.to_descriptor();
        let mut position_counts = HashMap::new();
        position_counts.insert(initial_descriptor.clone(), 1);
        let mut state = GameState {
            board: board,
            initial_descriptor: initial_descriptor,
            move_log: Vec::new(),
            position_counts: position_counts,
            check_escapes: HashMap::new(),
        };
        state.refresh_check_escapes();
        state
    }

    /// Starts over from `descriptor`. On a malformed descriptor nothing changes
    /// and false is returned.
    pub fn reset(&mut self, descriptor: &str) -> bool {
        match GameState::from_descriptor(descriptor) {
            Ok(state) => {
                *self = state;
                true
            }
            Err(e) => {
                trace!("reset rejected: {}", e);
                false
            }
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// The moves played so far in algebraic notation.
    pub fn move_log(&self) -> &[String] {
        &self.move_log
    }

    pub fn initial_descriptor(&self) -> &str {
        &self.initial_descriptor
    }

    pub fn descriptor(&self) -> String {
        self.board.to_descriptor()
    }

    /// How often `descriptor` has occurred in this game.
    pub fn position_count(&self, descriptor: &str) -> u32 {
        self.position_counts.get(descriptor).copied().unwrap_or(0)
    }

    /// How often the current position has occurred, this occurrence included.
    pub fn repetitions(&self) -> u32 {
        self.position_count(&self.descriptor())
    }

    /// Static material score of the current board.
    pub fn evaluate(&self) -> i32 {
        evaluation::evaluate(&self.board)
    }

    /// True if the last logged move gave check.
    pub fn last_move_gave_check(&self) -> bool {
        self.move_log.last().map_or(false, |m| m.contains('+'))
    }
}

impl FromStr for GameState {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameState::from_descriptor(s)
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Turn: {}  Player: {}\n{}",
            self.move_log.len(),
            self.side_to_move(),
            self.board
        )
    }
}

impl Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Turn: {}  Player: {}\n",
            self.move_log.len(),
            self.side_to_move()
        )?;
        write!(f, "Position: {:?}\nLog: {:?}\n", self.board, self.move_log)?;
        write!(f, "{}", self.board)
    }
}

// -------------------------------------
// Moving impls
// ------------------------------------

impl GameState {
    /// Whether the side to move may play `origin` to `destination`: the origin
    /// holds one of its pieces, the destination is reachable for that piece and
    /// the move does not leave its own king attacked.
    pub fn valid_move(&self, origin: Square, destination: Square) -> bool {
        self.board.is_legal(origin, destination)
    }

    /// Plays a move if it is legal. Either everything is updated (board,
    /// rights, en passant target, log, repetition count, side to move) or
    /// nothing is.
    pub fn try_move(&mut self, origin: Square, destination: Square) -> ChessResult<Move> {
        if !self.valid_move(origin, destination) {
            trace!("rejected {} -> {}", origin, destination);
            return Err(ChessError::IllegalMove {
                origin: origin,
                destination: destination,
            });
        }

        let piece = self.board[origin];
        let mut next = self.board;
        let move_type = next.apply_unchecked(origin, destination);

        let mut entry = match piece.kind() {
            Some(kind) => notation(kind, origin, destination, &move_type),
            None => destination.to_string(),
        };
        if next.in_check(next.side_to_move()) {
            entry.push('+');
        }
        trace!("played {} ({} -> {})", entry, origin, destination);

        self.board = next;
        self.move_log.push(entry);
        self.record_position();
        self.refresh_check_escapes();
        Ok(Move::new(origin, destination))
    }

    /// The `move` operation: plays a move if it is legal and reports whether it did.
    pub fn move_piece(&mut self, origin: Square, destination: Square) -> bool {
        self.try_move(origin, destination).is_ok()
    }

    /// Like `move_piece`, with squares given by name ("e2", "e4").
    pub fn apply_move(&mut self, origin: &str, destination: &str) -> bool {
        match (origin.parse::<Square>(), destination.parse::<Square>()) {
            (Ok(o), Ok(d)) => self.move_piece(o, d),
            _ => false,
        }
    }

    /// True when the last move put a pawn on its last rank and no piece has
    /// been chosen for it yet.
    pub fn needs_promotion(&self) -> bool {
        self.pending_promotion().is_some()
    }

    fn pending_promotion(&self) -> Option<Square> {
        let entry = self.move_log.last()?;
        if entry.contains('=') {
            return None;
        }
        let sq = logged_destination(entry)?;
        let mover = self.side_to_move().opposite();
        if self.board.promotable_pawn(mover, sq) {
            Some(sq)
        } else {
            None
        }
    }

    /// Turns the pawn that just reached its last rank into a `kind` piece and
    /// records the choice in the log (`e8=Q`).
    pub fn try_promote(&mut self, kind: PieceKind) -> ChessResult<()> {
        if kind == PieceKind::Pawn || kind == PieceKind::King {
            return Err(ChessError::InvalidPromotion(kind.letter()));
        }
        let sq = self
            .pending_promotion()
            .ok_or(ChessError::NoPendingPromotion)?;

        self.forget_position();
        self.board.promote(sq, kind);

        let gives_check = self.board.in_check(self.side_to_move());
        if let Some(entry) = self.move_log.last_mut() {
            let trimmed_len = entry.trim_end_matches('+').len();
            entry.truncate(trimmed_len);
            entry.push('=');
            entry.push(kind.letter());
            if gives_check {
                entry.push('+');
            }
            trace!("promoted: {}", entry);
        }

        self.record_position();
        self.refresh_check_escapes();
        Ok(())
    }

    /// The promotion request: false (and no change) if nothing can be promoted.
    pub fn promote(&mut self, kind: PieceKind) -> bool {
        self.try_promote(kind).is_ok()
    }

    fn record_position(&mut self) {
        *self.position_counts.entry(self.descriptor()).or_insert(0) += 1;
    }

    fn forget_position(&mut self) {
        let descriptor = self.descriptor();
        if let Some(count) = self.position_counts.get_mut(&descriptor) {
            *count -= 1;
            if *count == 0 {
                self.position_counts.remove(&descriptor);
            }
        }
    }

    /// Recomputes which moves answer a check on the side to move. Clears the
    /// cache when there is no check.
    pub(crate) fn refresh_check_escapes(&mut self) {
        self.check_escapes.clear();
        let side = self.side_to_move();
        if !self.board.in_check(side) {
            return;
        }
        for mv in self.board.legal_moves() {
            self.check_escapes
                .entry(mv.origin)
                .or_insert_with(Vec::new)
                .push(mv.destination);
        }
    }

    pub(crate) fn check_escapes(&self) -> &HashMap<Square, Vec<Square>> {
        &self.check_escapes
    }

    pub(crate) fn set_check_escapes(&mut self, escapes: HashMap<Square, Vec<Square>>) {
        self.check_escapes = escapes;
    }
}

// -------------------------------------
// Move queries
// ------------------------------------

impl GameState {
    /// Pseudo-legal destinations of every piece on the board, both sides,
    /// keyed by `square_label`. After a checking move each origin is limited
    /// to its check escapes.
    pub fn possible_board_moves(&self) -> BoardMoves {
        let restricted = self.last_move_gave_check();
        let mut res = BTreeMap::new();
        for (origin, piece) in self.board.occupied() {
            let color = match piece.color() {
                Some(c) => c,
                None => continue,
            };
            let mut destinations = self.board.pseudo_moves(origin);
            if restricted {
                destinations = match self.check_escapes.get(&origin) {
                    Some(escapes) => destinations
                        .into_iter()
                        .filter(|d| escapes.contains(d))
                        .collect(),
                    None => Vec::new(),
                };
            }
            res.insert(square_label(origin, color), destinations);
        }
        res
    }

    /// Legal moves of the side to move, in board order.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.board.legal_moves()
    }
}
