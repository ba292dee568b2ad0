use crate::boards::Board;
use crate::evaluation;
use crate::evolution::{self, EvolutionConfig};
use crate::game_state::GameState;
use crate::moves::Move;
use crate::pieces::*;
use crate::swarm::{self, SwarmConfig};
use crate::utils::seeded_rng;
use log::debug;
use rand::Rng;
use std::cmp::{max, min};

/// Score of a mated side, before the remaining-depth bonus that makes
/// shorter mates preferable.
pub const MATE_SCORE: i32 = 1_000_000;

/// Plays `mv` on a copy of `board`. Pawns reaching the last rank become queens.
/// Used by every search, so none of them can touch the real game.
pub fn simulate(board: &Board, mv: Move) -> Board {
    let mut next = *board;
    let mover = board.side_to_move();
    next.apply_unchecked(mv.origin, mv.destination);
    if next.promotable_pawn(mover, mv.destination) {
        next.promote(mv.destination, PieceKind::Queen);
    }
    next
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlphaBetaConfig {
    /// Plies searched. Zero is treated as one.
    pub depth: u16,
}

impl Default for AlphaBetaConfig {
    fn default() -> Self {
        AlphaBetaConfig { depth: 3 }
    }
}

// -------------------------------------
// Alpha-beta
// ------------------------------------

pub trait AlphaBetaSearch {
    /// Static score of a board. Positive favours White.
    fn score(&self, board: &Board) -> i32;

    /// Best move for the side to move together with its score, or None when
    /// there is no legal move. White maximises, Black minimises; among equal
    /// scores the first move in board order is kept.
    fn alphabeta(&self, board: &Board, depth: u16) -> Option<(Move, i32)> {
        let depth = max(depth, 1);
        let maximizing = board.side_to_move() == Color::White;
        let mut alpha_ = i32::MIN;
        let mut beta_ = i32::MAX;
        let mut best: Option<(Move, i32)> = None;
        let mut nodes = 0u64;

        for mv in board.legal_moves() {
            let child = simulate(board, mv);
            let val = self.alphabeta_helper(&child, depth - 1, alpha_, beta_, !maximizing, &mut nodes);

            let improves = match best {
                None => true,
                Some((_, best_val)) if maximizing => val > best_val,
                Some((_, best_val)) => val < best_val,
            };
            if improves {
                best = Some((mv, val));
            }
            if maximizing {
                alpha_ = max(alpha_, val);
            } else {
                beta_ = min(beta_, val);
            }
        }

        if let Some((mv, val)) = best {
            debug!("alpha-beta depth {}: {} scored {} ({} nodes)", depth, mv, val, nodes);
        }
        best
    }

    #[doc(hidden)]
    fn alphabeta_helper(
        &self,
        board: &Board,
        n: u16,
        alpha: i32,
        beta: i32,
        maximizing: bool,
        nodes: &mut u64,
    ) -> i32 {
        *nodes += 1;
        if n == 0 {
            return self.score(board);
        }

        let moves = board.legal_moves();
        if moves.is_empty() {
            if !board.in_check(board.side_to_move()) {
                return 0;
            }
            // The side to move is mated. Mates found higher up score more.
            let mate = MATE_SCORE + n as i32;
            return if maximizing { -mate } else { mate };
        }

        let mut alpha_ = alpha;
        let mut beta_ = beta;
        let mut val;
        if maximizing {
            val = i32::MIN;
            for mv in moves {
                let child = simulate(board, mv);
                val = max(
                    val,
                    self.alphabeta_helper(&child, n - 1, alpha_, beta_, false, nodes),
                );
                alpha_ = max(alpha_, val);
                if beta_ <= alpha_ {
                    break;
                }
            }
        } else {
            val = i32::MAX;
            for mv in moves {
                let child = simulate(board, mv);
                val = min(
                    val,
                    self.alphabeta_helper(&child, n - 1, alpha_, beta_, true, nodes),
                );
                beta_ = min(beta_, val);
                if beta_ <= alpha_ {
                    break;
                }
            }
        }
        val
    }
}

/// Alpha-beta over plain material.
pub struct MaterialSearch;

impl AlphaBetaSearch for MaterialSearch {
    fn score(&self, board: &Board) -> i32 {
        evaluation::evaluate(board)
    }
}

pub fn alpha_beta(board: &Board, config: &AlphaBetaConfig) -> Option<(Move, i32)> {
    MaterialSearch.alphabeta(board, config.depth)
}

// -------------------------------------
// Strategy selection
// ------------------------------------

/// One of the three move searches together with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    AlphaBeta(AlphaBetaConfig),
    Evolution(EvolutionConfig),
    Swarm(SwarmConfig),
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::AlphaBeta(_) => "alpha-beta",
            Strategy::Evolution(_) => "evolutionary",
            Strategy::Swarm(_) => "particle swarm",
        }
    }

    /// Seed of the randomised strategies. Alpha-beta has none and reports 0.
    pub fn seed(&self) -> u64 {
        match self {
            Strategy::AlphaBeta(_) => 0,
            Strategy::Evolution(c) => c.seed,
            Strategy::Swarm(c) => c.seed,
        }
    }

    /// Suggests a move, drawing randomness from the seed in the configuration.
    pub fn suggest(&self, board: &Board) -> Option<Move> {
        self.suggest_with_rng(board, &mut seeded_rng(self.seed()))
    }

    /// Suggests a move using `rng` for the randomised strategies. Alpha-beta
    /// ignores it.
    pub fn suggest_with_rng<R: Rng + ?Sized>(&self, board: &Board, rng: &mut R) -> Option<Move> {
        match self {
            Strategy::AlphaBeta(c) => alpha_beta(board, c).map(|(mv, _)| mv),
            Strategy::Evolution(c) => evolution::evolve(board, c, rng),
            Strategy::Swarm(c) => swarm::particle_swarm(board, c, rng),
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::AlphaBeta(AlphaBetaConfig::default())
    }
}

impl GameState {
    /// A move for the side to move, or None if it has none. The game itself
    /// is left untouched.
    pub fn suggest_move(&self, strategy: &Strategy) -> Option<Move> {
        strategy.suggest(self.board())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::*;
    use crate::square_vec;

    fn board(descriptor: &str) -> Board {
        Board::from_descriptor(descriptor).unwrap()
    }

    #[test]
    fn test_simulate_leaves_board_untouched() {
        let b = Board::standard();
        let sq = square_vec!("e2", "e4");
        let next = simulate(&b, Move::new(sq[0], sq[1]));
        assert!(b[sq[1]].is_empty());
        assert!(next[sq[1]].is(PieceKind::Pawn, Color::White));
        assert_eq!(next.side_to_move(), Color::Black);
    }

    #[test]
    fn test_simulate_promotes_to_queen() {
        let b = board("8/1P6/8/8/8/8/8/k3K3 w - -");
        let sq = square_vec!("b7", "b8");
        let next = simulate(&b, Move::new(sq[0], sq[1]));
        assert!(next[sq[1]].is(PieceKind::Queen, Color::White));
    }

    #[test]
    fn test_depth_one_is_greedy() {
        for d in &[
            "4k3/8/8/3q4/4P3/8/8/4K2R w K -",
            "r3k3/8/2n5/8/3B4/8/8/R3K3 b Qq -",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -",
            "4kb2/rpp1p3/6p1/6Np/3Q1B2/4P2b/PPP2PPP/RN1R2K1 w - -",
        ] {
            let b = board(d);
            let (mv, val) = alpha_beta(&b, &AlphaBetaConfig { depth: 1 }).unwrap();
            assert_eq!(val, evaluate(&simulate(&b, mv)));
            for other in b.legal_moves() {
                let other_val = evaluate(&simulate(&b, other));
                if b.side_to_move() == Color::White {
                    assert!(other_val <= val, "{}: {} beats {}", d, other, mv);
                } else {
                    assert!(other_val >= val, "{}: {} beats {}", d, other, mv);
                }
            }
        }
    }

    #[test]
    fn test_takes_hanging_queen() {
        let b = board("4k3/8/8/3q4/4P3/8/8/4K2R w K -");
        let sq = square_vec!("e4", "d5");
        let (mv, _) = alpha_beta(&b, &AlphaBetaConfig::default()).unwrap();
        assert_eq!(mv, Move::new(sq[0], sq[1]));
    }

    #[test]
    fn test_finds_mate_in_one() {
        let b = board("6k1/5ppp/8/8/8/8/8/R5K1 w - -");
        let sq = square_vec!("a1", "a8");
        let (mv, val) = alpha_beta(&b, &AlphaBetaConfig { depth: 2 }).unwrap();
        assert_eq!(mv, Move::new(sq[0], sq[1]));
        assert!(val > MATE_SCORE);
    }

    #[test]
    fn test_black_avoids_mate() {
        // Black to move must stop Ra8 mate
        let b = board("6k1/5ppp/8/8/8/8/8/R5K1 b - -");
        let (mv, val) = alpha_beta(&b, &AlphaBetaConfig { depth: 3 }).unwrap();
        assert!(val < MATE_SCORE, "{} still mates", mv);
        let after = simulate(&b, mv);
        assert!(alpha_beta(&after, &AlphaBetaConfig { depth: 2 }).unwrap().1 < MATE_SCORE);
    }

    #[test]
    fn test_no_moves_gives_none() {
        // Stalemated black king
        let b = board("k7/8/1Q6/8/8/8/8/7K b - -");
        assert_eq!(alpha_beta(&b, &AlphaBetaConfig::default()), None);
        assert_eq!(Strategy::default().suggest(&b), None);
    }

    #[test]
    fn test_zero_depth_still_moves() {
        let b = Board::standard();
        assert!(alpha_beta(&b, &AlphaBetaConfig { depth: 0 }).is_some());
    }

    #[test]
    fn test_suggest_move_leaves_game_untouched() {
        let g = GameState::standard_setup();
        let before = g.clone();
        for strategy in &[
            Strategy::AlphaBeta(AlphaBetaConfig { depth: 2 }),
            Strategy::Evolution(EvolutionConfig::default()),
            Strategy::Swarm(SwarmConfig::default()),
        ] {
            let mv = g.suggest_move(strategy).unwrap();
            assert!(g.valid_move(mv.origin, mv.destination), "{}", strategy.name());
        }
        assert!(g == before);
    }
}
