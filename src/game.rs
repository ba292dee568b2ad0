use crate::game_state::*;
use crate::moves::*;
use crate::outcome::*;
use crate::pieces::*;
use log::{info, trace, warn};

/// Default limit on half-moves in a self-play game.
pub const DEFAULT_MAX_PLIES: usize = 300;

/// An agent is an object that can play chess by choosing moves appropriate to a
/// current game state.
pub trait Agent {
    /// None when the agent has no move to offer.
    fn play_move(&mut self, state: &GameState) -> Option<Move>;
}

pub struct Game<A1: Agent, A2: Agent> {
    white: A1,
    black: A2,
    state: GameState,
    max_plies: usize,
}

impl<A1: Agent, A2: Agent> Game<A1, A2> {
    pub fn new(white: A1, black: A2) -> Game<A1, A2> {
        Game::from_state(white, black, GameState::standard_setup())
    }

    pub fn from_state(white: A1, black: A2, state: GameState) -> Game<A1, A2> {
        Game {
            white: white,
            black: black,
            state: state,
            max_plies: DEFAULT_MAX_PLIES,
        }
    }

    pub fn with_max_plies(mut self, max_plies: usize) -> Self {
        self.max_plies = max_plies;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Lets the side to move play one move. Pawns reaching the last rank
    /// become queens. An agent that offers no move or an illegal one loses.
    pub fn play_turn(&mut self) -> Outcome {
        let outcome = self.state.is_end();
        if outcome.is_over() {
            return outcome;
        }

        let side = self.state.side_to_move();
        let choice = match side {
            Color::White => self.white.play_move(&self.state),
            Color::Black => self.black.play_move(&self.state),
        };
        let mv = match choice {
            Some(mv) => mv,
            None => {
                warn!("{} offered no move", side);
                return Outcome::win_for(side.opposite());
            }
        };
        if let Err(e) = self.state.try_move(mv.origin, mv.destination) {
            warn!("{} forfeits: {}", side, e);
            return Outcome::win_for(side.opposite());
        }
        if self.state.needs_promotion() {
            self.state.promote(PieceKind::Queen);
        }
        trace!("{} played {}", side, mv);

        self.state.is_end()
    }

    /// Plays until the game ends or the ply limit is reached. Returns
    /// `Outcome::Ongoing` in the latter case.
    pub fn play(&mut self) -> Outcome {
        while self.state.move_log().len() < self.max_plies {
            let outcome = self.play_turn();
            if outcome.is_over() {
                info!(
                    "game over after {} plies: {}",
                    self.state.move_log().len(),
                    outcome
                );
                return outcome;
            }
        }
        info!("stopped after {} plies", self.max_plies);
        Outcome::Ongoing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::*;
    use crate::squares::Square;

    /// Plays a fixed list of moves.
    struct ScriptedAgent {
        moves: Vec<Move>,
    }

    impl ScriptedAgent {
        fn new(moves: &[(&str, &str)]) -> Self {
            ScriptedAgent {
                moves: moves
                    .iter()
                    .rev()
                    .map(|(o, d)| Move::new(o.parse::<Square>().unwrap(), d.parse().unwrap()))
                    .collect(),
            }
        }
    }

    impl Agent for ScriptedAgent {
        fn play_move(&mut self, _state: &GameState) -> Option<Move> {
            self.moves.pop()
        }
    }

    #[test]
    fn test_scripted_fools_mate() {
        let white = ScriptedAgent::new(&[("f2", "f3"), ("g2", "g4")]);
        let black = ScriptedAgent::new(&[("e7", "e5"), ("d8", "h4")]);
        let mut game = Game::new(white, black);
        assert_eq!(game.play(), Outcome::BlackWins);
        assert_eq!(game.state().move_log().len(), 4);
    }

    #[test]
    fn test_illegal_move_forfeits() {
        let white = ScriptedAgent::new(&[("e2", "e5")]);
        let black = ScriptedAgent::new(&[]);
        let mut game = Game::new(white, black);
        assert_eq!(game.play_turn(), Outcome::BlackWins);
        assert!(game.state().move_log().is_empty());
    }

    #[test]
    fn test_auto_queen() {
        let state: GameState = "8/4P3/8/8/8/8/8/k3K3 w - -".parse().unwrap();
        let white = ScriptedAgent::new(&[("e7", "e8")]);
        let mut game = Game::from_state(white, RandomAgent::new(0), state);
        game.play_turn();
        assert_eq!(game.state().move_log()[0], "e8=Q");
    }

    #[test]
    fn test_ply_limit() {
        let mut game = Game::new(RandomAgent::new(1), RandomAgent::new(2)).with_max_plies(6);
        let outcome = game.play();
        assert!(game.state().move_log().len() <= 6);
        if outcome == Outcome::Ongoing {
            assert_eq!(game.state().move_log().len(), 6);
        }
    }
}
