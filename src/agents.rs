//! Differing kinds of agents that can play the game
use crate::algorithms::Strategy;
use crate::game::Agent;
use crate::game_state::GameState;
use crate::moves::Move;
use crate::utils::seeded_rng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

/// Plays whatever one of the search strategies suggests.
pub struct SearchAgent {
    strategy: Strategy,
    rng: SmallRng,
}

impl SearchAgent {
    /// The random source is seeded from the strategy's configuration and
    /// advances from move to move.
    pub fn new(strategy: Strategy) -> Self {
        SearchAgent {
            rng: seeded_rng(strategy.seed()),
            strategy: strategy,
        }
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }
}

impl Agent for SearchAgent {
    fn play_move(&mut self, state: &GameState) -> Option<Move> {
        self.strategy.suggest_with_rng(state.board(), &mut self.rng)
    }
}

/// Plays a uniformly random legal move.
pub struct RandomAgent {
    rng: SmallRng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        RandomAgent {
            rng: seeded_rng(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn play_move(&mut self, state: &GameState) -> Option<Move> {
        state.legal_moves().choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::AlphaBetaConfig;
    use crate::evolution::EvolutionConfig;
    use crate::swarm::SwarmConfig;

    #[test]
    fn test_agents_play_legal_moves() {
        let state = GameState::standard_setup();
        let mut agents: Vec<Box<dyn Agent>> = vec![
            Box::new(RandomAgent::new(3)),
            Box::new(SearchAgent::new(Strategy::AlphaBeta(AlphaBetaConfig { depth: 1 }))),
            Box::new(SearchAgent::new(Strategy::Evolution(EvolutionConfig::default()))),
            Box::new(SearchAgent::new(Strategy::Swarm(SwarmConfig::default()))),
        ];
        for agent in agents.iter_mut() {
            let mv = agent.play_move(&state).unwrap();
            assert!(state.valid_move(mv.origin, mv.destination));
        }
    }

    #[test]
    fn test_no_move_when_stalemated() {
        let state: GameState = "k7/8/1Q6/8/8/8/8/7K b - -".parse().unwrap();
        assert_eq!(RandomAgent::new(0).play_move(&state), None);
        let mut agent = SearchAgent::new(Strategy::default());
        assert_eq!(agent.play_move(&state), None);
    }
}
