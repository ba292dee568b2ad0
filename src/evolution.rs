//! Evolutionary move search.
//!
//! Individuals are single legal moves of the side to move. Fitness is the
//! material score after the move, signed so that higher is better for the
//! mover. Each generation keeps half of the population by tournament
//! selection and refills the rest with copies of the survivors, some of
//! them replaced by fresh random moves.
use crate::algorithms::simulate;
use crate::boards::Board;
use crate::evaluation::evaluate;
use crate::moves::Move;
use log::debug;
use rand::seq::index;
use rand::Rng;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub generations: usize,
    /// Chance that a refilled individual is replaced by a random move.
    pub mutation_rate: f64,
    /// Distinct population slots drawn per tournament.
    pub tournament_size: usize,
    pub seed: u64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        EvolutionConfig {
            population_size: 10,
            generations: 3,
            mutation_rate: 0.1,
            tournament_size: 3,
            seed: 42,
        }
    }
}

struct Fitness<'a> {
    board: &'a Board,
    sign: i32,
    cache: HashMap<Move, i32>,
}

impl<'a> Fitness<'a> {
    fn new(board: &'a Board) -> Self {
        Fitness {
            board: board,
            sign: board.side_to_move().sign() as i32,
            cache: HashMap::new(),
        }
    }

    fn of(&mut self, mv: Move) -> i32 {
        let board = self.board;
        let sign = self.sign;
        *self
            .cache
            .entry(mv)
            .or_insert_with(|| evaluate(&simulate(board, mv)) * sign)
    }
}

fn random_move<R: Rng + ?Sized>(moves: &[Move], rng: &mut R) -> Move {
    moves[rng.gen_range(0..moves.len())]
}

/// Draws `size` distinct slots of the population and returns the fittest
/// individual among them. A tournament larger than the population covers
/// all of it.
fn tournament<R: Rng + ?Sized>(
    population: &[Move],
    size: usize,
    fitness: &mut Fitness,
    rng: &mut R,
) -> Move {
    let amount = size.max(1).min(population.len());
    let slots = index::sample(rng, population.len(), amount);
    let mut winner = population[slots.index(0)];
    for slot in slots.iter().skip(1) {
        let challenger = population[slot];
        if fitness.of(challenger) > fitness.of(winner) {
            winner = challenger;
        }
    }
    winner
}

/// Runs the evolutionary search. None if the side to move has no legal move.
pub fn evolve<R: Rng + ?Sized>(board: &Board, config: &EvolutionConfig, rng: &mut R) -> Option<Move> {
    let moves = board.legal_moves();
    if moves.is_empty() {
        return None;
    }
    let size = config.population_size.max(1);
    let mut fitness = Fitness::new(board);

    let mut population: Vec<Move> = (0..size).map(|_| random_move(&moves, rng)).collect();

    for generation in 0..config.generations {
        let survivors: Vec<Move> = (0..(size + 1) / 2)
            .map(|_| tournament(&population, config.tournament_size, &mut fitness, rng))
            .collect();

        let mut next = survivors.clone();
        while next.len() < size {
            let parent = random_move(&survivors, rng);
            if rng.gen::<f64>() < config.mutation_rate {
                next.push(random_move(&moves, rng));
            } else {
                next.push(parent);
            }
        }
        population = next;
        debug!(
            "generation {}: {} distinct individuals",
            generation,
            population.iter().collect::<HashSet<_>>().len()
        );
    }

    let mut best = population[0];
    for &mv in &population[1..] {
        if fitness.of(mv) > fitness.of(best) {
            best = mv;
        }
    }
    debug!("evolution picked {} with fitness {}", best, fitness.of(best));
    Some(best)
}
