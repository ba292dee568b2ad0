//! Particle swarm move search.
//!
//! The legal moves of the side to move are laid out in a flat list. Each
//! particle sits on an index into that list and moves by an integer
//! velocity, pulled towards its own best index and the swarm's best index.
//! Indices wrap around the list.
use crate::algorithms::simulate;
use crate::boards::Board;
use crate::evaluation::evaluate;
use crate::moves::Move;
use log::debug;
use rand::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct SwarmConfig {
    pub particles: usize,
    pub iterations: usize,
    pub inertia: f64,
    pub cognitive: f64,
    pub social: f64,
    pub seed: u64,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        SwarmConfig {
            particles: 10,
            iterations: 5,
            inertia: 0.7,
            cognitive: 1.5,
            social: 1.5,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Particle {
    position: usize,
    velocity: i64,
    best_position: usize,
    best_fitness: i32,
}

/// Mover-relative fitness of every candidate, computed on first use.
struct Landscape<'a> {
    board: &'a Board,
    moves: Vec<Move>,
    sign: i32,
    scores: Vec<Option<i32>>,
}

impl<'a> Landscape<'a> {
    fn new(board: &'a Board, moves: Vec<Move>) -> Self {
        let len = moves.len();
        Landscape {
            board: board,
            moves: moves,
            sign: board.side_to_move().sign() as i32,
            scores: vec![None; len],
        }
    }

    fn len(&self) -> usize {
        self.moves.len()
    }

    fn fitness(&mut self, index: usize) -> i32 {
        if let Some(score) = self.scores[index] {
            return score;
        }
        let score = evaluate(&simulate(self.board, self.moves[index])) * self.sign;
        self.scores[index] = Some(score);
        score
    }
}

/// Runs the swarm. None if the side to move has no legal move.
pub fn particle_swarm<R: Rng + ?Sized>(board: &Board, config: &SwarmConfig, rng: &mut R) -> Option<Move> {
    let moves = board.legal_moves();
    if moves.is_empty() {
        return None;
    }
    let mut land = Landscape::new(board, moves);
    let len = land.len() as i64;

    let mut swarm: Vec<Particle> = (0..config.particles.max(1))
        .map(|_| {
            let position = rng.gen_range(0..land.len());
            Particle {
                position: position,
                velocity: rng.gen_range(-2..=2),
                best_position: position,
                best_fitness: land.fitness(position),
            }
        })
        .collect();

    let mut global_best = swarm[0].best_position;
    let mut global_fitness = swarm[0].best_fitness;
    for p in &swarm[1..] {
        if p.best_fitness > global_fitness {
            global_best = p.best_position;
            global_fitness = p.best_fitness;
        }
    }

    for _ in 0..config.iterations {
        for p in swarm.iter_mut() {
            let r1: f64 = rng.gen();
            let r2: f64 = rng.gen();
            let velocity = config.inertia * p.velocity as f64
                + config.cognitive * r1 * (p.best_position as f64 - p.position as f64)
                + config.social * r2 * (global_best as f64 - p.position as f64);
            p.velocity = velocity as i64;
            p.position = (p.position as i64 + p.velocity).rem_euclid(len) as usize;

            let fitness = land.fitness(p.position);
            if fitness > p.best_fitness {
                p.best_position = p.position;
                p.best_fitness = fitness;
            }
            if fitness > global_fitness {
                global_best = p.position;
                global_fitness = fitness;
            }
        }
    }

    let best = land.moves[global_best];
    debug!("swarm picked {} with fitness {}", best, global_fitness);
    Some(best)
}
