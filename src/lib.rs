#[macro_use]
extern crate impl_ops;

pub mod agents;
pub mod algorithms;
pub mod boards;
pub mod castle_rights;
pub mod chess_errors;
pub mod descriptor;
pub mod evaluation;
pub mod evolution;
pub mod game;
pub mod game_state;
pub mod movement;
pub mod moves;
pub mod outcome;
pub mod pieces;
pub mod squares;
pub mod swarm;
pub mod utils;

pub use agents::{RandomAgent, SearchAgent};
pub use algorithms::{alpha_beta, AlphaBetaConfig, Strategy, MATE_SCORE};
pub use boards::{Board, STANDARD_DESCRIPTOR};
pub use chess_errors::{ChessError, ChessResult};
pub use evolution::EvolutionConfig;
pub use game::{Agent, Game};
pub use game_state::GameState;
pub use moves::Move;
pub use outcome::{ClaimableDraw, Outcome};
pub use pieces::{Color, Piece, PieceKind};
pub use squares::Square;
pub use swarm::SwarmConfig;
