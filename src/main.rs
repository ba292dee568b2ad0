use log::info;
use swarmchess::*;

// ---------------------------------------------
// Main
// ---------------------------------------------

const MAX_PLIES: usize = 200;

// Alpha-beta (White) against the evolutionary search (Black). Set
// RUST_LOG=debug to follow the searches.
fn main() {
    env_logger::init();

    let white = SearchAgent::new(Strategy::AlphaBeta(AlphaBetaConfig { depth: 2 }));
    let black = SearchAgent::new(Strategy::Evolution(EvolutionConfig::default()));
    info!(
        "{} vs {}",
        white.strategy().name(),
        black.strategy().name()
    );

    let mut game = Game::new(white, black).with_max_plies(MAX_PLIES);
    let outcome = game.play();
    println!("{}", game.state());

    println!("{}", game.state().move_log().join(" "));
    println!("Result: {} {:?}", outcome, outcome.indicator());
}
