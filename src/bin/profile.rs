//! Self-play driver for profiling: both colours are played by the greedy
//! auto-player until the game ends.
//!
//! `cargo run --release --bin profile --features hotpath -- [size] [games] [seed]`

use contagion::ai;
use contagion::game::Game;
use contagion::outcome::GameOutcome;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn arg_or<T: std::str::FromStr>(args: &[String], index: usize, default: T) -> T {
    args.get(index)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn play_out(game: &mut Game, rng: &mut StdRng) -> (usize, Option<GameOutcome>) {
    let max_plies = game.cell_count() * 4;
    let mut plies = 0;
    while plies < max_plies && !game.is_over() {
        match ai::choose_move(game.board(), game.turn(), rng) {
            Some(mv) => {
                if game.play_move(mv.origin, mv.dest).is_err() {
                    break;
                }
            }
            None => {
                if game.pass_turn().is_err() {
                    break;
                }
            }
        }
        plies += 1;
    }
    (plies, game.outcome())
}

#[hotpath::main]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let size = arg_or(&args, 1, contagion::board::STANDARD_SIZE).clamp(2, 32);
    let games = arg_or(&args, 2, 200usize);
    let seed = arg_or(&args, 3, 1u64);

    let mut rng = StdRng::seed_from_u64(seed);
    let (mut red, mut blue, mut draws, mut unfinished) = (0, 0, 0, 0);
    let mut total_plies = 0;

    for n in 0..games {
        let mut game = Game::with_options(size, Some(seed.wrapping_add(n as u64)));
        let (plies, outcome) = play_out(&mut game, &mut rng);
        total_plies += plies;
        match outcome {
            Some(GameOutcome::RedWin) => red += 1,
            Some(GameOutcome::BlueWin) => blue += 1,
            Some(GameOutcome::Draw) => draws += 1,
            None => unfinished += 1,
        }
    }

    info!(
        size,
        games, red, blue, draws, unfinished, total_plies, "self-play finished"
    );
    println!(
        "{games} games on {size}x{size}: red {red}, blue {blue}, draws {draws}, unfinished {unfinished}, {total_plies} plies"
    );
}
