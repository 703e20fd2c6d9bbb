use std::error::Error;
use std::process;
use std::thread;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use spitebot::bots::registry::{create_bot_from_spec, label_for_spec};
use spitebot::{Bot, Game, GameError, describe_move, render_view};

const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;

#[derive(Parser, Debug)]
#[command(
    about = "Play or simulate Spite and Malice between two players",
    version,
    author
)]
struct SimulateArgs {
    /// Bot specs for the two players: human[:name], random[:seed],
    /// search[:seed].
    #[arg(num_args = 0..=2)]
    bots: Vec<String>,
    /// Seed for shuffling the deck.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// Stop after the specified number of elementary moves.
    #[arg(long)]
    max_moves: Option<usize>,
    /// Show the board and chosen moves as the game progresses.
    #[arg(long)]
    visualize: bool,
    /// Pause between applied moves, in milliseconds.
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,
    /// Shuffle the two jokers of each pack into the deck.
    #[arg(long)]
    jokers: bool,
    /// Cards dealt to each pay-off pile (standard rules deal 20).
    #[arg(long, default_value_t = spitebot::card::PAY_OFF_SIZE)]
    pay_off_size: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = SimulateArgs::parse();
    let mut bot_specs = args.bots.clone();
    if bot_specs.is_empty() {
        bot_specs = vec![String::from("human"), String::from("search")];
    }
    if bot_specs.len() != 2 {
        return Err(format!("expected exactly 2 players, received {}", bot_specs.len()).into());
    }

    let mut game = Game::builder()
        .with_seed(args.seed)
        .with_jokers(args.jokers)
        .with_pay_off_size(args.pay_off_size)
        .build()?;

    let mut bots: Vec<Box<dyn Bot>> = Vec::with_capacity(bot_specs.len());
    let mut is_human = Vec::with_capacity(bot_specs.len());
    for (index, spec) in bot_specs.iter().enumerate() {
        bots.push(create_bot_from_spec(spec, index, args.seed)?);
        is_human.push(label_for_spec(spec) == "human");
    }

    println!("Starting Spite and Malice: {} vs {}.\n", bot_specs[0], bot_specs[1]);
    let mut moves = 0usize;
    while !game.is_finished() {
        if let Some(limit) = args.max_moves {
            if moves >= limit {
                println!("Max move limit {limit} reached. Stopping simulation.");
                break;
            }
        }
        let current = game.current_player();
        let view = game.view();
        if args.visualize {
            println!("{}", render_view(&view));
        }
        let mv = bots[current].select_move(&view);
        if args.visualize {
            println!("Player {current}: {}\n", describe_move(&view, &mv));
        }
        match game.apply_move(mv) {
            Ok(()) => {}
            Err(GameError::InvalidMove(invalid)) if is_human[current] => {
                // Humans get re-prompted; engine-generated moves are legal
                // by construction, so the same failure from a bot aborts.
                println!("Invalid move: {invalid}");
                continue;
            }
            Err(err) => return Err(err.into()),
        }
        moves += 1;
        if args.delay_ms > 0 {
            thread::sleep(Duration::from_millis(args.delay_ms));
        }
    }

    if let Some(winner) = game.winner() {
        println!("Game finished after {moves} moves. Winner: Player {winner}.");
    } else {
        println!("Simulation stopped before completion.");
    }
    Ok(())
}
