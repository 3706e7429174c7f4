use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dragonchess::notation::{move_notation, parse_move};
use dragonchess::search::{SearchParams, Weights};
use dragonchess::{Game, Move, Side, Strategy, StrategyKind};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Player {
    Human,
    Random,
    Search,
}

#[derive(Parser, Debug)]
#[command(name = "dragonchess", version, about = "Play three-board Dragonchess in the terminal")]
struct Args {
    /// Who plays Gold
    #[arg(long, value_enum, default_value_t = Player::Human)]
    gold: Player,
    /// Who plays Scarlet
    #[arg(long, value_enum, default_value_t = Player::Search)]
    scarlet: Player,
    /// Engine thinking time per move
    #[arg(long, default_value_t = 5000)]
    movetime_ms: u64,
    #[arg(long, default_value_t = 64)]
    max_depth: u32,
    /// Evaluator weights (JSON object or flat array)
    #[arg(long)]
    weights: Option<PathBuf>,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Stop after this many half-moves
    #[arg(long)]
    max_plies: Option<usize>,
    /// Print search statistics after engine moves
    #[arg(long)]
    verbose: bool,
}

fn engine(player: Player, params: SearchParams, weights: &Weights, seed: u64) -> Option<Box<dyn Strategy>> {
    match player {
        Player::Human => None,
        Player::Random => Some(StrategyKind::Random.build(params, weights, seed)),
        Player::Search => Some(StrategyKind::Search.build(params, weights, seed)),
    }
}

/// `None` when the user asked to quit or stdin closed.
fn read_human_move(game: &Game, input: &mut impl BufRead) -> Result<Option<Move>> {
    loop {
        print!("{} to move (e.g. 2b7-2b6, 'moves', 'quit'): ", game.turn());
        io::stdout().flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 { return Ok(None); }
        let line = line.trim();
        match line {
            "quit" | "exit" => return Ok(None),
            "moves" => {
                let list: Vec<String> = game.legal_moves().into_iter().map(|m| move_notation(game.board(), m)).collect();
                println!("{}", list.join(" "));
            }
            _ => match parse_move(game.position(), line) {
                Some(mv) => return Ok(Some(mv)),
                None => println!("Illegal or malformed move: {line}"),
            },
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let weights = match &args.weights {
        Some(p) => Weights::load_json(p).with_context(|| format!("loading weights from {}", p.display()))?,
        None => Weights::default(),
    };
    let params = SearchParams {
        max_depth: args.max_depth.max(1),
        movetime: Some(Duration::from_millis(args.movetime_ms)),
        ..SearchParams::default()
    };
    let mut gold = engine(args.gold, params, &weights, args.seed);
    let mut scarlet = engine(args.scarlet, params, &weights, args.seed.wrapping_add(1));

    let mut game = Game::new();
    game.update();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        println!("\n{}", game.render());
        if game.is_over() { break; }
        if args.max_plies.is_some_and(|n| game.move_log().len() >= n) {
            println!("Half-move limit reached.");
            break;
        }
        let seat = match game.turn() { Side::Gold => &mut gold, Side::Scarlet => &mut scarlet };
        let mv = match seat {
            None => match read_human_move(&game, &mut input)? {
                Some(mv) => mv,
                None => break,
            },
            Some(strategy) => {
                let t0 = Instant::now();
                let Some(mv) = strategy.choose_move(&game) else {
                    println!("{} has no legal move.", game.turn());
                    break;
                };
                if args.verbose { println!("{} engine thought for {:.2}s", strategy.name(), t0.elapsed().as_secs_f32()); }
                mv
            }
        };
        let text = move_notation(game.board(), mv);
        game.apply_move(mv).with_context(|| format!("applying {text}"))?;
        game.update();
        println!("{}: {}", game.move_log().len(), text);
    }

    match game.outcome() {
        Some(o) => println!("Result: {o}"),
        None => println!("Game stopped after {} half-moves.", game.move_log().len()),
    }
    Ok(())
}
