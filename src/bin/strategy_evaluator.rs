use clap::Parser;
use memory_tiles::config::GameConfig;
use memory_tiles::strategy::{play_out, PerfectMemory, RandomGuesser, Strategy};
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare automated Memory players", long_about = None)]
struct Args {
    /// Tiles per side (the tile count must be even)
    #[clap(short, long, default_value_t = 4)]
    size: usize,

    /// Number of seeded boards to play
    #[clap(short, long, default_value_t = 20)]
    boards: u64,

    /// First seed; board i uses start_seed + i
    #[clap(long, default_value_t = 0)]
    start_seed: u64,

    /// Simulated seconds between two clicks
    #[clap(long, default_value_t = 1)]
    click_secs: u64,
}

#[derive(Default)]
struct Totals {
    attempts: Vec<u32>,
    scores: Vec<u32>,
}

fn average<T: Copy + Into<f64>>(values: &[T]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| v.into()).sum::<f64>() / values.len() as f64
}

fn main() -> ExitCode {
    let args = Args::parse();
    let click_interval = Duration::from_secs(args.click_secs);

    let mut strategies: Vec<Box<dyn Strategy>> = vec![
        Box::new(PerfectMemory::new()),
        Box::new(RandomGuesser::with_seed(args.start_seed)),
    ];
    let mut totals: Vec<Totals> = strategies.iter().map(|_| Totals::default()).collect();

    println!("Starting strategy evaluation for {} boards...", args.boards);

    for board_idx in 0..args.boards {
        let seed = args.start_seed + board_idx;
        let config = GameConfig {
            board_size: args.size,
            seed: Some(seed),
            ..GameConfig::default()
        };

        println!("\nEvaluating Board {} (Seed: {})", board_idx, seed);

        for (i, strategy) in strategies.iter_mut().enumerate() {
            let mut board = match config.build_board() {
                Ok(board) => board,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            let report = play_out(&mut board, strategy.as_mut(), click_interval);
            if !board.is_game_over() {
                eprintln!(
                    "Warning: Strategy {} stopped early on board {} (Seed: {}).",
                    strategy.name(),
                    board_idx,
                    seed
                );
            }
            println!(
                "  Strategy: {:<15}, Attempts: {:<4}, Clicks: {:<4}, Time: {} s",
                strategy.name(),
                report.attempts,
                report.clicks,
                report.score
            );
            totals[i].attempts.push(report.attempts);
            totals[i]
                .scores
                .push(u32::try_from(report.score).unwrap_or(u32::MAX));
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", args.boards);
    println!("\n--- Averages ---");

    let mut ranked: Vec<(&str, f64, f64)> = strategies
        .iter()
        .zip(&totals)
        .map(|(s, t)| (s.name(), average(&t.attempts), average(&t.scores)))
        .collect();
    ranked.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    for (name, attempts, time) in ranked {
        println!(
            "Strategy {:<15}: Average Attempts = {:.2}, Average Time = {:.2} s",
            name, attempts, time
        );
    }
    ExitCode::SUCCESS
}
