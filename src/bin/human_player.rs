use clap::Parser;
use memory_tiles::config::GameConfig;
use memory_tiles::engine::{Board, BoardPhase, Resolution};
use memory_tiles::utils::layout_rows;
use std::fs;
use std::io::{self, Write}; // For input/output
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play Memory in the terminal", long_about = None)]
struct Args {
    /// Tiles per side (the tile count must be even)
    #[clap(short, long, default_value_t = 4)]
    size: usize,

    /// Seed for the shuffle; random when omitted
    #[clap(long)]
    seed: Option<u64>,

    /// Milliseconds a mismatched pair stays face-up
    #[clap(long, default_value_t = 500)]
    delay_ms: u64,

    /// Update cycles per second while a pair is resolving
    #[clap(long, default_value_t = 60)]
    fps: u32,

    /// Optional layout file, one row of face letters per line
    #[clap(long)]
    layout: Option<PathBuf>,
}

impl Args {
    fn to_config(&self) -> GameConfig {
        GameConfig {
            board_size: self.size,
            fps: self.fps,
            mismatch_delay: Duration::from_millis(self.delay_ms),
            seed: self.seed,
            ..GameConfig::default()
        }
    }
}

fn load_board(args: &Args, config: &GameConfig) -> Result<Board, String> {
    match &args.layout {
        Some(path) => {
            let content =
                fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;
            config
                .build_board_from_layout(&layout_rows(&content))
                .map_err(|e| format!("Invalid layout in {}: {}", path.display(), e))
        }
        None => config.build_board().map_err(|e| e.to_string()),
    }
}

// Ticks the board at the configured frame rate until the pending pair resolves.
fn settle(board: &mut Board, frame: Duration) -> Option<Resolution> {
    let mut outcome = board.tick(Instant::now());
    if outcome.is_none() && board.phase() == BoardPhase::Resolving {
        println!("{}", board);
    }
    while outcome.is_none() && board.phase() == BoardPhase::Resolving {
        thread::sleep(frame);
        outcome = board.tick(Instant::now());
    }
    outcome
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = args.to_config();

    let mut board = match load_board(&args, &config) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let frame = config.frame_interval();
    println!("Welcome to Memory!");

    loop {
        board.tick(Instant::now());
        println!("---------------------");
        println!(
            "Pairs: {}/{}, Attempts: {}",
            board.matched_pairs(),
            board.size() * board.size() / 2,
            board.attempts()
        );
        println!("{}", board);

        if board.is_game_over() {
            println!();
            println!("---------------------");
            println!("🎉 ALL PAIRS FOUND! 🎉");
            println!("Time: {} s", board.elapsed_score());
            println!("Attempts: {}", board.attempts());
            println!("---------------------");
            return ExitCode::SUCCESS;
        }

        print!("Enter a tile (row col), or 'q' to quit: ");
        if io::stdout().flush().is_err() {
            eprintln!("Error flushing stdout.");
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => return ExitCode::SUCCESS,
            Ok(_) => {}
            Err(_) => {
                println!("Error reading input. Please try again.");
                continue;
            }
        }

        let trimmed_input = input.trim();
        if trimmed_input == "q" {
            println!("Thanks for playing!");
            return ExitCode::SUCCESS;
        }

        let parts: Vec<&str> = trimmed_input.split_whitespace().collect();
        if parts.len() != 2 {
            println!("Invalid input format. Use 'row col' or 'q'.");
            continue;
        }
        let (Ok(r), Ok(c)) = (parts[0].parse::<usize>(), parts[1].parse::<usize>()) else {
            println!("Invalid input: Please enter numbers for row and column (e.g., '1 2') or 'q'.");
            continue;
        };
        if r >= board.size() || c >= board.size() {
            println!(
                "Invalid coordinates: Row and column must be between 0 and {}.",
                board.size() - 1
            );
            continue;
        }

        if !board.handle_click(board.tile_center(r, c)) {
            println!("Tile ({}, {}) is already face-up.", r, c);
            continue;
        }

        match settle(&mut board, frame) {
            Some(Resolution::Matched) => println!("It's a match!"),
            Some(Resolution::Mismatched) => println!("No match."),
            None => {}
        }
    }
}
