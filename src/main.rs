use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use slide_solver::board::Board;
use slide_solver::{generator, korf};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    Astar,
    Ida,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HeuristicId {
    Manhattan,
    Misplaced,
    Zero,
}

#[derive(Parser, Debug)]
#[command(about = "Heuristic search over sliding-tile puzzles (8-puzzle, 15-puzzle)")]
struct CliArgs {
    /// Which searcher to run.
    #[arg(short, long, value_enum, default_value = "astar")]
    algorithm: Algorithm,

    /// Which admissible heuristic to search with.
    #[arg(long = "heuristic", value_enum, default_value = "manhattan")]
    heuristic: HeuristicId,

    /// Explicit starting board: a "rows cols" header followed by the tile
    /// grid, e.g. "3 3\n1 2 3\n4 5 0\n7 8 6\n". Mutually exclusive with
    /// --scramble and --korf.
    #[arg(long, group = "source")]
    board: Option<String>,

    /// Generate a starting board with `n` random legal moves from goal.
    #[arg(long, value_name = "N", group = "source")]
    scramble: Option<u32>,

    /// Board width to scramble (3 for the 8-puzzle, 4 for the 15-puzzle).
    #[arg(long, default_value_t = 4, requires = "scramble")]
    width: u8,

    /// Seed the scramble RNG for a reproducible board.
    #[arg(long, requires = "scramble")]
    seed: Option<u64>,

    /// Load the Nth problem (1-based index in the file, not line number)
    /// from a Korf-format 15-puzzle problem set. Mutually exclusive with
    /// --board and --scramble.
    #[arg(long, value_name = "FILE", group = "source")]
    korf: Option<PathBuf>,

    /// Which problem to load from --korf.
    #[arg(long, value_name = "INDEX", requires = "korf")]
    korf_index: Option<u32>,

    /// Print the starting board and the full move sequence, not just
    /// the summary line.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    simple_logger::SimpleLogger::new()
        .with_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init()
        .expect("logger is only initialized once, at the start of main");

    let board = match resolve_board(&args) {
        Ok(board) => board,
        Err(message) => {
            log::error!("{message}");
            return ExitCode::FAILURE;
        }
    };

    if args.verbose {
        println!("Starting board ({}x{}):", board.width(), board.width());
        println!("{board}");
    }

    let goal = Board::goal(board.width());
    let heuristic = resolve_heuristic(args.heuristic);
    let result = match args.algorithm {
        Algorithm::Astar => slide_solver::search::astar::a_star_with_heuristic(&board, &goal, heuristic.as_ref()),
        Algorithm::Ida => slide_solver::search::ida_star::ida_star_with_heuristic(&board, &goal, heuristic.as_ref()),
    };

    match result.path {
        Some(path) => {
            println!("Solved in {} moves", path.len());
            if args.verbose {
                for mv in &path {
                    println!(" - {mv}");
                }
            }
        }
        None => println!("No solution found."),
    }
    println!("Generated nodes: {}", result.generated);
    println!("Elapsed time: {} ms", result.elapsed_ms);

    ExitCode::SUCCESS
}

fn resolve_heuristic(id: HeuristicId) -> Box<dyn slide_solver::heuristic::Heuristic> {
    use slide_solver::heuristic::{ManhattanDistance, Misplaced, ZeroHeuristic};
    match id {
        HeuristicId::Manhattan => Box::new(ManhattanDistance),
        HeuristicId::Misplaced => Box::new(Misplaced),
        HeuristicId::Zero => Box::new(ZeroHeuristic),
    }
}

fn resolve_board(args: &CliArgs) -> Result<Board, String> {
    if let Some(board_str) = &args.board {
        return board_str
            .parse::<Board>()
            .map_err(|err| format!("invalid --board: {err}"));
    }

    if let Some(n) = args.scramble {
        if !matches!(args.width, 3 | 4) {
            return Err(format!("unsupported --width {}; only 3 and 4 are supported", args.width));
        }
        return Ok(generator::generate_random_board(args.width, n, args.seed, true));
    }

    if let Some(path) = &args.korf {
        let problems = korf::load_korf_problems_from_path(path)
            .map_err(|err| format!("failed to load korf problem set: {err}"))?;
        let index = args.korf_index.unwrap_or(1);
        return problems
            .into_iter()
            .find(|p| p.index == index)
            .map(|p| p.board)
            .ok_or_else(|| format!("no problem with index {index} in {}", path.display()));
    }

    Err("one of --board, --scramble, or --korf is required".to_string())
}
