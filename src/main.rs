use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use ricochet_solver::{load_puzzle, replay, Move, Outcome, Solver};

#[derive(Parser, Debug)]
#[command(
    name = "ricochet-solver",
    version,
    about = "Find the shortest solutions to a Ricochet Robots puzzle"
)]
struct Cli {
    /// Puzzle file to solve
    #[arg(value_name = "PUZZLE")]
    puzzle: PathBuf,
    /// Only look for solutions of at most this many moves
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    max_moves: Option<u32>,
    /// Print every solution that uses the fewest moves
    #[arg(long)]
    all_solutions: bool,
    /// Print how many moves it takes for a robot to reach each cell
    #[arg(long, conflicts_with = "all_solutions")]
    visualize_accessibility: bool,
}

fn print_arrival(path: &[Move]) {
    if let Some(last) = path.last() {
        println!(
            "robot {} reaches the goal after {} moves",
            last.robot,
            path.len()
        );
    }
    println!();
}

fn print_moves(path: &[Move]) {
    for mv in path {
        println!("{mv}");
    }
    print_arrival(path);
}

/// What to print when a search finds nothing. A budgeted search reports its
/// budget even when the whole reachable space fit inside it.
fn no_solutions(outcome: &Outcome, max_moves: Option<u32>) -> Option<String> {
    match (outcome, max_moves) {
        (Outcome::Solved(_), _) => None,
        (&Outcome::OutOfMoves { max_moves }, _) | (Outcome::Unsolvable, Some(max_moves)) => {
            Some(format!("no solutions with {max_moves} or fewer moves"))
        }
        (Outcome::Unsolvable, None) => Some("no solutions".to_string()),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let puzzle = load_puzzle(&cli.puzzle)
        .with_context(|| format!("could not load {}", cli.puzzle.display()))?;
    let solver = Solver::new(&puzzle).max_moves(cli.max_moves);

    if cli.visualize_accessibility {
        print!("{}", solver.reachability());
        return Ok(());
    }

    print!("{puzzle}");
    let search = if cli.all_solutions {
        solver.all_shortest_solutions()
    } else {
        solver.shortest_solution()
    };

    if let Some(message) = no_solutions(&search.outcome, cli.max_moves) {
        println!("{message}");
        return Ok(());
    }

    match search.outcome {
        Outcome::Unsolvable | Outcome::OutOfMoves { .. } => {}
        Outcome::Solved(paths) if cli.all_solutions => {
            println!(
                "{} different {} move solutions",
                paths.len(),
                paths.first().map_or(0, Vec::len)
            );
            println!();
            for path in &paths {
                print_moves(path);
            }
        }
        Outcome::Solved(paths) => {
            for path in paths.iter().take(1) {
                let steps = replay(&puzzle, path).context("solution does not replay")?;
                for (mv, config) in path.iter().zip(&steps) {
                    println!("{mv}");
                    print!("{}", puzzle.view(config));
                }
                print_arrival(path);
            }
        }
    }

    Ok(())
}
