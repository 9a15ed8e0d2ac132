//! Text demo: configure a hex grid, search once, print the route.
//!
//! Run: cargo run --bin hex-route [-- [GOAL_Q GOAL_R] [--seed N]]
//!
//! Without `--seed` the 8×7 reference map is used; with it, a 16×10 map
//! with randomly scattered obstacles.

use clap::Parser;
use hexpath_core::{Hex, HexGrid};
use hexpath_paths::{Neighbors, Path, PathOutcome, find_path};
use rand::SeedableRng;

const REFERENCE_OBSTACLES: [Hex; 5] = [
    Hex::new(3, 2),
    Hex::new(2, 2),
    Hex::new(3, 0),
    Hex::new(4, 0),
    Hex::new(4, 1),
];

#[derive(Parser, Debug)]
#[command(
    name = "hex-route",
    about = "Search a hex grid from (0, 0) and print the route",
    version,
    allow_negative_numbers = true
)]
struct Cli {
    /// Goal column (axial q).
    #[arg(requires = "goal_r")]
    goal_q: Option<i32>,

    /// Goal row (axial r).
    #[arg(requires = "goal_q")]
    goal_r: Option<i32>,

    /// Scatter random obstacles on a 16x10 map seeded with N.
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
}

impl Cli {
    fn goal(&self) -> Option<Hex> {
        Some(Hex::new(self.goal_q?, self.goal_r?))
    }
}

fn build_grid(seed: Option<u64>, start: Hex, goal: Hex) -> Result<HexGrid, Box<dyn std::error::Error>> {
    match seed {
        None => {
            let mut grid = HexGrid::new(8, 7, 1)?;
            grid.fill_obstacles(REFERENCE_OBSTACLES)?;
            Ok(grid)
        }
        Some(seed) => {
            let mut grid = HexGrid::new(16, 10, 1)?;
            let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
            grid.scatter_obstacles(&mut rng, 25, |h| h == start || h == goal);
            Ok(grid)
        }
    }
}

/// Draw the grid with each row shifted half a cell per `r`, so axial
/// neighbours line up visually.
fn render(grid: &HexGrid, start: Hex, goal: Hex, path: Option<&Path>) -> String {
    let b = grid.bounds();
    let mut out = String::new();
    for r in b.min.r..b.max.r {
        out.push_str(&" ".repeat((r - b.min.r) as usize));
        for q in b.min.q..b.max.q {
            let h = Hex::new(q, r);
            let glyph = if h == start {
                'S'
            } else if h == goal {
                'G'
            } else if grid.is_blocked(h) {
                '#'
            } else if path.is_some_and(|p| p.contains(h)) {
                '*'
            } else {
                '.'
            };
            out.push(glyph);
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let start = Hex::new(0, 0);
    let goal = cli.goal().unwrap_or(match cli.seed {
        None => Hex::new(5, 6),
        Some(_) => Hex::new(15, 9),
    });
    let grid = build_grid(cli.seed, start, goal)?;

    let outcome = find_path(&grid, start, goal)?;
    print!("{}", render(&grid, start, goal, outcome.path()));
    match outcome {
        PathOutcome::Found(path) => {
            let steps: Vec<String> = path.iter().map(Hex::to_string).collect();
            println!("route ({} moves, cost {}): {}", path.len(), path.cost(), steps.join(" "));
        }
        PathOutcome::NotFound => {
            let mut nb = Neighbors::new();
            let open = nb.all(goal, |h| !grid.is_blocked(h)).len();
            println!("no route from {start} to {goal} ({open} open cells around the goal)");
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
