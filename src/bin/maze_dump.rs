//! Print a generated maze as text.
//!
//! ```bash
//! cargo run --bin maze_dump -- --width 21 --height 11 --seed 3
//! ```

use clap::Parser;

use labyrinth_rs::world::MazeGenerator;

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Maze width in cells (at least 5)
    #[arg(long, default_value_t = 21)]
    width: usize,

    /// Maze height in cells (at least 5)
    #[arg(long, default_value_t = 21)]
    height: usize,

    /// Seed; omitted means a fresh random maze
    #[arg(long)]
    seed: Option<u64>,

    /// Print numeric cell codes (0 path, 1 wall, 2 exit) instead of blocks
    #[arg(long)]
    codes: bool,
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    let generator = MazeGenerator::new(opts.width, opts.height)?;
    let maze = generator.generate(opts.seed)?;

    if opts.codes {
        for y in 0..maze.height() {
            let row: String = maze
                .row_codes(y)
                .into_iter()
                .flatten()
                .map(|c| char::from(b'0' + c))
                .collect();
            println!("{row}");
        }
    } else {
        print!("{maze}");
    }
    println!(
        "{}×{}  seed {}  start {:?}  exit {:?}",
        maze.width(),
        maze.height(),
        opts.seed.map_or_else(|| "random".to_owned(), |s| s.to_string()),
        maze.start(),
        maze.exit()
    );
    Ok(())
}
