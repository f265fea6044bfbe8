//! Randomised depth-first maze carving.
//!
//! The carve walks the odd/odd sub-lattice two cells at a time, knocking out
//! the wall between neighbours, so the result is a spanning tree rooted at the
//! start cell. Two post passes follow:
//!
//! * a 3×3 clearing around the start so the player never spawns boxed in;
//! * "crossroads": a handful of walls between two corridors are opened,
//!   adding loops so the maze is not a perfect tree.
//!
//! Finally one border cell next to a carved corridor becomes the exit.

use rand::prelude::*;
use rand::rngs::StdRng;
use thiserror::Error;

use super::maze::{Cell, GridPos, MazeGrid};

/// Four stride-2 carving directions (N, E, S, W in screen space).
const DIRECTIONS: [(i32, i32); 4] = [(0, 2), (2, 0), (0, -2), (-2, 0)];

/// One extra passage per this many cells.
const CROSSROAD_DIVISOR: usize = 50;
/// Wall samples tried per extra passage before giving up on it.
const CROSSROAD_ATTEMPTS: usize = 50;
/// Chance a qualifying wall actually opens.
const CROSSROAD_CHANCE: f64 = 0.3;

/// Things that can go wrong when generating a maze.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// Either side is shorter than [`MazeGenerator::MIN_SIZE`].
    #[error("maze must be at least 5×5 cells, got {width}×{height}")]
    TooSmall { width: usize, height: usize },

    /// No border cell touches a carved corridor, so no exit can be placed.
    #[error("no border cell is adjacent to a corridor; cannot place exit")]
    NoExitCandidate,

    /// Either side exceeds [`MazeGenerator::MAX_SIZE`].
    #[error("maze may be at most 4001×4001 cells, got {width}×{height}")]
    TooLarge { width: usize, height: usize },
}

/// Maze factory for one fixed size.
#[derive(Clone, Copy, Debug)]
pub struct MazeGenerator {
    width: usize,
    height: usize,
}

/// One pending cell of the explicit DFS stack.
struct Frame {
    pos: GridPos,
    dirs: [(i32, i32); 4],
    next: usize,
}

impl MazeGenerator {
    pub const MIN_SIZE: usize = 5;
    /// Keeps cell counts and `i32` grid coordinates well inside range.
    pub const MAX_SIZE: usize = 4001;

    pub fn new(width: usize, height: usize) -> Result<Self, GenerateError> {
        if width < Self::MIN_SIZE || height < Self::MIN_SIZE {
            return Err(GenerateError::TooSmall { width, height });
        }
        if width > Self::MAX_SIZE || height > Self::MAX_SIZE {
            return Err(GenerateError::TooLarge { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Carving origin: the centre nudged onto odd coordinates.
    pub fn start(&self) -> GridPos {
        let odd = |v: usize| if v % 2 == 0 { v + 1 } else { v };
        (odd(self.width / 2), odd(self.height / 2))
    }

    /// Player spawn cell, `(width / 2, height / 2)`.
    pub fn center(&self) -> GridPos {
        (self.width / 2, self.height / 2)
    }

    /// Generate a maze. `Some(seed)` is reproducible, `None` draws from the OS.
    pub fn generate(&self, seed: Option<u64>) -> Result<MazeGrid, GenerateError> {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        self.generate_with(&mut rng)
    }

    /// Generate a maze drawing every random choice from `rng`.
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<MazeGrid, GenerateError> {
        let mut grid = MazeGrid::filled(self.width, self.height, Cell::Wall);
        let start = self.start();
        grid.set_start(start);

        self.carve(&mut grid, start, rng);
        self.clear_start_area(&mut grid, start);
        self.add_crossroads(&mut grid, rng);
        self.place_exit(&mut grid, rng)?;
        Ok(grid)
    }

    /* ------------------------------------------------------------------ */

    /// Strictly inside the border.
    #[inline]
    fn interior(&self, x: i32, y: i32) -> bool {
        x > 0 && y > 0 && (x as usize) < self.width - 1 && (y as usize) < self.height - 1
    }

    fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> [(i32, i32); 4] {
        let mut dirs = DIRECTIONS;
        dirs.shuffle(rng);
        dirs
    }

    /// Backtracking carve with an explicit stack. Each frame keeps its own
    /// shuffled direction list and resumes where it left off, which visits
    /// cells in exactly the order the recursive formulation would.
    fn carve<R: Rng + ?Sized>(&self, grid: &mut MazeGrid, start: GridPos, rng: &mut R) {
        grid.set(start.0, start.1, Cell::Path);
        let mut stack = vec![Frame {
            pos: start,
            dirs: Self::shuffled(rng),
            next: 0,
        }];

        while let Some(top) = stack.last_mut() {
            if top.next == top.dirs.len() {
                stack.pop();
                continue;
            }
            let (dx, dy) = top.dirs[top.next];
            top.next += 1;

            let (x, y) = (top.pos.0 as i32, top.pos.1 as i32);
            let (nx, ny) = (x + dx, y + dy);
            if !self.interior(nx, ny) || grid.cell_at(nx, ny) != Cell::Wall {
                continue;
            }

            grid.set((x + dx / 2) as usize, (y + dy / 2) as usize, Cell::Path);
            grid.set(nx as usize, ny as usize, Cell::Path);
            stack.push(Frame {
                pos: (nx as usize, ny as usize),
                dirs: Self::shuffled(rng),
                next: 0,
            });
        }
    }

    /// Open the 3×3 block around the start. The border ring is left intact
    /// (it only matters on 5-wide grids, where the block touches it).
    fn clear_start_area(&self, grid: &mut MazeGrid, (sx, sy): GridPos) {
        for dy in -1..=1 {
            for dx in -1..=1 {
                let (x, y) = (sx as i32 + dx, sy as i32 + dy);
                if self.interior(x, y) {
                    grid.set(x as usize, y as usize, Cell::Path);
                }
            }
        }
    }

    fn open_neighbours(grid: &MazeGrid, x: i32, y: i32) -> usize {
        [(0, 1), (1, 0), (0, -1), (-1, 0)]
            .iter()
            .filter(|(dx, dy)| grid.cell_at(x + dx, y + dy) == Cell::Path)
            .count()
    }

    fn add_crossroads<R: Rng + ?Sized>(&self, grid: &mut MazeGrid, rng: &mut R) {
        let passages = self.width * self.height / CROSSROAD_DIVISOR;

        for _ in 0..passages {
            for _ in 0..CROSSROAD_ATTEMPTS {
                let x = rng.gen_range(1..self.width - 1);
                let y = rng.gen_range(1..self.height - 1);
                if grid.cell_at(x as i32, y as i32) != Cell::Wall {
                    continue;
                }
                if Self::open_neighbours(grid, x as i32, y as i32) >= 2
                    && rng.gen_bool(CROSSROAD_CHANCE)
                {
                    grid.set(x, y, Cell::Path);
                    break;
                }
            }
        }
    }

    /// Border cells whose inward neighbour is a corridor. Only odd offsets
    /// are scanned: those are the lattice cells the carve always reaches.
    fn exit_candidates(&self, grid: &MazeGrid) -> Vec<GridPos> {
        let (w, h) = (self.width, self.height);
        let mut edges = Vec::new();

        for x in (1..w - 1).step_by(2) {
            if grid.get(x, 1) == Some(Cell::Path) {
                edges.push((x, 0));
            }
            if grid.get(x, h - 2) == Some(Cell::Path) {
                edges.push((x, h - 1));
            }
        }
        for y in (1..h - 1).step_by(2) {
            if grid.get(1, y) == Some(Cell::Path) {
                edges.push((0, y));
            }
            if grid.get(w - 2, y) == Some(Cell::Path) {
                edges.push((w - 1, y));
            }
        }
        edges
    }

    fn place_exit<R: Rng + ?Sized>(&self, grid: &mut MazeGrid, rng: &mut R) -> Result<(), GenerateError> {
        let edges = self.exit_candidates(grid);
        let &(x, y) = edges.choose(rng).ok_or(GenerateError::NoExitCandidate)?;
        grid.set(x, y, Cell::Exit);
        Ok(())
    }
}

/// One-shot convenience: `MazeGenerator::new(width, height)?.generate(seed)`.
pub fn generate(width: usize, height: usize, seed: Option<u64>) -> Result<MazeGrid, GenerateError> {
    MazeGenerator::new(width, height)?.generate(seed)
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    const SIZES: [(usize, usize); 5] = [(5, 5), (7, 9), (11, 11), (21, 15), (51, 51)];

    fn on_border(g: &MazeGrid, (x, y): GridPos) -> bool {
        x == 0 || y == 0 || x == g.width() - 1 || y == g.height() - 1
    }

    fn inward((x, y): GridPos, g: &MazeGrid) -> GridPos {
        if x == 0 {
            (1, y)
        } else if y == 0 {
            (x, 1)
        } else if x == g.width() - 1 {
            (x - 1, y)
        } else {
            (x, y - 1)
        }
    }

    #[test]
    fn rejects_tiny_grids() {
        assert_eq!(
            MazeGenerator::new(4, 9).unwrap_err(),
            GenerateError::TooSmall {
                width: 4,
                height: 9,
            }
        );
        assert!(generate(0, 0, Some(1)).is_err());
        assert!(generate(5, 5, Some(1)).is_ok());
    }

    #[test]
    fn rejects_oversized_grids() {
        assert_eq!(
            MazeGenerator::new(usize::MAX, 5).unwrap_err(),
            GenerateError::TooLarge {
                width: usize::MAX,
                height: 5
            }
        );
        assert!(matches!(
            generate(5, MazeGenerator::MAX_SIZE + 1, Some(1)),
            Err(GenerateError::TooLarge { .. })
        ));
        assert!(MazeGenerator::new(MazeGenerator::MAX_SIZE, 5).is_ok());
    }

    #[test]
    fn exactly_one_exit_on_the_border() {
        for (w, h) in SIZES {
            for seed in 0..8 {
                let g = generate(w, h, Some(seed)).unwrap();
                let exits: Vec<_> = g.cells().filter(|&(_, _, c)| c == Cell::Exit).collect();
                assert_eq!(exits.len(), 1, "{w}×{h} seed {seed}");
                assert!(on_border(&g, (exits[0].0, exits[0].1)));
            }
        }
    }

    #[test]
    fn border_is_wall_except_exit() {
        for (w, h) in SIZES {
            for seed in 0..8 {
                let g = generate(w, h, Some(seed)).unwrap();
                let exit = g.exit().unwrap();
                for (x, y, c) in g.cells() {
                    if on_border(&g, (x, y)) && (x, y) != exit {
                        assert_eq!(c, Cell::Wall, "({x},{y}) in {w}×{h} seed {seed}");
                    }
                }
            }
        }
    }

    #[test]
    fn exit_is_reachable_from_start() {
        for (w, h) in SIZES {
            for seed in 0..8 {
                let g = generate(w, h, Some(seed)).unwrap();
                let exit = g.exit().unwrap();
                let next = inward(exit, &g);
                assert_eq!(g.get(next.0, next.1), Some(Cell::Path));
                assert!(g.is_reachable(g.start(), next));
                assert!(g.is_reachable(g.start(), exit));
            }
        }
    }

    #[test]
    fn every_corridor_is_connected() {
        let g = generate(31, 31, Some(99)).unwrap();
        let seen = g.reachable_from(g.start());
        for (x, y, c) in g.cells() {
            if c != Cell::Wall {
                assert!(seen[y * g.width() + x], "({x},{y}) is cut off");
            }
        }
    }

    #[test]
    fn five_by_five_start_is_nudged_and_cleared() {
        let gen_ = MazeGenerator::new(5, 5).unwrap();
        assert_eq!(gen_.start(), (3, 3));
        assert_eq!(gen_.center(), (2, 2));

        let g = gen_.generate(Some(7)).unwrap();
        assert_eq!(g.start(), (3, 3));
        // the part of the 3×3 block that lies inside the border
        for (x, y) in [(2, 2), (3, 2), (2, 3), (3, 3)] {
            assert_eq!(g.get(x, y), Some(Cell::Path));
        }
    }

    #[test]
    fn start_block_is_open_on_larger_grids() {
        for (w, h) in [(7, 7), (9, 13), (51, 51), (20, 20)] {
            let g = generate(w, h, Some(3)).unwrap();
            let (sx, sy) = g.start();
            for y in sy - 1..=sy + 1 {
                for x in sx - 1..=sx + 1 {
                    assert_eq!(g.get(x, y), Some(Cell::Path), "{w}×{h} ({x},{y})");
                }
            }
        }
    }

    #[test]
    fn spawn_cell_is_open() {
        for (w, h) in [(5, 5), (8, 8), (51, 51), (12, 7)] {
            let g = generate(w, h, Some(11)).unwrap();
            assert!(!g.cell_at_point(g.spawn_point()).is_solid());
        }
    }

    #[test]
    fn same_seed_same_maze() {
        assert_eq!(generate(5, 5, Some(42)).unwrap(), generate(5, 5, Some(42)).unwrap());
        assert_eq!(
            generate(51, 51, Some(1234)).unwrap(),
            generate(51, 51, Some(1234)).unwrap()
        );
    }

    #[test]
    fn different_seeds_differ() {
        let a = generate(31, 31, Some(1)).unwrap();
        let b = generate(31, 31, Some(2)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn crossroads_add_loops() {
        // A spanning tree on the odd lattice has exactly (cells - 1) links.
        // The start clearing opens at most 8 more; anything beyond that came
        // from crossroads.
        let g = generate(51, 51, Some(5)).unwrap();
        let open = g.cells().filter(|&(_, _, c)| c == Cell::Path).count();
        let lattice = (g.width() / 2) * (g.height() / 2);
        let tree_cells = 2 * lattice - 1;
        assert!(open > tree_cells + 8, "expected extra passages, got {open}");
    }

    #[test]
    fn even_sizes_still_get_an_exit() {
        for (w, h) in [(6, 6), (8, 10), (50, 50)] {
            for seed in 0..4 {
                let g = generate(w, h, Some(seed)).unwrap();
                assert!(g.exit().is_some());
            }
        }
    }
}
