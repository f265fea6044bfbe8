use std::fmt;

use glam::Vec2;

/// Integer cell coordinate `(x, y)`; `y` grows downward.
pub type GridPos = (usize, usize);

/// One grid cell. The discriminants double as the numeric cell codes
/// reported by [`MazeGrid::row_codes`] (0 path, 1 wall, 2 exit).
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    Path = 0,
    #[default]
    Wall = 1,
    Exit = 2,
}

impl Cell {
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Blocks both movement and rays. Exits are open.
    #[inline]
    pub fn is_solid(self) -> bool {
        self == Cell::Wall
    }
}

/// Rectangular maze, row-major. Read-only once generated; a restart swaps
/// in a whole new grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    start: GridPos,
}

impl MazeGrid {
    /// Grid of `width × height` cells all set to `fill`.
    pub fn filled(width: usize, height: usize, fill: Cell) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
            start: (width / 2, height / 2),
        }
    }

    /// Build a grid from text rows: `#` wall, `E` exit, anything else path.
    /// Short rows are padded with walls. The start is the centre cell.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut grid = Self::filled(width, height, Cell::Wall);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '#' => Cell::Wall,
                    'E' => Cell::Exit,
                    _ => Cell::Path,
                };
                grid.set(x, y, cell);
            }
        }
        grid
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell the generator started carving from.
    #[inline]
    pub fn start(&self) -> GridPos {
        self.start
    }

    pub(crate) fn set_start(&mut self, start: GridPos) {
        self.start = start;
    }

    /// Geometric centre cell, `(width / 2, height / 2)`.
    #[inline]
    pub fn center(&self) -> GridPos {
        (self.width / 2, self.height / 2)
    }

    /// World position a new player is placed at: the middle of the centre cell.
    pub fn spawn_point(&self) -> Vec2 {
        let (cx, cy) = self.center();
        Vec2::new(cx as f32 + 0.5, cy as f32 + 0.5)
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Cell at an in-bounds coordinate.
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        (x < self.width && y < self.height).then(|| self.cells[self.index(x, y)])
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, cell: Cell) {
        let i = self.index(x, y);
        self.cells[i] = cell;
    }

    /// Cell query used by collision and rays. Anything outside the grid is a
    /// wall, so callers never have to bounds-check.
    #[inline]
    pub fn cell_at(&self, x: i32, y: i32) -> Cell {
        if self.in_bounds(x, y) {
            self.cells[self.index(x as usize, y as usize)]
        } else {
            Cell::Wall
        }
    }

    /// Cell containing a continuous world point.
    #[inline]
    pub fn cell_at_point(&self, p: Vec2) -> Cell {
        self.cell_at(p.x.floor() as i32, p.y.floor() as i32)
    }

    #[inline]
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.cell_at(x, y).is_solid()
    }

    /// First exit cell in row-major order, if the grid has one.
    pub fn exit(&self) -> Option<GridPos> {
        self.cells
            .iter()
            .position(|&c| c == Cell::Exit)
            .map(|i| (i % self.width, i / self.width))
    }

    /// Row-major iterator over `(x, y, cell)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let w = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| (i % w, i / w, c))
    }

    /// Raw cell codes of row `y`, `None` past the last row.
    pub fn row_codes(&self, y: usize) -> Option<Vec<u8>> {
        if y >= self.height {
            return None;
        }
        let row = &self.cells[y * self.width..(y + 1) * self.width];
        Some(row.iter().map(|c| c.code()).collect())
    }

    /// Cells reachable from `from` through orthogonal non-wall steps.
    pub fn reachable_from(&self, from: GridPos) -> Vec<bool> {
        let mut seen = vec![false; self.cells.len()];
        if self.get(from.0, from.1).is_none_or(|c| c.is_solid()) {
            return seen;
        }
        let mut stack = vec![from];
        seen[self.index(from.0, from.1)] = true;
        while let Some((x, y)) = stack.pop() {
            for (dx, dy) in [(0i32, 1i32), (1, 0), (0, -1), (-1, 0)] {
                let (nx, ny) = (x as i32 + dx, y as i32 + dy);
                if self.cell_at(nx, ny).is_solid() {
                    continue;
                }
                let i = self.index(nx as usize, ny as usize);
                if !seen[i] {
                    seen[i] = true;
                    stack.push((nx as usize, ny as usize));
                }
            }
        }
        seen
    }

    /// True if `to` is reachable from `from` through non-wall cells.
    pub fn is_reachable(&self, from: GridPos, to: GridPos) -> bool {
        if to.0 >= self.width || to.1 >= self.height {
            return false;
        }
        self.reachable_from(from)[self.index(to.0, to.1)]
    }
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let ch = match self.cells[self.index(x, y)] {
                    Cell::Wall => '█',
                    Cell::Exit => 'E',
                    Cell::Path => ' ',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> MazeGrid {
        MazeGrid::from_ascii(&[
            "#####", //
            "#...#", //
            "#.#.E", //
            "#...#", //
            "#####",
        ])
    }

    #[test]
    fn out_of_bounds_reads_as_wall() {
        let g = tiny();
        assert_eq!(g.cell_at(-1, 2), Cell::Wall);
        assert_eq!(g.cell_at(2, -7), Cell::Wall);
        assert_eq!(g.cell_at(5, 1), Cell::Wall);
        assert_eq!(g.cell_at(1, 5), Cell::Wall);
        assert_eq!(g.cell_at_point(Vec2::new(-0.2, 1.5)), Cell::Wall);
    }

    #[test]
    fn row_codes_and_exit_are_reported() {
        let g = tiny();
        assert_eq!(g.row_codes(2), Some(vec![1, 0, 1, 0, 2]));
        assert_eq!(g.row_codes(5), None);
        assert_eq!(g.exit(), Some((4, 2)));
        assert!(!Cell::Exit.is_solid());
    }

    #[test]
    fn is_wall_treats_exit_as_open() {
        let g = tiny();
        assert!(g.is_wall(0, 0));
        assert!(g.is_wall(2, 2));
        assert!(!g.is_wall(1, 1));
        assert!(!g.is_wall(4, 2)); // exit
        assert!(g.is_wall(-1, 1));
        assert!(g.is_wall(1, 9));
    }

    #[test]
    fn reachability_follows_open_cells() {
        let g = tiny();
        assert!(g.is_reachable((1, 1), (4, 2)));
        assert!(!g.is_reachable((1, 1), (2, 2)));
        assert!(!g.is_reachable((0, 0), (1, 1)));
    }

    #[test]
    fn display_uses_block_glyphs() {
        let g = MazeGrid::from_ascii(&["#E", ".#"]);
        assert_eq!(g.to_string(), "█E\n █\n");
    }
}
