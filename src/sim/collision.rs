//! Box-vs-grid collision with per-axis sliding.
//!
//! The player is a square of half-size `radius`. A position is blocked when
//! any of nine sample points (centre, four edge midpoints, four corners)
//! lands in a wall or outside the grid. Moves are resolved one axis at a
//! time so grazing a wall diagonally slides along it instead of stopping.

use glam::Vec2;

use crate::world::MazeGrid;

/// What the caller gets back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveResult {
    pub pos: Vec2,       // final XY
    pub blocked_x: bool, // X component was rejected
    pub blocked_y: bool, // Y component was rejected
}

/// Nine sample offsets in units of the radius.
const SAMPLES: [(f32, f32); 9] = [
    (0.0, 0.0),
    (-1.0, -1.0),
    (1.0, -1.0),
    (-1.0, 1.0),
    (1.0, 1.0),
    (0.0, -1.0),
    (0.0, 1.0),
    (-1.0, 0.0),
    (1.0, 0.0),
];

/// `true` if a player centred at `pos` would overlap a wall or leave the grid.
pub fn collides(maze: &MazeGrid, pos: Vec2, radius: f32) -> bool {
    SAMPLES
        .iter()
        .any(|&(ox, oy)| maze.cell_at_point(pos + Vec2::new(ox, oy) * radius).is_solid())
}

/// Try `delta` from `pos`, X first, then Y from wherever X ended up.
pub fn slide_move(maze: &MazeGrid, pos: Vec2, delta: Vec2, radius: f32) -> MoveResult {
    let mut out = pos;

    let try_x = Vec2::new(pos.x + delta.x, out.y);
    let blocked_x = collides(maze, try_x, radius);
    if !blocked_x {
        out = try_x;
    }

    let try_y = Vec2::new(out.x, pos.y + delta.y);
    let blocked_y = collides(maze, try_y, radius);
    if !blocked_y {
        out = try_y;
    }

    MoveResult {
        pos: out,
        blocked_x,
        blocked_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: f32 = 0.3;

    fn room() -> MazeGrid {
        MazeGrid::from_ascii(&[
            "#######", //
            "#.....#", //
            "#.....#", //
            "#..#..#", //
            "#.....#", //
            "#######",
        ])
    }

    #[test]
    fn open_floor_accepts() {
        let g = room();
        assert!(!collides(&g, Vec2::new(1.5, 1.5), R));
        assert!(!collides(&g, Vec2::new(2.5, 2.5), R));
    }

    #[test]
    fn any_sample_in_a_wall_rejects() {
        let g = room();
        // right edge sample pokes into the pillar at (3,3)
        assert!(collides(&g, Vec2::new(2.8, 3.5), R));
        // corner sample only
        assert!(collides(&g, Vec2::new(2.8, 2.8), R));
        // top samples poke into the border
        assert!(collides(&g, Vec2::new(1.5, 1.2), R));
    }

    #[test]
    fn leaving_the_grid_collides() {
        let g = MazeGrid::from_ascii(&["..", ".."]);
        assert!(!collides(&g, Vec2::new(1.0, 1.0), R));
        assert!(collides(&g, Vec2::new(0.2, 1.0), R));
        assert!(collides(&g, Vec2::new(1.0, 1.9), R));
    }

    #[test]
    fn exit_cells_never_block() {
        let g = MazeGrid::from_ascii(&["#E#", "#.#", "###"]);
        assert!(!collides(&g, Vec2::new(1.5, 0.5), R));
        assert!(!collides(&g, Vec2::new(1.5, 1.0), R));
    }

    #[test]
    fn free_move_goes_through() {
        let g = room();
        let r = slide_move(&g, Vec2::new(1.5, 1.5), Vec2::new(0.5, 0.5), R);
        assert_eq!(r.pos, Vec2::new(2.0, 2.0));
        assert!(!r.blocked_x && !r.blocked_y);
    }

    #[test]
    fn blocked_x_still_slides_along_y() {
        let g = room();
        // pushing east into the border wall while also moving south
        let start = Vec2::new(5.5, 1.5);
        let r = slide_move(&g, start, Vec2::new(0.4, 0.5), R);
        assert!(r.blocked_x);
        assert!(!r.blocked_y);
        assert_eq!(r.pos, Vec2::new(5.5, 2.0));
    }

    #[test]
    fn blocked_y_keeps_x_progress() {
        let g = room();
        let start = Vec2::new(2.0, 1.5);
        let r = slide_move(&g, start, Vec2::new(0.5, -0.4), R);
        assert!(!r.blocked_x);
        assert!(r.blocked_y);
        assert_eq!(r.pos, Vec2::new(2.5, 1.5));
    }
}
