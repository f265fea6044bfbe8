use glam::Vec2;

use super::collision::slide_move;
use super::{InputCmd, MoveKeys};
use crate::config::PlayerConfig;
use crate::world::{CameraPose, Cell, MazeGrid};

/// Mouse look: X motion turns, Y motion tilts (mouse up looks up).
pub fn apply_look(pose: CameraPose, look: Vec2, cfg: &PlayerConfig) -> CameraPose {
    let mut out = pose;
    out.turn(look.x * cfg.mouse_sensitivity);
    out.tilt(-look.y * cfg.mouse_sensitivity, cfg.max_pitch);
    out
}

/// Unclipped displacement for this frame. Keys add up independently, so
/// diagonals are faster than straight runs.
pub fn wish_move(pose: &CameraPose, keys: MoveKeys, speed: f32, dt: f32) -> Vec2 {
    let f = pose.forward();
    let r = pose.right();
    let step = speed * dt;

    let mut d = Vec2::ZERO;
    if keys.contains(MoveKeys::FORWARD) {
        d += f * step;
    }
    if keys.contains(MoveKeys::BACK) {
        d -= f * step;
    }
    if keys.contains(MoveKeys::STRAFE_LEFT) {
        d -= r * step;
    }
    if keys.contains(MoveKeys::STRAFE_RIGHT) {
        d += r * step;
    }
    d
}

/// One frame of player simulation: look first (so movement uses the new
/// heading), then a collision-resolved move.
pub fn update(
    pose: CameraPose,
    dt: f32,
    cmd: &InputCmd,
    maze: &MazeGrid,
    cfg: &PlayerConfig,
) -> CameraPose {
    let looked = apply_look(pose, cmd.look, cfg);
    let delta = wish_move(&looked, cmd.keys, cfg.speed, dt);
    if delta == Vec2::ZERO {
        return looked;
    }
    let moved = slide_move(maze, looked.pos(), delta, cfg.radius);
    looked.with_pos(moved.pos)
}

/// Win test: the cell under the player's truncated position is the exit.
pub fn is_at_exit(pose: &CameraPose, maze: &MazeGrid) -> bool {
    let p = pose.pos();
    if p.x < 0.0 || p.y < 0.0 {
        return false;
    }
    maze.get(p.x as usize, p.y as usize) == Some(Cell::Exit)
}
