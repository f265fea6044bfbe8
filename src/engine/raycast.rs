//! Fixed-step ray march through the maze grid.
//!
//! Rays advance in constant increments rather than cell-to-cell (DDA); the
//! reported distance is therefore accurate to one step, which is plenty at
//! the default 0.05-cell step.

use glam::Vec2;

use crate::world::{MazeGrid, heading};

/// Result of marching one ray. Lives for a single column of a single frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec2,
    /// Heading, same convention as the camera yaw.
    pub angle: f32,
    /// Radial distance to the first wall, or the view distance on a miss.
    pub distance: f32,
    pub hit: bool,
}

impl Ray {
    #[inline]
    pub fn dir(&self) -> Vec2 {
        heading(self.angle)
    }

    /// World point where the march stopped.
    #[inline]
    pub fn end_point(&self) -> Vec2 {
        self.origin + self.dir() * self.distance
    }
}

/// March from `origin` along `angle` until a wall or the grid edge is
/// reached, or `max_distance` is exhausted. Exit cells are see-through.
pub fn cast_ray(maze: &MazeGrid, origin: Vec2, angle: f32, step: f32, max_distance: f32) -> Ray {
    let dir = heading(angle);
    let mut n = 0u32;
    loop {
        let travelled = n as f32 * step;
        if travelled >= max_distance {
            break;
        }
        n += 1;
        let distance = n as f32 * step;
        if maze.cell_at_point(origin + dir * distance).is_solid() {
            return Ray {
                origin,
                angle,
                distance,
                hit: true,
            };
        }
    }
    Ray {
        origin,
        angle,
        distance: max_distance,
        hit: false,
    }
}

/// Project a radial distance onto the view plane to undo fisheye bowing.
#[inline]
pub fn fisheye_correct(distance: f32, ray_angle: f32, yaw: f32) -> f32 {
    distance * (ray_angle - yaw).cos()
}
