use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;

/// Wrap an angle into `[0, 2π)`.
#[inline]
pub fn wrap_angle(a: f32) -> f32 {
    let w = a.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if w >= TAU { 0.0 } else { w }
}

/// Unit vector for a heading where 0 = north (−Y), π/2 = east (+X).
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    let (s, c) = (angle - FRAC_PI_2).sin_cos();
    Vec2::new(c, s)
}

/// Player view-point in grid space.
///
/// * `pos` is measured in cells; `(2.5, 3.5)` is the middle of cell `(2, 3)`.
/// * `yaw` is kept in `[0, 2π)`, clockwise on screen because Y grows down.
/// * `pitch` only shifts the horizon; it never tilts the ray plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pos: Vec2,
    yaw: f32,
    pitch: f32,
}

impl CameraPose {
    pub fn new(pos: Vec2, yaw: f32, pitch: f32) -> Self {
        Self {
            pos,
            yaw: wrap_angle(yaw),
            pitch,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Same orientation, new position.
    #[inline]
    pub fn with_pos(self, pos: Vec2) -> Self {
        Self { pos, ..self }
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Unit vector the player walks along when pressing forward.
    #[inline]
    pub fn forward(&self) -> Vec2 {
        heading(self.yaw)
    }

    /// Forward rotated +90°: the strafe-right direction.
    #[inline]
    pub fn right(&self) -> Vec2 {
        self.forward().perp()
    }

    /*──────────────────────── orientation helpers ───────────────────*/

    /// Rotate by `delta_yaw`, wrapping into `[0, 2π)`.
    pub fn turn(&mut self, delta_yaw: f32) {
        self.yaw = wrap_angle(self.yaw + delta_yaw);
    }

    /// Tilt by `delta_pitch`, clamped to `±max_pitch`.
    pub fn tilt(&mut self, delta_pitch: f32, max_pitch: f32) {
        self.pitch = (self.pitch + delta_pitch).clamp(-max_pitch, max_pitch);
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
