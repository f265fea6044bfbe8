use crate::engine::types::Screen;

/// Heading of the ray through `column`; columns sweep left to right from
/// `yaw − fov/2` in equal angular steps.
#[inline]
pub fn ray_angle(column: usize, width: usize, yaw: f32, fov: f32) -> f32 {
    yaw - fov * 0.5 + (column as f32 / width as f32) * fov
}

/// Screen row of the horizon. Positive pitch (looking up) lowers it.
#[inline]
pub fn horizon(screen: &Screen, pitch: f32, look_scale: f32) -> i32 {
    (screen.half_h() + pitch * look_scale) as i32
}

/// Rows `top .. bottom` (half-open) a wall occupies, already clipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallSpan {
    pub top: i32,
    pub bottom: i32,
}

impl WallSpan {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.top >= self.bottom
    }
}

/// Vertical extent of a wall at `corrected` distance, centred on `horizon`.
pub fn wall_span(screen: &Screen, horizon: i32, corrected: f32, epsilon: f32) -> WallSpan {
    let h = screen.h as f32;
    let half = (h / (corrected + epsilon)) * 0.5;
    let top = (horizon as f32 - half).clamp(0.0, h);
    let bottom = (horizon as f32 + half).clamp(0.0, h);
    WallSpan {
        top: top as i32,
        bottom: bottom as i32,
    }
}

/// Rows `top .. bottom` of the floor below the horizon (empty when the
/// horizon is at or below the bottom edge).
pub fn floor_span(screen: &Screen, horizon: i32) -> WallSpan {
    let h = screen.h as i32;
    WallSpan {
        top: horizon.clamp(0, h),
        bottom: h,
    }
}
