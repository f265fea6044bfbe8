//! Procedural wall and floor colouring.
//!
//! No textures are sampled. Walls get a material from coarse 10×10-cell
//! zones (so whole districts of the maze are brick or hedge) and a colour
//! variant from a finer diagonal stripe pattern; distance darkens them.

use glam::Vec2;

use crate::renderer::{Rgba, channels, rgb};

/*──────────────────────────── palette ───────────────────────────────*/

pub const BRICK_RED: Rgba = rgb(180, 60, 40);
pub const BRICK_DARK: Rgba = rgb(120, 40, 30);
pub const BRICK_LIGHT: Rgba = rgb(220, 80, 60);

pub const BUSH_GREEN: Rgba = rgb(34, 139, 34);
pub const BUSH_DARK: Rgba = rgb(20, 80, 20);

pub const FLOOR_LIGHT: Rgba = rgb(180, 120, 60);
pub const FLOOR_DARK: Rgba = rgb(120, 80, 40);

const BRICK_VARIANTS: [Rgba; 3] = [BRICK_RED, BRICK_DARK, BRICK_LIGHT];
const BUSH_VARIANTS: [Rgba; 4] = [BUSH_GREEN, BUSH_GREEN, BUSH_DARK, BUSH_GREEN];

/// Width of a material zone in cells.
const ZONE_SIZE: f32 = 10.0;

/// Darkest a wall gets, as a fraction of its base colour.
pub const MIN_BRIGHTNESS: f32 = 0.4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Material {
    Brick,
    Bush,
}

/// Material plus colour variant for one wall hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallZone {
    pub material: Material,
    pub variant: usize,
}

impl WallZone {
    /// Deterministic classification of a wall hit point.
    pub fn classify(hit: Vec2) -> Self {
        let zone = (hit.x / ZONE_SIZE).floor() as i64 + (hit.y / ZONE_SIZE).floor() as i64;
        let stripe = hit.x + hit.y;
        if zone.rem_euclid(3) == 0 {
            WallZone {
                material: Material::Brick,
                variant: ((stripe * 2.0).floor() as i64).rem_euclid(BRICK_VARIANTS.len() as i64)
                    as usize,
            }
        } else {
            WallZone {
                material: Material::Bush,
                variant: ((stripe * 1.5).floor() as i64).rem_euclid(BUSH_VARIANTS.len() as i64)
                    as usize,
            }
        }
    }

    pub fn base_color(&self) -> Rgba {
        match self.material {
            Material::Brick => BRICK_VARIANTS[self.variant % BRICK_VARIANTS.len()],
            Material::Bush => BUSH_VARIANTS[self.variant % BUSH_VARIANTS.len()],
        }
    }
}

/// Closer is brighter; never below [`MIN_BRIGHTNESS`].
#[inline]
pub fn brightness(distance: f32, view_distance: f32) -> f32 {
    (1.0 - distance / view_distance).clamp(MIN_BRIGHTNESS, 1.0)
}

/// Scale each channel by `k` (truncating).
pub fn shade(color: Rgba, k: f32) -> Rgba {
    let (r, g, b) = channels(color);
    let s = |c: u8| (c as f32 * k) as u8;
    rgb(s(r), s(g), s(b))
}

/// Floor colour for `column`; the pattern drifts as the player moves.
pub fn floor_tone(column: usize, factor: f32, cam: Vec2) -> Rgba {
    let band = ((column as f32 * factor + cam.x + cam.y).floor() as i64).rem_euclid(4);
    if band < 2 { FLOOR_LIGHT } else { FLOOR_DARK }
}
