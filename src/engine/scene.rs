//! First-person view: sky backdrop plus one floor/wall pair per column.

use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;
use smallvec::SmallVec;

use super::projection::{floor_span, horizon, ray_angle, wall_span};
use super::raycast::{Ray, cast_ray, fisheye_correct};
use super::shading::{WallZone, brightness, floor_tone, shade};
use super::types::Screen;
use crate::config::ViewConfig;
use crate::renderer::{DrawCall, Rgba, rgb};
use crate::world::{CameraPose, MazeGrid};

pub const SKY_BLUE: Rgba = rgb(135, 206, 235);
pub const CLOUD_WHITE: Rgba = rgb(248, 248, 255);
pub const CLOUD_SHADOW: Rgba = rgb(220, 220, 230);

const CLOUD_SEED: u64 = 42;
const CLOUDS: usize = 8;
const PUFFS_PER_CLOUD: usize = 4;
const SHADOW_OFFSET: i32 = 2;

/// Floor first, then the wall if the ray hit one.
pub type ColumnCalls = SmallVec<[DrawCall; 2]>;

/// Everything the shader needs to know about one screen column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnHit {
    pub column: usize,
    pub ray: Ray,
    /// Distance projected onto the view direction.
    pub corrected: f32,
}

/// March the ray belonging to `column`.
pub fn cast_column(
    maze: &MazeGrid,
    pose: &CameraPose,
    column: usize,
    width: usize,
    view: &ViewConfig,
) -> ColumnHit {
    let angle = ray_angle(column, width, pose.yaw(), view.fov);
    let ray = cast_ray(maze, pose.pos(), angle, view.step, view.view_distance);
    ColumnHit {
        column,
        ray,
        corrected: fisheye_correct(ray.distance, angle, pose.yaw()),
    }
}

/// Turn one column hit into draw calls.
pub fn column_calls(
    hit: &ColumnHit,
    pose: &CameraPose,
    screen: &Screen,
    view: &ViewConfig,
) -> ColumnCalls {
    let x = hit.column as i32;
    let hz = horizon(screen, pose.pitch(), view.look_scale);
    let mut calls = ColumnCalls::new();

    let floor = floor_span(screen, hz);
    calls.push(DrawCall::VLine {
        x,
        y0: floor.top,
        y1: floor.bottom,
        color: floor_tone(hit.column, view.floor_factor, pose.pos()),
    });

    if hit.ray.hit {
        let span = wall_span(screen, hz, hit.corrected, view.epsilon);
        let zone = WallZone::classify(hit.ray.end_point());
        calls.push(DrawCall::VLine {
            x,
            y0: span.top,
            y1: span.bottom,
            color: shade(zone.base_color(), brightness(hit.corrected, view.view_distance)),
        });
    }
    calls
}

/// Cast every column in parallel; result is indexed by column.
pub fn render_scene(
    maze: &MazeGrid,
    pose: &CameraPose,
    screen: &Screen,
    view: &ViewConfig,
) -> Vec<ColumnCalls> {
    (0..screen.w)
        .into_par_iter()
        .map(|c| {
            let hit = cast_column(maze, pose, c, screen.w, view);
            column_calls(&hit, pose, screen, view)
        })
        .collect()
}

/*──────────────────────────── sky ───────────────────────────────────*/

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Puff {
    x: i32,
    y: i32,
    radius: i32,
}

/// Static sky: laid out once per screen size from a private fixed-seed RNG,
/// so it looks the same every frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sky {
    puffs: Vec<Puff>,
}

impl Sky {
    pub fn new(screen: &Screen) -> Self {
        let mut rng = StdRng::seed_from_u64(CLOUD_SEED);
        let w = screen.w as i32;
        let top = (screen.h as i32 / 3).max(10);

        let mut puffs = Vec::with_capacity(CLOUDS * PUFFS_PER_CLOUD);
        for i in 0..CLOUDS as i32 {
            let x = (i * 150 + 50) % (w + 200);
            let y = rng.gen_range(10..=top);
            for _ in 0..PUFFS_PER_CLOUD {
                puffs.push(Puff {
                    x: x + rng.gen_range(-30..=30),
                    y: y + rng.gen_range(-15..=15),
                    radius: rng.gen_range(25..=45),
                });
            }
        }
        Self { puffs }
    }

    /// Clear to blue, then each puff as shadow + body.
    pub fn calls(&self) -> Vec<DrawCall> {
        let mut out = Vec::with_capacity(1 + self.puffs.len() * 2);
        out.push(DrawCall::Clear { color: SKY_BLUE });
        for p in &self.puffs {
            out.push(DrawCall::Circle {
                cx: p.x + SHADOW_OFFSET,
                cy: p.y + SHADOW_OFFSET,
                radius: p.radius,
                color: CLOUD_SHADOW,
            });
            out.push(DrawCall::Circle {
                cx: p.x,
                cy: p.y,
                radius: p.radius,
                color: CLOUD_WHITE,
            });
        }
        out
    }
}

/*===================================================================*/
/*                               Tests                               */
/*===================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use std::f32::consts::FRAC_PI_2;

    fn hall() -> MazeGrid {
        MazeGrid::from_ascii(&[
            "##########", //
            "#........#", //
            "#........#", //
            "#........#", //
            "##########",
        ])
    }

    fn screen() -> Screen {
        Screen::new(64, 48).unwrap()
    }

    #[test]
    fn one_entry_per_column() {
        let s = screen();
        let pose = CameraPose::new(Vec2::new(1.5, 2.5), FRAC_PI_2, 0.0);
        let cols = render_scene(&hall(), &pose, &s, &ViewConfig::default());
        assert_eq!(cols.len(), s.w);
        for (c, calls) in cols.iter().enumerate() {
            assert_eq!(calls.len(), 2, "column {c}");
            for call in calls {
                match call {
                    DrawCall::VLine { x, .. } => assert_eq!(*x, c as i32),
                    other => panic!("unexpected {other:?}"),
                }
            }
        }
    }

    #[test]
    fn open_ground_draws_only_floor() {
        let rows: Vec<String> = (0..41).map(|_| ".".repeat(41)).collect();
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        let maze = MazeGrid::from_ascii(&rows);
        let pose = CameraPose::new(Vec2::new(20.5, 20.5), 0.3, 0.0);
        let s = screen();
        let cols = render_scene(&maze, &pose, &s, &ViewConfig::default());
        assert!(cols.iter().all(|c| c.len() == 1));
        assert_eq!(
            cols[0][0],
            DrawCall::VLine {
                x: 0,
                y0: 24,
                y1: 48,
                color: floor_tone(0, 0.1, pose.pos()),
            }
        );
    }

    #[test]
    fn centre_column_is_uncorrected() {
        let pose = CameraPose::new(Vec2::new(1.5, 2.5), FRAC_PI_2, 0.0);
        let hit = cast_column(&hall(), &pose, 32, 64, &ViewConfig::default());
        assert!(hit.ray.hit);
        assert!((hit.corrected - hit.ray.distance).abs() < 1e-5);
    }

    #[test]
    fn wall_colour_tracks_zone_and_distance() {
        let view = ViewConfig::default();
        let s = screen();
        let pose = CameraPose::new(Vec2::new(1.5, 2.5), FRAC_PI_2, 0.0);
        let hit = cast_column(&hall(), &pose, 32, s.w, &view);
        let calls = column_calls(&hit, &pose, &s, &view);
        let expected = shade(
            WallZone::classify(hit.ray.end_point()).base_color(),
            brightness(hit.corrected, view.view_distance),
        );
        match calls[1] {
            DrawCall::VLine { y0, y1, color, .. } => {
                assert_eq!(color, expected);
                assert!(y0 < 24 && y1 > 24);
            }
            ref other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn floor_is_kept_when_horizon_leaves_screen() {
        let view = ViewConfig::default();
        let s = screen();
        // pitch 1.0 pushes the horizon 200 px down
        let pose = CameraPose::new(Vec2::new(1.5, 2.5), FRAC_PI_2, 1.0);
        let hit = cast_column(&hall(), &pose, 10, s.w, &view);
        let calls = column_calls(&hit, &pose, &s, &view);
        match calls[0] {
            DrawCall::VLine { y0, y1, .. } => assert!(y0 >= y1),
            ref other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn sky_is_deterministic() {
        let s = Screen::new(1024, 768).unwrap();
        let a = Sky::new(&s);
        assert_eq!(a, Sky::new(&s));
        let calls = a.calls();
        assert_eq!(calls.len(), 1 + CLOUDS * PUFFS_PER_CLOUD * 2);
        assert_eq!(calls[0], DrawCall::Clear { color: SKY_BLUE });
        assert!(a.puffs.iter().all(|p| (25..=45).contains(&p.radius)));
    }
}
