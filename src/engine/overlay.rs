//! 2-D layers drawn over the scene: minimap, HUD text and the win screen.

use super::types::Screen;
use crate::renderer::{DrawCall, GLYPH_H, Rgba, rgb, text_width};
use crate::world::{CameraPose, Cell, MazeGrid};

pub const BLACK: Rgba = rgb(0, 0, 0);
pub const WHITE: Rgba = rgb(255, 255, 255);
pub const RED: Rgba = rgb(255, 0, 0);
pub const WIN_GREEN: Rgba = rgb(0, 255, 0);

const MAP_SIZE: i32 = 150;
const MAP_MARGIN: i32 = 10;
const MAP_CELL: i32 = 3;
const MAP_BG: Rgba = rgb(240, 240, 240);
const MAP_WALL: Rgba = rgb(60, 120, 60);
const MAP_EXIT: Rgba = rgb(255, 215, 0);
const PLAYER_DOT: i32 = 3;
const HEADING_LEN: f32 = 15.0;
const HEADING_WIDTH: i32 = 3;

const TEXT_SCALE: i32 = 2;
const TITLE_SCALE: i32 = 4;

pub const INSTRUCTIONS: [&str; 3] = ["WASD: Move", "Mouse: Look around", "ESC: Quit"];

/// Top-left corner of the minimap panel.
#[inline]
pub fn minimap_origin(screen: &Screen) -> (i32, i32) {
    (screen.w as i32 - MAP_SIZE - MAP_MARGIN, MAP_MARGIN)
}

/// Top-down map in the upper right corner. Large mazes spill past the
/// panel; the back-end clips at the screen edge.
pub fn minimap_calls(maze: &MazeGrid, pose: &CameraPose, screen: &Screen) -> Vec<DrawCall> {
    let (ox, oy) = minimap_origin(screen);
    let mut out = vec![DrawCall::Rect {
        x: ox,
        y: oy,
        w: MAP_SIZE,
        h: MAP_SIZE,
        color: MAP_BG,
    }];

    for (x, y, cell) in maze.cells() {
        let color = match cell {
            Cell::Wall => MAP_WALL,
            Cell::Exit => MAP_EXIT,
            Cell::Path => continue,
        };
        out.push(DrawCall::Rect {
            x: ox + x as i32 * MAP_CELL,
            y: oy + y as i32 * MAP_CELL,
            w: MAP_CELL,
            h: MAP_CELL,
            color,
        });
    }

    let p = pose.pos() * MAP_CELL as f32;
    let (px, py) = (ox + p.x as i32, oy + p.y as i32);
    let tip = pose.forward() * HEADING_LEN;
    let (ex, ey) = (px + tip.x as i32, py + tip.y as i32);

    out.push(DrawCall::Circle {
        cx: px,
        cy: py,
        radius: PLAYER_DOT,
        color: RED,
    });
    out.push(DrawCall::Line {
        x0: px,
        y0: py,
        x1: ex,
        y1: ey,
        width: HEADING_WIDTH,
        color: RED,
    });
    out.push(DrawCall::Circle {
        cx: ex,
        cy: ey,
        radius: PLAYER_DOT,
        color: RED,
    });
    out
}

/// FPS counter and control hints, top left.
pub fn hud_calls(fps: u32) -> Vec<DrawCall> {
    let mut out = Vec::with_capacity(1 + INSTRUCTIONS.len());
    out.push(text(10, 10, format!("FPS: {fps}"), TEXT_SCALE, BLACK));
    for (i, line) in INSTRUCTIONS.iter().enumerate() {
        out.push(text(10, 40 + 20 * i as i32, (*line).to_owned(), TEXT_SCALE, BLACK));
    }
    out
}

/// Victory banner plus restart/quit hints, centred.
pub fn win_screen_calls(screen: &Screen) -> Vec<DrawCall> {
    let cx = screen.w as i32 / 2;
    let cy = screen.h as i32 / 2;
    vec![
        centred(cx, cy - 50, "YOU ESCAPED!", TITLE_SCALE, WIN_GREEN),
        centred(cx, cy + 20, "Press 'R' to play again", TEXT_SCALE, WHITE),
        centred(cx, cy + 50, "Press ESC to quit", TEXT_SCALE, WHITE),
    ]
}

fn text(x: i32, y: i32, text: String, scale: i32, color: Rgba) -> DrawCall {
    DrawCall::Text {
        x,
        y,
        text,
        scale,
        color,
    }
}

/// Text whose bounding box is centred on `(cx, cy)`.
fn centred(cx: i32, cy: i32, s: &str, scale: i32, color: Rgba) -> DrawCall {
    let x = cx - text_width(s, scale) / 2;
    let y = cy - GLYPH_H * scale / 2;
    text(x, y, s.to_owned(), scale, color)
}
