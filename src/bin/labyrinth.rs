//! First-person labyrinth escape.
//!
//! ```bash
//! cargo run --release -- --maze-width 31 --maze-height 31 --seed 7
//! ```

use anyhow::Context;
use clap::Parser;
use glam::Vec2;
use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};
use std::time::{Duration, Instant};

use labyrinth_rs::{
    config::{PlayerConfig, ViewConfig},
    engine::Screen,
    game::{Game, GameEvent, Settings},
    renderer::{RendererExt, Software},
    sim::{InputCmd, MoveKeys},
};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Window width in pixels
    #[arg(long, default_value_t = 1024)]
    screen_width: usize,

    /// Window height in pixels
    #[arg(long, default_value_t = 768)]
    screen_height: usize,

    /// Maze width in cells (at least 5)
    #[arg(long, default_value_t = 51)]
    maze_width: usize,

    /// Maze height in cells (at least 5)
    #[arg(long, default_value_t = 51)]
    maze_height: usize,

    /// Fixed seed for a reproducible maze; restarts use seed + n
    #[arg(long)]
    seed: Option<u64>,

    /// Horizontal field of view in degrees
    #[arg(long, default_value_t = 60.0)]
    fov_deg: f32,

    /// How far rays travel, in cells
    #[arg(long, default_value_t = 10.0)]
    view_distance: f32,

    /// Radians of turn per pixel of mouse motion
    #[arg(long, default_value_t = 0.003)]
    mouse_sensitivity: f32,

    /// Frame-rate cap
    #[arg(long, default_value_t = 60)]
    fps: usize,
}

impl Opts {
    fn settings(&self) -> Settings {
        Settings {
            maze_width: self.maze_width,
            maze_height: self.maze_height,
            seed: self.seed,
            view: ViewConfig {
                fov: self.fov_deg.to_radians(),
                view_distance: self.view_distance,
                ..Default::default()
            },
            player: PlayerConfig {
                mouse_sensitivity: self.mouse_sensitivity,
                ..Default::default()
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    // ─────────── build the session ────────────
    let screen = Screen::new(opts.screen_width, opts.screen_height)?;
    let mut game = Game::new(screen, opts.settings()).context("cannot start")?;
    announce(&game);
    println!("Controls: WASD move, mouse look, ESC quit");

    // ─────────── window ────────────
    let (w, h) = (screen.w, screen.h);
    let mut win = Window::new("3D Labyrinth Escape", w, h, WindowOptions::default())?;
    win.set_target_fps(opts.fps);
    // minifb cannot grab the pointer; look uses position deltas while it is over the window
    win.set_cursor_visibility(false);

    let mut renderer = Software::default();
    let mut last_mouse = win.get_mouse_pos(MouseMode::Pass);
    let mut last_frame = Instant::now();

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO; // cumulated frame-build time
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();
    let mut hud_frames = 0u32;
    let mut hud_since = Instant::now();
    let mut hud_fps = 0u32;

    while win.is_open() {
        let t0 = Instant::now();
        let dt = t0.duration_since(last_frame).as_secs_f32();
        last_frame = t0;

        /* --------------- build the InputCmd ------------------------------ */
        let mut cmd = InputCmd::default();
        for (key, flag) in [
            (Key::W, MoveKeys::FORWARD),
            (Key::S, MoveKeys::BACK),
            (Key::A, MoveKeys::STRAFE_LEFT),
            (Key::D, MoveKeys::STRAFE_RIGHT),
        ] {
            if win.is_key_down(key) {
                cmd.keys |= flag;
            }
        }
        cmd.quit = win.is_key_down(Key::Escape);
        cmd.restart = win.is_key_pressed(Key::R, KeyRepeat::No); // edge-trigger

        let mouse = win.get_mouse_pos(MouseMode::Pass);
        if let (Some((mx, my)), Some((lx, ly))) = (mouse, last_mouse) {
            cmd.look = Vec2::new(mx - lx, my - ly);
        }
        last_mouse = mouse;

        if cmd.quit {
            break;
        }

        /* --------------- simulate ---------------------------------------- */
        match game.update(dt, &cmd)? {
            Some(GameEvent::Escaped) => {
                println!("Congratulations! You escaped the labyrinth!");
                println!("Press 'R' to play again or ESC to quit");
            }
            Some(GameEvent::Restarted) => {
                println!("Restart #{}", game.restarts());
                announce(&game);
            }
            None => {}
        }

        /* --------------- draw -------------------------------------------- */
        let calls = game.frame(hud_fps);
        let mut shown = Ok(());
        renderer.draw_frame(w, h, &calls, |fb, w, h| {
            acc_time += t0.elapsed();
            acc_frames += 1;
            shown = win.update_with_buffer(fb, w, h);
        });
        shown?;

        hud_frames += 1;
        if hud_since.elapsed() >= Duration::from_secs(1) {
            hud_fps = (hud_frames as f32 / hud_since.elapsed().as_secs_f32()).round() as u32;
            hud_frames = 0;
            hud_since = Instant::now();
        }

        // ─────────── accumulate & report every ~3 s ────────────────────
        if last_print.elapsed() >= Duration::from_secs(3) && acc_frames > 0 {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            println!("avg frame: {:.2} ms  ({:.1} FPS)", avg_ms, 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}

fn announce(game: &Game) {
    let maze = game.maze();
    println!(
        "Maze {}×{} generated (seed {}), exit at {:?}",
        maze.width(),
        maze.height(),
        game.seed(),
        maze.exit()
    );
}
