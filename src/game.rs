//! One play session: current maze, player pose, win state and restarts.

use rand::prelude::*;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::config::{ConfigError, PlayerConfig, ViewConfig};
use crate::engine::{Screen, Sky, hud_calls, minimap_calls, render_scene, win_screen_calls};
use crate::renderer::DrawCall;
use crate::sim::{self, InputCmd};
use crate::world::{CameraPose, GenerateError, MazeGenerator, MazeGrid};

/// Longest frame the simulation will integrate in one go, seconds.
pub const MAX_DT: f32 = 0.1;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GameError {
    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Something the front-end may want to announce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Escaped,
    Restarted,
}

/// How a session is set up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settings {
    pub maze_width: usize,
    pub maze_height: usize,
    /// Fixed seed for the first maze; later mazes use `seed + restarts`.
    pub seed: Option<u64>,
    pub view: ViewConfig,
    pub player: PlayerConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            maze_width: 51,
            maze_height: 51,
            seed: None,
            view: ViewConfig::default(),
            player: PlayerConfig::default(),
        }
    }
}

pub struct Game {
    screen: Screen,
    settings: Settings,
    generator: MazeGenerator,
    /// Draws maze seeds when no fixed seed was given.
    rng: StdRng,
    sky: Sky,

    maze: MazeGrid,
    maze_seed: u64,
    pose: CameraPose,
    won: bool,
    restarts: u64,
}

impl Game {
    pub fn new(screen: Screen, settings: Settings) -> Result<Self, GameError> {
        settings.view.validate()?;
        let generator = MazeGenerator::new(settings.maze_width, settings.maze_height)?;
        let mut rng = StdRng::from_entropy();
        let maze_seed = settings.seed.unwrap_or_else(|| rng.r#gen());
        let maze = generator.generate(Some(maze_seed))?;
        let pose = Self::spawn(&maze);

        Ok(Self {
            screen,
            settings,
            generator,
            rng,
            sky: Sky::new(&screen),
            maze,
            maze_seed,
            pose,
            won: false,
            restarts: 0,
        })
    }

    fn spawn(maze: &MazeGrid) -> CameraPose {
        CameraPose::new(maze.spawn_point(), 0.0, 0.0)
    }

    /* ---------------------------------------------------------------- */

    #[inline]
    pub fn maze(&self) -> &MazeGrid {
        &self.maze
    }

    #[inline]
    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    #[inline]
    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Seed the current maze was generated from.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.maze_seed
    }

    #[inline]
    pub fn restarts(&self) -> u64 {
        self.restarts
    }

    /// Advance one frame. While playing, moves the player and checks the
    /// exit; once won, only a restart request does anything.
    pub fn update(&mut self, dt: f32, cmd: &InputCmd) -> Result<Option<GameEvent>, GameError> {
        if self.won {
            if cmd.restart {
                self.restart()?;
                return Ok(Some(GameEvent::Restarted));
            }
            return Ok(None);
        }

        let dt = dt.clamp(0.0, MAX_DT);
        self.pose = sim::update(self.pose, dt, cmd, &self.maze, &self.settings.player);
        if sim::is_at_exit(&self.pose, &self.maze) {
            self.won = true;
            return Ok(Some(GameEvent::Escaped));
        }
        Ok(None)
    }

    /// Fresh maze, player back at the spawn point facing north.
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.restarts += 1;
        let seed = match self.settings.seed {
            Some(base) => base.wrapping_add(self.restarts),
            None => self.rng.r#gen(),
        };
        self.maze = self.generator.generate(Some(seed))?;
        self.maze_seed = seed;
        self.pose = Self::spawn(&self.maze);
        self.won = false;
        Ok(())
    }

    /// Draw calls for the whole frame, back to front.
    pub fn frame(&self, fps: u32) -> Vec<DrawCall> {
        let mut calls = self.sky.calls();
        if self.won {
            calls.extend(win_screen_calls(&self.screen));
            return calls;
        }

        let columns = render_scene(&self.maze, &self.pose, &self.screen, &self.settings.view);
        calls.reserve(columns.len() * 2);
        for col in columns {
            calls.extend(col);
        }
        calls.extend(minimap_calls(&self.maze, &self.pose, &self.screen));
        calls.extend(hud_calls(fps));
        calls
    }
}

/*===================================================================*/
/*                               Tests                               */
/*===================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::MoveKeys;
    use glam::Vec2;
    use std::f32::consts::FRAC_PI_2;

    fn game(seed: Option<u64>) -> Game {
        let settings = Settings {
            maze_width: 21,
            maze_height: 21,
            seed,
            ..Default::default()
        };
        Game::new(Screen::new(160, 120).unwrap(), settings).unwrap()
    }

    fn step_onto_exit(g: &mut Game) -> Option<GameEvent> {
        let (ex, ey) = g.maze().exit().unwrap();
        g.pose = CameraPose::new(Vec2::new(ex as f32 + 0.5, ey as f32 + 0.5), 0.0, 0.0);
        g.update(0.016, &InputCmd::default()).unwrap()
    }

    #[test]
    fn starts_at_spawn_point() {
        let g = game(Some(7));
        assert_eq!(g.pose().pos(), Vec2::new(10.5, 10.5));
        assert_eq!(g.pose().yaw(), 0.0);
        assert!(!g.is_won());
        assert_eq!(g.seed(), 7);
    }

    #[test]
    fn fixed_seed_reproduces_maze() {
        assert_eq!(game(Some(3)).maze(), game(Some(3)).maze());
    }

    #[test]
    fn bad_settings_are_rejected() {
        let s = Screen::new(160, 120).unwrap();
        let small = Settings {
            maze_width: 3,
            ..Default::default()
        };
        assert!(matches!(Game::new(s, small), Err(GameError::Generate(_))));

        let huge = Settings {
            maze_width: usize::MAX,
            ..Default::default()
        };
        assert_eq!(
            Game::new(s, huge).err(),
            Some(GameError::Generate(GenerateError::TooLarge {
                width: usize::MAX,
                height: 51,
            }))
        );

        let mut fov = Settings::default();
        fov.view.fov = 0.0;
        assert!(matches!(Game::new(s, fov), Err(GameError::Config(_))));
    }

    #[test]
    fn long_frames_are_capped() {
        let mut g = game(Some(1));
        g.pose = CameraPose::new(g.pose().pos(), FRAC_PI_2, 0.0);
        let cmd = InputCmd {
            keys: MoveKeys::FORWARD,
            ..Default::default()
        };
        let before = g.pose().pos();
        g.update(5.0, &cmd).unwrap();
        let moved = (g.pose().pos() - before).length();
        assert!((moved - 0.3).abs() < 1e-4, "{moved}");
    }

    #[test]
    fn reaching_the_exit_wins() {
        let mut g = game(Some(11));
        assert_eq!(step_onto_exit(&mut g), Some(GameEvent::Escaped));
        assert!(g.is_won());

        // frozen until restart
        let pos = g.pose().pos();
        let cmd = InputCmd {
            keys: MoveKeys::FORWARD,
            ..Default::default()
        };
        assert_eq!(g.update(0.05, &cmd).unwrap(), None);
        assert_eq!(g.pose().pos(), pos);
    }

    #[test]
    fn restart_only_after_winning() {
        let mut g = game(Some(100));
        let restart = InputCmd {
            restart: true,
            ..Default::default()
        };
        assert_eq!(g.update(0.016, &restart).unwrap(), None);
        assert_eq!(g.restarts(), 0);

        step_onto_exit(&mut g);
        assert_eq!(g.update(0.016, &restart).unwrap(), Some(GameEvent::Restarted));
        assert!(!g.is_won());
        assert_eq!(g.restarts(), 1);
        assert_eq!(g.seed(), 101);
        assert_eq!(g.pose().pos(), Vec2::new(10.5, 10.5));
        assert_eq!(g.maze(), game(Some(101)).maze());
    }

    #[test]
    fn unseeded_restart_draws_a_new_seed() {
        let mut g = game(None);
        step_onto_exit(&mut g);
        g.restart().unwrap();
        assert_eq!(g.restarts(), 1);
        assert!(g.maze().exit().is_some());
    }

    #[test]
    fn frame_layers_follow_state() {
        let mut g = game(Some(5));
        let playing = g.frame(60);
        assert!(matches!(playing[0], DrawCall::Clear { .. }));
        let vlines = playing.iter().filter(|c| matches!(c, DrawCall::VLine { .. })).count();
        assert!(vlines >= 160);
        assert!(playing.iter().any(|c| matches!(c, DrawCall::Text { text, .. } if text == "FPS: 60")));

        step_onto_exit(&mut g);
        let won = g.frame(60);
        assert!(!won.iter().any(|c| matches!(c, DrawCall::VLine { .. })));
        assert!(won.iter().any(|c| matches!(c, DrawCall::Text { text, .. } if text == "YOU ESCAPED!")));
    }
}
