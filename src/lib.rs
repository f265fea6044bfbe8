//! Escape a randomly generated labyrinth in first person.
//!
//! * [`world`] – maze grid, generator and camera pose.
//! * [`sim`] – input, movement with wall sliding, win detection.
//! * [`engine`] – raycaster and overlays, emitting [`renderer::DrawCall`]s.
//! * [`renderer`] – the draw-call sink and its software back-end.
//! * [`game`] – ties the above into one session.

pub mod config;
pub mod engine;
pub mod game;
pub mod renderer;
pub mod sim;
pub mod world;
