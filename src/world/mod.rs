mod camera;
mod generator;
mod maze;

pub use camera::{CameraPose, heading, wrap_angle};
pub use generator::{GenerateError, MazeGenerator, generate};
pub use maze::{Cell, GridPos, MazeGrid};
