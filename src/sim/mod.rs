mod collision;
mod components;
mod systems;

pub use collision::{MoveResult, collides, slide_move};
pub use components::{InputCmd, MoveKeys};
pub use systems::{apply_look, is_at_exit, update, wish_move};
