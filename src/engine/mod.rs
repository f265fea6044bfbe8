pub mod overlay;
pub mod projection;
pub mod raycast;
pub mod scene;
pub mod shading;
pub mod types;

pub use overlay::{hud_calls, minimap_calls, win_screen_calls};
pub use raycast::{Ray, cast_ray, fisheye_correct};
pub use scene::{ColumnCalls, ColumnHit, Sky, render_scene};
pub use types::Screen;
