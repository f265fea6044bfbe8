use bitflags::bitflags;
use glam::Vec2;

bitflags! {
    /// Movement keys held this frame.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
    pub struct MoveKeys: u8 {
        const FORWARD      = 0b0001; // W
        const BACK         = 0b0010; // S
        const STRAFE_LEFT  = 0b0100; // A
        const STRAFE_RIGHT = 0b1000; // D
    }
}

/// Everything the simulation needs from the input devices for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputCmd {
    pub keys: MoveKeys,
    pub look: Vec2,    // relative mouse motion in pixels (dx, dy)
    pub quit: bool,    // Esc / window closed
    pub restart: bool, // R, edge-triggered
}
