use crate::config::ConfigError;

/// Constants that depend on the *frame-buffer*, not on the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Screen {
    pub w: usize,
    pub h: usize,
}

impl Screen {
    pub fn new(w: usize, h: usize) -> Result<Self, ConfigError> {
        if w == 0 || h == 0 {
            return Err(ConfigError::EmptyScreen(w, h));
        }
        Ok(Self { w, h })
    }

    #[inline]
    pub fn half_w(&self) -> f32 {
        self.w as f32 * 0.5
    }

    #[inline]
    pub fn half_h(&self) -> f32 {
        self.h as f32 * 0.5
    }
}
