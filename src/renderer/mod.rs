//! Rendering abstraction layer.
//!
//! *The rest of the game never touches a pixel buffer directly.*
//! The scene and overlay builders produce a list of [`DrawCall`]s
//! (back-to-front) and hand them to a type that implements [`Renderer`].
//!
//! * Back-ends only have to rasterise a handful of primitives: vertical
//!   lines, rectangles, circles, straight lines and bitmap text.
//! * A helper blanket-impl [`RendererExt`] adds `draw_frame` so call-sites
//!   stay short.

/// Pixel format of the software frame-buffer (0x00RRGGBB).
pub type Rgba = u32;

/// Pack 8-bit channels into [`Rgba`].
#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Split [`Rgba`] back into `(r, g, b)`.
#[inline]
pub const fn channels(c: Rgba) -> (u8, u8, u8) {
    ((c >> 16) as u8, (c >> 8) as u8, c as u8)
}

/// Bitmap font metrics shared by every back-end, in unscaled pixels.
pub const GLYPH_W: i32 = 5;
pub const GLYPH_H: i32 = 7;
/// Horizontal distance between consecutive glyph origins.
pub const GLYPH_ADVANCE: i32 = 6;

/// Pixel width of `text` drawn at `scale`.
pub fn text_width(text: &str, scale: i32) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 {
        0
    } else {
        (n * GLYPH_ADVANCE - (GLYPH_ADVANCE - GLYPH_W)) * scale
    }
}

/// One primitive. Coordinates are screen pixels; anything off-screen is
/// clipped by the back-end.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    /// Fill the whole frame.
    Clear { color: Rgba },
    /// Column `x`, rows `y0 .. y1` (half-open).
    VLine {
        x: i32,
        y0: i32,
        y1: i32,
        color: Rgba,
    },
    Rect {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: Rgba,
    },
    /// Filled disc.
    Circle {
        cx: i32,
        cy: i32,
        radius: i32,
        color: Rgba,
    },
    /// Straight segment, both ends inclusive, `width` pixels thick.
    Line {
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        width: i32,
        color: Rgba,
    },
    /// Top-left anchored text, glyphs magnified by `scale`.
    Text {
        x: i32,
        y: i32,
        text: String,
        scale: i32,
        color: Rgba,
    },
}

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
/// Software callers typically forward it to their window-manager.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    fn clear(&mut self, color: Rgba);

    fn vline(&mut self, x: i32, y0: i32, y1: i32, color: Rgba);

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba);

    fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Rgba);

    fn line(&mut self, from: (i32, i32), to: (i32, i32), width: i32, color: Rgba);

    fn text(&mut self, x: i32, y: i32, text: &str, scale: i32, color: Rgba);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// * `submit(&[Rgba], w, h)` is run exactly once per frame.
    /// * Software caller passes `|fb, w, h| window.update_with_buffer(fb, w, h)`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

/// Convenience blanket-impl with a one-liner `draw_frame` adaptor.
pub trait RendererExt: Renderer {
    fn draw_call(&mut self, call: &DrawCall) {
        match call {
            DrawCall::Clear { color } => self.clear(*color),
            DrawCall::VLine { x, y0, y1, color } => self.vline(*x, *y0, *y1, *color),
            DrawCall::Rect { x, y, w, h, color } => self.fill_rect(*x, *y, *w, *h, *color),
            DrawCall::Circle {
                cx,
                cy,
                radius,
                color,
            } => self.fill_circle(*cx, *cy, *radius, *color),
            DrawCall::Line {
                x0,
                y0,
                x1,
                y1,
                width,
                color,
            } => self.line((*x0, *y0), (*x1, *y1), *width, *color),
            DrawCall::Text {
                x,
                y,
                text,
                scale,
                color,
            } => self.text(*x, *y, text, *scale, *color),
        }
    }

    fn draw_frame<F>(&mut self, width: usize, height: usize, calls: &[DrawCall], submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        self.begin_frame(width, height);
        for c in calls {
            self.draw_call(c);
        }
        self.end_frame(submit);
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

pub mod software;

pub use software::Software;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_packs_and_unpacks() {
        let c = rgb(0x12, 0x34, 0x56);
        assert_eq!(c, 0x00_123456);
        assert_eq!(channels(c), (0x12, 0x34, 0x56));
    }

    #[test]
    fn text_width_counts_gaps_between_glyphs() {
        assert_eq!(text_width("", 3), 0);
        assert_eq!(text_width("A", 1), 5);
        assert_eq!(text_width("AB", 1), 11);
        assert_eq!(text_width("AB", 2), 22);
    }
}
