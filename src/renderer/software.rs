//! ---------------------------------------------------------------------------
//! Software (CPU) primitive rasteriser
//!
//! * Fills an internal `Vec<u32>` frame-buffer in **0x00RRGGBB** format.
//! * Every primitive clips against the buffer, so callers may pass any
//!   coordinates (walls taller than the screen, a minimap hanging off the
//!   edge, …).
//! ---------------------------------------------------------------------------

mod font;

use crate::renderer::{GLYPH_ADVANCE, GLYPH_H, GLYPH_W, Renderer, Rgba};

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

#[derive(Default)]
pub struct Software {
    scratch: Vec<Rgba>,
    width: usize,
    height: usize,
}

impl Software {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at `(x, y)`, `None` outside the frame.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        (x < self.width && y < self.height).then(|| self.scratch[y * self.width + x])
    }

    #[inline]
    fn put(&mut self, x: i32, y: i32, color: Rgba) {
        if (0..self.width as i32).contains(&x) && (0..self.height as i32).contains(&y) {
            self.scratch[y as usize * self.width + x as usize] = color;
        }
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, 0);
        }
        self.scratch.fill(0);
    }

    fn clear(&mut self, color: Rgba) {
        self.scratch.fill(color);
    }

    fn vline(&mut self, x: i32, y0: i32, y1: i32, color: Rgba) {
        if !(0..self.width as i32).contains(&x) {
            return;
        }
        let top = y0.max(0);
        let bot = y1.min(self.height as i32);
        if top >= bot {
            return;
        }
        let mut idx = top as usize * self.width + x as usize;
        for _ in top..bot {
            self.scratch[idx] = color;
            idx += self.width;
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba) {
        let x0 = x.max(0);
        let x1 = (x + w).min(self.width as i32);
        let y0 = y.max(0);
        let y1 = (y + h).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        for row in y0..y1 {
            let base = row as usize * self.width;
            self.scratch[base + x0 as usize..base + x1 as usize].fill(color);
        }
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Rgba) {
        if radius < 0 {
            return;
        }
        let r2 = radius * radius;
        for dy in -radius..=radius {
            // half-width of the disc on this scan-line
            let half = ((r2 - dy * dy) as f32).sqrt() as i32;
            let y = cy + dy;
            if !(0..self.height as i32).contains(&y) {
                continue;
            }
            let x0 = (cx - half).max(0);
            let x1 = (cx + half + 1).min(self.width as i32);
            if x0 < x1 {
                let base = y as usize * self.width;
                self.scratch[base + x0 as usize..base + x1 as usize].fill(color);
            }
        }
    }

    /// Integer Bresenham; thick lines stamp a square brush at every step.
    fn line(&mut self, (mut x0, mut y0): (i32, i32), (x1, y1): (i32, i32), width: i32, color: Rgba) {
        let brush = width.max(1);
        let lo = -(brush - 1) / 2;
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            if brush == 1 {
                self.put(x0, y0, color);
            } else {
                self.fill_rect(x0 + lo, y0 + lo, brush, brush, color);
            }
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn text(&mut self, x: i32, y: i32, text: &str, scale: i32, color: Rgba) {
        let s = scale.max(1);
        for (i, ch) in text.chars().enumerate() {
            let gx = x + i as i32 * GLYPH_ADVANCE * s;
            if gx >= self.width as i32 {
                break;
            }
            let bits = font::glyph(ch);
            for (row, &mask) in bits.iter().enumerate().take(GLYPH_H as usize) {
                for col in 0..GLYPH_W {
                    if mask & (1 << (GLYPH_W - 1 - col)) != 0 {
                        self.fill_rect(gx + col * s, y + row as i32 * s, s, s, color);
                    }
                }
            }
        }
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
