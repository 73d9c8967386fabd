use crate::{
    image::{Image, Rgba},
    text::glyphs::{self, GLYPH_HEIGHT, GLYPH_WIDTH},
};

/// Horizontal distance between the left edges of consecutive characters.
pub const ADVANCE: i64 = 9;

pub const LINE_HEIGHT: i64 = GLYPH_HEIGHT as i64;

pub const BLACK: Rgba = [0, 0, 0, 255];

#[derive(Debug, Copy, Clone)]
pub struct TextRenderer {
    color: Rgba,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self { color: BLACK }
    }
}

impl TextRenderer {
    pub const fn with_color(color: Rgba) -> Self {
        Self { color }
    }

    /// Draws `text` with the top-left corner of its first glyph cell at `(x, y)`.
    /// Ink falling outside `canvas` is clipped.
    pub fn draw(&self, canvas: &mut Image, x: i64, y: i64, text: &str) {
        let mut pen_x = x;

        for c in text.chars() {
            let bitmap = glyphs::lookup(c);

            for (row, bits) in bitmap.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (0x80 >> col) != 0 {
                        canvas.blend_pixel(pen_x + col as i64, y + row as i64, self.color);
                    }
                }
            }

            pen_x += ADVANCE;
        }
    }
}
