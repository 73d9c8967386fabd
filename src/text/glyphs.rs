//! A fixed 8x12 bitmap font covering what progress labels need.
//!
//! Each glyph is 12 rows of 8 pixels, most significant bit leftmost. Ink sits in
//! rows 2 through 8, so glyphs line up on a common baseline.

pub const GLYPH_WIDTH: usize = 8;
pub const GLYPH_HEIGHT: usize = 12;

pub type Bitmap = [u8; GLYPH_HEIGHT];

const fn glyph(rows: [u8; 7]) -> Bitmap {
    [
        0, 0, rows[0], rows[1], rows[2], rows[3], rows[4], rows[5], rows[6], 0, 0, 0,
    ]
}

const SPACE: Bitmap = [0; GLYPH_HEIGHT];

const DIGITS: [Bitmap; 10] = [
    glyph([0x3C, 0x66, 0x6E, 0x76, 0x66, 0x66, 0x3C]),
    glyph([0x18, 0x38, 0x18, 0x18, 0x18, 0x18, 0x7E]),
    glyph([0x3C, 0x66, 0x06, 0x0C, 0x30, 0x60, 0x7E]),
    glyph([0x3C, 0x66, 0x06, 0x1C, 0x06, 0x66, 0x3C]),
    glyph([0x0C, 0x1C, 0x3C, 0x6C, 0x7E, 0x0C, 0x0C]),
    glyph([0x7E, 0x60, 0x7C, 0x06, 0x06, 0x66, 0x3C]),
    glyph([0x1C, 0x30, 0x60, 0x7C, 0x66, 0x66, 0x3C]),
    glyph([0x7E, 0x06, 0x0C, 0x18, 0x30, 0x30, 0x30]),
    glyph([0x3C, 0x66, 0x66, 0x3C, 0x66, 0x66, 0x3C]),
    glyph([0x3C, 0x66, 0x66, 0x3E, 0x06, 0x0C, 0x38]),
];

const SLASH: Bitmap = glyph([0x02, 0x06, 0x0C, 0x18, 0x30, 0x60, 0x40]);
const MINUS: Bitmap = glyph([0x00, 0x00, 0x00, 0x7E, 0x00, 0x00, 0x00]);
const PLUS: Bitmap = glyph([0x00, 0x18, 0x18, 0x7E, 0x18, 0x18, 0x00]);
const PERIOD: Bitmap = glyph([0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18]);
const PERCENT: Bitmap = glyph([0x62, 0x66, 0x0C, 0x18, 0x30, 0x66, 0x46]);

/// Drawn for characters the font has no glyph for.
const MISSING: Bitmap = [
    0x00, 0x00, 0x7E, 0x42, 0x42, 0x42, 0x42, 0x42, 0x7E, 0x00, 0x00, 0x00,
];

pub const fn lookup(c: char) -> Bitmap {
    match c {
        ' ' => SPACE,
        '0'..='9' => DIGITS[c as usize - '0' as usize],
        '/' => SLASH,
        '-' => MINUS,
        '+' => PLUS,
        '.' => PERIOD,
        '%' => PERCENT,
        _ => MISSING,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_is_blank() {
        assert_eq!(lookup(' '), [0; GLYPH_HEIGHT]);
    }

    #[test]
    fn test_unknown_falls_back_to_box() {
        assert_eq!(lookup('x'), MISSING);
        assert_eq!(lookup('é'), MISSING);
    }

    #[test]
    fn test_digits_are_distinct() {
        for a in '0'..='9' {
            for b in '0'..='9' {
                if a != b {
                    assert_ne!(lookup(a), lookup(b), "{a} and {b} share a bitmap");
                }
            }
        }
    }

    #[test]
    fn test_glyphs_leave_padding_rows() {
        for c in "0123456789/-+.%?".chars() {
            let bitmap = lookup(c);

            assert_eq!(bitmap[0], 0);
            assert_eq!(bitmap[GLYPH_HEIGHT - 1], 0);
        }
    }
}
