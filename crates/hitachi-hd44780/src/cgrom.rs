//! Character generator ROM.
//!
//! Glyph bitmaps for the printable ASCII range 0x20..=0x7F, as masked into
//! the HD44780A00 ROM. Each glyph is eight rows of five dots; row 0 is the
//! top of the cell and bit 4 of each row is the leftmost column. Character
//! codes with no ROM entry render as a blank cell.

/// One character cell bitmap: eight rows, low five bits of each row used.
pub type Glyph = [u8; 8];

/// Dot columns per character cell.
pub const GLYPH_WIDTH: usize = 5;
/// Dot rows per character cell.
pub const GLYPH_HEIGHT: usize = 8;

/// All-dots-off cell.
pub const BLANK: Glyph = [0x00; 8];
/// All-dots-on cell, shown in place of the glyph by the blinking cursor.
pub const FULL_BLOCK: Glyph = [0x1F; 8];

/// First character code with a ROM entry.
const FIRST_CODE: u8 = 0x20;

/// ROM entry for a character code, if the code has one.
#[must_use]
pub fn lookup(code: u8) -> Option<&'static Glyph> {
    if (FIRST_CODE..=0x7F).contains(&code) {
        Some(&GLYPHS[usize::from(code - FIRST_CODE)])
    } else {
        None
    }
}

/// Look up the glyph for a character code. Codes outside the ROM range
/// come back as [`BLANK`].
#[must_use]
pub fn glyph(code: u8) -> Glyph {
    lookup(code).copied().unwrap_or(BLANK)
}

static GLYPHS: [Glyph; 96] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x04, 0x04, 0x04, 0x04, 0x00, 0x04, 0x00, 0x00], // '!'
    [0x0A, 0x0A, 0x0A, 0x00, 0x00, 0x00, 0x00, 0x00], // '"'
    [0x0A, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A, 0x00], // '#'
    [0x04, 0x0F, 0x14, 0x0E, 0x05, 0x1E, 0x04, 0x00], // '$'
    [0x18, 0x19, 0x02, 0x04, 0x08, 0x13, 0x03, 0x00], // '%'
    [0x0C, 0x12, 0x0C, 0x16, 0x19, 0x16, 0x0D, 0x00], // '&'
    [0x06, 0x06, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00], // '\''
    [0x01, 0x02, 0x04, 0x04, 0x04, 0x02, 0x01, 0x00], // '('
    [0x04, 0x02, 0x01, 0x01, 0x01, 0x02, 0x04, 0x00], // ')'
    [0x00, 0x04, 0x15, 0x0E, 0x0E, 0x15, 0x04, 0x00], // '*'
    [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00, 0x00], // '+'
    [0x00, 0x00, 0x00, 0x00, 0x04, 0x04, 0x02, 0x00], // ','
    [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00, 0x00], // '-'
    [0x00, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00], // '.'
    [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00, 0x00], // '/'
    [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E, 0x00], // '0'
    [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E, 0x00], // '1'
    [0x0E, 0x11, 0x10, 0x0C, 0x02, 0x11, 0x1F, 0x00], // '2'
    [0x1F, 0x08, 0x04, 0x04, 0x04, 0x11, 0x0E, 0x00], // '3'
    [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02, 0x00], // '4'
    [0x1F, 0x01, 0x0F, 0x10, 0x10, 0x11, 0x0E, 0x00], // '5'
    [0x0C, 0x02, 0x01, 0x0F, 0x11, 0x11, 0x0E, 0x00], // '6'
    [0x1F, 0x11, 0x10, 0x08, 0x04, 0x04, 0x04, 0x00], // '7'
    [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E, 0x00], // '8'
    [0x0E, 0x11, 0x11, 0x1E, 0x10, 0x08, 0x06, 0x00], // '9'
    [0x00, 0x04, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00], // ':'
    [0x00, 0x04, 0x00, 0x00, 0x00, 0x04, 0x04, 0x00], // ';'
    [0x02, 0x04, 0x08, 0x10, 0x08, 0x04, 0x02, 0x00], // '<'
    [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00, 0x00], // '='
    [0x08, 0x04, 0x02, 0x01, 0x02, 0x04, 0x08, 0x00], // '>'
    [0x0E, 0x11, 0x10, 0x08, 0x04, 0x00, 0x04, 0x00], // '?'
    [0x0E, 0x11, 0x15, 0x15, 0x1D, 0x01, 0x0E, 0x00], // '@'
    [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11, 0x00], // 'A'
    [0x0F, 0x11, 0x11, 0x0F, 0x11, 0x11, 0x0F, 0x00], // 'B'
    [0x0E, 0x11, 0x01, 0x01, 0x01, 0x11, 0x0E, 0x00], // 'C'
    [0x07, 0x09, 0x11, 0x11, 0x11, 0x09, 0x07, 0x00], // 'D'
    [0x1F, 0x10, 0x10, 0x1C, 0x10, 0x10, 0x1F, 0x00], // 'E'
    [0x1F, 0x10, 0x10, 0x1C, 0x10, 0x10, 0x10, 0x00], // 'F'
    [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F, 0x00], // 'G'
    [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11, 0x00], // 'H'
    [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E, 0x00], // 'I'
    [0x07, 0x02, 0x02, 0x02, 0x12, 0x12, 0x0C, 0x00], // 'J'
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11, 0x00], // 'K'
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F, 0x00], // 'L'
    [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11, 0x00], // 'M'
    [0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x11, 0x00], // 'N'
    [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E, 0x00], // 'O'
    [0x0F, 0x11, 0x11, 0x0F, 0x10, 0x10, 0x10, 0x00], // 'P'
    [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D, 0x00], // 'Q'
    [0x0F, 0x11, 0x11, 0x0F, 0x12, 0x11, 0x11, 0x00], // 'R'
    [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x11, 0x0E, 0x00], // 'S'
    [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04, 0x00], // 'T'
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E, 0x00], // 'U'
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04, 0x00], // 'V'
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A, 0x00], // 'W'
    [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11, 0x00], // 'X'
    [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04, 0x00], // 'Y'
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F, 0x00], // 'Z'
    [0x0E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x0E, 0x00], // '['
    [0x00, 0x10, 0x08, 0x04, 0x02, 0x01, 0x00, 0x00], // '\'
    [0x0E, 0x02, 0x02, 0x02, 0x02, 0x02, 0x0E, 0x00], // ']'
    [0x04, 0x0A, 0x11, 0x00, 0x00, 0x00, 0x00, 0x00], // '^'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F], // '_'
    [0x08, 0x04, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00], // '`'
    [0x00, 0x00, 0x0E, 0x01, 0x0F, 0x11, 0x0F, 0x00], // 'a'
    [0x10, 0x10, 0x1E, 0x11, 0x11, 0x11, 0x1E, 0x00], // 'b'
    [0x00, 0x00, 0x0E, 0x11, 0x10, 0x11, 0x0E, 0x00], // 'c'
    [0x01, 0x01, 0x0F, 0x11, 0x11, 0x11, 0x0F, 0x00], // 'd'
    [0x00, 0x00, 0x0E, 0x11, 0x1F, 0x10, 0x0E, 0x00], // 'e'
    [0x06, 0x09, 0x08, 0x1C, 0x08, 0x08, 0x08, 0x00], // 'f'
    [0x00, 0x0F, 0x11, 0x11, 0x0F, 0x01, 0x0E, 0x00], // 'g'
    [0x10, 0x10, 0x1E, 0x11, 0x11, 0x11, 0x11, 0x00], // 'h'
    [0x04, 0x00, 0x0C, 0x04, 0x04, 0x04, 0x0E, 0x00], // 'i'
    [0x02, 0x00, 0x06, 0x02, 0x02, 0x12, 0x12, 0x0C], // 'j'
    [0x10, 0x10, 0x11, 0x12, 0x1C, 0x12, 0x11, 0x00], // 'k'
    [0x0C, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E, 0x00], // 'l'
    [0x00, 0x00, 0x1A, 0x15, 0x15, 0x15, 0x15, 0x00], // 'm'
    [0x00, 0x00, 0x1E, 0x11, 0x11, 0x11, 0x11, 0x00], // 'n'
    [0x00, 0x00, 0x0E, 0x11, 0x11, 0x11, 0x0E, 0x00], // 'o'
    [0x00, 0x00, 0x0F, 0x11, 0x11, 0x0F, 0x10, 0x10], // 'p'
    [0x00, 0x00, 0x0F, 0x11, 0x11, 0x0F, 0x01, 0x01], // 'q'
    [0x00, 0x00, 0x0B, 0x0C, 0x08, 0x08, 0x08, 0x00], // 'r'
    [0x00, 0x00, 0x0F, 0x10, 0x0E, 0x01, 0x1E, 0x00], // 's'
    [0x04, 0x04, 0x0E, 0x04, 0x04, 0x04, 0x03, 0x00], // 't'
    [0x00, 0x00, 0x11, 0x11, 0x11, 0x11, 0x0F, 0x00], // 'u'
    [0x00, 0x00, 0x11, 0x11, 0x11, 0x0A, 0x04, 0x00], // 'v'
    [0x00, 0x00, 0x11, 0x11, 0x15, 0x15, 0x0A, 0x00], // 'w'
    [0x00, 0x00, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x00], // 'x'
    [0x00, 0x00, 0x11, 0x11, 0x0F, 0x01, 0x0E, 0x00], // 'y'
    [0x00, 0x00, 0x1F, 0x02, 0x04, 0x08, 0x1F, 0x00], // 'z'
    [0x02, 0x04, 0x04, 0x08, 0x04, 0x04, 0x02, 0x00], // '{'
    [0x04, 0x04, 0x04, 0x00, 0x04, 0x04, 0x04, 0x00], // '|'
    [0x08, 0x04, 0x04, 0x02, 0x04, 0x04, 0x08, 0x00], // '}'
    [0x00, 0x00, 0x0A, 0x15, 0x00, 0x00, 0x00, 0x00], // '~'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // DEL/blank
];
