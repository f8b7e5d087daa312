//! Dot-matrix rendering of the projected glyph grid.
//!
//! Each segment is a 5x8 block of round dots on a green glass background,
//! with a slightly darker bezel behind every segment. Geometry is fixed at
//! startup from the panel shape and the dot size.

use hitachi_hd44780::Glyph;
use hitachi_hd44780::cgrom::{GLYPH_HEIGHT, GLYPH_WIDTH};

/// Fraction of a dot cell kept clear around the dot on each side.
const DOT_INSET_RATIO: f32 = 0.2;
/// Horizontal gap between segments, in framebuffer pixels.
const SEGMENT_MARGIN: usize = 10;
/// Vertical gap between display lines.
const LINE_MARGIN: usize = 20;
/// Glass border around the whole dot area.
const DISPLAY_BORDER: usize = 20;
/// Bezel overhang around each segment.
const BEZEL: usize = 4;

/// Colors for one backlight state, as RGB triples.
pub struct Palette {
    pub display_bg: [u8; 3],
    pub segment_bg: [u8; 3],
    pub dot_on: [u8; 3],
    pub dot_off: [u8; 3],
}

/// Classic yellow-green STN glass with the LED backlight on.
pub const BACKLIT: Palette = Palette {
    display_bg: [30, 120, 30],
    segment_bg: [30, 100, 30],
    dot_on: [0, 0, 0],
    dot_off: [30, 85, 30],
};

/// Backlight off: the glass goes murky and the dots lose contrast.
pub const UNLIT: Palette = Palette {
    display_bg: [42, 62, 42],
    segment_bg: [38, 54, 38],
    dot_on: [18, 26, 18],
    dot_off: [40, 58, 40],
};

/// Framebuffer layout for one panel shape at one dot size.
#[derive(Debug, Clone, Copy)]
pub struct Geometry {
    lines: usize,
    segments: usize,
    dot_size: usize,
    dot_inset: usize,
}

impl Geometry {
    #[must_use]
    pub fn new(lines: usize, segments: usize, dot_size: usize) -> Self {
        let dot_inset = (dot_size as f32 * DOT_INSET_RATIO) as usize;
        Self {
            lines,
            segments,
            dot_size,
            dot_inset,
        }
    }

    #[must_use]
    pub fn segment_width(&self) -> usize {
        GLYPH_WIDTH * self.dot_size
    }

    #[must_use]
    pub fn segment_height(&self) -> usize {
        GLYPH_HEIGHT * self.dot_size
    }

    /// Framebuffer width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.segments * self.segment_width()
            + (self.segments - 1) * SEGMENT_MARGIN
            + 2 * DISPLAY_BORDER
    }

    /// Framebuffer height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.lines * self.segment_height() + (self.lines - 1) * LINE_MARGIN + 2 * DISPLAY_BORDER
    }

    /// Top-left corner of a segment's dot area.
    fn segment_origin(&self, line: usize, index: usize) -> (usize, usize) {
        let x = DISPLAY_BORDER + index * (self.segment_width() + SEGMENT_MARGIN);
        let y = DISPLAY_BORDER + line * (self.segment_height() + LINE_MARGIN);
        (x, y)
    }
}

/// Paints the projected grid into an RGBA framebuffer of
/// `geometry.width() * geometry.height() * 4` bytes.
pub fn render(grid: &[Vec<Glyph>], geometry: &Geometry, palette: &Palette, frame: &mut [u8]) {
    let width = geometry.width();
    debug_assert_eq!(frame.len(), width * geometry.height() * 4);

    fill_rect(
        frame,
        width,
        0,
        0,
        width,
        geometry.height(),
        palette.display_bg,
    );

    for (line, row) in grid.iter().enumerate().take(geometry.lines) {
        for (index, glyph) in row.iter().enumerate().take(geometry.segments) {
            draw_segment(frame, geometry, palette, line, index, glyph);
        }
    }
}

fn draw_segment(
    frame: &mut [u8],
    geometry: &Geometry,
    palette: &Palette,
    line: usize,
    index: usize,
    glyph: &Glyph,
) {
    let width = geometry.width();
    let (x0, y0) = geometry.segment_origin(line, index);

    // Bezel overhangs the dot area on all four sides. DISPLAY_BORDER and
    // SEGMENT_MARGIN both exceed BEZEL, so this never leaves the frame.
    fill_rect(
        frame,
        width,
        x0 - BEZEL,
        y0 - BEZEL,
        geometry.segment_width() + 2 * BEZEL,
        geometry.segment_height() + 2 * BEZEL,
        palette.segment_bg,
    );

    for (dot_row, &bits) in glyph.iter().enumerate() {
        for dot_col in 0..GLYPH_WIDTH {
            let on = (bits >> (GLYPH_WIDTH - 1 - dot_col)) & 1 == 1;
            let color = if on { palette.dot_on } else { palette.dot_off };
            fill_dot(
                frame,
                width,
                x0 + dot_col * geometry.dot_size,
                y0 + dot_row * geometry.dot_size,
                geometry.dot_size,
                geometry.dot_inset,
                color,
            );
        }
    }
}

/// Paints a filled circle centered in the dot cell, its radius pulled in
/// by the inset so neighboring dots stay separated.
fn fill_dot(
    frame: &mut [u8],
    fb_width: usize,
    x: usize,
    y: usize,
    size: usize,
    inset: usize,
    rgb: [u8; 3],
) {
    let center = size as f32 / 2.0;
    let radius = (size - 2 * inset) as f32 / 2.0;
    for row in 0..size {
        for col in 0..size {
            let dx = col as f32 + 0.5 - center;
            let dy = row as f32 + 0.5 - center;
            if dx * dx + dy * dy <= radius * radius {
                let o = ((y + row) * fb_width + x + col) * 4;
                frame[o] = rgb[0];
                frame[o + 1] = rgb[1];
                frame[o + 2] = rgb[2];
                frame[o + 3] = 0xFF;
            }
        }
    }
}

fn fill_rect(
    frame: &mut [u8],
    fb_width: usize,
    x: usize,
    y: usize,
    w: usize,
    h: usize,
    rgb: [u8; 3],
) {
    for row in y..y + h {
        for col in x..x + w {
            let o = (row * fb_width + col) * 4;
            frame[o] = rgb[0];
            frame[o + 1] = rgb[1];
            frame[o + 2] = rgb[2];
            frame[o + 3] = 0xFF;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hitachi_hd44780::cgrom;

    fn pixel(frame: &[u8], width: usize, x: usize, y: usize) -> [u8; 3] {
        let o = (y * width + x) * 4;
        [frame[o], frame[o + 1], frame[o + 2]]
    }

    // === geometry ===

    #[test]
    fn sixteen_by_two_framebuffer_size() {
        let geometry = Geometry::new(2, 16, 5);
        // 16 segments of 25px plus 15 margins of 10px plus 2 * 20px border.
        assert_eq!(geometry.width(), 16 * 25 + 15 * 10 + 40);
        // 2 lines of 40px plus one 20px line margin plus 2 * 20px border.
        assert_eq!(geometry.height(), 2 * 40 + 20 + 40);
    }

    #[test]
    fn single_line_has_no_line_margin() {
        let geometry = Geometry::new(1, 8, 5);
        assert_eq!(geometry.height(), 40 + 40);
    }

    #[test]
    fn dot_inset_is_a_fifth_of_the_dot() {
        assert_eq!(Geometry::new(1, 8, 5).dot_inset, 1);
        assert_eq!(Geometry::new(1, 8, 20).dot_inset, 4);
    }

    // === painting ===

    #[test]
    fn background_and_bezel_colors_land_where_expected() {
        let geometry = Geometry::new(1, 1, 5);
        let mut frame = vec![0u8; geometry.width() * geometry.height() * 4];
        render(&[vec![cgrom::BLANK]], &geometry, &BACKLIT, &mut frame);

        // Top-left corner is bare glass; the bezel starts 4px before the dots.
        assert_eq!(pixel(&frame, geometry.width(), 0, 0), BACKLIT.display_bg);
        assert_eq!(pixel(&frame, geometry.width(), 17, 17), BACKLIT.segment_bg);
    }

    #[test]
    fn full_block_lights_every_dot_center() {
        let geometry = Geometry::new(1, 1, 5);
        let mut frame = vec![0u8; geometry.width() * geometry.height() * 4];
        render(&[vec![cgrom::FULL_BLOCK]], &geometry, &BACKLIT, &mut frame);

        // Dot (0, 0) fills the cell at 20..25; its center pixel is (22, 22).
        assert_eq!(pixel(&frame, geometry.width(), 22, 22), BACKLIT.dot_on);
        // Center of dot (4, 7).
        assert_eq!(
            pixel(&frame, geometry.width(), 20 + 4 * 5 + 2, 20 + 7 * 5 + 2),
            BACKLIT.dot_on
        );
    }

    #[test]
    fn dots_are_round_so_cell_corners_keep_the_bezel_color() {
        let geometry = Geometry::new(1, 1, 5);
        let mut frame = vec![0u8; geometry.width() * geometry.height() * 4];
        render(&[vec![cgrom::FULL_BLOCK]], &geometry, &BACKLIT, &mut frame);

        assert_eq!(pixel(&frame, geometry.width(), 20, 20), BACKLIT.segment_bg);
    }

    #[test]
    fn blank_glyph_paints_only_off_dots() {
        let geometry = Geometry::new(1, 1, 5);
        let mut frame = vec![0u8; geometry.width() * geometry.height() * 4];
        render(&[vec![cgrom::BLANK]], &geometry, &BACKLIT, &mut frame);

        assert_eq!(pixel(&frame, geometry.width(), 22, 22), BACKLIT.dot_off);
    }

    #[test]
    fn glyph_bit_four_is_the_leftmost_dot() {
        let geometry = Geometry::new(1, 1, 5);
        let mut frame = vec![0u8; geometry.width() * geometry.height() * 4];
        let mut glyph = cgrom::BLANK;
        glyph[0] = 0x10;
        render(&[vec![glyph]], &geometry, &BACKLIT, &mut frame);

        assert_eq!(pixel(&frame, geometry.width(), 22, 22), BACKLIT.dot_on);
        assert_eq!(pixel(&frame, geometry.width(), 27, 22), BACKLIT.dot_off);
    }

    #[test]
    fn unlit_palette_differs_from_backlit() {
        assert_ne!(BACKLIT.display_bg, UNLIT.display_bg);
        assert_ne!(BACKLIT.dot_on, UNLIT.dot_on);
    }
}
