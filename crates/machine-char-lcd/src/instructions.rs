//! Instruction byte builders.
//!
//! The controller decodes by most significant set bit; these compose the
//! matching bytes so hosts and test benches do not hand-roll bit masks.

/// Fill DDRAM with blanks. Pointer and row window are left alone.
pub const CLEAR: u8 = 0x01;
/// Pointer to zero, row window back to its power-on origins.
pub const RETURN_HOME: u8 = 0x02;

/// Entry mode: pointer step direction and whether data accesses drag the
/// display window along.
#[must_use]
pub fn entry_mode_set(increment: bool, shift_display: bool) -> u8 {
    0x04 | (u8::from(increment) << 1) | u8::from(shift_display)
}

/// Display on/off, underline cursor, cursor blink.
#[must_use]
pub fn display_control(display: bool, cursor: bool, blink: bool) -> u8 {
    0x08 | (u8::from(display) << 2) | (u8::from(cursor) << 1) | u8::from(blink)
}

/// Move the cursor (pointer) or shift the display window one cell.
#[must_use]
pub fn cursor_shift(display_shift: bool, shift_right: bool) -> u8 {
    0x10 | (u8::from(display_shift) << 3) | (u8::from(shift_right) << 2)
}

/// Interface width, line duty and font flags.
#[must_use]
pub fn function_set(eight_bit_bus: bool, two_line_mode: bool, font_5x10: bool) -> u8 {
    0x20
        | (u8::from(eight_bit_bus) << 4)
        | (u8::from(two_line_mode) << 3)
        | (u8::from(font_5x10) << 2)
}

/// Latch a CGRAM address (six bits).
#[must_use]
pub fn set_cgram_address(address: u8) -> u8 {
    0x40 | (address & 0x3F)
}

/// Jump the DDRAM pointer (seven bits).
#[must_use]
pub fn set_ddram_address(address: u8) -> u8 {
    0x80 | (address & 0x7F)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_compose_the_datasheet_bytes() {
        assert_eq!(entry_mode_set(true, false), 0x06);
        assert_eq!(entry_mode_set(false, true), 0x05);
        assert_eq!(display_control(true, true, false), 0x0E);
        assert_eq!(display_control(true, true, true), 0x0F);
        assert_eq!(cursor_shift(true, false), 0x18);
        assert_eq!(cursor_shift(false, true), 0x14);
        assert_eq!(function_set(true, true, false), 0x38);
        assert_eq!(set_cgram_address(0x15), 0x55);
        assert_eq!(set_ddram_address(0x28), 0xA8);
    }

    #[test]
    fn address_builders_mask_their_operands() {
        assert_eq!(set_ddram_address(0xFF), 0xFF);
        assert_eq!(set_cgram_address(0xFF), 0x7F);
    }
}
