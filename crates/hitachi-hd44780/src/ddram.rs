//! Display data RAM.
//!
//! Eighty bytes of character-code storage shared by every panel geometry.
//! All addressing wraps modulo the buffer length, so callers can pass any
//! address and the store behaves like the circular buffer on the chip.

/// Capacity of the display data RAM in character codes.
pub const DDRAM_SIZE: usize = 80;

/// Character code the clear instruction fills the store with. Renders as
/// a blank cell through the CGROM.
pub const BLANK_CODE: u8 = 0x20;

/// Eighty-byte character store with wraparound addressing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ddram {
    cells: [u8; DDRAM_SIZE],
}

impl Ddram {
    /// Power-on contents are all zero. Code 0x00 has no CGROM entry, so an
    /// uninitialised panel still renders blank, just not with 0x20.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: [0x00; DDRAM_SIZE],
        }
    }

    /// Character code at `address`, wrapped into range.
    #[must_use]
    pub fn read(&self, address: usize) -> u8 {
        self.cells[address % DDRAM_SIZE]
    }

    /// Store a character code at `address`, wrapped into range.
    pub fn write(&mut self, address: usize, code: u8) {
        self.cells[address % DDRAM_SIZE] = code;
    }

    /// Fill every cell with [`BLANK_CODE`].
    pub fn fill_blank(&mut self) {
        self.cells = [BLANK_CODE; DDRAM_SIZE];
    }

    /// Copy of the full store, cell 0 first.
    #[must_use]
    pub fn contents(&self) -> [u8; DDRAM_SIZE] {
        self.cells
    }

    /// Replace the full store.
    pub fn load(&mut self, cells: [u8; DDRAM_SIZE]) {
        self.cells = cells;
    }
}

impl Default for Ddram {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn powers_on_zeroed() {
        let ram = Ddram::new();
        assert!(ram.contents().iter().all(|&c| c == 0x00));
    }

    #[test]
    fn addresses_wrap_modulo_eighty() {
        let mut ram = Ddram::new();
        ram.write(80, b'A');
        assert_eq!(ram.read(0), b'A');
        ram.write(79, b'B');
        assert_eq!(ram.read(159), b'B');
    }

    #[test]
    fn fill_blank_writes_spaces_everywhere() {
        let mut ram = Ddram::new();
        ram.write(7, b'x');
        ram.fill_blank();
        assert!(ram.contents().iter().all(|&c| c == BLANK_CODE));
    }
}
