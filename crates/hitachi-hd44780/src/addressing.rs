//! Address counter and row window.
//!
//! The address counter holds the current DDRAM pointer and the entry mode
//! that steps it after every data access. Alongside it sits the row window
//! table: one DDRAM origin per panel row, giving each row a wrapped view of
//! the shared eighty-byte store. Display shifts move the window origins,
//! never the data, so scrolling is free.
//!
//! The cursor has no storage of its own. Its row and column fall out of the
//! pointer and the window table on demand.

use crate::ddram::DDRAM_SIZE;

/// Power-on DDRAM origin of each panel row: rows 0..3 start at addresses
/// 0, 40, 20 and 64. Rows interleave rather than stack, which is why the
/// table is not monotonic.
pub const ROW_OFFSETS: [usize; 4] = [0x00, 0x28, 0x14, 0x40];

/// Pointer stepping applied after each DDRAM data access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryMode {
    /// Step direction: `true` moves the pointer forward.
    pub increment: bool,
    /// When set, every data access drags all four row origins along with
    /// the pointer.
    pub shift_display: bool,
}

impl Default for EntryMode {
    /// Increment without display shift, as after reset.
    fn default() -> Self {
        Self {
            increment: true,
            shift_display: false,
        }
    }
}

/// DDRAM pointer, row window table and entry mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressCounter {
    pointer: usize,
    row_offsets: [usize; 4],
    entry_mode: EntryMode,
}

impl AddressCounter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pointer: 0,
            row_offsets: ROW_OFFSETS,
            entry_mode: EntryMode::default(),
        }
    }

    /// Current DDRAM pointer.
    #[must_use]
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Jump the pointer to `address`, wrapped into DDRAM range.
    pub fn set_pointer(&mut self, address: usize) {
        self.pointer = address % DDRAM_SIZE;
    }

    /// DDRAM origin of a panel row.
    #[must_use]
    pub fn row_offset(&self, row: usize) -> usize {
        self.row_offsets[row]
    }

    /// All four row origins, row 0 first.
    #[must_use]
    pub fn row_offsets(&self) -> [usize; 4] {
        self.row_offsets
    }

    /// Replace all four row origins, each wrapped into DDRAM range.
    pub fn set_row_offsets(&mut self, offsets: [usize; 4]) {
        self.row_offsets = offsets.map(|origin| origin % DDRAM_SIZE);
    }

    #[must_use]
    pub fn entry_mode(&self) -> EntryMode {
        self.entry_mode
    }

    pub fn set_entry_mode(&mut self, mode: EntryMode) {
        self.entry_mode = mode;
    }

    /// Step the pointer (and, with the shift flag, the whole window) one
    /// cell in the entry-mode direction. Called after every data access.
    pub fn advance(&mut self) {
        let step = if self.entry_mode.increment { 1 } else { -1 };
        self.pointer = step_wrapped(self.pointer, step);
        if self.entry_mode.shift_display {
            self.shift_window(step);
        }
    }

    /// Cursor/display shift instruction. With `display_shift` set the row
    /// window moves and the pointer stays put; otherwise the pointer moves
    /// and the window stays put. A visual right shift lowers each row
    /// origin by one, a visual left shift raises it.
    pub fn shift(&mut self, display_shift: bool, shift_right: bool) {
        if display_shift {
            self.shift_window(if shift_right { -1 } else { 1 });
        } else {
            self.pointer = step_wrapped(self.pointer, if shift_right { 1 } else { -1 });
        }
    }

    /// Return-home instruction: pointer to zero, window back to the
    /// power-on origins. DDRAM contents are untouched.
    pub fn home(&mut self) {
        self.pointer = 0;
        self.row_offsets = ROW_OFFSETS;
    }

    /// Derive the cursor cell for a panel with `line_count` rows.
    ///
    /// Scans the row origins of the rows that exist on the panel and takes
    /// the last one at or below the pointer; the column is the pointer's
    /// distance from that origin. When no origin qualifies (or on a
    /// single-line panel whose window has shifted past the pointer) the
    /// cursor lands on row 0 with a negative column, which no visible cell
    /// matches.
    #[must_use]
    pub fn cursor_position(&self, line_count: usize) -> (usize, isize) {
        let pointer = self.pointer as isize;
        let rows = line_count.min(self.row_offsets.len());
        let mut cell = (0, pointer - self.row_offsets[0] as isize);
        for (row, &origin) in self.row_offsets[..rows].iter().enumerate() {
            if self.pointer >= origin {
                cell = (row, pointer - origin as isize);
            }
        }
        cell
    }

    fn shift_window(&mut self, step: i32) {
        for origin in &mut self.row_offsets {
            *origin = step_wrapped(*origin, step);
        }
    }
}

impl Default for AddressCounter {
    fn default() -> Self {
        Self::new()
    }
}

fn step_wrapped(address: usize, step: i32) -> usize {
    (address as i32 + step).rem_euclid(DDRAM_SIZE as i32) as usize
}
