//! Hitachi HD44780 character LCD controller.
//!
//! Models the controller as seen from its bus pins: an eighty-byte display
//! data RAM, an address counter with a movable row window, a priority
//! encoded instruction decoder and a projector that turns controller state
//! into a grid of glyph bitmaps for the panel.
//!
//! # Instruction set
//!
//! The most significant set bit of an instruction byte selects the
//! operation and the bits below it carry the operands. From bit 7 down:
//! set DDRAM address, set CGRAM address, function set, cursor/display
//! shift, display control, entry mode, return home, clear. The all-zero
//! byte selects no operation and decodes as an error.
//!
//! # Omissions
//!
//! The busy flag always reads back zero, CGRAM glyphs are not stored (the
//! address register is latched so instruction streams keep working) and
//! the four-bit bus protocol is not modelled: every transfer is a full
//! byte.

pub mod addressing;
pub mod cgrom;
pub mod ddram;

use std::fmt;

pub use addressing::{AddressCounter, EntryMode};
pub use cgrom::Glyph;
pub use ddram::{DDRAM_SIZE, Ddram};

/// Most character rows a panel can have, fixed by the row window table.
pub const MAX_LINES: usize = addressing::ROW_OFFSETS.len();

/// Level of the RS pin: low selects the instruction register, high the
/// data register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterSelect {
    Instruction,
    Data,
}

impl RegisterSelect {
    #[must_use]
    pub fn from_level(level: bool) -> Self {
        if level { Self::Data } else { Self::Instruction }
    }
}

/// Level of the R/W pin: low writes, high reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadWrite {
    Write,
    Read,
}

impl ReadWrite {
    #[must_use]
    pub fn from_level(level: bool) -> Self {
        if level { Self::Read } else { Self::Write }
    }
}

/// Fault raised by [`Hd44780::execute`]. The controller state is left
/// untouched when one of these comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecuteError {
    /// All-zero instruction byte: no operation bit set.
    IllegalInstruction,
}

impl fmt::Display for ExecuteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalInstruction => write!(f, "illegal instruction (no operation bit set)"),
        }
    }
}

impl std::error::Error for ExecuteError {}

/// Invalid panel geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Line count outside 1..=4.
    InvalidLines(usize),
    /// Segment count outside 1..=80.
    InvalidSegments(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLines(lines) => {
                write!(f, "invalid line count {lines} (panels have 1 to {MAX_LINES} rows)")
            }
            Self::InvalidSegments(segments) => {
                write!(
                    f,
                    "invalid segment count {segments} (panels have 1 to {DDRAM_SIZE} columns)"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Panel geometry: character rows and segments (columns) per row.
///
/// Geometry belongs to the glass, not the controller, so it is
/// configuration rather than state. Every geometry shares the same
/// eighty-byte DDRAM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelConfig {
    lines: usize,
    segments: usize,
}

impl PanelConfig {
    /// Validate a geometry. Real modules run from 8x1 up to 40x2 and 20x4;
    /// anything within 1..=4 rows and 1..=80 columns is accepted.
    pub fn new(lines: usize, segments: usize) -> Result<Self, ConfigError> {
        if lines == 0 || lines > MAX_LINES {
            return Err(ConfigError::InvalidLines(lines));
        }
        if segments == 0 || segments > DDRAM_SIZE {
            return Err(ConfigError::InvalidSegments(segments));
        }
        Ok(Self { lines, segments })
    }

    #[must_use]
    pub fn lines(&self) -> usize {
        self.lines
    }

    #[must_use]
    pub fn segments(&self) -> usize {
        self.segments
    }
}

impl Default for PanelConfig {
    /// Eight segments on a single line, the smallest common module.
    fn default() -> Self {
        Self {
            lines: 1,
            segments: 8,
        }
    }
}

/// Display on/off control flags, all latched by a single instruction.
///
/// The instruction seeds `cursor_visible` from the cursor bit; afterwards
/// the blink clock owns it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayControl {
    /// Panel output enabled. Off projects an all-blank grid over live DDRAM.
    pub display_on: bool,
    /// Underline cursor drawn at the cursor cell.
    pub cursor_active: bool,
    /// Cursor drawn this blink phase.
    pub cursor_visible: bool,
    /// Blink enabled: the blink clock toggles `cursor_visible` and the
    /// on phase shows a full block instead of the underlying glyph.
    pub cursor_blinking: bool,
}

/// Interface flags latched by the function-set instruction. Latched only:
/// panel geometry comes from [`PanelConfig`] and transfers are always full
/// bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FunctionSet {
    pub eight_bit_bus: bool,
    pub two_line_mode: bool,
    pub font_5x10: bool,
}

/// Complete mutable state of the controller, as captured for save states.
/// Geometry is configuration and is not part of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerState {
    pub ddram: [u8; DDRAM_SIZE],
    pub pointer: usize,
    pub row_offsets: [usize; 4],
    pub entry_mode: EntryMode,
    pub display: DisplayControl,
    pub function: FunctionSet,
    pub cgram_address: u8,
}

/// The controller proper.
#[derive(Debug, Clone)]
pub struct Hd44780 {
    config: PanelConfig,
    ddram: Ddram,
    counter: AddressCounter,
    display: DisplayControl,
    function: FunctionSet,
    cgram_address: u8,
}

impl Hd44780 {
    /// Power-on state: zeroed DDRAM, pointer at zero, window at the row
    /// origins, increment entry mode, display off.
    #[must_use]
    pub fn new(config: PanelConfig) -> Self {
        Self {
            config,
            ddram: Ddram::new(),
            counter: AddressCounter::new(),
            display: DisplayControl::default(),
            function: FunctionSet::default(),
            cgram_address: 0,
        }
    }

    /// Drive one bus transaction through the controller.
    ///
    /// Reads return `Ok(Some(byte))`: a data-register read yields the cell
    /// under the pointer and advances it, an instruction-register read is
    /// the busy flag and always yields zero. Writes return `Ok(None)`.
    /// The all-zero instruction byte is rejected and leaves all state
    /// untouched.
    pub fn execute(
        &mut self,
        rs: RegisterSelect,
        rw: ReadWrite,
        data: u8,
    ) -> Result<Option<u8>, ExecuteError> {
        match (rs, rw) {
            (RegisterSelect::Data, ReadWrite::Write) => {
                self.write_data(data);
                Ok(None)
            }
            (RegisterSelect::Data, ReadWrite::Read) => Ok(Some(self.read_data())),
            (RegisterSelect::Instruction, ReadWrite::Write) => {
                self.instruction(data)?;
                Ok(None)
            }
            // Busy flag and address counter readback: never busy.
            (RegisterSelect::Instruction, ReadWrite::Read) => Ok(Some(0x00)),
        }
    }

    /// Write a character code at the pointer, then take the entry-mode
    /// step.
    pub fn write_data(&mut self, code: u8) {
        self.ddram.write(self.counter.pointer(), code);
        self.counter.advance();
    }

    /// Read the character code at the pointer, then take the entry-mode
    /// step.
    pub fn read_data(&mut self) -> u8 {
        let code = self.ddram.read(self.counter.pointer());
        self.counter.advance();
        code
    }

    /// Fill all of DDRAM with the blank code. Pointer and row window stay
    /// where they are; only [`Hd44780::return_home`] restores those.
    pub fn clear(&mut self) {
        self.ddram.fill_blank();
    }

    /// Pointer to zero and the row window back to the power-on origins.
    pub fn return_home(&mut self) {
        self.counter.home();
    }

    /// Latch the entry mode: step direction, and whether the window is
    /// dragged along on every data access.
    pub fn entry_mode_set(&mut self, increment: bool, shift_display: bool) {
        self.counter.set_entry_mode(EntryMode {
            increment,
            shift_display,
        });
    }

    /// Latch the display control flags. The cursor bit seeds both the
    /// underline cursor and the current blink visibility.
    pub fn display_control(&mut self, display: bool, cursor: bool, blink: bool) {
        self.display = DisplayControl {
            display_on: display,
            cursor_active: cursor,
            cursor_visible: cursor,
            cursor_blinking: blink,
        };
    }

    /// Shift the row window (display shift) or step the pointer (cursor
    /// shift) one cell.
    pub fn cursor_control(&mut self, display_shift: bool, shift_right: bool) {
        self.counter.shift(display_shift, shift_right);
    }

    /// Latch the interface flags. Recorded verbatim; nothing branches on
    /// them.
    pub fn function_set(&mut self, eight_bit_bus: bool, two_line_mode: bool, font_5x10: bool) {
        self.function = FunctionSet {
            eight_bit_bus,
            two_line_mode,
            font_5x10,
        };
    }

    /// Latch a CGRAM address. Glyph storage is not modelled, so the
    /// address is recorded and nothing else happens.
    pub fn set_cgram_addr(&mut self, address: u8) {
        self.cgram_address = address & 0x3F;
    }

    /// Point the address counter at a DDRAM cell. The address is masked to
    /// seven bits, then wrapped into DDRAM range.
    pub fn set_ddram_addr(&mut self, address: u8) {
        self.counter.set_pointer(usize::from(address & 0x7F));
    }

    fn instruction(&mut self, byte: u8) -> Result<(), ExecuteError> {
        if byte == 0 {
            return Err(ExecuteError::IllegalInstruction);
        }
        let bit = |n: u8| byte & (1 << n) != 0;
        match 7 - byte.leading_zeros() {
            7 => self.set_ddram_addr(byte),
            6 => self.set_cgram_addr(byte),
            5 => self.function_set(bit(4), bit(3), bit(2)),
            4 => self.cursor_control(bit(3), bit(2)),
            3 => self.display_control(bit(2), bit(1), bit(0)),
            2 => self.entry_mode_set(bit(1), bit(0)),
            1 => self.return_home(),
            0 => self.clear(),
            _ => unreachable!(),
        }
        Ok(())
    }

    /// Advance the cursor blink clock by half a period. Only meaningful
    /// while blink is enabled; otherwise visibility stays as the last
    /// display-control instruction latched it.
    pub fn toggle_blink_phase(&mut self) {
        if self.display.cursor_blinking {
            self.display.cursor_visible = !self.display.cursor_visible;
        }
    }

    /// Cursor cell derived from the pointer and the row window. The column
    /// can be negative (or beyond the panel) when the window has moved
    /// away from the pointer; such a cursor is simply off-glass.
    #[must_use]
    pub fn cursor_position(&self) -> (usize, isize) {
        self.counter.cursor_position(self.config.lines())
    }

    /// Project controller state into a `lines x segments` grid of glyph
    /// bitmaps.
    ///
    /// Each cell is the CGROM glyph for the DDRAM byte its row window maps
    /// it to, or blank while the display is off. The cursor cell is then
    /// overridden in place: a visible cursor replaces the glyph with a
    /// full block (blink on phase) or a blank cell (blink disabled), and
    /// an underline cursor forces the bottom dot row on.
    #[must_use]
    pub fn project(&self) -> Vec<Vec<Glyph>> {
        let mut grid: Vec<Vec<Glyph>> = (0..self.config.lines())
            .map(|row| {
                (0..self.config.segments())
                    .map(|segment| {
                        if self.display.display_on {
                            cgrom::glyph(self.ddram.read(self.counter.row_offset(row) + segment))
                        } else {
                            cgrom::BLANK
                        }
                    })
                    .collect()
            })
            .collect();

        let (row, column) = self.cursor_position();
        if column >= 0 && (column as usize) < self.config.segments() {
            let cell = &mut grid[row][column as usize];
            if self.display.cursor_visible {
                *cell = if self.display.cursor_blinking {
                    cgrom::FULL_BLOCK
                } else {
                    cgrom::BLANK
                };
            }
            if self.display.cursor_active {
                cell[cgrom::GLYPH_HEIGHT - 1] = 0x1F;
            }
        }
        grid
    }

    /// Swap the glass without touching controller state. DDRAM, pointer,
    /// window and flags all survive; only the projected grid changes
    /// shape.
    pub fn resize(&mut self, config: PanelConfig) {
        self.config = config;
    }

    /// Back to power-on state, keeping the configured geometry.
    pub fn reset(&mut self) {
        let config = self.config;
        *self = Self::new(config);
    }

    #[must_use]
    pub fn config(&self) -> PanelConfig {
        self.config
    }

    #[must_use]
    pub fn ddram(&self) -> &Ddram {
        &self.ddram
    }

    #[must_use]
    pub fn counter(&self) -> &AddressCounter {
        &self.counter
    }

    #[must_use]
    pub fn display(&self) -> DisplayControl {
        self.display
    }

    #[must_use]
    pub fn function(&self) -> FunctionSet {
        self.function
    }

    #[must_use]
    pub fn cgram_address(&self) -> u8 {
        self.cgram_address
    }

    /// Capture the full mutable state.
    #[must_use]
    pub fn state(&self) -> ControllerState {
        ControllerState {
            ddram: self.ddram.contents(),
            pointer: self.counter.pointer(),
            row_offsets: self.counter.row_offsets(),
            entry_mode: self.counter.entry_mode(),
            display: self.display,
            function: self.function,
            cgram_address: self.cgram_address,
        }
    }

    /// Restore a previously captured state. Addresses are wrapped into
    /// DDRAM range on the way in, so any captured state is loadable.
    pub fn load_state(&mut self, state: &ControllerState) {
        self.ddram.load(state.ddram);
        self.counter.set_pointer(state.pointer);
        self.counter.set_row_offsets(state.row_offsets);
        self.counter.set_entry_mode(state.entry_mode);
        self.display = state.display;
        self.function = state.function;
        self.cgram_address = state.cgram_address & 0x3F;
    }
}

impl Default for Hd44780 {
    fn default() -> Self {
        Self::new(PanelConfig::default())
    }
}
