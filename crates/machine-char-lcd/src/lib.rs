//! Character LCD module: an HD44780 controller behind its bus pins.
//!
//! Wraps the bare controller in what a module on the bench has that the
//! chip alone does not: enable-edge bus latching, a millisecond clock for
//! cursor blink and a backlight switch. Hosts that do not care about pin
//! wiggling can use the typed helpers instead; both paths go through the
//! same decoder.
//!
//! Set `CHAR_LCD_TRACE=1` to log every latched bus transaction.

pub mod instructions;
#[cfg(feature = "savestate")]
mod savestate;

#[cfg(feature = "savestate")]
pub use savestate::{Snapshot, SnapshotError};

pub use hitachi_hd44780::{
    ConfigError, ExecuteError, Hd44780, PanelConfig, ReadWrite, RegisterSelect,
};

/// Milliseconds between cursor blink phase flips.
pub const BLINK_INTERVAL_MS: u32 = 500;

/// Bus pin levels as presented to the module. `db` carries DB7..DB0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pins {
    pub rs: bool,
    pub rw: bool,
    pub enable: bool,
    pub db: u8,
}

/// The module proper: controller, bus pins, blink clock, backlight.
#[derive(Debug, Clone)]
pub struct CharLcd {
    controller: Hd44780,
    pins: Pins,
    blink_elapsed_ms: u32,
    backlight_on: bool,
    last_read: Option<u8>,
}

impl CharLcd {
    /// Module at power-on: controller reset, all pins low, backlight lit.
    #[must_use]
    pub fn new(config: PanelConfig) -> Self {
        Self {
            controller: Hd44780::new(config),
            pins: Pins::default(),
            blink_elapsed_ms: 0,
            backlight_on: true,
            last_read: None,
        }
    }

    /// Present new pin levels to the module.
    ///
    /// The controller latches a transaction on the rising edge of enable;
    /// any other pin change just updates the latched levels. For reads the
    /// data pins are driven with the response until the next transaction.
    /// A decode fault comes back to the caller and leaves the controller
    /// untouched.
    pub fn set_pins(&mut self, pins: Pins) -> Result<(), ExecuteError> {
        let rising = pins.enable && !self.pins.enable;
        self.pins = pins;
        if !rising {
            return Ok(());
        }

        let rs = RegisterSelect::from_level(pins.rs);
        let rw = ReadWrite::from_level(pins.rw);
        let response = self.controller.execute(rs, rw, pins.db)?;
        if std::env::var("CHAR_LCD_TRACE").is_ok() {
            match response {
                Some(byte) => eprintln!(
                    "[LCD] rs={} rw={} db=${:02X} read ${byte:02X}",
                    u8::from(pins.rs),
                    u8::from(pins.rw),
                    pins.db
                ),
                None => eprintln!(
                    "[LCD] rs={} rw={} db=${:02X}",
                    u8::from(pins.rs),
                    u8::from(pins.rw),
                    pins.db
                ),
            }
        }
        if let Some(byte) = response {
            self.pins.db = byte;
            self.last_read = Some(byte);
        }
        Ok(())
    }

    /// Pin levels as currently latched, data pins included.
    #[must_use]
    pub fn pins(&self) -> Pins {
        self.pins
    }

    /// The byte the most recent read transaction drove onto the data pins,
    /// or `None` if nothing has been read since power-on or reset.
    #[must_use]
    pub fn last_read(&self) -> Option<u8> {
        self.last_read
    }

    /// Advance the module clock. Every accumulated half second flips the
    /// cursor blink phase; the remainder is carried.
    pub fn tick_millis(&mut self, elapsed_ms: u32) {
        self.blink_elapsed_ms += elapsed_ms;
        while self.blink_elapsed_ms >= BLINK_INTERVAL_MS {
            self.blink_elapsed_ms -= BLINK_INTERVAL_MS;
            self.controller.toggle_blink_phase();
        }
    }

    /// Execute one instruction byte without going through the pins.
    pub fn instruction(&mut self, byte: u8) -> Result<(), ExecuteError> {
        self.controller
            .execute(RegisterSelect::Instruction, ReadWrite::Write, byte)
            .map(|_| ())
    }

    /// Write a string through the data register, one character code per
    /// byte. Codes outside the CGROM range land in DDRAM as given and
    /// render blank.
    pub fn write_ascii(&mut self, text: &str) {
        for byte in text.bytes() {
            self.controller.write_data(byte);
        }
    }

    #[must_use]
    pub fn controller(&self) -> &Hd44780 {
        &self.controller
    }

    #[must_use]
    pub fn controller_mut(&mut self) -> &mut Hd44780 {
        &mut self.controller
    }

    #[must_use]
    pub fn backlight_on(&self) -> bool {
        self.backlight_on
    }

    pub fn set_backlight(&mut self, on: bool) {
        self.backlight_on = on;
    }

    /// Power-cycle the module: controller reset, pins dropped, blink clock
    /// rewound. The backlight switch is external and keeps its setting.
    pub fn reset(&mut self) {
        self.controller.reset();
        self.pins = Pins::default();
        self.blink_elapsed_ms = 0;
        self.last_read = None;
    }
}

impl Default for CharLcd {
    fn default() -> Self {
        Self::new(PanelConfig::default())
    }
}
