//! JSON save states for the module.
//!
//! A snapshot records the controller state plus the module-level extras
//! (blink clock, backlight) and the panel geometry it was captured under.
//! Restoring validates the geometry first, so a 16x2 state never lands on
//! a 20x4 panel by accident.

use std::fmt;

use serde::{Deserialize, Serialize};

use hitachi_hd44780::{ControllerState, DDRAM_SIZE, DisplayControl, EntryMode, FunctionSet};

use crate::CharLcd;

/// Serialized module state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub lines: usize,
    pub segments: usize,
    pub ddram: Vec<u8>,
    pub pointer: usize,
    pub row_offsets: [usize; 4],
    pub entry_increment: bool,
    pub entry_shift: bool,
    pub display_on: bool,
    pub cursor_active: bool,
    pub cursor_visible: bool,
    pub cursor_blinking: bool,
    pub eight_bit_bus: bool,
    pub two_line_mode: bool,
    pub font_5x10: bool,
    pub cgram_address: u8,
    pub blink_elapsed_ms: u32,
    pub backlight_on: bool,
}

/// Restore and serialization faults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Snapshot geometry does not match the panel it is restored onto.
    GeometryMismatch {
        panel: (usize, usize),
        snapshot: (usize, usize),
    },
    /// DDRAM payload is not exactly eighty bytes.
    BadDdramLength(usize),
    /// JSON encode or decode failure.
    Format(String),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GeometryMismatch { panel, snapshot } => write!(
                f,
                "snapshot is for a {}x{} panel, this module is {}x{}",
                snapshot.0, snapshot.1, panel.0, panel.1
            ),
            Self::BadDdramLength(len) => {
                write!(f, "snapshot DDRAM holds {len} bytes, expected {DDRAM_SIZE}")
            }
            Self::Format(msg) => write!(f, "snapshot format error: {msg}"),
        }
    }
}

impl std::error::Error for SnapshotError {}

impl Snapshot {
    /// Capture the full module state.
    #[must_use]
    pub fn capture(lcd: &CharLcd) -> Self {
        let config = lcd.controller.config();
        let state = lcd.controller.state();
        Self {
            lines: config.lines(),
            segments: config.segments(),
            ddram: state.ddram.to_vec(),
            pointer: state.pointer,
            row_offsets: state.row_offsets,
            entry_increment: state.entry_mode.increment,
            entry_shift: state.entry_mode.shift_display,
            display_on: state.display.display_on,
            cursor_active: state.display.cursor_active,
            cursor_visible: state.display.cursor_visible,
            cursor_blinking: state.display.cursor_blinking,
            eight_bit_bus: state.function.eight_bit_bus,
            two_line_mode: state.function.two_line_mode,
            font_5x10: state.function.font_5x10,
            cgram_address: state.cgram_address,
            blink_elapsed_ms: lcd.blink_elapsed_ms,
            backlight_on: lcd.backlight_on,
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(|e| SnapshotError::Format(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::Format(e.to_string()))
    }
}

impl CharLcd {
    /// Capture the full module state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    /// Restore a snapshot captured under the same panel geometry.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let config = self.controller.config();
        let panel = (config.lines(), config.segments());
        let recorded = (snapshot.lines, snapshot.segments);
        if panel != recorded {
            return Err(SnapshotError::GeometryMismatch {
                panel,
                snapshot: recorded,
            });
        }
        let ddram: [u8; DDRAM_SIZE] = snapshot
            .ddram
            .as_slice()
            .try_into()
            .map_err(|_| SnapshotError::BadDdramLength(snapshot.ddram.len()))?;

        self.controller.load_state(&ControllerState {
            ddram,
            pointer: snapshot.pointer,
            row_offsets: snapshot.row_offsets,
            entry_mode: EntryMode {
                increment: snapshot.entry_increment,
                shift_display: snapshot.entry_shift,
            },
            display: DisplayControl {
                display_on: snapshot.display_on,
                cursor_active: snapshot.cursor_active,
                cursor_visible: snapshot.cursor_visible,
                cursor_blinking: snapshot.cursor_blinking,
            },
            function: FunctionSet {
                eight_bit_bus: snapshot.eight_bit_bus,
                two_line_mode: snapshot.two_line_mode,
                font_5x10: snapshot.font_5x10,
            },
            cgram_address: snapshot.cgram_address,
        });
        self.blink_elapsed_ms = snapshot.blink_elapsed_ms;
        self.backlight_on = snapshot.backlight_on;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions;
    use hitachi_hd44780::PanelConfig;

    fn module() -> CharLcd {
        CharLcd::new(PanelConfig::new(2, 16).unwrap())
    }

    fn scribbled() -> CharLcd {
        let mut lcd = module();
        lcd.instruction(instructions::CLEAR).unwrap();
        lcd.instruction(instructions::display_control(true, true, true))
            .unwrap();
        lcd.instruction(instructions::entry_mode_set(true, true))
            .unwrap();
        lcd.write_ascii("state");
        lcd.tick_millis(300);
        lcd.set_backlight(false);
        lcd
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let lcd = scribbled();
        let json = lcd.snapshot().to_json().unwrap();
        let snapshot = Snapshot::from_json(&json).unwrap();

        let mut restored = module();
        restored.restore(&snapshot).unwrap();
        assert_eq!(restored.controller().state(), lcd.controller().state());
        assert_eq!(restored.controller().project(), lcd.controller().project());
        assert!(!restored.backlight_on());

        // The carried blink remainder keeps ticking from where it stopped.
        restored.tick_millis(200);
        assert!(!restored.controller().display().cursor_visible);
    }

    #[test]
    fn restore_rejects_a_different_geometry() {
        let lcd = scribbled();
        let snapshot = lcd.snapshot();
        let mut other = CharLcd::new(PanelConfig::new(4, 20).unwrap());
        assert_eq!(
            other.restore(&snapshot),
            Err(SnapshotError::GeometryMismatch {
                panel: (4, 20),
                snapshot: (2, 16),
            })
        );
    }

    #[test]
    fn restore_rejects_a_truncated_ddram_payload() {
        let lcd = scribbled();
        let mut snapshot = lcd.snapshot();
        snapshot.ddram.truncate(10);
        let mut target = module();
        assert_eq!(
            target.restore(&snapshot),
            Err(SnapshotError::BadDdramLength(10))
        );
    }

    #[test]
    fn malformed_json_is_reported_not_panicked() {
        assert!(matches!(
            Snapshot::from_json("{\"lines\": 2,"),
            Err(SnapshotError::Format(_))
        ));
    }
}
