//! Bus-level instruction streams across the panel geometries that real
//! modules ship in, from 8x1 up to 80x1 and 20x4.

use hitachi_hd44780::{
    ExecuteError, Hd44780, PanelConfig, ReadWrite, RegisterSelect, cgrom, ddram,
};

const GEOMETRIES: [(usize, usize); 11] = [
    (1, 8),
    (1, 16),
    (1, 20),
    (1, 80),
    (2, 8),
    (2, 16),
    (2, 20),
    (2, 40),
    (4, 8),
    (4, 16),
    (4, 20),
];

const CLEAR: u8 = 0x01;
const RETURN_HOME: u8 = 0x02;
const ENTRY_INCREMENT: u8 = 0x06;
const ENTRY_INCREMENT_SHIFT: u8 = 0x07;
const DISPLAY_ON: u8 = 0x0C;
const DISPLAY_ON_CURSOR: u8 = 0x0E;
const DISPLAY_ON_CURSOR_BLINK: u8 = 0x0F;
const SHIFT_DISPLAY_LEFT: u8 = 0x18;
const SHIFT_DISPLAY_RIGHT: u8 = 0x1C;

fn lcd(lines: usize, segments: usize) -> Hd44780 {
    Hd44780::new(PanelConfig::new(lines, segments).expect("valid test geometry"))
}

fn send(lcd: &mut Hd44780, byte: u8) {
    lcd.execute(RegisterSelect::Instruction, ReadWrite::Write, byte)
        .expect("legal instruction");
}

fn write_str(lcd: &mut Hd44780, text: &str) {
    for byte in text.bytes() {
        lcd.execute(RegisterSelect::Data, ReadWrite::Write, byte)
            .expect("data writes cannot fault");
    }
}

fn set_address(lcd: &mut Hd44780, address: u8) {
    send(lcd, 0x80 | address);
}

fn assert_row_shows(lcd: &Hd44780, row: usize, text: &str) {
    let grid = lcd.project();
    for (column, ch) in text.bytes().enumerate() {
        assert_eq!(
            grid[row][column],
            cgrom::glyph(ch),
            "row {row} column {column} should show {:?}",
            ch as char
        );
    }
}

#[test]
fn init_sequence_leaves_the_pointer_at_zero() {
    for (lines, segments) in GEOMETRIES {
        let mut panel = lcd(lines, segments);
        send(&mut panel, CLEAR);
        send(&mut panel, RETURN_HOME);
        assert_eq!(
            panel.counter().pointer(),
            0,
            "pointer after init on {lines}x{segments}"
        );
    }
}

#[test]
fn display_control_sequence_tracks_the_flag_ladder() {
    for (lines, segments) in GEOMETRIES {
        let mut panel = lcd(lines, segments);
        send(&mut panel, CLEAR);
        send(&mut panel, RETURN_HOME);
        send(&mut panel, ENTRY_INCREMENT);
        assert!(!panel.display().display_on);

        send(&mut panel, DISPLAY_ON);
        assert!(panel.display().display_on);
        assert!(!panel.display().cursor_active);

        send(&mut panel, DISPLAY_ON_CURSOR);
        assert!(panel.display().cursor_active);
        assert!(!panel.display().cursor_blinking);

        send(&mut panel, DISPLAY_ON_CURSOR_BLINK);
        assert!(panel.display().cursor_active);
        assert!(panel.display().cursor_blinking);
    }
}

#[test]
fn first_write_lands_at_address_zero_and_advances() {
    for (lines, segments) in GEOMETRIES {
        let mut panel = lcd(lines, segments);
        send(&mut panel, CLEAR);
        send(&mut panel, RETURN_HOME);
        send(&mut panel, ENTRY_INCREMENT);
        send(&mut panel, DISPLAY_ON);
        write_str(&mut panel, "H");
        assert_eq!(panel.ddram().read(0), b'H');
        assert_eq!(panel.counter().pointer(), 1);
    }
}

#[test]
fn hello_with_display_shifts_marches_the_window() {
    // Writes "Hello, MX/11!" starting at DDRAM address 0x38, shifting the
    // display left after every character.
    let message = "Hello, MX/11!";
    for (lines, segments) in GEOMETRIES {
        let mut panel = lcd(lines, segments);
        send(&mut panel, CLEAR);
        send(&mut panel, RETURN_HOME);
        send(&mut panel, ENTRY_INCREMENT);
        send(&mut panel, DISPLAY_ON);
        set_address(&mut panel, 0x38);
        for ch in message.bytes() {
            panel
                .execute(RegisterSelect::Data, ReadWrite::Write, ch)
                .expect("data writes cannot fault");
            send(&mut panel, SHIFT_DISPLAY_LEFT);
        }

        let shifts = message.len();
        assert_eq!(panel.counter().pointer(), (0x38 + message.len()) % 80);
        assert_eq!(
            panel.counter().row_offsets(),
            [shifts, (0x28 + shifts) % 80, 0x14 + shifts, (0x40 + shifts) % 80]
        );
        for (i, ch) in message.bytes().enumerate() {
            assert_eq!(panel.ddram().read(0x38 + i), ch);
        }
    }

    // On the 80-segment single-line panel the whole buffer is on glass:
    // after thirteen left shifts the message starts at column 0x38 - 13.
    let mut wide = lcd(1, 80);
    send(&mut wide, CLEAR);
    send(&mut wide, ENTRY_INCREMENT);
    send(&mut wide, DISPLAY_ON);
    set_address(&mut wide, 0x38);
    for ch in message.bytes() {
        wide.execute(RegisterSelect::Data, ReadWrite::Write, ch)
            .expect("data writes cannot fault");
        send(&mut wide, SHIFT_DISPLAY_LEFT);
    }
    assert_row_shows(&wide, 0, &" ".repeat(0x38 - message.len()));
    let grid = wide.project();
    for (i, ch) in message.bytes().enumerate() {
        assert_eq!(grid[0][0x38 - message.len() + i], cgrom::glyph(ch));
    }
}

#[test]
fn writes_wrap_across_the_ddram_seam() {
    let mut panel = lcd(1, 80);
    send(&mut panel, CLEAR);
    send(&mut panel, DISPLAY_ON);
    set_address(&mut panel, 79);
    write_str(&mut panel, "AB");
    assert_eq!(panel.ddram().read(79), b'A');
    assert_eq!(panel.ddram().read(0), b'B');
    assert_eq!(panel.counter().pointer(), 1);

    let grid = panel.project();
    assert_eq!(grid[0][79], cgrom::glyph(b'A'));
    assert_eq!(grid[0][0], cgrom::glyph(b'B'));
}

#[test]
fn display_shift_right_moves_text_right_on_the_glass() {
    let mut panel = lcd(1, 16);
    send(&mut panel, CLEAR);
    send(&mut panel, DISPLAY_ON);
    write_str(&mut panel, "A");
    assert_row_shows(&panel, 0, "A");

    send(&mut panel, SHIFT_DISPLAY_RIGHT);
    assert_row_shows(&panel, 0, " A");

    send(&mut panel, SHIFT_DISPLAY_LEFT);
    assert_row_shows(&panel, 0, "A");
}

#[test]
fn entry_mode_shift_pins_the_cursor_column() {
    // Typewriter mode: each write drags the window along with the pointer,
    // so the cursor cell never moves while the text slides left past it.
    let mut panel = lcd(1, 16);
    send(&mut panel, CLEAR);
    send(&mut panel, ENTRY_INCREMENT_SHIFT);
    send(&mut panel, DISPLAY_ON_CURSOR);
    let start = panel.cursor_position();
    for ch in "typewriter".bytes() {
        panel
            .execute(RegisterSelect::Data, ReadWrite::Write, ch)
            .expect("data writes cannot fault");
        assert_eq!(panel.cursor_position(), start);
    }
}

#[test]
fn four_line_rows_interleave_through_ddram() {
    let mut panel = lcd(4, 20);
    send(&mut panel, CLEAR);
    send(&mut panel, DISPLAY_ON);
    for (address, ch) in [(0x00, "A"), (0x28, "B"), (0x14, "C"), (0x40, "D")] {
        set_address(&mut panel, address);
        write_str(&mut panel, ch);
    }
    assert_row_shows(&panel, 0, "A");
    assert_row_shows(&panel, 1, "B");
    assert_row_shows(&panel, 2, "C");
    assert_row_shows(&panel, 3, "D");

    // Row 0 runs on into row 2: address 20 is row 2 column 0.
    send(&mut panel, RETURN_HOME);
    write_str(&mut panel, &"x".repeat(21));
    let grid = panel.project();
    assert_eq!(grid[0][19], cgrom::glyph(b'x'));
    assert_eq!(grid[2][0], cgrom::glyph(b'x'));
    assert_eq!(grid[1][0], cgrom::glyph(b'B'));
}

#[test]
fn readback_walks_the_buffer_like_writes_do() {
    let mut panel = lcd(2, 16);
    send(&mut panel, CLEAR);
    write_str(&mut panel, "LCD");
    send(&mut panel, RETURN_HOME);
    let mut readback = Vec::new();
    for _ in 0..3 {
        let byte = panel
            .execute(RegisterSelect::Data, ReadWrite::Read, 0x00)
            .expect("data reads cannot fault")
            .expect("data reads drive the bus");
        readback.push(byte);
    }
    assert_eq!(readback, b"LCD");
    assert_eq!(panel.counter().pointer(), 3);
}

#[test]
fn busy_polling_between_instructions_is_harmless() {
    let mut panel = lcd(2, 16);
    for byte in [CLEAR, RETURN_HOME, ENTRY_INCREMENT, DISPLAY_ON] {
        let busy = panel
            .execute(RegisterSelect::Instruction, ReadWrite::Read, 0x00)
            .expect("busy reads cannot fault");
        assert_eq!(busy, Some(0x00));
        send(&mut panel, byte);
    }
    write_str(&mut panel, "ok");
    assert_row_shows(&panel, 0, "ok");
}

#[test]
fn illegal_instruction_is_surfaced_and_the_stream_recovers() {
    let mut panel = lcd(2, 16);
    send(&mut panel, CLEAR);
    send(&mut panel, DISPLAY_ON);
    write_str(&mut panel, "a");
    let fault = panel.execute(RegisterSelect::Instruction, ReadWrite::Write, 0x00);
    assert_eq!(fault, Err(ExecuteError::IllegalInstruction));
    write_str(&mut panel, "b");
    assert_row_shows(&panel, 0, "ab");
    assert_eq!(panel.ddram().read(2), ddram::BLANK_CODE);
}

#[test]
fn set_ddram_address_places_the_cursor_on_the_second_row() {
    let mut panel = lcd(2, 16);
    send(&mut panel, CLEAR);
    send(&mut panel, DISPLAY_ON_CURSOR);
    set_address(&mut panel, 0x28);
    assert_eq!(panel.cursor_position(), (1, 0));

    let grid = panel.project();
    assert_eq!(grid[1][0], [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F]);
}
