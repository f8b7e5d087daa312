//! Minimal runner for the character LCD module.
//!
//! Types keystrokes onto the panel through the bus pins and draws the
//! projected dot matrix in a window, or captures a framebuffer screenshot
//! and a state snapshot in headless mode. F2 toggles the display, F3 cycles
//! the cursor style, F4 the backlight, F5 resets the controller, Delete
//! clears, Home returns home, and the arrow and page keys drive cursor and
//! display shifts. F12 quits.

#![allow(clippy::cast_possible_truncation)]

mod render;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

use hitachi_hd44780::addressing::ROW_OFFSETS;
use machine_char_lcd::{CharLcd, PanelConfig, Pins, instructions};
use pixels::{Pixels, SurfaceTexture};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, KeyCode, NamedKey, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::render::{BACKLIT, Geometry, UNLIT};

const FRAME_MILLIS: u32 = 20; // ~50 Hz refresh
const FRAME_DURATION: Duration = Duration::from_millis(FRAME_MILLIS as u64);
const DEFAULT_TEXT: &str = "Hello, MX/11!";

struct CliArgs {
    lines: usize,
    segments: usize,
    text: String,
    dot_size: usize,
    headless: bool,
    frames: u32,
    screenshot_path: Option<PathBuf>,
    state_path: Option<PathBuf>,
    backlight_off: bool,
}

fn print_usage_and_exit(code: i32) -> ! {
    eprintln!("Usage: lcd-runner [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --lines <n>    Display lines (1, 2 or 4) [default: 2]");
    eprintln!("  --segments <n>  Characters per line [default: 16]");
    eprintln!("  --text <string>  Text typed onto the panel at startup (\\n breaks lines)");
    eprintln!("  --scale <n>    Dot size in window pixels [default: 5]");
    eprintln!("  --headless     Run without a window");
    eprintln!("  --frames <n>   Frames to run in headless mode [default: 120]");
    eprintln!("  --screenshot <file.png>  Save a framebuffer screenshot (headless)");
    eprintln!("  --save-state <file.json>  Save a panel state snapshot (headless)");
    eprintln!("  --backlight-off  Start with the backlight switched off");
    eprintln!("  -h, --help     Show this help");
    process::exit(code);
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut lines = 2;
    let mut segments = 16;
    let mut text = String::from(DEFAULT_TEXT);
    let mut dot_size = 5;
    let mut headless = false;
    let mut frames = 120;
    let mut screenshot_path: Option<PathBuf> = None;
    let mut state_path: Option<PathBuf> = None;
    let mut backlight_off = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--lines" => {
                i += 1;
                if let Some(value) = args.get(i) {
                    lines = value.parse().unwrap_or(2);
                }
            }
            "--segments" => {
                i += 1;
                if let Some(value) = args.get(i) {
                    segments = value.parse().unwrap_or(16);
                }
            }
            "--text" => {
                i += 1;
                let Some(value) = args.get(i) else {
                    eprintln!("Missing value for --text");
                    print_usage_and_exit(1);
                };
                text = value.replace("\\n", "\n");
            }
            "--scale" => {
                i += 1;
                if let Some(value) = args.get(i) {
                    dot_size = value.parse().unwrap_or(5);
                }
            }
            "--headless" => {
                headless = true;
            }
            "--frames" => {
                i += 1;
                if let Some(value) = args.get(i) {
                    frames = value.parse().unwrap_or(120);
                }
            }
            "--screenshot" => {
                i += 1;
                screenshot_path = args.get(i).map(PathBuf::from);
            }
            "--save-state" => {
                i += 1;
                state_path = args.get(i).map(PathBuf::from);
            }
            "--backlight-off" => {
                backlight_off = true;
            }
            "-h" | "--help" => print_usage_and_exit(0),
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage_and_exit(1);
            }
        }
        i += 1;
    }

    if dot_size == 0 {
        eprintln!("--scale must be at least 1");
        print_usage_and_exit(1);
    }

    if screenshot_path.is_some() || state_path.is_some() {
        headless = true;
    }

    CliArgs {
        lines,
        segments,
        text,
        dot_size,
        headless,
        frames,
        screenshot_path,
        state_path,
        backlight_off,
    }
}

fn make_panel(cli: &CliArgs) -> CharLcd {
    let config = match PanelConfig::new(cli.lines, cli.segments) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let mut panel = CharLcd::new(config);
    panel.set_backlight(!cli.backlight_off);

    let init = [
        instructions::function_set(true, cli.lines > 1, false),
        instructions::display_control(true, true, true),
        instructions::CLEAR,
        instructions::RETURN_HOME,
        instructions::entry_mode_set(true, false),
    ];
    for byte in init {
        if let Err(e) = panel.instruction(byte) {
            eprintln!("Init byte {byte:#04X} rejected: {e}");
            process::exit(1);
        }
    }

    for (line, line_text) in cli.text.split('\n').take(cli.lines).enumerate() {
        if line > 0
            && let Err(e) =
                panel.instruction(instructions::set_ddram_address(ROW_OFFSETS[line] as u8))
        {
            eprintln!("Line address rejected: {e}");
            process::exit(1);
        }
        panel.write_ascii(line_text);
    }

    eprintln!("Panel ready: {}x{}", cli.segments, cli.lines);
    panel
}

fn save_screenshot(frame: &[u8], geometry: &Geometry, path: &PathBuf) -> Result<(), String> {
    let file = File::create(path)
        .map_err(|e| format!("failed to create screenshot {}: {e}", path.display()))?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, geometry.width() as u32, geometry.height() as u32);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| format!("failed to write PNG header {}: {e}", path.display()))?;

    png_writer
        .write_image_data(frame)
        .map_err(|e| format!("failed to write PNG data {}: {e}", path.display()))
}

fn save_state(panel: &CharLcd, path: &PathBuf) -> Result<(), String> {
    let json = panel
        .snapshot()
        .to_json()
        .map_err(|e| format!("failed to serialize snapshot: {e}"))?;
    std::fs::write(path, json)
        .map_err(|e| format!("failed to write snapshot {}: {e}", path.display()))
}

fn run_headless(cli: &CliArgs) {
    let mut panel = make_panel(cli);

    for _ in 0..cli.frames {
        panel.tick_millis(FRAME_MILLIS);
    }

    let geometry = Geometry::new(cli.lines, cli.segments, cli.dot_size);
    let mut frame = vec![0u8; geometry.width() * geometry.height() * 4];
    let palette = if panel.backlight_on() {
        &BACKLIT
    } else {
        &UNLIT
    };
    render::render(&panel.controller().project(), &geometry, palette, &mut frame);

    if let Some(path) = &cli.screenshot_path {
        if let Err(e) = save_screenshot(&frame, &geometry, path) {
            eprintln!("{e}");
            process::exit(1);
        }
        eprintln!("Screenshot saved to {}", path.display());
    }

    if let Some(path) = &cli.state_path {
        if let Err(e) = save_state(&panel, path) {
            eprintln!("{e}");
            process::exit(1);
        }
        eprintln!("Snapshot saved to {}", path.display());
    }
}

struct App {
    panel: CharLcd,
    geometry: Geometry,
    window: Option<&'static Window>,
    pixels: Option<Pixels<'static>>,
    last_frame_time: Instant,
}

impl App {
    fn new(panel: CharLcd, geometry: Geometry) -> Self {
        Self {
            panel,
            geometry,
            window: None,
            pixels: None,
            last_frame_time: Instant::now(),
        }
    }

    /// Pulses E once with the given register select and data byte.
    fn pulse(&mut self, rs: bool, byte: u8) {
        let idle = Pins {
            rs,
            rw: false,
            enable: false,
            db: byte,
        };
        let _ = self.panel.set_pins(idle);
        if let Err(e) = self.panel.set_pins(Pins { enable: true, ..idle }) {
            eprintln!("LCD fault: {e}");
        }
        let _ = self.panel.set_pins(idle);
    }

    fn send_instruction(&mut self, byte: u8) {
        self.pulse(false, byte);
    }

    fn type_byte(&mut self, byte: u8) {
        self.pulse(true, byte);
    }

    /// Classic firmware backspace: step left, blank the cell, step left again.
    fn rub_out(&mut self) {
        self.send_instruction(instructions::cursor_shift(false, false));
        self.type_byte(b' ');
        self.send_instruction(instructions::cursor_shift(false, false));
    }

    /// Moves the cursor to the start of the next line, wrapping to the first.
    fn carriage_return(&mut self) {
        let (line, _) = self.panel.controller().cursor_position();
        let lines = self.panel.controller().config().lines();
        let next = (line + 1) % lines;
        self.send_instruction(instructions::set_ddram_address(ROW_OFFSETS[next] as u8));
    }

    fn toggle_display(&mut self) {
        let control = self.panel.controller().display();
        self.send_instruction(instructions::display_control(
            !control.display_on,
            control.cursor_active,
            control.cursor_blinking,
        ));
    }

    /// Cycles the cursor style: none, underline, underline with blink.
    fn cycle_cursor(&mut self) {
        let control = self.panel.controller().display();
        let (active, blinking) = match (control.cursor_active, control.cursor_blinking) {
            (false, _) => (true, false),
            (true, false) => (true, true),
            (true, true) => (false, false),
        };
        self.send_instruction(instructions::display_control(
            control.display_on,
            active,
            blinking,
        ));
    }

    fn handle_keyboard_input(&mut self, event_loop: &ActiveEventLoop, event: KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        if event.state != ElementState::Pressed {
            return;
        }

        match code {
            // Runner hotkey: F12 quits so every printable key stays free for the panel.
            KeyCode::F12 => event_loop.exit(),
            KeyCode::F2 if !event.repeat => self.toggle_display(),
            KeyCode::F3 if !event.repeat => self.cycle_cursor(),
            KeyCode::F4 if !event.repeat => {
                let lit = self.panel.backlight_on();
                self.panel.set_backlight(!lit);
            }
            KeyCode::F5 if !event.repeat => self.panel.reset(),
            KeyCode::Enter | KeyCode::NumpadEnter => self.carriage_return(),
            KeyCode::Backspace => self.rub_out(),
            KeyCode::Delete => self.send_instruction(instructions::CLEAR),
            KeyCode::Home => self.send_instruction(instructions::RETURN_HOME),
            KeyCode::ArrowLeft => self.send_instruction(instructions::cursor_shift(false, false)),
            KeyCode::ArrowRight => self.send_instruction(instructions::cursor_shift(false, true)),
            KeyCode::PageUp => self.send_instruction(instructions::cursor_shift(true, false)),
            KeyCode::PageDown => self.send_instruction(instructions::cursor_shift(true, true)),
            _ => {
                if let Some(byte) = ascii_from_key(&event.logical_key) {
                    self.type_byte(byte);
                }
            }
        }
    }

    fn update_pixels(&mut self) {
        let Some(pixels) = self.pixels.as_mut() else {
            return;
        };

        let palette = if self.panel.backlight_on() {
            &BACKLIT
        } else {
            &UNLIT
        };
        render::render(
            &self.panel.controller().project(),
            &self.geometry,
            palette,
            pixels.frame_mut(),
        );
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let width = self.geometry.width() as u32;
        let height = self.geometry.height() as u32;
        let config = self.panel.controller().config();
        let attrs = WindowAttributes::default()
            .with_title(format!("Character LCD {}x{}", config.segments(), config.lines()))
            .with_inner_size(winit::dpi::LogicalSize::new(width, height))
            .with_resizable(false);

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let window: &'static Window = Box::leak(Box::new(window));
                let inner = window.inner_size();
                let surface = SurfaceTexture::new(inner.width, inner.height, window);
                let pixels = match Pixels::new(width, height, surface) {
                    Ok(pixels) => pixels,
                    Err(e) => {
                        eprintln!("Failed to create pixels surface: {e}");
                        event_loop.exit();
                        return;
                    }
                };

                self.pixels = Some(pixels);
                self.window = Some(window);
            }
            Err(e) => {
                eprintln!("Failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_keyboard_input(event_loop, event);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                if now.duration_since(self.last_frame_time) >= FRAME_DURATION {
                    self.panel.tick_millis(FRAME_MILLIS);
                    self.update_pixels();
                    self.last_frame_time = now;
                }

                if let Some(pixels) = self.pixels.as_ref()
                    && let Err(e) = pixels.render()
                {
                    eprintln!("Render error: {e}");
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window {
            window.request_redraw();
        }
    }
}

fn ascii_from_key(logical_key: &Key) -> Option<u8> {
    match logical_key {
        Key::Character(text) => {
            let mut chars = text.chars();
            let ch = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            ascii_from_char(ch)
        }
        Key::Named(NamedKey::Space) => Some(b' '),
        _ => None,
    }
}

fn ascii_from_char(ch: char) -> Option<u8> {
    u8::try_from(ch)
        .ok()
        .filter(|byte| (0x20..=0x7E).contains(byte))
}


fn main() {
    let cli = parse_args();

    if cli.headless {
        run_headless(&cli);
        return;
    }

    let panel = make_panel(&cli);
    let geometry = Geometry::new(cli.lines, cli.segments, cli.dot_size);
    let mut app = App::new(panel, geometry);

    let event_loop = match EventLoop::new() {
        Ok(loop_) => loop_,
        Err(e) => {
            eprintln!("Failed to create event loop: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = event_loop.run_app(&mut app) {
        eprintln!("Event loop error: {e}");
        process::exit(1);
    }
}
