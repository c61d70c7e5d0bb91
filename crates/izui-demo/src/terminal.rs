#![forbid(unsafe_code)]

//! Terminal session guard and frame presentation.
//!
//! [`TerminalSession`] enters raw mode and the alternate screen, optionally
//! captures the mouse, and restores everything on drop, including during
//! panic unwinding. [`present`] writes a composed [`Frame`] through
//! crossterm, emitting color and attribute changes only when they differ
//! from the previous cell.

use std::io::{self, Write};
use std::sync::OnceLock;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use izui_render::buffer::Buffer;
use izui_render::cell::{CellAttrs, PackedRgba, StyleFlags};
use izui_render::frame::Frame;

/// Owns the terminal modes for the lifetime of the demo.
#[derive(Debug)]
pub struct TerminalSession {
    mouse_enabled: bool,
    active: bool,
}

impl TerminalSession {
    /// Enter raw mode and the alternate screen.
    pub fn new(mouse: bool) -> io::Result<Self> {
        install_panic_hook();
        terminal::enable_raw_mode()?;
        let mut session = Self {
            mouse_enabled: false,
            active: true,
        };
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide, EnableBracketedPaste)?;
        if mouse {
            execute!(stdout, EnableMouseCapture)?;
            session.mouse_enabled = true;
        }
        tracing::info!(mouse, "terminal session started");
        Ok(session)
    }

    /// Current terminal size in cells.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn cleanup(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let mut stdout = io::stdout();
        if self.mouse_enabled {
            let _ = execute!(stdout, DisableMouseCapture);
            self.mouse_enabled = false;
        }
        let _ = execute!(stdout, DisableBracketedPaste, ResetColor, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
        tracing::info!("terminal session restored");
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

fn best_effort_cleanup() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableBracketedPaste);
    let _ = execute!(stdout, DisableMouseCapture);
    let _ = execute!(stdout, ResetColor, Show, LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = stdout.flush();
}

fn to_color(color: PackedRgba) -> Color {
    if color.a() == 0 {
        Color::Reset
    } else {
        Color::Rgb {
            r: color.r(),
            g: color.g(),
            b: color.b(),
        }
    }
}

const ATTRIBUTE_MAP: [(StyleFlags, Attribute); 8] = [
    (StyleFlags::BOLD, Attribute::Bold),
    (StyleFlags::DIM, Attribute::Dim),
    (StyleFlags::ITALIC, Attribute::Italic),
    (StyleFlags::UNDERLINE, Attribute::Underlined),
    (StyleFlags::BLINK, Attribute::SlowBlink),
    (StyleFlags::REVERSE, Attribute::Reverse),
    (StyleFlags::STRIKETHROUGH, Attribute::CrossedOut),
    (StyleFlags::HIDDEN, Attribute::Hidden),
];

/// Queue the commands that draw `buffer`, without flushing.
pub fn queue_buffer<W: Write>(out: &mut W, buffer: &Buffer) -> io::Result<()> {
    let mut pen: Option<(PackedRgba, PackedRgba, CellAttrs)> = None;
    for y in 0..buffer.height() {
        queue!(out, MoveTo(0, y))?;
        let mut column = 0u16;
        for (x, cell) in buffer.row_cells(y).iter().enumerate() {
            if cell.is_continuation() {
                continue;
            }
            let x = x as u16;
            if x != column {
                queue!(out, MoveTo(x, y))?;
            }
            let wanted = (cell.fg, cell.bg, cell.attrs);
            if pen != Some(wanted) {
                queue!(out, SetAttribute(Attribute::Reset))?;
                queue!(
                    out,
                    SetForegroundColor(to_color(cell.fg)),
                    SetBackgroundColor(to_color(cell.bg))
                )?;
                for (flag, attribute) in ATTRIBUTE_MAP {
                    if cell.attrs.has_flag(flag) {
                        queue!(out, SetAttribute(attribute))?;
                    }
                }
                pen = Some(wanted);
            }
            let ch = cell.content.as_char().filter(|_| !cell.is_empty()).unwrap_or(' ');
            queue!(out, Print(ch))?;
            column = x + cell.content.width().max(1) as u16;
        }
    }
    queue!(out, SetAttribute(Attribute::Reset), ResetColor)
}

/// Draw a composed frame and place the cursor.
pub fn present<W: Write>(out: &mut W, frame: &Frame) -> io::Result<()> {
    let _span = tracing::trace_span!("present").entered();
    queue_buffer(out, &frame.buffer)?;
    match frame.cursor_position {
        Some((x, y)) if frame.cursor_visible => queue!(out, MoveTo(x, y), Show)?,
        _ => queue!(out, Hide)?,
    }
    out.flush()
}

/// Clear the screen, used after a resize.
pub fn clear<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, ResetColor, Clear(ClearType::All))
}
