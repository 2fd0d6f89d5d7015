//! Raw-mode multiline prompt capture.
//!
//! Keystrokes are read one at a time so the submit and abort keys take
//! effect immediately instead of at the next line boundary. The editor
//! itself is a pure state machine over the input buffer; the interactive
//! loop feeds it key events and performs the echo it asks for.

use crate::error::{AppError, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::tty::IsTty;
use std::fmt;
use std::io::{self, Read, Write};

/// Outcome of a capture run
#[derive(Debug, PartialEq, Eq)]
pub enum Capture {
    /// The submit key was pressed; holds the buffer contents
    Submitted(String),
    /// The abort key was pressed; the buffer is discarded
    Aborted,
}

/// A single key chord
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    /// Key code as reported by the terminal
    pub code: KeyCode,
    /// Modifier keys held with it
    pub modifiers: KeyModifiers,
}

impl Key {
    /// A Ctrl-modified character key
    pub const fn ctrl(c: char) -> Self {
        Self {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
        }
    }

    fn matches(self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.modifiers
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "Ctrl-")?;
        }
        match self.code {
            KeyCode::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            ref code => write!(f, "{code:?}"),
        }
    }
}

/// Submit/abort key configuration
#[derive(Debug, Clone, Copy)]
pub struct KeyBindings {
    /// Key that ends capture and submits the buffer
    pub submit: Key,
    /// Key that ends capture and discards the buffer
    pub abort: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            submit: Key::ctrl('s'),
            abort: Key::ctrl('c'),
        }
    }
}

/// What the editor did with a key, so the caller can echo accordingly
#[derive(Debug, PartialEq, Eq)]
pub enum Keystroke {
    /// A character was appended to the buffer
    Inserted(char),
    /// A line break was appended to the buffer
    LineBreak,
    /// The last character of the current line was removed
    Erased,
    /// The key had no effect
    Ignored,
    /// The submit key was pressed
    Submit,
    /// The abort key was pressed
    Abort,
}

/// Multiline input buffer with key-driven editing
#[derive(Debug)]
pub struct Editor {
    buffer: String,
    bindings: KeyBindings,
}

impl Editor {
    /// Create an empty editor with the given bindings
    pub const fn new(bindings: KeyBindings) -> Self {
        Self {
            buffer: String::new(),
            bindings,
        }
    }

    /// Apply one key event to the buffer
    pub fn handle_key(&mut self, key: &KeyEvent) -> Keystroke {
        // Terminals that report key releases would double every character
        if key.kind != KeyEventKind::Press {
            return Keystroke::Ignored;
        }

        if self.bindings.abort.matches(key) {
            return Keystroke::Abort;
        }
        if self.bindings.submit.matches(key) {
            return Keystroke::Submit;
        }

        match key.code {
            KeyCode::Enter => {
                self.buffer.push('\n');
                Keystroke::LineBreak
            }
            KeyCode::Backspace => {
                // Only edit within the current line; a rendered line break
                // cannot be erased with backspace echo
                match self.buffer.chars().last() {
                    Some(c) if c != '\n' => {
                        self.buffer.pop();
                        Keystroke::Erased
                    }
                    _ => Keystroke::Ignored,
                }
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.buffer.push(c);
                Keystroke::Inserted(c)
            }
            _ => Keystroke::Ignored,
        }
    }

    /// Consume the editor and return the buffer contents
    pub fn into_buffer(self) -> String {
        self.buffer
    }
}

/// Scoped raw-mode handle.
///
/// Raw mode is enabled on construction and restored when the guard is
/// dropped, so submit, abort, error, and unwind paths all leave the
/// terminal as they found it.
#[derive(Debug)]
pub struct RawModeGuard(());

impl RawModeGuard {
    /// Enable raw mode for the lifetime of the guard
    pub fn new() -> Result<Self> {
        enable_raw_mode().map_err(|e| AppError::TerminalError(e.to_string()))?;
        Ok(Self(()))
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Whether stdin is attached to a terminal
pub fn is_interactive() -> bool {
    io::stdin().is_tty()
}

/// Capture a multiline prompt.
///
/// Interactive stdin enters the raw-mode key loop; piped stdin is read to
/// EOF and treated as a submission.
pub fn capture(bindings: KeyBindings) -> Result<Capture> {
    if !is_interactive() {
        return read_piped();
    }

    let _guard = RawModeGuard::new()?;
    let mut stdout = io::stdout();
    let mut editor = Editor::new(bindings);

    loop {
        let event = event::read().map_err(|e| AppError::TerminalError(e.to_string()))?;
        let Event::Key(key) = event else {
            continue;
        };

        let echoed = match editor.handle_key(&key) {
            Keystroke::Submit => return Ok(Capture::Submitted(editor.into_buffer())),
            Keystroke::Abort => return Ok(Capture::Aborted),
            Keystroke::Inserted(c) => write!(stdout, "{c}"),
            Keystroke::LineBreak => write!(stdout, "\r\n"),
            Keystroke::Erased => write!(stdout, "\x08 \x08"),
            Keystroke::Ignored => continue,
        };

        echoed
            .and_then(|()| stdout.flush())
            .map_err(|e| AppError::TerminalError(e.to_string()))?;
    }
}

/// Read piped stdin to EOF
fn read_piped() -> Result<Capture> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| AppError::TerminalError(e.to_string()))?;
    Ok(Capture::Submitted(input.trim().to_string()))
}
