//! Clipboard hand-off for the generated API URL.
//!
//! Copy failures are logged and otherwise ignored.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::io::{self, IsTerminal, Write};
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Write `text` to `clipboard`. Returns whether it was copied.
pub fn copy_to_clipboard(clipboard: &mut dyn Clipboard, text: &str) -> bool {
    match clipboard.write_text(text) {
        Ok(()) => {
            debug!(len = text.len(), "Copied to clipboard");
            true
        }
        Err(e) => {
            error!("Failed to copy text: {}", e);
            false
        }
    }
}

/// Terminal clipboard via the OSC 52 escape sequence.
///
/// The terminal emulator owns the system clipboard; the sequence is written in
/// a single call so it cannot interleave with other output.
pub struct Osc52Clipboard<W: Write> {
    out: W,
    is_terminal: bool,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out, is_terminal: true }
    }
}

impl Osc52Clipboard<io::Stdout> {
    pub fn stdout() -> Self {
        let out = io::stdout();
        let is_terminal = out.is_terminal();
        Self { out, is_terminal }
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if !self.is_terminal {
            return Err(ClipboardError::Unavailable("output is not a terminal".to_string()));
        }
        let sequence = format!("\x1b]52;c;{}\x07", STANDARD.encode(text));
        self.out.write_all(sequence.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}
