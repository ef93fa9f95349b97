//! Clipboard access behind a small trait so the UI can be tested without a
//! windowing system. The system implementation tries the platform clipboard
//! first and falls back to an OSC 52 escape, which reaches the clipboard
//! even over SSH where no display is available.

use std::io::{self, Write};

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Destination for copied preview text.
#[cfg_attr(test, mockall::automock)]
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Real clipboard: `arboard` when the platform provides one, OSC 52 through
/// the terminal otherwise. Primary-path failures are recovered here and
/// never reach the user. The handle is kept for the lifetime of the app; on
/// X11 the clipboard contents live only as long as their owner.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Option<arboard::Clipboard>,
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.handle.is_none() {
            self.handle = arboard::Clipboard::new().ok();
        }
        let copied = match self.handle.as_mut() {
            Some(clipboard) => clipboard.set_text(text.to_string()).is_ok(),
            None => false,
        };
        if copied {
            Ok(())
        } else {
            osc52_copy(text)
        }
    }
}

/// Emit an OSC 52 clipboard-set sequence. The sequence buffer lives only for
/// this call: built, flushed to the terminal, and dropped.
fn osc52_copy(text: &str) -> Result<()> {
    let mut sequence = Vec::with_capacity(text.len() * 4 / 3 + 16);
    sequence.extend_from_slice(b"\x1b]52;c;");
    sequence.extend_from_slice(BASE64.encode(text).as_bytes());
    sequence.push(0x07);

    let mut out = io::stdout().lock();
    out.write_all(&sequence)
        .context("failed to write clipboard escape sequence")?;
    out.flush().context("failed to flush clipboard escape sequence")
}
