//! Copy text to the clipboard.
//!
//! The system clipboard is tried first. Without a display to talk to (SSH,
//! headless sessions) the text goes out as an OSC 52 escape sequence, which
//! most modern terminals (and tmux with `set-clipboard on`) forward to the
//! host clipboard.

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::io::Write;

/// Something that can receive copied text.
pub trait Clipboard {
    /// Place `text` on the clipboard and name the mechanism that took it.
    fn set(&mut self, text: &str) -> Result<&'static str>;
}

/// System clipboard through `arboard`, connected on first use.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self { inner: None }
    }

    fn ensure(&mut self) -> Result<&mut arboard::Clipboard> {
        if self.inner.is_none() {
            self.inner =
                Some(arboard::Clipboard::new().context("System clipboard unavailable")?);
        }
        self.inner.as_mut().context("System clipboard unavailable")
    }
}

impl Clipboard for SystemClipboard {
    fn set(&mut self, text: &str) -> Result<&'static str> {
        self.ensure()?
            .set_text(text)
            .context("Failed to set system clipboard")?;
        Ok("system")
    }
}

/// Writes OSC 52 sequences to a terminal stream.
pub struct Osc52<W> {
    out: W,
}

impl<W: Write> Osc52<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Clipboard for Osc52<W> {
    fn set(&mut self, text: &str) -> Result<&'static str> {
        copy(&mut self.out, text)?;
        Ok("osc52")
    }
}

/// Tries `primary`, then `fallback`.
pub struct WithFallback<P, F> {
    primary: P,
    fallback: F,
}

impl<P: Clipboard, F: Clipboard> WithFallback<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: Clipboard, F: Clipboard> Clipboard for WithFallback<P, F> {
    fn set(&mut self, text: &str) -> Result<&'static str> {
        match self.primary.set(text) {
            Ok(via) => Ok(via),
            Err(err) => {
                tracing::debug!(error = %format!("{:#}", err), "falling back to OSC 52");
                self.fallback.set(text)
            }
        }
    }
}

/// The OSC 52 sequence that places `text` on the clipboard.
pub fn osc52_sequence(text: &str) -> String {
    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}

/// Write the clipboard sequence for `text` to `out`.
pub fn copy(out: &mut dyn Write, text: &str) -> Result<()> {
    out.write_all(osc52_sequence(text).as_bytes())
        .context("Failed to write clipboard sequence")?;
    out.flush().context("Failed to flush clipboard sequence")?;
    Ok(())
}
