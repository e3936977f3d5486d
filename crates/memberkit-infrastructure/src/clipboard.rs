//! System clipboard backed by `arboard`.

use memberkit_core::identity::Clipboard;
use memberkit_core::{MemberkitError, Result};

/// Writes to the desktop clipboard.
///
/// A fresh `arboard::Clipboard` is opened per write; headless sessions
/// (no display server) surface as a `Clipboard` error.
///
/// On Linux (X11/Wayland) the copied text is served by the process that
/// owns the clipboard and disappears when it exits. A short-lived process
/// should use [`SystemClipboard::waiting`], which blocks the write until
/// another application takes the clipboard over.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard {
    wait_for_handoff: bool,
}

impl SystemClipboard {
    /// Returns as soon as the text is set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Holds the clipboard until it is replaced (Linux only; elsewhere the
    /// system keeps the text after exit and this behaves like `new`).
    pub fn waiting() -> Self {
        Self {
            wait_for_handoff: true,
        }
    }

    /// True when a write blocks until the clipboard is handed off.
    pub fn waits_for_handoff(&self) -> bool {
        self.wait_for_handoff && cfg!(target_os = "linux")
    }

    fn set_text(&self, clipboard: &mut arboard::Clipboard, text: &str) -> std::result::Result<(), arboard::Error> {
        #[cfg(target_os = "linux")]
        if self.wait_for_handoff {
            use arboard::SetExtLinux;
            tracing::debug!("[SystemClipboard] Holding clipboard until it is replaced");
            return clipboard.set().wait().text(text);
        }
        clipboard.set_text(text)
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        arboard::Clipboard::new()
            .and_then(|mut clipboard| self.set_text(&mut clipboard, text))
            .map_err(|e| {
                tracing::warn!("[SystemClipboard] Failed to copy to clipboard: {}", e);
                MemberkitError::clipboard(e.to_string())
            })
    }
}
