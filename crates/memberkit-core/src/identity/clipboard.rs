//! Clipboard trait.

use crate::error::Result;

/// System clipboard (or whatever stands in for it).
pub trait Clipboard: Send + Sync {
    /// Replaces the clipboard contents with `text`.
    fn write_text(&self, text: &str) -> Result<()>;
}
