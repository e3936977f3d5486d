//! Identity panel controller.
//!
//! Owns the panel visibility flag and resolves which string gets encoded
//! into the membership code.

use super::clipboard::Clipboard;
use crate::error::{MemberkitError, Result};
use crate::profile::ProfileRecord;

/// Message shown after a successful copy.
pub const COPY_CONFIRMATION: &str = "Token copied to clipboard";

/// Result of a successful `copy_token`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyConfirmation {
    /// The exact string written to the clipboard
    pub value: String,
    pub message: &'static str,
}

/// Panel state. Independent of edit mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityPanel {
    visible: bool,
}

impl IdentityPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Flips visibility and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    /// The issued token if there is one, otherwise the raw identifier.
    ///
    /// `None` only when neither is set, i.e. no profile has been loaded.
    pub fn display_token(record: &ProfileRecord) -> Option<&str> {
        if record.has_token() {
            Some(record.token.as_str())
        } else if !record.id.is_empty() {
            Some(record.id.as_str())
        } else {
            None
        }
    }

    /// Copies [`display_token`](Self::display_token) to `clipboard`.
    ///
    /// Does not touch panel state on either outcome.
    pub fn copy_token(
        &self,
        record: &ProfileRecord,
        clipboard: &dyn Clipboard,
    ) -> Result<CopyConfirmation> {
        let value = Self::display_token(record)
            .ok_or_else(|| MemberkitError::clipboard("no profile loaded, nothing to copy"))?;

        clipboard.write_text(value)?;

        Ok(CopyConfirmation {
            value: value.to_string(),
            message: COPY_CONFIRMATION,
        })
    }
}
