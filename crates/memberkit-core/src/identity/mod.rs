//! Identity token domain module.
//!
//! - `provider`: `IdentityTokenProvider` trait
//! - `clipboard`: `Clipboard` trait
//! - `panel`: `IdentityPanel` controller (visibility, display token, copy)

mod clipboard;
mod panel;
mod provider;

pub use clipboard::Clipboard;
pub use panel::{COPY_CONFIRMATION, CopyConfirmation, IdentityPanel};
pub use provider::IdentityTokenProvider;
