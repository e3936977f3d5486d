//! Domain layer for memberkit.
//!
//! Profile model and sanitization, the view model that reconciles confirmed
//! data with local edits, the identity panel, and the collaborator traits
//! the infrastructure layer implements.

pub mod config;
pub mod credential;
pub mod error;
pub mod event;
pub mod identity;
pub mod profile;
pub mod view_model;

pub use credential::Credential;
pub use error::{MemberkitError, Result};
pub use event::ProfileEvent;
