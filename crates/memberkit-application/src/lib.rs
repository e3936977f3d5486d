//! Application layer for memberkit.
//!
//! Drives the core view model against the profile store, token provider and
//! clipboard, and reports outcomes as `ProfileEvent`s.

pub mod profile_usecase;

pub use profile_usecase::{LoadOutcome, ProfileUseCase};
