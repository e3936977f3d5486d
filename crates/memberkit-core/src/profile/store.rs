//! Profile store trait.
//!
//! Defines the interface to the authoritative profile record.

use super::model::{ProfilePayload, RawProfile};
use crate::credential::Credential;
use crate::error::Result;
use async_trait::async_trait;

/// Authoritative profile storage, usually a remote API.
///
/// Both operations return the record as the server sees it after the call.
/// Implementations report read problems as `LoadFailure` and write problems
/// as `SaveFailure`; they never sanitize.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetches the profile belonging to the session behind `credential`.
    async fn fetch(&self, credential: &Credential) -> Result<RawProfile>;

    /// Replaces the session's profile with `payload`.
    ///
    /// # Returns
    ///
    /// - `Ok(RawProfile)`: the stored record as returned by the server
    /// - `Err(_)`: the write did not happen (or its outcome is unknown)
    async fn update(&self, credential: &Credential, payload: &ProfilePayload) -> Result<RawProfile>;
}
