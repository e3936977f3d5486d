//! Identity token provider trait.

use crate::error::Result;
use async_trait::async_trait;

/// Issues opaque identity tokens for user identifiers.
///
/// A provider may be down or misconfigured at any time. Callers treat every
/// `Err` as "no token this load cycle" and fall back to the identifier.
#[async_trait]
pub trait IdentityTokenProvider: Send + Sync {
    /// Issues a token for `user_id`.
    ///
    /// # Returns
    ///
    /// - `Ok(token)`: a non-empty token
    /// - `Err(MemberkitError::TokenIssuance)`: provider error, timeout, or a
    ///   response without a token
    async fn issue(&self, user_id: &str) -> Result<String>;
}
