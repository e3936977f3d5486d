//! HTTP-backed profile store.

use crate::dto::UserEnvelope;
use async_trait::async_trait;
use memberkit_core::config::ServiceConfig;
use memberkit_core::profile::{ProfilePayload, ProfileStore, RawProfile};
use memberkit_core::{Credential, MemberkitError, Result};
use reqwest::{Client, Response};
use std::time::Duration;

/// Profile store that talks to the `edit_profile` endpoint.
///
/// Reads are `GET`, writes are form-encoded `PUT`; both authenticate with the
/// caller's bearer credential and expect `{"user": {...}}` back.
#[derive(Clone)]
pub struct HttpProfileStore {
    client: Client,
    profile_url: String,
}

impl HttpProfileStore {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| MemberkitError::config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, config.profile_url()))
    }

    pub fn with_client(client: Client, profile_url: impl Into<String>) -> Self {
        Self {
            client,
            profile_url: profile_url.into(),
        }
    }

    async fn send_fetch(&self, credential: &Credential) -> Result<RawProfile> {
        let response = self
            .client
            .get(&self.profile_url)
            .bearer_auth(credential.expose())
            .send()
            .await?;
        read_user(response).await
    }

    async fn send_update(&self, credential: &Credential, payload: &ProfilePayload) -> Result<RawProfile> {
        let response = self
            .client
            .put(&self.profile_url)
            .bearer_auth(credential.expose())
            .form(&payload.pairs())
            .send()
            .await?;
        read_user(response).await
    }
}

#[async_trait]
impl ProfileStore for HttpProfileStore {
    async fn fetch(&self, credential: &Credential) -> Result<RawProfile> {
        tracing::debug!("[HttpProfileStore] GET {}", self.profile_url);
        self.send_fetch(credential)
            .await
            .map_err(|e| MemberkitError::load_failure(e.to_string()))
    }

    async fn update(&self, credential: &Credential, payload: &ProfilePayload) -> Result<RawProfile> {
        tracing::debug!("[HttpProfileStore] PUT {}", self.profile_url);
        self.send_update(credential, payload)
            .await
            .map_err(|e| MemberkitError::save_failure(e.to_string()))
    }
}

async fn read_user(response: Response) -> Result<RawProfile> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(MemberkitError::transport(format!(
            "HTTP {}: {}",
            status, error_text
        )));
    }

    let envelope: UserEnvelope = response.json().await?;
    envelope
        .user
        .map(RawProfile::from)
        .ok_or_else(|| MemberkitError::transport("response has no `user` object"))
}
