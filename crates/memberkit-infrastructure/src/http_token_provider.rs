//! HTTP-backed identity token provider.

use crate::dto::token_from_response;
use async_trait::async_trait;
use memberkit_core::config::ServiceConfig;
use memberkit_core::identity::IdentityTokenProvider;
use memberkit_core::{MemberkitError, Result};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct IssueTokenRequest<'a> {
    user_id: &'a str,
}

/// Requests member QR tokens from the `qr/generate` endpoint.
///
/// No credential is sent; the user identifier is the whole request.
#[derive(Clone)]
pub struct HttpIdentityTokenProvider {
    client: Client,
    token_url: String,
}

impl HttpIdentityTokenProvider {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| MemberkitError::config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, config.token_url()))
    }

    pub fn with_client(client: Client, token_url: impl Into<String>) -> Self {
        Self {
            client,
            token_url: token_url.into(),
        }
    }
}

#[async_trait]
impl IdentityTokenProvider for HttpIdentityTokenProvider {
    async fn issue(&self, user_id: &str) -> Result<String> {
        tracing::debug!("[HttpTokenProvider] POST {} for user {}", self.token_url, user_id);

        let response = self
            .client
            .post(&self.token_url)
            .json(&IssueTokenRequest { user_id })
            .send()
            .await
            .map_err(|e| MemberkitError::token_issuance(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MemberkitError::token_issuance(format!("HTTP {}", status)));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| MemberkitError::token_issuance(format!("malformed response: {}", e)))?;

        token_from_response(&body)
            .ok_or_else(|| MemberkitError::token_issuance("response has no token"))
    }
}
