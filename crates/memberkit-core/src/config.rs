use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_PROFILE_PATH: &str = "/api/edit_profile";
pub const DEFAULT_TOKEN_PATH: &str = "/api/qr/generate";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RootConfig {
    #[serde(default)]
    pub service: ServiceConfig,
}

/// Where the profile API lives and how long to wait for it.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_profile_path")]
    pub profile_path: String,
    #[serde(default = "default_token_path")]
    pub token_path: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl ServiceConfig {
    pub fn profile_url(&self) -> String {
        join_url(&self.api_base_url, &self.profile_path)
    }

    pub fn token_url(&self) -> String {
        join_url(&self.api_base_url, &self.token_path)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            profile_path: default_profile_path(),
            token_path: default_token_path(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_profile_path() -> String {
    DEFAULT_PROFILE_PATH.to_string()
}

fn default_token_path() -> String {
    DEFAULT_TOKEN_PATH.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}
