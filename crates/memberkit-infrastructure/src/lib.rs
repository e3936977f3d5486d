//! Infrastructure layer for memberkit.
//!
//! Concrete implementations of the core collaborator traits: the HTTP
//! profile store and token provider, the system clipboard, and config loading.

pub mod clipboard;
pub mod config_service;
pub mod dto;
pub mod http_profile_store;
pub mod http_token_provider;
pub mod paths;

pub use clipboard::SystemClipboard;
pub use config_service::ConfigService;
pub use http_profile_store::HttpProfileStore;
pub use http_token_provider::HttpIdentityTokenProvider;
