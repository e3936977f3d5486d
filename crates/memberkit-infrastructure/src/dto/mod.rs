//! Data transfer objects for the HTTP collaborators.

mod profile;

pub use profile::{TOKEN_RESPONSE_POINTER, UserDto, UserEnvelope, token_from_response};
