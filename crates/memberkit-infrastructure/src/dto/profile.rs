//! Wire DTOs for the profile and token endpoints.

use memberkit_core::profile::RawProfile;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// JSON pointer to the token inside an issuance response.
pub const TOKEN_RESPONSE_POINTER: &str = "/data/qr_token";

/// `{"user": {...}}` body returned by both profile read and write.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserEnvelope {
    #[serde(default)]
    pub user: Option<UserDto>,
}

/// Server-side user record.
///
/// Every field is accepted as string, number, bool or null. Non-null
/// scalars are stringified; anything else is treated as missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserDto {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub goal: Option<String>,
}

impl From<UserDto> for RawProfile {
    fn from(dto: UserDto) -> Self {
        RawProfile {
            id: dto.id,
            username: dto.username,
            full_name: dto.full_name,
            email: dto.email,
            phone: dto.phone,
            goal: dto.goal,
        }
    }
}

/// Extracts the token from an issuance response body.
///
/// A missing, non-string or empty value yields `None`.
pub fn token_from_response(body: &Value) -> Option<String> {
    body.pointer(TOKEN_RESPONSE_POINTER)
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}
