//! Profile domain model and ingestion sanitization.

use super::field::ProfileField;
use serde::{Deserialize, Serialize};

/// Profile exactly as an external source delivered it.
///
/// Every field may be absent. Nothing reads a `RawProfile` directly; it must
/// pass through [`ProfileRecord::sanitize`] first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProfile {
    pub id: Option<String>,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub goal: Option<String>,
}

/// A sanitized profile plus the identity token issued for its `id`.
///
/// Used both for the confirmed profile and for the working draft. Empty
/// string is the only "unset" value; no field is ever optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    /// Server-assigned identifier
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub goal: String,
    /// Identity token for `id`; not part of the editable field set
    pub token: String,
}

/// In-progress edits. Same shape as the confirmed record.
pub type DraftProfile = ProfileRecord;

impl ProfileRecord {
    /// Coerces every missing field to `""`. The token always starts empty.
    pub fn sanitize(raw: RawProfile) -> Self {
        Self {
            id: raw.id.unwrap_or_default(),
            username: raw.username.unwrap_or_default(),
            full_name: raw.full_name.unwrap_or_default(),
            email: raw.email.unwrap_or_default(),
            phone: raw.phone.unwrap_or_default(),
            goal: raw.goal.unwrap_or_default(),
            token: String::new(),
        }
    }

    /// Same as [`sanitize`](Self::sanitize) but carries `token` over.
    pub fn sanitize_with_token(raw: RawProfile, token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Self::sanitize(raw)
        }
    }

    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Id => &self.id,
            ProfileField::Username => &self.username,
            ProfileField::FullName => &self.full_name,
            ProfileField::Email => &self.email,
            ProfileField::Phone => &self.phone,
            ProfileField::Goal => &self.goal,
        }
    }

    pub(crate) fn set(&mut self, field: ProfileField, value: String) {
        let slot = match field {
            ProfileField::Id => &mut self.id,
            ProfileField::Username => &mut self.username,
            ProfileField::FullName => &mut self.full_name,
            ProfileField::Email => &mut self.email,
            ProfileField::Phone => &mut self.phone,
            ProfileField::Goal => &mut self.goal,
        };
        *slot = value;
    }

    /// Overwrites the six editable fields from `payload`; the token is kept.
    pub(crate) fn apply_payload(&mut self, payload: &ProfilePayload) {
        self.id = payload.id.clone();
        self.username = payload.username.clone();
        self.full_name = payload.full_name.clone();
        self.email = payload.email.clone();
        self.phone = payload.phone.clone();
        self.goal = payload.goal.clone();
    }

    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }

    /// The six editable fields as a write payload. The token is never included.
    pub fn payload(&self) -> ProfilePayload {
        ProfilePayload {
            id: self.id.clone(),
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            goal: self.goal.clone(),
        }
    }
}

/// Flat key-value body for a profile write, keyed by wire names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePayload {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub goal: String,
}

impl ProfilePayload {
    /// Key/value pairs in [`ProfileField::ALL`] order.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        vec![
            (ProfileField::Id.wire_name(), self.id.as_str()),
            (ProfileField::Username.wire_name(), self.username.as_str()),
            (ProfileField::FullName.wire_name(), self.full_name.as_str()),
            (ProfileField::Email.wire_name(), self.email.as_str()),
            (ProfileField::Phone.wire_name(), self.phone.as_str()),
            (ProfileField::Goal.wire_name(), self.goal.as_str()),
        ]
    }
}
