//! Editable profile field keys.

use crate::error::MemberkitError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six fields a profile form edits.
///
/// Naming across layers:
///
/// | Rust variant | wire (server) | view (camelCase) |
/// |--------------|---------------|------------------|
/// | `Id`         | `id`          | `id`             |
/// | `Username`   | `username`    | `username`       |
/// | `FullName`   | `full_name`   | `fullName`       |
/// | `Email`      | `email`       | `email`          |
/// | `Phone`      | `phone`       | `phone`          |
/// | `Goal`       | `goal`        | `goal`           |
///
/// `FromStr` accepts either the wire or the view spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Id,
    Username,
    FullName,
    Email,
    Phone,
    Goal,
}

impl ProfileField {
    /// All editable fields, in payload order.
    pub const ALL: [ProfileField; 6] = [
        ProfileField::Id,
        ProfileField::Username,
        ProfileField::FullName,
        ProfileField::Email,
        ProfileField::Phone,
        ProfileField::Goal,
    ];

    /// Key used on the wire by the profile store.
    pub fn wire_name(self) -> &'static str {
        match self {
            ProfileField::Id => "id",
            ProfileField::Username => "username",
            ProfileField::FullName => "full_name",
            ProfileField::Email => "email",
            ProfileField::Phone => "phone",
            ProfileField::Goal => "goal",
        }
    }

    /// Key used in view snapshots.
    pub fn view_name(self) -> &'static str {
        match self {
            ProfileField::FullName => "fullName",
            other => other.wire_name(),
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for ProfileField {
    type Err = MemberkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        ProfileField::ALL
            .into_iter()
            .find(|field| field.wire_name() == key || field.view_name() == key)
            .ok_or_else(|| MemberkitError::UnknownField(key.to_string()))
    }
}
