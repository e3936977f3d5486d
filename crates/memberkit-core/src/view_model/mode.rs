use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the profile form is showing confirmed data or accepting edits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    #[default]
    Viewing,
    Editing,
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditMode::Viewing => f.write_str("viewing"),
            EditMode::Editing => f.write_str("editing"),
        }
    }
}
