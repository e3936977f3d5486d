use serde::{Deserialize, Serialize};

/// Outcomes reported to the UI layer.
///
/// Token issuance failures are deliberately absent: the identifier fallback
/// is the recovery, so there is nothing to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProfileEvent {
    /// A profile read was applied.
    Loaded { user_id: String },
    LoadFailed { message: String },
    /// A profile write was applied and edit mode ended.
    Saved { user_id: String },
    /// A profile write failed; the draft is still there.
    SaveFailed { message: String },
    TokenIssued { user_id: String },
    TokenPanelToggled { visible: bool },
    TokenCopied { message: String },
    CopyFailed { message: String },
}
