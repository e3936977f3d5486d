use super::manager::ViewModelManager;
use super::mode::EditMode;
use crate::identity::IdentityPanel;
use crate::profile::{DraftProfile, ProfileRecord};
use serde::{Deserialize, Serialize};

/// Read-only snapshot handed to a rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub profile: ProfileRecord,
    pub draft: DraftProfile,
    pub mode: EditMode,
    pub token_panel_visible: bool,
    /// Value to encode into the membership code, if any profile is loaded
    pub display_token: Option<String>,
}

impl ProfileView {
    pub fn capture(manager: &ViewModelManager, panel: &IdentityPanel) -> Self {
        Self {
            profile: manager.confirmed().clone(),
            draft: manager.draft().clone(),
            mode: manager.mode(),
            token_panel_visible: panel.is_visible(),
            display_token: IdentityPanel::display_token(manager.confirmed()).map(str::to_string),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditMode::Editing
    }
}
