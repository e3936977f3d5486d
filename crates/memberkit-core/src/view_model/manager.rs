//! Profile view model: confirmed record, working draft and edit mode.
//!
//! The manager never performs I/O. Each external call is split into a
//! `begin_*`/`prepare_*` step that hands out a ticket and an `apply_*` step
//! that takes the call's result back. Tickets come from one monotonic
//! counter, so results of superseded requests can be recognized.

use super::mode::EditMode;
use crate::error::{MemberkitError, Result};
use crate::profile::{DraftProfile, ProfileField, ProfilePayload, ProfileRecord, RawProfile};

/// Identifies one profile read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

/// Identifies one profile write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SaveTicket(u64);

/// Everything needed to issue an identity token after a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRequest {
    pub user_id: String,
    load: LoadTicket,
}

/// A profile write ready to be sent to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub ticket: SaveTicket,
    pub payload: ProfilePayload,
}

/// Outcome of feeding a read result back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadApplied {
    /// State replaced. Carries a token request when the loaded `id` is non-empty.
    Applied { token_request: Option<TokenRequest> },
    /// A newer load was issued; result dropped.
    Stale,
}

/// Outcome of feeding a token issuance result back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenApplied {
    Issued,
    /// Issuance failed; the token stays empty for this load cycle.
    Unavailable(MemberkitError),
    /// The profile it was issued for is no longer the one shown.
    Stale,
}

/// Owns the confirmed profile, the draft and the edit-mode flag.
#[derive(Debug, Default)]
pub struct ViewModelManager {
    confirmed: ProfileRecord,
    draft: DraftProfile,
    mode: EditMode,
    next_seq: u64,
    latest_load: Option<u64>,
    applied_load: Option<u64>,
    pending_save: Option<u64>,
}

impl ViewModelManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last server-acknowledged profile.
    pub fn confirmed(&self) -> &ProfileRecord {
        &self.confirmed
    }

    pub fn draft(&self) -> &DraftProfile {
        &self.draft
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditMode::Editing
    }

    /// True once any load has been applied.
    pub fn is_loaded(&self) -> bool {
        self.applied_load.is_some()
    }

    fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn require_editing(&self, operation: &'static str) -> Result<()> {
        if self.is_editing() {
            Ok(())
        } else {
            Err(MemberkitError::invalid_state(operation, self.mode.to_string()))
        }
    }

    // ============================================================================
    // Load
    // ============================================================================

    /// Registers a new profile read. Any older read still in flight becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        let seq = self.next_seq();
        self.latest_load = Some(seq);
        LoadTicket(seq)
    }

    /// Applies the result of the read identified by `ticket`.
    ///
    /// On success the confirmed record and the draft both become the
    /// sanitized server record, with an empty token. On failure nothing
    /// changes and a `LoadFailure` is returned.
    pub fn apply_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<RawProfile>,
    ) -> Result<LoadApplied> {
        if self.latest_load != Some(ticket.0) {
            tracing::debug!("[ViewModel] Dropping stale load result (ticket {})", ticket.0);
            return Ok(LoadApplied::Stale);
        }

        let raw = result.map_err(into_load_failure)?;
        self.confirmed = ProfileRecord::sanitize(raw);
        self.draft = self.confirmed.clone();
        self.applied_load = Some(ticket.0);
        self.pending_save = None;

        let token_request = (!self.confirmed.id.is_empty()).then(|| TokenRequest {
            user_id: self.confirmed.id.clone(),
            load: ticket,
        });

        Ok(LoadApplied::Applied { token_request })
    }

    // ============================================================================
    // Token issuance
    // ============================================================================

    /// Stores an issued token on the confirmed record and the draft.
    ///
    /// Only applies while `request` still belongs to the load currently shown
    /// and the confirmed `id` is unchanged. No other field is touched.
    pub fn apply_token(&mut self, request: &TokenRequest, result: Result<String>) -> TokenApplied {
        if self.applied_load != Some(request.load.0) || self.confirmed.id != request.user_id {
            tracing::debug!(
                "[ViewModel] Dropping token for superseded load (ticket {})",
                request.load.0
            );
            return TokenApplied::Stale;
        }

        match result {
            Ok(token) if !token.is_empty() => {
                self.confirmed.token = token.clone();
                self.draft.token = token;
                TokenApplied::Issued
            }
            Ok(_) => TokenApplied::Unavailable(MemberkitError::token_issuance(
                "provider returned an empty token",
            )),
            Err(err) => TokenApplied::Unavailable(into_token_failure(err)),
        }
    }

    // ============================================================================
    // Editing
    // ============================================================================

    /// Enters edit mode. The draft already equals the confirmed record.
    pub fn begin_edit(&mut self) -> Result<()> {
        if self.is_editing() {
            return Err(MemberkitError::invalid_state("begin_edit", self.mode.to_string()));
        }
        self.mode = EditMode::Editing;
        Ok(())
    }

    /// Writes `value` into the draft. No format validation is done.
    ///
    /// `id` may only be written while the confirmed `id` is still empty.
    pub fn update_field(&mut self, field: ProfileField, value: impl Into<String>) -> Result<()> {
        self.require_editing("update_field")?;

        let value = value.into();
        if field == ProfileField::Id && !self.confirmed.id.is_empty() && value != self.confirmed.id
        {
            return Err(MemberkitError::ImmutableField(field.wire_name().to_string()));
        }

        self.draft.set(field, value);
        Ok(())
    }

    /// Form-boundary variant of [`update_field`](Self::update_field): the key
    /// is parsed by name and a missing value is stored as `""`.
    pub fn update_field_raw(&mut self, key: &str, value: Option<&str>) -> Result<()> {
        self.require_editing("update_field")?;
        let field: ProfileField = key.parse()?;
        self.update_field(field, value.unwrap_or_default())
    }

    /// Discards the draft and leaves edit mode. Calling it again is a no-op.
    pub fn cancel(&mut self) {
        self.draft = self.confirmed.clone();
        self.mode = EditMode::Viewing;
    }

    // ============================================================================
    // Save
    // ============================================================================

    /// Captures the draft's six editable fields for a profile write.
    pub fn prepare_save(&mut self) -> Result<SaveRequest> {
        self.require_editing("save")?;

        let seq = self.next_seq();
        self.pending_save = Some(seq);

        Ok(SaveRequest {
            ticket: SaveTicket(seq),
            payload: self.draft.payload(),
        })
    }

    /// Applies the result of `request`.
    ///
    /// On success the confirmed record becomes the sanitized server record
    /// carrying the token held before the write, the draft is reset to it and
    /// edit mode ends. On failure the draft and edit mode are left exactly as
    /// they were and a `SaveFailure` is returned.
    ///
    /// A superseded write is always a `SaveFailure`, whatever the server
    /// answered. When a reload overtook it, the confirmed record keeps the
    /// reloaded data and, if edit mode is still on for the same `id`, the
    /// request's fields are put back into the draft so they can be saved again.
    pub fn apply_save(&mut self, request: &SaveRequest, result: Result<RawProfile>) -> Result<()> {
        let ticket = request.ticket;
        if self.pending_save != Some(ticket.0) {
            tracing::debug!("[ViewModel] Save result superseded (ticket {})", ticket.0);
            return Err(self.supersede_save(request, result));
        }
        self.pending_save = None;

        let raw = result.map_err(into_save_failure)?;
        let token = std::mem::take(&mut self.confirmed.token);
        self.confirmed = ProfileRecord::sanitize_with_token(raw, token);
        self.draft = self.confirmed.clone();
        self.mode = EditMode::Viewing;

        Ok(())
    }

    fn supersede_save(&mut self, request: &SaveRequest, result: Result<RawProfile>) -> MemberkitError {
        let outcome = match result {
            Ok(_) => "server stored it".to_string(),
            Err(err) => err.to_string(),
        };

        let reloaded = self.applied_load.is_some_and(|load| load > request.ticket.0);
        if !reloaded {
            return MemberkitError::save_failure(format!("superseded by a newer save ({})", outcome));
        }

        if self.is_editing() && request.payload.id == self.confirmed.id {
            self.draft.apply_payload(&request.payload);
            MemberkitError::save_failure(format!(
                "superseded by a reload ({}); edits kept in the draft",
                outcome
            ))
        } else {
            MemberkitError::save_failure(format!("superseded by a reload ({})", outcome))
        }
    }
}

fn into_load_failure(err: MemberkitError) -> MemberkitError {
    match err {
        MemberkitError::LoadFailure(_) => err,
        other => MemberkitError::load_failure(other.to_string()),
    }
}

fn into_save_failure(err: MemberkitError) -> MemberkitError {
    match err {
        MemberkitError::SaveFailure(_) => err,
        other => MemberkitError::save_failure(other.to_string()),
    }
}

fn into_token_failure(err: MemberkitError) -> MemberkitError {
    match err {
        MemberkitError::TokenIssuance(_) => err,
        other => MemberkitError::token_issuance(other.to_string()),
    }
}
