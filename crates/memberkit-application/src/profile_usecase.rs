//! Profile use case implementation.
//!
//! `ProfileUseCase` runs the view model against its collaborators: it owns
//! the single confirmed/draft pair for a session, performs the three external
//! calls (profile read, profile write, token issuance) and reports every
//! outcome on an optional event channel.
//!
//! Token issuance runs as a separate task so that `load` returns as soon as
//! the profile itself is applied.

use memberkit_core::identity::{Clipboard, CopyConfirmation, IdentityPanel, IdentityTokenProvider};
use memberkit_core::profile::{ProfileField, ProfileRecord, ProfileStore};
use memberkit_core::view_model::{
    LoadApplied, ProfileView, TokenApplied, TokenRequest, ViewModelManager,
};
use memberkit_core::{Credential, ProfileEvent, Result};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// What a `load` call did.
#[derive(Debug)]
pub struct LoadOutcome {
    /// False when a newer load superseded this one.
    pub applied: bool,
    /// Background token issuance, when the loaded profile has an `id`.
    ///
    /// Dropping the handle does not cancel the task.
    pub token_task: Option<JoinHandle<()>>,
}

impl LoadOutcome {
    /// Waits for the token task, if any, to finish.
    pub async fn wait_for_token(self) {
        if let Some(task) = self.token_task {
            if let Err(e) = task.await {
                tracing::warn!("[ProfileUseCase] Token task ended abnormally: {}", e);
            }
        }
    }
}

pub struct ProfileUseCase {
    /// Confirmed profile, draft and edit mode
    view_model: Arc<RwLock<ViewModelManager>>,
    /// Identity panel visibility
    panel: Arc<RwLock<IdentityPanel>>,
    profile_store: Arc<dyn ProfileStore>,
    token_provider: Arc<dyn IdentityTokenProvider>,
    clipboard: Arc<dyn Clipboard>,
    /// Optional channel for UI notifications
    event_sender: Option<UnboundedSender<ProfileEvent>>,
}

impl ProfileUseCase {
    pub fn new(
        profile_store: Arc<dyn ProfileStore>,
        token_provider: Arc<dyn IdentityTokenProvider>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        Self {
            view_model: Arc::new(RwLock::new(ViewModelManager::new())),
            panel: Arc::new(RwLock::new(IdentityPanel::new())),
            profile_store,
            token_provider,
            clipboard,
            event_sender: None,
        }
    }

    /// Routes every `ProfileEvent` to `sender`.
    pub fn with_event_sender(mut self, sender: UnboundedSender<ProfileEvent>) -> Self {
        self.event_sender = Some(sender);
        self
    }

    fn emit(&self, event: ProfileEvent) {
        emit_to(self.event_sender.as_ref(), event);
    }

    // ============================================================================
    // Load and token issuance
    // ============================================================================

    /// Fetches the profile and, on success, replaces confirmed profile and draft.
    ///
    /// Returns once the profile is applied; token issuance continues in the
    /// background. On failure the view model is unchanged and a
    /// `LoadFailure` is returned (and emitted as `LoadFailed`).
    pub async fn load(&self, credential: &Credential) -> Result<LoadOutcome> {
        let ticket = self.view_model.write().await.begin_load();

        let result = self.profile_store.fetch(credential).await;

        let applied = self.view_model.write().await.apply_load(ticket, result);
        match applied {
            Ok(LoadApplied::Applied { token_request }) => {
                let user_id = self.view_model.read().await.confirmed().id.clone();
                tracing::info!("[ProfileUseCase] Profile loaded (user '{}')", user_id);
                self.emit(ProfileEvent::Loaded { user_id });

                Ok(LoadOutcome {
                    applied: true,
                    token_task: token_request.map(|request| self.spawn_token_issuance(request)),
                })
            }
            Ok(LoadApplied::Stale) => Ok(LoadOutcome {
                applied: false,
                token_task: None,
            }),
            Err(e) => {
                tracing::error!("[ProfileUseCase] {}", e);
                self.emit(ProfileEvent::LoadFailed {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    fn spawn_token_issuance(&self, request: TokenRequest) -> JoinHandle<()> {
        let view_model = Arc::clone(&self.view_model);
        let provider = Arc::clone(&self.token_provider);
        let event_sender = self.event_sender.clone();

        tokio::spawn(async move {
            let result = provider.issue(&request.user_id).await;
            let applied = view_model.write().await.apply_token(&request, result);

            match applied {
                TokenApplied::Issued => {
                    tracing::info!(
                        "[ProfileUseCase] Identity token issued for user '{}'",
                        request.user_id
                    );
                    emit_to(
                        event_sender.as_ref(),
                        ProfileEvent::TokenIssued {
                            user_id: request.user_id,
                        },
                    );
                }
                TokenApplied::Unavailable(e) => {
                    // The identifier fallback covers this; nothing is surfaced.
                    tracing::warn!(
                        "[ProfileUseCase] No identity token for user '{}': {}",
                        request.user_id,
                        e
                    );
                }
                TokenApplied::Stale => {
                    tracing::debug!(
                        "[ProfileUseCase] Discarded token for superseded profile '{}'",
                        request.user_id
                    );
                }
            }
        })
    }

    // ============================================================================
    // Editing
    // ============================================================================

    pub async fn begin_edit(&self) -> Result<()> {
        self.view_model.write().await.begin_edit()
    }

    pub async fn update_field(&self, field: ProfileField, value: impl Into<String>) -> Result<()> {
        self.view_model.write().await.update_field(field, value)
    }

    /// Updates a field by its wire or view name; `None` is stored as `""`.
    pub async fn update_field_raw(&self, key: &str, value: Option<&str>) -> Result<()> {
        self.view_model.write().await.update_field_raw(key, value)
    }

    pub async fn cancel(&self) {
        self.view_model.write().await.cancel();
    }

    /// Persists the draft.
    ///
    /// On success the confirmed profile becomes the server's record with the
    /// previously held token, and edit mode ends. On failure the draft and
    /// edit mode are untouched and a `SaveFailure` is returned. A write
    /// overtaken by a reload also fails; its edits stay in the draft while
    /// edit mode is still on.
    pub async fn save(&self, credential: &Credential) -> Result<()> {
        let request = self.view_model.write().await.prepare_save()?;

        let result = self
            .profile_store
            .update(credential, &request.payload)
            .await;

        let applied = self
            .view_model
            .write()
            .await
            .apply_save(&request, result);
        match applied {
            Ok(()) => {
                let user_id = self.view_model.read().await.confirmed().id.clone();
                tracing::info!("[ProfileUseCase] Profile saved (user '{}')", user_id);
                self.emit(ProfileEvent::Saved { user_id });
                Ok(())
            }
            Err(e) => {
                tracing::error!("[ProfileUseCase] {}", e);
                self.emit(ProfileEvent::SaveFailed {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    // ============================================================================
    // Identity panel
    // ============================================================================

    /// Flips panel visibility and returns the new value.
    pub async fn toggle_token_panel(&self) -> bool {
        let visible = self.panel.write().await.toggle();
        self.emit(ProfileEvent::TokenPanelToggled { visible });
        visible
    }

    pub async fn display_token(&self) -> Option<String> {
        let view_model = self.view_model.read().await;
        IdentityPanel::display_token(view_model.confirmed()).map(str::to_string)
    }

    /// Copies the display token to the clipboard.
    ///
    /// Failure is reported (returned and emitted as `CopyFailed`) but changes
    /// no state.
    pub async fn copy_token(&self) -> Result<CopyConfirmation> {
        let confirmed = self.view_model.read().await.confirmed().clone();
        let result = self
            .panel
            .read()
            .await
            .copy_token(&confirmed, self.clipboard.as_ref());

        match &result {
            Ok(confirmation) => self.emit(ProfileEvent::TokenCopied {
                message: confirmation.message.to_string(),
            }),
            Err(e) => {
                tracing::warn!("[ProfileUseCase] {}", e);
                self.emit(ProfileEvent::CopyFailed {
                    message: e.to_string(),
                });
            }
        }
        result
    }

    // ============================================================================
    // Snapshots
    // ============================================================================

    pub async fn confirmed(&self) -> ProfileRecord {
        self.view_model.read().await.confirmed().clone()
    }

    pub async fn draft(&self) -> ProfileRecord {
        self.view_model.read().await.draft().clone()
    }

    pub async fn is_editing(&self) -> bool {
        self.view_model.read().await.is_editing()
    }

    pub async fn view(&self) -> ProfileView {
        let view_model = self.view_model.read().await;
        let panel = self.panel.read().await;
        ProfileView::capture(&view_model, &panel)
    }
}

fn emit_to(sender: Option<&UnboundedSender<ProfileEvent>>, event: ProfileEvent) {
    if let Some(sender) = sender {
        // Receiver may be gone; events are advisory
        let _ = sender.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use memberkit_core::MemberkitError;
    use memberkit_core::profile::{ProfilePayload, RawProfile};
    use std::sync::Mutex;
    use tokio::sync::{mpsc, oneshot};

    // Mock ProfileStore for testing
    struct MockProfileStore {
        profile: Mutex<RawProfile>,
        fail_fetch: bool,
        fail_update: Mutex<bool>,
        /// Overrides the write response when set
        update_response: Mutex<Option<RawProfile>>,
        /// When set, the write waits until the sender fires
        update_gate: Mutex<Option<oneshot::Receiver<()>>>,
        updates: Mutex<Vec<ProfilePayload>>,
    }

    impl MockProfileStore {
        fn new(profile: RawProfile) -> Self {
            Self {
                profile: Mutex::new(profile),
                fail_fetch: false,
                fail_update: Mutex::new(false),
                update_response: Mutex::new(None),
                update_gate: Mutex::new(None),
                updates: Mutex::new(Vec::new()),
            }
        }

        fn failing_fetch() -> Self {
            Self {
                fail_fetch: true,
                ..Self::new(RawProfile::default())
            }
        }
    }

    #[async_trait]
    impl ProfileStore for MockProfileStore {
        async fn fetch(&self, credential: &Credential) -> Result<RawProfile> {
            if self.fail_fetch || credential.is_empty() {
                return Err(MemberkitError::load_failure("HTTP 401"));
            }
            Ok(self.profile.lock().unwrap().clone())
        }

        async fn update(&self, _credential: &Credential, payload: &ProfilePayload) -> Result<RawProfile> {
            self.updates.lock().unwrap().push(payload.clone());
            let gate = self.update_gate.lock().unwrap().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            if *self.fail_update.lock().unwrap() {
                return Err(MemberkitError::save_failure("HTTP 503"));
            }
            if let Some(response) = self.update_response.lock().unwrap().clone() {
                return Ok(response);
            }
            let stored = RawProfile {
                id: Some(payload.id.clone()),
                username: Some(payload.username.clone()),
                full_name: Some(payload.full_name.clone()),
                email: Some(payload.email.clone()),
                phone: Some(payload.phone.clone()),
                goal: Some(payload.goal.clone()),
            };
            *self.profile.lock().unwrap() = stored.clone();
            Ok(stored)
        }
    }

    // Mock IdentityTokenProvider for testing
    struct MockTokenProvider {
        token: Option<String>,
        /// When set, issuance waits until the sender fires
        gate: Mutex<Option<oneshot::Receiver<()>>>,
        calls: Mutex<Vec<String>>,
    }

    impl MockTokenProvider {
        fn issuing(token: &str) -> Self {
            Self {
                token: Some(token.to_string()),
                gate: Mutex::new(None),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                token: None,
                ..Self::issuing("")
            }
        }

        fn gated(token: &str) -> (Self, oneshot::Sender<()>) {
            let (tx, rx) = oneshot::channel();
            let provider = Self::issuing(token);
            *provider.gate.lock().unwrap() = Some(rx);
            (provider, tx)
        }
    }

    #[async_trait]
    impl IdentityTokenProvider for MockTokenProvider {
        async fn issue(&self, user_id: &str) -> Result<String> {
            self.calls.lock().unwrap().push(user_id.to_string());
            let gate = self.gate.lock().unwrap().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            self.token
                .clone()
                .ok_or_else(|| MemberkitError::token_issuance("provider unavailable"))
        }
    }

    // Mock Clipboard for testing
    #[derive(Default)]
    struct MockClipboard {
        contents: Mutex<Option<String>>,
        fail: bool,
    }

    impl Clipboard for MockClipboard {
        fn write_text(&self, text: &str) -> Result<()> {
            if self.fail {
                return Err(MemberkitError::clipboard("no display"));
            }
            *self.contents.lock().unwrap() = Some(text.to_string());
            Ok(())
        }
    }

    fn bob() -> RawProfile {
        RawProfile {
            id: Some("u1".to_string()),
            username: Some("bob".to_string()),
            full_name: Some(String::new()),
            email: Some("b@x.com".to_string()),
            phone: None,
            goal: Some("lose weight".to_string()),
        }
    }

    fn credential() -> Credential {
        Credential::bearer("session-abc")
    }

    struct Fixture {
        usecase: ProfileUseCase,
        store: Arc<MockProfileStore>,
        provider: Arc<MockTokenProvider>,
        clipboard: Arc<MockClipboard>,
        events: mpsc::UnboundedReceiver<ProfileEvent>,
    }

    fn fixture(store: MockProfileStore, provider: MockTokenProvider, clipboard: MockClipboard) -> Fixture {
        let store = Arc::new(store);
        let provider = Arc::new(provider);
        let clipboard = Arc::new(clipboard);
        let (tx, rx) = mpsc::unbounded_channel();
        let usecase = ProfileUseCase::new(store.clone(), provider.clone(), clipboard.clone())
            .with_event_sender(tx);
        Fixture {
            usecase,
            store,
            provider,
            clipboard,
            events: rx,
        }
    }

    fn default_fixture() -> Fixture {
        fixture(
            MockProfileStore::new(bob()),
            MockTokenProvider::issuing("QR-123"),
            MockClipboard::default(),
        )
    }

    fn drain(events: &mut mpsc::UnboundedReceiver<ProfileEvent>) -> Vec<ProfileEvent> {
        let mut out = Vec::new();
        while let Ok(event) = events.try_recv() {
            out.push(event);
        }
        out
    }

    #[tokio::test]
    async fn test_load_sanitizes_and_issues_token() {
        let mut f = default_fixture();

        let outcome = f.usecase.load(&credential()).await.unwrap();
        assert!(outcome.applied);
        outcome.wait_for_token().await;

        let confirmed = f.usecase.confirmed().await;
        assert_eq!(confirmed.username, "bob");
        assert_eq!(confirmed.phone, "");
        assert_eq!(confirmed.token, "QR-123");
        assert_eq!(f.usecase.display_token().await.as_deref(), Some("QR-123"));
        assert_eq!(*f.provider.calls.lock().unwrap(), vec!["u1".to_string()]);

        assert_eq!(
            drain(&mut f.events),
            vec![
                ProfileEvent::Loaded {
                    user_id: "u1".to_string()
                },
                ProfileEvent::TokenIssued {
                    user_id: "u1".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_load_returns_before_token_arrives() {
        let (provider, release) = MockTokenProvider::gated("QR-123");
        let f = fixture(MockProfileStore::new(bob()), provider, MockClipboard::default());

        let outcome = f.usecase.load(&credential()).await.unwrap();

        // issuance still pending: identifier is displayed
        assert_eq!(f.usecase.confirmed().await.token, "");
        assert_eq!(f.usecase.display_token().await.as_deref(), Some("u1"));

        release.send(()).unwrap();
        outcome.wait_for_token().await;

        assert_eq!(f.usecase.display_token().await.as_deref(), Some("QR-123"));
    }

    #[tokio::test]
    async fn test_token_failure_is_silent_and_falls_back() {
        let mut f = fixture(
            MockProfileStore::new(bob()),
            MockTokenProvider::failing(),
            MockClipboard::default(),
        );

        f.usecase.load(&credential()).await.unwrap().wait_for_token().await;

        assert_eq!(f.usecase.confirmed().await.token, "");
        assert_eq!(f.usecase.display_token().await.as_deref(), Some("u1"));
        assert_eq!(
            drain(&mut f.events),
            vec![ProfileEvent::Loaded {
                user_id: "u1".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_load_without_id_skips_issuance() {
        let f = fixture(
            MockProfileStore::new(RawProfile {
                username: Some("ghost".to_string()),
                ..Default::default()
            }),
            MockTokenProvider::issuing("QR-123"),
            MockClipboard::default(),
        );

        let outcome = f.usecase.load(&credential()).await.unwrap();

        assert!(outcome.token_task.is_none());
        assert!(f.provider.calls.lock().unwrap().is_empty());
        assert_eq!(f.usecase.display_token().await, None);
    }

    #[tokio::test]
    async fn test_load_failure_is_reported() {
        let mut f = fixture(
            MockProfileStore::failing_fetch(),
            MockTokenProvider::issuing("QR-123"),
            MockClipboard::default(),
        );

        let err = f.usecase.load(&credential()).await.unwrap_err();

        assert!(err.is_load_failure());
        assert_eq!(f.usecase.confirmed().await, ProfileRecord::default());
        assert!(matches!(
            drain(&mut f.events).as_slice(),
            [ProfileEvent::LoadFailed { .. }]
        ));
    }

    #[tokio::test]
    async fn test_failed_save_keeps_draft() {
        let mut f = default_fixture();
        f.usecase.load(&credential()).await.unwrap().wait_for_token().await;
        let confirmed_before = f.usecase.confirmed().await;
        drain(&mut f.events);

        *f.store.fail_update.lock().unwrap() = true;
        f.usecase.begin_edit().await.unwrap();
        f.usecase.update_field(ProfileField::Phone, "555").await.unwrap();

        let err = f.usecase.save(&credential()).await.unwrap_err();

        assert!(err.is_save_failure());
        assert_eq!(f.usecase.draft().await.phone, "555");
        assert!(f.usecase.is_editing().await);
        assert_eq!(f.usecase.confirmed().await, confirmed_before);
        assert!(matches!(
            drain(&mut f.events).as_slice(),
            [ProfileEvent::SaveFailed { .. }]
        ));
    }

    #[tokio::test]
    async fn test_successful_save_preserves_token() {
        let mut f = default_fixture();
        f.usecase.load(&credential()).await.unwrap().wait_for_token().await;
        drain(&mut f.events);

        f.usecase.begin_edit().await.unwrap();
        f.usecase.update_field(ProfileField::Phone, "555").await.unwrap();
        f.usecase.save(&credential()).await.unwrap();

        let confirmed = f.usecase.confirmed().await;
        assert_eq!(confirmed.phone, "555");
        assert_eq!(confirmed.token, "QR-123");
        assert!(!f.usecase.is_editing().await);
        assert_eq!(f.usecase.draft().await, confirmed);

        // token issued once per load, never on save
        assert_eq!(f.provider.calls.lock().unwrap().len(), 1);
        assert_eq!(
            drain(&mut f.events),
            vec![ProfileEvent::Saved {
                user_id: "u1".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_save_ignores_token_in_response() {
        let f = default_fixture();
        f.usecase.load(&credential()).await.unwrap().wait_for_token().await;
        *f.store.update_response.lock().unwrap() = Some(RawProfile {
            goal: Some("maintain".to_string()),
            ..bob()
        });

        f.usecase.begin_edit().await.unwrap();
        f.usecase.update_field(ProfileField::Goal, "maintain").await.unwrap();
        f.usecase.save(&credential()).await.unwrap();

        let sent = f.store.updates.lock().unwrap().last().cloned().unwrap();
        assert_eq!(sent.goal, "maintain");
        assert_eq!(f.usecase.confirmed().await.token, "QR-123");
    }

    #[tokio::test]
    async fn test_cancel_discards_edits() {
        let f = default_fixture();
        f.usecase.load(&credential()).await.unwrap().wait_for_token().await;

        f.usecase.begin_edit().await.unwrap();
        f.usecase.update_field_raw("full_name", Some("Robert")).await.unwrap();
        f.usecase.update_field_raw("email", None).await.unwrap();
        f.usecase.cancel().await;

        assert_eq!(f.usecase.draft().await, f.usecase.confirmed().await);
        assert!(!f.usecase.is_editing().await);
        assert!(f.store.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_panel_and_edit_mode_are_independent() {
        let f = default_fixture();
        f.usecase.load(&credential()).await.unwrap().wait_for_token().await;

        assert!(f.usecase.toggle_token_panel().await);
        f.usecase.begin_edit().await.unwrap();

        let view = f.usecase.view().await;
        assert!(view.is_editing());
        assert!(view.token_panel_visible);

        f.usecase.cancel().await;
        assert!(f.usecase.view().await.token_panel_visible);
    }

    #[tokio::test]
    async fn test_copy_token() {
        let mut f = default_fixture();
        f.usecase.load(&credential()).await.unwrap().wait_for_token().await;
        drain(&mut f.events);

        let confirmation = f.usecase.copy_token().await.unwrap();

        assert_eq!(confirmation.value, "QR-123");
        assert_eq!(f.clipboard.contents.lock().unwrap().as_deref(), Some("QR-123"));
        assert!(matches!(
            drain(&mut f.events).as_slice(),
            [ProfileEvent::TokenCopied { .. }]
        ));
    }

    #[tokio::test]
    async fn test_copy_failure_is_non_fatal() {
        let mut f = fixture(
            MockProfileStore::new(bob()),
            MockTokenProvider::issuing("QR-123"),
            MockClipboard {
                fail: true,
                ..Default::default()
            },
        );
        f.usecase.load(&credential()).await.unwrap().wait_for_token().await;
        f.usecase.toggle_token_panel().await;
        drain(&mut f.events);

        let err = f.usecase.copy_token().await.unwrap_err();

        assert!(err.is_clipboard());
        assert!(f.usecase.view().await.token_panel_visible);
        assert_eq!(f.usecase.confirmed().await.token, "QR-123");
        assert!(matches!(
            drain(&mut f.events).as_slice(),
            [ProfileEvent::CopyFailed { .. }]
        ));
    }

    #[tokio::test]
    async fn test_each_load_issues_token() {
        let f = default_fixture();
        f.usecase.load(&credential()).await.unwrap().wait_for_token().await;
        f.usecase.load(&credential()).await.unwrap().wait_for_token().await;

        assert_eq!(f.provider.calls.lock().unwrap().len(), 2);
        assert_eq!(f.usecase.confirmed().await.token, "QR-123");
    }

    #[tokio::test]
    async fn test_save_overtaken_by_reload_fails_and_keeps_edits() {
        let mut f = default_fixture();
        f.usecase.load(&credential()).await.unwrap().wait_for_token().await;
        drain(&mut f.events);

        let (release, gate) = oneshot::channel();
        *f.store.update_gate.lock().unwrap() = Some(gate);
        f.usecase.begin_edit().await.unwrap();
        f.usecase.update_field(ProfileField::Phone, "555").await.unwrap();

        let credential = credential();
        let (saved, loaded) = tokio::join!(f.usecase.save(&credential), async {
            let outcome = f.usecase.load(&credential).await;
            let _ = release.send(());
            outcome
        });

        loaded.unwrap().wait_for_token().await;
        let err = saved.unwrap_err();
        assert!(err.is_save_failure());
        assert!(err.to_string().contains("superseded by a reload"));

        // reloaded data stays confirmed, the edit survives in the draft
        assert_eq!(f.usecase.confirmed().await.phone, "");
        assert_eq!(f.usecase.draft().await.phone, "555");
        assert!(f.usecase.is_editing().await);

        let events = drain(&mut f.events);
        assert!(events.iter().any(|e| matches!(e, ProfileEvent::SaveFailed { .. })));
        assert!(!events.iter().any(|e| matches!(e, ProfileEvent::Saved { .. })));

        // retrying the kept draft goes through
        f.usecase.save(&credential).await.unwrap();
        assert_eq!(f.usecase.confirmed().await.phone, "555");
    }
}
