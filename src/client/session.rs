/**
 * Document Session
 *
 * Client-side state machine for one open document. It owns two copies of the
 * content:
 *
 * - `authoritative` - what the local user last typed or last accepted from
 *   the relay; this is what gets saved and emitted
 * - `display` - what the editor widget should currently show
 *
 * Applying a remote change sets both copies and arms a suppression flag so
 * the editor's own programmatic change notification is not re-emitted back
 * to the relay. Without the flag, two connected editors would bounce the
 * same change between each other forever.
 *
 * Local edits are debounced through a [`ChangeEmitter`]; nothing is emitted
 * until the session has a slug, and never while the session is locked.
 */

use std::time::Duration;

use tokio::sync::mpsc;

use crate::client::api::ShareLinkApi;
use crate::client::debounce::{ChangeEmitter, OutboundChange, DEFAULT_DEBOUNCE};
use crate::shared::access::evaluate_parts;
use crate::shared::api::{ShareView, UpdateShareRequest};
use crate::shared::record::{JsonShareMode, ShareAccessType};
use crate::shared::ShareError;

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No document loaded yet (fresh editor, or a locked link before unlock)
    Idle,
    /// Document loaded and editable per its access rules
    Loaded,
    /// A save request is in flight
    Saving,
}

/// Client-side state for one open document
pub struct DocumentSession {
    slug: Option<String>,
    phase: SessionPhase,
    authoritative: String,
    display: String,
    mode: JsonShareMode,
    locked: bool,
    can_edit: bool,
    access_type: ShareAccessType,
    is_private: bool,
    is_owner: bool,
    password: Option<String>,
    suppress_next_change: bool,
    emitter: ChangeEmitter,
}

impl DocumentSession {
    /// Create an empty session with the default debounce delay
    pub fn new() -> (Self, mpsc::UnboundedReceiver<OutboundChange>) {
        Self::with_debounce(DEFAULT_DEBOUNCE)
    }

    /// Create an empty session with a custom debounce delay
    pub fn with_debounce(delay: Duration) -> (Self, mpsc::UnboundedReceiver<OutboundChange>) {
        let (emitter, rx) = ChangeEmitter::new(delay);
        (
            Self {
                slug: None,
                phase: SessionPhase::Idle,
                authoritative: String::new(),
                display: String::new(),
                mode: JsonShareMode::default(),
                locked: false,
                can_edit: true,
                access_type: ShareAccessType::default(),
                is_private: false,
                is_owner: false,
                password: None,
                suppress_next_change: false,
                emitter,
            },
            rx,
        )
    }

    /// Load an accessible document into the session
    pub fn open_loaded(&mut self, slug: &str, view: &ShareView, is_owner: bool) {
        let decision = evaluate_parts(view.is_private, view.access_type, is_owner, false);
        self.slug = Some(slug.to_string());
        self.phase = SessionPhase::Loaded;
        self.authoritative = view.content.clone();
        self.display = view.content.clone();
        self.mode = view.mode;
        self.locked = decision.is_locked;
        self.can_edit = decision.can_edit;
        self.access_type = view.access_type;
        self.is_private = view.is_private;
        self.is_owner = is_owner;
        self.suppress_next_change = false;
    }

    /// Point the session at a private link that has not been unlocked
    ///
    /// Content stays empty and the session is locked; no changes are emitted
    /// until [`unlock`](Self::unlock) succeeds.
    pub fn open_locked(&mut self, slug: &str) {
        self.slug = Some(slug.to_string());
        self.phase = SessionPhase::Idle;
        self.authoritative.clear();
        self.display.clear();
        self.locked = true;
        self.can_edit = false;
        self.is_private = true;
        self.is_owner = false;
        self.suppress_next_change = false;
        self.emitter.cancel();
    }

    /// Attach a freshly created slug to an unsaved session
    pub fn attach_slug(&mut self, slug: &str, is_owner: bool) {
        self.slug = Some(slug.to_string());
        self.phase = SessionPhase::Loaded;
        self.is_owner = is_owner;
    }

    /// Record a change coming from the editor widget
    ///
    /// Programmatic changes caused by [`apply_remote`](Self::apply_remote)
    /// are swallowed once; everything else updates the authoritative copy
    /// and, when a joinable room exists, schedules a debounced emission.
    pub fn handle_editor_change(&mut self, new_content: &str) {
        if self.suppress_next_change {
            self.suppress_next_change = false;
            return;
        }

        self.authoritative = new_content.to_string();
        self.display = new_content.to_string();

        if self.locked {
            return;
        }
        if let Some(slug) = &self.slug {
            self.emitter.schedule(slug.clone(), new_content.to_string());
        }
    }

    /// Apply content received from the relay
    ///
    /// Updates both copies and arms the suppression flag so the editor's
    /// resulting change notification is not echoed back.
    pub fn apply_remote(&mut self, content: &str) {
        if self.locked {
            return;
        }
        self.suppress_next_change = true;
        self.authoritative = content.to_string();
        self.display = content.to_string();
    }

    /// Unlock the session with the server's revealed view
    pub fn unlock(&mut self, view: &ShareView, password: &str) {
        let decision = evaluate_parts(view.is_private, view.access_type, self.is_owner, true);
        self.phase = SessionPhase::Loaded;
        self.authoritative = view.content.clone();
        self.display = view.content.clone();
        self.mode = view.mode;
        self.locked = false;
        self.can_edit = decision.can_edit;
        self.access_type = view.access_type;
        self.is_private = view.is_private;
        self.password = Some(password.to_string());
        self.suppress_next_change = false;
    }

    /// Change the sharing settings to be persisted on the next save
    pub fn configure_sharing(
        &mut self,
        is_private: bool,
        access_type: ShareAccessType,
        password: Option<String>,
    ) {
        self.is_private = is_private;
        self.access_type = access_type;
        if password.is_some() {
            self.password = password;
        }
        if !is_private {
            self.password = None;
        }
    }

    /// Persist the current content and sharing settings
    ///
    /// On failure the session returns to `Loaded` with its content intact so
    /// the user can retry.
    pub async fn save(&mut self, api: &ShareLinkApi) -> Result<(), ShareError> {
        let Some(slug) = self.slug.clone() else {
            return Err(ShareError::not_found(""));
        };

        self.phase = SessionPhase::Saving;
        let request = UpdateShareRequest {
            content: self.authoritative.clone(),
            mode: self.mode,
            is_private: self.is_private,
            access_type: Some(self.access_type),
            password: self.password.clone(),
        };

        let result = api.update(&slug, &request).await;
        self.phase = SessionPhase::Loaded;
        result
    }

    /// Whether the realtime connection should join a room for this session
    pub fn should_join_room(&self) -> bool {
        self.slug.is_some() && !self.locked
    }

    /// Cancel pending emissions and detach from the document
    pub fn teardown(&mut self) {
        self.emitter.cancel();
        self.slug = None;
        self.phase = SessionPhase::Idle;
        self.suppress_next_change = false;
    }

    /// Room slug, if the session is attached to one
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Content to show in the editor widget
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Content the session would save or emit
    pub fn content(&self) -> &str {
        &self.authoritative
    }

    /// Current view mode
    pub fn mode(&self) -> JsonShareMode {
        self.mode
    }

    /// Whether the document is still password-gated
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Whether the local user may edit
    pub fn can_edit(&self) -> bool {
        self.can_edit
    }

    /// Whether this machine created the link
    pub fn is_owner(&self) -> bool {
        self.is_owner
    }

    /// Whether a debounced change is waiting to be emitted
    pub fn has_pending_emit(&self) -> bool {
        self.emitter.has_pending()
    }
}
