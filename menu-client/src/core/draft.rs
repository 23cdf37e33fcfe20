//! Draft engine: field-wise reconciliation between an edited menu and its
//! server snapshot
//!
//! The engine holds two copies of the editable field set: the `draft` the
//! owner mutates and the `snapshot` last confirmed by the backend. Edits
//! land synchronously on the draft; the changed-field set is recomputed
//! after a short debounce window and published on a watch channel. Saving
//! is all-or-nothing: one confirmation prompt, pending assets uploaded,
//! then a single create-or-update call, and only on success do draft and
//! snapshot converge on the authoritative record.

use super::collaborators::{AssetStorage, AuthGateway, ConfirmPrompt, MenuRepository};
use crate::utils::diff::detect_changes;
use shared::models::{AssetField, FieldKey, MenuFields, MenuPayload, ServiceTag, WeekHours};
use shared::util::now_millis;
use shared::{AppError, AppResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;

/// Edits within this window coalesce into one changed-set publication
const DEBOUNCE_WINDOW: Duration = Duration::from_millis(150);

/// A single-field edit applied to the draft
#[derive(Debug, Clone)]
pub enum FieldPatch {
    Title(String),
    Description(String),
    BackgroundColor(String),
    TitleColor(String),
    DetailsColor(String),
    Banner(AssetField),
    Logo(AssetField),
    Slug(String),
    Services(Vec<ServiceTag>),
    Hours(WeekHours),
}

impl FieldPatch {
    pub fn key(&self) -> FieldKey {
        match self {
            Self::Title(_) => FieldKey::Title,
            Self::Description(_) => FieldKey::Description,
            Self::BackgroundColor(_) => FieldKey::BackgroundColor,
            Self::TitleColor(_) => FieldKey::TitleColor,
            Self::DetailsColor(_) => FieldKey::DetailsColor,
            Self::Banner(_) => FieldKey::Banner,
            Self::Logo(_) => FieldKey::Logo,
            Self::Slug(_) => FieldKey::Slug,
            Self::Services(_) => FieldKey::Services,
            Self::Hours(_) => FieldKey::Hours,
        }
    }

    fn apply(self, fields: &mut MenuFields) {
        match self {
            Self::Title(v) => fields.title = v,
            Self::Description(v) => fields.description = v,
            Self::BackgroundColor(v) => fields.background_color = v,
            Self::TitleColor(v) => fields.title_color = v,
            Self::DetailsColor(v) => fields.details_color = v,
            Self::Banner(v) => fields.banner = v,
            Self::Logo(v) => fields.logo = v,
            Self::Slug(v) => fields.slug = v,
            Self::Services(v) => fields.services = v,
            Self::Hours(v) => fields.hours = v,
        }
    }
}

#[derive(Default)]
struct DraftState {
    owner_id: Option<String>,
    record_id: Option<String>,
    /// What is currently loaded: `record:{id}` or `new:{owner}`. Reloading
    /// the same identity must not clobber in-flight edits.
    loaded_identity: Option<String>,
    draft: Option<MenuFields>,
    snapshot: Option<MenuFields>,
    debounce: Option<JoinHandle<()>>,
}

struct DraftShared {
    auth: Arc<dyn AuthGateway>,
    repo: Arc<dyn MenuRepository>,
    assets: Arc<dyn AssetStorage>,
    confirm: Arc<dyn ConfirmPrompt>,
    state: RwLock<DraftState>,
    changed_tx: watch::Sender<Vec<FieldKey>>,
    saving: AtomicBool,
}

/// Resets the saving flag when a save attempt ends, success or not
struct SaveGuard<'a>(&'a AtomicBool);

impl Drop for SaveGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[derive(Clone)]
pub struct DraftEngine {
    shared: Arc<DraftShared>,
}

impl DraftEngine {
    pub fn new(
        auth: Arc<dyn AuthGateway>,
        repo: Arc<dyn MenuRepository>,
        assets: Arc<dyn AssetStorage>,
        confirm: Arc<dyn ConfirmPrompt>,
    ) -> Self {
        let (changed_tx, _) = watch::channel(Vec::new());
        Self {
            shared: Arc::new(DraftShared {
                auth,
                repo,
                assets,
                confirm,
                state: RwLock::new(DraftState::default()),
                changed_tx,
                saving: AtomicBool::new(false),
            }),
        }
    }

    /// Load (or reload) the owner's menu into the editor.
    ///
    /// Reloading while the same record is already loaded is a no-op, so
    /// navigation back into the editor never clobbers in-flight edits. A
    /// different identity (other owner, or the record now exists) resets
    /// draft and snapshot.
    pub async fn load_owner_menu(&self, owner_id: &str) -> AppResult<()> {
        let record = self.shared.repo.fetch_owner_menu(owner_id).await?;
        let identity = match record.as_ref().and_then(|r| r.id.as_deref()) {
            Some(id) => format!("record:{id}"),
            None => format!("new:{owner_id}"),
        };

        let mut state = self.shared.state.write().await;
        if state.loaded_identity.as_deref() == Some(identity.as_str()) {
            tracing::debug!(identity, "menu already loaded, keeping draft");
            return Ok(());
        }

        let fields = match record.as_ref() {
            Some(record) => MenuFields::from_record(record),
            None => MenuFields::default(),
        };
        state.owner_id = Some(owner_id.to_string());
        state.record_id = record.as_ref().and_then(|r| r.id.clone());
        state.loaded_identity = Some(identity);
        state.draft = Some(fields.clone());
        state.snapshot = Some(fields);
        if let Some(handle) = state.debounce.take() {
            handle.abort();
        }
        drop(state);

        self.shared.changed_tx.send_replace(Vec::new());
        Ok(())
    }

    /// Apply one field edit to the draft and schedule a changed-set
    /// recomputation. An edit before any load is a logged no-op.
    pub async fn set_field(&self, patch: FieldPatch) {
        let mut state = self.shared.state.write().await;
        let Some(draft) = state.draft.as_mut() else {
            tracing::warn!(key = %patch.key(), "edit before a menu was loaded");
            return;
        };
        patch.apply(draft);
        self.schedule_recompute(&mut state);
    }

    /// Changed-field set computed immediately, bypassing the debounce
    pub async fn changed_fields(&self) -> Vec<FieldKey> {
        let state = self.shared.state.read().await;
        Self::compute_changes(&state)
    }

    /// Subscribe to debounced changed-set publications
    pub fn subscribe(&self) -> watch::Receiver<Vec<FieldKey>> {
        self.shared.changed_tx.subscribe()
    }

    /// Restore a single field to its snapshot value
    pub async fn revert_field(&self, key: FieldKey) {
        let mut state = self.shared.state.write().await;
        let DraftState {
            draft: Some(draft),
            snapshot: Some(snapshot),
            ..
        } = &mut *state
        else {
            return;
        };
        draft.copy_field_from(snapshot, key);
        self.schedule_recompute(&mut state);
    }

    /// Restore the whole draft to the snapshot, behind a confirmation
    /// prompt. Returns whether the revert happened.
    pub async fn revert_all(&self) -> bool {
        if !self.shared.confirm.confirm("Discard all changes?").await {
            return false;
        }

        let mut state = self.shared.state.write().await;
        let Some(snapshot) = state.snapshot.clone() else {
            return false;
        };
        state.draft = Some(snapshot);
        if let Some(handle) = state.debounce.take() {
            handle.abort();
        }
        drop(state);

        self.shared.changed_tx.send_replace(Vec::new());
        true
    }

    /// Whether a save attempt is currently in flight
    pub fn is_saving(&self) -> bool {
        self.shared.saving.load(Ordering::SeqCst)
    }

    /// Save the full draft: confirmation prompt, pending asset uploads,
    /// then one create-or-update call.
    ///
    /// Returns `Ok(false)` when nothing was attempted (save already in
    /// flight, or the owner cancelled); `Ok(true)` after draft and snapshot
    /// converged on the authoritative record. Any failure leaves both
    /// sides exactly as they were.
    pub async fn save_all(&self) -> AppResult<bool> {
        if self
            .shared
            .saving
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("save already in flight");
            return Ok(false);
        }
        let _guard = SaveGuard(&self.shared.saving);

        if !self.shared.confirm.confirm("Save all changes?").await {
            return Ok(false);
        }

        let actor = self
            .shared
            .auth
            .current_actor()
            .await
            .ok_or_else(AppError::not_authenticated)?;

        let (owner_id, record_id, draft) = {
            let state = self.shared.state.read().await;
            let owner_id = state
                .owner_id
                .clone()
                .ok_or_else(|| AppError::invalid_request("no menu loaded"))?;
            let draft = state
                .draft
                .clone()
                .ok_or_else(|| AppError::invalid_request("no menu loaded"))?;
            (owner_id, state.record_id.clone(), draft)
        };
        if actor.id != owner_id {
            return Err(AppError::permission_denied("not the owner of this menu"));
        }

        let banner_url = self.resolve_asset(&draft.banner, &owner_id, "banner").await?;
        let logo_url = self.resolve_asset(&draft.logo, &owner_id, "logo").await?;

        let payload = MenuPayload {
            title: draft.title.clone(),
            description: draft.description.clone(),
            background_color: draft.background_color.clone(),
            title_color: draft.title_color.clone(),
            details_color: draft.details_color.clone(),
            banner_url,
            logo_url,
            slug: draft.slug.clone(),
            services: draft.services.clone(),
            hours: draft.hours.clone(),
            updated_at: now_millis(),
        };

        let saved = match record_id.as_deref() {
            Some(id) => self.shared.repo.update_menu(id, &payload).await?,
            None => self.shared.repo.create_menu(&owner_id, &payload).await?,
        };

        let fields = MenuFields::from_record(&saved);
        let mut state = self.shared.state.write().await;
        state.record_id = saved.id.clone();
        state.loaded_identity = saved.id.as_deref().map(|id| format!("record:{id}"));
        state.draft = Some(fields.clone());
        state.snapshot = Some(fields);
        if let Some(handle) = state.debounce.take() {
            handle.abort();
        }
        drop(state);

        self.shared.changed_tx.send_replace(Vec::new());
        tracing::info!(record_id = ?saved.id, "menu saved");
        Ok(true)
    }

    async fn resolve_asset(
        &self,
        field: &AssetField,
        owner_id: &str,
        slot: &str,
    ) -> AppResult<Option<String>> {
        match field {
            AssetField::Empty => Ok(None),
            AssetField::Remote { url } => Ok(Some(url.clone())),
            AssetField::Pending { asset } => {
                let hint = format!("menus/{owner_id}/{slot}/{}", asset.file_name);
                let url = self.shared.assets.upload(asset, &hint).await?;
                Ok(Some(url))
            }
        }
    }

    fn compute_changes(state: &DraftState) -> Vec<FieldKey> {
        match (&state.draft, &state.snapshot) {
            (Some(draft), Some(snapshot)) => detect_changes(
                &draft.to_value_map(),
                &snapshot.to_value_map(),
                &FieldKey::ALL,
            ),
            _ => Vec::new(),
        }
    }

    /// Abort any pending recomputation and start the debounce window over.
    fn schedule_recompute(&self, state: &mut DraftState) {
        if let Some(handle) = state.debounce.take() {
            handle.abort();
        }
        let shared = self.shared.clone();
        state.debounce = Some(tokio::spawn(async move {
            tokio::time::sleep(DEBOUNCE_WINDOW).await;
            let changed = {
                let state = shared.state.read().await;
                Self::compute_changes(&state)
            };
            shared.changed_tx.send_replace(changed);
        }));
    }
}
