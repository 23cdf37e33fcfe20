//! Collaborator interfaces consumed by the engines
//!
//! The core owns no network shapes: auth, the hosted backend (menu records
//! and catalog rows), the asset bucket and the confirmation prompt are all
//! injected. Adapters map backend failures onto [`shared::ErrorCode`]s;
//! access-denied failures must arrive as `PermissionDenied` so the UI can
//! distinguish them from generic errors.

use async_trait::async_trait;
use shared::AppResult;
use shared::models::{
    LocalAsset, MenuCategory, MenuCategoryCreate, MenuCategoryUpdate, MenuItem, MenuItemCreate,
    MenuItemUpdate, MenuPayload, MenuRecord,
};

/// The signed-in actor, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
    pub email: Option<String>,
}

/// Auth collaborator: who is signed in right now
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn current_actor(&self) -> Option<Actor>;
}

/// Remote persistence collaborator for menu records
#[async_trait]
pub trait MenuRepository: Send + Sync {
    async fn fetch_owner_menu(&self, owner_id: &str) -> AppResult<Option<MenuRecord>>;
    async fn create_menu(&self, owner_id: &str, payload: &MenuPayload) -> AppResult<MenuRecord>;
    async fn update_menu(&self, id: &str, payload: &MenuPayload) -> AppResult<MenuRecord>;
}

/// Asset storage collaborator
#[async_trait]
pub trait AssetStorage: Send + Sync {
    /// Upload a picked file, returning its stable URL
    async fn upload(&self, asset: &LocalAsset, path_hint: &str) -> AppResult<String>;
}

/// Confirmation prompt collaborator
///
/// A `false` result means the user cancelled; callers must treat it as a
/// full no-op.
#[async_trait]
pub trait ConfirmPrompt: Send + Sync {
    async fn confirm(&self, message: &str) -> bool;
}

/// Remote persistence collaborator for catalog rows
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_categories(&self) -> AppResult<Vec<MenuCategory>>;
    async fn create_category(&self, create: &MenuCategoryCreate) -> AppResult<MenuCategory>;
    async fn update_category(
        &self,
        id: &str,
        update: &MenuCategoryUpdate,
    ) -> AppResult<MenuCategory>;
    async fn delete_category(&self, id: &str) -> AppResult<()>;

    async fn list_items(&self) -> AppResult<Vec<MenuItem>>;
    async fn create_item(&self, create: &MenuItemCreate) -> AppResult<MenuItem>;
    async fn update_item(&self, id: &str, update: &MenuItemUpdate) -> AppResult<MenuItem>;
    async fn delete_item(&self, id: &str) -> AppResult<()>;
}
