//! Catalog engine: optimistic CRUD over categories and items
//!
//! Local state mutates before the backend confirms (temp-id rows for
//! creates, in-place patches for updates). The state lock is never held
//! across the network call: readers see the optimistic row while the call
//! is in flight, and a rejected call rolls back just that row. Accessors
//! hand out clones, never references into the lock.

use super::collaborators::CatalogRepository;
use super::optimistic::apply_optimistic;
use shared::models::{
    MenuCategory, MenuCategoryCreate, MenuCategoryUpdate, MenuItem, MenuItemCreate, MenuItemUpdate,
};
use shared::{AppError, AppResult, ErrorCode};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
struct CatalogState {
    categories: Vec<MenuCategory>,
    items: Vec<MenuItem>,
}

pub struct CatalogEngine {
    repo: Arc<dyn CatalogRepository>,
    state: RwLock<CatalogState>,
}

fn temp_id() -> String {
    format!("temp-{}", Uuid::new_v4())
}

impl CatalogEngine {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self {
            repo,
            state: RwLock::new(CatalogState::default()),
        }
    }

    /// Replace local state with the backend's current rows
    pub async fn refresh(&self) -> AppResult<()> {
        let categories = self.repo.list_categories().await?;
        let items = self.repo.list_items().await?;
        let mut state = self.state.write().await;
        state.categories = categories;
        state.items = items;
        Ok(())
    }

    /// Categories sorted by their display order
    pub async fn categories(&self) -> Vec<MenuCategory> {
        let state = self.state.read().await;
        let mut categories = state.categories.clone();
        categories.sort_by_key(|c| c.sort_order);
        categories
    }

    pub async fn items(&self) -> Vec<MenuItem> {
        self.state.read().await.items.clone()
    }

    pub async fn items_in(&self, category_id: &str) -> Vec<MenuItem> {
        self.state
            .read()
            .await
            .items
            .iter()
            .filter(|i| i.category == category_id)
            .cloned()
            .collect()
    }

    pub async fn create_category(&self, create: MenuCategoryCreate) -> AppResult<MenuCategory> {
        let placeholder = MenuCategory {
            id: temp_id(),
            name: create.name.clone(),
            sort_order: create.sort_order.unwrap_or(0),
        };
        let placeholder_id = placeholder.id.clone();
        let rollback_id = placeholder_id.clone();

        apply_optimistic(
            &self.state,
            move |s| s.categories.push(placeholder),
            self.repo.create_category(&create),
            move |s, created| {
                if let Some(slot) = s.categories.iter_mut().find(|c| c.id == placeholder_id) {
                    *slot = created.clone();
                }
            },
            move |s| s.categories.retain(|c| c.id != rollback_id),
        )
        .await
    }

    pub async fn update_category(
        &self,
        id: &str,
        update: MenuCategoryUpdate,
    ) -> AppResult<MenuCategory> {
        let prior = {
            let state = self.state.read().await;
            state.categories.iter().find(|c| c.id == id).cloned()
        }
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::CategoryNotFound, format!("category {id} not loaded"))
        })?;

        apply_optimistic(
            &self.state,
            |s| {
                if let Some(c) = s.categories.iter_mut().find(|c| c.id == id) {
                    update.apply_to(c);
                }
            },
            self.repo.update_category(id, &update),
            |s, updated| {
                if let Some(slot) = s.categories.iter_mut().find(|c| c.id == id) {
                    *slot = updated.clone();
                }
            },
            move |s| {
                if let Some(slot) = s.categories.iter_mut().find(|c| c.id == id) {
                    *slot = prior;
                }
            },
        )
        .await
    }

    /// Delete a category. Refused while loaded items still reference it.
    pub async fn delete_category(&self, id: &str) -> AppResult<()> {
        let prior = {
            let state = self.state.read().await;
            if state.items.iter().any(|i| i.category == id) {
                return Err(AppError::with_message(
                    ErrorCode::CategoryHasItems,
                    "move or delete the category's items first",
                ));
            }
            state.categories.iter().find(|c| c.id == id).cloned()
        };

        apply_optimistic(
            &self.state,
            |s| s.categories.retain(|c| c.id != id),
            self.repo.delete_category(id),
            |_s, _| {},
            move |s| {
                if let Some(prior) = prior {
                    s.categories.push(prior);
                }
            },
        )
        .await
    }

    pub async fn create_item(&self, create: MenuItemCreate) -> AppResult<MenuItem> {
        let placeholder = MenuItem {
            id: temp_id(),
            category: create.category.clone(),
            name: create.name.clone(),
            description: create.description.clone(),
            price: create.price,
            image: create.image.clone(),
            additionals: create.additionals.clone().unwrap_or_default(),
            is_active: true,
        };
        let placeholder_id = placeholder.id.clone();
        let rollback_id = placeholder_id.clone();

        apply_optimistic(
            &self.state,
            move |s| s.items.push(placeholder),
            self.repo.create_item(&create),
            move |s, created| {
                if let Some(slot) = s.items.iter_mut().find(|i| i.id == placeholder_id) {
                    *slot = created.clone();
                }
            },
            move |s| s.items.retain(|i| i.id != rollback_id),
        )
        .await
    }

    pub async fn update_item(&self, id: &str, update: MenuItemUpdate) -> AppResult<MenuItem> {
        let prior = {
            let state = self.state.read().await;
            state.items.iter().find(|i| i.id == id).cloned()
        }
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::ItemNotFound, format!("item {id} not loaded"))
        })?;

        apply_optimistic(
            &self.state,
            |s| {
                if let Some(i) = s.items.iter_mut().find(|i| i.id == id) {
                    update.apply_to(i);
                }
            },
            self.repo.update_item(id, &update),
            |s, updated| {
                if let Some(slot) = s.items.iter_mut().find(|i| i.id == id) {
                    *slot = updated.clone();
                }
            },
            move |s| {
                if let Some(slot) = s.items.iter_mut().find(|i| i.id == id) {
                    *slot = prior;
                }
            },
        )
        .await
    }

    pub async fn delete_item(&self, id: &str) -> AppResult<()> {
        let prior = {
            let state = self.state.read().await;
            state.items.iter().find(|i| i.id == id).cloned()
        };

        apply_optimistic(
            &self.state,
            |s| s.items.retain(|i| i.id != id),
            self.repo.delete_item(id),
            |_s, _| {},
            move |s| {
                if let Some(prior) = prior {
                    s.items.push(prior);
                }
            },
        )
        .await
    }
}
