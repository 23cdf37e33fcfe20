//! Catalog models: categories and menu items

use super::cart::Additional;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Menu category entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuCategory {
    pub id: String,
    pub name: String,
    pub sort_order: i32,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCategoryCreate {
    pub name: String,
    pub sort_order: Option<i32>,
}

/// Update category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuCategoryUpdate {
    pub name: Option<String>,
    pub sort_order: Option<i32>,
}

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    pub id: String,
    /// Category reference (String id)
    pub category: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image: Option<String>,
    /// Extras a customer may attach to this item
    #[serde(default)]
    pub additionals: Vec<Additional>,
    pub is_active: bool,
}

/// Create item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub category: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image: Option<String>,
    pub additionals: Option<Vec<Additional>>,
}

/// Update item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub category: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub image: Option<String>,
    pub additionals: Option<Vec<Additional>>,
    pub is_active: Option<bool>,
}

impl MenuItemUpdate {
    /// Apply the set fields onto an existing item (optimistic local apply)
    pub fn apply_to(&self, item: &mut MenuItem) {
        if let Some(category) = &self.category {
            item.category = category.clone();
        }
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(description) = &self.description {
            item.description = Some(description.clone());
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(image) = &self.image {
            item.image = Some(image.clone());
        }
        if let Some(additionals) = &self.additionals {
            item.additionals = additionals.clone();
        }
        if let Some(is_active) = self.is_active {
            item.is_active = is_active;
        }
    }
}

impl MenuCategoryUpdate {
    /// Apply the set fields onto an existing category
    pub fn apply_to(&self, category: &mut MenuCategory) {
        if let Some(name) = &self.name {
            category.name = name.clone();
        }
        if let Some(sort_order) = self.sort_order {
            category.sort_order = sort_order;
        }
    }
}
