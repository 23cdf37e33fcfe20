//! Cart models and persisted snapshot shape

use crate::canonical::canonical_string;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Priced add-on/extra attached to a cart line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Additional {
    pub name: String,
    pub price: Decimal,
}

/// One purchasable line in an establishment's cart
///
/// `name`, `image` and `unit_price` are snapshots taken at add-time and are
/// never re-fetched; they are deliberately excluded from line identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Menu item reference
    pub product_id: String,
    /// Display name snapshot at add-time
    pub name: String,
    /// Image URL snapshot at add-time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Unit price snapshot at add-time (excluding additionals)
    pub unit_price: Decimal,
    /// Positive quantity; a line never persists with quantity 0
    pub quantity: u32,
    /// Extras attached at add-time, order-sensitive for identity
    #[serde(default)]
    pub additionals: Vec<Additional>,
    /// Free-text customer comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CartLine {
    /// Content-addressed line identity.
    ///
    /// Two lines are the same line iff `product_id`, the ordered
    /// `additionals` list and the note are all equal. A missing note and an
    /// empty note are the same thing.
    pub fn instance_id(&self) -> String {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        hasher.update(self.product_id.as_bytes());
        hasher.update([0u8]);
        hasher.update(canonical_string(&self.additionals).as_bytes());
        hasher.update([0u8]);
        hasher.update(self.note.as_deref().unwrap_or("").as_bytes());

        hex::encode(hasher.finalize())
    }

    /// Per-unit price including additionals
    pub fn unit_total(&self) -> Decimal {
        self.additionals
            .iter()
            .fold(self.unit_price, |acc, a| acc + a.price)
    }

    /// Line total: `quantity * unit_total`
    pub fn line_total(&self) -> Decimal {
        self.unit_total() * Decimal::from(self.quantity)
    }
}

/// One establishment's persisted cart entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TenantCart {
    pub items: Vec<CartLine>,
}

/// The whole persisted cart structure: establishment id -> cart entry.
///
/// An absent establishment is an empty cart; an entry must never be stored
/// with an empty item list (the engine deletes the key instead).
pub type CartSnapshot = HashMap<String, TenantCart>;
