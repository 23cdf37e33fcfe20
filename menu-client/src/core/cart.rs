//! Multi-tenant cart engine
//!
//! Tracks, per establishment, the lines a visiting customer intends to
//! order. All transitions are synchronous; after every mutation the whole
//! structure is persisted to durable client storage, best-effort. The cart
//! is ephemeral UX state, not a durability-critical ledger: a failed write
//! is logged and the in-memory mutation stands.

use super::storage::ClientStorage;
use rust_decimal::Decimal;
use shared::models::{CartLine, CartSnapshot};
use shared::{AppError, AppResult, ErrorCode};
use std::sync::Arc;

/// Fixed storage key for the whole cart structure
pub const CART_STORAGE_KEY: &str = "menu.cart.v1";

pub struct CartEngine {
    carts: CartSnapshot,
    storage: Arc<dyn ClientStorage>,
}

impl CartEngine {
    /// Rehydrate the cart from durable storage.
    ///
    /// A missing or corrupt snapshot starts an empty cart (logged, not
    /// surfaced).
    pub fn load(storage: Arc<dyn ClientStorage>) -> Self {
        let carts = match storage.read(CART_STORAGE_KEY) {
            Some(text) => match serde_json::from_str::<CartSnapshot>(&text) {
                Ok(carts) => carts,
                Err(e) => {
                    tracing::warn!("discarding corrupt cart snapshot: {}", e);
                    CartSnapshot::new()
                }
            },
            None => CartSnapshot::new(),
        };
        Self { carts, storage }
    }

    /// Add a line to an establishment's cart.
    ///
    /// A line with the same identity (product, additionals, note) merges by
    /// summing quantities; otherwise the line is appended.
    pub fn add_item(&mut self, establishment_id: &str, line: CartLine) -> AppResult<()> {
        if establishment_id.is_empty() {
            return Err(AppError::validation("establishment id must not be empty"));
        }
        if line.quantity == 0 {
            return Err(AppError::with_message(
                ErrorCode::QuantityInvalid,
                "quantity must be at least 1",
            ));
        }

        let cart = self.carts.entry(establishment_id.to_string()).or_default();
        let id = line.instance_id();
        match cart.items.iter_mut().find(|l| l.instance_id() == id) {
            Some(existing) => existing.quantity += line.quantity,
            None => cart.items.push(line),
        }

        self.persist();
        Ok(())
    }

    /// Set the quantity of the line at `index`, clamped to >= 0.
    ///
    /// A result of 0 removes the line; removing the last line removes the
    /// establishment key. An unknown establishment or index is a logged
    /// no-op.
    pub fn update_quantity(&mut self, establishment_id: &str, index: usize, quantity: i64) {
        // saturate, never truncate: an oversized value must not wrap to 0
        let quantity = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);
        let Some(cart) = self.carts.get_mut(establishment_id) else {
            tracing::warn!(establishment_id, "update_quantity on unknown establishment");
            return;
        };
        if index >= cart.items.len() {
            tracing::warn!(establishment_id, index, "update_quantity index out of range");
            return;
        }

        if quantity == 0 {
            cart.items.remove(index);
        } else {
            cart.items[index].quantity = quantity;
        }

        if cart.items.is_empty() {
            self.carts.remove(establishment_id);
        }
        self.persist();
    }

    /// Remove the line at `index`; same empty-cart cleanup as above.
    pub fn remove(&mut self, establishment_id: &str, index: usize) {
        let Some(cart) = self.carts.get_mut(establishment_id) else {
            return;
        };
        if index >= cart.items.len() {
            tracing::warn!(establishment_id, index, "remove index out of range");
            return;
        }
        cart.items.remove(index);
        if cart.items.is_empty() {
            self.carts.remove(establishment_id);
        }
        self.persist();
    }

    /// Drop an establishment's cart entirely
    pub fn clear(&mut self, establishment_id: &str) {
        if self.carts.remove(establishment_id).is_some() {
            self.persist();
        }
    }

    /// Reset the whole structure (global resets only, not per-tenant UI)
    pub fn clear_all(&mut self) {
        self.carts.clear();
        self.persist();
    }

    /// Snapshot of an establishment's lines (defensive copy)
    pub fn lines(&self, establishment_id: &str) -> Vec<CartLine> {
        self.carts
            .get(establishment_id)
            .map(|c| c.items.clone())
            .unwrap_or_default()
    }

    /// Sum of quantities across an establishment's lines
    pub fn total_item_count(&self, establishment_id: &str) -> u32 {
        self.carts
            .get(establishment_id)
            .map(|c| c.items.iter().map(|l| l.quantity).sum())
            .unwrap_or(0)
    }

    /// Sum of `quantity * (unit_price + additionals)` across the lines
    pub fn total_price(&self, establishment_id: &str) -> Decimal {
        self.carts
            .get(establishment_id)
            .map(|c| c.items.iter().map(CartLine::line_total).sum())
            .unwrap_or_default()
    }

    /// Whether any establishment key is present
    pub fn is_empty(&self) -> bool {
        self.carts.is_empty()
    }

    fn persist(&self) {
        match serde_json::to_string(&self.carts) {
            Ok(text) => {
                if let Err(e) = self.storage.write(CART_STORAGE_KEY, &text) {
                    tracing::warn!("cart persistence failed: {}", e);
                }
            }
            Err(e) => tracing::warn!("cart serialization failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStorage;
    use shared::models::Additional;

    fn engine() -> (CartEngine, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        (CartEngine::load(storage.clone()), storage)
    }

    fn line(product_id: &str, quantity: u32, note: &str, additionals: Vec<Additional>) -> CartLine {
        CartLine {
            product_id: product_id.to_string(),
            name: format!("Item {product_id}"),
            image: None,
            unit_price: Decimal::new(2000, 2),
            quantity,
            additionals,
            note: if note.is_empty() {
                None
            } else {
                Some(note.to_string())
            },
        }
    }

    fn cheese() -> Additional {
        Additional {
            name: "cheese".to_string(),
            price: Decimal::new(300, 2),
        }
    }

    #[test]
    fn test_merge_same_identity() {
        let (mut cart, _) = engine();
        cart.add_item("t1", line("p1", 1, "", vec![cheese()])).unwrap();
        cart.add_item("t1", line("p1", 2, "", vec![cheese()])).unwrap();

        let lines = cart.lines("t1");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 3);
    }

    #[test]
    fn test_distinct_notes_do_not_merge() {
        let (mut cart, _) = engine();
        cart.add_item("t1", line("x", 1, "A", vec![])).unwrap();
        cart.add_item("t1", line("x", 1, "B", vec![])).unwrap();
        assert_eq!(cart.lines("t1").len(), 2);
    }

    #[test]
    fn test_distinct_additionals_do_not_merge() {
        let (mut cart, _) = engine();
        cart.add_item("t1", line("x", 1, "", vec![])).unwrap();
        cart.add_item("t1", line("x", 1, "", vec![cheese()])).unwrap();
        assert_eq!(cart.lines("t1").len(), 2);
    }

    #[test]
    fn test_add_item_validation() {
        let (mut cart, _) = engine();
        assert!(cart.add_item("", line("p1", 1, "", vec![])).is_err());
        let err = cart.add_item("t1", line("p1", 0, "", vec![])).unwrap_err();
        assert_eq!(err.code, ErrorCode::QuantityInvalid);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals_scenario() {
        let (mut cart, _) = engine();
        cart.add_item("t1", line("p1", 2, "", vec![cheese()])).unwrap();
        assert_eq!(cart.total_item_count("t1"), 2);
        // 2 * (20.00 + 3.00) = 46.00
        assert_eq!(cart.total_price("t1"), Decimal::new(4600, 2));
    }

    #[test]
    fn test_quantity_zero_removes_line_and_key() {
        let (mut cart, _) = engine();
        cart.add_item("t1", line("p1", 2, "", vec![])).unwrap();
        cart.update_quantity("t1", 0, 0);
        assert!(cart.lines("t1").is_empty());
        // key gone, not present with []
        assert!(cart.is_empty());
    }

    #[test]
    fn test_negative_quantity_clamps_to_removal() {
        let (mut cart, _) = engine();
        cart.add_item("t1", line("p1", 2, "", vec![])).unwrap();
        cart.update_quantity("t1", 0, -5);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_oversized_quantity_saturates() {
        let (mut cart, _) = engine();
        cart.add_item("t1", line("p1", 2, "", vec![])).unwrap();

        // 2^32 must not wrap to 0 and delete the line
        cart.update_quantity("t1", 0, 1 << 32);
        let lines = cart.lines("t1");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, u32::MAX);

        // 2^32 + 5 clamps the same way, it does not become 5
        cart.update_quantity("t1", 0, (1i64 << 32) + 5);
        assert_eq!(cart.lines("t1")[0].quantity, u32::MAX);
    }

    #[test]
    fn test_remove_keeps_other_lines() {
        let (mut cart, _) = engine();
        cart.add_item("t1", line("p1", 1, "", vec![])).unwrap();
        cart.add_item("t1", line("p2", 1, "", vec![])).unwrap();
        cart.remove("t1", 0);
        let lines = cart.lines("t1");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product_id, "p2");
    }

    #[test]
    fn test_clear_is_per_tenant() {
        let (mut cart, _) = engine();
        cart.add_item("t1", line("p1", 1, "", vec![])).unwrap();
        cart.add_item("t2", line("p2", 1, "", vec![])).unwrap();
        cart.clear("t1");
        assert!(cart.lines("t1").is_empty());
        assert_eq!(cart.lines("t2").len(), 1);
        cart.clear_all();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let (mut cart, _) = engine();
        cart.add_item("t1", line("p1", 1, "", vec![])).unwrap();
        cart.update_quantity("t1", 5, 1);
        cart.remove("t1", 5);
        cart.update_quantity("nope", 0, 1);
        assert_eq!(cart.lines("t1").len(), 1);
    }

    #[test]
    fn test_lines_is_defensive_copy() {
        let (mut cart, _) = engine();
        cart.add_item("t1", line("p1", 1, "", vec![])).unwrap();
        let mut copy = cart.lines("t1");
        copy[0].quantity = 99;
        copy.clear();
        assert_eq!(cart.lines("t1")[0].quantity, 1);
    }

    #[test]
    fn test_round_trip_persistence() {
        let (mut cart, storage) = engine();
        cart.add_item("t1", line("p1", 2, "no onion", vec![cheese()])).unwrap();
        cart.add_item("t1", line("p2", 1, "", vec![])).unwrap();
        cart.add_item("t2", line("p3", 3, "", vec![cheese()])).unwrap();

        let restored = CartEngine::load(storage);
        assert_eq!(restored.lines("t1"), cart.lines("t1"));
        assert_eq!(restored.lines("t2"), cart.lines("t2"));
        assert_eq!(restored.total_price("t2"), cart.total_price("t2"));
    }

    #[test]
    fn test_corrupt_snapshot_starts_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.write(CART_STORAGE_KEY, "not json at all").unwrap();
        let cart = CartEngine::load(storage);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_write_failure_does_not_roll_back() {
        struct FailingStorage;
        impl ClientStorage for FailingStorage {
            fn read(&self, _key: &str) -> Option<String> {
                None
            }
            fn write(&self, _key: &str, _value: &str) -> AppResult<()> {
                Err(AppError::storage("disk full"))
            }
        }

        let mut cart = CartEngine::load(Arc::new(FailingStorage));
        cart.add_item("t1", line("p1", 1, "", vec![])).unwrap();
        assert_eq!(cart.total_item_count("t1"), 1);
    }
}
