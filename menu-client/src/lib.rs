//! Client engines for the menu platform
//!
//! Two cooperating state machines living in a single client session:
//! the per-establishment shopping cart ([`CartEngine`]) and the owner-side
//! draft reconciliation engine ([`DraftEngine`]), plus the optimistic
//! catalog CRUD engine and the checkout message builder.
//!
//! All network and platform concerns (auth, the hosted backend, asset
//! storage, confirmation prompts, durable client storage) are injected
//! through the traits in [`core::collaborators`] and [`core::storage`].

pub mod core;
pub mod utils;

pub use crate::core::cart::CartEngine;
pub use crate::core::catalog::CatalogEngine;
pub use crate::core::draft::{DraftEngine, FieldPatch};
