//! Service tags offered by an establishment

use serde::{Deserialize, Serialize};

/// Service offered by an establishment, selectable on the menu page
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceTag {
    DineIn,
    Takeout,
    Delivery,
    Reservation,
}

impl ServiceTag {
    pub const ALL: [ServiceTag; 4] = [
        ServiceTag::DineIn,
        ServiceTag::Takeout,
        ServiceTag::Delivery,
        ServiceTag::Reservation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DineIn => "DINE_IN",
            Self::Takeout => "TAKEOUT",
            Self::Delivery => "DELIVERY",
            Self::Reservation => "RESERVATION",
        }
    }
}
