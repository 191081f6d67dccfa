use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel id for an item the backend has not assigned an id to yet.
pub const UNPERSISTED_ID: i64 = -1;

/// One marketplace listing, in the backend's wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesItem {
    pub id: i64,
    pub description: String,
    pub price: u32,
    pub seller_email: String,
    pub seller_phone: String,
    /// Unix timestamp in seconds.
    pub time: i64,
    pub picture_url: Option<String>,
}

impl SalesItem {
    /// Build a not-yet-persisted item (`id == -1`). The backend assigns
    /// the real id on create; this value never enters the canonical set.
    pub fn unpersisted(
        description: String,
        price: u32,
        seller_email: String,
        seller_phone: String,
        time: i64,
        picture_url: Option<String>,
    ) -> Self {
        Self {
            id: UNPERSISTED_ID,
            description,
            price,
            seller_email,
            seller_phone,
            time,
            picture_url,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id != UNPERSISTED_ID
    }

    /// Ownership check used by the profile filter; case-insensitive.
    pub fn is_seller(&self, email: &str) -> bool {
        self.seller_email.eq_ignore_ascii_case(email)
    }

    /// Posting time as a UTC timestamp, if the value is representable.
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time, 0)
    }
}

impl fmt::Display for SalesItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}, {}kr", self.id, self.description, self.price)
    }
}
