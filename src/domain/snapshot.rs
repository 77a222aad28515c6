//! In-memory snapshots that the analytics functions consume.
//!
//! A snapshot is what the read side materialized at one point in time:
//! listings joined with their provider's city, and claims joined with the
//! listing they target. The heuristics never touch storage.

use chrono::NaiveDate;
use serde::Serialize;

use super::entity::parse_expiry_date;

/// City label used when a listing's provider is missing.
pub const UNKNOWN_CITY: &str = "Unknown";

/// A food listing joined with its provider's city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingSnapshot {
    pub food_id: i32,
    pub provider_id: i32,
    pub food_name: String,
    pub quantity: i64,
    pub expiry_date: Option<NaiveDate>,
    pub city: String,
}

impl ListingSnapshot {
    /// Build a snapshot from raw stored values; an unparseable expiry becomes `None`.
    #[must_use]
    pub fn from_raw(
        food_id: i32,
        provider_id: i32,
        food_name: impl Into<String>,
        quantity: i64,
        expiry_date: Option<&str>,
        city: Option<String>,
    ) -> Self {
        Self {
            food_id,
            provider_id,
            food_name: food_name.into(),
            quantity,
            expiry_date: expiry_date.and_then(parse_expiry_date),
            city: city.unwrap_or_else(|| UNKNOWN_CITY.to_string()),
        }
    }
}

/// A claim joined with the listing it targets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimSnapshot {
    pub claim_id: i32,
    pub food_id: i32,
    pub receiver_id: i32,
    /// Stored status text; not validated so legacy rows still count.
    pub status: String,
    pub timestamp: String,
    pub food_name: Option<String>,
    pub quantity: Option<i64>,
    pub city: String,
}

impl ClaimSnapshot {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status.eq_ignore_ascii_case("completed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_defaults_city_and_drops_bad_dates() {
        let snapshot = ListingSnapshot::from_raw(1, 2, "Rice", 5, Some("tomorrow"), None);
        assert_eq!(snapshot.city, UNKNOWN_CITY);
        assert_eq!(snapshot.expiry_date, None);
    }

    #[test]
    fn completed_status_is_case_insensitive() {
        let claim = ClaimSnapshot {
            claim_id: 1,
            food_id: 1,
            receiver_id: 1,
            status: "completed".to_string(),
            timestamp: "2026-01-01 10:00:00".to_string(),
            food_name: None,
            quantity: None,
            city: UNKNOWN_CITY.to_string(),
        };
        assert!(claim.is_completed());
    }
}
