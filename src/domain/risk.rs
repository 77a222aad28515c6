//! Waste-risk scoring for food listings.
//!
//! Listings that are both large and close to expiry are the most likely to
//! go to waste. The score combines the two:
//!
//! ```text
//! q_norm     = quantity / max(max_quantity, 1)
//! risk_score = round(q_norm * (1 / max(days_to_expiry, 1)), 3)
//! ```
//!
//! Listings already past their expiry date are clamped to one day and so rank
//! alongside items expiring today. Listings without a usable expiry date are
//! dropped before normalization so they cannot skew `max_quantity`.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use foodbridge::domain::risk::rank_waste_risk;
//! use foodbridge::domain::snapshot::ListingSnapshot;
//!
//! let today = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
//! let listings = vec![
//!     ListingSnapshot::from_raw(1, 1, "Soup", 10, Some("2026-05-01"), None),
//!     ListingSnapshot::from_raw(2, 1, "Bread", 2, Some("2026-05-06"), None),
//! ];
//!
//! let ranked = rank_waste_risk(&listings, today, 10);
//! assert_eq!(ranked[0].food_id, 1);
//! assert_eq!(ranked[0].risk_score, 1.0);
//! assert_eq!(ranked[1].risk_score, 0.04);
//! ```

use chrono::NaiveDate;
use serde::Serialize;

use super::snapshot::ListingSnapshot;

/// Default number of listings returned by [`rank_waste_risk`].
pub const DEFAULT_RISK_TOP_N: usize = 10;

/// A scored listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub food_id: i32,
    pub provider_id: i32,
    pub food_name: String,
    pub city: String,
    pub quantity: i64,
    pub expiry_date: NaiveDate,
    /// Raw difference to today; negative for expired listings.
    pub days_to_expiry: i64,
    pub quantity_norm: f64,
    pub risk_score: f64,
}

impl RiskAssessment {
    /// Days used as the score denominator, never below one.
    #[must_use]
    pub fn effective_days(&self) -> i64 {
        self.days_to_expiry.max(1)
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.days_to_expiry < 0
    }
}

/// Score every listing with a usable expiry date and return the `top_n`
/// highest risks, highest first. Ties keep their input order.
#[must_use]
pub fn rank_waste_risk(
    listings: &[ListingSnapshot],
    today: NaiveDate,
    top_n: usize,
) -> Vec<RiskAssessment> {
    let dated: Vec<(&ListingSnapshot, NaiveDate)> = listings
        .iter()
        .filter_map(|listing| listing.expiry_date.map(|date| (listing, date)))
        .collect();

    let max_quantity = dated
        .iter()
        .map(|(listing, _)| listing.quantity)
        .max()
        .unwrap_or(0)
        .max(1);

    let mut scored: Vec<RiskAssessment> = dated
        .into_iter()
        .map(|(listing, expiry_date)| {
            let days_to_expiry = (expiry_date - today).num_days();
            let quantity_norm = listing.quantity.max(0) as f64 / max_quantity as f64;
            let urgency = 1.0 / days_to_expiry.max(1) as f64;
            let risk_score = round_to(quantity_norm * urgency, 3);
            RiskAssessment {
                food_id: listing.food_id,
                provider_id: listing.provider_id,
                food_name: listing.food_name.clone(),
                city: listing.city.clone(),
                quantity: listing.quantity,
                expiry_date,
                days_to_expiry,
                quantity_norm,
                risk_score,
            }
        })
        .collect();

    scored.sort_by(|left, right| right.risk_score.total_cmp(&left.risk_score));
    scored.truncate(top_n);
    scored
}

/// Round half to even at the given number of decimals.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
