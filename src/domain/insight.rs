//! Exploratory aggregates over listing and claim snapshots.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::snapshot::{ClaimSnapshot, ListingSnapshot};

/// Default look-ahead for near-expiry items, in days.
pub const DEFAULT_NEAR_EXPIRY_DAYS: i64 = 7;

/// Default number of foods in the top-foods ranking.
pub const DEFAULT_TOP_FOODS: usize = 10;

/// Headline numbers for a (possibly city-filtered) snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Kpis {
    pub total_quantity: i64,
    pub listings: usize,
    pub claims: usize,
    pub completed_claims: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoodQuantity {
    pub food_name: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityListings {
    pub city: String,
    pub listings: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearExpiry {
    pub food_id: i32,
    pub provider_id: i32,
    pub food_name: String,
    pub city: String,
    pub quantity: i64,
    pub expiry_date: NaiveDate,
    pub days_left: i64,
}

/// Keep only snapshots from `city`; `None` keeps everything.
#[must_use]
pub fn filter_listings_by_city(
    listings: Vec<ListingSnapshot>,
    city: Option<&str>,
) -> Vec<ListingSnapshot> {
    match city {
        Some(city) => listings.into_iter().filter(|l| l.city == city).collect(),
        None => listings,
    }
}

#[must_use]
pub fn filter_claims_by_city(claims: Vec<ClaimSnapshot>, city: Option<&str>) -> Vec<ClaimSnapshot> {
    match city {
        Some(city) => claims.into_iter().filter(|c| c.city == city).collect(),
        None => claims,
    }
}

#[must_use]
pub fn kpis(listings: &[ListingSnapshot], claims: &[ClaimSnapshot]) -> Kpis {
    Kpis {
        total_quantity: listings.iter().map(|l| l.quantity).sum(),
        listings: listings.len(),
        claims: claims.len(),
        completed_claims: claims.iter().filter(|c| c.is_completed()).count(),
    }
}

/// Total quantity per food name, largest first, at most `limit` entries.
#[must_use]
pub fn top_foods(listings: &[ListingSnapshot], limit: usize) -> Vec<FoodQuantity> {
    let mut totals: HashMap<&str, i64> = HashMap::new();
    for listing in listings {
        *totals.entry(listing.food_name.as_str()).or_default() += listing.quantity;
    }

    let mut foods: Vec<FoodQuantity> = totals
        .into_iter()
        .map(|(food_name, quantity)| FoodQuantity {
            food_name: food_name.to_string(),
            quantity,
        })
        .collect();
    foods.sort_by(|a, b| {
        b.quantity
            .cmp(&a.quantity)
            .then_with(|| a.food_name.cmp(&b.food_name))
    });
    foods.truncate(limit);
    foods
}

/// Listing count per city, largest first.
#[must_use]
pub fn listings_by_city(listings: &[ListingSnapshot]) -> Vec<CityListings> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for listing in listings {
        *counts.entry(listing.city.as_str()).or_default() += 1;
    }

    let mut cities: Vec<CityListings> = counts
        .into_iter()
        .map(|(city, listings)| CityListings {
            city: city.to_string(),
            listings,
        })
        .collect();
    cities.sort_by(|a, b| b.listings.cmp(&a.listings).then_with(|| a.city.cmp(&b.city)));
    cities
}

/// Claim count per stored status, largest first.
#[must_use]
pub fn status_distribution(claims: &[ClaimSnapshot]) -> Vec<StatusCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for claim in claims {
        *counts.entry(claim.status.as_str()).or_default() += 1;
    }

    let mut statuses: Vec<StatusCount> = counts
        .into_iter()
        .map(|(status, count)| StatusCount {
            status: status.to_string(),
            count,
        })
        .collect();
    statuses.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.status.cmp(&b.status)));
    statuses
}

/// Listings expiring between `today` and `today + horizon_days`, both inclusive.
///
/// Sorted by days left, then by quantity descending. Already expired listings
/// are not included here; they still appear in the risk ranking.
#[must_use]
pub fn near_expiry(
    listings: &[ListingSnapshot],
    today: NaiveDate,
    horizon_days: i64,
) -> Vec<NearExpiry> {
    let horizon = today + Duration::days(horizon_days.max(0));

    let mut soon: Vec<NearExpiry> = listings
        .iter()
        .filter_map(|listing| {
            let expiry_date = listing.expiry_date?;
            (expiry_date >= today && expiry_date <= horizon).then(|| NearExpiry {
                food_id: listing.food_id,
                provider_id: listing.provider_id,
                food_name: listing.food_name.clone(),
                city: listing.city.clone(),
                quantity: listing.quantity,
                expiry_date,
                days_left: (expiry_date - today).num_days(),
            })
        })
        .collect();

    soon.sort_by(|a, b| {
        a.days_left
            .cmp(&b.days_left)
            .then_with(|| b.quantity.cmp(&a.quantity))
    });
    soon
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn listing(id: i32, name: &str, qty: i64, days: Option<i64>, city: &str) -> ListingSnapshot {
        ListingSnapshot {
            food_id: id,
            provider_id: 1,
            food_name: name.to_string(),
            quantity: qty,
            expiry_date: days.map(|d| today() + Duration::days(d)),
            city: city.to_string(),
        }
    }

    fn claim(id: i32, status: &str, city: &str) -> ClaimSnapshot {
        ClaimSnapshot {
            claim_id: id,
            food_id: 1,
            receiver_id: 1,
            status: status.to_string(),
            timestamp: "2026-10-01 09:00:00".to_string(),
            food_name: Some("Rice".to_string()),
            quantity: Some(3),
            city: city.to_string(),
        }
    }

    #[test]
    fn kpis_count_completed_claims() {
        let listings = vec![
            listing(1, "Rice", 4, Some(1), "Pune"),
            listing(2, "Dal", 6, None, "Pune"),
        ];
        let claims = vec![
            claim(1, "Completed", "Pune"),
            claim(2, "Pending", "Pune"),
            claim(3, "completed", "Pune"),
        ];
        assert_eq!(
            kpis(&listings, &claims),
            Kpis {
                total_quantity: 10,
                listings: 2,
                claims: 3,
                completed_claims: 2,
            }
        );
    }

    #[test]
    fn kpis_of_nothing_are_zero() {
        assert_eq!(kpis(&[], &[]), Kpis::default());
    }

    #[test]
    fn top_foods_sums_and_limits() {
        let listings = vec![
            listing(1, "Rice", 4, None, "Pune"),
            listing(2, "Dal", 6, None, "Pune"),
            listing(3, "Rice", 5, None, "Delhi"),
            listing(4, "Soup", 1, None, "Delhi"),
        ];
        let foods = top_foods(&listings, 2);
        assert_eq!(foods.len(), 2);
        assert_eq!(foods[0].food_name, "Rice");
        assert_eq!(foods[0].quantity, 9);
        assert_eq!(foods[1].food_name, "Dal");
    }

    #[test]
    fn city_filter_applies_to_both_snapshots() {
        let listings = vec![
            listing(1, "Rice", 4, None, "Pune"),
            listing(2, "Dal", 6, None, "Delhi"),
        ];
        let claims = vec![claim(1, "Pending", "Delhi")];

        assert_eq!(filter_listings_by_city(listings.clone(), Some("Pune")).len(), 1);
        assert_eq!(filter_listings_by_city(listings, None).len(), 2);
        assert!(filter_claims_by_city(claims, Some("Pune")).is_empty());
    }

    #[test]
    fn listings_by_city_sorted_by_count() {
        let listings = vec![
            listing(1, "Rice", 4, None, "Pune"),
            listing(2, "Dal", 6, None, "Delhi"),
            listing(3, "Soup", 6, None, "Delhi"),
        ];
        let cities = listings_by_city(&listings);
        assert_eq!(cities[0].city, "Delhi");
        assert_eq!(cities[0].listings, 2);
        assert_eq!(cities[1].city, "Pune");
    }

    #[test]
    fn status_distribution_counts_each_status() {
        let claims = vec![
            claim(1, "Pending", "Pune"),
            claim(2, "Completed", "Pune"),
            claim(3, "Pending", "Pune"),
        ];
        let statuses = status_distribution(&claims);
        assert_eq!(statuses[0].status, "Pending");
        assert_eq!(statuses[0].count, 2);
        assert_eq!(statuses[1].count, 1);
    }

    #[test]
    fn near_expiry_window_is_inclusive_and_sorted() {
        let listings = vec![
            listing(1, "Expired", 9, Some(-1), "Pune"),
            listing(2, "Today small", 1, Some(0), "Pune"),
            listing(3, "Today big", 8, Some(0), "Pune"),
            listing(4, "Edge", 2, Some(7), "Pune"),
            listing(5, "Later", 2, Some(8), "Pune"),
            listing(6, "Undated", 2, None, "Pune"),
        ];
        let soon = near_expiry(&listings, today(), DEFAULT_NEAR_EXPIRY_DAYS);
        let ids: Vec<i32> = soon.iter().map(|s| s.food_id).collect();
        assert_eq!(ids, vec![3, 2, 4]);
        assert_eq!(soon[2].days_left, 7);
    }
}
