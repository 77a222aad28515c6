//! Database model types for Diesel ORM.
//!
//! Row types mirror the tables one-to-one and convert to and from the
//! domain entities. Snapshot rows back the raw joined queries.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer, Nullable, Text};

use super::schema::{claims, food_listings, providers, receivers};
use crate::domain::entity::{
    Claim, ClaimChanges, ClaimStatus, FoodListing, FoodListingChanges, NewClaim, NewFoodListing,
    NewProvider, NewReceiver, Provider, ProviderChanges, Receiver, ReceiverChanges,
    CLAIM_TIMESTAMP_FORMAT, EXPIRY_DATE_FORMAT,
};
use crate::domain::snapshot::{ClaimSnapshot, ListingSnapshot, UNKNOWN_CITY};
use crate::error::{Error, Result};
use crate::port::outbound::report::DashboardTotals;

/// Database row for a provider.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = providers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProviderRow {
    pub provider_id: i32,
    pub name: String,
    pub provider_type: String,
    pub address: String,
    pub city: String,
    pub contact: String,
}

impl From<ProviderRow> for Provider {
    fn from(row: ProviderRow) -> Self {
        Self {
            provider_id: row.provider_id,
            name: row.name,
            provider_type: row.provider_type,
            address: row.address,
            city: row.city,
            contact: row.contact,
        }
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = providers)]
pub struct NewProviderRow<'a> {
    pub name: &'a str,
    pub provider_type: &'a str,
    pub address: &'a str,
    pub city: &'a str,
    pub contact: &'a str,
}

impl<'a> From<&'a NewProvider> for NewProviderRow<'a> {
    fn from(provider: &'a NewProvider) -> Self {
        Self {
            name: &provider.name,
            provider_type: &provider.provider_type,
            address: &provider.address,
            city: &provider.city,
            contact: &provider.contact,
        }
    }
}

/// Partial update; `None` columns are left out of the `SET` clause.
#[derive(AsChangeset, Debug)]
#[diesel(table_name = providers)]
pub struct ProviderChangeset<'a> {
    pub name: Option<&'a str>,
    pub provider_type: Option<&'a str>,
    pub address: Option<&'a str>,
    pub city: Option<&'a str>,
    pub contact: Option<&'a str>,
}

impl<'a> From<&'a ProviderChanges> for ProviderChangeset<'a> {
    fn from(changes: &'a ProviderChanges) -> Self {
        Self {
            name: changes.name.as_deref(),
            provider_type: changes.provider_type.as_deref(),
            address: changes.address.as_deref(),
            city: changes.city.as_deref(),
            contact: changes.contact.as_deref(),
        }
    }
}

/// Database row for a receiver.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = receivers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ReceiverRow {
    pub receiver_id: i32,
    pub name: String,
    pub receiver_type: String,
    pub city: String,
    pub contact: String,
}

impl From<ReceiverRow> for Receiver {
    fn from(row: ReceiverRow) -> Self {
        Self {
            receiver_id: row.receiver_id,
            name: row.name,
            receiver_type: row.receiver_type,
            city: row.city,
            contact: row.contact,
        }
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = receivers)]
pub struct NewReceiverRow<'a> {
    pub name: &'a str,
    pub receiver_type: &'a str,
    pub city: &'a str,
    pub contact: &'a str,
}

impl<'a> From<&'a NewReceiver> for NewReceiverRow<'a> {
    fn from(receiver: &'a NewReceiver) -> Self {
        Self {
            name: &receiver.name,
            receiver_type: &receiver.receiver_type,
            city: &receiver.city,
            contact: &receiver.contact,
        }
    }
}

#[derive(AsChangeset, Debug)]
#[diesel(table_name = receivers)]
pub struct ReceiverChangeset<'a> {
    pub name: Option<&'a str>,
    pub receiver_type: Option<&'a str>,
    pub city: Option<&'a str>,
    pub contact: Option<&'a str>,
}

impl<'a> From<&'a ReceiverChanges> for ReceiverChangeset<'a> {
    fn from(changes: &'a ReceiverChanges) -> Self {
        Self {
            name: changes.name.as_deref(),
            receiver_type: changes.receiver_type.as_deref(),
            city: changes.city.as_deref(),
            contact: changes.contact.as_deref(),
        }
    }
}

/// Database row for a food listing.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = food_listings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FoodListingRow {
    pub food_id: i32,
    pub provider_id: i32,
    pub food_name: String,
    pub quantity: i32,
    pub expiry_date: Option<String>,
    pub food_type: Option<String>,
    pub meal_type: Option<String>,
    pub location: Option<String>,
}

impl From<FoodListingRow> for FoodListing {
    fn from(row: FoodListingRow) -> Self {
        Self {
            food_id: row.food_id,
            provider_id: row.provider_id,
            food_name: row.food_name,
            quantity: row.quantity,
            expiry_date: row.expiry_date,
            food_type: row.food_type,
            meal_type: row.meal_type,
            location: row.location,
        }
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = food_listings)]
pub struct NewFoodListingRow<'a> {
    pub provider_id: i32,
    pub food_name: &'a str,
    pub quantity: i32,
    pub expiry_date: Option<String>,
    pub food_type: Option<&'a str>,
    pub meal_type: Option<&'a str>,
    pub location: Option<&'a str>,
}

impl<'a> From<&'a NewFoodListing> for NewFoodListingRow<'a> {
    fn from(listing: &'a NewFoodListing) -> Self {
        Self {
            provider_id: listing.provider_id,
            food_name: &listing.food_name,
            quantity: listing.quantity,
            expiry_date: listing
                .expiry_date
                .map(|date| date.format(EXPIRY_DATE_FORMAT).to_string()),
            food_type: listing.food_type.as_deref(),
            meal_type: listing.meal_type.as_deref(),
            location: listing.location.as_deref(),
        }
    }
}

#[derive(AsChangeset, Debug)]
#[diesel(table_name = food_listings)]
pub struct FoodListingChangeset<'a> {
    pub provider_id: Option<i32>,
    pub food_name: Option<&'a str>,
    pub quantity: Option<i32>,
    pub expiry_date: Option<String>,
    pub food_type: Option<&'a str>,
    pub meal_type: Option<&'a str>,
    pub location: Option<&'a str>,
}

impl<'a> From<&'a FoodListingChanges> for FoodListingChangeset<'a> {
    fn from(changes: &'a FoodListingChanges) -> Self {
        Self {
            provider_id: changes.provider_id,
            food_name: changes.food_name.as_deref(),
            quantity: changes.quantity,
            expiry_date: changes
                .expiry_date
                .map(|date| date.format(EXPIRY_DATE_FORMAT).to_string()),
            food_type: changes.food_type.as_deref(),
            meal_type: changes.meal_type.as_deref(),
            location: changes.location.as_deref(),
        }
    }
}

/// Database row for a claim.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = claims)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ClaimRow {
    pub claim_id: i32,
    pub food_id: i32,
    pub receiver_id: i32,
    pub quantity: Option<i32>,
    pub status: String,
    pub timestamp: String,
}

impl TryFrom<ClaimRow> for Claim {
    type Error = Error;

    fn try_from(row: ClaimRow) -> Result<Self> {
        Ok(Self {
            claim_id: row.claim_id,
            food_id: row.food_id,
            receiver_id: row.receiver_id,
            quantity: row.quantity,
            status: row.status.parse::<ClaimStatus>()?,
            timestamp: row.timestamp,
        })
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = claims)]
pub struct NewClaimRow {
    pub food_id: i32,
    pub receiver_id: i32,
    pub quantity: Option<i32>,
    pub status: &'static str,
    pub timestamp: String,
}

impl NewClaimRow {
    /// Build an insert row, stamping `now` when the claim carries no timestamp.
    #[must_use]
    pub fn new(claim: &NewClaim, now: NaiveDateTime) -> Self {
        Self {
            food_id: claim.food_id,
            receiver_id: claim.receiver_id,
            quantity: claim.quantity,
            status: claim.status.as_str(),
            timestamp: format_timestamp(claim.timestamp.unwrap_or(now)),
        }
    }
}

#[derive(AsChangeset, Debug)]
#[diesel(table_name = claims)]
pub struct ClaimChangeset {
    pub food_id: Option<i32>,
    pub receiver_id: Option<i32>,
    pub quantity: Option<i32>,
    pub status: Option<&'static str>,
    pub timestamp: Option<String>,
}

impl From<&ClaimChanges> for ClaimChangeset {
    fn from(changes: &ClaimChanges) -> Self {
        Self {
            food_id: changes.food_id,
            receiver_id: changes.receiver_id,
            quantity: changes.quantity,
            status: changes.status.map(ClaimStatus::as_str),
            timestamp: changes.timestamp.map(format_timestamp),
        }
    }
}

fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(CLAIM_TIMESTAMP_FORMAT).to_string()
}

/// Listing joined with its provider's city.
#[derive(QueryableByName, Debug, Clone)]
pub struct ListingSnapshotRow {
    #[diesel(sql_type = Integer)]
    pub food_id: i32,
    #[diesel(sql_type = Integer)]
    pub provider_id: i32,
    #[diesel(sql_type = Text)]
    pub food_name: String,
    #[diesel(sql_type = BigInt)]
    pub quantity: i64,
    #[diesel(sql_type = Nullable<Text>)]
    pub expiry_date: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub city: Option<String>,
}

impl From<ListingSnapshotRow> for ListingSnapshot {
    fn from(row: ListingSnapshotRow) -> Self {
        ListingSnapshot::from_raw(
            row.food_id,
            row.provider_id,
            row.food_name,
            row.quantity,
            row.expiry_date.as_deref(),
            row.city,
        )
    }
}

/// Claim joined with its listing and the listing provider's city.
#[derive(QueryableByName, Debug, Clone)]
pub struct ClaimSnapshotRow {
    #[diesel(sql_type = Integer)]
    pub claim_id: i32,
    #[diesel(sql_type = Integer)]
    pub food_id: i32,
    #[diesel(sql_type = Integer)]
    pub receiver_id: i32,
    #[diesel(sql_type = Text)]
    pub status: String,
    #[diesel(sql_type = Text)]
    pub timestamp: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub food_name: Option<String>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub quantity: Option<i64>,
    #[diesel(sql_type = Nullable<Text>)]
    pub city: Option<String>,
}

impl From<ClaimSnapshotRow> for ClaimSnapshot {
    fn from(row: ClaimSnapshotRow) -> Self {
        Self {
            claim_id: row.claim_id,
            food_id: row.food_id,
            receiver_id: row.receiver_id,
            status: row.status,
            timestamp: row.timestamp,
            food_name: row.food_name,
            quantity: row.quantity,
            city: row.city.unwrap_or_else(|| UNKNOWN_CITY.to_string()),
        }
    }
}

#[derive(QueryableByName, Debug, Clone, Copy)]
pub struct DashboardTotalsRow {
    #[diesel(sql_type = BigInt)]
    pub total_listings: i64,
    #[diesel(sql_type = BigInt)]
    pub total_claims: i64,
    #[diesel(sql_type = BigInt)]
    pub total_quantity: i64,
    #[diesel(sql_type = BigInt)]
    pub claimed_quantity: i64,
}

impl From<DashboardTotalsRow> for DashboardTotals {
    fn from(row: DashboardTotalsRow) -> Self {
        Self {
            total_listings: row.total_listings,
            total_claims: row.total_claims,
            total_quantity: row.total_quantity,
            claimed_quantity: row.claimed_quantity,
        }
    }
}

/// Single text column, used for `PRAGMA table_info` and distinct lookups.
#[derive(QueryableByName, Debug, Clone)]
pub struct NameRow {
    #[diesel(sql_type = Text)]
    pub name: String,
}

/// One result row packed as a JSON array by SQLite.
#[derive(QueryableByName, Debug, Clone)]
pub struct JsonCellsRow {
    #[diesel(sql_type = Text)]
    pub cells: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn new_claim_row_stamps_missing_timestamp() {
        let now = NaiveDate::from_ymd_opt(2026, 2, 3)
            .unwrap()
            .and_hms_opt(9, 15, 0)
            .unwrap();
        let claim = NewClaim {
            food_id: 1,
            receiver_id: 2,
            quantity: None,
            status: ClaimStatus::Completed,
            timestamp: None,
        };

        let row = NewClaimRow::new(&claim, now);
        assert_eq!(row.timestamp, "2026-02-03 09:15:00");
        assert_eq!(row.status, "Completed");
    }

    #[test]
    fn listing_row_formats_expiry() {
        let listing = NewFoodListing {
            provider_id: 1,
            food_name: "Rice".to_string(),
            quantity: 3,
            expiry_date: NaiveDate::from_ymd_opt(2026, 5, 1),
            ..Default::default()
        };
        let row = NewFoodListingRow::from(&listing);
        assert_eq!(row.expiry_date.as_deref(), Some("2026-05-01"));
        assert_eq!(row.food_type, None);
    }

    #[test]
    fn claim_row_with_unknown_status_is_rejected() {
        let row = ClaimRow {
            claim_id: 1,
            food_id: 1,
            receiver_id: 1,
            quantity: Some(2),
            status: "Shipped".to_string(),
            timestamp: "2026-01-01 00:00:00".to_string(),
        };
        assert!(matches!(Claim::try_from(row), Err(Error::Domain(_))));
    }

    #[test]
    fn snapshot_row_without_city_is_unknown() {
        let row = ClaimSnapshotRow {
            claim_id: 1,
            food_id: 1,
            receiver_id: 1,
            status: "Pending".to_string(),
            timestamp: "2026-01-01 00:00:00".to_string(),
            food_name: None,
            quantity: None,
            city: None,
        };
        assert_eq!(ClaimSnapshot::from(row).city, UNKNOWN_CITY);
    }
}
