//! The four persisted entities and their insert/update payloads.
//!
//! Stored rows carry their primary key; `New*` payloads are what an insert
//! takes; `*Changes` payloads are field-level updates where `None` leaves a
//! column untouched.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Date format used for `food_listings.expiry_date`.
pub const EXPIRY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Timestamp format used for `claims.timestamp`.
pub const CLAIM_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The tables an operator can browse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableName {
    Providers,
    Receivers,
    FoodListings,
    Claims,
}

impl TableName {
    /// All tables in dependency order.
    pub const ALL: [TableName; 4] = [
        TableName::Providers,
        TableName::Receivers,
        TableName::FoodListings,
        TableName::Claims,
    ];

    /// SQL identifier of the table.
    #[must_use]
    pub const fn sql_name(self) -> &'static str {
        match self {
            Self::Providers => "providers",
            Self::Receivers => "receivers",
            Self::FoodListings => "food_listings",
            Self::Claims => "claims",
        }
    }

    /// Primary key column of the table.
    #[must_use]
    pub const fn primary_key(self) -> &'static str {
        match self {
            Self::Providers => "provider_id",
            Self::Receivers => "receiver_id",
            Self::FoodListings => "food_id",
            Self::Claims => "claim_id",
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_name())
    }
}

impl FromStr for TableName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "providers" | "provider" => Ok(Self::Providers),
            "receivers" | "receiver" => Ok(Self::Receivers),
            "food_listings" | "food_listing" | "listings" | "listing" => Ok(Self::FoodListings),
            "claims" | "claim" => Ok(Self::Claims),
            other => Err(DomainError::InvalidInput(format!("unknown table '{other}'"))),
        }
    }
}

/// Lifecycle status of a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ClaimStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl ClaimStatus {
    pub const ALL: [ClaimStatus; 3] = [Self::Pending, Self::Completed, Self::Cancelled];

    /// Value stored in `claims.status`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = DomainError;

    /// Parses case-insensitively; the stored form is always capitalized.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::InvalidStatus {
                value: s.to_string(),
            })
    }
}

/// A food donor (restaurant, grocery store, caterer, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub provider_id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub provider_type: String,
    pub address: String,
    pub city: String,
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewProvider {
    pub name: String,
    pub provider_type: String,
    pub address: String,
    pub city: String,
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProviderChanges {
    pub name: Option<String>,
    pub provider_type: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub contact: Option<String>,
}

impl ProviderChanges {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.provider_type.is_none()
            && self.address.is_none()
            && self.city.is_none()
            && self.contact.is_none()
    }
}

/// An organisation that claims donated food (shelter, NGO, individual).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receiver {
    pub receiver_id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub receiver_type: String,
    pub city: String,
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewReceiver {
    pub name: String,
    pub receiver_type: String,
    pub city: String,
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReceiverChanges {
    pub name: Option<String>,
    pub receiver_type: Option<String>,
    pub city: Option<String>,
    pub contact: Option<String>,
}

impl ReceiverChanges {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.receiver_type.is_none()
            && self.city.is_none()
            && self.contact.is_none()
    }
}

/// A donation offer of a quantity of one food item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodListing {
    pub food_id: i32,
    pub provider_id: i32,
    pub food_name: String,
    pub quantity: i32,
    /// Raw stored value; imported data may hold text that is not a date.
    pub expiry_date: Option<String>,
    pub food_type: Option<String>,
    pub meal_type: Option<String>,
    pub location: Option<String>,
}

impl FoodListing {
    /// Parsed expiry date, `None` when missing or unparseable.
    #[must_use]
    pub fn expiry(&self) -> Option<NaiveDate> {
        self.expiry_date.as_deref().and_then(parse_expiry_date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewFoodListing {
    pub provider_id: i32,
    pub food_name: String,
    pub quantity: i32,
    pub expiry_date: Option<NaiveDate>,
    pub food_type: Option<String>,
    pub meal_type: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FoodListingChanges {
    pub provider_id: Option<i32>,
    pub food_name: Option<String>,
    pub quantity: Option<i32>,
    pub expiry_date: Option<NaiveDate>,
    pub food_type: Option<String>,
    pub meal_type: Option<String>,
    pub location: Option<String>,
}

impl FoodListingChanges {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.provider_id.is_none()
            && self.food_name.is_none()
            && self.quantity.is_none()
            && self.expiry_date.is_none()
            && self.food_type.is_none()
            && self.meal_type.is_none()
            && self.location.is_none()
    }
}

/// A receiver's request against a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub claim_id: i32,
    pub food_id: i32,
    pub receiver_id: i32,
    pub quantity: Option<i32>,
    pub status: ClaimStatus,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewClaim {
    pub food_id: i32,
    pub receiver_id: i32,
    pub quantity: Option<i32>,
    pub status: ClaimStatus,
    /// Defaults to the current local time when absent.
    pub timestamp: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClaimChanges {
    pub food_id: Option<i32>,
    pub receiver_id: Option<i32>,
    pub quantity: Option<i32>,
    pub status: Option<ClaimStatus>,
    pub timestamp: Option<NaiveDateTime>,
}

impl ClaimChanges {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.food_id.is_none()
            && self.receiver_id.is_none()
            && self.quantity.is_none()
            && self.status.is_none()
            && self.timestamp.is_none()
    }
}

/// Parse a stored expiry value.
///
/// Accepts `YYYY-MM-DD` and tolerates a trailing time component
/// (`YYYY-MM-DD HH:MM:SS` or RFC 3339), which shows up in imported data.
#[must_use]
pub fn parse_expiry_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, EXPIRY_DATE_FORMAT)
        .ok()
        .or_else(|| {
            raw.get(..10)
                .filter(|_| raw.len() > 10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, EXPIRY_DATE_FORMAT).ok())
        })
}
