//! Table rows for entities and insight sections.

use tabled::Tabled;

use crate::application::catalog::PredefinedQuery;
use crate::domain::entity::{Claim, FoodListing, Provider, Receiver};
use crate::domain::forecast::MonthlyCount;
use crate::domain::insight::{CityListings, FoodQuantity, NearExpiry, StatusCount};
use crate::domain::risk::RiskAssessment;

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

#[derive(Tabled)]
pub struct ProviderRow {
    #[tabled(rename = "ID")]
    pub id: i32,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Type")]
    pub provider_type: String,
    #[tabled(rename = "Address")]
    pub address: String,
    #[tabled(rename = "City")]
    pub city: String,
    #[tabled(rename = "Contact")]
    pub contact: String,
}

impl From<&Provider> for ProviderRow {
    fn from(provider: &Provider) -> Self {
        Self {
            id: provider.provider_id,
            name: provider.name.clone(),
            provider_type: provider.provider_type.clone(),
            address: provider.address.clone(),
            city: provider.city.clone(),
            contact: provider.contact.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct ReceiverRow {
    #[tabled(rename = "ID")]
    pub id: i32,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Type")]
    pub receiver_type: String,
    #[tabled(rename = "City")]
    pub city: String,
    #[tabled(rename = "Contact")]
    pub contact: String,
}

impl From<&Receiver> for ReceiverRow {
    fn from(receiver: &Receiver) -> Self {
        Self {
            id: receiver.receiver_id,
            name: receiver.name.clone(),
            receiver_type: receiver.receiver_type.clone(),
            city: receiver.city.clone(),
            contact: receiver.contact.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct ListingRow {
    #[tabled(rename = "ID")]
    pub id: i32,
    #[tabled(rename = "Provider")]
    pub provider_id: i32,
    #[tabled(rename = "Food")]
    pub food_name: String,
    #[tabled(rename = "Qty")]
    pub quantity: i32,
    #[tabled(rename = "Expiry")]
    pub expiry_date: String,
    #[tabled(rename = "Food type")]
    pub food_type: String,
    #[tabled(rename = "Meal")]
    pub meal_type: String,
    #[tabled(rename = "Location")]
    pub location: String,
}

impl From<&FoodListing> for ListingRow {
    fn from(listing: &FoodListing) -> Self {
        Self {
            id: listing.food_id,
            provider_id: listing.provider_id,
            food_name: listing.food_name.clone(),
            quantity: listing.quantity,
            expiry_date: or_dash(listing.expiry_date.as_deref()),
            food_type: or_dash(listing.food_type.as_deref()),
            meal_type: or_dash(listing.meal_type.as_deref()),
            location: or_dash(listing.location.as_deref()),
        }
    }
}

#[derive(Tabled)]
pub struct ClaimRow {
    #[tabled(rename = "ID")]
    pub id: i32,
    #[tabled(rename = "Food")]
    pub food_id: i32,
    #[tabled(rename = "Receiver")]
    pub receiver_id: i32,
    #[tabled(rename = "Qty")]
    pub quantity: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Timestamp")]
    pub timestamp: String,
}

impl From<&Claim> for ClaimRow {
    fn from(claim: &Claim) -> Self {
        Self {
            id: claim.claim_id,
            food_id: claim.food_id,
            receiver_id: claim.receiver_id,
            quantity: claim
                .quantity
                .map_or_else(|| "-".to_string(), |q| q.to_string()),
            status: claim.status.to_string(),
            timestamp: claim.timestamp.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct CatalogRow {
    #[tabled(rename = "#")]
    pub number: u8,
    #[tabled(rename = "Slug")]
    pub slug: &'static str,
    #[tabled(rename = "Question")]
    pub title: &'static str,
}

impl From<&PredefinedQuery> for CatalogRow {
    fn from(query: &PredefinedQuery) -> Self {
        Self {
            number: query.number,
            slug: query.slug,
            title: query.title,
        }
    }
}

#[derive(Tabled)]
pub struct FoodQuantityRow {
    #[tabled(rename = "Food")]
    pub food_name: String,
    #[tabled(rename = "Quantity")]
    pub quantity: i64,
}

impl From<&FoodQuantity> for FoodQuantityRow {
    fn from(food: &FoodQuantity) -> Self {
        Self {
            food_name: food.food_name.clone(),
            quantity: food.quantity,
        }
    }
}

#[derive(Tabled)]
pub struct CityListingsRow {
    #[tabled(rename = "City")]
    pub city: String,
    #[tabled(rename = "Listings")]
    pub listings: usize,
}

impl From<&CityListings> for CityListingsRow {
    fn from(city: &CityListings) -> Self {
        Self {
            city: city.city.clone(),
            listings: city.listings,
        }
    }
}

#[derive(Tabled)]
pub struct NearExpiryRow {
    #[tabled(rename = "ID")]
    pub food_id: i32,
    #[tabled(rename = "Food")]
    pub food_name: String,
    #[tabled(rename = "City")]
    pub city: String,
    #[tabled(rename = "Qty")]
    pub quantity: i64,
    #[tabled(rename = "Expiry")]
    pub expiry_date: String,
    #[tabled(rename = "Days left")]
    pub days_left: i64,
}

impl From<&NearExpiry> for NearExpiryRow {
    fn from(item: &NearExpiry) -> Self {
        Self {
            food_id: item.food_id,
            food_name: item.food_name.clone(),
            city: item.city.clone(),
            quantity: item.quantity,
            expiry_date: item.expiry_date.to_string(),
            days_left: item.days_left,
        }
    }
}

#[derive(Tabled)]
pub struct StatusRow {
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Claims")]
    pub count: usize,
}

impl From<&StatusCount> for StatusRow {
    fn from(status: &StatusCount) -> Self {
        Self {
            status: status.status.clone(),
            count: status.count,
        }
    }
}

#[derive(Tabled)]
pub struct RiskRow {
    #[tabled(rename = "ID")]
    pub food_id: i32,
    #[tabled(rename = "Food")]
    pub food_name: String,
    #[tabled(rename = "City")]
    pub city: String,
    #[tabled(rename = "Qty")]
    pub quantity: i64,
    #[tabled(rename = "Expiry")]
    pub expiry_date: String,
    #[tabled(rename = "Days")]
    pub days_to_expiry: String,
    #[tabled(rename = "Qty norm")]
    pub quantity_norm: String,
    #[tabled(rename = "Risk")]
    pub risk_score: String,
}

impl From<&RiskAssessment> for RiskRow {
    fn from(risk: &RiskAssessment) -> Self {
        let days = if risk.is_expired() {
            format!("{} (expired)", risk.days_to_expiry)
        } else {
            risk.days_to_expiry.to_string()
        };
        Self {
            food_id: risk.food_id,
            food_name: risk.food_name.clone(),
            city: risk.city.clone(),
            quantity: risk.quantity,
            expiry_date: risk.expiry_date.to_string(),
            days_to_expiry: days,
            quantity_norm: format!("{:.3}", risk.quantity_norm),
            risk_score: format!("{:.3}", risk.risk_score),
        }
    }
}

#[derive(Tabled)]
pub struct MonthRow {
    #[tabled(rename = "Month")]
    pub month: String,
    #[tabled(rename = "Donations")]
    pub donations: u64,
}

impl From<&MonthlyCount> for MonthRow {
    fn from(month: &MonthlyCount) -> Self {
        Self {
            month: month.month.clone(),
            donations: month.donations,
        }
    }
}

/// Convert a slice of domain values into table rows.
pub fn rows<'a, T, R>(items: &'a [T]) -> Vec<R>
where
    R: From<&'a T>,
{
    items.iter().map(R::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn listing_row_dashes_missing_fields() {
        let listing = FoodListing {
            food_id: 4,
            provider_id: 2,
            food_name: "Salad".to_string(),
            quantity: 4,
            expiry_date: None,
            food_type: Some("Vegan".to_string()),
            meal_type: None,
            location: None,
        };
        let row = ListingRow::from(&listing);
        assert_eq!(row.expiry_date, "-");
        assert_eq!(row.food_type, "Vegan");
        assert_eq!(row.location, "-");
    }

    #[test]
    fn risk_row_flags_expired_items() {
        let risk = RiskAssessment {
            food_id: 1,
            provider_id: 1,
            food_name: "Rice".to_string(),
            city: "Pune".to_string(),
            quantity: 10,
            expiry_date: NaiveDate::from_ymd_opt(2026, 2, 27).unwrap(),
            days_to_expiry: -2,
            quantity_norm: 1.0,
            risk_score: 1.0,
        };
        let row = RiskRow::from(&risk);
        assert_eq!(row.days_to_expiry, "-2 (expired)");
        assert_eq!(row.risk_score, "1.000");
    }
}
