//! The fixed catalog of predefined analytics queries.
//!
//! Queries are addressed by number (`7`) or slug (`common-food-types`) and
//! run through the same tabular path as ad-hoc SQL.

use serde::Serialize;
use tracing::info;

use crate::domain::result_set::ResultSet;
use crate::error::{Error, Result};
use crate::port::outbound::report::ReportReader;

/// One read-only aggregate query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PredefinedQuery {
    pub number: u8,
    pub slug: &'static str,
    pub title: &'static str,
    #[serde(skip)]
    pub sql: &'static str,
}

macro_rules! query {
    ($number:literal, $slug:literal, $title:literal, $sql:expr) => {
        PredefinedQuery {
            number: $number,
            slug: $slug,
            title: $title,
            sql: $sql,
        }
    };
}

pub const CATALOG: [PredefinedQuery; 20] = [
    query!(
        1,
        "city-participants",
        "Providers & receivers per city",
        "SELECT city,
                COUNT(DISTINCT provider_id) AS total_providers,
                COUNT(DISTINCT receiver_id) AS total_receivers
         FROM providers FULL JOIN receivers USING (city)
         GROUP BY city
         ORDER BY city"
    ),
    query!(
        2,
        "top-provider-types",
        "Top provider types contributing food",
        "SELECT type, COUNT(*) AS total_contributions
         FROM providers
         GROUP BY type
         ORDER BY total_contributions DESC, type"
    ),
    query!(
        3,
        "provider-contacts",
        "Contact info of providers by city",
        "SELECT name, city, contact FROM providers ORDER BY city, name"
    ),
    query!(
        4,
        "top-receivers",
        "Receivers with most food claims",
        "SELECT r.name, COUNT(c.claim_id) AS total_claims
         FROM claims c
         JOIN receivers r ON c.receiver_id = r.receiver_id
         GROUP BY r.name
         ORDER BY total_claims DESC, r.name"
    ),
    query!(
        5,
        "total-food",
        "Total food available",
        "SELECT COALESCE(SUM(quantity), 0) AS total_food_quantity FROM food_listings"
    ),
    query!(
        6,
        "listings-by-location",
        "City with most food listings",
        "SELECT location, COUNT(food_id) AS listings
         FROM food_listings
         GROUP BY location
         ORDER BY listings DESC, location"
    ),
    query!(
        7,
        "common-food-types",
        "Most common food types",
        "SELECT food_type, COUNT(*) AS frequency
         FROM food_listings
         GROUP BY food_type
         ORDER BY frequency DESC, food_type"
    ),
    query!(
        8,
        "claims-per-food",
        "Claims per food item",
        "SELECT f.food_name, COUNT(c.claim_id) AS claim_count
         FROM claims c
         JOIN food_listings f ON c.food_id = f.food_id
         GROUP BY f.food_name
         ORDER BY claim_count DESC, f.food_name"
    ),
    query!(
        9,
        "top-successful-providers",
        "Provider with most successful claims",
        "SELECT p.name, COUNT(c.claim_id) AS successful_claims
         FROM claims c
         JOIN food_listings f ON c.food_id = f.food_id
         JOIN providers p ON f.provider_id = p.provider_id
         WHERE c.status = 'Completed'
         GROUP BY p.name
         ORDER BY successful_claims DESC, p.name"
    ),
    query!(
        10,
        "claim-status",
        "Claim status distribution",
        "SELECT status, COUNT(*) AS count
         FROM claims
         GROUP BY status
         ORDER BY count DESC, status"
    ),
    query!(
        11,
        "avg-claimed-per-receiver",
        "Average food claimed per receiver",
        "SELECT r.name, ROUND(AVG(f.quantity), 2) AS avg_quantity
         FROM claims c
         JOIN food_listings f ON c.food_id = f.food_id
         JOIN receivers r ON c.receiver_id = r.receiver_id
         GROUP BY r.name
         ORDER BY r.name"
    ),
    query!(
        12,
        "claimed-meal-types",
        "Most claimed meal type",
        "SELECT f.meal_type, COUNT(*) AS claim_count
         FROM claims c
         JOIN food_listings f ON c.food_id = f.food_id
         GROUP BY f.meal_type
         ORDER BY claim_count DESC, f.meal_type"
    ),
    query!(
        13,
        "donated-per-provider",
        "Total food donated per provider",
        "SELECT p.name, SUM(f.quantity) AS total_donated
         FROM food_listings f
         JOIN providers p ON f.provider_id = p.provider_id
         GROUP BY p.name
         ORDER BY total_donated DESC, p.name"
    ),
    query!(
        14,
        "claimed-vs-unclaimed",
        "Claimed vs unclaimed donations",
        "SELECT CASE WHEN c.food_id IS NULL THEN 'Unclaimed' ELSE 'Claimed' END AS claim_status,
                COUNT(*) AS count
         FROM food_listings f
         LEFT JOIN claims c ON f.food_id = c.food_id
         GROUP BY claim_status
         ORDER BY claim_status"
    ),
    query!(
        15,
        "meal-types-by-city",
        "Most common meal type by city",
        "SELECT p.city, f.meal_type, COUNT(*) AS count
         FROM providers p
         JOIN food_listings f ON p.provider_id = f.provider_id
         GROUP BY p.city, f.meal_type
         ORDER BY p.city, count DESC, f.meal_type"
    ),
    query!(
        16,
        "monthly-trend",
        "Monthly donation trends",
        "SELECT strftime('%Y-%m', expiry_date) AS month, COUNT(*) AS donation_count
         FROM food_listings
         WHERE strftime('%Y-%m', expiry_date) IS NOT NULL
         GROUP BY month
         ORDER BY month"
    ),
    query!(
        17,
        "idle-providers",
        "Providers without donations",
        "SELECT p.name
         FROM providers p
         LEFT JOIN food_listings f ON p.provider_id = f.provider_id
         WHERE f.food_id IS NULL
         ORDER BY p.name"
    ),
    query!(
        18,
        "food-types-by-location",
        "Location-wise most common food type",
        "SELECT location, food_type, COUNT(*) AS food_count
         FROM food_listings
         GROUP BY location, food_type
         ORDER BY location, food_count DESC, food_type"
    ),
    query!(
        19,
        "diverse-providers",
        "Top providers by unique food items donated",
        "SELECT p.name AS provider_name, COUNT(DISTINCT f.food_name) AS unique_food_items
         FROM providers p
         JOIN food_listings f ON p.provider_id = f.provider_id
         GROUP BY p.name
         ORDER BY unique_food_items DESC, p.name"
    ),
    query!(
        20,
        "receiver-cities",
        "Receiver cities by claim count",
        "SELECT r.city, COUNT(c.claim_id) AS claim_count
         FROM receivers r
         JOIN claims c ON r.receiver_id = c.receiver_id
         GROUP BY r.city
         ORDER BY claim_count DESC, r.city"
    ),
];

/// Look a query up by its number or slug.
#[must_use]
pub fn find(key: &str) -> Option<&'static PredefinedQuery> {
    let key = key.trim();
    match key.parse::<u8>() {
        Ok(number) => CATALOG.iter().find(|query| query.number == number),
        Err(_) => CATALOG
            .iter()
            .find(|query| query.slug.eq_ignore_ascii_case(key)),
    }
}

/// Run the catalog query named by `key`.
///
/// # Errors
/// Returns [`Error::Query`] for an unknown key or a failing statement.
pub fn run<R>(reader: &R, key: &str) -> Result<(&'static PredefinedQuery, ResultSet)>
where
    R: ReportReader + ?Sized,
{
    let query = find(key).ok_or_else(|| {
        Error::Query(format!(
            "unknown predefined query '{key}' (expected 1-{} or a slug)",
            CATALOG.len()
        ))
    })?;
    info!(number = query.number, slug = query.slug, "Running predefined query");
    let result = reader.select(query.sql)?;
    Ok((query, result))
}
