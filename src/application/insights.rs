//! Exploratory analytics and predictions over one consistent snapshot.
//!
//! Listings and claims are read once, optionally narrowed to one provider
//! city, and every section is computed from that in-memory snapshot. `today`
//! is always passed in so results are reproducible.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::forecast::{
    monthly_trend, naive_forecast, MonthlyCount, NaiveForecast, DEFAULT_FORECAST_WINDOW,
};
use crate::domain::insight::{
    filter_claims_by_city, filter_listings_by_city, kpis, listings_by_city, near_expiry,
    status_distribution, top_foods, CityListings, FoodQuantity, Kpis, NearExpiry, StatusCount,
    DEFAULT_NEAR_EXPIRY_DAYS, DEFAULT_TOP_FOODS,
};
use crate::domain::result_set::ResultSet;
use crate::domain::risk::{rank_waste_risk, RiskAssessment, DEFAULT_RISK_TOP_N};
use crate::error::Result;
use crate::port::outbound::report::ReportReader;

const PROVIDER_CONTACTS_SQL: &str =
    "SELECT provider_id, name, city, contact FROM providers ORDER BY city, name";
const RECEIVER_CONTACTS_SQL: &str =
    "SELECT receiver_id, name, city, contact FROM receivers ORDER BY city, name";

/// Tuning knobs for [`build_insights`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightsOptions {
    /// Restrict to listings whose provider is in this city.
    pub city: Option<String>,
    pub risk_top_n: usize,
    pub near_expiry_days: i64,
    pub forecast_window: usize,
    pub top_foods: usize,
}

impl Default for InsightsOptions {
    fn default() -> Self {
        Self {
            city: None,
            risk_top_n: DEFAULT_RISK_TOP_N,
            near_expiry_days: DEFAULT_NEAR_EXPIRY_DAYS,
            forecast_window: DEFAULT_FORECAST_WINDOW,
            top_foods: DEFAULT_TOP_FOODS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightsReport {
    pub today: NaiveDate,
    pub city: Option<String>,
    /// Every provider city, for choosing a filter.
    pub cities: Vec<String>,
    pub kpis: Kpis,
    pub top_foods: Vec<FoodQuantity>,
    pub listings_by_city: Vec<CityListings>,
    pub near_expiry: Vec<NearExpiry>,
    pub status_distribution: Vec<StatusCount>,
    pub waste_risk: Vec<RiskAssessment>,
    pub monthly_trend: Vec<MonthlyCount>,
    pub forecast: Option<NaiveForecast>,
    pub provider_contacts: ResultSet,
    pub receiver_contacts: ResultSet,
}

/// Compute every insights section.
///
/// # Errors
/// Propagates storage failures. Missing data is not an error: sections are
/// simply empty and the forecast is `None`.
pub fn build_insights<R>(
    reader: &R,
    today: NaiveDate,
    options: &InsightsOptions,
) -> Result<InsightsReport>
where
    R: ReportReader + ?Sized,
{
    let city = options.city.as_deref();
    let cities = reader.provider_cities()?;
    let listings = filter_listings_by_city(reader.listing_snapshots()?, city);
    let claims = filter_claims_by_city(reader.claim_snapshots()?, city);
    info!(
        city = city.unwrap_or("All"),
        listings = listings.len(),
        claims = claims.len(),
        "Computing insights"
    );

    let waste_risk = rank_waste_risk(&listings, today, options.risk_top_n);
    let trend = monthly_trend(listings.iter().filter_map(|listing| listing.expiry_date));
    let forecast = naive_forecast(&trend, options.forecast_window);
    debug!(
        risk_items = waste_risk.len(),
        months = trend.len(),
        forecast = forecast.as_ref().map(|f| f.value),
        "Predictions computed"
    );

    Ok(InsightsReport {
        today,
        city: options.city.clone(),
        cities,
        kpis: kpis(&listings, &claims),
        top_foods: top_foods(&listings, options.top_foods),
        listings_by_city: listings_by_city(&listings),
        near_expiry: near_expiry(&listings, today, options.near_expiry_days),
        status_distribution: status_distribution(&claims),
        waste_risk,
        monthly_trend: trend,
        forecast,
        provider_contacts: reader.select(PROVIDER_CONTACTS_SQL)?,
        receiver_contacts: reader.select(RECEIVER_CONTACTS_SQL)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{seed_today, TempDatabase};
    use serde_json::json;

    #[test]
    fn insights_for_all_cities() {
        let db = TempDatabase::seeded("insights-all");
        let report =
            build_insights(&db.reports(), seed_today(), &InsightsOptions::default()).unwrap();

        assert_eq!(report.cities, vec!["Mumbai", "Pune"]);
        assert_eq!(
            report.kpis,
            Kpis {
                total_quantity: 22,
                listings: 4,
                claims: 3,
                completed_claims: 1,
            }
        );
        assert_eq!(report.top_foods[0].food_name, "Rice");

        // rice expires today, bread in five days; curry is outside the window
        let near: Vec<_> = report.near_expiry.iter().map(|n| n.food_name.as_str()).collect();
        assert_eq!(near, vec!["Rice", "Bread"]);

        // undated salad is excluded from scoring
        assert_eq!(report.waste_risk.len(), 3);
        assert_eq!(report.waste_risk[0].food_name, "Rice");
        assert!((report.waste_risk[0].risk_score - 1.0).abs() < f64::EPSILON);

        assert_eq!(report.monthly_trend.len(), 2);
        // mean of [2, 1] is 1.5, ties to even
        assert_eq!(report.forecast.as_ref().map(|f| f.value), Some(2));

        assert_eq!(report.provider_contacts.rows[0][2], json!("Mumbai"));
        assert_eq!(report.receiver_contacts.len(), 2);
    }

    #[test]
    fn insights_filtered_by_city() {
        let db = TempDatabase::seeded("insights-city");
        let options = InsightsOptions {
            city: Some("Mumbai".to_string()),
            ..Default::default()
        };
        let report = build_insights(&db.reports(), seed_today(), &options).unwrap();

        assert_eq!(report.kpis.listings, 2);
        assert_eq!(report.kpis.claims, 1);
        assert_eq!(report.kpis.completed_claims, 0);
        assert!(report.near_expiry.is_empty());
        assert_eq!(report.listings_by_city.len(), 1);
        assert_eq!(report.status_distribution[0].status, "Pending");
        // contact lists are never filtered
        assert_eq!(report.provider_contacts.len(), 3);
    }

    #[test]
    fn insights_on_empty_database_have_no_data() {
        let db = TempDatabase::create("insights-empty");
        let report =
            build_insights(&db.reports(), seed_today(), &InsightsOptions::default()).unwrap();

        assert_eq!(report.kpis, Kpis::default());
        assert!(report.waste_risk.is_empty());
        assert!(report.monthly_trend.is_empty());
        assert!(report.forecast.is_none());
    }
}
