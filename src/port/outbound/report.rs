//! Read-side reporting/query ports.

use serde::Serialize;

use crate::domain::entity::{FoodListing, TableName};
use crate::domain::result_set::ResultSet;
use crate::domain::snapshot::{ClaimSnapshot, ListingSnapshot};
use crate::error::Result;

/// Filter for the listings browser. Empty lists do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub locations: Vec<String>,
    pub provider_ids: Vec<i32>,
    pub food_types: Vec<String>,
    pub meal_types: Vec<String>,
}

impl ListingFilter {
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.locations.is_empty()
            && self.provider_ids.is_empty()
            && self.food_types.is_empty()
            && self.meal_types.is_empty()
    }
}

/// Distinct values available for each listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListingFacets {
    pub locations: Vec<String>,
    pub provider_ids: Vec<i32>,
    pub food_types: Vec<String>,
    pub meal_types: Vec<String>,
}

/// Headline totals for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardTotals {
    pub total_listings: i64,
    pub total_claims: i64,
    pub total_quantity: i64,
    /// Sum of listing quantity over all claims made against listings.
    pub claimed_quantity: i64,
}

/// Read-side query contract.
pub trait ReportReader {
    /// Run a single read-only `SELECT` and return its rows with column names.
    fn select(&self, sql: &str) -> Result<ResultSet>;

    /// Every row of one table.
    fn table(&self, table: TableName) -> Result<ResultSet>;

    /// Listings matching `filter`, ordered by id.
    fn filter_listings(&self, filter: &ListingFilter) -> Result<Vec<FoodListing>>;

    fn listing_facets(&self) -> Result<ListingFacets>;

    fn dashboard_totals(&self) -> Result<DashboardTotals>;

    /// Listings joined with their provider's city, newest first.
    fn listing_snapshots(&self) -> Result<Vec<ListingSnapshot>>;

    /// Claims joined with their listing and provider city, newest first.
    fn claim_snapshots(&self) -> Result<Vec<ClaimSnapshot>>;

    /// Distinct provider cities, sorted.
    fn provider_cities(&self) -> Result<Vec<String>>;
}
