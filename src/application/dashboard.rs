//! Headline dashboard: totals plus the two breakdown tables.

use serde::Serialize;
use tracing::debug;

use crate::domain::result_set::ResultSet;
use crate::error::Result;
use crate::port::outbound::report::{DashboardTotals, ReportReader};

const LISTING_QUANTITIES_SQL: &str = "\
SELECT food_id, food_name, quantity
FROM food_listings
ORDER BY quantity DESC, food_id";

const CLAIMED_BY_RECEIVER_SQL: &str = "\
SELECT r.name AS receiver_name, SUM(f.quantity) AS total_claimed
FROM claims c
JOIN receivers r ON c.receiver_id = r.receiver_id
JOIN food_listings f ON c.food_id = f.food_id
GROUP BY r.name
ORDER BY total_claimed DESC, r.name";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub totals: DashboardTotals,
    /// Quantity on offer per listing.
    pub listing_quantities: ResultSet,
    /// Listing quantity claimed, summed per receiver.
    pub claimed_by_receiver: ResultSet,
}

/// Gather everything the dashboard shows.
///
/// # Errors
/// Propagates storage failures; empty tables yield zero totals and empty
/// breakdowns.
pub fn build_dashboard<R>(reader: &R) -> Result<DashboardReport>
where
    R: ReportReader + ?Sized,
{
    let totals = reader.dashboard_totals()?;
    let listing_quantities = reader.select(LISTING_QUANTITIES_SQL)?;
    let claimed_by_receiver = reader.select(CLAIMED_BY_RECEIVER_SQL)?;
    debug!(
        listings = totals.total_listings,
        claims = totals.total_claims,
        "Dashboard assembled"
    );
    Ok(DashboardReport {
        totals,
        listing_quantities,
        claimed_by_receiver,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::TempDatabase;
    use serde_json::json;

    #[test]
    fn dashboard_on_seeded_data() {
        let db = TempDatabase::seeded("dashboard");
        let report = build_dashboard(&db.reports()).unwrap();

        assert_eq!(report.totals.total_quantity, 22);
        assert_eq!(report.listing_quantities.len(), 4);
        assert_eq!(report.listing_quantities.rows[0][1], json!("Rice"));

        // Food For All: curry (6) + rice (10); Hope Shelter: rice (10)
        assert_eq!(
            report.claimed_by_receiver.rows,
            vec![
                vec![json!("Food For All"), json!(16)],
                vec![json!("Hope Shelter"), json!(10)],
            ]
        );
    }

    #[test]
    fn dashboard_on_empty_database() {
        let db = TempDatabase::create("dashboard-empty");
        let report = build_dashboard(&db.reports()).unwrap();
        assert_eq!(report.totals, DashboardTotals::default());
        assert!(report.listing_quantities.is_empty());
        assert!(report.claimed_by_receiver.is_empty());
    }
}
