//! SQLite read-side report adapter.
//!
//! Serves the table viewer, ad-hoc and predefined queries, the listings
//! browser and the snapshots the analytics consume.
//!
//! Arbitrary `SELECT` text is tabulated without knowing its shape up front:
//! the statement is wrapped in a temporary view, the view's column names
//! are read back with `PRAGMA table_info`, and each row is packed into a
//! JSON array by SQLite itself. All of it runs in one transaction so the
//! view never outlives the call.

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use serde_json::Value;
use tracing::{debug, warn};

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{
    ClaimSnapshotRow, DashboardTotalsRow, FoodListingRow, JsonCellsRow, ListingSnapshotRow,
    NameRow,
};
use crate::adapter::outbound::sqlite::database::schema::{food_listings, providers};
use crate::domain::entity::{FoodListing, TableName};
use crate::domain::result_set::ResultSet;
use crate::domain::snapshot::{ClaimSnapshot, ListingSnapshot};
use crate::error::{Error, Result};
use crate::port::outbound::report::{DashboardTotals, ListingFacets, ListingFilter, ReportReader};

type Conn = PooledConnection<ConnectionManager<diesel::SqliteConnection>>;

const RESULT_VIEW: &str = "foodbridge_result";

const DASHBOARD_TOTALS_SQL: &str = "\
SELECT
    (SELECT COUNT(*) FROM food_listings) AS total_listings,
    (SELECT COUNT(*) FROM claims) AS total_claims,
    (SELECT COALESCE(SUM(quantity), 0) FROM food_listings) AS total_quantity,
    (SELECT COALESCE(SUM(f.quantity), 0)
       FROM claims c
       JOIN food_listings f ON c.food_id = f.food_id) AS claimed_quantity";

const LISTING_SNAPSHOT_SQL: &str = "\
SELECT f.food_id, f.provider_id, f.food_name, f.quantity, f.expiry_date, p.city AS city
FROM food_listings f
LEFT JOIN providers p ON f.provider_id = p.provider_id
ORDER BY f.food_id DESC";

const CLAIM_SNAPSHOT_SQL: &str = "\
SELECT c.claim_id, c.food_id, c.receiver_id, c.status, c.timestamp,
       f.food_name, f.quantity, p.city AS city
FROM claims c
LEFT JOIN food_listings f ON c.food_id = f.food_id
LEFT JOIN providers p ON f.provider_id = p.provider_id
ORDER BY c.claim_id DESC";

/// SQLite report reader for tables, queries and snapshots.
#[derive(Clone)]
pub struct SqliteReportReader {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteReportReader {
    /// Create a report reader over the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<Conn> {
        self.pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))
    }
}

fn database_error(err: diesel::result::Error) -> Error {
    Error::Database(err.to_string())
}

/// Accept exactly one read-only statement, without its trailing `;`.
///
/// A `;` inside a quoted literal or identifier is part of the statement; any
/// other `;` starts a second one.
fn normalize_select(sql: &str) -> Result<&str> {
    let statement = sql.trim().trim_end_matches(|c: char| c == ';' || c.is_whitespace());
    if statement.is_empty() {
        return Err(Error::Query("query text is empty".to_string()));
    }
    if has_statement_separator(statement) {
        return Err(Error::Query(
            "only a single statement can be run at a time".to_string(),
        ));
    }
    let keyword = statement
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    if !matches!(keyword.as_str(), "select" | "with" | "values") {
        return Err(Error::Query(format!(
            "only SELECT statements are allowed, got '{keyword}'"
        )));
    }
    Ok(statement)
}

/// Whether `sql` has a `;` outside `'...'` and `"..."` quoting.
///
/// Doubled quotes inside a literal toggle twice and need no special case.
fn has_statement_separator(sql: &str) -> bool {
    let mut quote: Option<char> = None;
    for c in sql.chars() {
        match (quote, c) {
            (None, '\'' | '"') => quote = Some(c),
            (None, ';') => return true,
            (Some(open), c) if c == open => quote = None,
            _ => {}
        }
    }
    false
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Run `statement` through a temporary view and collect raw JSON rows.
fn tabulate(conn: &mut Conn, statement: &str) -> QueryResult<(Vec<String>, Vec<String>)> {
    conn.transaction(|conn| {
        diesel::sql_query(format!("DROP VIEW IF EXISTS temp.{RESULT_VIEW}")).execute(conn)?;
        diesel::sql_query(format!("CREATE TEMP VIEW {RESULT_VIEW} AS {statement}"))
            .execute(conn)?;

        let columns: Vec<String> =
            diesel::sql_query(format!("PRAGMA temp.table_info({RESULT_VIEW})"))
                .load::<NameRow>(conn)?
                .into_iter()
                .map(|row| row.name)
                .collect();

        let cells = columns
            .iter()
            .map(|name| quote_identifier(name))
            .collect::<Vec<_>>()
            .join(", ");
        let rows: Vec<String> = diesel::sql_query(format!(
            "SELECT json_array({cells}) AS cells FROM temp.{RESULT_VIEW}"
        ))
        .load::<JsonCellsRow>(conn)?
        .into_iter()
        .map(|row| row.cells)
        .collect();

        diesel::sql_query(format!("DROP VIEW temp.{RESULT_VIEW}")).execute(conn)?;
        Ok((columns, rows))
    })
}

impl ReportReader for SqliteReportReader {
    fn select(&self, sql: &str) -> Result<ResultSet> {
        let statement = normalize_select(sql)?;
        let mut conn = self.conn()?;

        let (columns, raw_rows) = tabulate(&mut conn, statement).map_err(|e| {
            warn!(error = %e, "Query rejected");
            Error::Query(e.to_string())
        })?;

        let mut result = ResultSet::new(columns);
        for raw in raw_rows {
            let row: Vec<Value> = serde_json::from_str(&raw)?;
            result.push_row(row);
        }
        debug!(
            columns = result.columns.len(),
            rows = result.len(),
            "Query executed"
        );
        Ok(result)
    }

    fn table(&self, table: TableName) -> Result<ResultSet> {
        self.select(&format!(
            "SELECT * FROM {} ORDER BY {}",
            table.sql_name(),
            table.primary_key()
        ))
    }

    fn filter_listings(&self, filter: &ListingFilter) -> Result<Vec<FoodListing>> {
        let mut conn = self.conn()?;
        let mut query = food_listings::table
            .select(FoodListingRow::as_select())
            .order(food_listings::food_id)
            .into_boxed();

        if !filter.locations.is_empty() {
            query = query.filter(food_listings::location.eq_any(filter.locations.clone()));
        }
        if !filter.provider_ids.is_empty() {
            query = query.filter(food_listings::provider_id.eq_any(filter.provider_ids.clone()));
        }
        if !filter.food_types.is_empty() {
            query = query.filter(food_listings::food_type.eq_any(filter.food_types.clone()));
        }
        if !filter.meal_types.is_empty() {
            query = query.filter(food_listings::meal_type.eq_any(filter.meal_types.clone()));
        }

        let rows = query
            .load::<FoodListingRow>(&mut conn)
            .map_err(database_error)?;
        debug!(count = rows.len(), unfiltered = filter.is_unfiltered(), "Filtered listings");
        Ok(rows.into_iter().map(FoodListing::from).collect())
    }

    fn listing_facets(&self) -> Result<ListingFacets> {
        let mut conn = self.conn()?;

        let locations = food_listings::table
            .select(food_listings::location)
            .filter(food_listings::location.is_not_null())
            .distinct()
            .order(food_listings::location)
            .load::<Option<String>>(&mut conn)
            .map_err(database_error)?
            .into_iter()
            .flatten()
            .collect();
        let provider_ids = food_listings::table
            .select(food_listings::provider_id)
            .distinct()
            .order(food_listings::provider_id)
            .load::<i32>(&mut conn)
            .map_err(database_error)?;
        let food_types = food_listings::table
            .select(food_listings::food_type)
            .filter(food_listings::food_type.is_not_null())
            .distinct()
            .order(food_listings::food_type)
            .load::<Option<String>>(&mut conn)
            .map_err(database_error)?
            .into_iter()
            .flatten()
            .collect();
        let meal_types = food_listings::table
            .select(food_listings::meal_type)
            .filter(food_listings::meal_type.is_not_null())
            .distinct()
            .order(food_listings::meal_type)
            .load::<Option<String>>(&mut conn)
            .map_err(database_error)?
            .into_iter()
            .flatten()
            .collect();

        Ok(ListingFacets {
            locations,
            provider_ids,
            food_types,
            meal_types,
        })
    }

    fn dashboard_totals(&self) -> Result<DashboardTotals> {
        let mut conn = self.conn()?;
        let row: DashboardTotalsRow = diesel::sql_query(DASHBOARD_TOTALS_SQL)
            .get_result(&mut conn)
            .map_err(database_error)?;
        Ok(row.into())
    }

    fn listing_snapshots(&self) -> Result<Vec<ListingSnapshot>> {
        let mut conn = self.conn()?;
        let rows = diesel::sql_query(LISTING_SNAPSHOT_SQL)
            .load::<ListingSnapshotRow>(&mut conn)
            .map_err(database_error)?;
        Ok(rows.into_iter().map(ListingSnapshot::from).collect())
    }

    fn claim_snapshots(&self) -> Result<Vec<ClaimSnapshot>> {
        let mut conn = self.conn()?;
        let rows = diesel::sql_query(CLAIM_SNAPSHOT_SQL)
            .load::<ClaimSnapshotRow>(&mut conn)
            .map_err(database_error)?;
        Ok(rows.into_iter().map(ClaimSnapshot::from).collect())
    }

    fn provider_cities(&self) -> Result<Vec<String>> {
        let mut conn = self.conn()?;
        providers::table
            .select(providers::city)
            .distinct()
            .order(providers::city)
            .load::<String>(&mut conn)
            .map_err(database_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::TempDatabase;
    use serde_json::json;

    #[test]
    fn normalize_select_strips_trailing_semicolons() {
        assert_eq!(
            normalize_select("  SELECT 1 ;; \n").unwrap(),
            "SELECT 1"
        );
        assert!(normalize_select("with x AS (SELECT 1) SELECT * FROM x").is_ok());
    }

    #[test]
    fn normalize_select_rejects_writes_and_batches() {
        assert!(matches!(normalize_select("   ;"), Err(Error::Query(_))));
        assert!(matches!(
            normalize_select("DELETE FROM providers"),
            Err(Error::Query(_))
        ));
        assert!(matches!(
            normalize_select("SELECT 1; DROP TABLE claims"),
            Err(Error::Query(_))
        ));
    }

    #[test]
    fn semicolons_inside_quotes_are_not_separators() {
        assert!(normalize_select("SELECT * FROM providers WHERE contact LIKE '%;%'").is_ok());
        assert!(normalize_select("SELECT 'it''s;' AS \"a;b\";").is_ok());
        assert!(matches!(
            normalize_select("SELECT ';'; DELETE FROM claims"),
            Err(Error::Query(_))
        ));
    }

    #[test]
    fn select_matches_semicolon_inside_literal() {
        let db = TempDatabase::seeded("report-semicolon");
        let reports = db.reports();
        let result = reports
            .select("SELECT name FROM providers WHERE contact LIKE '%;%'")
            .unwrap();
        assert!(result.is_empty());
        assert_eq!(result.columns, vec!["name"]);
    }

    #[test]
    fn quote_identifier_escapes_quotes() {
        assert_eq!(quote_identifier("COUNT(*)"), "\"COUNT(*)\"");
        assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn select_returns_named_columns_and_typed_cells() {
        let db = TempDatabase::seeded("select-cells");
        let reports = db.reports();

        let result = reports
            .select("SELECT city, COUNT(*) AS providers, NULL AS note, 1.5 AS ratio FROM providers GROUP BY city ORDER BY city")
            .unwrap();

        assert_eq!(result.columns, vec!["city", "providers", "note", "ratio"]);
        assert_eq!(result.rows[0], vec![json!("Mumbai"), json!(1), Value::Null, json!(1.5)]);
        assert_eq!(result.rows[1][0], json!("Pune"));
        assert_eq!(result.rows[1][1], json!(2));
    }

    #[test]
    fn select_keeps_expression_column_names() {
        let db = TempDatabase::seeded("select-expr");
        let result = db.reports().select("SELECT COUNT(*) FROM claims;").unwrap();
        assert_eq!(result.columns, vec!["COUNT(*)"]);
        assert_eq!(result.rows, vec![vec![json!(3)]]);
    }

    #[test]
    fn select_with_no_rows_still_has_columns() {
        let db = TempDatabase::create("select-empty");
        let result = db.reports().select("SELECT * FROM providers").unwrap();
        assert!(result.is_empty());
        assert_eq!(result.columns.len(), 6);
        assert_eq!(result.columns[2], "type");
    }

    #[test]
    fn malformed_sql_is_a_query_error() {
        let db = TempDatabase::create("select-bad");
        let err = db.reports().select("SELECT * FROM nowhere").unwrap_err();
        assert!(matches!(err, Error::Query(_)), "got {err:?}");

        // the temp view does not linger after a failure
        assert!(db.reports().select("SELECT 1 AS one").is_ok());
    }

    #[test]
    fn table_rows_are_ordered_by_primary_key() {
        let db = TempDatabase::seeded("table-order");
        let result = db.reports().table(TableName::FoodListings).unwrap();
        let ids: Vec<_> = result.column("food_id").cloned().collect();
        assert_eq!(ids, vec![json!(1), json!(2), json!(3), json!(4)]);
    }

    #[test]
    fn filter_listings_combines_filters() {
        let db = TempDatabase::seeded("filter");
        let reports = db.reports();

        let all = reports.filter_listings(&ListingFilter::default()).unwrap();
        assert_eq!(all.len(), 4);

        let filter = ListingFilter {
            locations: vec!["Pune".to_string()],
            meal_types: vec!["Lunch".to_string()],
            ..Default::default()
        };
        let lunch_in_pune = reports.filter_listings(&filter).unwrap();
        assert_eq!(lunch_in_pune.len(), 1);
        assert_eq!(lunch_in_pune[0].food_name, "Rice");

        let by_provider = ListingFilter {
            provider_ids: vec![2],
            ..Default::default()
        };
        assert_eq!(reports.filter_listings(&by_provider).unwrap().len(), 2);
    }

    #[test]
    fn facets_list_distinct_values() {
        let db = TempDatabase::seeded("facets");
        let facets = db.reports().listing_facets().unwrap();
        assert_eq!(facets.locations, vec!["Mumbai", "Pune"]);
        assert_eq!(facets.provider_ids, vec![1, 2]);
        assert_eq!(facets.meal_types, vec!["Breakfast", "Dinner", "Lunch"]);
        assert_eq!(facets.food_types, vec!["Non-Vegetarian", "Vegan", "Vegetarian"]);
    }

    #[test]
    fn dashboard_totals_on_seeded_data() {
        let db = TempDatabase::seeded("totals");
        let totals = db.reports().dashboard_totals().unwrap();
        assert_eq!(totals.total_listings, 4);
        assert_eq!(totals.total_claims, 3);
        assert_eq!(totals.total_quantity, 22);
        // rice (10) claimed twice, curry (6) once
        assert_eq!(totals.claimed_quantity, 26);
    }

    #[test]
    fn dashboard_totals_on_empty_database() {
        let db = TempDatabase::create("totals-empty");
        assert_eq!(
            db.reports().dashboard_totals().unwrap(),
            DashboardTotals::default()
        );
    }

    #[test]
    fn snapshots_join_provider_city() {
        let db = TempDatabase::seeded("snapshots");
        let reports = db.reports();

        let listings = reports.listing_snapshots().unwrap();
        assert_eq!(listings.len(), 4);
        assert_eq!(listings[0].food_id, 4);
        assert_eq!(listings[0].city, "Mumbai");
        assert_eq!(listings[0].expiry_date, None);

        let claims = reports.claim_snapshots().unwrap();
        assert_eq!(claims.len(), 3);
        assert_eq!(claims[0].claim_id, 3);
        assert_eq!(claims[0].food_name.as_deref(), Some("Rice"));
        assert_eq!(claims[0].city, "Pune");
    }

    #[test]
    fn provider_cities_are_distinct_and_sorted() {
        let db = TempDatabase::seeded("cities");
        assert_eq!(db.reports().provider_cities().unwrap(), vec!["Mumbai", "Pune"]);
    }
}
