//! Handler for `foodbridge init`.

use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::port::outbound::report::ReportReader;

/// Execute `init`.
///
/// Opening the database has already applied pending migrations; this reports
/// where it lives and what it holds.
pub fn execute<R>(database: &Path, reader: &R) -> Result<()>
where
    R: ReportReader + ?Sized,
{
    let totals = reader.dashboard_totals()?;
    if output::is_json() {
        output::json_output(json!({
            "command": "init",
            "payload": {
                "database": database.display().to_string(),
                "listings": totals.total_listings,
                "claims": totals.total_claims,
            },
        }));
        return Ok(());
    }

    output::section("Database Ready");
    output::success("Schema is up to date");
    output::field("Path", database.display());
    output::field("Listings", totals.total_listings);
    output::field("Claims", totals.total_claims);

    if totals.total_listings == 0 {
        output::section("Next Steps");
        output::note("1. foodbridge provider add --name ... --type ... --address ... --city ... --contact ...");
        output::note("2. foodbridge listing add --provider <id> --food-name ... --quantity ...");
        output::note("3. foodbridge dashboard");
    }
    Ok(())
}
