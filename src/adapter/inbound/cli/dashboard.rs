//! Handler for `foodbridge dashboard`.

use crate::adapter::inbound::cli::output;
use crate::application::dashboard::build_dashboard;
use crate::error::Result;
use crate::port::outbound::report::ReportReader;

/// Execute `dashboard`.
pub fn execute<R>(reader: &R) -> Result<()>
where
    R: ReportReader + ?Sized,
{
    let report = build_dashboard(reader)?;
    if output::is_json() {
        output::json_command("dashboard", &report)?;
        return Ok(());
    }

    let totals = report.totals;
    output::section("Dashboard");
    output::field("Listings", totals.total_listings);
    output::field("Claims", totals.total_claims);
    output::field("Food quantity", output::highlight(totals.total_quantity));
    output::field("Claimed quantity", totals.claimed_quantity);
    if totals.total_listings == 0 {
        output::hint("add data with `foodbridge provider add` and `foodbridge listing add`");
    }

    output::section("Quantity per listing");
    output::result_set(&report.listing_quantities);

    output::section("Food claimed per receiver");
    output::result_set(&report.claimed_by_receiver);
    Ok(())
}
