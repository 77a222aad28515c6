//! Handler for `foodbridge insights`.

use chrono::Local;

use crate::adapter::inbound::cli::command::InsightsArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::inbound::cli::view::{
    self, CityListingsRow, FoodQuantityRow, MonthRow, NearExpiryRow, RiskRow, StatusRow,
};
use crate::application::insights::{build_insights, InsightsOptions, InsightsReport};
use crate::error::Result;
use crate::infrastructure::config::analytics::AnalyticsConfig;
use crate::port::outbound::report::ReportReader;

/// Resolve options from the `[analytics]` section and command flags.
#[must_use]
pub fn options(analytics: &AnalyticsConfig, args: &InsightsArgs) -> InsightsOptions {
    let mut options = analytics.insights_options(args.city.clone());
    if let Some(top) = args.top {
        options.risk_top_n = usize::from(top);
    }
    options
}

/// Execute `insights`.
pub fn execute<R>(reader: &R, analytics: &AnalyticsConfig, args: &InsightsArgs) -> Result<()>
where
    R: ReportReader + ?Sized,
{
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let report = build_insights(reader, today, &options(analytics, args))?;
    if output::is_json() {
        output::json_command("insights", &report)?;
        return Ok(());
    }
    print_report(&report);
    Ok(())
}

fn print_report(report: &InsightsReport) {
    output::section("Insights");
    output::field("As of", report.today);
    output::field("City", report.city.as_deref().unwrap_or("All"));
    if !report.cities.is_empty() {
        output::field("Cities", report.cities.join(", "));
    }
    if let Some(city) = report.city.as_deref() {
        if !report.cities.iter().any(|c| c == city) {
            output::warning(&format!("no provider is located in {city}"));
        }
    }

    let kpis = report.kpis;
    output::section("Key Figures");
    output::field("Food quantity", output::highlight(kpis.total_quantity));
    output::field("Listings", kpis.listings);
    output::field("Claims", kpis.claims);
    output::field("Completed", kpis.completed_claims);

    output::section("Top Foods by Quantity");
    output::rows(
        &view::rows::<_, FoodQuantityRow>(&report.top_foods),
        "no listings",
    );

    output::section("Listings per City");
    output::rows(
        &view::rows::<_, CityListingsRow>(&report.listings_by_city),
        "no listings",
    );

    output::section("Expiring Soon");
    output::rows(
        &view::rows::<_, NearExpiryRow>(&report.near_expiry),
        "nothing expires in the next few days",
    );

    output::section("Claim Status");
    output::rows(
        &view::rows::<_, StatusRow>(&report.status_distribution),
        "no claims",
    );

    output::section("Waste Risk");
    output::rows(
        &view::rows::<_, RiskRow>(&report.waste_risk),
        "no listings with a usable expiry date",
    );
    if report.waste_risk.iter().any(|risk| risk.is_expired()) {
        output::note("Expired items are scored as if they expire in one day.");
    }

    output::section("Monthly Trend");
    output::rows(
        &view::rows::<_, MonthRow>(&report.monthly_trend),
        "no expiry dates to group by month",
    );
    match &report.forecast {
        Some(forecast) => {
            let months: Vec<&str> = forecast
                .months_used
                .iter()
                .map(|month| month.month.as_str())
                .collect();
            output::field("Next month", output::highlight(forecast.value));
            output::note(&format!(
                "naive forecast: mean {:.2} of {}",
                forecast.mean,
                months.join(", ")
            ));
        }
        None => output::no_data("not enough history for a forecast"),
    }

    output::section("Provider Contacts");
    output::result_set(&report.provider_contacts);

    output::section("Receiver Contacts");
    output::result_set(&report.receiver_contacts);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{seed_today, TempDatabase};

    #[test]
    fn top_flag_overrides_config() {
        let analytics = AnalyticsConfig::default();
        let args = InsightsArgs {
            city: Some("Pune".to_string()),
            top: Some(2),
            today: None,
        };
        let options = options(&analytics, &args);
        assert_eq!(options.risk_top_n, 2);
        assert_eq!(options.city.as_deref(), Some("Pune"));
        assert_eq!(options.forecast_window, analytics.forecast_window);
    }

    #[test]
    fn insights_print_for_seeded_and_empty_data() {
        let args = InsightsArgs {
            today: Some(seed_today()),
            ..Default::default()
        };
        let seeded = TempDatabase::seeded("cli-insights");
        assert!(execute(&seeded.reports(), &AnalyticsConfig::default(), &args).is_ok());

        let empty = TempDatabase::create("cli-insights-empty");
        assert!(execute(&empty.reports(), &AnalyticsConfig::default(), &args).is_ok());
    }
}
