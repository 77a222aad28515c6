//! Handler for `foodbridge listings`.

use serde_json::json;

use crate::adapter::inbound::cli::command::ListingsArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::inbound::cli::view::{self, ListingRow};
use crate::error::Result;
use crate::port::outbound::report::{ListingFacets, ListingFilter, ReportReader};

impl From<&ListingsArgs> for ListingFilter {
    fn from(args: &ListingsArgs) -> Self {
        Self {
            locations: args.locations.clone(),
            provider_ids: args.providers.clone(),
            food_types: args.food_types.clone(),
            meal_types: args.meal_types.clone(),
        }
    }
}

/// Execute `listings`.
pub fn execute<R>(reader: &R, args: &ListingsArgs) -> Result<()>
where
    R: ReportReader + ?Sized,
{
    if args.facets {
        return print_facets(&reader.listing_facets()?);
    }

    let filter = ListingFilter::from(args);
    let listings = reader.filter_listings(&filter)?;
    if output::is_json() {
        output::json_output(json!({
            "command": "listings",
            "payload": {
                "filter": {
                    "locations": filter.locations,
                    "provider_ids": filter.provider_ids,
                    "food_types": filter.food_types,
                    "meal_types": filter.meal_types,
                },
                "listings": listings,
            },
        }));
        return Ok(());
    }

    output::section("Food Listings");
    if !filter.is_unfiltered() {
        describe_filter(&filter);
    }
    let rows: Vec<ListingRow> = view::rows(&listings);
    output::rows(&rows, "no listings match the filters");
    if !rows.is_empty() {
        let quantity: i64 = listings.iter().map(|l| i64::from(l.quantity)).sum();
        output::note(&format!("{} listings, {} items", rows.len(), quantity));
    }
    Ok(())
}

fn describe_filter(filter: &ListingFilter) {
    if !filter.locations.is_empty() {
        output::field("Location", filter.locations.join(", "));
    }
    if !filter.provider_ids.is_empty() {
        let ids: Vec<String> = filter.provider_ids.iter().map(i32::to_string).collect();
        output::field("Provider", ids.join(", "));
    }
    if !filter.food_types.is_empty() {
        output::field("Food type", filter.food_types.join(", "));
    }
    if !filter.meal_types.is_empty() {
        output::field("Meal type", filter.meal_types.join(", "));
    }
}

fn print_facets(facets: &ListingFacets) -> Result<()> {
    if output::is_json() {
        output::json_command("listings.facets", facets)?;
        return Ok(());
    }

    let facet = |title: &str, values: Vec<String>| {
        output::section(title);
        if values.is_empty() {
            output::no_data("no values");
        } else {
            for value in values {
                output::note(&format!("- {value}"));
            }
        }
    };
    facet("Locations", facets.locations.clone());
    facet(
        "Providers",
        facets.provider_ids.iter().map(i32::to_string).collect(),
    );
    facet("Food types", facets.food_types.clone());
    facet("Meal types", facets.meal_types.clone());
    Ok(())
}
