//! Command-line interface definitions.
//!
//! Defines the CLI structure for the foodbridge application using `clap`.
//! Each dashboard view is a subcommand: headline numbers, filtered listings,
//! raw tables, record management, canned and ad-hoc queries, and insights.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand};

use crate::domain::entity::{ClaimStatus, TableName, CLAIM_TIMESTAMP_FORMAT};

/// Surplus-food donation tracker
#[derive(Parser, Debug)]
#[command(name = "foodbridge")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file [default: ~/.foodbridge/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite database (overrides config and FOODBRIDGE_DATABASE)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Forced color state, `None` for terminal detection.
    #[must_use]
    pub const fn forced(self) -> Option<bool> {
        match self {
            Self::Auto => None,
            Self::Always => Some(true),
            Self::Never => Some(false),
        }
    }
}

/// Top-level subcommands for the foodbridge CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the database and apply pending migrations
    Init,

    /// Show headline totals and quantity breakdowns
    Dashboard,

    /// Browse food listings with optional filters
    Listings(ListingsArgs),

    /// Print every row of one table
    Tables(TablesArgs),

    /// Manage food providers
    #[command(subcommand)]
    Provider(ProviderCommand),

    /// Manage receivers
    #[command(subcommand)]
    Receiver(ReceiverCommand),

    /// Manage food listings
    #[command(subcommand)]
    Listing(ListingCommand),

    /// Manage claims
    #[command(subcommand)]
    Claim(ClaimCommand),

    /// Run predefined or ad-hoc read-only queries
    #[command(subcommand)]
    Query(QueryCommand),

    /// Exploratory analytics, waste risk and a naive forecast
    Insights(InsightsArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Arguments for `foodbridge listings`.
///
/// Values within one filter are OR-ed; different filters are AND-ed.
/// Repeat a flag or separate values with commas.
#[derive(Args, Debug, Default)]
pub struct ListingsArgs {
    /// Keep listings at these locations.
    #[arg(long = "location", value_delimiter = ',')]
    pub locations: Vec<String>,

    /// Keep listings from these provider ids.
    #[arg(long = "provider", value_delimiter = ',')]
    pub providers: Vec<i32>,

    /// Keep listings of these food types.
    #[arg(long = "food-type", value_delimiter = ',')]
    pub food_types: Vec<String>,

    /// Keep listings of these meal types.
    #[arg(long = "meal-type", value_delimiter = ',')]
    pub meal_types: Vec<String>,

    /// Print the values available for each filter instead of listings.
    #[arg(long)]
    pub facets: bool,
}

#[derive(Args, Debug)]
pub struct TablesArgs {
    /// providers, receivers, food-listings or claims
    pub table: TableName,
}

/// Subcommands for `foodbridge query`.
#[derive(Subcommand, Debug)]
pub enum QueryCommand {
    /// List the predefined queries.
    List,
    /// Run a predefined query by number or slug.
    Run {
        /// Query number (1-20) or slug, e.g. `common-food-types`.
        key: String,
    },
    /// Run a single read-only SELECT statement.
    Sql {
        /// The statement, e.g. "SELECT city, COUNT(*) FROM providers GROUP BY city".
        sql: String,
    },
}

/// Arguments for `foodbridge insights`.
#[derive(Args, Debug, Default)]
pub struct InsightsArgs {
    /// Restrict to listings whose provider is in this city.
    #[arg(long)]
    pub city: Option<String>,

    /// Number of rows in the waste-risk ranking.
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub top: Option<u16>,

    /// Evaluate as of this date (YYYY-MM-DD) instead of today.
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

/// Subcommands for `foodbridge config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate a configuration file for correctness.
    Validate(ConfigValidateArgs),
}

/// Arguments for `config init`.
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output path [default: --config or ~/.foodbridge/config.toml]
    pub path: Option<PathBuf>,
    /// Overwrite the file if it already exists.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
pub struct ConfigValidateArgs {
    /// File to check [default: --config or ~/.foodbridge/config.toml]
    pub path: Option<PathBuf>,
}

/// Arguments shared by every `delete` subcommand.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Primary key of the row to delete.
    pub id: i32,
    /// Skip the confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments shared by every `show` subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Primary key; omit to list every row.
    pub id: Option<i32>,
}

/// Subcommands for `foodbridge provider`.
#[derive(Subcommand, Debug)]
pub enum ProviderCommand {
    /// Add a provider.
    Add(ProviderAddArgs),
    /// Change fields of a provider.
    Update(ProviderUpdateArgs),
    /// Delete a provider.
    Delete(DeleteArgs),
    /// Show one provider or all of them.
    Show(ShowArgs),
}

#[derive(Args, Debug)]
pub struct ProviderAddArgs {
    #[arg(long)]
    pub name: String,
    /// Provider type, e.g. Restaurant or Grocery Store.
    #[arg(long = "type")]
    pub provider_type: String,
    #[arg(long)]
    pub address: String,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub contact: String,
}

#[derive(Args, Debug)]
pub struct ProviderUpdateArgs {
    pub id: i32,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long = "type")]
    pub provider_type: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub contact: Option<String>,
}

/// Subcommands for `foodbridge receiver`.
#[derive(Subcommand, Debug)]
pub enum ReceiverCommand {
    /// Add a receiver.
    Add(ReceiverAddArgs),
    /// Change fields of a receiver.
    Update(ReceiverUpdateArgs),
    /// Delete a receiver.
    Delete(DeleteArgs),
    /// Show one receiver or all of them.
    Show(ShowArgs),
}

#[derive(Args, Debug)]
pub struct ReceiverAddArgs {
    #[arg(long)]
    pub name: String,
    /// Receiver type, e.g. Shelter or NGO.
    #[arg(long = "type")]
    pub receiver_type: String,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub contact: String,
}

#[derive(Args, Debug)]
pub struct ReceiverUpdateArgs {
    pub id: i32,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long = "type")]
    pub receiver_type: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub contact: Option<String>,
}

/// Subcommands for `foodbridge listing`.
#[derive(Subcommand, Debug)]
pub enum ListingCommand {
    /// Add a food listing.
    Add(ListingAddArgs),
    /// Change fields of a food listing.
    Update(ListingUpdateArgs),
    /// Delete a food listing.
    Delete(DeleteArgs),
    /// Show one listing or all of them.
    Show(ShowArgs),
}

#[derive(Args, Debug)]
pub struct ListingAddArgs {
    /// Id of the donating provider.
    #[arg(long = "provider")]
    pub provider_id: i32,
    #[arg(long)]
    pub food_name: String,
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..))]
    pub quantity: i32,
    /// Expiry date, YYYY-MM-DD.
    #[arg(long = "expiry")]
    pub expiry_date: Option<NaiveDate>,
    #[arg(long)]
    pub food_type: Option<String>,
    #[arg(long)]
    pub meal_type: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
}

#[derive(Args, Debug)]
pub struct ListingUpdateArgs {
    pub id: i32,
    #[arg(long = "provider")]
    pub provider_id: Option<i32>,
    #[arg(long)]
    pub food_name: Option<String>,
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..))]
    pub quantity: Option<i32>,
    #[arg(long = "expiry")]
    pub expiry_date: Option<NaiveDate>,
    #[arg(long)]
    pub food_type: Option<String>,
    #[arg(long)]
    pub meal_type: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
}

/// Subcommands for `foodbridge claim`.
#[derive(Subcommand, Debug)]
pub enum ClaimCommand {
    /// Record a claim.
    Add(ClaimAddArgs),
    /// Change fields of a claim.
    Update(ClaimUpdateArgs),
    /// Delete a claim.
    Delete(DeleteArgs),
    /// Show one claim or all of them.
    Show(ShowArgs),
}

#[derive(Args, Debug)]
pub struct ClaimAddArgs {
    /// Id of the claimed listing.
    #[arg(long = "food")]
    pub food_id: i32,
    /// Id of the claiming receiver.
    #[arg(long = "receiver")]
    pub receiver_id: i32,
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..))]
    pub quantity: Option<i32>,
    /// Pending, Completed or Cancelled.
    #[arg(long, default_value_t = ClaimStatus::Pending)]
    pub status: ClaimStatus,
    /// Claim time, "YYYY-MM-DD HH:MM:SS" [default: now].
    #[arg(long, value_parser = parse_timestamp)]
    pub timestamp: Option<NaiveDateTime>,
}

#[derive(Args, Debug)]
pub struct ClaimUpdateArgs {
    pub id: i32,
    #[arg(long = "food")]
    pub food_id: Option<i32>,
    #[arg(long = "receiver")]
    pub receiver_id: Option<i32>,
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..))]
    pub quantity: Option<i32>,
    #[arg(long)]
    pub status: Option<ClaimStatus>,
    #[arg(long, value_parser = parse_timestamp)]
    pub timestamp: Option<NaiveDateTime>,
}

/// Accept `YYYY-MM-DD HH:MM:SS` or the ISO `T` separator.
fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, String> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, CLAIM_TIMESTAMP_FORMAT)
        .or_else(|_| raw.parse::<NaiveDateTime>())
        .map_err(|_| format!("expected \"YYYY-MM-DD HH:MM:SS\", got '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("foodbridge").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_command_factory_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "foodbridge");
        assert!(cmd.get_version().is_some());
    }

    #[test]
    fn test_color_choice_forced() {
        assert_eq!(ColorChoice::default().forced(), None);
        assert_eq!(ColorChoice::Always.forced(), Some(true));
        assert_eq!(ColorChoice::Never.forced(), Some(false));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["dashboard", "--json", "--db", "x.db", "-vv"]);
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.db, Some(PathBuf::from("x.db")));
        assert!(matches!(cli.command, Commands::Dashboard));
    }

    #[test]
    fn test_listings_filters_repeat_and_split() {
        let cli = parse(&[
            "listings",
            "--location",
            "Pune,Mumbai",
            "--provider",
            "1",
            "--provider",
            "3",
            "--meal-type",
            "Lunch",
        ]);
        let Commands::Listings(args) = cli.command else {
            panic!("expected listings");
        };
        assert_eq!(args.locations, vec!["Pune", "Mumbai"]);
        assert_eq!(args.providers, vec![1, 3]);
        assert_eq!(args.meal_types, vec!["Lunch"]);
        assert!(args.food_types.is_empty());
        assert!(!args.facets);
    }

    #[test]
    fn test_tables_accepts_hyphenated_name() {
        let cli = parse(&["tables", "food-listings"]);
        let Commands::Tables(args) = cli.command else {
            panic!("expected tables");
        };
        assert_eq!(args.table, TableName::FoodListings);
    }

    #[test]
    fn test_tables_rejects_unknown_name() {
        assert!(Cli::try_parse_from(["foodbridge", "tables", "donors"]).is_err());
    }

    #[test]
    fn test_listing_add_rejects_negative_quantity() {
        let result = Cli::try_parse_from([
            "foodbridge",
            "listing",
            "add",
            "--provider",
            "1",
            "--food-name",
            "Rice",
            "--quantity",
            "-3",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_listing_add_parses_expiry() {
        let cli = parse(&[
            "listing",
            "add",
            "--provider",
            "1",
            "--food-name",
            "Rice",
            "--quantity",
            "3",
            "--expiry",
            "2026-03-05",
        ]);
        let Commands::Listing(ListingCommand::Add(args)) = cli.command else {
            panic!("expected listing add");
        };
        assert_eq!(args.expiry_date, NaiveDate::from_ymd_opt(2026, 3, 5));
        assert_eq!(args.quantity, 3);
    }

    #[test]
    fn test_claim_add_defaults_to_pending() {
        let cli = parse(&["claim", "add", "--food", "1", "--receiver", "2"]);
        let Commands::Claim(ClaimCommand::Add(args)) = cli.command else {
            panic!("expected claim add");
        };
        assert_eq!(args.status, ClaimStatus::Pending);
        assert!(args.timestamp.is_none());
    }

    #[test]
    fn test_claim_status_is_case_insensitive() {
        let cli = parse(&["claim", "update", "4", "--status", "completed"]);
        let Commands::Claim(ClaimCommand::Update(args)) = cli.command else {
            panic!("expected claim update");
        };
        assert_eq!(args.id, 4);
        assert_eq!(args.status, Some(ClaimStatus::Completed));
    }

    #[test]
    fn test_claim_rejects_unknown_status() {
        let result = Cli::try_parse_from([
            "foodbridge",
            "claim",
            "add",
            "--food",
            "1",
            "--receiver",
            "2",
            "--status",
            "Shipped",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 3, 1)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .unwrap();
        assert_eq!(parse_timestamp("2026-03-01 09:30:00"), Ok(expected));
        assert_eq!(parse_timestamp("2026-03-01T09:30:00"), Ok(expected));
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_delete_yes_flag() {
        let cli = parse(&["provider", "delete", "7", "--yes"]);
        let Commands::Provider(ProviderCommand::Delete(args)) = cli.command else {
            panic!("expected provider delete");
        };
        assert_eq!(args.id, 7);
        assert!(args.yes);
    }

    #[test]
    fn test_insights_top_must_be_positive() {
        assert!(Cli::try_parse_from(["foodbridge", "insights", "--top", "0"]).is_err());
        let cli = parse(&["insights", "--top", "3", "--city", "Pune"]);
        let Commands::Insights(args) = cli.command else {
            panic!("expected insights");
        };
        assert_eq!(args.top, Some(3));
        assert_eq!(args.city.as_deref(), Some("Pune"));
    }

    #[test]
    fn test_query_sql_takes_one_argument() {
        let cli = parse(&["query", "sql", "SELECT 1"]);
        assert!(matches!(
            cli.command,
            Commands::Query(QueryCommand::Sql { ref sql }) if sql == "SELECT 1"
        ));
    }

    #[test]
    fn test_config_init_force() {
        let cli = parse(&["config", "init", "--force"]);
        let Commands::Config(ConfigCommand::Init(args)) = cli.command else {
            panic!("expected config init");
        };
        assert!(args.force);
        assert!(args.path.is_none());
    }
}
