//! Command dispatch.
//!
//! Loads configuration, resolves the database path, opens the pool for the
//! commands that need it and hands the adapters to the handlers.

use std::path::PathBuf;

use tracing::debug;

use crate::adapter::inbound::cli::command::{Cli, Commands, ConfigCommand};
use crate::adapter::inbound::cli::{
    config, dashboard, init, insights, listings, manage, paths, query, tables,
};
use crate::adapter::outbound::sqlite::database::connection;
use crate::adapter::outbound::sqlite::{SqliteReportReader, SqliteStore};
use crate::error::Result;
use crate::infrastructure::config::logging::LoggingConfig;
use crate::infrastructure::config::settings::Config;

/// Global flags that decide where configuration and data live.
#[derive(Debug, Clone, Default)]
pub struct Locations {
    /// `--config`; `None` means the default file, which may be absent.
    pub config: Option<PathBuf>,
    /// `--db`.
    pub database: Option<PathBuf>,
}

impl Locations {
    /// Config file to read or write.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(paths::default_config)
    }

    /// Load configuration.
    ///
    /// An explicit `--config` must exist; the default location may not.
    ///
    /// # Errors
    /// Returns configuration read, parse or validation errors.
    pub fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load(path),
            None => Config::load_or_default(paths::default_config()),
        }
    }

    /// Database file: `--db`, then config (with the environment override
    /// already applied), then the default under the home directory.
    #[must_use]
    pub fn database_path(&self, config: &Config) -> PathBuf {
        self.database
            .clone()
            .or_else(|| config.database.path.clone())
            .unwrap_or_else(paths::default_database)
    }
}

/// An open database and the configuration it was opened with.
struct Session {
    config: Config,
    database: PathBuf,
    store: SqliteStore,
    reports: SqliteReportReader,
}

impl Session {
    fn open(locations: &Locations, verbose: u8) -> Result<Self> {
        let config = locations.load_config()?;
        config.init_logging(verbose);
        let database = locations.database_path(&config);
        debug!(path = %database.display(), "Opening database");
        let pool = connection::open(&database, config.database.connection_options())?;
        Ok(Self {
            config,
            database,
            store: SqliteStore::new(pool.clone()),
            reports: SqliteReportReader::new(pool),
        })
    }
}

/// Run the parsed command line.
///
/// # Errors
/// Returns the first failure from configuration, storage or the handler.
pub fn execute(cli: Cli) -> Result<()> {
    let locations = Locations {
        config: cli.config,
        database: cli.db,
    };
    let verbose = cli.verbose;

    match cli.command {
        Commands::Config(command) => execute_config(command, &locations, verbose),
        Commands::Init => {
            let session = Session::open(&locations, verbose)?;
            init::execute(&session.database, &session.reports)
        }
        Commands::Dashboard => dashboard::execute(&Session::open(&locations, verbose)?.reports),
        Commands::Listings(args) => {
            listings::execute(&Session::open(&locations, verbose)?.reports, &args)
        }
        Commands::Tables(args) => {
            tables::execute(&Session::open(&locations, verbose)?.reports, args.table)
        }
        Commands::Provider(command) => {
            manage::provider(&Session::open(&locations, verbose)?.store, command)
        }
        Commands::Receiver(command) => {
            manage::receiver(&Session::open(&locations, verbose)?.store, command)
        }
        Commands::Listing(command) => {
            manage::listing(&Session::open(&locations, verbose)?.store, command)
        }
        Commands::Claim(command) => {
            manage::claim(&Session::open(&locations, verbose)?.store, command)
        }
        Commands::Query(command) => {
            query::execute(&Session::open(&locations, verbose)?.reports, &command)
        }
        Commands::Insights(args) => {
            let session = Session::open(&locations, verbose)?;
            insights::execute(&session.reports, &session.config.analytics, &args)
        }
    }
}

/// `config` commands never touch the database, and `init`/`validate` must
/// work even when the current file is broken.
fn execute_config(command: ConfigCommand, locations: &Locations, verbose: u8) -> Result<()> {
    LoggingConfig::default().init(verbose);
    let target = |path: Option<PathBuf>| path.unwrap_or_else(|| locations.config_path());
    match command {
        ConfigCommand::Init(args) => {
            let path = target(args.path);
            config::execute_init(&path, args.force)
        }
        ConfigCommand::Show => {
            let config = locations.load_config()?;
            let database = locations.database_path(&config);
            config::execute_show(&config, &locations.config_path(), &database)
        }
        ConfigCommand::Validate(args) => {
            let path = target(args.path);
            config::execute_validate(&path)
        }
    }
}
