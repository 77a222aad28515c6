use clap::Parser;
use foodbridge::adapter::inbound::cli::command::Cli;
use foodbridge::adapter::inbound::cli::output::{self, OutputConfig};
use foodbridge::adapter::inbound::cli::run;
use tracing::error;

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));
    output::set_color(cli.color.forced());

    if let Err(e) = run::execute(cli) {
        error!(error = %e, "Command failed");
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
