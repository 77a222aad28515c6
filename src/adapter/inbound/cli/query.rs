//! Handler for the `query` command group.

use serde_json::json;

use crate::adapter::inbound::cli::command::QueryCommand;
use crate::adapter::inbound::cli::output;
use crate::adapter::inbound::cli::view::{self, CatalogRow};
use crate::application::catalog::{self, CATALOG};
use crate::domain::result_set::ResultSet;
use crate::error::Result;
use crate::port::outbound::report::ReportReader;

/// Execute a `query` subcommand.
pub fn execute<R>(reader: &R, command: &QueryCommand) -> Result<()>
where
    R: ReportReader + ?Sized,
{
    match command {
        QueryCommand::List => execute_list(),
        QueryCommand::Run { key } => execute_run(reader, key),
        QueryCommand::Sql { sql } => execute_sql(reader, sql),
    }
}

fn execute_list() -> Result<()> {
    if output::is_json() {
        output::json_command("query.list", &CATALOG)?;
        return Ok(());
    }

    output::section("Predefined Queries");
    let rows: Vec<CatalogRow> = view::rows(&CATALOG);
    output::rows(&rows, "no queries");
    output::hint("foodbridge query run <number|slug>");
    Ok(())
}

fn execute_run<R>(reader: &R, key: &str) -> Result<()>
where
    R: ReportReader + ?Sized,
{
    let (query, result) = catalog::run(reader, key)?;
    if output::is_json() {
        output::json_output(json!({
            "command": "query.run",
            "payload": {
                "number": query.number,
                "slug": query.slug,
                "title": query.title,
                "columns": &result.columns,
                "records": result.to_records(),
            },
        }));
        return Ok(());
    }

    output::section(&format!("{}. {}", query.number, query.title));
    output::result_set(&result);
    Ok(())
}

fn execute_sql<R>(reader: &R, sql: &str) -> Result<()>
where
    R: ReportReader + ?Sized,
{
    let result = reader.select(sql)?;
    if output::is_json() {
        print_json("query.sql", &result);
        return Ok(());
    }

    output::section("Query Result");
    output::result_set(&result);
    Ok(())
}

fn print_json(command: &str, result: &ResultSet) {
    output::json_output(json!({
        "command": command,
        "payload": {
            "columns": &result.columns,
            "records": result.to_records(),
        },
    }));
}
