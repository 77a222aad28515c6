//! Handler for `foodbridge tables`.

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::domain::entity::TableName;
use crate::error::Result;
use crate::port::outbound::report::ReportReader;

/// Execute `tables <table>`.
pub fn execute<R>(reader: &R, table: TableName) -> Result<()>
where
    R: ReportReader + ?Sized,
{
    let result = reader.table(table)?;
    if output::is_json() {
        output::json_output(json!({
            "command": "tables",
            "payload": {
                "table": table,
                "columns": &result.columns,
                "records": result.to_records(),
            },
        }));
        return Ok(());
    }

    output::section(&format!("Table {}", output::highlight(table)));
    output::result_set(&result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::TempDatabase;

    #[test]
    fn every_table_prints() {
        let db = TempDatabase::seeded("cli-tables");
        let reports = db.reports();
        for table in TableName::ALL {
            assert!(execute(&reports, table).is_ok());
        }
    }
}
