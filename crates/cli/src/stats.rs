//! `bookstore stats` — row counts per table.

use anyhow::Result;
use std::path::PathBuf;

pub fn run_stats(db: Option<PathBuf>, json: bool) -> Result<()> {
    let db = crate::open_db(db)?;
    let counts = db.table_counts()?;

    if json {
        let rows: Vec<serde_json::Value> = counts
            .iter()
            .map(|(table, rows)| serde_json::json!({ "table": table, "rows": rows }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let width = counts.iter().map(|(t, _)| t.len()).max().unwrap_or(0);
    for (table, rows) in &counts {
        println!("{table:<width$}  {rows}");
    }
    Ok(())
}
