use std::path::Path;

use anyhow::{Context, Result};

use crate::data::model::Table;

/// Write `table` as a headered CSV that the CSV loader can read back.
pub fn write_csv(path: &Path, table: &Table) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    let mut header = vec!["Name", "Sex", "Births"];
    header.extend(table.columns.iter().map(String::as_str));
    writer.write_record(&header).context("writing CSV header")?;

    for record in &table.records {
        let mut row = vec![record.name.clone(), record.sex.clone(), record.births.to_string()];
        row.extend(table.columns.iter().map(|col| {
            record
                .extra
                .get(col)
                .map(|v| v.to_string())
                .unwrap_or_default()
        }));
        writer.write_record(&row).context("writing CSV row")?;
    }

    writer.flush().context("flushing CSV")?;
    log::info!("Exported {} rows to {}", table.len(), path.display());
    Ok(())
}
