use eframe::egui::{self, RichText, Ui};

use crate::data::filter::NameTotal;
use crate::data::model::{Record, Table};
use crate::data::stats::Summary;

// ---------------------------------------------------------------------------
// Record preview
// ---------------------------------------------------------------------------

/// Show `rows` (taken from `table`) with Name, Sex, Births and any extra columns.
pub fn records_table(ui: &mut Ui, id: &str, table: &Table, rows: &[Record]) {
    egui::Grid::new(id)
        .striped(true)
        .min_col_width(60.0)
        .spacing([12.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            for title in ["Name", "Sex", "Births"] {
                ui.label(RichText::new(title).strong());
            }
            for col in &table.columns {
                ui.label(RichText::new(col).strong());
            }
            ui.end_row();

            for record in rows {
                ui.label(&record.name);
                ui.label(&record.sex);
                ui.label(record.births.to_string());
                for col in &table.columns {
                    let cell = record
                        .extra
                        .get(col)
                        .map(|v| v.to_string())
                        .unwrap_or_default();
                    ui.label(cell);
                }
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// Top-N totals
// ---------------------------------------------------------------------------

pub fn totals_table(ui: &mut Ui, id: &str, totals: &[NameTotal]) {
    egui::Grid::new(id)
        .striped(true)
        .min_col_width(60.0)
        .spacing([12.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            ui.label(RichText::new("Name").strong());
            ui.label(RichText::new("Births").strong());
            ui.end_row();

            for (rank, total) in totals.iter().enumerate() {
                ui.label(rank.to_string());
                ui.label(&total.name);
                ui.label(total.total_births.to_string());
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// describe() output
// ---------------------------------------------------------------------------

/// Statistics as rows, one column per summarised table column.
pub fn summary_grid(ui: &mut Ui, id: &str, summary: &Summary) {
    let per_column: Vec<_> = summary.columns.iter().map(|c| c.rows()).collect();
    let Some(first) = per_column.first() else {
        return;
    };
    let labels: Vec<&str> = first.iter().map(|(label, _)| *label).collect();

    egui::Grid::new(id)
        .striped(true)
        .num_columns(summary.columns.len() + 1)
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            for col in &summary.columns {
                ui.strong(&col.column);
            }
            ui.end_row();

            for (i, label) in labels.iter().enumerate() {
                ui.label(*label);
                for rows in &per_column {
                    ui.monospace(format_stat(rows[i].1));
                }
                ui.end_row();
            }
        });
}

fn format_stat(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.2}")
    }
}
