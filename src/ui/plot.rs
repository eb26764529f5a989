use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::{generate_palette, sex_color};
use crate::data::filter::NameTotal;
use crate::data::model::{Sex, Table};

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Occurrences of the selected name
// ---------------------------------------------------------------------------

/// One bar per matching row; hovering a bar shows the row's extra columns.
pub fn name_occurrences_chart(ui: &mut Ui, matches: &Table, sex: Sex) {
    let color = sex_color(sex);
    let bars: Vec<Bar> = matches
        .records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let mut label = record.name.clone();
            for col in &matches.columns {
                if let Some(value) = record.extra.get(col) {
                    label.push_str(&format!(" {col}={value}"));
                }
            }
            Bar::new(i as f64, record.births as f64)
                .name(label)
                .fill(color)
                .width(0.8)
        })
        .collect();

    Plot::new("name_occurrences")
        .height(CHART_HEIGHT)
        .x_axis_label("Row")
        .y_axis_label("Births")
        .allow_scroll(false)
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Births"));
        });
}

// ---------------------------------------------------------------------------
// Top names
// ---------------------------------------------------------------------------

/// Ranked totals, one coloured bar per name, in rank order.
pub fn top_names_chart(ui: &mut Ui, id: &str, totals: &[NameTotal]) {
    let palette = generate_palette(totals.len());

    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Rank")
        .y_axis_label("Total births")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (rank, (total, color)) in totals.iter().zip(palette).enumerate() {
                let bar = Bar::new(rank as f64, total.total_births as f64)
                    .name(&total.name)
                    .fill(color)
                    .width(0.8);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(&total.name).color(color));
            }
        });
}
