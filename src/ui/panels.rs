use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::loader::Source;
use crate::data::model::Sex;
use crate::state::{AppState, Tab};
use crate::ui::{plot, tables};

// ---------------------------------------------------------------------------
// Left side panel – configuration widgets
// ---------------------------------------------------------------------------

/// Render the sidebar and recompute the views if the selection changed.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Configuration");
    ui.separator();

    if state.loaded.is_none() {
        ui.label("No dataset loaded.");
        return;
    }
    let max = state.max_births();

    ui.strong("Select Gender");
    ui.horizontal(|ui: &mut Ui| {
        for sex in Sex::ALL {
            ui.radio_value(&mut state.params.sex, sex, sex.code());
        }
    });
    ui.add_space(6.0);

    ui.strong("Select Birth Count Range");
    let lo = ui.add(egui::Slider::new(&mut state.params.min_births, 0..=max).text("min"));
    let hi = ui.add(egui::Slider::new(&mut state.params.max_births, 0..=max).text("max"));
    // Dragging one handle past the other pushes the other along.
    if state.params.min_births > state.params.max_births {
        if lo.changed() {
            state.params.max_births = state.params.min_births;
        } else if hi.changed() {
            state.params.min_births = state.params.max_births;
        }
    }
    ui.add_space(6.0);

    ui.strong("Enter a Name to Explore");
    ui.text_edit_singleline(&mut state.params.name);

    ui.add_space(12.0);
    ui.separator();
    ui.label(RichText::new("Deployment Instructions").strong());
    ui.label(format!(
        "1. Ensure the dataset '{}' is at the configured path.",
        state.source.path().display()
    ));
    ui.label("2. Run `name-trends [PATH]` to start the app.");

    state.refresh_view();
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Open folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
            ui.separator();
            let can_export = state.view.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export filtered CSV…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(loaded), Some(view)) = (&state.loaded, &state.view) {
            ui.label(format!(
                "{} records loaded, {} matching",
                loaded.table.len(),
                view.filtered.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the dashboard body, or the load error that halted the session.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    if let Some(err) = &state.load_error {
        // First line is the condition, any further lines name failed files.
        let mut lines = err.lines();
        ui.vertical_centered(|ui: &mut Ui| {
            if let Some(headline) = lines.next() {
                ui.label(RichText::new(headline).color(Color32::RED).heading());
            }
            for line in lines {
                ui.label(RichText::new(line).color(Color32::YELLOW));
            }
        });
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        ui.selectable_value(&mut state.tab, Tab::NameTrends, "Name Trends");
        ui.selectable_value(&mut state.tab, Tab::DatasetOverview, "Dataset Overview");
    });
    ui.separator();

    let (Some(loaded), Some(view)) = (&state.loaded, &state.view) else {
        return;
    };
    let params = &state.params;
    let head_rows = state.config.head_rows;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for warning in state.skipped_files() {
                ui.label(RichText::new(format!("Skipped {warning}")).color(Color32::YELLOW));
            }

            match state.tab {
                Tab::NameTrends => {
                    ui.heading("Name Trends");
                    if view.name_matches.is_empty() {
                        ui.label(format!(
                            "No data found for the name '{}' in the selected range.",
                            params.name
                        ));
                    } else {
                        ui.strong(format!("Occurrences of '{}'", params.name));
                        plot::name_occurrences_chart(ui, &view.name_matches, params.sex);

                        ui.add_space(8.0);
                        ui.strong(format!("Summary for '{}'", params.name));
                        tables::summary_grid(ui, "name_summary", &view.name_summary);

                        ui.add_space(8.0);
                        ui.strong("Top 5 Names by Births");
                        tables::totals_table(ui, "top_five", &view.top_five);
                    }
                }
                Tab::DatasetOverview => {
                    ui.heading("Dataset Overview");
                    ui.label("Data successfully loaded:");
                    tables::records_table(
                        ui,
                        "dataset_head",
                        &loaded.table,
                        loaded.table.head(head_rows),
                    );

                    ui.add_space(8.0);
                    ui.label("View the first few rows of the filtered dataset:");
                    tables::records_table(
                        ui,
                        "filtered_head",
                        &view.filtered,
                        view.filtered.head(head_rows),
                    );

                    ui.add_space(8.0);
                    ui.label("Summary Statistics:");
                    tables::summary_grid(ui, "filtered_summary", &view.filtered_summary);
                }
            }

            ui.add_space(12.0);
            ui.separator();
            ui.heading("Additional Insights");
            ui.label(format!("Top 10 {} names in the dataset:", params.sex));
            tables::totals_table(ui, "top_ten", &view.top_ten);
            plot::top_names_chart(ui, "top_ten_chart", &view.top_ten);
        });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open birth-name data")
        .add_filter("CSV", &["csv"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.open_source(Source::CsvFile { path });
    }
}

pub fn open_folder_dialog(state: &mut AppState) {
    if let Some(path) = rfd::FileDialog::new()
        .set_title("Open folder of yearly name files")
        .pick_folder()
    {
        log::info!("Opening folder {}", path.display());
        state.open_path(&path);
    }
}

pub fn export_dialog(state: &mut AppState) {
    let Some(view) = &state.view else {
        return;
    };
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export filtered rows")
        .set_file_name("filtered.csv")
        .add_filter("CSV", &["csv"])
        .save_file()
    else {
        return;
    };

    match crate::export::write_csv(&path, &view.filtered) {
        Ok(()) => state.status_message = None,
        Err(e) => {
            log::error!("Export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
