use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::{PayloadRange, SiteSelection};
use crate::state::AppState;

/// Tick labels shown under the payload sliders.
const PAYLOAD_MARKS: [f64; 5] = [0.0, 2500.0, 5000.0, 7500.0, 10_000.0];

// ---------------------------------------------------------------------------
// Left side panel – input controls
// ---------------------------------------------------------------------------

/// Render the left panel: site selector and payload range selector.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    site_selector(ui, state);
    ui.add_space(12.0);
    payload_selector(ui, state);
}

fn site_selector(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Launch site");

    let current = state.site().clone();
    let mut chosen: Option<SiteSelection> = None;

    egui::ComboBox::from_id_salt("site_selector")
        .selected_text(current.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(current == SiteSelection::All, "All Sites")
                .clicked()
            {
                chosen = Some(SiteSelection::All);
            }
            for site in &state.dataset.sites {
                let option = SiteSelection::Site(site.clone());
                if ui.selectable_label(current == option, site).clicked() {
                    chosen = Some(option);
                }
            }
        });

    if let Some(site) = chosen {
        state.set_site(site);
    }
}

fn payload_selector(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Payload range (Kg):");

    let range = state.payload_range();
    let (mut low, mut high) = (range.low(), range.high());
    let bounds = PayloadRange::DISPLAY_MIN..=PayloadRange::DISPLAY_MAX;

    let low_changed = ui
        .add(egui::Slider::new(&mut low, bounds.clone()).text("min"))
        .changed();
    let high_changed = ui
        .add(egui::Slider::new(&mut high, bounds).text("max"))
        .changed();

    ui.horizontal(|ui: &mut Ui| {
        for mark in PAYLOAD_MARKS {
            ui.small(format!("{mark}"));
        }
    });

    if let Some((min, max)) = state.dataset.payload_bounds {
        ui.label(RichText::new(format!("observed: {min} – {max} kg")).weak());
        if ui.small_button("Reset to observed").clicked() {
            state.set_payload_range(PayloadRange::new(min, max));
            return;
        }
    }

    if low_changed || high_changed {
        // Dragging one handle past the other drags the other along.
        if low_changed && low > high {
            high = low;
        }
        if high_changed && high < low {
            low = high;
        }
        state.set_payload_range(PayloadRange::new(low, high));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(path) = &state.source {
            ui.label(path.display().to_string());
            ui.separator();
        }

        let ds = &state.dataset;
        ui.label(format!(
            "{} launches loaded ({} rows dropped), {} in scatter",
            ds.len(),
            ds.dropped_rows,
            state.scatter.points.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match state.open_path(&path) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
