use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

/// Every record currently in the scatter view, one row each.
pub fn scatter_table(ui: &mut Ui, state: &AppState) {
    let points = &state.scatter.points;
    ui.strong(format!("Launches in view ({})", points.len()));

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(60.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(100.0))
        .column(Column::remainder())
        .header(ROW_HEIGHT + 2.0, |mut header| {
            for title in ["Flight", "Launch Site", "Booster", "Payload (kg)", "Outcome"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, points.len(), |mut row| {
                let rec = &points[row.index()];
                row.col(|ui| {
                    ui.label(&rec.flight_number);
                });
                row.col(|ui| {
                    ui.label(&rec.site);
                });
                row.col(|ui| {
                    let color = state.booster_colors.color_for(&rec.booster_category);
                    ui.label(RichText::new(&rec.booster_category).color(color));
                });
                row.col(|ui| {
                    ui.label(format!("{:.0}", rec.payload_mass_kg));
                });
                row.col(|ui| {
                    ui.label(rec.outcome.to_string());
                });
            });
        });
}
