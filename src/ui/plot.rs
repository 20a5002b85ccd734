use std::collections::BTreeMap;
use std::f64::consts::TAU;
use std::sync::Arc;

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotBounds, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::slice_color;
use crate::data::filter::Slice;
use crate::data::model::LaunchRecord;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Pie geometry
// ---------------------------------------------------------------------------

/// A pie wedge in unit-circle plot coordinates.
#[derive(Debug, Clone)]
pub struct Wedge {
    pub label: String,
    pub share: f64,
    /// Closed outline: centre, then the arc from start to end angle.
    pub outline: Vec<[f64; 2]>,
    /// Where the percentage label goes.
    pub label_pos: [f64; 2],
}

/// Lay out slices clockwise from twelve o'clock. Zero-count slices get no wedge.
pub fn pie_wedges(slices: &[Slice]) -> Vec<Wedge> {
    let total: usize = slices.iter().map(|s| s.count).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut start = TAU / 4.0;
    let mut wedges = Vec::with_capacity(slices.len());
    for slice in slices.iter().filter(|s| s.count > 0) {
        let share = slice.count as f64 / total as f64;
        let sweep = share * TAU;
        let steps = ((share * 128.0).ceil() as usize).max(2);

        let mut outline = Vec::with_capacity(steps + 2);
        outline.push([0.0, 0.0]);
        outline.extend((0..=steps).map(|i| {
            let angle = start - sweep * i as f64 / steps as f64;
            [angle.cos(), angle.sin()]
        }));

        let mid = start - sweep / 2.0;
        let label_radius = if share >= 1.0 { 0.0 } else { 0.65 };
        wedges.push(Wedge {
            label: slice.label.clone(),
            share,
            outline,
            label_pos: [label_radius * mid.cos(), label_radius * mid.sin()],
        });
        start -= sweep;
    }
    wedges
}

/// Render the success pie chart.
pub fn success_pie(ui: &mut Ui, state: &AppState, height: f32) {
    let pie = &state.pie;
    ui.heading(&pie.title);

    let wedges = pie_wedges(&pie.slices);
    if wedges.is_empty() {
        ui.label("No successful launches to show.");
        return;
    }

    Plot::new("success_pie")
        .height(height)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .show(ui, |plot_ui| {
            for w in &wedges {
                let color = slice_color(state.site(), &w.label, &state.site_colors);
                plot_ui.polygon(
                    Polygon::new(PlotPoints::new(w.outline.clone()))
                        .name(&w.label)
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE)),
                );
            }
            for w in &wedges {
                plot_ui.text(Text::new(
                    PlotPoint::new(w.label_pos[0], w.label_pos[1]),
                    format!("{:.1}%", w.share * 100.0),
                ));
            }
        });
}

// ---------------------------------------------------------------------------
// Payload vs outcome scatter
// ---------------------------------------------------------------------------

/// Scatter points grouped by booster category (one legend entry each).
pub fn scatter_series(points: &[LaunchRecord]) -> BTreeMap<&str, Vec<[f64; 2]>> {
    let mut series: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for r in points {
        series
            .entry(r.booster_category.as_str())
            .or_default()
            .push([r.payload_mass_kg, f64::from(r.outcome.class())]);
    }
    series
}

/// Flight numbers of the records plotted at `(x, y)` in a booster series.
pub fn flights_at<'a>(points: &'a [LaunchRecord], booster: &str, x: f64, y: f64) -> Vec<&'a str> {
    points
        .iter()
        .filter(|r| r.booster_category == booster)
        .filter(|r| r.payload_mass_kg == x && f64::from(r.outcome.class()) == y)
        .map(|r| r.flight_number.as_str())
        .collect()
}

/// Render the payload / outcome scatter chart.
pub fn payload_scatter(ui: &mut Ui, state: &AppState) {
    let view = &state.scatter;
    ui.heading(&view.title);

    let range = state.payload_range();
    let pad = ((range.high() - range.low()) * 0.03).max(50.0);
    let (y_min, y_max) = view.y_bounds;
    let bounds = PlotBounds::from_min_max([range.low() - pad, y_min], [range.high() + pad, y_max]);

    let hover_points = Arc::clone(&view.points);

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("Outcome (0=Fail, 1=Success)")
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .label_formatter(move |name, value| {
            if name.is_empty() {
                return format!("{:.0} kg", value.x);
            }
            let flights = flights_at(&hover_points, name, value.x, value.y);
            format!(
                "{name}\nPayload: {:.0} kg\nClass: {}\nFlight Number: {}",
                value.x,
                value.y,
                flights.join(", ")
            )
        })
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(bounds);
            for (booster, pts) in scatter_series(&view.points) {
                plot_ui.points(
                    Points::new(PlotPoints::new(pts))
                        .name(booster)
                        .color(state.booster_colors.color_for(booster))
                        .shape(MarkerShape::Circle)
                        .radius(4.0),
                );
            }
        });
}
