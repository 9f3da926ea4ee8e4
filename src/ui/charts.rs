// OncoViz - ui/charts.rs
//
// The rendering layer: turns a ChartSpec into egui output.
//
// Plot-backed kinds (area, line, stacked, bars) go through egui_plot;
// the arc kind is drawn directly with the painter because egui_plot has
// no radial mark. All charts are hover-only: panning and zooming are
// disabled so the dashboard reads like a report, not a plot workbench.

use crate::core::chart::{ChartKind, ChartRow, ChartSpec};
use crate::ui::theme;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};
use std::collections::HashMap;

/// Render a chart. `id` must be unique within the window.
pub fn render(ui: &mut egui::Ui, id: &str, spec: &ChartSpec) {
    if spec.rows.is_empty() {
        ui.weak("No data for the current selection.");
        return;
    }
    match spec.kind {
        ChartKind::Arc => donut(ui, spec),
        ChartKind::Area => area(ui, id, spec),
        ChartKind::Line => lines(ui, id, spec),
        ChartKind::NormalizedArea => normalized_stack(ui, id, spec),
        ChartKind::Bar => vertical_bars(ui, id, spec),
        ChartKind::HorizontalBar => horizontal_bars(ui, id, spec),
    }
}

// =============================================================================
// Shared helpers
// =============================================================================

/// Multi-line hover text from a row's pre-formatted tooltip pairs.
fn tooltip_text(row: &ChartRow) -> String {
    row.tooltip
        .iter()
        .map(|(title, value)| format!("{title}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Distinct category labels in first-seen order. These become the
/// ordinal x (or y) axis positions 0, 1, 2, ...
fn ordinal_labels(rows: &[ChartRow]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for row in rows {
        if !labels.contains(&row.label) {
            labels.push(row.label.clone());
        }
    }
    labels
}

/// Axis tick text for an ordinal axis: the label at integral positions,
/// nothing in between.
fn ordinal_tick(labels: &[String], value: f64) -> String {
    let index = value.round();
    if (value - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

/// Series names in first-seen order, with each series' rows.
fn per_series(rows: &[ChartRow]) -> Vec<(String, Vec<&ChartRow>)> {
    let mut series: Vec<(String, Vec<&ChartRow>)> = Vec::new();
    for row in rows {
        let name = row.series.clone().unwrap_or_default();
        match series.iter_mut().find(|(n, _)| *n == name) {
            Some((_, matching)) => matching.push(row),
            None => series.push((name, vec![row])),
        }
    }
    series
}

// =============================================================================
// Donut (arc) charts
// =============================================================================

/// Painter-drawn donut with a legend column on the right and a tooltip
/// on slice hover. Slices start at twelve o'clock and run clockwise in
/// row order, so the engine's ordering ("Other" last) is what the eye
/// reads going around.
fn donut(ui: &mut egui::Ui, spec: &ChartSpec) {
    let total: f64 = spec.rows.iter().map(|r| r.value).sum();
    if total <= 0.0 {
        ui.weak("No cases recorded for the current selection.");
        return;
    }

    let outer = theme::DONUT_OUTER_RADIUS;
    let inner = theme::DONUT_INNER_RADIUS;
    let size = outer * 2.0 + 16.0;

    ui.horizontal(|ui| {
        let (response, painter) =
            ui.allocate_painter(egui::Vec2::splat(size), egui::Sense::hover());
        let center = response.rect.center();

        // Slice boundaries as fractions of the full turn.
        let mut fractions: Vec<(f64, f64)> = Vec::with_capacity(spec.rows.len());
        let mut start = 0.0;
        for row in &spec.rows {
            let end = start + row.value / total;
            fractions.push((start, end));
            start = end;
        }

        let top = -std::f64::consts::FRAC_PI_2;
        let tau = std::f64::consts::TAU;
        for (row_index, (f0, f1)) in fractions.iter().enumerate() {
            let colour = slice_colour(spec, row_index);
            let a0 = top + f0 * tau;
            let a1 = top + f1 * tau;
            // Concave ring segments are not safe to fill as one path, so
            // each slice is tessellated into small convex quads.
            let steps = (((a1 - a0) / 0.05).ceil() as usize).max(1);
            for step in 0..steps {
                let b0 = a0 + (a1 - a0) * step as f64 / steps as f64;
                let b1 = a0 + (a1 - a0) * (step + 1) as f64 / steps as f64;
                let quad = vec![
                    polar(center, inner, b0),
                    polar(center, outer, b0),
                    polar(center, outer, b1),
                    polar(center, inner, b1),
                ];
                painter.add(egui::Shape::convex_polygon(
                    quad,
                    colour,
                    egui::Stroke::NONE,
                ));
            }
        }

        // Hover tooltip: map the pointer back to a slice.
        let hovered_slice = response.hover_pos().and_then(|pos| {
            let offset = pos - center;
            let dist = offset.length();
            if dist < inner || dist > outer {
                return None;
            }
            let angle = ((offset.y as f64).atan2(offset.x as f64) - top).rem_euclid(tau);
            let fraction = angle / tau;
            fractions
                .iter()
                .position(|(f0, f1)| fraction >= *f0 && fraction < *f1)
        });
        if let Some(row_index) = hovered_slice {
            let text = tooltip_text(&spec.rows[row_index]);
            response.on_hover_ui_at_pointer(|ui| {
                ui.label(text);
            });
        }

        // Legend column, one entry per slice in slice order.
        ui.vertical(|ui| {
            ui.add_space(8.0);
            for (row_index, row) in spec.rows.iter().enumerate() {
                ui.horizontal(|ui| {
                    let (rect, _) =
                        ui.allocate_exact_size(egui::Vec2::splat(12.0), egui::Sense::hover());
                    ui.painter()
                        .rect_filled(rect, 2.0, slice_colour(spec, row_index));
                    ui.label(&row.label);
                });
            }
        });
    });
}

/// Slice colour: fixed per gender series where one is given, otherwise
/// the categorical palette in slice order.
fn slice_colour(spec: &ChartSpec, row_index: usize) -> egui::Color32 {
    match &spec.rows[row_index].series {
        Some(series) => theme::series_colour(series),
        None => theme::categorical_colour(row_index),
    }
}

fn polar(center: egui::Pos2, radius: f32, angle: f64) -> egui::Pos2 {
    center + egui::Vec2::new(angle.cos() as f32, angle.sin() as f32) * radius
}

// =============================================================================
// Plot-backed charts
// =============================================================================

/// Single-series filled area over an ordinal axis.
fn area(ui: &mut egui::Ui, id: &str, spec: &ChartSpec) {
    let labels = ordinal_labels(&spec.rows);
    let points: Vec<[f64; 2]> = spec
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| [i as f64, row.value])
        .collect();
    let tooltips: Vec<String> = spec.rows.iter().map(tooltip_text).collect();

    Plot::new(id.to_owned())
        .height(theme::PLOT_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| ordinal_tick(&labels, mark.value))
        .label_formatter(move |_name, point| {
            let index = point.x.round();
            if (point.x - index).abs() <= 0.3 && index >= 0.0 {
                tooltips.get(index as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points))
                    .color(theme::SINGLE_SERIES)
                    .fill(0.0),
            );
        });
}

/// One line per series over a shared ordinal axis.
fn lines(ui: &mut egui::Ui, id: &str, spec: &ChartSpec) {
    let labels = ordinal_labels(&spec.rows);
    let series = per_series(&spec.rows);

    let series_points: Vec<(String, Vec<[f64; 2]>)> = series
        .iter()
        .map(|(name, rows)| {
            let points = rows
                .iter()
                .map(|row| {
                    let x = labels.iter().position(|l| *l == row.label).unwrap_or(0);
                    [x as f64, row.value]
                })
                .collect();
            (name.clone(), points)
        })
        .collect();

    let mut tooltips: HashMap<(String, i64), String> = HashMap::new();
    for row in &spec.rows {
        let x = labels.iter().position(|l| *l == row.label).unwrap_or(0) as i64;
        let name = row.series.clone().unwrap_or_default();
        tooltips.insert((name, x), tooltip_text(row));
    }

    Plot::new(id.to_owned())
        .height(theme::PLOT_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .legend(Legend::default())
        .x_axis_formatter(move |mark, _range| ordinal_tick(&labels, mark.value))
        .label_formatter(move |name, point| {
            let index = point.x.round();
            if (point.x - index).abs() <= 0.3 && index >= 0.0 {
                tooltips
                    .get(&(name.to_owned(), index as i64))
                    .cloned()
                    .unwrap_or_default()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            for (name, points) in series_points {
                plot_ui.line(
                    Line::new(PlotPoints::from(points))
                        .color(theme::series_colour(&name))
                        .name(name),
                );
            }
        });
}

/// 100%-stacked bars, one stack per ordinal position, one segment per
/// series. Values are 0..1 shares, so the stacks top out at 1.0.
fn normalized_stack(ui: &mut egui::Ui, id: &str, spec: &ChartSpec) {
    let labels = ordinal_labels(&spec.rows);
    let series = per_series(&spec.rows);

    let mut charts = Vec::new();
    for (name, rows) in &series {
        let mut tooltips: Vec<String> = vec![String::new(); labels.len()];
        let bars: Vec<Bar> = rows
            .iter()
            .map(|row| {
                let x = labels.iter().position(|l| *l == row.label).unwrap_or(0);
                tooltips[x] = tooltip_text(row);
                Bar::new(x as f64, row.value)
            })
            .collect();

        let mut chart = BarChart::new(bars)
            .name(name)
            .color(theme::series_colour(name))
            .width(0.8)
            .element_formatter(Box::new(move |bar, _chart| {
                let index = bar.argument.round().max(0.0) as usize;
                tooltips.get(index).cloned().unwrap_or_default()
            }));

        let below: Vec<_> = charts.iter().collect();
        if !below.is_empty() {
            chart = chart.stack_on(&below);
        }
        drop(below);
        charts.push(chart);
    }

    Plot::new(id.to_owned())
        .height(theme::PLOT_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .legend(Legend::default())
        .include_y(1.0)
        .x_axis_formatter(move |mark, _range| ordinal_tick(&labels, mark.value))
        .y_axis_formatter(|mark, _range| format!("{:.0}%", mark.value * 100.0))
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

/// Vertical bars over an ordinal axis (the age profile).
fn vertical_bars(ui: &mut egui::Ui, id: &str, spec: &ChartSpec) {
    let labels = ordinal_labels(&spec.rows);
    let tooltips: Vec<String> = spec.rows.iter().map(tooltip_text).collect();

    let bars: Vec<Bar> = spec
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| Bar::new(i as f64, row.value))
        .collect();

    let chart = BarChart::new(bars)
        .color(theme::SINGLE_SERIES)
        .width(0.8)
        .element_formatter(Box::new(move |bar, _chart| {
            let index = bar.argument.round().max(0.0) as usize;
            tooltips.get(index).cloned().unwrap_or_default()
        }));

    let mut plot = Plot::new(id.to_owned())
        .height(theme::PLOT_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| ordinal_tick(&labels, mark.value));
    if let Some(title) = spec.category_title {
        plot = plot.x_axis_label(title);
    }
    if let Some(title) = spec.value_title {
        plot = plot.y_axis_label(title);
    }
    plot.show(ui, |plot_ui| {
        plot_ui.bar_chart(chart);
    });
}

/// Horizontal bars, first row at the top (the type ranking).
fn horizontal_bars(ui: &mut egui::Ui, id: &str, spec: &ChartSpec) {
    let labels = ordinal_labels(&spec.rows);
    let tooltips: Vec<String> = spec.rows.iter().map(tooltip_text).collect();

    let bars: Vec<Bar> = spec
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| Bar::new(-(i as f64), row.value))
        .collect();

    let chart = BarChart::new(bars)
        .horizontal()
        .color(theme::SINGLE_SERIES)
        .width(0.7)
        .element_formatter(Box::new(move |bar, _chart| {
            let index = (-bar.argument).round().max(0.0) as usize;
            tooltips.get(index).cloned().unwrap_or_default()
        }));

    Plot::new(id.to_owned())
        .height(theme::RANKING_PLOT_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .y_axis_formatter(move |mark, _range| ordinal_tick(&labels, -mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}
