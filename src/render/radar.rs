//! Performance radar: the four plan metrics on a square SVG

use crate::core::config::RenderConfig;
use crate::core::types::Point;
use crate::model::PerformanceMetrics;
use crate::render::colors;
use crate::render::svg::escape;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt::Write;

/// Room left around the chart for axis labels (pixels)
const LABEL_MARGIN: f64 = 44.0;

fn vertex(center: Point, radius: f64, axis: usize, axes: usize, value: f64) -> Point {
    let angle = -FRAC_PI_2 + TAU * axis as f64 / axes as f64;
    Point::new(
        center.x + radius * value * angle.cos(),
        center.y + radius * value * angle.sin(),
    )
}

fn polygon_points(center: Point, radius: f64, values: &[f64]) -> String {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let p = vertex(center, radius, i, values.len(), *v);
            format!("{:.1},{:.1}", p.x, p.y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Draw the radar; `previous` (e.g. the plan before refinement) is drawn
/// underneath as a dashed outline
pub fn render_radar(
    metrics: &PerformanceMetrics,
    previous: Option<&PerformanceMetrics>,
    config: &RenderConfig,
) -> String {
    let size = config.radar_size;
    let center = Point::new(size / 2.0, size / 2.0);
    let radius = (size / 2.0 - LABEL_MARGIN).max(1.0);
    let ink = colors::INK.to_hex();
    let mut out = String::new();

    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{s}" height="{s}" viewBox="0 0 {s} {s}" font-family="sans-serif">"#,
        s = size
    );

    // Grid rings
    for ring in [0.25, 0.5, 0.75, 1.0] {
        let _ = writeln!(
            out,
            r##"  <polygon class="grid" points="{}" fill="none" stroke="#cccccc" stroke-width="1"/>"##,
            polygon_points(center, radius, &[ring; 4])
        );
    }

    let entries = metrics.clamped().entries();
    for (i, (label, _)) in entries.iter().enumerate() {
        let end = vertex(center, radius, i, entries.len(), 1.0);
        let _ = writeln!(
            out,
            r##"  <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="#cccccc"/>"##,
            center.x, center.y, end.x, end.y
        );
        let text_at = vertex(center, radius + 16.0, i, entries.len(), 1.0);
        let _ = writeln!(
            out,
            r#"  <text x="{:.1}" y="{:.1}" font-size="11" text-anchor="middle" fill="{}">{}</text>"#,
            text_at.x,
            text_at.y + 4.0,
            ink,
            escape(label)
        );
    }

    if let Some(previous) = previous {
        let values: Vec<f64> = previous.clamped().entries().iter().map(|(_, v)| *v).collect();
        let _ = writeln!(
            out,
            r##"  <polygon class="previous" points="{}" fill="none" stroke="#888888" stroke-dasharray="4 3" stroke-width="1.5"/>"##,
            polygon_points(center, radius, &values)
        );
    }

    let values: Vec<f64> = entries.iter().map(|(_, v)| *v).collect();
    let accent = colors::AIRFLOW.to_hex();
    let _ = writeln!(
        out,
        r#"  <polygon class="current" points="{}" fill="{accent}" fill-opacity="0.3" stroke="{accent}" stroke-width="2"/>"#,
        polygon_points(center, radius, &values)
    );

    let _ = writeln!(
        out,
        r#"  <text x="{:.1}" y="{:.1}" font-size="14" font-weight="bold" text-anchor="middle" fill="{}">{}</text>"#,
        center.x,
        center.y + 5.0,
        ink,
        metrics.overall_score()
    );
    let _ = writeln!(out, "</svg>");
    out
}
