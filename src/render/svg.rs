//! SVG floor plan drawing with heat, daylight and airflow overlays

use crate::core::config::RenderConfig;
use crate::core::types::Point;
use crate::model::{FloorPlan, Room};
use crate::render::colors::{self, Color};
use crate::render::layout::{window_segment, Projection};
use crate::render::resolve::{best_entry_for, RoomIndex};
use std::fmt::Write;

/// Which diagnostic layers to draw
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overlays {
    pub heat: bool,
    pub airflow: bool,
    pub daylight: bool,
}

impl Overlays {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            heat: true,
            airflow: true,
            daylight: true,
        }
    }
}

/// A rendered plan plus what was actually drawn
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    pub svg: String,
    pub width: f64,
    pub height: f64,
    pub heat_tints: usize,
    pub daylight_tints: usize,
    pub airflow_lines: usize,
    /// Airflow entries dropped because an endpoint matched no room
    pub skipped_airflow: usize,
}

/// Escape text for use in SVG content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn fmt_num(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}

fn tint_rect(
    out: &mut String,
    projection: &Projection,
    room: &Room,
    color: Color,
    opacity: f64,
    class: &str,
) {
    let r = projection.rect(room.rect());
    let _ = writeln!(
        out,
        r#"    <rect class="{}" x="{}" y="{}" width="{}" height="{}" fill="{}" fill-opacity="{}"/>"#,
        class,
        fmt_num(r.x),
        fmt_num(r.y),
        fmt_num(r.width),
        fmt_num(r.height),
        color.to_hex(),
        fmt_num(opacity)
    );
}

/// Draw a floor plan
///
/// Diagnostic entries whose room reference resolves to nothing are left out
/// without error.
pub fn render_floor_plan(plan: &FloorPlan, overlays: Overlays, config: &RenderConfig) -> Drawing {
    let projection = Projection::for_plan(plan, config);
    let (width, height) = projection.canvas_size();
    let mut out = String::new();
    let mut drawing = Drawing {
        svg: String::new(),
        width,
        height,
        heat_tints: 0,
        daylight_tints: 0,
        airflow_lines: 0,
        skipped_airflow: 0,
    };

    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
        w = fmt_num(width),
        h = fmt_num(height)
    );
    let _ = writeln!(out, "  <title>{}</title>", escape(&plan.title));
    let _ = writeln!(
        out,
        r#"  <defs><marker id="airflow-arrow" viewBox="0 0 10 10" refX="9" refY="5" markerWidth="6" markerHeight="6" orient="auto-start-reverse"><path d="M 0 0 L 10 5 L 0 10 z" fill="{}"/></marker></defs>"#,
        colors::AIRFLOW.to_hex()
    );
    let _ = writeln!(
        out,
        r#"  <rect width="100%" height="100%" fill="{}"/>"#,
        colors::BACKGROUND.to_hex()
    );

    // Rooms
    let ink = colors::INK.to_hex();
    let _ = writeln!(out, r#"  <g class="rooms">"#);
    for room in &plan.rooms {
        let r = projection.rect(room.rect());
        let fill = colors::category_color(&room.category);
        let _ = writeln!(
            out,
            r#"    <rect data-room="{}" x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="{}" stroke-width="2"/>"#,
            escape(&room.id),
            fmt_num(r.x),
            fmt_num(r.y),
            fmt_num(r.width),
            fmt_num(r.height),
            fill.to_hex(),
            fill.darken(0.6).to_hex()
        );
    }
    let _ = writeln!(out, "  </g>");

    // Windows
    let _ = writeln!(out, r#"  <g class="windows">"#);
    for room in &plan.rooms {
        for window in &room.windows {
            let (a, b) = window_segment(room, window);
            let (a, b) = (projection.point(a), projection.point(b));
            let color = if window.shaded {
                colors::WINDOW_SHADED
            } else {
                colors::WINDOW
            };
            let _ = writeln!(
                out,
                r#"    <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="5"{}/>"#,
                fmt_num(a.x),
                fmt_num(a.y),
                fmt_num(b.x),
                fmt_num(b.y),
                color.to_hex(),
                if window.shaded {
                    r#" stroke-dasharray="4 2""#
                } else {
                    ""
                }
            );
        }
    }
    let _ = writeln!(out, "  </g>");

    let diagnostics = &plan.diagnostics;

    if overlays.heat {
        let _ = writeln!(out, r#"  <g class="overlay-heat">"#);
        for room in &plan.rooms {
            let hit = best_entry_for(room, &diagnostics.heat_risks, |h| {
                (h.room.as_str(), h.room_id.as_deref())
            });
            if let Some(h) = hit {
                tint_rect(
                    &mut out,
                    &projection,
                    room,
                    colors::HEAT,
                    colors::heat_opacity(h.risk, config),
                    "heat",
                );
                drawing.heat_tints += 1;
            }
        }
        let _ = writeln!(out, "  </g>");
    }

    if overlays.daylight {
        let _ = writeln!(out, r#"  <g class="overlay-daylight">"#);
        for room in &plan.rooms {
            let hit = best_entry_for(room, &diagnostics.daylight, |d| {
                (d.room.as_str(), d.room_id.as_deref())
            });
            if let Some(d) = hit {
                tint_rect(
                    &mut out,
                    &projection,
                    room,
                    colors::DAYLIGHT,
                    colors::daylight_opacity(d.quality, config),
                    "daylight",
                );
                drawing.daylight_tints += 1;
            }
        }
        let _ = writeln!(out, "  </g>");
    }

    if overlays.airflow {
        let index = RoomIndex::new(&plan.rooms);
        let _ = writeln!(out, r#"  <g class="overlay-airflow">"#);
        for flow in &diagnostics.airflow {
            let from = index.resolve_with_id(&flow.from, flow.from_id.as_deref());
            let to = index.resolve_with_id(&flow.to, flow.to_id.as_deref());
            let (Some(from), Some(to)) = (from, to) else {
                tracing::debug!(from = %flow.from, to = %flow.to, "skipping unresolved airflow");
                drawing.skipped_airflow += 1;
                continue;
            };
            let a = projection.point(from.centroid());
            let b = projection.point(to.centroid());
            let (stroke_width, opacity) = colors::airflow_stroke(flow.strength, config);
            let _ = writeln!(
                out,
                r#"    <line class="airflow" x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" stroke-opacity="{}" marker-end="url(#airflow-arrow)"/>"#,
                fmt_num(a.x),
                fmt_num(a.y),
                fmt_num(b.x),
                fmt_num(b.y),
                colors::AIRFLOW.to_hex(),
                fmt_num(stroke_width),
                fmt_num(opacity)
            );
            drawing.airflow_lines += 1;
        }
        let _ = writeln!(out, "  </g>");
    }

    // Labels last so overlays never hide them
    let _ = writeln!(out, r#"  <g class="labels" fill="{}" text-anchor="middle">"#, ink);
    for room in &plan.rooms {
        let c = projection.point(room.centroid());
        let _ = writeln!(
            out,
            r#"    <text x="{}" y="{}" font-size="12" font-weight="bold">{}</text>"#,
            fmt_num(c.x),
            fmt_num(c.y - 2.0),
            escape(&room.name)
        );
        let _ = writeln!(
            out,
            r#"    <text x="{}" y="{}" font-size="10">{} m²</text>"#,
            fmt_num(c.x),
            fmt_num(c.y + 12.0),
            fmt_num(room.area())
        );
    }
    let _ = writeln!(out, "  </g>");

    write_north_arrow(&mut out, Point::new(width - 20.0, 22.0), plan.orientation, &ink);

    let _ = writeln!(out, "</svg>");
    drawing.svg = out;
    drawing
}

/// Compass arrow; plan orientation rotates true north relative to the page
fn write_north_arrow(out: &mut String, center: Point, orientation: f64, ink: &str) {
    let _ = writeln!(
        out,
        r#"  <g class="north-arrow" transform="rotate({} {} {})"><path d="M {} {} L {} {} L {} {} z" fill="{ink}"/><text x="{}" y="{}" font-size="10" text-anchor="middle" fill="{ink}">N</text></g>"#,
        fmt_num(-orientation),
        fmt_num(center.x),
        fmt_num(center.y),
        fmt_num(center.x),
        fmt_num(center.y - 12.0),
        fmt_num(center.x - 5.0),
        fmt_num(center.y + 4.0),
        fmt_num(center.x + 5.0),
        fmt_num(center.y + 4.0),
        fmt_num(center.x),
        fmt_num(center.y + 16.0),
    );
}
