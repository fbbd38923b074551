//! Server-side SVG pie chart of calories per category.

use crate::models::CategoryTotal;
use crate::ui::format_kcal;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt::Write;

/// Slice colours, in category declaration order.
pub const COLORS: [&str; 4] = ["#FFBB28", "#FF8042", "#00C49F", "#0088FE"];

const WIDTH: f64 = 320.0;
const HEIGHT: f64 = 380.0;
const CX: f64 = 160.0;
const CY: f64 = 150.0;
const RADIUS: f64 = 100.0;
const LEGEND_TOP: f64 = 285.0;

/// Inline `<svg>` element for embedding in the page.
pub fn render_pie_svg(totals: &[CategoryTotal; 4]) -> String {
    let grand: f64 = totals.iter().map(|total| total.kcal.max(0.0)).sum();

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" id="chart" viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="Calories by category">"#
    );

    if grand <= 0.0 {
        let _ = write!(
            svg,
            r##"<circle cx="{CX}" cy="{CY}" r="{RADIUS}" fill="none" stroke="#d7d2cb" stroke-dasharray="6 6" /><text class="chart-label" x="{CX}" y="{CY}" text-anchor="middle">No data yet</text>"##
        );
    } else {
        let mut angle = -FRAC_PI_2;
        for (index, total) in totals.iter().enumerate() {
            if total.kcal <= 0.0 {
                continue;
            }
            let fraction = total.kcal / grand;
            let color = COLORS[index % COLORS.len()];
            if fraction >= 1.0 {
                let _ = write!(svg, r#"<circle cx="{CX}" cy="{CY}" r="{RADIUS}" fill="{color}" />"#);
                break;
            }
            let end = angle + fraction * TAU;
            let (x0, y0) = point_at(angle);
            let (x1, y1) = point_at(end);
            let large_arc = u8::from(fraction > 0.5);
            let _ = write!(
                svg,
                r#"<path d="M {CX} {CY} L {x0:.2} {y0:.2} A {RADIUS} {RADIUS} 0 {large_arc} 1 {x1:.2} {y1:.2} Z" fill="{color}" stroke="white" stroke-width="2" />"#
            );
            angle = end;
        }
    }

    for (index, total) in totals.iter().enumerate() {
        let y = LEGEND_TOP + index as f64 * 22.0;
        let _ = write!(
            svg,
            r#"<rect x="70" y="{}" width="12" height="12" rx="3" fill="{}" /><text class="chart-label" x="90" y="{}">{}: {} kcal</text>"#,
            y - 10.0,
            COLORS[index % COLORS.len()],
            y,
            total.category,
            format_kcal(total.kcal)
        );
    }

    svg.push_str("</svg>");
    svg
}

/// Standalone SVG document for download.
pub fn render_chart_document(totals: &[CategoryTotal; 4]) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}\n",
        render_pie_svg(totals)
    )
}

fn point_at(angle: f64) -> (f64, f64) {
    (CX + RADIUS * angle.cos(), CY + RADIUS * angle.sin())
}
