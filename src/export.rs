//! Single-page PDF of the category chart: a title line, the pie and a legend.

use crate::chart::COLORS;
use crate::errors::ExportError;
use crate::models::CategoryTotal;
use crate::ui::format_kcal;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, Mm, PdfDocument, PdfLayerReference, Point, Polygon, Rgb,
};
use std::f32::consts::{FRAC_PI_2, TAU};

pub const TITLE: &str = "Calorie Log Overview";

// A4 portrait, millimetres from the bottom-left corner.
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const CX: f32 = 105.0;
const CY: f32 = 205.0;
const RADIUS: f32 = 60.0;
const LEGEND_TOP: f32 = 125.0;
const ARC_STEPS_PER_TURN: f32 = 180.0;

pub fn render_chart_pdf(totals: &[CategoryTotal; 4]) -> Result<Vec<u8>, ExportError> {
    let (doc, page, layer) =
        PdfDocument::new(TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Chart");
    let layer = doc.get_page(page).get_layer(layer);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| ExportError::Pdf(err.to_string()))?;

    set_fill(&layer, "#2B2A28");
    layer.use_text(TITLE, 18.0, Mm(10.0), Mm(PAGE_HEIGHT - 15.0), &font);

    let grand: f32 = totals.iter().map(|total| total.kcal.max(0.0) as f32).sum();
    if grand <= 0.0 {
        set_fill(&layer, "#8B857D");
        layer.use_text("No data yet", 14.0, Mm(CX - 15.0), Mm(CY), &font);
    } else {
        let mut angle = FRAC_PI_2;
        for (index, total) in totals.iter().enumerate() {
            if total.kcal <= 0.0 {
                continue;
            }
            let sweep = total.kcal as f32 / grand * TAU;
            set_fill(&layer, COLORS[index % COLORS.len()]);
            layer.add_polygon(slice(angle, sweep));
            angle -= sweep;
        }
    }

    for (index, total) in totals.iter().enumerate() {
        let y = LEGEND_TOP - index as f32 * 10.0;
        set_fill(&layer, COLORS[index % COLORS.len()]);
        layer.add_polygon(square(60.0, y - 1.0, 5.0));
        set_fill(&layer, "#2B2A28");
        layer.use_text(
            format!("{}: {} kcal", total.category, format_kcal(total.kcal)),
            12.0,
            Mm(70.0),
            Mm(y),
            &font,
        );
    }

    doc.save_to_bytes()
        .map_err(|err| ExportError::Pdf(err.to_string()))
}

/// Pie wedge from `start` sweeping clockwise, approximated by a polyline.
fn slice(start: f32, sweep: f32) -> Polygon {
    let steps = ((sweep / TAU) * ARC_STEPS_PER_TURN).ceil().max(1.0) as usize;
    let mut ring = Vec::with_capacity(steps + 2);
    if sweep < TAU {
        ring.push(point(CX, CY));
    }
    for step in 0..=steps {
        let angle = start - sweep * step as f32 / steps as f32;
        ring.push(point(CX + RADIUS * angle.cos(), CY + RADIUS * angle.sin()));
    }
    fill(ring)
}

fn square(x: f32, y: f32, size: f32) -> Polygon {
    fill(vec![
        point(x, y),
        point(x + size, y),
        point(x + size, y + size),
        point(x, y + size),
    ])
}

fn fill(ring: Vec<(Point, bool)>) -> Polygon {
    Polygon {
        rings: vec![ring],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    }
}

fn point(x: f32, y: f32) -> (Point, bool) {
    (Point::new(Mm(x), Mm(y)), false)
}

fn set_fill(layer: &PdfLayerReference, hex: &str) {
    let (r, g, b) = hex_rgb(hex);
    layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
}

fn hex_rgb(hex: &str) -> (f32, f32, f32) {
    let channel = |range: std::ops::Range<usize>| {
        hex.trim_start_matches('#')
            .get(range)
            .and_then(|digits| u8::from_str_radix(digits, 16).ok())
            .map_or(0.0, |value| f32::from(value) / 255.0)
    };
    (channel(0..2), channel(2..4), channel(4..6))
}
