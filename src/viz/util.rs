//! Utility functions for visualization: unit conversion, label gutters, dashed strokes.

use crate::error::{DotPlotError, Result};
use plotters::coord::Shift;
use plotters::prelude::*;

use super::text::estimate_text_width_px;

/// Points per inch.
const PT_PER_IN: f64 = 72.0;

/// Largest canvas edge we are willing to allocate, in pixels.
const MAX_CANVAS_PX: f64 = 8000.0;

/// Convert typographic points to pixels at `dpi`.
#[inline]
pub fn pt_to_px(pt: f64, dpi: f64) -> f64 {
    pt * dpi / PT_PER_IN
}

/// Stroke width in whole pixels; never thinner than one pixel.
pub fn stroke_px(pt: f64, dpi: f64) -> u32 {
    pt_to_px(pt, dpi).round().max(1.0) as u32
}

/// Font size in whole pixels.
pub fn font_px(pt: f64, dpi: f64) -> u32 {
    pt_to_px(pt, dpi).round().max(1.0) as u32
}

/// Marker radius in pixels for a marker *area* given in points².
pub fn marker_radius_px(size_pt2: f64, dpi: f64) -> i32 {
    pt_to_px(size_pt2.max(0.0).sqrt() / 2.0, dpi).round().max(1.0) as i32
}

/// Canvas size in pixels for a size in inches.
pub fn canvas_px(width_in: f64, height_in: f64, dpi: f64) -> (u32, u32) {
    let side = |inches: f64| (inches * dpi).round().clamp(16.0, MAX_CANVAS_PX) as u32;
    (side(width_in), side(height_in))
}

/// Left gutter for the category labels: widest label plus tick and padding,
/// capped at 40% of the canvas so the plot keeps most of the width.
pub fn compute_left_label_area_px(labels: &[String], font_px: u32, canvas_w: u32) -> u32 {
    let widest = labels
        .iter()
        .map(|s| estimate_text_width_px(s, font_px))
        .max()
        .unwrap_or(0);
    let with_padding = widest.saturating_add(18);
    let cap = (canvas_w as f64 * 0.40) as u32;
    with_padding.clamp(32, cap.max(32))
}

/// Split a straight line into dash segments of `dash` pixels separated by `gap` pixels.
pub fn dashed_segments(
    from: (i32, i32),
    to: (i32, i32),
    dash: i32,
    gap: i32,
) -> Vec<[(i32, i32); 2]> {
    let (dx, dy) = ((to.0 - from.0) as f64, (to.1 - from.1) as f64);
    let len = (dx * dx + dy * dy).sqrt();
    if len < 1.0 {
        return Vec::new();
    }
    let (ux, uy) = (dx / len, dy / len);
    let dash = dash.max(1) as f64;
    let step = dash + gap.max(1) as f64;
    let at = |d: f64| {
        (
            from.0 + (ux * d).round() as i32,
            from.1 + (uy * d).round() as i32,
        )
    };

    let mut out = Vec::new();
    let mut d = 0.0;
    while d < len {
        let end = (d + dash).min(len);
        out.push([at(d), at(end)]);
        d += step;
    }
    out
}

/// Draw a dashed line in pixel coordinates.
/// Plotters' dashed strokes are backend-dependent, so dashes are drawn as separate segments.
pub fn draw_dashed_line<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    from: (i32, i32),
    to: (i32, i32),
    dash: i32,
    gap: i32,
    style: ShapeStyle,
) -> Result<()> {
    for [a, b] in dashed_segments(from, to, dash, gap) {
        area.draw(&PathElement::new(vec![a, b], style))
            .map_err(DotPlotError::render)?;
    }
    Ok(())
}
