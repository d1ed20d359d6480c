//! Legend box layout and drawing (inside the plotting area, right-aligned).

use crate::encoding::colors;
use crate::error::{DotPlotError, Result};
use crate::models::LegendPosition;
use crate::viz_plotters_adapter::{draw_glyph, marker_style, rgb_color};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::estimate_text_width_px;
use super::types::Legend;

/// Pixel sizes the legend is laid out with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendMetrics {
    pub font_px: u32,
    pub marker_radius: i32,
    pub stroke_px: u32,
}

/// Pixel rectangle `(left, top, right, bottom)`.
pub type PixelRect = (i32, i32, i32, i32);

/// Box geometry derived from the metrics. All values in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendBox {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    pub pad: i32,
    pub title_h: i32,
    pub row_h: i32,
    pub handle_w: i32,
    pub text_gap: i32,
}

/// Compute where the legend box goes and how big it is.
///
/// Sizes follow em-based spacing: 0.5 em inner padding and distance to the axes,
/// a 2 em handle column and 0.8 em between handle and label.
pub fn layout_legend(legend: &Legend, metrics: LegendMetrics, plot: PixelRect) -> LegendBox {
    let f = metrics.font_px as i32;
    let pad = (f / 2).max(2);
    let axes_pad = (f / 2).max(2);
    let row_h = (f + f / 2).max(2 * metrics.marker_radius + 4);
    let title_h = f + f / 3;
    let handle_w = (2 * f).max(2 * metrics.marker_radius + 4);
    let text_gap = (f * 4) / 5;

    let title_w = estimate_text_width_px(legend.title, metrics.font_px) as i32;
    let label_w = legend
        .entries
        .iter()
        .map(|e| estimate_text_width_px(&e.label, metrics.font_px) as i32)
        .max()
        .unwrap_or(0);
    let width = 2 * pad + title_w.max(handle_w + text_gap + label_w);
    let height = 2 * pad + title_h + row_h * legend.entries.len() as i32;

    let (l, t, r, b) = plot;
    let left = r - axes_pad - width;
    let top = match legend.position {
        LegendPosition::UpperRight => t + axes_pad,
        LegendPosition::LowerRight => b - axes_pad - height,
    };
    LegendBox {
        left: left.max(l),
        top,
        width,
        height,
        pad,
        title_h,
        row_h,
        handle_w,
        text_gap,
    }
}

/// Draw the legend on the root area. Nothing is drawn when there are no entries.
/// With `family == None` the frame and swatches are drawn without text.
pub fn draw_legend<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    legend: &Legend,
    metrics: LegendMetrics,
    plot: PixelRect,
    family: Option<&str>,
) -> Result<()> {
    if legend.entries.is_empty() {
        return Ok(());
    }
    let lb = layout_legend(legend, metrics, plot);

    // Frame: translucent white with a light gray edge.
    let corner_a = (lb.left, lb.top);
    let corner_b = (lb.left + lb.width, lb.top + lb.height);
    root.draw(&Rectangle::new([corner_a, corner_b], WHITE.mix(0.8).filled()))
        .map_err(DotPlotError::render)?;
    root.draw(&Rectangle::new(
        [corner_a, corner_b],
        rgb_color(colors::LEGEND_EDGE).stroke_width(1),
    ))
    .map_err(DotPlotError::render)?;

    if let Some(family) = family {
        let title_style = TextStyle::from((FontFamily::Name(family), metrics.font_px as f64))
            .pos(Pos::new(HPos::Center, VPos::Top));
        root.draw(&Text::new(
            legend.title,
            (lb.left + lb.width / 2, lb.top + lb.pad),
            title_style,
        ))
        .map_err(DotPlotError::render)?;
    }

    let label_style = family.map(|family| {
        TextStyle::from((FontFamily::Name(family), metrics.font_px as f64))
            .pos(Pos::new(HPos::Left, VPos::Center))
    });

    for (i, entry) in legend.entries.iter().enumerate() {
        let center_y = lb.top + lb.pad + lb.title_h + lb.row_h * i as i32 + lb.row_h / 2;
        let handle_x = lb.left + lb.pad + lb.handle_w / 2;
        draw_glyph(
            root,
            (handle_x, center_y),
            metrics.marker_radius,
            marker_style(&entry.rule, metrics.stroke_px),
            entry.rule.marker,
        )?;

        if let Some(style) = &label_style {
            let text_x = lb.left + lb.pad + lb.handle_w + lb.text_gap;
            root.draw(&Text::new(
                entry.label.as_str(),
                (text_x, center_y),
                style.clone(),
            ))
            .map_err(DotPlotError::render)?;
        }
    }

    Ok(())
}
