//! Visualization: turn a dataset into a categorical dot plot, as **PNG** or **SVG**.
//!
//! - One row per admission track, first track of the file on top
//! - Hollow markers colored by outcome; passes painted over fails
//! - Ticks every 0.5 grade from 1.0 up to the configured maximum
//! - Legend in fixed order (합, 추합, 불) at the upper or lower right
//!
//! Rendering is a pure function of its inputs: nothing is cached between calls
//! except registered fonts.

pub mod fonts;
pub mod layout;
pub mod legend;
pub mod text;
pub mod types;
pub mod util;

// Re-export types for public API
pub use layout::{category_order, legend_entries, plan, x_ticks};
pub use types::{
    DrawPlan, FontSource, ImageArtifact, ImageFormat, Legend, LegendEntry, PointGroup,
    RasterImage, RenderOptions,
};

use crate::encoding::colors;
use crate::error::{DotPlotError, Result};
use crate::models::{ChartConfig, Dataset, Table};
use crate::viz_plotters_adapter::{draw_point_group, marker_style, rgb_color};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use legend::{LegendMetrics, draw_legend};
use text::truncate_to_width;
use util::{
    canvas_px, compute_left_label_area_px, draw_dashed_line, font_px, marker_radius_px,
    pt_to_px, stroke_px,
};

/// Title size and its distance to the plot, in points.
const TITLE_PT: f64 = 18.0;
const TITLE_PAD_PT: f64 = 20.0;
/// Tick label and legend text size, in points.
const LABEL_PT: f64 = 10.0;
const TICK_LEN_PT: f64 = 3.5;
const TICK_WIDTH_PT: f64 = 0.8;
const CATEGORY_GRID_PT: f64 = 0.5;
const X_GRID_PT: f64 = 0.8;
const X_GRID_ALPHA: f64 = 0.5;
/// Category rows are padded by half a row above and below.
const ROW_PAD: f64 = 0.5;

/// Validate columns, build the plan and render it.
///
/// A table without the required columns fails with [`DotPlotError::MissingColumns`]
/// and produces no image.
pub fn render_table(
    table: &Table,
    config: &ChartConfig,
    options: &RenderOptions,
) -> Result<ImageArtifact> {
    let dataset = Dataset::from_table(table)?;
    render(&dataset, config, options)
}

/// Render a typed dataset.
pub fn render(
    dataset: &Dataset,
    config: &ChartConfig,
    options: &RenderOptions,
) -> Result<ImageArtifact> {
    render_plan(&plan(dataset, config), options)
}

/// Render a typed dataset to raw RGB pixels (for in-process display).
pub fn render_raster(
    dataset: &Dataset,
    config: &ChartConfig,
    options: &RenderOptions,
) -> Result<RasterImage> {
    let plan = plan(dataset, config);
    let family = fonts::resolve_family(&options.font)?;
    paint_raster(&plan, effective_dpi(options.dpi), family.as_deref())
}

/// Render an already computed plan in the requested format.
pub fn render_plan(plan: &DrawPlan, options: &RenderOptions) -> Result<ImageArtifact> {
    let family = fonts::resolve_family(&options.font)?;
    let dpi = effective_dpi(options.dpi);

    match options.format {
        ImageFormat::Png => {
            let raster = paint_raster(plan, dpi, family.as_deref())?;
            let bytes = encode_png(&raster)?;
            Ok(ImageArtifact {
                format: ImageFormat::Png,
                width: raster.width,
                height: raster.height,
                bytes,
            })
        }
        ImageFormat::Svg => {
            let (width, height) = canvas_px(plan.width_in, plan.height_in, dpi);
            let mut svg = String::new();
            {
                let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
                paint(root, plan, dpi, family.as_deref())?;
            }
            Ok(ImageArtifact {
                format: ImageFormat::Svg,
                width,
                height,
                bytes: svg.into_bytes(),
            })
        }
    }
}

fn effective_dpi(dpi: f64) -> f64 {
    if dpi.is_finite() {
        dpi.clamp(10.0, 600.0)
    } else {
        RenderOptions::default().dpi
    }
}

fn paint_raster(plan: &DrawPlan, dpi: f64, family: Option<&str>) -> Result<RasterImage> {
    let (width, height) = canvas_px(plan.width_in, plan.height_in, dpi);
    let mut rgb = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut rgb, (width, height)).into_drawing_area();
        paint(root, plan, dpi, family)?;
    }
    Ok(RasterImage { width, height, rgb })
}

/// Encode RGB pixels as PNG (deterministic for the same input).
pub fn encode_png(raster: &RasterImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut enc = png::Encoder::new(&mut buf, raster.width, raster.height);
        enc.set_color(png::ColorType::Rgb);
        enc.set_depth(png::BitDepth::Eight);
        let mut writer = enc.write_header()?;
        writer.write_image_data(&raster.rgb)?;
    }
    Ok(buf)
}

/// Dash and gap lengths in pixels for a dashed stroke of `width_pt`.
fn dash_pattern(width_pt: f64, dpi: f64) -> (i32, i32) {
    let dash = pt_to_px(3.7 * width_pt.max(1.0), dpi).round().max(3.0) as i32;
    let gap = pt_to_px(1.6 * width_pt.max(1.0), dpi).round().max(2.0) as i32;
    (dash, gap)
}

/// Helper that draws a plan to any Plotters backend.
fn paint<DB>(root: DrawingArea<DB, Shift>, plan: &DrawPlan, dpi: f64, family: Option<&str>) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(DotPlotError::render)?;
    let (canvas_w, _canvas_h) = root.dim_in_pixel();

    // ----------------------------
    // 0) Pixel metrics
    // ----------------------------
    let label_px = font_px(LABEL_PT, dpi);
    let title_px = font_px(TITLE_PT, dpi);
    let tick_len = pt_to_px(TICK_LEN_PT, dpi).round() as i32;
    let tick_style = BLACK.stroke_width(stroke_px(TICK_WIDTH_PT, dpi));
    let has_title = family.is_some() && !plan.title.trim().is_empty();

    let left_gutter = match family {
        Some(_) => compute_left_label_area_px(&plan.categories, label_px, canvas_w),
        None => (tick_len + 8) as u32,
    };
    let bottom_gutter = match family {
        Some(_) => label_px + tick_len as u32 + 12,
        None => tick_len as u32 + 8,
    };
    let top_margin = if has_title {
        title_px + pt_to_px(TITLE_PAD_PT, dpi).round() as u32
    } else {
        16
    };

    // ----------------------------
    // 1) Coordinate system: x = grade, y = category row
    // ----------------------------
    let (x_lo, x_hi) = plan.x_range;
    let y_lo = -ROW_PAD;
    let y_hi = (plan.categories.len().max(1) as f64 - 1.0) + ROW_PAD;

    let mut chart = ChartBuilder::on(&root)
        .margin_top(top_margin)
        .margin_right(16)
        .margin_left(8)
        .margin_bottom(8)
        .set_label_area_size(LabelAreaPosition::Left, left_gutter)
        .set_label_area_size(LabelAreaPosition::Bottom, bottom_gutter)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
        .map_err(DotPlotError::render)?;

    let (l, t) = chart.backend_coord(&(x_lo, y_hi));
    let (r, b) = chart.backend_coord(&(x_hi, y_lo));
    let y_px = |row: usize| chart.backend_coord(&(x_lo, row as f64)).1;
    let x_px = |grade: f64| chart.backend_coord(&(grade, y_lo)).0;

    // ----------------------------
    // 2) Gridlines (below everything else)
    // ----------------------------
    let (dash, gap) = dash_pattern(CATEGORY_GRID_PT, dpi);
    let category_grid = rgb_color(colors::LIGHT_GRAY).stroke_width(stroke_px(CATEGORY_GRID_PT, dpi));
    for row in 0..plan.categories.len() {
        let y = y_px(row);
        draw_dashed_line(&root, (l, y), (r, y), dash, gap, category_grid)?;
    }

    let (dash, gap) = dash_pattern(X_GRID_PT, dpi);
    let x_grid = rgb_color(colors::GRID_GRAY)
        .mix(X_GRID_ALPHA)
        .stroke_width(stroke_px(X_GRID_PT, dpi));
    for &tick in &plan.ticks {
        let x = x_px(tick);
        draw_dashed_line(&root, (x, t), (x, b), dash, gap, x_grid)?;
    }

    // ----------------------------
    // 3) Frame: spines in white at minimal width
    // ----------------------------
    root.draw(&Rectangle::new(
        [(l, t), (r, b)],
        rgb_color(colors::WHITE).stroke_width(1),
    ))
    .map_err(DotPlotError::render)?;

    // ----------------------------
    // 4) Ticks and labels
    // ----------------------------
    let label_font = family.map(|f| TextStyle::from((FontFamily::Name(f), label_px as f64)));

    for &tick in &plan.ticks {
        let x = x_px(tick);
        root.draw(&PathElement::new(vec![(x, b), (x, b + tick_len)], tick_style))
            .map_err(DotPlotError::render)?;
        if let Some(font) = &label_font {
            root.draw(&Text::new(
                format!("{tick:.1}"),
                (x, b + tick_len + 3),
                font.clone().pos(Pos::new(HPos::Center, VPos::Top)),
            ))
            .map_err(DotPlotError::render)?;
        }
    }

    let label_room = left_gutter.saturating_sub(tick_len as u32 + 10);
    for (row, category) in plan.categories.iter().enumerate() {
        let y = y_px(row);
        root.draw(&PathElement::new(vec![(l - tick_len, y), (l, y)], tick_style))
            .map_err(DotPlotError::render)?;
        if let Some(font) = &label_font {
            root.draw(&Text::new(
                truncate_to_width(category, label_px, label_room),
                (l - tick_len - 4, y),
                font.clone().pos(Pos::new(HPos::Right, VPos::Center)),
            ))
            .map_err(DotPlotError::render)?;
        }
    }

    // ----------------------------
    // 5) Point groups, already in paint order
    // ----------------------------
    let radius = marker_radius_px(plan.marker_size, dpi);
    let marker_stroke = stroke_px(plan.line_width_pt, dpi);
    for group in &plan.groups {
        let points: Vec<(f64, f64)> = group.grades.iter().map(|g| (*g, group.row as f64)).collect();
        draw_point_group(
            &mut chart,
            points,
            radius,
            marker_style(&group.rule, marker_stroke),
            group.rule.marker,
        )?;
    }

    // ----------------------------
    // 6) Legend and title
    // ----------------------------
    draw_legend(
        &root,
        &plan.legend,
        LegendMetrics {
            font_px: label_px,
            marker_radius: radius,
            stroke_px: marker_stroke,
        },
        (l, t, r, b),
        family,
    )?;

    if let Some(f) = family
        && has_title
    {
        let title_style = TextStyle::from((FontFamily::Name(f), title_px as f64))
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        let title_bottom = t - pt_to_px(TITLE_PAD_PT, dpi).round() as i32;
        root.draw(&Text::new(
            plan.title.as_str(),
            ((l + r) / 2, title_bottom),
            title_style,
        ))
        .map_err(DotPlotError::render)?;
    }

    root.present().map_err(DotPlotError::render)?;
    Ok(())
}
