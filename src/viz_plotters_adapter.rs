//! Adapter helpers to draw [`EncodingRule`]s with the plotters crate.
//!
//! Markers are hollow: the rule's color (with its opacity) strokes the edge and
//! nothing is filled, so overlapping marks stay distinguishable.

use plotters::coord::CoordTranslate;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::encoding::{EncodingRule, MarkerGlyph, Rgb8};
use crate::error::{DotPlotError, Result};

pub fn rgb_color(rgb: Rgb8) -> RGBColor {
    RGBColor(rgb.r, rgb.g, rgb.b)
}

/// Rule color with the rule's opacity applied.
pub fn rgba_color(rule: &EncodingRule) -> RGBAColor {
    rgb_color(rule.color).mix(rule.opacity)
}

/// Edge-only style for a marker.
pub fn marker_style(rule: &EncodingRule, stroke_px: u32) -> ShapeStyle {
    rgba_color(rule).stroke_width(stroke_px)
}

/// Draw one point group in data coordinates (`(grade, row)` pairs).
pub fn draw_point_group<DB, CT>(
    chart: &mut ChartContext<'_, DB, CT>,
    points: Vec<(f64, f64)>,
    radius: i32,
    style: ShapeStyle,
    glyph: MarkerGlyph,
) -> Result<()>
where
    DB: DrawingBackend,
    CT: CoordTranslate<From = (f64, f64)>,
{
    match glyph {
        MarkerGlyph::Circle => {
            chart
                .draw_series(PointSeries::of_element(
                    points,
                    radius,
                    style,
                    &|c: (f64, f64), s: i32, st| EmptyElement::at(c) + Circle::new((0, 0), s, st.clone()),
                ))
                .map_err(DotPlotError::render)?;
        }
        MarkerGlyph::Cross => {
            chart
                .draw_series(PointSeries::of_element(
                    points,
                    radius,
                    style,
                    &|c: (f64, f64), s: i32, st| {
                        EmptyElement::at(c)
                            + PathElement::new(vec![(-s, -s), (s, s)], st.clone())
                            + PathElement::new(vec![(-s, s), (s, -s)], st.clone())
                    },
                ))
                .map_err(DotPlotError::render)?;
        }
    }
    Ok(())
}

/// Draw a single glyph in pixel coordinates (legend swatches).
pub fn draw_glyph<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    center: (i32, i32),
    radius: i32,
    style: ShapeStyle,
    glyph: MarkerGlyph,
) -> Result<()> {
    let (x, y) = center;
    match glyph {
        MarkerGlyph::Circle => {
            area.draw(&Circle::new(center, radius, style))
                .map_err(DotPlotError::render)?;
        }
        MarkerGlyph::Cross => {
            area.draw(&PathElement::new(
                vec![(x - radius, y - radius), (x + radius, y + radius)],
                style,
            ))
            .map_err(DotPlotError::render)?;
            area.draw(&PathElement::new(
                vec![(x - radius, y + radius), (x + radius, y - radius)],
                style,
            ))
            .map_err(DotPlotError::render)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{FAIL_RULE, PASS_RULE};

    #[test]
    fn marker_style_is_hollow_with_rule_opacity() {
        let st = marker_style(&FAIL_RULE, 3);
        assert!(!st.filled);
        assert_eq!(st.stroke_width, 3);
        assert_eq!((st.color.0, st.color.1, st.color.2), (255, 0, 0));
        assert_eq!(st.color.3, 0.5);
        let pass = rgba_color(&PASS_RULE);
        assert_eq!((pass.0, pass.1, pass.2, pass.3), (0, 0, 255, 0.9));
    }
}
