//! Outcome → visual attributes.
//!
//! Every outcome label maps to one [`EncodingRule`] bundle (color, glyph, opacity,
//! draw priority). Labels outside the fixed table get [`DEFAULT_RULE`], so novel
//! outcomes stay visible instead of failing the render.

use serde::Serialize;

/// Pass.
pub const PASS: &str = "합";
/// Pass from the waiting list.
pub const WAITLIST_PASS: &str = "추합";
/// Fail.
pub const FAIL: &str = "불";

/// Fixed legend order. Outcomes not listed here are plotted but never get a legend entry.
pub const LEGEND_ORDER: [&str; 3] = [PASS, WAITLIST_PASS, FAIL];

/// Title shown above the legend entries ("result").
pub const LEGEND_TITLE: &str = "결과";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Named colors (CSS/X11 values).
pub mod colors {
    use super::Rgb8;

    pub const BLUE: Rgb8 = Rgb8::new(0, 0, 255);
    pub const GREEN: Rgb8 = Rgb8::new(0, 128, 0);
    pub const RED: Rgb8 = Rgb8::new(255, 0, 0);
    pub const GRAY: Rgb8 = Rgb8::new(128, 128, 128);
    pub const LIGHT_GRAY: Rgb8 = Rgb8::new(211, 211, 211);
    pub const GRID_GRAY: Rgb8 = Rgb8::new(176, 176, 176);
    pub const LEGEND_EDGE: Rgb8 = Rgb8::new(204, 204, 204);
    pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);
    pub const BLACK: Rgb8 = Rgb8::new(0, 0, 0);
}

/// Marker glyph. Both are drawn hollow (edge only).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerGlyph {
    Circle,
    /// Diagonal cross (×).
    Cross,
}

/// Draw attributes for one outcome.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EncodingRule {
    pub color_name: &'static str,
    pub color: Rgb8,
    pub marker: MarkerGlyph,
    /// 0.0 (invisible) ..= 1.0 (opaque).
    pub opacity: f64,
    /// Higher paints later, i.e. on top.
    pub draw_priority: u8,
}

pub const PASS_RULE: EncodingRule = EncodingRule {
    color_name: "blue",
    color: colors::BLUE,
    marker: MarkerGlyph::Circle,
    opacity: 0.9,
    draw_priority: 3,
};

pub const WAITLIST_PASS_RULE: EncodingRule = EncodingRule {
    color_name: "green",
    color: colors::GREEN,
    marker: MarkerGlyph::Circle,
    opacity: 0.9,
    draw_priority: 3,
};

pub const FAIL_RULE: EncodingRule = EncodingRule {
    color_name: "red",
    color: colors::RED,
    marker: MarkerGlyph::Cross,
    opacity: 0.5,
    draw_priority: 1,
};

/// Rule for any label outside the fixed table: gray, circle, opaque, painted first.
pub const DEFAULT_RULE: EncodingRule = EncodingRule {
    color_name: "gray",
    color: colors::GRAY,
    marker: MarkerGlyph::Circle,
    opacity: 1.0,
    draw_priority: 0,
};

/// Resolve the draw attributes for an outcome label. Total: never fails.
pub fn resolve(outcome: &str) -> EncodingRule {
    match outcome {
        PASS => PASS_RULE,
        WAITLIST_PASS => WAITLIST_PASS_RULE,
        FAIL => FAIL_RULE,
        _ => DEFAULT_RULE,
    }
}

/// Whether the label belongs to the fixed table (and therefore to the legend).
pub fn is_known(outcome: &str) -> bool {
    LEGEND_ORDER.contains(&outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rule_sits_below_fail() {
        assert!(DEFAULT_RULE.draw_priority < FAIL_RULE.draw_priority);
        assert!(FAIL_RULE.draw_priority < PASS_RULE.draw_priority);
    }
}
