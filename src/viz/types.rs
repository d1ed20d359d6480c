//! Public types for the visualization module.

use crate::encoding::EncodingRule;
use crate::models::LegendPosition;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Fully resolved, ready-to-paint description of one chart.
///
/// Categories are listed bottom to top: the index of a category is its y position.
/// Groups are listed in paint order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawPlan {
    pub title: String,
    /// Canvas size in inches.
    pub width_in: f64,
    pub height_in: f64,
    pub categories: Vec<String>,
    pub x_range: (f64, f64),
    pub ticks: Vec<f64>,
    pub groups: Vec<PointGroup>,
    pub legend: Legend,
    /// Marker edge width in points.
    pub line_width_pt: f64,
    /// Marker area in points².
    pub marker_size: f64,
    /// Points left out because their grade lies outside `x_range`.
    pub clipped_points: usize,
}

impl DrawPlan {
    /// One dashed horizontal gridline per category.
    pub fn gridline_count(&self) -> usize {
        self.categories.len()
    }

    pub fn point_count(&self) -> usize {
        self.groups.iter().map(|g| g.grades.len()).sum()
    }

    pub fn category_row(&self, track: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == track)
    }
}

/// All records of one outcome within one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointGroup {
    pub category: String,
    /// y position (index into `DrawPlan::categories`).
    pub row: usize,
    pub outcome: String,
    pub rule: EncodingRule,
    pub grades: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: &'static str,
    pub position: LegendPosition,
    pub entries: Vec<LegendEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub rule: EncodingRule,
}

/// Output encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    /// Infer from a file extension (`.svg` → SVG, anything else → PNG).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase())
            .as_deref()
        {
            Some("svg") => ImageFormat::Svg,
            _ => ImageFormat::Png,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

/// Where text glyphs come from. Plotters' `ab_glyph` path does not discover OS fonts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FontSource {
    /// Probe well-known system font locations; render without text if none loads.
    #[default]
    Auto,
    /// Load this TrueType/OpenType file; failing to load it is an error.
    File(PathBuf),
    /// Draw marks only.
    Disabled,
}

/// Rendering settings that are not part of the chart's appearance controls.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub format: ImageFormat,
    /// Pixels per inch for canvas size, point-based line widths and font sizes.
    pub dpi: f64,
    pub font: FontSource,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: ImageFormat::Png,
            dpi: 100.0,
            font: FontSource::Auto,
        }
    }
}

/// Encoded chart: PNG bytes or UTF-8 SVG text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageArtifact {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

/// Unencoded 8-bit RGB pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}
