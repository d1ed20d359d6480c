//! admit_dotplot
//!
//! Turn a table of admission results into a categorical dot plot: one row per
//! admission track, one hollow marker per applicant at their grade, colored and
//! shaped by outcome. Pairs with the `dotplot` CLI and the `dotplot-gui` app.
//!
//! ### Features
//! - Read CSV (UTF-8 or CP949), JSON or Excel tables
//! - Fixed outcome encoding: 합 blue circle, 추합 green circle, 불 red ×
//! - Pure layout step ([`viz::plan`]) that can be inspected or saved as JSON
//! - PNG or SVG output through plotters
//!
//! ### Example
//! ```no_run
//! use admit_dotplot::{ChartConfig, FontSource, RenderOptions, ingest, viz};
//!
//! let table = ingest::load_table("results.csv")?;
//! let options = RenderOptions { font: FontSource::Disabled, ..Default::default() };
//! let image = viz::render_table(&table, &ChartConfig::default(), &options)?;
//! std::fs::write("results.png", &image.bytes)?;
//! # Ok::<(), admit_dotplot::DotPlotError>(())
//! ```

pub mod encoding;
pub mod error;
pub mod ingest;
pub mod models;
pub mod viz;
pub mod viz_plotters_adapter;

pub use encoding::{EncodingRule, resolve};
pub use error::{DotPlotError, Result};
pub use models::{ChartConfig, Dataset, LegendPosition, Record, Table};
pub use viz::{DrawPlan, FontSource, ImageArtifact, ImageFormat, RenderOptions};
