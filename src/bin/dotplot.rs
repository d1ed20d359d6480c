use admit_dotplot::{
    ChartConfig, FontSource, ImageFormat, LegendPosition, RenderOptions, ingest, viz,
};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "dotplot",
    version,
    about = "Render admission results (track, grade, outcome) as a dot plot"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a CSV/JSON/Excel table to PNG or SVG.
    Render(RenderArgs),
    /// Print (or save) the computed draw plan as JSON.
    Plan(PlanArgs),
    /// Print (or save) the default chart configuration as JSON.
    Config {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutFormat {
    Png,
    Svg,
}

/// Appearance overrides shared by `render` and `plan`.
#[derive(Args, Debug)]
struct ChartArgs {
    /// JSON configuration file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    title: Option<String>,
    /// Figure width in inches.
    #[arg(long)]
    width: Option<f64>,
    /// Figure height in inches.
    #[arg(long)]
    height: Option<f64>,
    /// Upper end of the grade axis (2.0 to 9.0).
    #[arg(long)]
    x_max: Option<f64>,
    /// upper-right or lower-right
    #[arg(long)]
    legend: Option<LegendPosition>,
    /// Marker edge width in points.
    #[arg(long)]
    line_width: Option<f64>,
    /// Marker area in points².
    #[arg(long)]
    marker_size: Option<f64>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Input table (.csv, .json or .xlsx) with 대학명_전형, 등급 and 결과 columns.
    input: PathBuf,
    /// Output image path.
    #[arg(short, long)]
    out: PathBuf,
    /// Output format. If omitted, inferred from the --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    #[command(flatten)]
    chart: ChartArgs,
    /// Pixels per inch.
    #[arg(long, default_value_t = 100.0)]
    dpi: f64,
    /// TrueType/OpenType font for labels (default: probe system fonts).
    #[arg(long, conflicts_with = "no_text")]
    font: Option<PathBuf>,
    /// Draw marks only, no text.
    #[arg(long, default_value_t = false)]
    no_text: bool,
}

#[derive(Args, Debug)]
struct PlanArgs {
    input: PathBuf,
    #[arg(long)]
    out: Option<PathBuf>,
    #[command(flatten)]
    chart: ChartArgs,
}

impl ChartArgs {
    fn resolve(&self) -> Result<ChartConfig> {
        let mut cfg = match &self.config {
            Some(path) => ingest::load_config(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => ChartConfig::default(),
        };
        if let Some(t) = &self.title {
            cfg.title = t.clone();
        }
        if let Some(v) = self.width {
            cfg.width = v;
        }
        if let Some(v) = self.height {
            cfg.height = v;
        }
        if let Some(v) = self.x_max {
            cfg.x_max = v;
        }
        if let Some(p) = self.legend {
            cfg.legend_position = p;
        }
        if let Some(v) = self.line_width {
            cfg.line_width = v;
        }
        if let Some(v) = self.marker_size {
            cfg.marker_size = v;
        }
        Ok(cfg)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Config { out } => cmd_config(out),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let config = args.chart.resolve()?;
    let format = match args.format {
        Some(OutFormat::Png) => ImageFormat::Png,
        Some(OutFormat::Svg) => ImageFormat::Svg,
        None => ImageFormat::from_path(&args.out),
    };
    let font = match (&args.font, args.no_text) {
        (_, true) => FontSource::Disabled,
        (Some(path), false) => FontSource::File(path.clone()),
        (None, false) => FontSource::Auto,
    };
    let options = RenderOptions {
        format,
        dpi: args.dpi,
        font,
    };

    let table = ingest::load_table(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let image = viz::render_table(&table, &config, &options)?;
    std::fs::write(&args.out, &image.bytes)
        .with_context(|| format!("writing {}", args.out.display()))?;
    eprintln!(
        "Wrote {}x{} {} to {}",
        image.width,
        image.height,
        image.format.extension(),
        args.out.display()
    );
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> Result<()> {
    let config = args.chart.resolve()?;
    let table = ingest::load_table(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let dataset = admit_dotplot::Dataset::from_table(&table)?;
    let plan = viz::plan(&dataset, &config);
    match args.out {
        Some(path) => {
            ingest::save_plan_json(&plan, &path)?;
            eprintln!(
                "Saved plan ({} categories, {} points) to {}",
                plan.categories.len(),
                plan.point_count(),
                path.display()
            );
        }
        None => println!("{}", serde_json::to_string_pretty(&plan)?),
    }
    Ok(())
}

fn cmd_config(out: Option<PathBuf>) -> Result<()> {
    let cfg = ChartConfig::default();
    match out {
        Some(path) => {
            ingest::save_config(&cfg, &path)?;
            eprintln!("Saved default configuration to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&cfg)?),
    }
    Ok(())
}
