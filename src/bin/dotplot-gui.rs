/*!
 * Desktop front end for admit-dotplot
 *
 * Sidebar with the chart controls, live preview in the central panel:
 * - Open a CSV/JSON/Excel table of admission results
 * - Adjust title, size, grade range, legend placement and marker styling
 * - Save the chart as PNG or SVG
 */

use admit_dotplot::models::{X_MAX_RANGE, bounds};
use admit_dotplot::{
    ChartConfig, Dataset, FontSource, ImageFormat, LegendPosition, RenderOptions, ingest, viz,
};
use anyhow::Result;
use eframe::egui;
use std::path::{Path, PathBuf};

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 760.0])
            .with_min_inner_size([720.0, 480.0])
            .with_title("Admission results - dot plot"),
        ..Default::default()
    };

    eframe::run_native(
        "Admission dot plot",
        options,
        Box::new(|_cc| Ok(Box::new(DotPlotApp::new()))),
    )
}

struct DotPlotApp {
    config: ChartConfig,
    dataset: Option<Dataset>,
    source_path: Option<PathBuf>,
    font_path: String,

    preview: Option<egui::TextureHandle>,
    /// Config the preview was rendered with; a mismatch triggers a re-render.
    rendered_for: Option<ChartConfig>,

    status_message: String,
    error_message: String,
}

impl DotPlotApp {
    fn new() -> Self {
        Self {
            config: ChartConfig::default(),
            dataset: None,
            source_path: None,
            font_path: String::new(),
            preview: None,
            rendered_for: None,
            status_message: "Open a CSV, JSON or Excel file to begin.".to_string(),
            error_message: String::new(),
        }
    }

    fn render_options(&self, format: ImageFormat) -> RenderOptions {
        let font = if self.font_path.trim().is_empty() {
            FontSource::Auto
        } else {
            FontSource::File(PathBuf::from(self.font_path.trim()))
        };
        RenderOptions {
            format,
            font,
            ..Default::default()
        }
    }

    fn open_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Tables", &["csv", "json", "xlsx", "xls"])
            .pick_file()
        else {
            return;
        };
        match load_dataset(&path) {
            Ok(ds) => {
                self.status_message = format!("Loaded {} rows from {}", ds.len(), path.display());
                self.error_message.clear();
                self.dataset = Some(ds);
                self.source_path = Some(path);
                self.rendered_for = None;
            }
            Err(err) => {
                // Keep the previous chart; only report.
                self.error_message = format!("Could not load {}: {err}", path.display());
            }
        }
    }

    fn refresh_preview(&mut self, ctx: &egui::Context) {
        let Some(dataset) = &self.dataset else {
            return;
        };
        if self.rendered_for.as_ref() == Some(&self.config) {
            return;
        }
        let options = self.render_options(ImageFormat::Png);
        match viz::render_raster(dataset, &self.config, &options) {
            Ok(raster) => {
                let image = egui::ColorImage::from_rgb(
                    [raster.width as usize, raster.height as usize],
                    &raster.rgb,
                );
                self.preview = Some(ctx.load_texture("chart", image, egui::TextureOptions::LINEAR));
                self.error_message.clear();
            }
            Err(err) => self.error_message = format!("Render failed: {err}"),
        }
        self.rendered_for = Some(self.config.clone());
    }

    fn save_chart(&mut self, format: ImageFormat) {
        let Some(dataset) = &self.dataset else {
            return;
        };
        let default_dir = self
            .source_path
            .as_ref()
            .and_then(|p| p.parent().map(PathBuf::from))
            .or_else(dirs::picture_dir)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        let Some(path) = rfd::FileDialog::new()
            .set_directory(default_dir)
            .set_file_name(format!("dotplot.{}", format.extension()))
            .save_file()
        else {
            return;
        };

        let result = viz::render(dataset, &self.config, &self.render_options(format))
            .map_err(anyhow::Error::from)
            .and_then(|image| std::fs::write(&path, &image.bytes).map_err(anyhow::Error::from));
        match result {
            Ok(()) => {
                self.status_message = format!("Saved {}", path.display());
                self.error_message.clear();
            }
            Err(err) => self.error_message = format!("Failed to save chart: {err}"),
        }
    }

    fn sidebar(&mut self, ui: &mut egui::Ui) {
        ui.heading("Chart settings");
        ui.add_space(8.0);

        if ui.button("Open data file…").clicked() {
            self.open_file();
        }
        if let Some(p) = &self.source_path {
            ui.label(p.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default());
        }
        ui.add_space(8.0);

        ui.label("Title");
        ui.text_edit_singleline(&mut self.config.title);

        ui.add(egui::Slider::new(&mut self.config.width, bounds::WIDTH.0..=bounds::WIDTH.1).text("Width (in)"));
        ui.add(egui::Slider::new(&mut self.config.height, bounds::HEIGHT.0..=bounds::HEIGHT.1).text("Height (in)"));
        ui.add(
            egui::Slider::new(&mut self.config.x_max, X_MAX_RANGE.0..=X_MAX_RANGE.1)
                .step_by(bounds::X_MAX_STEP)
                .text("Grade axis max"),
        );

        ui.label("Legend position");
        ui.horizontal(|ui| {
            ui.radio_value(&mut self.config.legend_position, LegendPosition::UpperRight, "Upper right");
            ui.radio_value(&mut self.config.legend_position, LegendPosition::LowerRight, "Lower right");
        });

        ui.add(
            egui::Slider::new(&mut self.config.line_width, bounds::LINE_WIDTH.0..=bounds::LINE_WIDTH.1)
                .step_by(0.5)
                .text("Line width (pt)"),
        );
        ui.add(
            egui::Slider::new(&mut self.config.marker_size, bounds::MARKER_SIZE.0..=bounds::MARKER_SIZE.1)
                .step_by(10.0)
                .text("Marker size"),
        );

        ui.collapsing("Font", |ui| {
            ui.horizontal(|ui| {
                if ui
                    .text_edit_singleline(&mut self.font_path)
                    .on_hover_text("Path to a .ttf/.otf file; empty = search system fonts")
                    .lost_focus()
                {
                    self.rendered_for = None;
                }
                if ui.button("Browse").clicked()
                    && let Some(path) = rfd::FileDialog::new().add_filter("Fonts", &["ttf", "otf", "ttc"]).pick_file()
                {
                    self.font_path = path.to_string_lossy().to_string();
                    self.rendered_for = None;
                }
            });
        });

        ui.add_space(12.0);
        ui.add_enabled_ui(self.dataset.is_some(), |ui| {
            ui.horizontal(|ui| {
                if ui.button("Save PNG").clicked() {
                    self.save_chart(ImageFormat::Png);
                }
                if ui.button("Save SVG").clicked() {
                    self.save_chart(ImageFormat::Svg);
                }
            });
        });

        ui.add_space(10.0);
        if !self.status_message.is_empty() {
            ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
        }
        if !self.error_message.is_empty() {
            ui.colored_label(egui::Color32::RED, &self.error_message);
        }
    }
}

impl eframe::App for DotPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("settings")
            .resizable(true)
            .min_width(260.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.sidebar(ui));
            });

        self.refresh_preview(ctx);

        egui::CentralPanel::default().show(ctx, |ui| match &self.preview {
            Some(tex) => {
                ui.add(egui::Image::from_texture(tex).shrink_to_fit());
            }
            None => {
                ui.centered_and_justified(|ui| ui.label("No chart yet"));
            }
        });
    }
}

fn load_dataset(path: &Path) -> Result<Dataset> {
    let table = ingest::load_table(path)?;
    Ok(Dataset::from_table(&table)?)
}
