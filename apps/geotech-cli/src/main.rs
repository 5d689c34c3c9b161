//! Geotechnical Report Analyzer Binary
//!
//! Extracts the text of one report, runs every analyzer over it and prints
//! the answers to stdout. Logs go to stderr.

mod render;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use geotech_engine::{AnalysisConfig, GeotechEngine};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "geotech-analyzer")]
#[command(
    version,
    about = "Answer drainage, refusal and groundwater questions from a geotechnical report"
)]
struct Args {
    /// Report to analyze (.pdf, .docx or .txt)
    file: PathBuf,

    /// TOML file with analysis settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Count compound symbols such as SC-SM as neither constituent
    #[arg(long)]
    no_collapse_compounds: bool,

    /// Shallow-refusal threshold in feet
    #[arg(long, value_name = "FT")]
    refusal_threshold: Option<f64>,

    /// List the refusal depth recorded for each boring and sounding
    #[arg(long)]
    show_depths: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl Args {
    fn analysis_config(&self) -> anyhow::Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_file(path)?,
            None => AnalysisConfig::default(),
        };

        if self.no_collapse_compounds {
            config.collapse_compounds = false;
        }
        if let Some(threshold) = self.refusal_threshold {
            config.refusal_threshold_ft = threshold;
        }

        config
            .validate()
            .context("Invalid command-line override")?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // stdout carries only the report
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Geotechnical Report Analyzer v{}", env!("CARGO_PKG_VERSION"));

    let config = args.analysis_config()?;
    let document = report_extract::extract_file(&args.file)
        .with_context(|| format!("Failed to extract text from {}", args.file.display()))?;

    let source = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.display().to_string());

    let engine = GeotechEngine::with_config(config);
    let report = engine.analyze(&source, &document.text);

    match args.format {
        OutputFormat::Text => {
            let options = render::TextOptions {
                refusal_threshold_ft: engine.config().refusal_threshold_ft,
                show_depths: args.show_depths,
            };
            print!("{}", render::render_text(&report, &options)?);
        }
        OutputFormat::Json => {
            println!("{}", report.to_json_pretty()?);
        }
    }

    Ok(())
}
