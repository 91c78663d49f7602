//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;
use implore_figure::{ExportFormat, FigureConfig, FigureResult};

#[derive(Parser, Debug, Clone)]
#[command(name = "implore-figure", author, version, about = "Render the composite grid figure")]
pub struct Args {
    /// Config file (.toml or .json)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Noise seed (entropy when absent)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the figure here instead of printing a summary
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (inferred from --output when absent)
    #[arg(long, value_parser = parse_format)]
    pub format: Option<ExportFormat>,

    /// Export resolution
    #[arg(long)]
    pub dpi: Option<u32>,

    /// Print the effective configuration as TOML and exit
    #[arg(long, default_value_t = false)]
    pub print_config: bool,

    /// Print the JSON summary even when exporting
    #[arg(long, default_value_t = false)]
    pub summary: bool,
}

fn parse_format(s: &str) -> Result<ExportFormat, String> {
    ExportFormat::from_name(s).map_err(|e| e.to_string())
}

impl Args {
    /// Config file (or defaults) with command-line overrides applied
    pub fn resolve_config(&self) -> FigureResult<FigureConfig> {
        let mut config = match &self.config {
            Some(path) => FigureConfig::load(path)?,
            None => FigureConfig::default(),
        };

        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(path) = &self.output {
            config.output.path = Some(path.clone());
            if self.format.is_none() {
                config.output.format = ExportFormat::from_path(path)?;
            }
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(dpi) = self.dpi {
            config.output.dpi = dpi;
        }

        config.validate()?;
        Ok(config)
    }
}
