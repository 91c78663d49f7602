//! implore-figure - render the composite grid figure
//!
//! Without `--output` the figure is composed and its JSON summary printed to
//! stdout. With `--output` it is exported as SVG or PNG.

mod cli;

use clap::Parser;
use implore_figure::{compose, export, NoiseSource};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Args;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.resolve_config()?;

    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let mut noise = NoiseSource::new(config.seed);
    let figure = compose(&config, &mut noise)?;

    if config.output.path.is_some() {
        let report = export(&figure, &config.output.export_config())?;
        info!(
            path = ?report.path,
            width = report.dimensions.0,
            height = report.dimensions.1,
            created_at = %report.created_at,
            "figure written"
        );
        if !args.summary {
            return Ok(());
        }
    }

    println!("{}", serde_json::to_string_pretty(&figure.summary())?);
    Ok(())
}
