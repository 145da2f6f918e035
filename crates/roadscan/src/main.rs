//! Extract a road network from a photograph of road infrastructure
//! and emit it as JSON.
//!
//! The pipeline itself performs no serialization; this driver is the
//! reference caller that does.

use std::path::PathBuf;

use clap::Parser;
use roadscan_pipeline::{ExtractionConfig, extract_network};

/// Extract a structured road network from a raster image.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Input image path (PNG, JPEG, or BMP).
    input: PathBuf,

    /// Output JSON path. Prints to stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Minimum accepted road width in pixels.
    #[arg(long, default_value_t = ExtractionConfig::default().min_road_width)]
    min_road_width: f64,

    /// Maximum accepted road width in pixels.
    #[arg(long, default_value_t = ExtractionConfig::default().max_road_width)]
    max_road_width: f64,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Route the pipeline's `log` records through a fmt subscriber;
    // RUST_LOG overrides the default filter.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("roadscan_pipeline=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    eprintln!("Reading image from {}", args.input.display());
    let image_bytes = std::fs::read(&args.input)?;

    let config = ExtractionConfig {
        min_road_width: args.min_road_width,
        max_road_width: args.max_road_width,
        ..ExtractionConfig::default()
    };

    let network = extract_network(&image_bytes, &config)?;
    let metrics = network.metrics();
    eprintln!(
        "Extracted {} segments, {} intersections, {} total lanes",
        metrics.num_segments, metrics.num_intersections, metrics.total_lanes,
    );

    let json = if args.pretty {
        serde_json::to_string_pretty(&network)?
    } else {
        serde_json::to_string(&network)?
    };

    match args.output {
        Some(path) => {
            std::fs::write(&path, json)?;
            eprintln!("Network written to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
