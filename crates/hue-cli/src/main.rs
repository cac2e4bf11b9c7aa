//! hue - image palette extraction and clustering CLI
//!
//! Runs the color pipeline stage by stage or end to end:
//! extract -> convert -> cluster -> report.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use hue_io::TableFormat;
use std::path::PathBuf;

mod commands;
mod config;
mod logging;

use config::Settings;

#[derive(Parser)]
#[command(name = "hue")]
#[command(author, version, about = "Image palette extraction and DBSCAN color clustering")]
#[command(long_about = "
Extracts the distinct colors of an image, converts them to CIELAB and
groups perceptually close colors with DBSCAN.

Examples:
  hue run photo.png out/                      # All stages, JSON tables
  hue run photo.png out/ --format text --swatch
  hue extract photo.png color_data.txt        # Distinct colors and counts
  hue convert color_data.txt color_data_lab.txt
  hue cluster color_data_lab.txt clustered_lab_data.txt --groups group_colors.txt
  hue cluster lab.json clustered.json --eps 3 --min-samples 5 --weighted
  hue histogram color_data_lab.txt luminance.txt --bin-size 1
  hue --config hue.yaml cluster lab.json out.json --no-weighted
  hue swatch group_colors.txt palette.png --width 800
  hue map photo.png cluster_map.png --eps 3
  hue map photo.png cluster_map.png --clustered clustered_lab_data.txt
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true)]
    threads: Option<usize>,

    /// YAML settings file (default: $HUE_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Count the distinct colors of an image
    #[command(visible_alias = "x")]
    Extract(ExtractArgs),

    /// Add CIELAB values to a color-count table
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// Group LAB colors with DBSCAN
    Cluster(ClusterArgs),

    /// Run extract, convert and cluster on one image
    Run(RunArgs),

    /// L* histogram of a LAB table
    #[command(visible_alias = "hist")]
    Histogram(HistogramArgs),

    /// Render a group table as a PNG palette strip
    Swatch(SwatchArgs),

    /// Repaint an image with its group colors
    Map(MapArgs),
}

#[derive(Args)]
struct ExtractArgs {
    /// Input image
    image: PathBuf,

    /// Output color-count table
    output: PathBuf,

    /// Table format: text or json (default: from extension)
    #[arg(short, long)]
    format: Option<TableFormat>,
}

#[derive(Args)]
struct ConvertArgs {
    /// Input color-count table
    input: PathBuf,

    /// Output LAB table
    output: PathBuf,

    /// Table format: text or json (default: from extension)
    #[arg(short, long)]
    format: Option<TableFormat>,
}

/// Pixel-count weighting. Either flag overrides the config file; the
/// last one given wins.
#[derive(Args)]
struct WeightOpts {
    /// Weigh each color by its pixel count
    #[arg(short, long, overrides_with = "no_weighted")]
    weighted: bool,

    /// Count each distinct color once
    #[arg(long, overrides_with = "weighted")]
    no_weighted: bool,
}

impl WeightOpts {
    /// Flag value, falling back to `configured`.
    fn resolve(&self, configured: bool) -> bool {
        match (self.weighted, self.no_weighted) {
            (true, _) => true,
            (_, true) => false,
            _ => configured,
        }
    }
}

/// DBSCAN options shared by `cluster` and `run`.
#[derive(Args)]
struct ClusterOpts {
    /// Neighborhood radius in delta E
    #[arg(short, long)]
    eps: Option<f64>,

    /// Minimum neighborhood size for a core color
    #[arg(short, long)]
    min_samples: Option<usize>,

    #[command(flatten)]
    weight: WeightOpts,
}

#[derive(Args)]
struct ClusterArgs {
    /// Input LAB (or clustered) table
    input: PathBuf,

    /// Output clustered table
    output: PathBuf,

    /// Also write the group table here
    #[arg(short, long)]
    groups: Option<PathBuf>,

    #[command(flatten)]
    opts: ClusterOpts,

    /// Table format: text or json (default: from extension)
    #[arg(short, long)]
    format: Option<TableFormat>,
}

#[derive(Args)]
struct RunArgs {
    /// Input image
    image: PathBuf,

    /// Output directory
    out_dir: PathBuf,

    #[command(flatten)]
    opts: ClusterOpts,

    /// Table format: text or json
    #[arg(short, long, default_value = "json")]
    format: TableFormat,

    /// Also render swatch.png
    #[arg(short, long)]
    swatch: bool,

    /// Also render cluster_map.png
    #[arg(long)]
    map: bool,
}

#[derive(Args)]
struct HistogramArgs {
    /// Input LAB (or clustered) table
    input: PathBuf,

    /// Output histogram table
    output: PathBuf,

    /// Bin width in L* units
    #[arg(short, long)]
    bin_size: Option<f64>,

    #[command(flatten)]
    weight: WeightOpts,

    /// Table format: text or json (default: from extension)
    #[arg(short, long)]
    format: Option<TableFormat>,
}

#[derive(Args)]
struct SwatchArgs {
    /// Input group table
    groups: PathBuf,

    /// Output PNG
    output: PathBuf,

    /// Image width
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// Image height
    #[arg(short = 'H', long)]
    height: Option<u32>,
}

#[derive(Args)]
struct MapArgs {
    /// Input image
    image: PathBuf,

    /// Output PNG
    output: PathBuf,

    #[command(flatten)]
    opts: ClusterOpts,

    /// Take group numbers from this clustered table instead of clustering
    #[arg(long)]
    clustered: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _guard = logging::init(cli.verbose, cli.quiet, cli.log_file.as_deref())?;
    let settings = Settings::load(cli.config.as_deref())?;

    // Configure thread pool
    let threads = cli.threads.unwrap_or(settings.threads);
    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Extract(args) => commands::extract::run(args, cli.verbose),
        Commands::Convert(args) => commands::convert::run(args, cli.verbose),
        Commands::Cluster(args) => commands::cluster::run(args, &settings, cli.verbose),
        Commands::Run(args) => commands::run::run(args, &settings, cli.verbose),
        Commands::Histogram(args) => commands::histogram::run(args, &settings, cli.verbose),
        Commands::Swatch(args) => commands::swatch::run(args, &settings, cli.verbose),
        Commands::Map(args) => commands::map::run(args, &settings, cli.verbose),
    }
}
