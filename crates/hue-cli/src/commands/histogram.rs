//! Luminance histogram command.

use crate::HistogramArgs;
use crate::config::Settings;
use anyhow::{Context, Result};
use hue_color::{HistogramBin, LuminanceHistogram};
use hue_io::LabSample;
use tracing::{info, trace};

/// Bins the L* values of `rows`, brightest bin first.
pub fn histogram_rows(rows: &[LabSample], bin_size: f64, weighted: bool) -> Result<Vec<HistogramBin>> {
    let values = rows
        .iter()
        .map(|r| (r.lab.l, if weighted { r.count } else { 1 }));
    let hist = LuminanceHistogram::from_weighted(values, bin_size)
        .context("Failed to build histogram")?;
    Ok(hist.non_empty().collect())
}

/// Runs the histogram command.
pub fn run(args: HistogramArgs, settings: &Settings, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), output = %args.output.display(), "histogram::run");

    let bin_size = args.bin_size.unwrap_or(settings.histogram.bin_size);
    let weighted = args.weight.resolve(settings.histogram.weighted);

    let rows: Vec<LabSample> = super::load_samples(&args.input)?;
    let bins = histogram_rows(&rows, bin_size, weighted)?;
    super::save_table(&args.output, &bins, args.format)?;

    info!(colors = rows.len(), bins = bins.len(), bin_size, weighted, "Built histogram");
    if verbose > 0 {
        println!("{} non-empty bins -> {}", bins.len(), args.output.display());
    }
    Ok(())
}
