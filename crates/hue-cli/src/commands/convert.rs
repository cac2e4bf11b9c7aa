//! sRGB to CIELAB conversion command.

use crate::ConvertArgs;
use anyhow::Result;
use hue_core::ColorSample;
use tracing::{info, trace};

/// Runs the convert command.
///
/// Any table with an RGB triple and a count per row is accepted.
pub fn run(args: ConvertArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), output = %args.output.display(), "convert::run");

    let samples: Vec<ColorSample> = super::load_samples(&args.input)?;
    let rows = super::lab_rows(&samples);
    super::save_table(&args.output, &rows, args.format)?;

    info!(colors = rows.len(), "Converted to LAB");
    if verbose > 0 {
        println!("{} colors -> {}", rows.len(), args.output.display());
    }
    Ok(())
}
