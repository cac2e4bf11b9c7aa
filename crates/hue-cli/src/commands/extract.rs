//! Color extraction command.

use crate::ExtractArgs;
use anyhow::{Context, Result};
use hue_core::total_count;
use tracing::{info, trace};

/// Runs the extract command.
pub fn run(args: ExtractArgs, verbose: u8) -> Result<()> {
    trace!(image = %args.image.display(), output = %args.output.display(), "extract::run");

    let samples = hue_io::extract_image_colors(&args.image)
        .with_context(|| format!("Failed to load: {}", args.image.display()))?;
    super::save_table(&args.output, &samples, args.format)?;

    info!(colors = samples.len(), pixels = total_count(&samples), "Extracted colors");
    if verbose > 0 {
        println!(
            "{} distinct colors -> {}",
            samples.len(),
            args.output.display()
        );
    }
    Ok(())
}
