//! Palette swatch command.

use crate::SwatchArgs;
use crate::config::Settings;
use anyhow::{Context, Result};
use hue_core::ClusterRepresentative;
use tracing::{info, trace};

/// Runs the swatch command.
pub fn run(args: SwatchArgs, settings: &Settings, verbose: u8) -> Result<()> {
    trace!(groups = %args.groups.display(), output = %args.output.display(), "swatch::run");

    let mut groups: Vec<ClusterRepresentative> = hue_io::read_table(&args.groups, None)
        .with_context(|| format!("Failed to load: {}", args.groups.display()))?;
    groups.sort_by_key(|g| g.label);

    let width = args.width.unwrap_or(settings.swatch.width);
    let height = args.height.unwrap_or(settings.swatch.height);
    hue_io::write_swatch(&args.output, &groups, width, height)
        .with_context(|| format!("Failed to save: {}", args.output.display()))?;

    info!(groups = groups.len(), width, height, "Rendered swatch");
    if verbose > 0 {
        println!("{} groups -> {}", groups.len(), args.output.display());
    }
    Ok(())
}
