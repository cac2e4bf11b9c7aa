//! Color extraction: tally every pixel by its exact sRGB triple.
//!
//! Counting is order independent, so the byte-buffer variant tallies in
//! parallel (rayon fold/reduce) and merges partial maps. Output is always
//! sorted ascending on `(r, g, b)`.

use crate::error::{Error, Result};
use crate::sample::{ColorSample, Rgb8};
use rayon::prelude::*;
use std::collections::HashMap;

type Tally = HashMap<Rgb8, u64>;

/// Tallies an interleaved 8-bit RGB buffer.
///
/// # Errors
///
/// [`Error::RaggedBuffer`] if `data.len()` is not a multiple of three.
///
/// # Example
///
/// ```rust
/// use hue_core::{extract_from_rgb_bytes, ColorSample, Rgb8};
///
/// let data = [255, 0, 0, 255, 0, 0, 0, 255, 0, 0, 0, 255];
/// let samples = extract_from_rgb_bytes(&data).unwrap();
/// assert_eq!(samples[0], ColorSample::new(Rgb8::new(0, 0, 255), 1));
/// assert_eq!(samples[2], ColorSample::new(Rgb8::new(255, 0, 0), 2));
/// ```
pub fn extract_from_rgb_bytes(data: &[u8]) -> Result<Vec<ColorSample>> {
    if data.len() % 3 != 0 {
        return Err(Error::RaggedBuffer { len: data.len() });
    }

    let tally = data
        .par_chunks_exact(3)
        .fold(Tally::new, |mut acc, px| {
            *acc.entry(Rgb8::new(px[0], px[1], px[2])).or_insert(0) += 1;
            acc
        })
        .reduce(Tally::new, merge);

    Ok(into_sorted(tally))
}

/// Tallies pixels from any iterator.
pub fn extract_from_pixels<I>(pixels: I) -> Vec<ColorSample>
where
    I: IntoIterator<Item = Rgb8>,
{
    let mut tally = Tally::new();
    for px in pixels {
        *tally.entry(px).or_insert(0) += 1;
    }
    into_sorted(tally)
}

/// Sum of all sample counts.
#[inline]
pub fn total_count(samples: &[ColorSample]) -> u64 {
    samples.iter().map(|s| s.count).sum()
}

fn merge(a: Tally, b: Tally) -> Tally {
    // fold the smaller map into the larger one
    let (mut big, small) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    for (k, v) in small {
        *big.entry(k).or_insert(0) += v;
    }
    big
}

fn into_sorted(tally: Tally) -> Vec<ColorSample> {
    let mut samples: Vec<ColorSample> = tally
        .into_iter()
        .map(|(rgb, count)| ColorSample::new(rgb, count))
        .collect();
    samples.sort_unstable_by_key(|s| s.rgb);
    samples
}
