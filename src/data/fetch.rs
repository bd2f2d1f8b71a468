use anyhow::anyhow;

use crate::error::{FetchError, InputError};

use super::model::{FluxVariant, ObservationSeries, TargetData};

/// Quality flag value of a usable cadence.
pub const QUALITY_GOOD: i32 = 0;

// ---------------------------------------------------------------------------
// Source seam
// ---------------------------------------------------------------------------

/// Anything that can turn a TIC ID into a light-curve product.
pub trait LightCurveSource {
    fn load(&self, tic: u64) -> anyhow::Result<TargetData>;
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Validate `identifier`, load the target once, keep quality-good cadences
/// and normalise the `variant` channel by its median.
pub fn fetch(
    source: &dyn LightCurveSource,
    identifier: &str,
    variant: FluxVariant,
) -> Result<ObservationSeries, FetchError> {
    let tic = parse_identifier(identifier)?;

    let data = source.load(tic).map_err(FetchError::Source)?;
    log::info!("{}", data.target);

    let flux = data
        .channel(variant)
        .ok_or(FetchError::VariantUnavailable(variant))?;

    if flux.len() != data.time.len() || data.quality.len() != data.time.len() {
        return Err(FetchError::Source(anyhow!(
            "product for TIC {tic} is inconsistent: {} times, {} quality flags, {} {} values",
            data.time.len(),
            data.quality.len(),
            flux.len(),
            variant
        )));
    }

    let good: Vec<(f64, f64)> = data
        .time
        .iter()
        .zip(&data.quality)
        .zip(flux)
        .filter(|((_, q), _)| **q == QUALITY_GOOD)
        .map(|((&t, _), &f)| (t, f))
        .collect();

    let median = nan_median(good.iter().map(|&(_, f)| f)).ok_or(FetchError::Unnormalisable {
        variant,
        reason: "no quality-good cadences with finite flux",
    })?;
    if median == 0.0 || !median.is_finite() {
        return Err(FetchError::Unnormalisable {
            variant,
            reason: "median flux is zero or infinite",
        });
    }

    log::info!(
        "TIC {tic}: kept {} of {} cadences, {variant} median {median:.3}",
        good.len(),
        data.time.len()
    );

    Ok(ObservationSeries::from_pairs(
        tic,
        variant,
        good.into_iter().map(|(t, f)| (t, f / median)),
    ))
}

/// A TIC ID is a positive integer. Anything else never reaches the source.
pub fn parse_identifier(identifier: &str) -> Result<u64, InputError> {
    let trimmed = identifier.trim();
    if trimmed.is_empty() {
        return Err(InputError::MissingIdentifier);
    }
    match trimmed.parse::<u64>() {
        Ok(tic) if tic > 0 => Ok(tic),
        _ => Err(InputError::InvalidIdentifier(trimmed.to_string())),
    }
}

/// Median of the non-NaN values, `None` if there are none.
pub fn nan_median(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut v: Vec<f64> = values.into_iter().filter(|x| !x.is_nan()).collect();
    if v.is_empty() {
        return None;
    }
    v.sort_by(f64::total_cmp);
    let mid = v.len() / 2;
    if v.len() % 2 == 0 {
        Some((v[mid - 1] + v[mid]) / 2.0)
    } else {
        Some(v[mid])
    }
}
