use std::fmt;
use std::str::FromStr;

use crate::error::{FetchError, InputError};

// ---------------------------------------------------------------------------
// FluxVariant – which photometric channel to plot
// ---------------------------------------------------------------------------

/// The three reductions eleanor produces for the same aperture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FluxVariant {
    Raw,
    #[default]
    Corrected,
    /// Systematics removed with the co-trending basis vectors; not every
    /// product carries it.
    Pca,
}

impl FluxVariant {
    pub const ALL: [FluxVariant; 3] = [FluxVariant::Raw, FluxVariant::Corrected, FluxVariant::Pca];

    /// Label shown in the selector and used as the legend entry.
    pub fn label(self) -> &'static str {
        match self {
            FluxVariant::Raw => "Raw Flux",
            FluxVariant::Corrected => "Corrected Flux",
            FluxVariant::Pca => "PCA Flux",
        }
    }
}

impl fmt::Display for FluxVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FluxVariant {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FluxVariant::ALL
            .into_iter()
            .find(|v| v.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FetchError::UnknownVariant(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Upstream product
// ---------------------------------------------------------------------------

/// Catalog row for the resolved target. Only used for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetInfo {
    pub tic: u64,
    pub gaia: Option<u64>,
    pub tess_mag: f64,
    pub ra: f64,
    pub dec: f64,
}

impl fmt::Display for TargetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let gaia = self
            .gaia
            .map(|g| g.to_string())
            .unwrap_or_else(|| "<none>".to_string());
        write!(
            f,
            "Found TIC {} (Gaia {}), with TESS magnitude {}, RA {}, and Dec {}",
            self.tic, gaia, self.tess_mag, self.ra, self.dec
        )
    }
}

/// Everything the source returns for one target, one sector. All per-cadence
/// vectors share the length of `time`.
#[derive(Debug, Clone)]
pub struct TargetData {
    pub target: TargetInfo,
    /// BJD - 2457000.
    pub time: Vec<f64>,
    pub quality: Vec<i32>,
    pub raw_flux: Vec<f64>,
    pub corr_flux: Vec<f64>,
    pub pca_flux: Option<Vec<f64>>,
}

impl TargetData {
    /// The requested channel, or `None` when the product lacks it.
    pub fn channel(&self, variant: FluxVariant) -> Option<&[f64]> {
        match variant {
            FluxVariant::Raw => Some(self.raw_flux.as_slice()),
            FluxVariant::Corrected => Some(self.corr_flux.as_slice()),
            FluxVariant::Pca => self.pca_flux.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// ObservationSeries – what gets plotted
// ---------------------------------------------------------------------------

/// Normalised light curve for one target and channel. `time` and `flux` are
/// parallel and always the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSeries {
    tic: u64,
    variant: FluxVariant,
    time: Vec<f64>,
    flux: Vec<f64>,
}

impl ObservationSeries {
    /// Build from `(time, flux)` pairs in source order.
    pub fn from_pairs(
        tic: u64,
        variant: FluxVariant,
        pairs: impl IntoIterator<Item = (f64, f64)>,
    ) -> Self {
        let (time, flux) = pairs.into_iter().unzip();
        Self {
            tic,
            variant,
            time,
            flux,
        }
    }

    pub fn tic(&self) -> u64 {
        self.tic
    }

    pub fn variant(&self) -> FluxVariant {
        self.variant
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn flux(&self) -> &[f64] {
        &self.flux
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn title(&self) -> String {
        format!("Light Curve for TIC {}", self.tic)
    }

    /// `[floor(min time), ceil(max time)]`. A series whose extent collapses
    /// to a single integer gets a one-day window starting there.
    pub fn default_window(&self) -> Option<DisplayWindow> {
        let (lo, hi) = self
            .time
            .iter()
            .filter(|t| t.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, &t| match acc {
                None => Some((t, t)),
                Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
            })?;
        let min = lo.floor();
        let mut max = hi.ceil();
        if max <= min {
            max = min + 1.0;
        }
        Some(DisplayWindow { min, max })
    }
}

// ---------------------------------------------------------------------------
// DisplayWindow – the BJD range being shown
// ---------------------------------------------------------------------------

/// Inclusive time range, always `min < max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayWindow {
    min: f64,
    max: f64,
}

impl DisplayWindow {
    pub fn new(min: f64, max: f64) -> Result<Self, InputError> {
        if min.is_nan() || max.is_nan() {
            return Err(InputError::NonNumericBound);
        }
        if min >= max {
            return Err(InputError::InvertedWindow);
        }
        Ok(Self { min, max })
    }

    /// Parse the two text fields of the range editor.
    pub fn parse(min: &str, max: &str) -> Result<Self, InputError> {
        let parse = |s: &str| {
            s.trim()
                .parse::<f64>()
                .map_err(|_| InputError::NonNumericBound)
        };
        Self::new(parse(min)?, parse(max)?)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, t: f64) -> bool {
        t >= self.min && t <= self.max
    }
}
