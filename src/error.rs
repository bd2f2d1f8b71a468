use thiserror::Error;

use crate::data::model::FluxVariant;

// ---------------------------------------------------------------------------
// Error kinds, one enum per user action
// ---------------------------------------------------------------------------

/// Bad user input, detected before any external call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("Please enter a valid TIC ID!")]
    MissingIdentifier,
    #[error("'{0}' is not a valid TIC ID (expected a positive integer)")]
    InvalidIdentifier(String),
    #[error("Please enter valid numeric values for BJD range!")]
    NonNumericBound,
    #[error("BJD min must be less than BJD max!")]
    InvertedWindow,
}

/// Failure of the Generate action.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Input(#[from] InputError),

    /// Unknown target, network failure, unreadable product. Message is the
    /// full context chain of the upstream error.
    #[error("Failed to generate light curve: {0:#}")]
    Source(anyhow::Error),

    #[error("{0} is not available for this TIC ID.")]
    VariantUnavailable(FluxVariant),

    #[error("Invalid flux type selected: '{0}'")]
    UnknownVariant(String),

    #[error("Cannot normalise {variant}: {reason}")]
    Unnormalisable {
        variant: FluxVariant,
        reason: &'static str,
    },
}

/// Failure of the Refresh action (or of the render that follows a fetch).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("No light curve data to refresh!")]
    NoData,

    #[error("No data points found in the selected BJD range!")]
    EmptySelection,
}

/// Anything a button handler can fail with.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ---------------------------------------------------------------------------
// Modal titles
// ---------------------------------------------------------------------------

impl InputError {
    pub fn title(&self) -> &'static str {
        "Input Error"
    }
}

impl FetchError {
    pub fn title(&self) -> &'static str {
        match self {
            FetchError::Input(e) => e.title(),
            FetchError::Source(_) => "Error",
            FetchError::VariantUnavailable(_) | FetchError::Unnormalisable { .. } => "Data Error",
            FetchError::UnknownVariant(_) => "Flux Error",
        }
    }
}

impl RenderError {
    pub fn title(&self) -> &'static str {
        match self {
            RenderError::Input(e) => e.title(),
            RenderError::NoData => "Error",
            RenderError::EmptySelection => "Range Error",
        }
    }
}

impl ActionError {
    pub fn title(&self) -> &'static str {
        match self {
            ActionError::Fetch(e) => e.title(),
            ActionError::Render(e) => e.title(),
        }
    }
}
