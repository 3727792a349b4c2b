//! Error types for workout validation, submission and persistence.

use crate::config::{INVALID_INPUT_MESSAGE, NO_LOCATION_MESSAGE};

/// A form field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Distance,
    Duration,
    Cadence,
    ElevationGain,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Field::Distance => "distance",
            Field::Duration => "duration",
            Field::Cadence => "cadence",
            Field::ElevationGain => "elevation gain",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is not a number")]
    NotANumber(Field),

    #[error("{0} must be positive")]
    NotPositive(Field),

    #[error("elevation gain must not be negative")]
    NegativeElevation,

    #[error("coordinates must be finite")]
    InvalidCoordinates,

    #[error("unknown workout type: {0:?}")]
    UnknownWorkoutType(String),
}

impl ValidationError {
    /// Text shown to the user in the blocking alert.
    pub fn user_message(&self) -> &'static str {
        INVALID_INPUT_MESSAGE
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
    #[error("no location selected on the map")]
    NoLocationSelected,

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl SubmitError {
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmitError::NoLocationSelected => NO_LOCATION_MESSAGE,
            SubmitError::Invalid(err) => err.user_message(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("failed to encode workouts: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
