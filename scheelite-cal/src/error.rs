use chrono::NaiveDate;
use scheelite_core::{KeyError, TimeError};

use crate::event::Source;

/// Result type alias for scheduling operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Error type for the scheduling layer.
///
/// Absence of a record is never an error: lookups return `Ok(None)`.
/// Backend failures are wrapped in [`ScheduleError::Store`] and must not
/// be collapsed into absence.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// A value could not be read as a point in time.
    #[error(transparent)]
    Time(#[from] TimeError),

    /// A stored key could not be read back as a time key.
    #[error(transparent)]
    Key(#[from] KeyError),

    /// A recurring definition ends before it starts.
    #[error("recurring definition ends {end} before it starts {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// A record could not be encoded for storage.
    #[error("failed to encode record: {0}")]
    Encode(#[from] ciborium::ser::Error<std::io::Error>),

    /// Stored bytes could not be decoded back into a record.
    #[error("failed to decode record: {0}")]
    Decode(#[from] ciborium::de::Error<std::io::Error>),

    /// The underlying key-value store reported a failure.
    #[error("store failure: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// One of the concurrent per-category lookups failed, aborting the
    /// whole aggregation with no partial result.
    #[error("{category} lookup failed during aggregation")]
    Aggregation {
        category: Source,
        #[source]
        source: Box<ScheduleError>,
    },
}

impl ScheduleError {
    pub(crate) fn store<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ScheduleError::Store(Box::new(err))
    }

    pub(crate) fn aggregation(category: Source) -> impl FnOnce(ScheduleError) -> ScheduleError {
        move |source| ScheduleError::Aggregation {
            category,
            source: Box::new(source),
        }
    }
}
