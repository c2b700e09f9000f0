//! Error types for ta-window.
//!
//! Every indicator returns [`Result<T>`]. Failures fall into the two status
//! classes of the call contract, reported by [`Error::ret_code`]:
//!
//! - [`RetCode::OutOfRangeParam`]: the requested index range is malformed, the
//!   inputs do not cover it, or an output buffer cannot hold the result.
//! - [`RetCode::BadParam`]: a period or factor is outside its domain.
//!
//! Running out of data after the lookback is *not* an error: the call succeeds
//! with an empty [`OutputRange`](crate::range::OutputRange).

use thiserror::Error;

/// The main error type for ta-window operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input data series is empty, so no range can be resolved.
    #[error("empty input: no data provided")]
    EmptyInput,

    /// The requested index range is malformed or not covered by the inputs.
    #[error("index range [{start}, {end}] is out of range for series of length {len}")]
    OutOfRange {
        /// Requested first index.
        start: usize,
        /// Requested last index (inclusive).
        end: usize,
        /// Length of the shortest input series.
        len: usize,
    },

    /// An output buffer is shorter than the number of values to write.
    #[error("output buffer too small: required {required} elements, got {actual}")]
    BufferTooSmall {
        /// Number of output slots the call needs.
        required: usize,
        /// Number of slots the caller provided.
        actual: usize,
    },

    /// A period parameter is below its minimum.
    #[error("invalid {name} {period}: must be at least {min}")]
    InvalidPeriod {
        /// Name of the parameter.
        name: &'static str,
        /// The value that was provided.
        period: usize,
        /// The smallest accepted value.
        min: usize,
    },

    /// A real-valued parameter is outside its domain.
    #[error("invalid {name}: {reason}")]
    InvalidParam {
        /// Name of the parameter.
        name: &'static str,
        /// Description of the accepted domain.
        reason: &'static str,
    },

    /// Failed to convert a numeric value to the series element type.
    #[error("numeric conversion failed: {context}")]
    NumericConversion {
        /// Description of the conversion that failed.
        context: &'static str,
    },
}

impl Error {
    /// Returns the status tag this error reports under the call contract.
    #[must_use]
    pub const fn ret_code(&self) -> RetCode {
        match self {
            Self::EmptyInput | Self::OutOfRange { .. } | Self::BufferTooSmall { .. } => {
                RetCode::OutOfRangeParam
            }
            Self::InvalidPeriod { .. }
            | Self::InvalidParam { .. }
            | Self::NumericConversion { .. } => RetCode::BadParam,
        }
    }
}

/// Closed status vocabulary of the indicator call contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RetCode {
    /// The call completed; the output range may still be empty.
    Success,
    /// A parameter was outside its valid domain.
    BadParam,
    /// The index range or buffer sizes were invalid.
    OutOfRangeParam,
}

impl RetCode {
    /// Maps a call result onto its status tag.
    ///
    /// ```
    /// use ta_window::error::RetCode;
    /// use ta_window::indicators::sma_into;
    ///
    /// let data = [1.0_f64, 2.0, 3.0];
    /// let mut out = [0.0; 3];
    /// assert_eq!(RetCode::of(&sma_into(.., &data, 2, &mut out)), RetCode::Success);
    /// assert_eq!(RetCode::of(&sma_into(.., &data, 1, &mut out)), RetCode::BadParam);
    /// assert_eq!(RetCode::of(&sma_into(0..=5, &data, 2, &mut out)), RetCode::OutOfRangeParam);
    /// ```
    #[must_use]
    pub const fn of<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => Self::Success,
            Err(err) => err.ret_code(),
        }
    }
}

/// Convenience type alias for Results using the ta-window Error type.
pub type Result<T> = std::result::Result<T, Error>;
