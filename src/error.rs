// ⚠️ Error Taxonomy - failures surfaced by the anniversary engine
// Every error here is a hard failure: bad input data or a logic defect.

use crate::date::AnniversaryKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnniversaryError {
    /// A date string does not match the shape expected for its kind
    #[error("invalid {kind} date {value:?}: expected {expected}")]
    InvalidDateFormat {
        kind: AnniversaryKind,
        value: String,
        expected: &'static str,
    },

    /// Normalization produced an occurrence before the reference date
    #[error("invariant violated for streamer {id}: occurrence is {days_until} days before the reference date")]
    InvariantViolation { id: String, days_until: i64 },

    /// Projecting the anniversary into the target year left chrono's calendar range
    #[error("{kind} anniversary cannot be projected into year {year}")]
    DateOutOfRange { kind: AnniversaryKind, year: i32 },
}

pub type Result<T> = std::result::Result<T, AnniversaryError>;
