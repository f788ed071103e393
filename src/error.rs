//! Typed errors raised while cleaning records.
//!
//! Everything else in the crate travels as `anyhow::Error` with context. A
//! `CleanError` can still be recovered from that chain with
//! `err.downcast_ref::<CleanError>()`, which is how the splitter tells a fatal
//! data error apart from an unreadable entry.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CleanError {
    /// A field value could not be turned into the output format.
    #[error("invalid {field} value {value:?}: {reason}")]
    Format {
        field: &'static str,
        value: String,
        reason: String,
    },
}

impl CleanError {
    pub fn format(field: &'static str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CleanError::Format {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// True when `err` (or anything it wraps) is a [`CleanError`].
pub fn is_clean_error(err: &anyhow::Error) -> bool {
    err.downcast_ref::<CleanError>().is_some()
}
