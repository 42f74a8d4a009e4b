//! Typed errors for the query flow
//!
//! Nothing in the query flow is fatal. Each error kind maps to a recovery:
//!
//! | Error | Recovery |
//! |-------|----------|
//! | [`QueryError::EmptyInput`] | message in the error region, input re-focused |
//! | [`StorageError`] | logged, treated as empty state, never shown |
//! | [`ViewError::MissingTarget`] | logged, the slot is skipped |
//! | [`AddressError`] | start-up error (bad `--base-url` or `--url`) |
//!
//! Unknown identifiers are not errors; they resolve to the `DEFAULT` record.
//! Start-up failures (bad data file, unusable state directory) are reported
//! through `anyhow` by the caller instead.

use std::fmt;
use std::io;

use thiserror::Error;

/// User-facing query validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Please enter a vehicle ID")]
    EmptyInput,
}

/// Failure reading or writing the key-value store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("stored value for '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode value for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Named regions of the view a controller writes into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Input,
    QueryButton,
    Status,
    Details,
    CallTargets,
    Suggestions,
    Error,
    Address,
    Stats,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Slot::Input => "input",
            Slot::QueryButton => "query-button",
            Slot::Status => "status",
            Slot::Details => "details",
            Slot::CallTargets => "call-targets",
            Slot::Suggestions => "suggestions",
            Slot::Error => "error",
            Slot::Address => "address",
            Slot::Stats => "stats",
        };
        f.write_str(name)
    }
}

/// Failure writing to a view slot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("render target '{0}' is missing")]
    MissingTarget(Slot),
}

/// Page address that cannot serve as the lookup page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("invalid page address '{address}': {source}")]
    Invalid {
        address: String,
        #[source]
        source: url::ParseError,
    },
    #[error("page address '{0}' has no path to attach a vehicle ID to")]
    NoPath(String),
}
