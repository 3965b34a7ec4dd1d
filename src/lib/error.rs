use std::{io, path::PathBuf};

use thiserror::Error;

/// Fatal pipeline failures. Unknown participants and malformed ledger rows
/// are not errors; they surface as `RowWarning` / `EngineWarning` values
/// and processing continues without them.
#[derive(Debug, Error)]
pub enum SettleError {
    #[error("the ledger file '{0}' was not found")]
    InputNotFound(PathBuf),

    #[error("the configuration file '{0}' was not found")]
    ConfigNotFound(PathBuf),

    #[error("the configuration could not be parsed: {reason}")]
    ConfigMalformed { reason: String },

    /// An amount could not be interpreted as a number, or a transaction
    /// with no beneficiaries reached the engine. The ledger contract itself
    /// is violated, so no partial settlement is produced.
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
