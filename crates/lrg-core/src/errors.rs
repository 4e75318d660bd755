//! Cross-cutting error types.
//!
//! Domain-specific errors (`LedgerError`, `ChainError`, `BootstrapError`) are
//! defined in their respective crates. They converge into `anyhow` in `lrg-cli`.

use thiserror::Error;

/// Errors that can be raised by any `lrg-*` crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A phase transition was attempted out of order.
    #[error("Invalid phase transition: {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// A value could not be parsed (address, amount, hash).
    #[error("Invalid {field}: {reason}")]
    Parse { field: String, reason: String },
}
