//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::Level;

/// Violations of the taxonomy's structural invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid {level} code: '{code}'")]
    InvalidCode { level: Level, code: String },

    #[error("duplicate {level} code: '{code}'")]
    DuplicateCode { level: Level, code: String },

    #[error("{level} '{code}' does not start with parent code '{parent}'")]
    PrefixMismatch {
        level: Level,
        code: String,
        parent: String,
    },
}
