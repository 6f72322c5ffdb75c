//! Domain layer: taxonomy entities and structural invariants
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod validation;

pub use entities::*;
pub use error::DomainError;
pub use validation::validate_sections;
