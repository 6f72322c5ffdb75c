//! Standard exit codes (BSD sysexits.h compatible)

/// Successful termination
pub const OK: i32 = 0;

/// Command line usage error, including unsupported languages
pub const USAGE: i32 = 64;

/// Dataset violates the taxonomy invariants or is not valid JSON
pub const DATAERR: i32 = 65;

/// Code not found in the taxonomy
pub const NOINPUT: i32 = 66;

/// Dataset file for a known language cannot be read
pub const UNAVAILABLE: i32 = 69;

/// Configuration error
pub const CONFIG: i32 = 78;
