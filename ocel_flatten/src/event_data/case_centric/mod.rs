//! Case-centric (classical) event logs
//!
//! The flattened log produced from an object-centric log uses the column names defined here.

/// Canonical column names of flattened logs
pub mod constants;
