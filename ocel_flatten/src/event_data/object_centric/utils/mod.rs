//! Utilities for object-centric event data

/// Consistency check of the relations between the OCEL tables
pub mod consistency;
/// Flatten OCEL tables on an object type
pub mod flatten;
/// Row selection, joins and renames on `DataFrame`s
pub(crate) mod table_ops;
