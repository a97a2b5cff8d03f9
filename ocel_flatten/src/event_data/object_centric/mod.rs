//! Object-centric event data (OCEL 2.0) held as polars `DataFrame`s

/// OCEL tables (objects, events, E2O relations) and their column names
pub mod ocel_tables;
/// Utilities operating on [`ocel_tables::OCELTables`]
pub mod utils;

#[doc(inline)]
pub use ocel_tables::{OCELColumnNames, OCELTable, OCELTables};
