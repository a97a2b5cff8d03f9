#![warn(
    clippy::doc_markdown,
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs
)]

#![doc = include_str!("../README.md")]

pub mod error;
pub mod event_data;

#[cfg(test)]
mod utils;

#[doc(inline)]
pub use error::{FlattenError, SchemaError};

#[doc(inline)]
pub use event_data::object_centric::{OCELColumnNames, OCELTable, OCELTables};

#[doc(inline)]
pub use event_data::object_centric::utils::flatten::{
    flatten_ocel_tables, flatten_ocel_tables_all_types, flatten_ocel_tables_on, FlattenParameters,
};

#[doc(inline)]
pub use event_data::object_centric::utils::consistency::{check_consistency, ConsistencyReport};

/// Re-export of the `polars` crate, whose [`polars::frame::DataFrame`] holds all tables
pub use polars;
