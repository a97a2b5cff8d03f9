//! Errors raised while flattening an object-centric event log
use polars::error::PolarsError;
use thiserror::Error;

use crate::event_data::object_centric::ocel_tables::OCELTable;

/// A required column is missing, or the flattened schema would be ambiguous
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A column required for filtering, joining or renaming is absent from an input table
    #[error("column `{column}` is missing from the {table} table")]
    MissingColumn {
        /// Table that was expected to hold the column
        table: OCELTable,
        /// Name of the missing column
        column: String,
    },
    /// Join key columns whose dtypes have no common type to compare them in
    #[error("join key `{column}` has incompatible dtypes {left_dtype} and {right_dtype}")]
    IncompatibleKeys {
        /// Name of the join key column
        column: String,
        /// Dtype of the key on the left side of the join
        left_dtype: String,
        /// Dtype of the key on the right side of the join
        right_dtype: String,
    },
    /// Two columns of the flattened log would carry the same name
    #[error("column `{column}` would appear more than once in the flattened log")]
    ColumnCollision {
        /// The duplicated output column name
        column: String,
    },
}

/// Error returned by the flattening and consistency-check functions
#[derive(Debug, Error)]
pub enum FlattenError {
    /// The input tables do not have the expected shape
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// The underlying `DataFrame` operation failed
    #[error("DataFrame operation failed: {0}")]
    Polars(#[from] PolarsError),
}

impl FlattenError {
    /// Get the [`SchemaError`], if this is one
    pub fn as_schema_error(&self) -> Option<&SchemaError> {
        match self {
            FlattenError::Schema(e) => Some(e),
            FlattenError::Polars(_) => None,
        }
    }
}
