//! Column checks, key alignment, filters, inner joins and renames on [`DataFrame`]s
use polars::prelude::*;
use polars_core::utils::try_get_supertype;

use crate::{
    error::{FlattenError, SchemaError},
    event_data::object_centric::ocel_tables::{OCELTable, OCELTables},
};

/// Fail with [`SchemaError::MissingColumn`] if any of `columns` is absent from `table`
pub(crate) fn require_columns<'a>(
    tables: &OCELTables,
    table: OCELTable,
    columns: impl IntoIterator<Item = &'a str>,
) -> Result<(), SchemaError> {
    let df = tables.table(table);
    match columns
        .into_iter()
        .find(|c| df.get_column_index(c).is_none())
    {
        Some(column) => Err(SchemaError::MissingColumn {
            table,
            column: column.to_string(),
        }),
        None => Ok(()),
    }
}

/// Values of a label column (e.g., object types) of one of the input tables, as strings
pub(crate) fn label_column(
    tables: &OCELTables,
    table: OCELTable,
    column: &str,
) -> Result<StringChunked, FlattenError> {
    require_columns(tables, table, [column])?;
    Ok(to_strings(
        tables.table(table).column(column)?.as_materialized_series(),
    )?)
}

fn to_strings(series: &Series) -> PolarsResult<StringChunked> {
    Ok(series.cast(&DataType::String)?.str()?.clone())
}

///
/// Cast two key columns to a common dtype, so that their values can be compared
///
/// Numeric keys are cast to their supertype (e.g., `i64` and `f64` to `f64`).
/// String keys are never compared with non-string keys.
///
pub(crate) fn align_keys(left: &Series, right: &Series) -> Result<(Series, Series), FlattenError> {
    let (l, r) = (left.dtype(), right.dtype());
    if l == r {
        return Ok((left.clone(), right.clone()));
    }
    let incompatible = || SchemaError::IncompatibleKeys {
        column: left.name().to_string(),
        left_dtype: l.to_string(),
        right_dtype: r.to_string(),
    };
    let is_string = |dt: &DataType| matches!(dt, DataType::String);
    let is_null = |dt: &DataType| matches!(dt, DataType::Null);
    if is_string(l) != is_string(r) && !is_null(l) && !is_null(r) {
        return Err(incompatible().into());
    }
    let supertype = try_get_supertype(l, r).map_err(|_| incompatible())?;
    Ok((left.cast(&supertype)?, right.cast(&supertype)?))
}

/// Key columns of two input tables, aligned with [`align_keys`] and rendered as strings
pub(crate) fn aligned_key_strings(
    tables: &OCELTables,
    left: (OCELTable, &str),
    right: (OCELTable, &str),
) -> Result<(StringChunked, StringChunked), FlattenError> {
    require_columns(tables, left.0, [left.1])?;
    require_columns(tables, right.0, [right.1])?;
    let (l, r) = align_keys(
        tables.table(left.0).column(left.1)?.as_materialized_series(),
        tables.table(right.0).column(right.1)?.as_materialized_series(),
    )?;
    Ok((to_strings(&l)?, to_strings(&r)?))
}

/// Rows of `df` whose value in `column` equals `value` (nulls never match)
pub(crate) fn filter_equal(df: &DataFrame, column: &str, value: &str) -> PolarsResult<DataFrame> {
    let mask = df
        .column(column)?
        .as_materialized_series()
        .cast(&DataType::String)?
        .str()?
        .equal(value);
    df.filter(&mask)
}

///
/// Inner join `left` and `right` on the column `on`, present in both
///
/// The result holds all columns of `left` followed by all columns of `right` except `on`.
/// Rows are ordered by `left`, and for each left row its matches in `right` order.
/// Null keys never match. The key column keeps the dtype of `left`.
///
pub(crate) fn inner_join(
    left: &DataFrame,
    right: &DataFrame,
    on: &str,
) -> Result<DataFrame, FlattenError> {
    let key_dtype = left.column(on)?.dtype().clone();
    let (left_keys, right_keys) = align_keys(
        left.column(on)?.as_materialized_series(),
        right.column(on)?.as_materialized_series(),
    )?;
    let mut left = left.clone();
    left.with_column(left_keys)?;
    let mut right = right.clone();
    right.with_column(right_keys)?;
    let mut joined = left.join(
        &right,
        [on],
        [on],
        JoinArgs {
            maintain_order: MaintainOrderJoin::LeftRight,
            ..JoinArgs::new(JoinType::Inner)
        },
        None,
    )?;
    if joined.column(on)?.dtype() != &key_dtype {
        let restored = joined.column(on)?.cast(&key_dtype)?;
        joined.with_column(restored)?;
    }
    Ok(joined)
}

/// Rename columns for which `rename` returns a new name; all other columns keep their name
pub(crate) fn rename_columns(
    df: DataFrame,
    rename: impl Fn(&str) -> Option<String>,
) -> PolarsResult<DataFrame> {
    let columns = df
        .take_columns()
        .into_iter()
        .map(|c| match rename(c.name().as_str()) {
            Some(name) => c.with_name(name.into()),
            None => c,
        })
        .collect();
    DataFrame::new(columns)
}

/// Materialize every column as a single contiguous [`Series`]
///
/// Boundary between the intermediate join results and the `DataFrame` handed to callers.
pub(crate) fn materialize(df: DataFrame) -> PolarsResult<DataFrame> {
    DataFrame::new(
        df.take_columns()
            .into_iter()
            .map(|c| c.as_materialized_series().rechunk().into_column())
            .collect(),
    )
}
