//! Functionality to Flatten OCEL tables on an Object Type
use std::{collections::HashSet, time::Instant};

use log::{debug, info};
use polars::frame::DataFrame;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{FlattenError, SchemaError},
    event_data::{
        case_centric::constants::{
            prefixed_trace_attribute, ACTIVITY_NAME, PREFIXED_TRACE_ID_NAME, TIMESTAMP_NAME,
            TRACE_ID_NAME,
        },
        object_centric::ocel_tables::{OCELTable, OCELTables},
    },
};

use super::table_ops::{filter_equal, inner_join, materialize, rename_columns, require_columns};


///
/// Parameters for [`flatten_ocel_tables`]
///
/// Unset fields fall back to the column names declared in [`OCELTables::columns`].
///
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FlattenParameters {
    /// Events column to use as activity (renamed to [`ACTIVITY_NAME`])
    pub activity_column: Option<String>,
    /// Events column to use as timestamp (renamed to [`TIMESTAMP_NAME`])
    pub timestamp_column: Option<String>,
}

impl FlattenParameters {
    /// Use the events column `column` as activity
    pub fn with_activity_column(mut self, column: impl Into<String>) -> Self {
        self.activity_column = Some(column.into());
        self
    }

    /// Use the events column `column` as timestamp
    pub fn with_timestamp_column(mut self, column: impl Into<String>) -> Self {
        self.timestamp_column = Some(column.into());
        self
    }
}

/// Name of an objects column in the flattened log
fn case_column_name(tables: &OCELTables, column: &str) -> String {
    if column == tables.columns.object_id {
        prefixed_trace_attribute(TRACE_ID_NAME)
    } else {
        prefixed_trace_attribute(column)
    }
}

/// Name of an events column in the flattened log
fn event_column_name<'a>(column: &'a str, activity: &str, timestamp: &str) -> &'a str {
    if column == activity {
        ACTIVITY_NAME
    } else if column == timestamp {
        TIMESTAMP_NAME
    } else {
        column
    }
}

/// Check that no two columns of the flattened log would end up with the same name
fn check_output_columns(
    tables: &OCELTables,
    activity: &str,
    timestamp: &str,
) -> Result<(), SchemaError> {
    if activity == timestamp {
        return Err(SchemaError::ColumnCollision {
            column: activity.to_string(),
        });
    }
    let event_columns = tables
        .events
        .get_column_names()
        .into_iter()
        .map(|c| event_column_name(c.as_str(), activity, timestamp).to_string());
    let case_columns = tables
        .objects
        .get_column_names()
        .into_iter()
        .map(|c| case_column_name(tables, c.as_str()));
    let mut seen = HashSet::new();
    match event_columns.chain(case_columns).find(|c| !seen.insert(c.clone())) {
        Some(column) => Err(SchemaError::ColumnCollision { column }),
        None => Ok(()),
    }
}

///
/// Flatten [`OCELTables`] on a specific object type, resulting in a case-centric event log `DataFrame`
///
/// Every object of type `object_type` becomes a case ([`PREFIXED_TRACE_ID_NAME`]), holding all events related to it
/// through the relations table. Each (case, event) pair yields one row, carrying
/// * all columns of the events table, with the activity column renamed to [`ACTIVITY_NAME`] and the timestamp column renamed to [`TIMESTAMP_NAME`],
/// * followed by all columns of the objects table, prefixed with `case:` (see [`prefixed_trace_attribute`]).
///
/// Relations to events or objects that do not exist (with the requested type) are dropped silently.
/// Join keys of different numeric dtypes are compared in their common supertype (e.g., `1` matches `1.0`);
/// string keys joined with numeric keys fail with [`SchemaError::IncompatibleKeys`].
/// Duplicate relation rows result in duplicate output rows.
/// Use [`super::consistency::check_consistency`] to detect such cases up front.
///
/// Rows are ordered by events-table order, then objects-table order, then relations-table order.
///
/// An object type without objects yields a `DataFrame` with zero rows but the same columns.
///
/// Fails with a [`SchemaError`] if a required column is missing or the output columns would collide.
///
pub fn flatten_ocel_tables(
    tables: &OCELTables,
    object_type: impl AsRef<str>,
    parameters: &FlattenParameters,
) -> Result<DataFrame, FlattenError> {
    let now = Instant::now();
    let object_type = object_type.as_ref();
    let cols = &tables.columns;
    let activity = parameters
        .activity_column
        .as_deref()
        .unwrap_or(&cols.activity);
    let timestamp = parameters
        .timestamp_column
        .as_deref()
        .unwrap_or(&cols.timestamp);

    require_columns(
        tables,
        OCELTable::Events,
        [cols.event_id.as_str(), activity, timestamp],
    )?;
    require_columns(
        tables,
        OCELTable::Objects,
        [cols.object_id.as_str(), cols.object_type.as_str()],
    )?;
    require_columns(
        tables,
        OCELTable::Relations,
        [
            cols.object_id.as_str(),
            cols.event_id.as_str(),
            cols.object_type.as_str(),
        ],
    )?;
    check_output_columns(tables, activity, timestamp)?;

    let objects = filter_equal(&tables.objects, &cols.object_type, object_type)?;
    if objects.height() == 0 {
        info!("No objects of type {object_type:?}; flattened log will be empty");
    }
    let cases = rename_columns(objects, |c| Some(case_column_name(tables, c)))?;

    let relations = filter_equal(&tables.relations, &cols.object_type, object_type)?
        .select([cols.object_id.as_str(), cols.event_id.as_str()])?;
    let relations = rename_columns(relations, |c| {
        (c == cols.object_id).then(|| PREFIXED_TRACE_ID_NAME.to_string())
    })?;
    debug!(
        "Selected {} objects and {} relations of type {object_type:?}",
        cases.height(),
        relations.height()
    );

    // One row per (case, related event id)
    let case_events = inner_join(&cases, &relations, PREFIXED_TRACE_ID_NAME)?;
    // Events columns first, followed by the case columns
    let flattened = inner_join(&tables.events, &case_events, &cols.event_id)?;
    let flattened = rename_columns(flattened, |c| {
        let name = event_column_name(c, activity, timestamp);
        (name != c).then(|| name.to_string())
    })?;
    let flattened = materialize(flattened)?;
    debug!(
        "Flattened on {object_type:?} to shape {:?} in {:.2?}",
        flattened.shape(),
        now.elapsed()
    );
    Ok(flattened)
}

/// Flatten [`OCELTables`] on an object type using the declared activity and timestamp columns
///
/// See [`flatten_ocel_tables`].
pub fn flatten_ocel_tables_on(
    tables: &OCELTables,
    object_type: impl AsRef<str>,
) -> Result<DataFrame, FlattenError> {
    flatten_ocel_tables(tables, object_type, &FlattenParameters::default())
}

/// Flatten [`OCELTables`] on every object type of its objects table
///
/// Returns pairs of object type and flattened log, in the order of [`OCELTables::object_types`].
pub fn flatten_ocel_tables_all_types(
    tables: &OCELTables,
    parameters: &FlattenParameters,
) -> Result<Vec<(String, DataFrame)>, FlattenError> {
    tables
        .object_types()?
        .into_iter()
        .map(|ot| {
            let df = flatten_ocel_tables(tables, &ot, parameters)?;
            Ok((ot, df))
        })
        .collect()
}
