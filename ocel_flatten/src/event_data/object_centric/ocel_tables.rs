use std::fmt::Display;

use itertools::Itertools;
use polars::frame::DataFrame;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::FlattenError;

use super::utils::table_ops::label_column;

/// Event ID Key in `DataFrame` (e.g., pay_order-12345)
pub const OCEL_EVENT_ID_KEY: &str = "ocel:eid";
/// Event Type Key in `DataFrame` (e.g., pay order)
pub const OCEL_EVENT_TYPE_KEY: &str = "ocel:activity";
/// Event Timestamp Key in `DataFrame` (e.g., 2025-05-05-12:34Z)
pub const OCEL_EVENT_TIMESTAMP_KEY: &str = "ocel:timestamp";
/// Object ID Key in `DataFrame` (e.g., order-12345)
pub const OCEL_OBJECT_ID_KEY: &str = "ocel:oid";
/// Object Type Key in `DataFrame` (e.g., orders)
pub const OCEL_OBJECT_TYPE_KEY: &str = "ocel:type";
/// Qualifier Key in `DataFrame` (e.g., places)
pub const OCEL_QUALIFIER_KEY: &str = "ocel:qualifier";

/// One of the three tables of [`OCELTables`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OCELTable {
    /// [`OCELTables::objects`]
    Objects,
    /// [`OCELTables::events`]
    Events,
    /// [`OCELTables::relations`]
    Relations,
}

impl Display for OCELTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OCELTable::Objects => write!(f, "objects"),
            OCELTable::Events => write!(f, "events"),
            OCELTable::Relations => write!(f, "relations"),
        }
    }
}

///
/// Column names under which [`OCELTables`] stores identifiers, types, activities and timestamps
///
/// Defaults to the `ocel:` keys also used by `PM4Py` (e.g., [`OCEL_OBJECT_ID_KEY`]).
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OCELColumnNames {
    /// Object ID column (objects and relations table)
    pub object_id: String,
    /// Object type column (objects and relations table)
    pub object_type: String,
    /// Event ID column (events and relations table)
    pub event_id: String,
    /// Activity (event type) column of the events table
    pub activity: String,
    /// Timestamp column of the events table
    pub timestamp: String,
    /// Qualifier column of the relations table
    pub qualifier: String,
}

impl Default for OCELColumnNames {
    fn default() -> Self {
        Self {
            object_id: OCEL_OBJECT_ID_KEY.to_string(),
            object_type: OCEL_OBJECT_TYPE_KEY.to_string(),
            event_id: OCEL_EVENT_ID_KEY.to_string(),
            activity: OCEL_EVENT_TYPE_KEY.to_string(),
            timestamp: OCEL_EVENT_TIMESTAMP_KEY.to_string(),
            qualifier: OCEL_QUALIFIER_KEY.to_string(),
        }
    }
}

/// An object-centric event log given as [`DataFrame`]s
///
/// The tables are only read; functions of this crate never modify them.
#[derive(Debug, Clone)]
pub struct OCELTables {
    /// Objects
    ///
    /// (containing at least the columns [`OCELColumnNames::object_id`] and [`OCELColumnNames::object_type`];
    /// all further columns are object attributes)
    pub objects: DataFrame,
    /// Events
    ///
    /// (containing at least the column [`OCELColumnNames::event_id`], usually also
    /// [`OCELColumnNames::activity`] and [`OCELColumnNames::timestamp`], and arbitrary event attributes)
    pub events: DataFrame,
    /// Event-to-Object (E2O) Relationships
    ///
    /// (containing at least the columns [`OCELColumnNames::event_id`], [`OCELColumnNames::object_id`],
    /// and [`OCELColumnNames::object_type`], optionally [`OCELColumnNames::qualifier`])
    pub relations: DataFrame,
    /// Names of the identifying columns of the three tables
    pub columns: OCELColumnNames,
}

impl OCELTables {
    /// Bundle the three tables, using the default [`OCELColumnNames`]
    pub fn new(objects: DataFrame, events: DataFrame, relations: DataFrame) -> Self {
        Self {
            objects,
            events,
            relations,
            columns: OCELColumnNames::default(),
        }
    }

    /// Use other column names than the default `ocel:` keys
    pub fn with_column_names(mut self, columns: OCELColumnNames) -> Self {
        self.columns = columns;
        self
    }

    /// Get the [`DataFrame`] of one of the tables
    pub fn table(&self, table: OCELTable) -> &DataFrame {
        match table {
            OCELTable::Objects => &self.objects,
            OCELTable::Events => &self.events,
            OCELTable::Relations => &self.relations,
        }
    }

    /// All object types of the objects table, in order of their first occurrence
    ///
    /// Objects without a type are skipped.
    pub fn object_types(&self) -> Result<Vec<String>, FlattenError> {
        let types = label_column(self, OCELTable::Objects, &self.columns.object_type)?;
        Ok(types
            .into_iter()
            .flatten()
            .unique()
            .map(|t| t.to_string())
            .collect())
    }
}
