//! Consistency check of the relations between objects, events and E2O relationships
//!
//! Flattening uses inner joins, so dangling references silently disappear from the flattened log.
//! [`check_consistency`] reports them instead, without changing any table.
use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    error::FlattenError,
    event_data::object_centric::ocel_tables::{OCELTable, OCELTables},
};

use super::table_ops::{aligned_key_strings, label_column};

/// A relation row whose object type disagrees with the type of the object in the objects table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectTypeMismatch {
    /// Event of the relation
    pub event_id: String,
    /// Object of the relation
    pub object_id: String,
    /// Object type stated by the relation row
    pub relation_object_type: Option<String>,
    /// Object type of the object in the objects table
    pub object_type: Option<String>,
}

/// Result of [`check_consistency`]
///
/// All ids are listed once, in order of their first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    /// Event ids referenced by relations but absent from the events table
    pub dangling_event_ids: Vec<String>,
    /// Object ids referenced by relations but absent from the objects table
    pub dangling_object_ids: Vec<String>,
    /// Relations stating a different object type than the objects table
    pub object_type_mismatches: Vec<ObjectTypeMismatch>,
    /// Event ids occurring in more than one row of the events table
    pub duplicate_event_ids: Vec<String>,
}

impl ConsistencyReport {
    /// `true` if no issues were found
    pub fn is_consistent(&self) -> bool {
        self.dangling_event_ids.is_empty()
            && self.dangling_object_ids.is_empty()
            && self.object_type_mismatches.is_empty()
            && self.duplicate_event_ids.is_empty()
    }
}

///
/// Check the relations table of [`OCELTables`] against its objects and events tables
///
/// Reports dangling event or object references, relation rows with an object type differing from the objects table,
/// and duplicate event ids. Rows with null ids are ignored.
/// Ids of different numeric dtypes are compared in their common supertype, as when flattening.
/// For objects occurring in several rows of the objects table, the type of the first row is used.
///
/// Only reads the tables; use this before [`super::flatten::flatten_ocel_tables`] when dropped rows should not go unnoticed.
///
pub fn check_consistency(tables: &OCELTables) -> Result<ConsistencyReport, FlattenError> {
    let cols = &tables.columns;
    let (event_ids, rel_event_ids) = aligned_key_strings(
        tables,
        (OCELTable::Events, cols.event_id.as_str()),
        (OCELTable::Relations, cols.event_id.as_str()),
    )?;
    let (object_ids, rel_object_ids) = aligned_key_strings(
        tables,
        (OCELTable::Objects, cols.object_id.as_str()),
        (OCELTable::Relations, cols.object_id.as_str()),
    )?;
    let object_types = label_column(tables, OCELTable::Objects, &cols.object_type)?;
    let rel_object_types = label_column(tables, OCELTable::Relations, &cols.object_type)?;

    let mut seen_events: HashSet<&str> = HashSet::new();
    let duplicate_event_ids: Vec<String> = event_ids
        .into_iter()
        .flatten()
        .filter(|e| !seen_events.insert(*e))
        .unique()
        .map(|e| e.to_string())
        .collect();

    let mut object_type_of: HashMap<&str, Option<&str>> = HashMap::new();
    for (o, t) in object_ids.into_iter().zip(object_types.into_iter()) {
        if let Some(o) = o {
            object_type_of.entry(o).or_insert(t);
        }
    }

    let mut report = ConsistencyReport {
        duplicate_event_ids,
        ..Default::default()
    };
    let mut dangling_events = HashSet::new();
    let mut dangling_objects = HashSet::new();
    for ((e, o), rel_type) in rel_event_ids
        .into_iter()
        .zip(rel_object_ids.into_iter())
        .zip(rel_object_types.into_iter())
    {
        if let Some(e) = e {
            if !seen_events.contains(e) && dangling_events.insert(e) {
                report.dangling_event_ids.push(e.to_string());
            }
        }
        let Some(o) = o else {
            continue;
        };
        match object_type_of.get(o) {
            None => {
                if dangling_objects.insert(o) {
                    report.dangling_object_ids.push(o.to_string());
                }
            }
            Some(ob_type) if *ob_type != rel_type => {
                report.object_type_mismatches.push(ObjectTypeMismatch {
                    event_id: e.unwrap_or_default().to_string(),
                    object_id: o.to_string(),
                    relation_object_type: rel_type.map(|t| t.to_string()),
                    object_type: ob_type.map(|t| t.to_string()),
                });
            }
            Some(_) => {}
        }
    }

    if !report.is_consistent() {
        warn!(
            "Inconsistent OCEL tables: {} dangling event ids, {} dangling object ids, {} object type mismatches, {} duplicate event ids",
            report.dangling_event_ids.len(),
            report.dangling_object_ids.len(),
            report.object_type_mismatches.len(),
            report.duplicate_event_ids.len()
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use polars::{df, frame::DataFrame};

    use super::*;
    use crate::{
        error::SchemaError,
        event_data::object_centric::ocel_tables::{
            OCEL_EVENT_ID_KEY, OCEL_EVENT_TIMESTAMP_KEY, OCEL_EVENT_TYPE_KEY, OCEL_OBJECT_ID_KEY,
            OCEL_OBJECT_TYPE_KEY,
        },
        utils::test_utils::load_order_management_excerpt,
    };

    #[test]
    fn consistent_tables() {
        let tables = OCELTables::new(
            df!(OCEL_OBJECT_ID_KEY => ["o1"], OCEL_OBJECT_TYPE_KEY => ["order"]).unwrap(),
            df!(
                OCEL_EVENT_ID_KEY => ["e1", "e2"],
                OCEL_EVENT_TYPE_KEY => ["create", "ship"],
                OCEL_EVENT_TIMESTAMP_KEY => ["2024-01-01", "2024-01-02"],
            )
            .unwrap(),
            df!(
                OCEL_OBJECT_ID_KEY => ["o1", "o1"],
                OCEL_EVENT_ID_KEY => ["e1", "e2"],
                OCEL_OBJECT_TYPE_KEY => ["order", "order"],
            )
            .unwrap(),
        );
        let report = check_consistency(&tables).unwrap();
        assert!(report.is_consistent());
        assert_eq!(report, ConsistencyReport::default());
    }

    #[test]
    fn order_management_excerpt_issues() {
        let tables = load_order_management_excerpt();
        let report = check_consistency(&tables).unwrap();
        assert!(!report.is_consistent());
        assert_eq!(report.dangling_event_ids, vec!["e8"]);
        assert_eq!(report.dangling_object_ids, vec!["i4"]);
        assert_eq!(
            report.object_type_mismatches,
            vec![ObjectTypeMismatch {
                event_id: "e3".to_string(),
                object_id: "o1".to_string(),
                relation_object_type: Some("items".to_string()),
                object_type: Some("orders".to_string()),
            }]
        );
        assert!(report.duplicate_event_ids.is_empty());
    }

    #[test]
    fn duplicate_event_ids_listed_once() {
        let tables = OCELTables::new(
            df!(OCEL_OBJECT_ID_KEY => ["o1"], OCEL_OBJECT_TYPE_KEY => ["order"]).unwrap(),
            df!(OCEL_EVENT_ID_KEY => ["e1", "e2", "e1", "e1", "e2"]).unwrap(),
            df!(
                OCEL_OBJECT_ID_KEY => [Some("o1"), None],
                OCEL_EVENT_ID_KEY => [Some("e1"), Some("e3")],
                OCEL_OBJECT_TYPE_KEY => [Some("order"), None],
            )
            .unwrap(),
        );
        let report = check_consistency(&tables).unwrap();
        assert_eq!(report.duplicate_event_ids, vec!["e1", "e2"]);
        assert_eq!(report.dangling_event_ids, vec!["e3"]);
        assert!(report.dangling_object_ids.is_empty());
        assert!(report.object_type_mismatches.is_empty());
    }

    #[test]
    fn numeric_ids_of_different_dtypes_are_not_dangling() {
        let tables = OCELTables::new(
            df!(OCEL_OBJECT_ID_KEY => [10i32, 11], OCEL_OBJECT_TYPE_KEY => ["order", "order"]).unwrap(),
            df!(OCEL_EVENT_ID_KEY => [1i64, 2]).unwrap(),
            df!(
                OCEL_OBJECT_ID_KEY => [10i64, 12],
                OCEL_EVENT_ID_KEY => [1.0f64, 3.0],
                OCEL_OBJECT_TYPE_KEY => ["order", "order"],
            )
            .unwrap(),
        );
        let report = check_consistency(&tables).unwrap();
        assert_eq!(report.dangling_event_ids.len(), 1);
        assert_eq!(report.dangling_object_ids, vec!["12"]);
        assert!(report.object_type_mismatches.is_empty());
    }

    #[test]
    fn missing_relation_column() {
        let tables = OCELTables::new(
            df!(OCEL_OBJECT_ID_KEY => ["o1"], OCEL_OBJECT_TYPE_KEY => ["order"]).unwrap(),
            df!(OCEL_EVENT_ID_KEY => ["e1"]).unwrap(),
            df!(OCEL_OBJECT_ID_KEY => ["o1"], OCEL_EVENT_ID_KEY => ["e1"]).unwrap(),
        );
        let err = check_consistency(&tables).unwrap_err();
        assert_eq!(
            err.as_schema_error(),
            Some(&SchemaError::MissingColumn {
                table: OCELTable::Relations,
                column: OCEL_OBJECT_TYPE_KEY.to_string(),
            })
        );
        assert!(check_consistency(&OCELTables::new(
            DataFrame::empty(),
            DataFrame::empty(),
            DataFrame::empty()
        ))
        .is_err());
    }
}
