/// Common identifying field for event identities (i.e., activities)
///
/// The activity column of a flattened log is renamed to this key.
pub const ACTIVITY_NAME: &str = "concept:name";
/// Common timestamp field of events
///
/// The timestamp column of a flattened log is renamed to this key.
pub const TIMESTAMP_NAME: &str = "time:timestamp";
/// Prefix prepended to case-level attribute keys when flattening to events only
///
/// Primarily used for interoperability with `PM4Py`
pub const TRACE_PREFIX: &str = "case:";
/// Common identifying field for trace identities (i.e., trace IDs)
///
/// See also [`ACTIVITY_NAME`]
pub const TRACE_ID_NAME: &str = "concept:name";
/// Constructed combination of [`TRACE_PREFIX`] and [`TRACE_ID_NAME`]
///
/// Column holding the case identifier of a flattened log
pub const PREFIXED_TRACE_ID_NAME: &str = "case:concept:name";

/// Prefix an attribute key with [`TRACE_PREFIX`]
pub fn prefixed_trace_attribute(key: &str) -> String {
    format!("{TRACE_PREFIX}{key}")
}
