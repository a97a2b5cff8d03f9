//! Event Data
//!
//! Object-centric input tables and the case-centric column conventions of flattened logs
pub mod case_centric;
pub mod object_centric;
