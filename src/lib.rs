//! PSN chemistry filtering: select the `AIM` catalog rows whose element
//! compositions fall inside a set of min/max ranges.

pub mod data;
