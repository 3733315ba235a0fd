//! Per-student grade computation.
//!
//! This module categorizes each rating into EMRN buckets, tallies practice
//! and test percentages, merges practice/test pairs per skill, and decides
//! the expected final grade. Nothing here performs I/O.

pub mod aggregate;
pub mod grade;
pub mod types;
pub mod utility;
