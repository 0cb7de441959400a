//! Data layer for the tournament report.
//!
//! Responsible for reading text members, splitting them into tournament
//! blocks, parsing each block into a record, and building the summary and
//! fee-tier views over the resulting records.

pub mod aggregator;
pub mod analysis;
pub mod categorizer;
pub mod parser;
pub mod reader;
pub mod splitter;

pub use report_core as core;
