//! Request pipeline: text members in, [`Report`] out.
//!
//! Members are split into blocks, each block is parsed independently, and the
//! complete record sequence (file order, then block order) feeds both the
//! aggregator and the categorizer.

use std::path::{Path, PathBuf};

use report_core::error::{ReportError, Result};
use report_core::models::TournamentRecord;
use serde::Serialize;
use tracing::{debug, info};

use crate::aggregator::{ResultAggregator, SummaryStatistics};
use crate::categorizer::Categories;
use crate::parser::{parse_block, ParseOutcome};
use crate::reader::{load_sources, SourceText};
use crate::splitter::split_blocks;

// ── Public types ──────────────────────────────────────────────────────────────

/// Successful response for one batch of input.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub success: bool,
    /// Number of parsed records.
    pub total_records: usize,
    /// Records in file-then-block order.
    pub records: Vec<TournamentRecord>,
    pub summary: SummaryStatistics,
    /// Fee tier → bucket, in first-seen order.
    pub categories: Categories,
}

impl Report {
    /// Build the report views over a complete record sequence.
    pub fn from_records(records: Vec<TournamentRecord>) -> Self {
        let summary = ResultAggregator::summarize(&records);
        let categories = Categories::from_records(&records);
        Self {
            success: true,
            total_records: records.len(),
            records,
            summary,
            categories,
        }
    }
}

/// Response returned when the input itself could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub success: bool,
    pub error: String,
}

impl From<&ReportError> for ErrorPayload {
    fn from(err: &ReportError) -> Self {
        Self {
            success: false,
            error: err.client_message(),
        }
    }
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Split `text` into blocks and parse each one, keeping block order.
///
/// Blocks that do not parse are dropped and logged at debug level.
pub fn parse_records(text: &str) -> Vec<TournamentRecord> {
    parse_source(None, text)
}

/// Build a report from already-decoded texts, in the given order.
pub fn analyze_texts<'a, I>(texts: I) -> Report
where
    I: IntoIterator<Item = &'a str>,
{
    let records = texts
        .into_iter()
        .flat_map(|text| parse_source(None, text))
        .collect();
    Report::from_records(records)
}

/// Build a report from loaded members, in the given order.
pub fn analyze_sources(sources: &[SourceText]) -> Report {
    let records: Vec<TournamentRecord> = sources
        .iter()
        .flat_map(|source| parse_source(Some(source.path.as_path()), &source.text))
        .collect();

    info!(
        "Parsed {} tournament records from {} files",
        records.len(),
        sources.len()
    );
    Report::from_records(records)
}

/// Load every input path in order and build a single report.
///
/// Any failure to locate or read an input aborts the whole request.
pub fn analyze_paths(paths: &[PathBuf]) -> Result<Report> {
    let mut sources = Vec::new();
    for path in paths {
        sources.extend(load_sources(path)?);
    }
    Ok(analyze_sources(&sources))
}

// ── Private helpers ───────────────────────────────────────────────────────────

fn parse_source(path: Option<&Path>, text: &str) -> Vec<TournamentRecord> {
    let origin = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<input>".to_string());

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (index, block) in split_blocks(text).enumerate() {
        match parse_block(block) {
            ParseOutcome::Parsed(record) => records.push(record),
            ParseOutcome::Skipped(reason) => {
                skipped += 1;
                debug!("Skipping block {} in {}: {}", index, origin, reason);
            }
        }
    }

    debug!(
        "File {}: {} blocks, {} parsed, {} skipped",
        origin,
        records.len() + skipped,
        records.len(),
        skipped,
    );
    records
}

// ── Tests ─────────────────────────────────────────────────────────────────────
