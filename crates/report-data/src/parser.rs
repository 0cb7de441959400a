//! Tournament summary block parser.
//!
//! The first three non-empty lines of a block are positional (header, buy-in,
//! field size). Finish position, payout and re-entries are found by scanning
//! every line with an independent [`LineMatcher`] per field; the first match
//! for a field wins.

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use report_core::models::TournamentRecord;
use rust_decimal::Decimal;
use thiserror::Error;

/// Game-type label that closes every recognised header line.
pub const GAME_TYPE: &str = "Hold'em No Limit";

// ── Outcome ───────────────────────────────────────────────────────────────────

/// Why a block produced no record. Kept for diagnostics only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("block has no non-empty lines")]
    Empty,

    #[error("first line is not a tournament header: {0:?}")]
    MissingHeader(String),

    #[error("second line is not a buy-in line")]
    MissingBuyIn,

    #[error("buy-in line has no dollar amounts: {0:?}")]
    NoBuyInAmount(String),

    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),
}

/// Result of parsing one block.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Parsed(TournamentRecord),
    Skipped(SkipReason),
}

impl ParseOutcome {
    /// The parsed record, discarding the skip reason.
    pub fn into_record(self) -> Option<TournamentRecord> {
        match self {
            ParseOutcome::Parsed(record) => Some(record),
            ParseOutcome::Skipped(_) => None,
        }
    }
}

// ── Line matchers ─────────────────────────────────────────────────────────────

/// Optional fields located by scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannedField {
    FinishPosition,
    Payout,
    ReEntries,
}

/// A value captured by a [`LineMatcher`].
#[derive(Debug, Clone, PartialEq)]
pub enum ScannedValue {
    FinishPosition(u32),
    Payout(Decimal),
    ReEntries(u32),
}

/// Recognises one optional field on a single line.
pub trait LineMatcher: Send + Sync {
    /// The field this matcher fills.
    fn field(&self) -> ScannedField;
    /// Captured value when `line` matches, `None` otherwise.
    fn capture(&self, line: &str) -> Option<ScannedValue>;
}

/// `<n><st|nd|rd|th> : Hero`
pub struct FinishPositionMatcher;

impl LineMatcher for FinishPositionMatcher {
    fn field(&self) -> ScannedField {
        ScannedField::FinishPosition
    }

    fn capture(&self, line: &str) -> Option<ScannedValue> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            Regex::new(r"(\d+)(?:st|nd|rd|th) : Hero").expect("regex is valid")
        });
        let caps = re.captures(line)?;
        caps[1].parse().ok().map(ScannedValue::FinishPosition)
    }
}

/// `received a total of $<amount>`, thousands separators allowed.
pub struct PayoutMatcher;

impl LineMatcher for PayoutMatcher {
    fn field(&self) -> ScannedField {
        ScannedField::Payout
    }

    fn capture(&self, line: &str) -> Option<ScannedValue> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            Regex::new(r"received a total of \$(\d[\d,]*(?:\.\d+)?)").expect("regex is valid")
        });
        let caps = re.captures(line)?;
        let digits = caps[1].replace(',', "");
        Decimal::from_str(&digits).ok().map(ScannedValue::Payout)
    }
}

/// `made <n> re-entries` (or the singular `re-entry`).
pub struct ReEntryMatcher;

impl LineMatcher for ReEntryMatcher {
    fn field(&self) -> ScannedField {
        ScannedField::ReEntries
    }

    fn capture(&self, line: &str) -> Option<ScannedValue> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE
            .get_or_init(|| Regex::new(r"made (\d+) re-entr(?:ies|y)").expect("regex is valid"));
        let caps = re.captures(line)?;
        caps[1].parse().ok().map(ScannedValue::ReEntries)
    }
}

/// The matchers applied to every line of a block.
pub fn line_matchers() -> [&'static dyn LineMatcher; 3] {
    [&FinishPositionMatcher, &PayoutMatcher, &ReEntryMatcher]
}

/// First-match-wins accumulator for the scanned fields.
#[derive(Debug, Default)]
struct ScanState {
    finish_position: Option<u32>,
    payout: Option<Decimal>,
    re_entries: Option<u32>,
}

impl ScanState {
    fn is_set(&self, field: ScannedField) -> bool {
        match field {
            ScannedField::FinishPosition => self.finish_position.is_some(),
            ScannedField::Payout => self.payout.is_some(),
            ScannedField::ReEntries => self.re_entries.is_some(),
        }
    }

    fn set(&mut self, value: ScannedValue) {
        match value {
            ScannedValue::FinishPosition(v) => self.finish_position = Some(v),
            ScannedValue::Payout(v) => self.payout = Some(v),
            ScannedValue::ReEntries(v) => self.re_entries = Some(v),
        }
    }
}

// ── Positional lines ──────────────────────────────────────────────────────────

fn header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(r"^Tournament #(\d+), (.+?), {}", regex::escape(GAME_TYPE));
        Regex::new(&pattern).expect("regex is valid")
    })
}

fn buy_in_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^Buy-in:(.*)$").expect("regex is valid"))
}

fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$(\d+\.\d+)").expect("regex is valid"))
}

fn field_size_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+) Players").expect("regex is valid"))
}

/// Sum every `$<digits>.<digits>` token on the buy-in line.
fn parse_entry_fee(rest: &str) -> Result<Decimal, SkipReason> {
    let mut total = Decimal::ZERO;
    let mut found = false;
    for caps in amount_re().captures_iter(rest) {
        let amount = Decimal::from_str(&caps[1])
            .map_err(|_| SkipReason::InvalidAmount(caps[1].to_string()))?;
        total = total
            .checked_add(amount)
            .ok_or_else(|| SkipReason::InvalidAmount(rest.trim().to_string()))?;
        found = true;
    }
    if found {
        Ok(total)
    } else {
        Err(SkipReason::NoBuyInAmount(rest.trim().to_string()))
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse one tournament block.
///
/// Never fails: blocks without a header or buy-in line, and blocks whose
/// amounts do not fit in a [`Decimal`], come back as [`ParseOutcome::Skipped`].
pub fn parse_block(block: &str) -> ParseOutcome {
    let lines: Vec<&str> = block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let Some(header) = lines.first() else {
        return ParseOutcome::Skipped(SkipReason::Empty);
    };
    let Some(header_caps) = header_re().captures(header) else {
        return ParseOutcome::Skipped(SkipReason::MissingHeader(header.to_string()));
    };

    let Some(buy_in_caps) = lines.get(1).and_then(|line| buy_in_re().captures(line)) else {
        return ParseOutcome::Skipped(SkipReason::MissingBuyIn);
    };
    let entry_fee = match parse_entry_fee(&buy_in_caps[1]) {
        Ok(fee) => fee,
        Err(reason) => return ParseOutcome::Skipped(reason),
    };

    let field_size = lines
        .get(2)
        .and_then(|line| field_size_re().captures(line))
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .unwrap_or(0);

    let matchers = line_matchers();
    let mut state = ScanState::default();
    for line in &lines {
        for matcher in &matchers {
            if state.is_set(matcher.field()) {
                continue;
            }
            if let Some(value) = matcher.capture(line) {
                state.set(value);
            }
        }
    }

    let re_entries = state.re_entries.unwrap_or(0);
    let record = TournamentRecord::new(
        &header_caps[1],
        &header_caps[2],
        entry_fee,
        re_entries,
        state.finish_position.unwrap_or(0),
        field_size,
        state.payout.unwrap_or(Decimal::ZERO),
    );
    match record {
        Some(record) => ParseOutcome::Parsed(record),
        None => ParseOutcome::Skipped(SkipReason::InvalidAmount(format!(
            "{entry_fee} x {} entries",
            u64::from(re_entries) + 1
        ))),
    }
}

/// Parse one block, dropping the skip reason.
pub fn parse_record(block: &str) -> Option<TournamentRecord> {
    parse_block(block).into_record()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
