//! Batch-wide financial statistics over parsed tournament records.

use report_core::formatting::{percentage, round2};
use report_core::models::TournamentRecord;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

// ── RunningTotals ─────────────────────────────────────────────────────────────

/// Money and cash counts accumulated across records.
#[derive(Debug, Clone, Default)]
pub struct RunningTotals {
    pub payout: Decimal,
    pub buy_ins: Decimal,
    pub cashes: usize,
    pub count: usize,
}

impl RunningTotals {
    /// Add a single record to the running totals.
    pub fn add_record(&mut self, record: &TournamentRecord) {
        self.payout = accumulate(self.payout, record.payout, "payout");
        self.buy_ins = accumulate(self.buy_ins, record.total_entry_cost, "buy-in");
        if record.cashed() {
            self.cashes += 1;
        }
        self.count += 1;
    }
}

/// Add `amount` to a running money total, clamping at [`Decimal::MAX`]
/// instead of overflowing.
pub(crate) fn accumulate(total: Decimal, amount: Decimal, label: &str) -> Decimal {
    total.checked_add(amount).unwrap_or_else(|| {
        warn!("Total {} exceeds the representable range, clamping", label);
        Decimal::MAX
    })
}

// ── SummaryStatistics ─────────────────────────────────────────────────────────

/// Totals and rates for one batch of records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Number of records summarised.
    pub total_records: usize,
    /// Sum of every payout.
    pub total_payout: Decimal,
    /// Sum of every record's total entry cost.
    pub total_buy_ins: Decimal,
    /// `total_payout - total_buy_ins`, may be negative.
    pub net_profit: Decimal,
    /// Records with a payout above zero.
    pub count_with_payout: usize,
    /// `count_with_payout / total_records * 100`.
    pub win_rate: f64,
    /// `net_profit / total_buy_ins * 100`.
    pub roi: f64,
}

impl Default for SummaryStatistics {
    fn default() -> Self {
        Self::from_totals(&RunningTotals::default())
    }
}

impl SummaryStatistics {
    /// Derive the statistics from accumulated totals.
    pub fn from_totals(totals: &RunningTotals) -> Self {
        let total_payout = round2(totals.payout);
        let total_buy_ins = round2(totals.buy_ins);
        let net_profit = round2(total_payout - total_buy_ins);

        Self {
            total_records: totals.count,
            total_payout,
            total_buy_ins,
            net_profit,
            count_with_payout: totals.cashes,
            win_rate: percentage(totals.cashes as f64, totals.count as f64),
            roi: percentage(
                net_profit.to_f64().unwrap_or(0.0),
                total_buy_ins.to_f64().unwrap_or(0.0),
            ),
        }
    }
}

// ── ResultAggregator ──────────────────────────────────────────────────────────

/// Stateless helper that folds records into [`SummaryStatistics`].
pub struct ResultAggregator;

impl ResultAggregator {
    /// Summarise `records` in a single pass. Empty input yields all zeros.
    pub fn summarize(records: &[TournamentRecord]) -> SummaryStatistics {
        let totals = records
            .iter()
            .fold(RunningTotals::default(), |mut totals, record| {
                totals.add_record(record);
                totals
            });
        SummaryStatistics::from_totals(&totals)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
