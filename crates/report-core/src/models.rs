use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::formatting::{percentage, round2};

/// One tournament result parsed from a summary block.
///
/// Built once by [`TournamentRecord::new`], which also derives
/// `total_entry_cost` and `finish_percentile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentRecord {
    /// Identifier assigned by the poker client.
    pub id: String,
    /// Tournament title as written in the header line.
    pub name: String,
    /// Fee for a single entry (sum of every amount on the buy-in line).
    pub entry_fee: Decimal,
    /// Additional entries bought beyond the first.
    pub re_entry_count: u32,
    /// `entry_fee * (1 + re_entry_count)`.
    pub total_entry_cost: Decimal,
    /// Rank achieved, `0` when not found.
    pub finish_position: u32,
    /// Number of entrants, `0` when not found.
    pub field_size: u32,
    /// `finish_position / field_size * 100`, `0` when `field_size` is `0`.
    pub finish_percentile: f64,
    /// Total winnings, `0` when no payout line was found.
    pub payout: Decimal,
}

impl TournamentRecord {
    /// Build a record, rounding money to two places and computing the
    /// derived fields.
    ///
    /// Returns `None` when `entry_fee * (1 + re_entry_count)` does not fit in
    /// a [`Decimal`].
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        entry_fee: Decimal,
        re_entry_count: u32,
        finish_position: u32,
        field_size: u32,
        payout: Decimal,
    ) -> Option<Self> {
        let entry_fee = round2(entry_fee);
        let entries = Decimal::from(1 + u64::from(re_entry_count));
        let total_entry_cost = round2(entry_fee.checked_mul(entries)?);
        let finish_percentile = if field_size > 0 {
            percentage(f64::from(finish_position), f64::from(field_size))
        } else {
            0.0
        };

        Some(Self {
            id: id.into(),
            name: name.into(),
            entry_fee,
            re_entry_count,
            total_entry_cost,
            finish_position,
            field_size,
            finish_percentile,
            payout: round2(payout),
        })
    }

    /// Whether this tournament paid out anything.
    pub fn cashed(&self) -> bool {
        self.payout > Decimal::ZERO
    }
}
