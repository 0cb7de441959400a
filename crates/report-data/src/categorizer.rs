//! Grouping of tournament records by entry-fee tier.
//!
//! Buckets are keyed by the canonical fee string (see
//! [`report_core::formatting::fee_key`]) and keep the order in which each fee
//! was first seen.

use std::collections::HashMap;

use report_core::formatting::{fee_key, percentage, round2};
use report_core::models::TournamentRecord;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::aggregator::accumulate;

// ── CategoryBucket ────────────────────────────────────────────────────────────

/// All records sharing one entry fee, with running totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBucket {
    /// Canonical fee key, e.g. `"$5.00"`.
    #[serde(skip)]
    pub key: String,
    pub records: Vec<TournamentRecord>,
    /// Sum of `total_entry_cost` over `records`.
    pub total_buy_in: Decimal,
    /// Sum of `payout` over `records`.
    pub total_winnings: Decimal,
    pub count: usize,
}

impl CategoryBucket {
    fn new(key: String) -> Self {
        Self {
            key,
            records: Vec::new(),
            total_buy_in: round2(Decimal::ZERO),
            total_winnings: round2(Decimal::ZERO),
            count: 0,
        }
    }

    /// Fold `record` into the bucket.
    fn add_record(&mut self, record: &TournamentRecord) {
        self.total_buy_in = round2(accumulate(
            self.total_buy_in,
            record.total_entry_cost,
            "bucket buy-in",
        ));
        self.total_winnings = round2(accumulate(
            self.total_winnings,
            record.payout,
            "bucket winnings",
        ));
        self.count += 1;
        self.records.push(record.clone());
    }

    /// `total_winnings - total_buy_in`, computed on demand.
    pub fn net_profit(&self) -> Decimal {
        round2(self.total_winnings - self.total_buy_in)
    }

    /// Net profit as a percentage of the tier's buy-ins.
    pub fn roi(&self) -> f64 {
        percentage(
            self.net_profit().to_f64().unwrap_or(0.0),
            self.total_buy_in.to_f64().unwrap_or(0.0),
        )
    }
}

// ── Categories ────────────────────────────────────────────────────────────────

/// Fee-key → bucket mapping in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Categories {
    buckets: Vec<CategoryBucket>,
    index: HashMap<String, usize>,
}

impl Categories {
    /// Group `records` by entry fee.
    pub fn from_records(records: &[TournamentRecord]) -> Self {
        let mut categories = Self::default();
        for record in records {
            categories.add_record(record);
        }
        categories
    }

    /// Append `record` to the bucket for its fee, creating the bucket first
    /// if this fee has not been seen yet.
    pub fn add_record(&mut self, record: &TournamentRecord) {
        self.get_or_insert(fee_key(record.entry_fee)).add_record(record);
    }

    /// Bucket for `key`, inserted empty at the end when absent.
    pub fn get_or_insert(&mut self, key: String) -> &mut CategoryBucket {
        let position = match self.index.get(&key) {
            Some(&position) => position,
            None => {
                let position = self.buckets.len();
                self.index.insert(key.clone(), position);
                self.buckets.push(CategoryBucket::new(key));
                position
            }
        };
        &mut self.buckets[position]
    }

    /// Look up a bucket by its canonical key.
    pub fn get(&self, key: &str) -> Option<&CategoryBucket> {
        self.index.get(key).map(|&position| &self.buckets[position])
    }

    /// Buckets in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &CategoryBucket> {
        self.buckets.iter()
    }

    /// Canonical keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|bucket| bucket.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Serialised as a JSON object keyed by fee, preserving bucket order.
impl Serialize for Categories {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for bucket in &self.buckets {
            map.serialize_entry(&bucket.key, bucket)?;
        }
        map.end()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn make_record(
        id: &str,
        name: &str,
        fee: Decimal,
        re_entries: u32,
        payout: Decimal,
    ) -> TournamentRecord {
        TournamentRecord::new(id, name, fee, re_entries, 1, 10, payout).unwrap()
    }

    #[test]
    fn test_empty_input() {
        let categories = Categories::from_records(&[]);
        assert!(categories.is_empty());
        assert_eq!(categories.len(), 0);
    }

    #[test]
    fn test_same_fee_shares_bucket() {
        let records = vec![
            make_record("1", "Morning Turbo", dec!(5.00), 0, dec!(12.50)),
            make_record("2", "Evening Deep", dec!(5), 1, dec!(0)),
        ];
        let categories = Categories::from_records(&records);

        assert_eq!(categories.len(), 1);
        let bucket = categories.get("$5.00").expect("bucket");
        assert_eq!(bucket.count, 2);
        assert_eq!(bucket.total_buy_in, dec!(15.00));
        assert_eq!(bucket.total_winnings, dec!(12.50));
        assert_eq!(bucket.records.len(), 2);
        assert_eq!(bucket.records[0].name, "Morning Turbo");
        assert_eq!(bucket.records[1].name, "Evening Deep");
    }

    #[test]
    fn test_first_seen_order() {
        let records = vec![
            make_record("1", "A", dec!(22), 0, dec!(0)),
            make_record("2", "B", dec!(5.5), 0, dec!(0)),
            make_record("3", "C", dec!(22), 0, dec!(0)),
            make_record("4", "D", dec!(1), 0, dec!(0)),
        ];
        let categories = Categories::from_records(&records);
        let keys: Vec<&str> = categories.keys().collect();
        assert_eq!(keys, vec!["$22.00", "$5.50", "$1.00"]);
    }

    #[test]
    fn test_net_profit_and_roi_on_demand() {
        let records = vec![
            make_record("1", "A", dec!(10), 1, dec!(0)),
            make_record("2", "B", dec!(10), 0, dec!(45)),
        ];
        let categories = Categories::from_records(&records);
        let bucket = categories.get("$10.00").unwrap();
        assert_eq!(bucket.net_profit(), dec!(15.00));
        assert!((bucket.roi() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_counts_sum_to_total() {
        let records = vec![
            make_record("1", "A", dec!(1), 0, dec!(0)),
            make_record("2", "B", dec!(2), 0, dec!(0)),
            make_record("3", "C", dec!(1), 2, dec!(4)),
            make_record("4", "D", dec!(3.3), 0, dec!(0)),
            make_record("5", "E", dec!(2), 0, dec!(9)),
        ];
        let categories = Categories::from_records(&records);
        let total: usize = categories.iter().map(|b| b.count).sum();
        assert_eq!(total, records.len());
    }

    #[test]
    fn test_bucket_totals_clamp_instead_of_overflowing() {
        let huge = dec!(70000000000000000000000000000);
        let records = vec![
            make_record("1", "A", huge, 0, huge),
            make_record("2", "B", huge, 0, huge),
        ];
        let categories = Categories::from_records(&records);

        let bucket = categories.iter().next().unwrap();
        assert_eq!(bucket.count, 2);
        assert_eq!(bucket.total_buy_in, Decimal::MAX);
        assert_eq!(bucket.total_winnings, Decimal::MAX);
        assert_eq!(bucket.net_profit(), dec!(0));
    }

    #[test]
    fn test_get_or_insert_creates_once() {
        let mut categories = Categories::default();
        categories.get_or_insert("$1.00".to_string());
        categories.get_or_insert("$1.00".to_string());
        assert_eq!(categories.len(), 1);
        assert_eq!(categories.get("$1.00").unwrap().count, 0);
        assert!(categories.get("$2.00").is_none());
    }

    #[test]
    fn test_serialize_preserves_order() {
        let records = vec![
            make_record("1", "A", dec!(50), 0, dec!(0)),
            make_record("2", "B", dec!(2), 0, dec!(0)),
        ];
        let categories = Categories::from_records(&records);
        let json = serde_json::to_string(&categories).unwrap();

        let first = json.find("\"$50.00\"").unwrap();
        let second = json.find("\"$2.00\"").unwrap();
        assert!(first < second);
        assert!(json.contains("\"total_buy_in\":\"50.00\""));
        assert!(!json.contains("\"key\""));
    }
}
