use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Local};
use rust_decimal::Decimal;

use super::chunk::Chunk;
use super::outcome::{LineOutcome, Pricing};
use super::transaction::{Carrier, MonthKey, PackageSize, Transaction};

/// Running per-month rule state of one engine instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthlyState {
    /// Large LP shipments seen so far this month
    pub lp_large_count: u64,
    /// Discount granted so far this month, kept at full precision
    pub discount_used: Decimal,
}

impl MonthlyState {
    /// Key-wise sum used when merging chunks. Not a replay of the rules.
    pub fn absorb(&mut self, other: &MonthlyState) {
        self.lp_large_count += other.lp_large_count;
        self.discount_used += other.discount_used;
    }
}

/// Summable counters produced by a worker and merged by the aggregator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tallies {
    /// Every line consumed, blank lines included
    pub lines_seen: u64,
    pub valid: u64,
    pub rejected: u64,
    pub total_discount: Decimal,
    pub by_carrier: BTreeMap<Carrier, u64>,
    pub by_size: BTreeMap<PackageSize, u64>,
}

impl Tallies {
    pub fn record_accepted(&mut self, tx: &Transaction, pricing: &Pricing) {
        self.lines_seen += 1;
        self.valid += 1;
        self.total_discount += pricing.discount;
        *self.by_carrier.entry(tx.carrier).or_default() += 1;
        *self.by_size.entry(tx.size).or_default() += 1;
    }

    pub fn record_rejected(&mut self) {
        self.lines_seen += 1;
        self.rejected += 1;
    }

    pub fn merge(&mut self, other: &Tallies) {
        self.lines_seen += other.lines_seen;
        self.valid += other.valid;
        self.rejected += other.rejected;
        self.total_discount += other.total_discount;
        for (carrier, count) in &other.by_carrier {
            *self.by_carrier.entry(*carrier).or_default() += count;
        }
        for (size, count) in &other.by_size {
            *self.by_size.entry(*size).or_default() += count;
        }
    }

    pub fn carrier_count(&self, carrier: Carrier) -> u64 {
        self.by_carrier.get(&carrier).copied().unwrap_or(0)
    }

    pub fn size_count(&self, size: PackageSize) -> u64 {
        self.by_size.get(&size).copied().unwrap_or(0)
    }
}

/// Everything one worker produced for its chunk
#[derive(Debug, Clone)]
pub struct PartialResult {
    pub chunk: Chunk,
    /// Annotated lines in input order (possibly truncated by the outcome limit)
    pub outcomes: Vec<LineOutcome>,
    pub months: BTreeMap<MonthKey, MonthlyState>,
    pub tallies: Tallies,
    /// Set when the worker was cancelled or its line stream ended or failed early
    pub stopped_early: bool,
}

impl PartialResult {
    pub fn empty(chunk: Chunk) -> Self {
        Self {
            chunk,
            outcomes: Vec::new(),
            months: BTreeMap::new(),
            tallies: Tallies::default(),
            stopped_early: false,
        }
    }
}

/// Wall-clock bounds of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunTiming {
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    pub elapsed: Duration,
}

/// Run-wide totals: the plain sum of every chunk's tallies and monthly state
///
/// Each chunk enforced the monthly cap on its own, so a month split across
/// chunks can show more than the cap in `months`.
#[derive(Debug, Clone)]
pub struct GlobalStatistics {
    pub tallies: Tallies,
    pub months: BTreeMap<MonthKey, MonthlyState>,
    pub chunks_merged: usize,
    pub chunks_stopped_early: usize,
    pub timing: RunTiming,
}
