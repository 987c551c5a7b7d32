use std::collections::BTreeMap;

use log::debug;
use rust_decimal::Decimal;

use crate::models::{
    Carrier, LineOutcome, MonthKey, MonthlyState, PackageSize, Pricing, Rejection, Tallies,
    Transaction,
};
use crate::parser::parse_line;

/// Total discount a single engine grants per calendar month
pub const MONTHLY_DISCOUNT_CAP: Decimal = Decimal::TEN;

/// Every n-th large LP shipment of a month ships for free
pub const FREE_LP_LARGE_EVERY: u64 = 3;

/// Base price list per carrier and size
pub fn base_price(carrier: Carrier, size: PackageSize) -> Decimal {
    match (carrier, size) {
        (Carrier::LaPoste, PackageSize::S) => Decimal::new(150, 2),
        (Carrier::LaPoste, PackageSize::M) => Decimal::new(490, 2),
        (Carrier::LaPoste, PackageSize::L) => Decimal::new(690, 2),
        (Carrier::MondialRelay, PackageSize::S) => Decimal::new(200, 2),
        (Carrier::MondialRelay, PackageSize::M) => Decimal::new(300, 2),
        (Carrier::MondialRelay, PackageSize::L) => Decimal::new(400, 2),
    }
}

/// Cheapest base price any carrier offers for `size`
pub fn lowest_price(size: PackageSize) -> Decimal {
    Carrier::ALL
        .iter()
        .map(|carrier| base_price(*carrier, size))
        .min()
        .unwrap_or(Decimal::ZERO)
}

/// Apply the discount rules to one transaction against the running state of its month
///
/// `state` must belong to `tx`'s month and must be fed transactions in input order:
/// the LP-large counter and the cap are both running values.
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use shipping_discounts::engine::apply_rules;
/// use shipping_discounts::models::MonthlyState;
/// use shipping_discounts::parser::parse_line;
///
/// let mut february = MonthlyState::default();
///
/// // A small MR parcel is matched to the cheaper LP price
/// let tx = parse_line("2015-02-01 S MR").unwrap();
/// let pricing = apply_rules(&tx, &mut february);
/// assert_eq!(pricing.base_price, Decimal::new(200, 2));
/// assert_eq!(pricing.discount, Decimal::new(50, 2));
/// assert_eq!(pricing.final_price, Decimal::new(150, 2));
///
/// // The third large LP parcel of the month is free
/// let large = parse_line("2015-02-02 L LP").unwrap();
/// apply_rules(&large, &mut february);
/// apply_rules(&large, &mut february);
/// assert_eq!(apply_rules(&large, &mut february).final_price, Decimal::ZERO);
/// assert_eq!(february.discount_used, Decimal::new(740, 2));
/// ```
pub fn apply_rules(tx: &Transaction, state: &mut MonthlyState) -> Pricing {
    let base = base_price(tx.carrier, tx.size);
    let mut candidate = Decimal::ZERO;

    // Small parcels are matched to the cheapest carrier
    if tx.size == PackageSize::S {
        let lowest = lowest_price(PackageSize::S);
        if base > lowest {
            candidate += base - lowest;
        }
    }

    if tx.carrier == Carrier::LaPoste && tx.size == PackageSize::L {
        state.lp_large_count += 1;
        if state.lp_large_count % FREE_LP_LARGE_EVERY == 0 {
            candidate += base;
        }
    }

    let available = (MONTHLY_DISCOUNT_CAP - state.discount_used).max(Decimal::ZERO);
    let applied = candidate.min(available);
    state.discount_used += applied;

    Pricing {
        base_price: base,
        discount: applied,
        final_price: base - applied,
    }
}

/// Discount rule engine with its own, unshared per-month state
///
/// One instance is owned by exactly one worker; lines must be fed in input order.
#[derive(Debug, Default)]
pub struct DiscountEngine {
    months: BTreeMap<MonthKey, MonthlyState>,
    tallies: Tallies,
}

impl DiscountEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Price a parsed transaction, updating the state of its month
    pub fn price(&mut self, tx: &Transaction) -> Pricing {
        let state = self.months.entry(tx.month_key()).or_default();
        apply_rules(tx, state)
    }

    /// Parse, price and tally one raw line
    ///
    /// Returns `None` for blank lines, which are counted as rejected but never echoed.
    pub fn process_line(&mut self, raw: &str) -> Option<LineOutcome> {
        let line = raw.trim();

        match parse_line(line) {
            Ok(tx) => {
                let pricing = self.price(&tx);
                self.tallies.record_accepted(&tx, &pricing);
                Some(LineOutcome::Accepted {
                    line: line.to_string(),
                    pricing,
                })
            }
            Err(Rejection::Blank) => {
                self.tallies.record_rejected();
                None
            }
            Err(reason) => {
                debug!("Ignoring line {:?}: {}", line, reason);
                self.tallies.record_rejected();
                Some(LineOutcome::Rejected {
                    line: line.to_string(),
                    reason,
                })
            }
        }
    }

    pub fn month_state(&self, month: MonthKey) -> Option<&MonthlyState> {
        self.months.get(&month)
    }

    /// Consume the engine and return its monthly state and counters
    pub fn into_parts(self) -> (BTreeMap<MonthKey, MonthlyState>, Tallies) {
        (self.months, self.tallies)
    }
}
