//! Quantity aggregation and presentation rounding

use crate::contract::LineKind;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;

/// Identity of an invoice line. Field order gives the output order:
/// ascending id, then product before robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LineKey {
    pub ref_id: i32,
    pub kind: LineKind,
}

/// Quantities summed per distinct item.
///
/// Lines are only priced once every contribution has been added.
#[derive(Debug, Default)]
pub struct Tally {
    quantities: BTreeMap<LineKey, u32>,
}

impl Tally {
    pub fn add(&mut self, kind: LineKind, ref_id: i32, quantity: u32) {
        if quantity == 0 {
            return;
        }
        let slot = self.quantities.entry(LineKey { ref_id, kind }).or_insert(0);
        *slot = slot.saturating_add(quantity);
    }

    /// Add every quantity of another tally
    pub fn merge(&mut self, other: &Tally) {
        for (key, quantity) in &other.quantities {
            self.add(key.kind, key.ref_id, *quantity);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Aggregated entries in output order
    pub fn into_entries(self) -> impl Iterator<Item = (LineKey, u32)> {
        self.quantities.into_iter()
    }
}

/// Round a monetary amount for presentation
pub fn present(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}
