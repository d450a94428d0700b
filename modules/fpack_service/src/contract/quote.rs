//! Quote output contract
//!
//! Unlike the catalog models these types derive `Serialize`: exporters and the
//! REST layer consume a quote as-is.

use super::model::{ColumnKind, ItemKind};
use rust_decimal::Decimal;
use serde::Serialize;

/// Identifies what a quote is computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuoteRequest {
    pub template_id: i32,
    pub client_id: i32,
    /// Project whose selections fill the group columns; `None` skips every group
    pub instance_id: Option<i32>,
}

/// Kind of an aggregated invoice line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Product,
    Robot,
}

impl LineKind {
    pub fn item_kind(self) -> ItemKind {
        match self {
            Self::Product => ItemKind::Product,
            Self::Robot => ItemKind::Robot,
        }
    }
}

/// Priced, aggregated row.
///
/// Unit amounts keep the precision of the price table; only `line_total` and
/// the quote totals are rounded to the presentation scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricedLine {
    pub ref_id: i32,
    pub display_name: String,
    pub quantity: u32,
    /// As stored, unrounded
    pub unit_price: Decimal,
    /// As stored, unrounded
    pub unit_transport: Decimal,
    pub comment: Option<String>,
    /// `quantity * (unit_price + unit_transport)`, rounded once
    pub line_total: Decimal,
}

/// One invoice line, identified by `(kind, ref_id)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuoteLine {
    Product(PricedLine),
    Robot(PricedLine),
}

impl QuoteLine {
    pub fn kind(&self) -> LineKind {
        match self {
            Self::Product(_) => LineKind::Product,
            Self::Robot(_) => LineKind::Robot,
        }
    }

    pub fn detail(&self) -> &PricedLine {
        match self {
            Self::Product(line) | Self::Robot(line) => line,
        }
    }

    /// A line without price components is shown as unpriced by callers
    pub fn is_unpriced(&self) -> bool {
        let line = self.detail();
        line.unit_price.is_zero() && line.unit_transport.is_zero() && line.comment.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuoteTotals {
    pub product_subtotal: Decimal,
    pub transport_subtotal: Decimal,
    pub grand_total: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuoteSummary {
    pub line_count: usize,
    pub product_line_count: usize,
    pub robot_line_count: usize,
}

/// Non-fatal anomaly met while resolving a quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Column or composition row points at a missing catalog row or group
    UnresolvedReference { kind: ColumnKind, ref_id: i32 },
    /// Equipment without composition rows
    EmptyComposition { equipment_id: i32 },
    /// Group column with no recorded selection
    UnselectedGroup { group_id: i32 },
    /// Selection pointing at an item deleted since
    StaleSelection { group_id: i32, kind: ItemKind, ref_id: i32 },
    /// Selection honored although the group does not offer the item
    SelectionOutsideGroup { group_id: i32, kind: ItemKind, ref_id: i32 },
    /// No price row; the line is priced at zero
    MissingPrice { kind: LineKind, ref_id: i32 },
}

/// Resolved, priced quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub template_id: i32,
    pub client_id: i32,
    pub instance_id: Option<i32>,
    pub lines: Vec<QuoteLine>,
    pub totals: QuoteTotals,
    pub summary: QuoteSummary,
    pub diagnostics: Vec<Diagnostic>,
}

impl Quote {
    pub fn line(&self, kind: LineKind, ref_id: i32) -> Option<&PricedLine> {
        self.lines
            .iter()
            .find(|line| line.kind() == kind && line.detail().ref_id == ref_id)
            .map(QuoteLine::detail)
    }
}

/// Quote of a global project: every member project quoted on its own, plus
/// one merged invoice.
///
/// Merged lines sum quantities across projects before pricing, so their
/// totals are rounded from exact sums and may differ from the sum of the
/// per-project totals by the rounding of each project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalQuote {
    pub global_id: i32,
    pub client_id: i32,
    /// Member project quotes, ordered by project id
    pub projects: Vec<Quote>,
    pub lines: Vec<QuoteLine>,
    pub totals: QuoteTotals,
    pub summary: QuoteSummary,
}

impl GlobalQuote {
    pub fn line(&self, kind: LineKind, ref_id: i32) -> Option<&PricedLine> {
        self.lines
            .iter()
            .find(|line| line.kind() == kind && line.detail().ref_id == ref_id)
            .map(QuoteLine::detail)
    }
}
