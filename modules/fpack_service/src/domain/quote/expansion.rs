//! Equipment to product expansion

use super::source::QuoteSource;
use crate::contract::{ColumnKind, Diagnostic, ItemKind};
use anyhow::Result;
use std::collections::BTreeMap;

/// Expand an equipment into `(product_id, quantity)` pairs.
///
/// Missing equipment, empty compositions and dangling product rows contribute
/// nothing and are reported through `diagnostics`.
pub async fn expand_equipment(
    source: &dyn QuoteSource,
    equipment_id: i32,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<(i32, u32)>> {
    if !source.equipment_exists(equipment_id).await? {
        tracing::debug!(equipment_id, "equipment not found, skipped");
        diagnostics.push(Diagnostic::UnresolvedReference {
            kind: ColumnKind::Equipment,
            ref_id: equipment_id,
        });
        return Ok(Vec::new());
    }

    let rows = source.equipment_composition(equipment_id).await?;
    if rows.is_empty() {
        diagnostics.push(Diagnostic::EmptyComposition { equipment_id });
        return Ok(Vec::new());
    }

    let mut products: BTreeMap<i32, u32> = BTreeMap::new();
    for (product_id, quantity) in rows {
        if source.item_name(ItemKind::Product, product_id).await?.is_none() {
            tracing::debug!(equipment_id, product_id, "composition row points at a missing product");
            diagnostics.push(Diagnostic::UnresolvedReference {
                kind: ColumnKind::Product,
                ref_id: product_id,
            });
            continue;
        }
        let slot = products.entry(product_id).or_insert(0);
        *slot = slot.saturating_add(quantity);
    }

    Ok(products.into_iter().collect())
}
