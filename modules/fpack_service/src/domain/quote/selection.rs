//! Group column resolution

use super::source::QuoteSource;
use crate::contract::{ColumnKind, Diagnostic, ItemKind};
use anyhow::Result;

/// Item chosen for a group column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedItem {
    pub kind: ItemKind,
    pub ref_id: i32,
}

/// Decide which item represents a group column.
///
/// Only recorded selections count: an unselected group contributes nothing,
/// there is no fallback to the group's standard items.
pub async fn resolve_group(
    source: &dyn QuoteSource,
    instance_id: Option<i32>,
    group_id: i32,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Option<ResolvedItem>> {
    if !source.group_exists(group_id).await? {
        diagnostics.push(Diagnostic::UnresolvedReference {
            kind: ColumnKind::Group,
            ref_id: group_id,
        });
        return Ok(None);
    }

    let selection = match instance_id {
        Some(instance_id) => source.selection(instance_id, group_id).await?,
        None => None,
    };
    let Some(selection) = selection else {
        diagnostics.push(Diagnostic::UnselectedGroup { group_id });
        return Ok(None);
    };

    if source.item_name(selection.kind, selection.ref_id).await?.is_none() {
        tracing::debug!(
            group_id,
            kind = %selection.kind,
            ref_id = selection.ref_id,
            "selected item no longer exists"
        );
        diagnostics.push(Diagnostic::StaleSelection {
            group_id,
            kind: selection.kind,
            ref_id: selection.ref_id,
        });
        return Ok(None);
    }

    let offered = source
        .group_items(group_id)
        .await?
        .iter()
        .any(|item| item.kind == selection.kind && item.ref_id == selection.ref_id);
    if !offered {
        diagnostics.push(Diagnostic::SelectionOutsideGroup {
            group_id,
            kind: selection.kind,
            ref_id: selection.ref_id,
        });
    }

    Ok(Some(ResolvedItem {
        kind: selection.kind,
        ref_id: selection.ref_id,
    }))
}
