//! Expand a user's top choices into related catalog ids.

use std::collections::HashMap;

use versus_types::id::{ExternalId, ItemId};
use versus_types::item::Item;
use versus_types::taste::TopChoice;

use crate::tally::Tally;

/// Number of related ids kept after expansion.
pub const RELATED_LIMIT: usize = 10;

/// Tally the related ids of every top choice.
///
/// Top choices are scanned in rank order and each item's `related_ids` in
/// catalog order, so ties later resolve to whichever id the scan met first.
/// Top choices missing from `items` contribute nothing. Ids that are
/// themselves top choices are kept.
pub fn tally_related(top: &[TopChoice], items: &[Item]) -> Tally<ExternalId> {
    let by_id: HashMap<ItemId, &Item> = items.iter().map(|item| (item.id, item)).collect();

    top.iter()
        .filter_map(|choice| by_id.get(&choice.item_id))
        .flat_map(|item| item.related_ids.iter().copied())
        .collect()
}

/// Related ids ranked by how many top choices point at them, at most `limit`.
pub fn related_candidates(top: &[TopChoice], items: &[Item], limit: usize) -> Vec<ExternalId> {
    tally_related(top, items)
        .ranked(limit)
        .into_iter()
        .map(|(id, _)| id)
        .collect()
}
