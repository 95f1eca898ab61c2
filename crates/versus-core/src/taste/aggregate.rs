//! Per-user "how often was each item chosen" ranking.

use versus_types::choice::ChoiceRecord;
use versus_types::id::ItemId;
use versus_types::taste::TopChoice;

use crate::tally::Tally;

/// Cap for the top-choices view.
pub const TOP_CHOICES_VIEW: usize = 6;

/// Cap for the top choices that seed recommendations.
pub const RECOMMENDATION_SEED: usize = 100;

/// Count how often each item was chosen, in first-seen order of `history`.
///
/// Every record counts, including ones whose chosen item is not one of the
/// shown items; the chosen id is what the user actually picked.
pub fn tally_chosen(history: &[ChoiceRecord]) -> Tally<ItemId> {
    history.iter().map(|record| record.chosen_id).collect()
}

/// The `limit` most chosen items, count descending.
///
/// Ties keep the order in which the ids were first seen in `history`, so
/// callers control tie-breaking by the order they pass records in
/// (newest-first from the store).
pub fn top_choices(history: &[ChoiceRecord], limit: usize) -> Vec<TopChoice> {
    tally_chosen(history)
        .ranked(limit)
        .into_iter()
        .map(|(item_id, count)| TopChoice { item_id, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taste::fixtures::record;
    use versus_types::id::UserId;

    #[test]
    fn test_top_choices_counts_and_orders() {
        let user = UserId::new();
        let (a, b, c, d) = (ItemId::new(), ItemId::new(), ItemId::new(), ItemId::new());
        let history: Vec<ChoiceRecord> = [a, a, a, b, b, c]
            .into_iter()
            .enumerate()
            .map(|(i, chosen)| record(user, chosen, d, chosen, i as i64))
            .collect();

        let top = top_choices(&history, TOP_CHOICES_VIEW);
        assert_eq!(
            top,
            vec![
                TopChoice { item_id: a, count: 3 },
                TopChoice { item_id: b, count: 2 },
                TopChoice { item_id: c, count: 1 },
            ]
        );
    }

    #[test]
    fn test_ties_rank_earlier_seen_first() {
        let user = UserId::new();
        let (a, b, other) = (ItemId::new(), ItemId::new(), ItemId::new());
        let history = vec![
            record(user, b, other, b, 0),
            record(user, a, other, a, 1),
            record(user, a, other, a, 2),
            record(user, b, other, b, 3),
        ];

        let top = top_choices(&history, 6);
        assert_eq!(top[0].item_id, b);
        assert_eq!(top[1].item_id, a);
    }

    #[test]
    fn test_limit_and_empty_input() {
        assert!(top_choices(&[], 6).is_empty());

        let user = UserId::new();
        let other = ItemId::new();
        let history: Vec<ChoiceRecord> = (0..10)
            .map(|i| {
                let chosen = ItemId::new();
                record(user, chosen, other, chosen, i)
            })
            .collect();
        assert_eq!(top_choices(&history, 6).len(), 6);
        assert_eq!(top_choices(&history, RECOMMENDATION_SEED).len(), 10);
    }

    #[test]
    fn test_counts_match_occurrences() {
        let user = UserId::new();
        let ids: Vec<ItemId> = (0..4).map(|_| ItemId::new()).collect();
        let other = ItemId::new();
        let picks = [0, 1, 2, 1, 3, 3, 3, 0, 3];
        let history: Vec<ChoiceRecord> = picks
            .iter()
            .enumerate()
            .map(|(i, &p)| record(user, ids[p], other, ids[p], i as i64))
            .collect();

        for top in top_choices(&history, 100) {
            let expected = history.iter().filter(|r| r.chosen_id == top.item_id).count();
            assert_eq!(top.count as usize, expected);
        }
    }
}
