//! Tag affinity scoring: how often a tag was chosen given it was shown.
//!
//! The scorer runs once per tag vocabulary (motivations, submotivations)
//! over the user's full history.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::warn;
use versus_types::choice::ChoiceRecord;
use versus_types::id::ItemId;
use versus_types::item::{Item, Motivation, Submotivation};
use versus_types::taste::{AffinityReport, TagAffinity};

use crate::tally::Tally;

/// A history record with its items looked up.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedChoice<'a> {
    pub shown: [&'a Item; 2],
    pub chosen: &'a Item,
}

/// History ready for scoring, plus how many records could not be used.
#[derive(Debug, Default)]
pub struct ResolvedHistory<'a> {
    pub choices: Vec<ResolvedChoice<'a>>,
    pub skipped: u32,
}

/// Look up the items of every record in `catalog`.
///
/// Records whose chosen item is not one of the shown items, or that reference
/// an item missing from the catalog, are skipped and counted.
pub fn resolve<'a>(history: &[ChoiceRecord], catalog: &'a HashMap<ItemId, Item>) -> ResolvedHistory<'a> {
    let mut resolved = ResolvedHistory::default();

    for record in history {
        if !record.is_consistent() {
            warn!(
                choice_id = %record.id,
                chosen_id = %record.chosen_id,
                "skipping choice whose chosen item was not shown"
            );
            resolved.skipped += 1;
            continue;
        }

        let lookup = (
            catalog.get(&record.item_one_id),
            catalog.get(&record.item_two_id),
            catalog.get(&record.chosen_id),
        );
        match lookup {
            (Some(one), Some(two), Some(chosen)) => resolved.choices.push(ResolvedChoice {
                shown: [one, two],
                chosen,
            }),
            _ => {
                warn!(choice_id = %record.id, "skipping choice that references a missing item");
                resolved.skipped += 1;
            }
        }
    }

    resolved
}

/// Score one tag vocabulary.
///
/// Every tag on both shown items adds one exposure (a tag on both items adds
/// two); every tag on the chosen item adds one selection. The percentage is
/// `floor(chosen * 100 / exposure)`, listed in the order tags were first
/// chosen. Tags never exposed are left out.
pub fn score<T, F>(history: &ResolvedHistory<'_>, tags_of: F) -> AffinityReport<T>
where
    T: Clone + Eq + Hash + Ord,
    F: Fn(&Item) -> &[T],
{
    let mut exposure: Tally<T> = Tally::new();
    let mut chosen: Tally<T> = Tally::new();

    for choice in &history.choices {
        for item in choice.shown {
            exposure.extend(tags_of(item).iter().cloned());
        }
        chosen.extend(tags_of(choice.chosen).iter().cloned());
    }

    let percentages = chosen
        .iter()
        .filter_map(|(tag, picked)| {
            let shown = exposure.get(tag);
            if shown == 0 {
                return None;
            }
            let percentage = (u64::from(picked) * 100 / u64::from(shown)).min(100) as u8;
            Some(TagAffinity {
                tag: tag.clone(),
                percentage,
            })
        })
        .collect();

    AffinityReport {
        exposure_counts: exposure.to_btree_map(),
        chosen_counts: chosen.to_btree_map(),
        percentages,
        records_scored: history.choices.len() as u32,
        records_skipped: history.skipped,
    }
}

fn motivations_of(item: &Item) -> &[Motivation] {
    &item.tags
}

fn submotivations_of(item: &Item) -> &[Submotivation] {
    &item.sub_tags
}

/// Affinity over the coarse motivation tags.
pub fn motivation_report(history: &ResolvedHistory<'_>) -> AffinityReport<Motivation> {
    score(history, motivations_of)
}

/// Affinity over the fine-grained submotivation tags.
pub fn submotivation_report(history: &ResolvedHistory<'_>) -> AffinityReport<Submotivation> {
    score(history, submotivations_of)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taste::fixtures::{item, record, with_sub_tags, with_tags};
    use versus_types::id::UserId;

    fn catalog(items: &[&Item]) -> HashMap<ItemId, Item> {
        items.iter().map(|i| (i.id, (*i).clone())).collect()
    }

    fn tag(name: &str) -> Motivation {
        Motivation::new(name).unwrap()
    }

    #[test]
    fn test_single_choice_percentages() {
        let one = with_tags(item(1, "One"), &["story", "power"]);
        let two = with_tags(item(2, "Two"), &["story"]);
        let catalog = catalog(&[&one, &two]);
        let history = vec![record(UserId::new(), one.id, two.id, one.id, 0)];

        let report = motivation_report(&resolve(&history, &catalog));

        assert_eq!(report.exposure_counts[&tag("story")], 2);
        assert_eq!(report.exposure_counts[&tag("power")], 1);
        assert_eq!(report.chosen_counts[&tag("story")], 1);
        assert_eq!(report.chosen_counts[&tag("power")], 1);
        assert_eq!(
            report.percentages,
            vec![
                TagAffinity { tag: tag("story"), percentage: 50 },
                TagAffinity { tag: tag("power"), percentage: 100 },
            ]
        );
        assert_eq!(report.records_scored, 1);
        assert_eq!(report.records_skipped, 0);
    }

    #[test]
    fn test_percentages_floor_and_stay_in_range() {
        let a = with_tags(item(1, "A"), &["challenge"]);
        let b = with_tags(item(2, "B"), &["challenge"]);
        let c = with_tags(item(3, "C"), &["story"]);
        let catalog = catalog(&[&a, &b, &c]);
        let user = UserId::new();
        let history = vec![
            record(user, a.id, c.id, a.id, 0),
            record(user, b.id, c.id, c.id, 1),
            record(user, a.id, c.id, c.id, 2),
        ];

        let report = motivation_report(&resolve(&history, &catalog));
        let challenge = report
            .percentages
            .iter()
            .find(|p| p.tag == tag("challenge"))
            .unwrap();
        // chosen 1 of 3 exposures
        assert_eq!(challenge.percentage, 33);
        for p in &report.percentages {
            assert!(p.percentage <= 100);
            assert!(report.exposure_counts[&p.tag] > 0);
        }
    }

    #[test]
    fn test_inconsistent_and_dangling_records_are_skipped() {
        let a = with_tags(item(1, "A"), &["story"]);
        let b = with_tags(item(2, "B"), &["power"]);
        let catalog = catalog(&[&a, &b]);
        let user = UserId::new();
        let history = vec![
            record(user, a.id, b.id, a.id, 0),
            record(user, a.id, b.id, ItemId::new(), 1),
            record(user, a.id, ItemId::new(), a.id, 2),
        ];

        let report = motivation_report(&resolve(&history, &catalog));
        assert_eq!(report.records_scored, 1);
        assert_eq!(report.records_skipped, 2);
        assert_eq!(report.exposure_counts[&tag("story")], 1);
    }

    #[test]
    fn test_vocabularies_are_scored_independently() {
        let one = with_sub_tags(with_tags(item(1, "One"), &["story"]), &["discovery"]);
        let two = with_sub_tags(item(2, "Two"), &["discovery", "design"]);
        let catalog = catalog(&[&one, &two]);
        let history = vec![record(UserId::new(), one.id, two.id, two.id, 0)];
        let resolved = resolve(&history, &catalog);

        let motivations = motivation_report(&resolved);
        assert!(motivations.percentages.is_empty());
        assert_eq!(motivations.exposure_counts[&tag("story")], 1);

        let subs = submotivation_report(&resolved);
        let names: Vec<(&str, u8)> = subs
            .percentages
            .iter()
            .map(|p| (p.tag.as_str(), p.percentage))
            .collect();
        assert_eq!(names, vec![("discovery", 50), ("design", 100)]);
    }

    #[test]
    fn test_empty_history() {
        let catalog = HashMap::new();
        let report = motivation_report(&resolve(&[], &catalog));
        assert!(report.percentages.is_empty());
        assert!(report.exposure_counts.is_empty());
        assert_eq!(report.records_scored, 0);
    }
}
