//! Derived, per-request output types of the taste pipeline.
//!
//! None of these are persisted; they are recomputed from the choice history
//! on every request.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{ChoiceId, ItemId};
use crate::item::{Item, ItemSummary, Submotivation};

/// How often an item was chosen by one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopChoice {
    pub item_id: ItemId,
    pub count: u32,
}

/// A top choice joined with its catalog details, as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedChoice {
    #[serde(flatten)]
    pub item: ItemSummary,
    pub count: u32,
}

/// Selection rate of a single tag, 0..=100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagAffinity<T> {
    pub tag: T,
    pub percentage: u8,
}

/// Per-tag exposure vs. selection counts and the derived percentages.
///
/// Percentages are independent per tag ("chosen given shown") and do not sum
/// to 100 across tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffinityReport<T: Ord> {
    /// Times each tag appeared on a shown item (both items of every pair).
    pub exposure_counts: BTreeMap<T, u32>,
    /// Times each tag appeared on the chosen item.
    pub chosen_counts: BTreeMap<T, u32>,
    /// Ordered by the first time each tag was chosen.
    pub percentages: Vec<TagAffinity<T>>,
    /// Records that contributed to the counts.
    pub records_scored: u32,
    /// Records dropped because their chosen item was not one of the shown items
    /// or an item was missing from the catalog.
    pub records_skipped: u32,
}

impl<T: Ord> Default for AffinityReport<T> {
    fn default() -> Self {
        Self {
            exposure_counts: BTreeMap::new(),
            chosen_counts: BTreeMap::new(),
            percentages: Vec::new(),
            records_scored: 0,
            records_skipped: 0,
        }
    }
}

/// Keyword search payload for sourcing new candidate items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentQuery {
    /// Themes the keywords were expanded from, strongest affinity first.
    pub themes: Vec<Submotivation>,
    /// Deduplicated synonyms of every theme, in theme order.
    pub keywords: Vec<String>,
}

/// Submotivation affinity plus the keyword query derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmotivationReport {
    pub report: AffinityReport<Submotivation>,
    pub content_query: ContentQuery,
}

/// Recommended items, best first.
///
/// At most [`RecommendationList::MAX_LEN`] items, no duplicates, never an
/// item the user excluded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationList {
    pub items: Vec<Item>,
}

impl RecommendationList {
    pub const MAX_LEN: usize = 10;
}

/// One row of the global engagement leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub engagement_count: i64,
    pub first_name: String,
    pub last_name: String,
    pub profile_pic: Option<String>,
}

/// A past vote with the shown items resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: ChoiceId,
    pub item_one: ItemSummary,
    pub item_two: ItemSummary,
    pub chosen: ItemSummary,
    pub created_at: DateTime<Utc>,
}
