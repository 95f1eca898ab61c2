//! Taste profiling service.
//!
//! Runs the taste pipeline for one user per call: fetch history, aggregate,
//! look up items, score. Every step short-circuits on the first store
//! failure; nothing partial is returned.

use std::collections::{HashMap, HashSet};

use tracing::{Instrument, debug, info, info_span, warn};
use versus_types::choice::ChoiceRecord;
use versus_types::error::TasteError;
use versus_types::id::{ExternalId, ItemId, UserId};
use versus_types::item::{Item, Motivation};
use versus_types::taste::{
    AffinityReport, HistoryEntry, LeaderboardEntry, RankedChoice, RecommendationList,
    SubmotivationReport,
};
use versus_types::user::User;

use crate::repository::choice::{ChoiceFilter, ChoiceRepository};
use crate::repository::item::ItemRepository;
use crate::repository::user::UserRepository;
use crate::taste::{aggregate, exclusion, keywords, leaderboard, motivation, similarity};

/// Row caps applied by [`TasteService`].
#[derive(Debug, Clone)]
pub struct TasteLimits {
    /// Default rows in the top-choices and recent-history views.
    pub top_choices: usize,
    /// Largest limit a caller may ask for.
    pub max_top_choices: usize,
    /// Top choices used to seed recommendations.
    pub recommendation_seed: usize,
    /// Candidates kept after similarity expansion.
    pub recommendation: usize,
    /// Themes a content query is built from.
    pub content_query_themes: usize,
}

impl Default for TasteLimits {
    fn default() -> Self {
        Self {
            top_choices: aggregate::TOP_CHOICES_VIEW,
            max_top_choices: aggregate::RECOMMENDATION_SEED,
            recommendation_seed: aggregate::RECOMMENDATION_SEED,
            recommendation: similarity::RELATED_LIMIT,
            content_query_themes: keywords::DEFAULT_THEMES,
        }
    }
}

/// Service computing per-user taste views from the choice history.
///
/// Generic over repository traits so the core never depends on
/// versus-infra.
pub struct TasteService<C: ChoiceRepository, I: ItemRepository, U: UserRepository> {
    choices: C,
    items: I,
    users: U,
    limits: TasteLimits,
}

impl<C: ChoiceRepository, I: ItemRepository, U: UserRepository> TasteService<C, I, U> {
    pub fn new(choices: C, items: I, users: U, limits: TasteLimits) -> Self {
        Self {
            choices,
            items,
            users,
            limits,
        }
    }

    pub fn limits(&self) -> &TasteLimits {
        &self.limits
    }

    /// The user's most chosen items, count descending.
    ///
    /// `limit` defaults to the configured view size and must be between 1 and
    /// the configured maximum.
    pub async fn top_choices(
        &self,
        user_id: &UserId,
        limit: Option<usize>,
    ) -> Result<Vec<RankedChoice>, TasteError> {
        let limit = self.check_limit(limit)?;
        let span = info_span!("taste.top_choices", taste.user_id = %user_id, taste.limit = limit);

        async move {
            self.require_user(user_id).await?;
            let history = self
                .choices
                .list_for_user(user_id, ChoiceFilter::default())
                .await?;
            let top = aggregate::top_choices(&history, limit);

            let ids: Vec<ItemId> = top.iter().map(|t| t.item_id).collect();
            let by_id = index_by_id(self.items.find_by_ids(&ids).await?);

            let ranked: Vec<RankedChoice> = top
                .into_iter()
                .filter_map(|choice| match by_id.get(&choice.item_id) {
                    Some(item) => Some(RankedChoice {
                        item: item.summary(),
                        count: choice.count,
                    }),
                    None => {
                        warn!(item_id = %choice.item_id, "top choice missing from catalog");
                        None
                    }
                })
                .collect();

            debug!(
                history = history.len(),
                ranked = ranked.len(),
                "aggregated top choices"
            );
            Ok(ranked)
        }
        .instrument(span)
        .await
    }

    /// The user's latest votes with item details, newest first.
    pub async fn recent_history(
        &self,
        user_id: &UserId,
        limit: Option<usize>,
    ) -> Result<Vec<HistoryEntry>, TasteError> {
        let limit = self.check_limit(limit)?;
        let span = info_span!("taste.recent_history", taste.user_id = %user_id, taste.limit = limit);

        async move {
            self.require_user(user_id).await?;
            let history = self
                .choices
                .list_for_user(user_id, ChoiceFilter::newest(limit as i64))
                .await?;
            let catalog = self.history_catalog(&history).await?;

            let entries = history
                .iter()
                .filter(|record| record.is_consistent())
                .filter_map(|record| {
                    let entry = HistoryEntry {
                        id: record.id,
                        item_one: catalog.get(&record.item_one_id)?.summary(),
                        item_two: catalog.get(&record.item_two_id)?.summary(),
                        chosen: catalog.get(&record.chosen_id)?.summary(),
                        created_at: record.created_at,
                    };
                    Some(entry)
                })
                .collect::<Vec<_>>();

            if entries.len() < history.len() {
                warn!(
                    skipped = history.len() - entries.len(),
                    "history entries are inconsistent or reference missing items"
                );
            }
            Ok(entries)
        }
        .instrument(span)
        .await
    }

    /// Recommend unseen items related to what the user picks most.
    ///
    /// Steps run strictly in order: store-side aggregation of the top
    /// choices, fetch of those items, similarity expansion, exclusion of the
    /// user's opted-out ids, and a final fetch of the surviving candidates.
    /// Candidates not in the local catalog are dropped.
    pub async fn recommend(&self, user_id: &UserId) -> Result<RecommendationList, TasteError> {
        let span = info_span!("taste.recommend", taste.user_id = %user_id);

        async move {
            let user = self.require_user(user_id).await?;

            let seed = self
                .choices
                .count_chosen(user_id, self.limits.recommendation_seed as i64)
                .await?;
            let seed_ids: Vec<ItemId> = seed.iter().map(|t| t.item_id).collect();
            let seed_items = self.items.find_by_ids(&seed_ids).await?;

            let limit = self.limits.recommendation.min(RecommendationList::MAX_LEN);
            let related = similarity::related_candidates(&seed, &seed_items, limit);
            let candidates = exclusion::exclude(&related, &user.excluded_ids);
            debug!(
                seed = seed.len(),
                related = related.len(),
                after_exclusion = candidates.len(),
                "expanded recommendation candidates"
            );

            let mut by_external: HashMap<ExternalId, Item> = self
                .items
                .find_by_external_ids(&candidates)
                .await?
                .into_iter()
                .map(|item| (item.external_id, item))
                .collect();
            let items: Vec<Item> = candidates
                .iter()
                .filter_map(|id| by_external.remove(id))
                .collect();

            info!(recommended = items.len(), "computed recommendations");
            Ok(RecommendationList { items })
        }
        .instrument(span)
        .await
    }

    /// Motivation affinity over the user's full history.
    pub async fn motivation_report(
        &self,
        user_id: &UserId,
    ) -> Result<AffinityReport<Motivation>, TasteError> {
        let span = info_span!("taste.motivations", taste.user_id = %user_id);

        async move {
            let (history, catalog) = self.full_history(user_id).await?;
            let report = motivation::motivation_report(&motivation::resolve(&history, &catalog));
            info!(
                scored = report.records_scored,
                skipped = report.records_skipped,
                tags = report.percentages.len(),
                "scored motivations"
            );
            Ok(report)
        }
        .instrument(span)
        .await
    }

    /// Submotivation affinity plus the keyword query derived from it.
    pub async fn submotivation_report(
        &self,
        user_id: &UserId,
    ) -> Result<SubmotivationReport, TasteError> {
        let span = info_span!("taste.submotivations", taste.user_id = %user_id);

        async move {
            let (history, catalog) = self.full_history(user_id).await?;
            let report =
                motivation::submotivation_report(&motivation::resolve(&history, &catalog));
            let content_query =
                keywords::build_content_query(&report, self.limits.content_query_themes);
            info!(
                scored = report.records_scored,
                skipped = report.records_skipped,
                themes = content_query.themes.len(),
                "scored submotivations"
            );
            Ok(SubmotivationReport {
                report,
                content_query,
            })
        }
        .instrument(span)
        .await
    }

    /// Every user ranked by engagement count.
    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, TasteError> {
        let users = self
            .users
            .list()
            .instrument(info_span!("taste.leaderboard"))
            .await?;
        Ok(leaderboard::rank_users(users))
    }

    fn check_limit(&self, limit: Option<usize>) -> Result<usize, TasteError> {
        let limit = limit.unwrap_or(self.limits.top_choices);
        if limit == 0 || limit > self.limits.max_top_choices {
            return Err(TasteError::InvalidArgument(format!(
                "limit must be between 1 and {}, got {limit}",
                self.limits.max_top_choices
            )));
        }
        Ok(limit)
    }

    async fn require_user(&self, user_id: &UserId) -> Result<User, TasteError> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| TasteError::not_found("user", user_id))
    }

    async fn full_history(
        &self,
        user_id: &UserId,
    ) -> Result<(Vec<ChoiceRecord>, HashMap<ItemId, Item>), TasteError> {
        self.require_user(user_id).await?;
        let history = self
            .choices
            .list_for_user(user_id, ChoiceFilter::default())
            .await?;
        let catalog = self.history_catalog(&history).await?;
        Ok((history, catalog))
    }

    /// Every item referenced by `history`, keyed by id.
    async fn history_catalog(
        &self,
        history: &[ChoiceRecord],
    ) -> Result<HashMap<ItemId, Item>, TasteError> {
        let ids: HashSet<ItemId> = history
            .iter()
            .flat_map(|r| [r.item_one_id, r.item_two_id, r.chosen_id])
            .collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let ids: Vec<ItemId> = ids.into_iter().collect();
        Ok(index_by_id(self.items.find_by_ids(&ids).await?))
    }
}

fn index_by_id(items: Vec<Item>) -> HashMap<ItemId, Item> {
    items.into_iter().map(|item| (item.id, item)).collect()
}
