//! Choice history repository trait definition.

use versus_types::choice::ChoiceRecord;
use versus_types::error::RepositoryError;
use versus_types::id::UserId;
use versus_types::taste::TopChoice;

use super::SortOrder;

/// Filter criteria for listing a user's choices.
#[derive(Debug, Clone, Default)]
pub struct ChoiceFilter {
    /// Order by creation time. Defaults to newest first.
    pub sort_order: Option<SortOrder>,
    /// Maximum number of results. `None` returns the full history.
    pub limit: Option<i64>,
    /// Number of results to skip (offset pagination).
    pub offset: Option<i64>,
}

impl ChoiceFilter {
    /// The newest `limit` records.
    pub fn newest(limit: i64) -> Self {
        Self {
            sort_order: Some(SortOrder::Desc),
            limit: Some(limit),
            offset: None,
        }
    }
}

/// Repository trait for the append-only vote history.
///
/// Implementations live in versus-infra (e.g., SqliteChoiceRepository).
pub trait ChoiceRepository: Send + Sync {
    /// Append a vote and bump the voter's engagement count, atomically.
    fn record_vote(
        &self,
        record: &ChoiceRecord,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// List one user's choices.
    fn list_for_user(
        &self,
        user_id: &UserId,
        filter: ChoiceFilter,
    ) -> impl std::future::Future<Output = Result<Vec<ChoiceRecord>, RepositoryError>> + Send;

    /// Group the user's choices by chosen item and count them, store side.
    ///
    /// Same ordering as [`crate::taste::aggregate::top_choices`] over the
    /// newest-first history: count descending, ties to the item chosen most
    /// recently.
    fn count_chosen(
        &self,
        user_id: &UserId,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<TopChoice>, RepositoryError>> + Send;
}
