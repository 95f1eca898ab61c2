//! Catalog item repository trait definition.

use versus_types::error::RepositoryError;
use versus_types::id::{ExternalId, ItemId};
use versus_types::item::Item;

use super::SortOrder;

/// Filter criteria for listing items. Items are listed by name.
#[derive(Debug, Clone)]
pub struct ItemFilter {
    pub sort_order: SortOrder,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Default for ItemFilter {
    fn default() -> Self {
        Self {
            sort_order: SortOrder::Asc,
            limit: None,
            offset: None,
        }
    }
}

/// Repository trait for catalog items.
pub trait ItemRepository: Send + Sync {
    /// Insert a new item. A duplicate external id is a `Conflict`.
    fn create(
        &self,
        item: &Item,
    ) -> impl std::future::Future<Output = Result<Item, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &ItemId,
    ) -> impl std::future::Future<Output = Result<Option<Item>, RepositoryError>> + Send;

    fn get_by_external_id(
        &self,
        external_id: ExternalId,
    ) -> impl std::future::Future<Output = Result<Option<Item>, RepositoryError>> + Send;

    /// Fetch the items with the given ids, in no particular order. Unknown
    /// ids are ignored.
    fn find_by_ids(
        &self,
        ids: &[ItemId],
    ) -> impl std::future::Future<Output = Result<Vec<Item>, RepositoryError>> + Send;

    /// Fetch the items with the given external ids, in no particular order.
    /// Unknown ids are ignored.
    fn find_by_external_ids(
        &self,
        ids: &[ExternalId],
    ) -> impl std::future::Future<Output = Result<Vec<Item>, RepositoryError>> + Send;

    fn list(
        &self,
        filter: ItemFilter,
    ) -> impl std::future::Future<Output = Result<Vec<Item>, RepositoryError>> + Send;

    /// Up to `count` items picked at random by the store.
    fn random(
        &self,
        count: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Item>, RepositoryError>> + Send;

    fn count(&self) -> impl std::future::Future<Output = Result<i64, RepositoryError>> + Send;
}
