//! Content provider trait: batch access to the remote item catalog.

use versus_types::error::ContentError;
use versus_types::id::ExternalId;
use versus_types::item::CatalogEntry;

/// Remote catalog the local item table is imported from.
///
/// Implementations live in versus-infra (e.g., IgdbContentProvider). No
/// implementation retries; a failed call surfaces as a `ContentError`.
pub trait ContentProvider: Send + Sync {
    /// Human-readable provider name for logging.
    fn name(&self) -> &str;

    /// Fetch catalog entries by external id. Unknown ids are omitted.
    fn fetch_by_ids(
        &self,
        ids: &[ExternalId],
    ) -> impl std::future::Future<Output = Result<Vec<CatalogEntry>, ContentError>> + Send;

    /// Search entries matching any of `keywords`, at most `limit` of them.
    fn search_by_keywords(
        &self,
        keywords: &[String],
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<CatalogEntry>, ContentError>> + Send;
}
