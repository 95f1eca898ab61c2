//! Catalog service: browsing local items and importing new ones from the
//! remote content provider.

use tracing::{Instrument, info, info_span};
use versus_types::error::TasteError;
use versus_types::id::{ExternalId, ItemId};
use versus_types::item::{CatalogEntry, Item};
use versus_types::taste::ContentQuery;

use crate::content::provider::ContentProvider;
use crate::repository::item::{ItemFilter, ItemRepository};

/// Number of candidates a keyword search returns by default.
pub const DEFAULT_CANDIDATE_LIMIT: u32 = 10;

pub struct CatalogService<I: ItemRepository, P: ContentProvider> {
    items: I,
    provider: P,
}

impl<I: ItemRepository, P: ContentProvider> CatalogService<I, P> {
    pub fn new(items: I, provider: P) -> Self {
        Self { items, provider }
    }

    /// Local items sorted by name.
    pub async fn list_items(&self, filter: ItemFilter) -> Result<Vec<Item>, TasteError> {
        Ok(self.items.list(filter).await?)
    }

    pub async fn get_item(&self, id: &ItemId) -> Result<Item, TasteError> {
        self.items
            .get_by_id(id)
            .await?
            .ok_or_else(|| TasteError::not_found("item", id))
    }

    /// Fetch an item from the content provider and add it to the catalog.
    ///
    /// Fails with `Conflict` if the external id is already imported and with
    /// `NotFound` if the provider does not know it.
    pub async fn import_item(&self, external_id: ExternalId) -> Result<Item, TasteError> {
        let span = info_span!(
            "catalog.import",
            catalog.external_id = external_id.get(),
            catalog.provider = self.provider.name(),
        );

        async move {
            if self.items.get_by_external_id(external_id).await?.is_some() {
                return Err(TasteError::Conflict(format!(
                    "item with external id {external_id} is already in the catalog"
                )));
            }

            let entry = self
                .provider
                .fetch_by_ids(&[external_id])
                .await?
                .into_iter()
                .find(|e| e.external_id == external_id)
                .ok_or_else(|| TasteError::not_found("catalog entry", external_id))?;

            let item = self.items.create(&entry.into_item()).await?;
            info!(item_id = %item.id, name = %item.name, "imported item");
            Ok(item)
        }
        .instrument(span)
        .await
    }

    /// Run a keyword query against the content provider.
    ///
    /// An empty query returns no candidates without calling the provider.
    pub async fn source_candidates(
        &self,
        query: &ContentQuery,
        limit: u32,
    ) -> Result<Vec<CatalogEntry>, TasteError> {
        if query.keywords.is_empty() {
            return Ok(Vec::new());
        }
        let span = info_span!(
            "catalog.search",
            catalog.provider = self.provider.name(),
            catalog.keywords = query.keywords.len(),
        );
        Ok(self
            .provider
            .search_by_keywords(&query.keywords, limit)
            .instrument(span)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::mock::{MemoryStore, MockItems, MockProvider};
    use crate::taste::fixtures::{ext, item};
    use versus_types::item::{Motivation, Submotivation};

    fn entry(id: u64, name: &str) -> CatalogEntry {
        CatalogEntry {
            external_id: ext(id),
            name: name.to_string(),
            slug: None,
            summary: Some("A game".to_string()),
            tags: vec![Motivation::new("story").unwrap()],
            sub_tags: vec![Submotivation::new("discovery").unwrap()],
            related_ids: vec![ext(7), ext(7), ext(8)],
            cover_image_id: Some("co1abc".to_string()),
        }
    }

    #[tokio::test]
    async fn test_import_item_builds_local_item() {
        let store = MemoryStore::new();
        let provider = MockProvider::default().with_entry(entry(42, "Outer Wilds"));
        let svc = CatalogService::new(MockItems(store.clone()), provider);

        let imported = svc.import_item(ext(42)).await.unwrap();
        assert_eq!(imported.slug, "outer-wilds");
        assert_eq!(imported.related_ids, vec![ext(7), ext(8)]);
        assert_eq!(
            imported.cover_url.as_deref(),
            Some("https://images.igdb.com/igdb/image/upload/t_720p/co1abc.jpg")
        );
        assert_eq!(svc.get_item(&imported.id).await.unwrap().name, "Outer Wilds");
    }

    #[tokio::test]
    async fn test_import_duplicate_is_conflict() {
        let store = MemoryStore::new();
        store.add_item(item(42, "Outer Wilds"));
        let provider = MockProvider::default().with_entry(entry(42, "Outer Wilds"));
        let svc = CatalogService::new(MockItems(store), provider);

        let err = svc.import_item(ext(42)).await.unwrap_err();
        assert!(matches!(err, TasteError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_import_unknown_external_id() {
        let svc = CatalogService::new(MockItems(MemoryStore::new()), MockProvider::default());
        let err = svc.import_item(ext(5)).await.unwrap_err();
        assert!(matches!(err, TasteError::NotFound { entity: "catalog entry", .. }));
    }

    #[tokio::test]
    async fn test_provider_failure_is_upstream() {
        let provider = MockProvider {
            fail: true,
            ..Default::default()
        };
        let svc = CatalogService::new(MockItems(MemoryStore::new()), provider);
        let err = svc.import_item(ext(5)).await.unwrap_err();
        assert!(matches!(err, TasteError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_list_items_sorted_by_name() {
        let store = MemoryStore::new();
        store.add_item(item(1, "Zelda"));
        store.add_item(item(2, "Celeste"));
        store.add_item(item(3, "Hades"));
        let svc = CatalogService::new(MockItems(store), MockProvider::default());

        let names: Vec<String> = svc
            .list_items(ItemFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["Celeste", "Hades", "Zelda"]);
    }

    #[tokio::test]
    async fn test_source_candidates_passes_keywords() {
        let provider = MockProvider::default().with_entry(entry(1, "Subnautica"));
        let svc = CatalogService::new(MockItems(MemoryStore::new()), provider);
        let query = ContentQuery {
            themes: vec![Submotivation::new("discovery").unwrap()],
            keywords: vec!["discovery".to_string(), "exploration".to_string()],
        };

        let found = svc
            .source_candidates(&query, DEFAULT_CANDIDATE_LIMIT)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(
            svc.provider.searches.lock().unwrap()[0],
            vec!["discovery", "exploration"]
        );
    }

    #[tokio::test]
    async fn test_empty_query_skips_provider() {
        let svc = CatalogService::new(MockItems(MemoryStore::new()), MockProvider::default());
        let found = svc
            .source_candidates(&ContentQuery::default(), DEFAULT_CANDIDATE_LIMIT)
            .await
            .unwrap();
        assert!(found.is_empty());
        assert!(svc.provider.searches.lock().unwrap().is_empty());
    }
}
