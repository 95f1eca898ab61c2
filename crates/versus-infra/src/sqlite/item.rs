//! SQLite catalog item repository implementation.

use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use versus_core::repository::SortOrder;
use versus_core::repository::item::{ItemFilter, ItemRepository};
use versus_types::error::RepositoryError;
use versus_types::id::{ExternalId, ItemId};
use versus_types::item::{Item, Motivation, Submotivation};

use super::pool::DatabasePool;
use super::{format_datetime, is_unique_violation, parse_datetime, placeholders, query_error};

/// SQLite-backed implementation of `ItemRepository`.
pub struct SqliteItemRepository {
    pool: DatabasePool,
}

impl SqliteItemRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    async fn fetch_items(
        &self,
        sql: &str,
        binds: Vec<String>,
    ) -> Result<Vec<Item>, RepositoryError> {
        let mut query = sqlx::query(sql);
        for value in binds {
            query = query.bind(value);
        }
        let rows = query.fetch_all(&self.pool.reader).await.map_err(query_error)?;
        rows_to_items(&rows)
    }
}

/// Internal row type for mapping SQLite rows to domain Item.
struct ItemRow {
    id: String,
    external_id: i64,
    name: String,
    slug: String,
    summary: Option<String>,
    tags: String,
    sub_tags: String,
    related_ids: String,
    cover_url: Option<String>,
    created_at: String,
    updated_at: String,
}

impl ItemRow {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            external_id: row.try_get("external_id")?,
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            summary: row.try_get("summary")?,
            tags: row.try_get("tags")?,
            sub_tags: row.try_get("sub_tags")?,
            related_ids: row.try_get("related_ids")?,
            cover_url: row.try_get("cover_url")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_item(self) -> Result<Item, RepositoryError> {
        let id = self
            .id
            .parse::<ItemId>()
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let external_id = ExternalId::from_i64(self.external_id)
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let tags: Vec<Motivation> = serde_json::from_str(&self.tags)
            .map_err(|e| RepositoryError::Query(format!("invalid tags JSON: {e}")))?;
        let sub_tags: Vec<Submotivation> = serde_json::from_str(&self.sub_tags)
            .map_err(|e| RepositoryError::Query(format!("invalid sub_tags JSON: {e}")))?;
        let related_ids: Vec<ExternalId> = serde_json::from_str(&self.related_ids)
            .map_err(|e| RepositoryError::Query(format!("invalid related_ids JSON: {e}")))?;

        Ok(Item {
            id,
            external_id,
            name: self.name,
            slug: self.slug,
            summary: self.summary,
            tags,
            sub_tags,
            related_ids,
            cover_url: self.cover_url,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

fn rows_to_items(rows: &[SqliteRow]) -> Result<Vec<Item>, RepositoryError> {
    rows.iter()
        .map(|row| ItemRow::from_row(row).map_err(query_error)?.into_item())
        .collect()
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, RepositoryError> {
    serde_json::to_string(value).map_err(|e| RepositoryError::Query(e.to_string()))
}

impl ItemRepository for SqliteItemRepository {
    async fn create(&self, item: &Item) -> Result<Item, RepositoryError> {
        let item = item.clone().normalized();

        let result = sqlx::query(
            "INSERT INTO items (id, external_id, name, slug, summary, tags, sub_tags, related_ids, cover_url, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(item.id.to_string())
        .bind(item.external_id.as_i64())
        .bind(&item.name)
        .bind(&item.slug)
        .bind(&item.summary)
        .bind(to_json(&item.tags)?)
        .bind(to_json(&item.sub_tags)?)
        .bind(to_json(&item.related_ids)?)
        .bind(&item.cover_url)
        .bind(format_datetime(&item.created_at))
        .bind(format_datetime(&item.updated_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(item),
            Err(e) if is_unique_violation(&e) => Err(RepositoryError::Conflict(format!(
                "item with external id {} already exists",
                item.external_id
            ))),
            Err(e) => Err(query_error(e)),
        }
    }

    async fn get_by_id(&self, id: &ItemId) -> Result<Option<Item>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM items WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        match row {
            Some(row) => Ok(Some(ItemRow::from_row(&row).map_err(query_error)?.into_item()?)),
            None => Ok(None),
        }
    }

    async fn get_by_external_id(
        &self,
        external_id: ExternalId,
    ) -> Result<Option<Item>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM items WHERE external_id = ?")
            .bind(external_id.as_i64())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        match row {
            Some(row) => Ok(Some(ItemRow::from_row(&row).map_err(query_error)?.into_item()?)),
            None => Ok(None),
        }
    }

    async fn find_by_ids(&self, ids: &[ItemId]) -> Result<Vec<Item>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!("SELECT * FROM items WHERE id IN ({})", placeholders(ids.len()));
        self.fetch_items(&sql, ids.iter().map(|id| id.to_string()).collect())
            .await
    }

    async fn find_by_external_ids(&self, ids: &[ExternalId]) -> Result<Vec<Item>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT * FROM items WHERE external_id IN ({})",
            placeholders(ids.len())
        );
        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(id.as_i64());
        }
        let rows = query.fetch_all(&self.pool.reader).await.map_err(query_error)?;
        rows_to_items(&rows)
    }

    async fn list(&self, filter: ItemFilter) -> Result<Vec<Item>, RepositoryError> {
        let order = match filter.sort_order {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };
        let mut sql = format!("SELECT * FROM items ORDER BY name {order}, external_id {order}");

        // SQLite requires a LIMIT before OFFSET
        match (filter.limit, filter.offset) {
            (Some(limit), Some(offset)) => sql.push_str(&format!(" LIMIT {limit} OFFSET {offset}")),
            (Some(limit), None) => sql.push_str(&format!(" LIMIT {limit}")),
            (None, Some(offset)) => sql.push_str(&format!(" LIMIT -1 OFFSET {offset}")),
            (None, None) => {}
        }

        self.fetch_items(&sql, Vec::new()).await
    }

    async fn random(&self, count: i64) -> Result<Vec<Item>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM items ORDER BY RANDOM() LIMIT ?")
            .bind(count)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;
        rows_to_items(&rows)
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(query_error)?;
        Ok(count)
    }
}
