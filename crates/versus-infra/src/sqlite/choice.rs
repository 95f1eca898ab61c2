//! SQLite choice history repository implementation.

use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use versus_core::repository::SortOrder;
use versus_core::repository::choice::{ChoiceFilter, ChoiceRepository};
use versus_types::choice::ChoiceRecord;
use versus_types::error::RepositoryError;
use versus_types::id::{ChoiceId, ItemId, UserId};
use versus_types::taste::TopChoice;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, query_error};

/// SQLite-backed implementation of `ChoiceRepository`.
pub struct SqliteChoiceRepository {
    pool: DatabasePool,
}

impl SqliteChoiceRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn parse_id<T: std::str::FromStr>(value: &str) -> Result<T, RepositoryError>
where
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| RepositoryError::Query(e.to_string()))
}

fn row_to_choice(row: &SqliteRow) -> Result<ChoiceRecord, RepositoryError> {
    let id: String = row.try_get("id").map_err(query_error)?;
    let user_id: String = row.try_get("user_id").map_err(query_error)?;
    let item_one_id: String = row.try_get("item_one_id").map_err(query_error)?;
    let item_two_id: String = row.try_get("item_two_id").map_err(query_error)?;
    let chosen_id: String = row.try_get("chosen_id").map_err(query_error)?;
    let created_at: String = row.try_get("created_at").map_err(query_error)?;

    Ok(ChoiceRecord {
        id: parse_id::<ChoiceId>(&id)?,
        user_id: parse_id::<UserId>(&user_id)?,
        item_one_id: parse_id::<ItemId>(&item_one_id)?,
        item_two_id: parse_id::<ItemId>(&item_two_id)?,
        chosen_id: parse_id::<ItemId>(&chosen_id)?,
        created_at: parse_datetime(&created_at)?,
    })
}

impl ChoiceRepository for SqliteChoiceRepository {
    async fn record_vote(&self, record: &ChoiceRecord) -> Result<(), RepositoryError> {
        // INSERT choice + UPDATE users.engagement_count in one transaction
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        sqlx::query(
            "INSERT INTO choices (id, user_id, item_one_id, item_two_id, chosen_id, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(record.id.to_string())
        .bind(record.user_id.to_string())
        .bind(record.item_one_id.to_string())
        .bind(record.item_two_id.to_string())
        .bind(record.chosen_id.to_string())
        .bind(format_datetime(&record.created_at))
        .execute(&mut *tx)
        .await
        .map_err(query_error)?;

        let updated = sqlx::query(
            "UPDATE users SET engagement_count = engagement_count + 1, updated_at = ? WHERE id = ?",
        )
        .bind(format_datetime(&record.created_at))
        .bind(record.user_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(query_error)?;

        if updated.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await.map_err(query_error)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        filter: ChoiceFilter,
    ) -> Result<Vec<ChoiceRecord>, RepositoryError> {
        let order = match filter.sort_order.unwrap_or_default() {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };
        let mut sql = format!(
            "SELECT * FROM choices WHERE user_id = ? ORDER BY created_at {order}, id {order}"
        );
        match (filter.limit, filter.offset) {
            (Some(limit), Some(offset)) => sql.push_str(&format!(" LIMIT {limit} OFFSET {offset}")),
            (Some(limit), None) => sql.push_str(&format!(" LIMIT {limit}")),
            (None, Some(offset)) => sql.push_str(&format!(" LIMIT -1 OFFSET {offset}")),
            (None, None) => {}
        }

        let rows = sqlx::query(&sql)
            .bind(user_id.to_string())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        rows.iter().map(row_to_choice).collect()
    }

    async fn count_chosen(
        &self,
        user_id: &UserId,
        limit: i64,
    ) -> Result<Vec<TopChoice>, RepositoryError> {
        // Ties go to the item chosen most recently, matching a first-seen
        // scan of the newest-first history.
        let rows = sqlx::query(
            "SELECT chosen_id, COUNT(*) AS chosen_count, MAX(created_at) AS last_chosen, MAX(id) AS last_id
             FROM choices
             WHERE user_id = ?
             GROUP BY chosen_id
             ORDER BY chosen_count DESC, last_chosen DESC, last_id DESC
             LIMIT ?",
        )
        .bind(user_id.to_string())
        .bind(limit)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_error)?;

        rows.iter()
            .map(|row| {
                let chosen_id: String = row.try_get("chosen_id").map_err(query_error)?;
                let count: i64 = row.try_get("chosen_count").map_err(query_error)?;
                Ok(TopChoice {
                    item_id: parse_id::<ItemId>(&chosen_id)?,
                    count: count as u32,
                })
            })
            .collect()
    }
}
