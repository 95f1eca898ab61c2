//! SQLite user repository implementation.
//!
//! Excluded and wishlist ids live in their own tables keyed by
//! `(user_id, external_id)`; insertion order is kept via `rowid`.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use versus_core::repository::user::UserRepository;
use versus_types::error::RepositoryError;
use versus_types::id::{ExternalId, UserId};
use versus_types::user::User;

use super::pool::DatabasePool;
use super::{format_datetime, is_unique_violation, parse_datetime, query_error};

/// Per-user id set tables.
#[derive(Debug, Clone, Copy)]
enum IdSet {
    Excluded,
    Wishlist,
}

impl IdSet {
    fn table(self) -> &'static str {
        match self {
            IdSet::Excluded => "user_excluded",
            IdSet::Wishlist => "user_wishlist",
        }
    }
}

/// SQLite-backed implementation of `UserRepository`.
pub struct SqliteUserRepository {
    pool: DatabasePool,
}

impl SqliteUserRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Ids in `set` for every user, in insertion order.
    async fn load_sets(
        &self,
        set: IdSet,
        user_id: Option<&UserId>,
    ) -> Result<HashMap<String, Vec<ExternalId>>, RepositoryError> {
        let table = set.table();
        let rows = match user_id {
            Some(id) => {
                sqlx::query(&format!(
                    "SELECT user_id, external_id FROM {table} WHERE user_id = ? ORDER BY rowid"
                ))
                .bind(id.to_string())
                .fetch_all(&self.pool.reader)
                .await
            }
            None => {
                sqlx::query(&format!(
                    "SELECT user_id, external_id FROM {table} ORDER BY rowid"
                ))
                .fetch_all(&self.pool.reader)
                .await
            }
        }
        .map_err(query_error)?;

        let mut sets: HashMap<String, Vec<ExternalId>> = HashMap::new();
        for row in &rows {
            let user_id: String = row.try_get("user_id").map_err(query_error)?;
            let raw: i64 = row.try_get("external_id").map_err(query_error)?;
            let external_id =
                ExternalId::from_i64(raw).map_err(|e| RepositoryError::Query(e.to_string()))?;
            sets.entry(user_id).or_default().push(external_id);
        }
        Ok(sets)
    }

    async fn get_where(&self, column: &str, value: String) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query(&format!("SELECT * FROM users WHERE {column} = ?"))
            .bind(value)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut user = row_to_user(&row)?;
        user.excluded_ids = self
            .load_sets(IdSet::Excluded, Some(&user.id))
            .await?
            .remove(&user.id.to_string())
            .unwrap_or_default();
        user.wishlist_ids = self
            .load_sets(IdSet::Wishlist, Some(&user.id))
            .await?
            .remove(&user.id.to_string())
            .unwrap_or_default();
        Ok(Some(user))
    }

    async fn add_to_set(
        &self,
        set: IdSet,
        id: &UserId,
        external_id: ExternalId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(&format!(
            "INSERT OR IGNORE INTO {} (user_id, external_id, created_at) VALUES (?, ?, ?)",
            set.table()
        ))
        .bind(id.to_string())
        .bind(external_id.as_i64())
        .bind(format_datetime(&Utc::now()))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.message().contains("FOREIGN KEY") => {
                RepositoryError::NotFound
            }
            other => query_error(other),
        })?;

        Ok(result.rows_affected() > 0)
    }
}

/// Map a `users` row; id sets are filled in by the caller.
fn row_to_user(row: &SqliteRow) -> Result<User, RepositoryError> {
    let id: String = row.try_get("id").map_err(query_error)?;
    let created_at: String = row.try_get("created_at").map_err(query_error)?;
    let updated_at: String = row.try_get("updated_at").map_err(query_error)?;

    Ok(User {
        id: id
            .parse::<UserId>()
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        username: row.try_get("username").map_err(query_error)?,
        first_name: row.try_get("first_name").map_err(query_error)?,
        last_name: row.try_get("last_name").map_err(query_error)?,
        profile_pic: row.try_get("profile_pic").map_err(query_error)?,
        about_me: row.try_get("about_me").map_err(query_error)?,
        excluded_ids: Vec::new(),
        wishlist_ids: Vec::new(),
        engagement_count: row.try_get("engagement_count").map_err(query_error)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &User) -> Result<User, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO users (id, username, first_name, last_name, profile_pic, about_me, engagement_count, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.profile_pic)
        .bind(&user.about_me)
        .bind(user.engagement_count)
        .bind(format_datetime(&user.created_at))
        .bind(format_datetime(&user.updated_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(RepositoryError::Conflict(format!(
                    "username '{}' already exists",
                    user.username
                )));
            }
            Err(e) => return Err(query_error(e)),
        }

        for id in &user.excluded_ids {
            self.add_to_set(IdSet::Excluded, &user.id, *id).await?;
        }
        for id in &user.wishlist_ids {
            self.add_to_set(IdSet::Wishlist, &user.id, *id).await?;
        }

        Ok(user.clone())
    }

    async fn get_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        self.get_where("id", id.to_string()).await
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        self.get_where("username", username.to_string()).await
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM users ORDER BY created_at ASC, rowid ASC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        let mut excluded = self.load_sets(IdSet::Excluded, None).await?;
        let mut wishlist = self.load_sets(IdSet::Wishlist, None).await?;

        rows.iter()
            .map(|row| {
                let mut user = row_to_user(row)?;
                let key = user.id.to_string();
                user.excluded_ids = excluded.remove(&key).unwrap_or_default();
                user.wishlist_ids = wishlist.remove(&key).unwrap_or_default();
                Ok(user)
            })
            .collect()
    }

    async fn set_about_me(&self, id: &UserId, about_me: Option<&str>) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE users SET about_me = ?, updated_at = ? WHERE id = ?")
            .bind(about_me)
            .bind(format_datetime(&Utc::now()))
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn add_excluded(&self, id: &UserId, external_id: ExternalId) -> Result<bool, RepositoryError> {
        self.add_to_set(IdSet::Excluded, id, external_id).await
    }

    async fn add_wishlist(&self, id: &UserId, external_id: ExternalId) -> Result<bool, RepositoryError> {
        self.add_to_set(IdSet::Wishlist, id, external_id).await
    }
}
