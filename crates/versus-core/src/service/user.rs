//! User profile service: registration, exclusions, wishlist and "about me".

use std::collections::HashMap;

use chrono::Utc;
use tracing::info;
use versus_types::error::TasteError;
use versus_types::id::{ExternalId, UserId};
use versus_types::item::Item;
use versus_types::user::{CreateUserRequest, User};

use crate::repository::item::ItemRepository;
use crate::repository::user::UserRepository;

pub struct UserService<U: UserRepository, I: ItemRepository> {
    users: U,
    items: I,
}

impl<U: UserRepository, I: ItemRepository> UserService<U, I> {
    pub fn new(users: U, items: I) -> Self {
        Self { users, items }
    }

    /// Register a new user. Usernames are unique.
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User, TasteError> {
        request.validate().map_err(TasteError::InvalidArgument)?;

        if self.users.get_by_username(&request.username).await?.is_some() {
            return Err(TasteError::Conflict(format!(
                "username '{}' is already taken",
                request.username
            )));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username: request.username,
            first_name: request.first_name,
            last_name: request.last_name,
            profile_pic: request.profile_pic,
            about_me: None,
            excluded_ids: Vec::new(),
            wishlist_ids: Vec::new(),
            engagement_count: 0,
            created_at: now,
            updated_at: now,
        };

        let user = self.users.create(&user).await?;
        info!(user_id = %user.id, username = %user.username, "created user");
        Ok(user)
    }

    pub async fn get_user(&self, id: &UserId) -> Result<User, TasteError> {
        self.users
            .get_by_id(id)
            .await?
            .ok_or_else(|| TasteError::not_found("user", id))
    }

    pub async fn get_by_username(&self, username: &str) -> Result<User, TasteError> {
        self.users
            .get_by_username(username)
            .await?
            .ok_or_else(|| TasteError::not_found("user", username))
    }

    /// Never recommend `external_id` to this user again. Idempotent; returns
    /// whether the id was newly added.
    pub async fn exclude_item(
        &self,
        id: &UserId,
        external_id: ExternalId,
    ) -> Result<bool, TasteError> {
        self.get_user(id).await?;
        let added = self.users.add_excluded(id, external_id).await?;
        info!(user_id = %id, external_id = external_id.get(), added, "excluded item");
        Ok(added)
    }

    /// Add `external_id` to the user's wishlist. Idempotent; returns whether
    /// the id was newly added.
    pub async fn add_to_wishlist(
        &self,
        id: &UserId,
        external_id: ExternalId,
    ) -> Result<bool, TasteError> {
        self.get_user(id).await?;
        let added = self.users.add_wishlist(id, external_id).await?;
        info!(user_id = %id, external_id = external_id.get(), added, "wishlisted item");
        Ok(added)
    }

    /// Catalog items on the user's wishlist, in the order they were added.
    /// Ids not in the local catalog are left out.
    pub async fn wishlist(&self, username: &str) -> Result<Vec<Item>, TasteError> {
        let user = self.get_by_username(username).await?;
        if user.wishlist_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut by_external: HashMap<ExternalId, Item> = self
            .items
            .find_by_external_ids(&user.wishlist_ids)
            .await?
            .into_iter()
            .map(|item| (item.external_id, item))
            .collect();

        Ok(user
            .wishlist_ids
            .iter()
            .filter_map(|id| by_external.remove(id))
            .collect())
    }

    pub async fn about_me(&self, id: &UserId) -> Result<Option<String>, TasteError> {
        Ok(self.get_user(id).await?.about_me)
    }

    /// Replace the profile blurb. Blank text clears it.
    pub async fn set_about_me(
        &self,
        id: &UserId,
        about_me: Option<String>,
    ) -> Result<Option<String>, TasteError> {
        self.get_user(id).await?;
        let about_me = about_me
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
        self.users.set_about_me(id, about_me.as_deref()).await?;
        Ok(about_me)
    }
}
