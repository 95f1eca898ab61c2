//! User repository trait definition.

use versus_types::error::RepositoryError;
use versus_types::id::{ExternalId, UserId};
use versus_types::user::User;

/// Repository trait for user profiles and their per-user id sets.
pub trait UserRepository: Send + Sync {
    /// Insert a new user. A taken username is a `Conflict`.
    fn create(
        &self,
        user: &User,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &UserId,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    fn get_by_username(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// All users in creation order.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<User>, RepositoryError>> + Send;

    /// Replace the profile blurb. `NotFound` if the user does not exist.
    fn set_about_me(
        &self,
        id: &UserId,
        about_me: Option<&str>,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Add to the user's excluded set. Returns `false` if it was already there.
    fn add_excluded(
        &self,
        id: &UserId,
        external_id: ExternalId,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Add to the user's wishlist. Returns `false` if it was already there.
    fn add_wishlist(
        &self,
        id: &UserId,
        external_id: ExternalId,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}
