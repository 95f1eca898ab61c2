//! Pairwise voting: drawing a pair and recording the pick.

use tracing::{debug, info};
use versus_types::choice::{ChoiceRecord, VoteRequest};
use versus_types::error::TasteError;
use versus_types::id::UserId;
use versus_types::item::Item;

use crate::repository::choice::ChoiceRepository;
use crate::repository::item::ItemRepository;
use crate::repository::user::UserRepository;

/// Draws attempted before giving up on finding two distinct items.
pub const MAX_PAIR_ATTEMPTS: usize = 5;

/// Service that owns the only write path into the choice history.
pub struct VoteService<C: ChoiceRepository, I: ItemRepository, U: UserRepository> {
    choices: C,
    items: I,
    users: U,
}

impl<C: ChoiceRepository, I: ItemRepository, U: UserRepository> VoteService<C, I, U> {
    pub fn new(choices: C, items: I, users: U) -> Self {
        Self {
            choices,
            items,
            users,
        }
    }

    /// Two distinct random catalog items to vote between.
    pub async fn battle_pair(&self) -> Result<(Item, Item), TasteError> {
        let available = self.items.count().await?;
        if available < 2 {
            return Err(TasteError::InvalidArgument(format!(
                "a battle needs at least two catalog items, found {available}"
            )));
        }

        for attempt in 1..=MAX_PAIR_ATTEMPTS {
            let drawn = self.items.random(2).await?;
            if let [one, two] = drawn.as_slice() {
                if one.id != two.id {
                    return Ok((one.clone(), two.clone()));
                }
            }
            debug!(attempt, "redrawing battle pair");
        }

        Err(TasteError::Upstream(format!(
            "could not draw two distinct items in {MAX_PAIR_ATTEMPTS} attempts"
        )))
    }

    /// Validate and append one vote, bumping the voter's engagement count.
    ///
    /// The shape of the vote is checked before any store access; the user and
    /// both shown items must exist.
    pub async fn record_vote(
        &self,
        user_id: &UserId,
        request: VoteRequest,
    ) -> Result<ChoiceRecord, TasteError> {
        let record = ChoiceRecord::new(
            *user_id,
            request.item_one_id,
            request.item_two_id,
            request.chosen_id,
        )?;

        if self.users.get_by_id(user_id).await?.is_none() {
            return Err(TasteError::not_found("user", user_id));
        }
        for item_id in [record.item_one_id, record.item_two_id] {
            if self.items.get_by_id(&item_id).await?.is_none() {
                return Err(TasteError::not_found("item", item_id));
            }
        }

        self.choices.record_vote(&record).await?;
        info!(
            user_id = %user_id,
            chosen_id = %record.chosen_id,
            "recorded vote"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::mock::{MemoryStore, MockChoices, MockItems, MockUsers};
    use crate::taste::fixtures::item;
    use chrono::Utc;
    use std::sync::Arc;
    use versus_types::id::ItemId;
    use versus_types::user::User;

    fn service(store: &Arc<MemoryStore>) -> VoteService<MockChoices, MockItems, MockUsers> {
        VoteService::new(
            MockChoices(store.clone()),
            MockItems(store.clone()),
            MockUsers(store.clone()),
        )
    }

    fn user() -> User {
        let now = Utc::now();
        User {
            id: UserId::new(),
            username: "voter".to_string(),
            first_name: "Vo".to_string(),
            last_name: "Ter".to_string(),
            profile_pic: None,
            about_me: None,
            excluded_ids: Vec::new(),
            wishlist_ids: Vec::new(),
            engagement_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_record_vote_appends_and_counts() {
        let store = MemoryStore::new();
        let u = store.add_user(user());
        let a = store.add_item(item(1, "A"));
        let b = store.add_item(item(2, "B"));

        let record = service(&store)
            .record_vote(
                &u.id,
                VoteRequest {
                    item_one_id: a.id,
                    item_two_id: b.id,
                    chosen_id: b.id,
                },
            )
            .await
            .unwrap();

        assert_eq!(record.chosen_id, b.id);
        assert_eq!(store.choices.lock().unwrap().len(), 1);
        assert_eq!(store.user(&u.id).unwrap().engagement_count, 1);
    }

    #[tokio::test]
    async fn test_record_vote_rejects_foreign_choice() {
        let store = MemoryStore::new();
        let u = store.add_user(user());
        let a = store.add_item(item(1, "A"));
        let b = store.add_item(item(2, "B"));

        let err = service(&store)
            .record_vote(
                &u.id,
                VoteRequest {
                    item_one_id: a.id,
                    item_two_id: b.id,
                    chosen_id: ItemId::new(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, TasteError::InvalidArgument(_)));
        assert!(store.choices.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_record_vote_unknown_item() {
        let store = MemoryStore::new();
        let u = store.add_user(user());
        let a = store.add_item(item(1, "A"));
        let ghost = ItemId::new();

        let err = service(&store)
            .record_vote(
                &u.id,
                VoteRequest {
                    item_one_id: a.id,
                    item_two_id: ghost,
                    chosen_id: a.id,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, TasteError::NotFound { entity: "item", .. }));
    }

    #[tokio::test]
    async fn test_record_vote_unknown_user() {
        let store = MemoryStore::new();
        let a = store.add_item(item(1, "A"));
        let b = store.add_item(item(2, "B"));

        let err = service(&store)
            .record_vote(
                &UserId::new(),
                VoteRequest {
                    item_one_id: a.id,
                    item_two_id: b.id,
                    chosen_id: a.id,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, TasteError::NotFound { entity: "user", .. }));
    }

    #[tokio::test]
    async fn test_battle_pair_is_distinct() {
        let store = MemoryStore::new();
        store.add_item(item(1, "A"));
        store.add_item(item(2, "B"));
        store.add_item(item(3, "C"));

        let (one, two) = service(&store).battle_pair().await.unwrap();
        assert_ne!(one.id, two.id);
    }

    #[tokio::test]
    async fn test_battle_pair_needs_two_items() {
        let store = MemoryStore::new();
        store.add_item(item(1, "Lonely"));

        let err = service(&store).battle_pair().await.unwrap_err();
        assert!(matches!(err, TasteError::InvalidArgument(_)));
    }
}
