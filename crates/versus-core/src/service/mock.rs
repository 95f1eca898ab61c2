//! In-memory repositories shared by the service tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use versus_types::choice::ChoiceRecord;
use versus_types::error::{ContentError, RepositoryError};
use versus_types::id::{ExternalId, ItemId, UserId};
use versus_types::item::{CatalogEntry, Item};
use versus_types::taste::TopChoice;
use versus_types::user::User;

use crate::content::provider::ContentProvider;
use crate::repository::SortOrder;
use crate::repository::choice::{ChoiceFilter, ChoiceRepository};
use crate::repository::item::{ItemFilter, ItemRepository};
use crate::repository::user::UserRepository;
use crate::taste::aggregate;

/// Backing store for the mock repositories. Clone the `Arc` to share it
/// between repositories handed to different services.
#[derive(Default)]
pub struct MemoryStore {
    pub users: Mutex<Vec<User>>,
    pub items: Mutex<Vec<Item>>,
    /// Oldest first, as appended.
    pub choices: Mutex<Vec<ChoiceRecord>>,
    /// When set, every repository call fails with a query error.
    pub fail: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(RepositoryError::Query("store unavailable".to_string()))
        } else {
            Ok(())
        }
    }

    pub fn add_item(&self, item: Item) -> Item {
        self.items.lock().unwrap().push(item.clone());
        item
    }

    pub fn add_user(&self, user: User) -> User {
        self.users.lock().unwrap().push(user.clone());
        user
    }

    pub fn push_choice(&self, record: ChoiceRecord) {
        self.choices.lock().unwrap().push(record);
    }

    pub fn user(&self, id: &UserId) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == *id).cloned()
    }
}

pub struct MockChoices(pub Arc<MemoryStore>);
pub struct MockItems(pub Arc<MemoryStore>);
pub struct MockUsers(pub Arc<MemoryStore>);

impl ChoiceRepository for MockChoices {
    async fn record_vote(&self, record: &ChoiceRecord) -> Result<(), RepositoryError> {
        self.0.check()?;
        let mut users = self.0.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == record.user_id)
            .ok_or(RepositoryError::NotFound)?;
        user.engagement_count += 1;
        self.0.choices.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        filter: ChoiceFilter,
    ) -> Result<Vec<ChoiceRecord>, RepositoryError> {
        self.0.check()?;
        let mut records: Vec<ChoiceRecord> = self
            .0
            .choices
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == *user_id)
            .cloned()
            .collect();
        if filter.sort_order.unwrap_or_default() == SortOrder::Desc {
            records.reverse();
        }
        let offset = filter.offset.unwrap_or(0) as usize;
        let limit = filter.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        Ok(records.into_iter().skip(offset).take(limit).collect())
    }

    async fn count_chosen(
        &self,
        user_id: &UserId,
        limit: i64,
    ) -> Result<Vec<TopChoice>, RepositoryError> {
        let history = self.list_for_user(user_id, ChoiceFilter::default()).await?;
        Ok(aggregate::top_choices(&history, limit as usize))
    }
}

impl ItemRepository for MockItems {
    async fn create(&self, item: &Item) -> Result<Item, RepositoryError> {
        self.0.check()?;
        let mut items = self.0.items.lock().unwrap();
        if items.iter().any(|i| i.external_id == item.external_id) {
            return Err(RepositoryError::Conflict(format!(
                "item with external id {} already exists",
                item.external_id
            )));
        }
        items.push(item.clone());
        Ok(item.clone())
    }

    async fn get_by_id(&self, id: &ItemId) -> Result<Option<Item>, RepositoryError> {
        self.0.check()?;
        Ok(self.0.items.lock().unwrap().iter().find(|i| i.id == *id).cloned())
    }

    async fn get_by_external_id(
        &self,
        external_id: ExternalId,
    ) -> Result<Option<Item>, RepositoryError> {
        self.0.check()?;
        Ok(self
            .0
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.external_id == external_id)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[ItemId]) -> Result<Vec<Item>, RepositoryError> {
        self.0.check()?;
        // Reverse store order so callers cannot rely on it.
        Ok(self
            .0
            .items
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|i| ids.contains(&i.id))
            .cloned()
            .collect())
    }

    async fn find_by_external_ids(&self, ids: &[ExternalId]) -> Result<Vec<Item>, RepositoryError> {
        self.0.check()?;
        Ok(self
            .0
            .items
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|i| ids.contains(&i.external_id))
            .cloned()
            .collect())
    }

    async fn list(&self, filter: ItemFilter) -> Result<Vec<Item>, RepositoryError> {
        self.0.check()?;
        let mut items = self.0.items.lock().unwrap().clone();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        if filter.sort_order == SortOrder::Desc {
            items.reverse();
        }
        let offset = filter.offset.unwrap_or(0) as usize;
        let limit = filter.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        Ok(items.into_iter().skip(offset).take(limit).collect())
    }

    async fn random(&self, count: i64) -> Result<Vec<Item>, RepositoryError> {
        self.0.check()?;
        Ok(self
            .0
            .items
            .lock()
            .unwrap()
            .iter()
            .take(count as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        self.0.check()?;
        Ok(self.0.items.lock().unwrap().len() as i64)
    }
}

impl UserRepository for MockUsers {
    async fn create(&self, user: &User) -> Result<User, RepositoryError> {
        self.0.check()?;
        let mut users = self.0.users.lock().unwrap();
        if users.iter().any(|u| u.username == user.username) {
            return Err(RepositoryError::Conflict(format!(
                "username '{}' is taken",
                user.username
            )));
        }
        users.push(user.clone());
        Ok(user.clone())
    }

    async fn get_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        self.0.check()?;
        Ok(self.0.user(id))
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        self.0.check()?;
        Ok(self
            .0
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        self.0.check()?;
        Ok(self.0.users.lock().unwrap().clone())
    }

    async fn set_about_me(&self, id: &UserId, about_me: Option<&str>) -> Result<(), RepositoryError> {
        self.with_user(id, |user| {
            user.about_me = about_me.map(str::to_string);
            true
        })
        .map(|_| ())
    }

    async fn add_excluded(&self, id: &UserId, external_id: ExternalId) -> Result<bool, RepositoryError> {
        self.with_user(id, |user| insert_unique(&mut user.excluded_ids, external_id))
    }

    async fn add_wishlist(&self, id: &UserId, external_id: ExternalId) -> Result<bool, RepositoryError> {
        self.with_user(id, |user| insert_unique(&mut user.wishlist_ids, external_id))
    }
}

impl MockUsers {
    fn with_user(
        &self,
        id: &UserId,
        update: impl FnOnce(&mut User) -> bool,
    ) -> Result<bool, RepositoryError> {
        self.0.check()?;
        let mut users = self.0.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == *id)
            .ok_or(RepositoryError::NotFound)?;
        Ok(update(user))
    }
}

fn insert_unique(ids: &mut Vec<ExternalId>, id: ExternalId) -> bool {
    if ids.contains(&id) {
        false
    } else {
        ids.push(id);
        true
    }
}

/// Content provider serving a fixed set of entries.
#[derive(Default)]
pub struct MockProvider {
    pub entries: HashMap<ExternalId, CatalogEntry>,
    pub searches: Mutex<Vec<Vec<String>>>,
    pub fail: bool,
}

impl MockProvider {
    pub fn with_entry(mut self, entry: CatalogEntry) -> Self {
        self.entries.insert(entry.external_id, entry);
        self
    }
}

impl ContentProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_by_ids(&self, ids: &[ExternalId]) -> Result<Vec<CatalogEntry>, ContentError> {
        if self.fail {
            return Err(ContentError::Timeout);
        }
        Ok(ids.iter().filter_map(|id| self.entries.get(id).cloned()).collect())
    }

    async fn search_by_keywords(
        &self,
        keywords: &[String],
        limit: u32,
    ) -> Result<Vec<CatalogEntry>, ContentError> {
        if self.fail {
            return Err(ContentError::Timeout);
        }
        self.searches.lock().unwrap().push(keywords.to_vec());
        Ok(self.entries.values().take(limit as usize).cloned().collect())
    }
}
