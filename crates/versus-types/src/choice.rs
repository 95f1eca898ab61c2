use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TasteError;
use crate::id::{ChoiceId, ItemId, UserId};

/// One pairwise vote: two items were shown and one of them was chosen.
///
/// Append-only; never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceRecord {
    pub id: ChoiceId,
    pub user_id: UserId,
    pub item_one_id: ItemId,
    pub item_two_id: ItemId,
    pub chosen_id: ItemId,
    pub created_at: DateTime<Utc>,
}

impl ChoiceRecord {
    /// Create a new record, enforcing that the chosen item is one of two
    /// distinct shown items.
    pub fn new(
        user_id: UserId,
        item_one_id: ItemId,
        item_two_id: ItemId,
        chosen_id: ItemId,
    ) -> Result<Self, TasteError> {
        if item_one_id == item_two_id {
            return Err(TasteError::InvalidArgument(
                "a choice must show two different items".to_string(),
            ));
        }
        let record = Self {
            id: ChoiceId::new(),
            user_id,
            item_one_id,
            item_two_id,
            chosen_id,
            created_at: Utc::now(),
        };
        if !record.is_consistent() {
            return Err(TasteError::InvalidArgument(format!(
                "chosen item {chosen_id} was not one of the shown items"
            )));
        }
        Ok(record)
    }

    /// Whether `chosen_id` is one of the two shown items.
    pub fn is_consistent(&self) -> bool {
        self.chosen_id == self.item_one_id || self.chosen_id == self.item_two_id
    }
}

/// Request body for recording a vote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRequest {
    pub item_one_id: ItemId,
    pub item_two_id: ItemId,
    pub chosen_id: ItemId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_either_shown_item() {
        let (a, b) = (ItemId::new(), ItemId::new());
        let first = ChoiceRecord::new(UserId::new(), a, b, a).unwrap();
        assert!(first.is_consistent());

        let second = ChoiceRecord::new(UserId::new(), a, b, b).unwrap();
        assert_eq!(second.chosen_id, b);
    }

    #[test]
    fn test_new_rejects_foreign_choice() {
        let err = ChoiceRecord::new(UserId::new(), ItemId::new(), ItemId::new(), ItemId::new())
            .unwrap_err();
        assert!(matches!(err, TasteError::InvalidArgument(_)));
    }

    #[test]
    fn test_new_rejects_same_item_twice() {
        let a = ItemId::new();
        let err = ChoiceRecord::new(UserId::new(), a, a, a).unwrap_err();
        assert!(err.to_string().contains("two different items"));
    }

    #[test]
    fn test_inconsistent_record_detected() {
        let (a, b) = (ItemId::new(), ItemId::new());
        let mut record = ChoiceRecord::new(UserId::new(), a, b, a).unwrap();
        record.chosen_id = ItemId::new();
        assert!(!record.is_consistent());
    }
}
