//! Query parameter extractors for list endpoints.

use serde::Deserialize;
use versus_core::repository::SortOrder;
use versus_core::repository::item::ItemFilter;

use crate::http::error::AppError;

/// Query parameters for the item list endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct ItemListQuery {
    /// Sort order by name (asc, desc).
    #[serde(default = "default_order")]
    pub order: String,
    /// Maximum results.
    pub limit: Option<i64>,
    /// Offset for pagination.
    pub offset: Option<i64>,
}

fn default_order() -> String {
    "asc".to_string()
}

impl ItemListQuery {
    pub fn into_filter(self) -> Result<ItemFilter, AppError> {
        let sort_order = match self.order.to_lowercase().as_str() {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            other => {
                return Err(AppError::Validation(format!(
                    "order must be 'asc' or 'desc', got '{other}'"
                )));
            }
        };
        if self.limit.is_some_and(|l| l < 0) || self.offset.is_some_and(|o| o < 0) {
            return Err(AppError::Validation(
                "limit and offset cannot be negative".to_string(),
            ));
        }

        Ok(ItemFilter {
            sort_order,
            limit: self.limit,
            offset: self.offset,
        })
    }
}

/// `?limit=` on per-user views.
#[derive(Debug, Deserialize, Default)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

impl LimitQuery {
    /// Negative limits are rejected here; range checks happen in the service.
    pub fn limit(&self) -> Result<Option<usize>, AppError> {
        self.limit
            .map(|l| {
                usize::try_from(l)
                    .map_err(|_| AppError::Validation(format!("limit cannot be negative, got {l}")))
            })
            .transpose()
    }
}
