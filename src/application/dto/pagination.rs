use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One page of a page-number paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: serde::de::DeserializeOwned"
))]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: u64,
    pub page: u32,
    pub per_page: u32,
    pub last_page: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_items: u64, page: u32, per_page: u32) -> Self {
        let per_page = per_page.max(1);
        let last_page = total_items.div_ceil(u64::from(per_page)).max(1);
        Self {
            items,
            total_items,
            page,
            per_page,
            last_page: u32::try_from(last_page).unwrap_or(u32::MAX),
        }
    }
}
