use std::sync::Arc;

use crate::{
    application::locale::LocaleSettings,
    domain::content::{ContentReadRepository, PageRequest},
};

pub const MAX_ITEMS_PER_PAGE: u32 = 100;

pub struct ContentQueryService {
    pub(super) read_repo: Arc<dyn ContentReadRepository>,
    pub(super) locales: LocaleSettings,
    pub(super) items_per_page: u32,
}

impl ContentQueryService {
    pub fn new(
        read_repo: Arc<dyn ContentReadRepository>,
        locales: LocaleSettings,
        items_per_page: u32,
    ) -> Self {
        Self {
            read_repo,
            locales,
            items_per_page: items_per_page.clamp(1, MAX_ITEMS_PER_PAGE),
        }
    }

    pub(super) fn page_request(&self, page: Option<u32>, per_page: Option<u32>) -> PageRequest {
        let per_page = per_page
            .filter(|n| *n > 0)
            .unwrap_or(self.items_per_page)
            .min(MAX_ITEMS_PER_PAGE);
        PageRequest::new(page.unwrap_or(1), per_page)
    }
}
