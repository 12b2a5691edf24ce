// src/application/commands/content/service.rs
use std::sync::Arc;

use crate::{
    application::{
        locale::LocaleSettings,
        ports::{time::Clock, util::SlugGenerator},
    },
    domain::content::{ContentReadRepository, ContentWriteRepository, SlugAssigner},
};

pub struct ContentCommandService {
    pub(super) write_repo: Arc<dyn ContentWriteRepository>,
    pub(super) read_repo: Arc<dyn ContentReadRepository>,
    pub(super) slug_assigner: SlugAssigner,
    pub(super) slugger: Arc<dyn SlugGenerator>,
    pub(super) locales: LocaleSettings,
    pub(super) clock: Arc<dyn Clock>,
}

impl ContentCommandService {
    pub fn new(
        write_repo: Arc<dyn ContentWriteRepository>,
        read_repo: Arc<dyn ContentReadRepository>,
        slug_assigner: SlugAssigner,
        slugger: Arc<dyn SlugGenerator>,
        locales: LocaleSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            slug_assigner,
            slugger,
            locales,
            clock,
        }
    }
}
