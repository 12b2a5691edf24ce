pub mod entity;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use entity::{
    ContentItem, ContentUpdate, NewContent, NewTranslation, Translation, TranslationUpdate,
};
pub use repository::{ContentReadRepository, ContentWriteRepository, PageRequest};
pub use services::{
    DEFAULT_MAX_ATTEMPTS as DEFAULT_SLUG_MAX_ATTEMPTS, KindScopedSlugLookup, SlugAssigner,
    SlugLookup,
};
pub use value_objects::{ContentId, ContentKind, Locale, Slug, Title, TranslationId};
