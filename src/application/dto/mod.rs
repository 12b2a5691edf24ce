pub mod auth;
pub mod content;
pub mod pagination;
pub mod users;

pub use auth::{AuthTokenDto, AuthenticatedUser, TokenSubject};
pub use content::{ContentDto, TranslationDto};
pub use pagination::Page;
pub use users::{CapabilityView, GroupDto, GroupSelectionDto, UserDto, UserProfileDto};
