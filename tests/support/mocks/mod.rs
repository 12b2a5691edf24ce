// tests/support/mocks/mod.rs
pub mod auth_provider;
pub mod content_repo;
pub mod mail;
pub mod security;
pub mod time;

pub use auth_provider::{ADMIN_ID, EDITOR_ID, InMemoryAuthProvider, VISITOR_ID};
pub use content_repo::InMemoryContentRepo;
pub use mail::RecordingMailer;
pub use security::{ADMIN_TOKEN, DummyTokenManager, EDITOR_TOKEN, EXPIRED_TOKEN, VISITOR_TOKEN};
pub use time::{DummyClock, fixed_now};
