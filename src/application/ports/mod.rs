// src/application/ports/mod.rs
pub mod auth;
pub mod mail;
pub mod security;
pub mod session_revocation;
pub mod time;
pub mod util;

// Type aliases to make port injection sites more descriptive
pub type AuthProviderPort = dyn auth::AuthProvider;
pub type MailerPort = dyn mail::Mailer;
pub type TokenManagerPort = dyn security::TokenManager;
pub type ClockPort = dyn time::Clock;
pub type SlugGeneratorPort = dyn util::SlugGenerator;
