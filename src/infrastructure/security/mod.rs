// src/infrastructure/security/mod.rs
pub mod claims;
pub mod codes;
pub mod password;
pub mod redis_session_store;
pub mod session_store;
pub mod token;
