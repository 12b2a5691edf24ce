mod postgres_provider;

pub use postgres_provider::{PostgresAuthProvider, ThrottleSettings};
