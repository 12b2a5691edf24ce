// src/application/ports/util.rs

/// Turns a title or a user-supplied candidate into a URL-safe slug. May
/// return an empty string, which callers treat as "no slug".
pub trait SlugGenerator: Send + Sync {
    fn slugify(&self, input: &str) -> String;
}
