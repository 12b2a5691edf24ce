// src/application/commands/content/mod.rs
mod capability;
mod create;
mod delete;
mod input;
mod service;
mod update;

pub use create::CreateContentCommand;
pub use delete::DeleteContentCommand;
pub use input::TranslationInput;
pub use service::ContentCommandService;
pub use update::UpdateContentCommand;
