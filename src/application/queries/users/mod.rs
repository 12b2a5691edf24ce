mod groups;
mod list;
mod lookup;
mod profile;
mod service;

pub use service::UserQueryService;
