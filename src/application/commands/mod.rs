pub mod content;
pub mod users;
