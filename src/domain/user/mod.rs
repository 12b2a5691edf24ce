// src/domain/user/mod.rs
pub mod entity;
pub mod throttle;
pub mod value_objects;

pub use entity::{Group, NewUser, User, UserUpdate};
pub use throttle::{ThrottleStatus, UserStatus};
pub use value_objects::{Capability, Email, GroupId, PlainPassword, UserId};
