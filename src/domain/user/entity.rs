// src/domain/user/entity.rs
use crate::domain::user::value_objects::{Capability, Email, GroupId, PlainPassword, UserId};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub permissions: HashSet<Capability>,
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub activated: bool,
    pub activated_at: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub groups: Vec<Group>,
}

impl User {
    pub fn in_group(&self, id: GroupId) -> bool {
        self.groups.iter().any(|g| g.id == id)
    }

    /// Union of the permissions of every group the user belongs to.
    pub fn capabilities(&self) -> HashSet<Capability> {
        self.groups
            .iter()
            .flat_map(|g| g.permissions.iter().cloned())
            .collect()
    }

    pub fn group_names(&self) -> Vec<String> {
        self.groups.iter().map(|g| g.name.clone()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub password: PlainPassword,
    pub first_name: String,
    pub last_name: String,
    pub activated: bool,
}

#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub id: UserId,
    pub email: Option<Email>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<PlainPassword>,
    pub activated: Option<bool>,
}

impl UserUpdate {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            email: None,
            first_name: None,
            last_name: None,
            password: None,
            activated: None,
        }
    }

    pub fn with_email(mut self, email: Email) -> Self {
        self.email = Some(email);
        self
    }

    pub fn with_names(mut self, first_name: Option<String>, last_name: Option<String>) -> Self {
        self.first_name = first_name;
        self.last_name = last_name;
        self
    }

    /// Blank passwords are ignored so an edit form can leave the field empty.
    pub fn with_password(mut self, password: PlainPassword) -> Self {
        if !password.is_blank() {
            self.password = Some(password);
        }
        self
    }

    pub fn with_activated(mut self, activated: bool) -> Self {
        self.activated = Some(activated);
        self
    }
}
