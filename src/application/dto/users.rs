use crate::domain::user::{Capability, Group, User, UserStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::auth::AuthenticatedUser;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub activated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub groups: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

impl UserDto {
    pub fn with_status(mut self, status: UserStatus) -> Self {
        self.status = Some(status);
        self
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        let groups = user.group_names();
        Self {
            id: user.id.into(),
            email: user.email.into(),
            first_name: user.first_name,
            last_name: user.last_name,
            activated: user.activated,
            activated_at: user.activated_at,
            last_login: user.last_login,
            created_at: user.created_at,
            groups,
            status: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GroupDto {
    pub id: i64,
    pub name: String,
    pub permissions: Vec<String>,
}

impl From<Group> for GroupDto {
    fn from(group: Group) -> Self {
        let mut permissions: Vec<String> =
            group.permissions.iter().map(ToString::to_string).collect();
        permissions.sort();
        Self {
            id: group.id.into(),
            name: group.name,
            permissions,
        }
    }
}

/// A group as offered on a user form. `field` is the form key the
/// membership flag is posted under; `selected` is only set when the listing
/// was made for a specific user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GroupSelectionDto {
    pub id: i64,
    pub name: String,
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
}

impl GroupSelectionDto {
    pub fn new(group: &Group, selected: Option<bool>) -> Self {
        let id: i64 = group.id.into();
        Self {
            id,
            name: group.name.clone(),
            field: format!("groups[{id}]"),
            selected,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CapabilityView {
    pub resource: String,
    pub action: String,
}

impl From<Capability> for CapabilityView {
    fn from(value: Capability) -> Self {
        Self {
            resource: value.resource,
            action: value.action,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfileDto {
    pub user: UserDto,
    pub capabilities: Vec<CapabilityView>,
    pub expires_at: DateTime<Utc>,
    pub expires_in: i64,
}

impl UserProfileDto {
    pub fn from_parts(user: User, auth: &AuthenticatedUser, now: DateTime<Utc>) -> Self {
        let mut capabilities: Vec<_> = auth
            .capabilities
            .iter()
            .cloned()
            .map(CapabilityView::from)
            .collect();
        capabilities.sort_by(|a, b| {
            a.resource
                .cmp(&b.resource)
                .then_with(|| a.action.cmp(&b.action))
        });
        let expires_in = auth
            .expires_at
            .signed_duration_since(now)
            .num_seconds()
            .max(0);

        Self {
            user: user.into(),
            capabilities,
            expires_at: auth.expires_at,
            expires_in,
        }
    }
}
