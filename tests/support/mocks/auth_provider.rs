// tests/support/mocks/auth_provider.rs
use super::time::fixed_now;
use async_trait::async_trait;
use chrono::Duration;
use folio_cms::application::{
    ApplicationResult,
    ports::auth::{AuthError, AuthProvider, Credentials},
};
use folio_cms::domain::user::{
    Email, Group, GroupId, NewUser, PlainPassword, ThrottleStatus, User, UserId, UserUpdate,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Mutex;

pub const ADMIN_ID: i64 = 1;
pub const EDITOR_ID: i64 = 2;
pub const VISITOR_ID: i64 = 3;

pub const PUBLIC_GROUP: i64 = 1;
pub const EDITORS_GROUP: i64 = 2;
pub const ADMINS_GROUP: i64 = 3;

const ATTEMPT_LIMIT: u32 = 5;
const SUSPENSION_MINUTES: i64 = 15;

struct StoredUser {
    user: User,
    password: String,
}

#[derive(Default)]
struct State {
    next_user_id: i64,
    next_code: u32,
    users: BTreeMap<i64, StoredUser>,
    groups: BTreeMap<i64, Group>,
    memberships: BTreeSet<(i64, i64)>,
    activation_codes: HashMap<i64, String>,
    reset_codes: HashMap<i64, String>,
    throttle: HashMap<i64, ThrottleStatus>,
}

impl State {
    fn load(&self, id: i64) -> Option<User> {
        let stored = self.users.get(&id)?;
        let mut user = stored.user.clone();
        user.groups = self
            .memberships
            .iter()
            .filter(|(uid, _)| *uid == id)
            .filter_map(|(_, gid)| self.groups.get(gid).cloned())
            .collect();
        Some(user)
    }

    fn id_by_login(&self, email: &Email) -> Option<i64> {
        self.users
            .iter()
            .find(|(_, stored)| stored.user.email == *email)
            .map(|(id, _)| *id)
    }

    fn code(&mut self, prefix: &str, user: i64) -> String {
        self.next_code += 1;
        format!("{prefix}-{user}-{}", self.next_code)
    }
}

/// Identity provider over plain maps, seeded with the three default groups
/// and one active user per group (`admin`, `editor`, `visitor`). Passwords
/// are kept in clear.
pub struct InMemoryAuthProvider {
    state: Mutex<State>,
}

fn group(id: i64, name: &str, permissions: &[&str]) -> Group {
    Group {
        id: GroupId::new(id).unwrap(),
        name: name.into(),
        permissions: permissions.iter().map(|p| p.parse().unwrap()).collect(),
    }
}

impl Default for InMemoryAuthProvider {
    fn default() -> Self {
        let provider = Self {
            state: Mutex::new(State {
                next_user_id: 1,
                ..State::default()
            }),
        };
        {
            let mut state = provider.state.lock().unwrap();
            state.groups.insert(PUBLIC_GROUP, group(PUBLIC_GROUP, "Public", &[]));
            state.groups.insert(
                EDITORS_GROUP,
                group(EDITORS_GROUP, "Editors", &["galleries:*", "news:*"]),
            );
            state
                .groups
                .insert(ADMINS_GROUP, group(ADMINS_GROUP, "Administrators", &["*:*"]));
        }
        provider.seed_user("admin@example.com", "admin-password", true, &[ADMINS_GROUP]);
        provider.seed_user("editor@example.com", "editor-password", true, &[EDITORS_GROUP]);
        provider.seed_user("visitor@example.com", "visitor-password", true, &[PUBLIC_GROUP]);
        provider
    }
}

impl InMemoryAuthProvider {
    pub fn seed_user(&self, email: &str, password: &str, activated: bool, groups: &[i64]) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_user_id;
        state.next_user_id += 1;
        let now = fixed_now();
        state.users.insert(
            id,
            StoredUser {
                user: User {
                    id: UserId::new(id).unwrap(),
                    email: Email::new(email).unwrap(),
                    first_name: "Test".into(),
                    last_name: format!("User{id}"),
                    activated,
                    activated_at: activated.then_some(now),
                    last_login: None,
                    created_at: now,
                    groups: Vec::new(),
                },
                password: password.into(),
            },
        );
        for gid in groups {
            state.memberships.insert((id, *gid));
        }
        id
    }

    pub fn ban(&self, id: i64) {
        let mut state = self.state.lock().unwrap();
        state.throttle.entry(id).or_default().banned = true;
    }

    pub fn suspend_for(&self, id: i64, minutes: i64) {
        let mut state = self.state.lock().unwrap();
        state.throttle.entry(id).or_default().suspended_until =
            Some(fixed_now() + Duration::minutes(minutes));
    }

    pub fn password_of(&self, id: i64) -> Option<String> {
        let state = self.state.lock().unwrap();
        state.users.get(&id).map(|s| s.password.clone())
    }

    pub fn user(&self, id: i64) -> Option<User> {
        self.state.lock().unwrap().load(id)
    }

    pub fn id_of(&self, email: &str) -> Option<i64> {
        let email = Email::new(email).ok()?;
        self.state.lock().unwrap().id_by_login(&email)
    }
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    async fn authenticate(&self, credentials: &Credentials) -> ApplicationResult<User> {
        credentials.validate()?;
        let email = Email::new(credentials.login.as_str()).map_err(|_| AuthError::UserNotFound)?;
        let now = fixed_now();

        let mut state = self.state.lock().unwrap();
        let id = state.id_by_login(&email).ok_or(AuthError::UserNotFound)?;
        let throttle = state.throttle.get(&id).cloned().unwrap_or_default();
        if throttle.banned {
            return Err(AuthError::UserBanned.into());
        }
        if throttle.is_suspended(now) {
            return Err(AuthError::UserSuspended {
                minutes: throttle.remaining_minutes(now),
            }
            .into());
        }

        let stored = state.users.get(&id).ok_or(AuthError::UserNotFound)?;
        if stored.password != credentials.password.as_str() {
            let entry = state.throttle.entry(id).or_default();
            entry.attempts += 1;
            if entry.attempts >= ATTEMPT_LIMIT {
                entry.attempts = 0;
                entry.suspended_until = Some(now + Duration::minutes(SUSPENSION_MINUTES));
            }
            return Err(AuthError::WrongPassword.into());
        }
        if !stored.user.activated {
            return Err(AuthError::UserNotActivated.into());
        }

        state.throttle.remove(&id);
        if let Some(stored) = state.users.get_mut(&id) {
            stored.user.last_login = Some(now);
        }
        Ok(state.load(id).ok_or(AuthError::UserNotFound)?)
    }

    async fn create_user(&self, user: NewUser) -> ApplicationResult<User> {
        {
            let state = self.state.lock().unwrap();
            if state.id_by_login(&user.email).is_some() {
                return Err(AuthError::UserExists.into());
            }
        }
        let id = self.seed_user(
            user.email.as_str(),
            user.password.as_str(),
            user.activated,
            &[],
        );
        let mut state = self.state.lock().unwrap();
        if let Some(stored) = state.users.get_mut(&id) {
            stored.user.first_name = user.first_name;
            stored.user.last_name = user.last_name;
        }
        Ok(state.load(id).ok_or(AuthError::UserNotFound)?)
    }

    async fn update_user(&self, update: UserUpdate) -> ApplicationResult<User> {
        let mut state = self.state.lock().unwrap();
        let id = i64::from(update.id);
        if let Some(email) = &update.email {
            if state.id_by_login(email).is_some_and(|owner| owner != id) {
                return Err(AuthError::UserExists.into());
            }
        }
        let stored = state.users.get_mut(&id).ok_or(AuthError::UserNotFound)?;
        if let Some(email) = update.email {
            stored.user.email = email;
        }
        if let Some(first_name) = update.first_name {
            stored.user.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            stored.user.last_name = last_name;
        }
        if let Some(password) = update.password {
            stored.password = password.as_str().to_string();
        }
        if let Some(activated) = update.activated {
            stored.user.activated = activated;
        }
        Ok(state.load(id).ok_or(AuthError::UserNotFound)?)
    }

    async fn delete_user(&self, id: UserId) -> ApplicationResult<bool> {
        let mut state = self.state.lock().unwrap();
        let id = i64::from(id);
        state.memberships.retain(|(uid, _)| *uid != id);
        Ok(state.users.remove(&id).is_some())
    }

    async fn find_user_by_id(&self, id: UserId) -> ApplicationResult<Option<User>> {
        Ok(self.state.lock().unwrap().load(i64::from(id)))
    }

    async fn find_user_by_login(&self, login: &Email) -> ApplicationResult<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.id_by_login(login).and_then(|id| state.load(id)))
    }

    async fn find_all_users(&self) -> ApplicationResult<Vec<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.keys().filter_map(|id| state.load(*id)).collect())
    }

    async fn find_all_groups(&self) -> ApplicationResult<Vec<Group>> {
        Ok(self.state.lock().unwrap().groups.values().cloned().collect())
    }

    async fn find_group_by_id(&self, id: GroupId) -> ApplicationResult<Option<Group>> {
        Ok(self.state.lock().unwrap().groups.get(&i64::from(id)).cloned())
    }

    async fn add_user_to_group(&self, user: UserId, group: GroupId) -> ApplicationResult<()> {
        let mut state = self.state.lock().unwrap();
        if !state.groups.contains_key(&i64::from(group)) {
            return Err(AuthError::GroupNotFound.into());
        }
        state.memberships.insert((i64::from(user), i64::from(group)));
        Ok(())
    }

    async fn remove_user_from_group(&self, user: UserId, group: GroupId) -> ApplicationResult<()> {
        let mut state = self.state.lock().unwrap();
        state
            .memberships
            .remove(&(i64::from(user), i64::from(group)));
        Ok(())
    }

    async fn issue_activation_code(&self, user: UserId) -> ApplicationResult<String> {
        let mut state = self.state.lock().unwrap();
        let id = i64::from(user);
        let code = state.code("activate", id);
        state.activation_codes.insert(id, code.clone());
        Ok(code)
    }

    async fn attempt_activation(&self, user: UserId, code: &str) -> ApplicationResult<bool> {
        let mut state = self.state.lock().unwrap();
        let id = i64::from(user);
        if state.activation_codes.get(&id).map(String::as_str) != Some(code) {
            return Ok(false);
        }
        state.activation_codes.remove(&id);
        if let Some(stored) = state.users.get_mut(&id) {
            stored.user.activated = true;
            stored.user.activated_at = Some(fixed_now());
        }
        Ok(true)
    }

    async fn issue_reset_password_code(&self, user: UserId) -> ApplicationResult<String> {
        let mut state = self.state.lock().unwrap();
        let id = i64::from(user);
        let code = state.code("reset", id);
        state.reset_codes.insert(id, code.clone());
        Ok(code)
    }

    async fn check_reset_password_code(&self, user: UserId, code: &str) -> ApplicationResult<bool> {
        let state = self.state.lock().unwrap();
        Ok(state.reset_codes.get(&i64::from(user)).map(String::as_str) == Some(code))
    }

    async fn attempt_reset_password(
        &self,
        user: UserId,
        code: &str,
        password: &PlainPassword,
    ) -> ApplicationResult<bool> {
        let mut state = self.state.lock().unwrap();
        let id = i64::from(user);
        if state.reset_codes.get(&id).map(String::as_str) != Some(code) {
            return Ok(false);
        }
        state.reset_codes.remove(&id);
        if let Some(stored) = state.users.get_mut(&id) {
            stored.password = password.as_str().to_string();
        }
        Ok(true)
    }

    async fn throttle_status(&self, user: UserId) -> ApplicationResult<ThrottleStatus> {
        let state = self.state.lock().unwrap();
        Ok(state.throttle.get(&i64::from(user)).cloned().unwrap_or_default())
    }
}
