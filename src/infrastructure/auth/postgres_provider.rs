// src/infrastructure/auth/postgres_provider.rs
use crate::application::{
    ApplicationResult,
    error::ApplicationError,
    ports::{
        auth::{AuthError, AuthProvider, Credentials},
        security::PasswordHasher,
        time::Clock,
    },
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::{
    Email, Group, GroupId, NewUser, PlainPassword, ThrottleStatus, User, UserId, UserUpdate,
};
use crate::infrastructure::{repositories::map_sqlx, security::codes};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::collections::HashMap;
use std::sync::Arc;

const USER_COLUMNS: &str =
    "id, email, first_name, last_name, activated, activated_at, last_login, created_at";

/// Failed-login policy: after `attempt_limit` consecutive failures the user
/// is suspended for `suspension_minutes`.
#[derive(Debug, Clone, Copy)]
pub struct ThrottleSettings {
    pub attempt_limit: u32,
    pub suspension_minutes: i64,
}

impl Default for ThrottleSettings {
    fn default() -> Self {
        Self {
            attempt_limit: 5,
            suspension_minutes: 15,
        }
    }
}

/// Reference identity provider over the `users`, `groups`, `users_groups`
/// and `throttle` tables.
#[derive(Clone)]
pub struct PostgresAuthProvider {
    pool: PgPool,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
    throttle: ThrottleSettings,
}

impl PostgresAuthProvider {
    pub fn new(
        pool: PgPool,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
        throttle: ThrottleSettings,
    ) -> Self {
        Self {
            pool,
            hasher,
            clock,
            throttle,
        }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    email: String,
    first_name: String,
    last_name: String,
    activated: bool,
    activated_at: Option<DateTime<Utc>>,
    last_login: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self, groups: Vec<Group>) -> DomainResult<User> {
        Ok(User {
            id: UserId::new(self.id)?,
            email: Email::new(self.email)?,
            first_name: self.first_name,
            last_name: self.last_name,
            activated: self.activated,
            activated_at: self.activated_at,
            last_login: self.last_login,
            created_at: self.created_at,
            groups,
        })
    }
}

#[derive(Debug, FromRow)]
struct GroupRow {
    id: i64,
    name: String,
    permissions: Vec<String>,
}

impl TryFrom<GroupRow> for Group {
    type Error = DomainError;

    fn try_from(row: GroupRow) -> Result<Self, Self::Error> {
        Ok(Group {
            id: GroupId::new(row.id)?,
            name: row.name,
            permissions: row
                .permissions
                .iter()
                .filter_map(|p| p.parse().ok())
                .collect(),
        })
    }
}

#[derive(Debug, FromRow)]
struct MembershipRow {
    user_id: i64,
    id: i64,
    name: String,
    permissions: Vec<String>,
}

#[derive(Debug, FromRow)]
struct CredentialRow {
    id: i64,
    password_hash: String,
    activated: bool,
}

#[derive(Debug, FromRow)]
struct ThrottleRow {
    attempts: i32,
    suspended_until: Option<DateTime<Utc>>,
    banned: bool,
}

impl From<ThrottleRow> for ThrottleStatus {
    fn from(row: ThrottleRow) -> Self {
        Self {
            attempts: u32::try_from(row.attempts).unwrap_or_default(),
            suspended_until: row.suspended_until,
            banned: row.banned,
        }
    }
}

impl PostgresAuthProvider {
    async fn groups_of(&self, user_ids: &[i64]) -> DomainResult<HashMap<i64, Vec<Group>>> {
        let rows = sqlx::query_as::<_, MembershipRow>(
            "SELECT ug.user_id, g.id, g.name, g.permissions
             FROM users_groups ug JOIN groups g ON g.id = ug.group_id
             WHERE ug.user_id = ANY($1)
             ORDER BY g.id",
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let mut by_user: HashMap<i64, Vec<Group>> = HashMap::new();
        for row in rows {
            let group = Group::try_from(GroupRow {
                id: row.id,
                name: row.name,
                permissions: row.permissions,
            })?;
            by_user.entry(row.user_id).or_default().push(group);
        }
        Ok(by_user)
    }

    async fn hydrate(&self, rows: Vec<UserRow>) -> DomainResult<Vec<User>> {
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut groups = self.groups_of(&ids).await?;
        rows.into_iter()
            .map(|row| {
                let user_groups = groups.remove(&row.id).unwrap_or_default();
                row.into_user(user_groups)
            })
            .collect()
    }

    async fn load_user(&self, id: i64) -> ApplicationResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn record_failure(&self, user_id: i64, now: DateTime<Utc>) -> ApplicationResult<()> {
        let (attempts,): (i32,) = sqlx::query_as(
            "INSERT INTO throttle (user_id, attempts, last_attempt_at) VALUES ($1, 1, $2)
             ON CONFLICT (user_id) DO UPDATE
                 SET attempts = throttle.attempts + 1, last_attempt_at = $2
             RETURNING attempts",
        )
        .bind(user_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        if u32::try_from(attempts).unwrap_or_default() >= self.throttle.attempt_limit {
            let until = now + Duration::minutes(self.throttle.suspension_minutes);
            sqlx::query(
                "UPDATE throttle SET attempts = 0, suspended_until = $2 WHERE user_id = $1",
            )
            .bind(user_id)
            .bind(until)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
            tracing::warn!(user_id, until = %until, "user suspended after repeated failed logins");
        }
        Ok(())
    }

    async fn stored_digest(&self, user: UserId, column: &str) -> ApplicationResult<Option<String>> {
        let row: Option<(Option<String>,)> =
            sqlx::query_as(&format!("SELECT {column} FROM users WHERE id = $1"))
                .bind(i64::from(user))
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx)?;
        Ok(row.and_then(|(digest,)| digest))
    }

    async fn store_digest(&self, user: UserId, column: &str) -> ApplicationResult<String> {
        let code = codes::generate_code();
        let result = sqlx::query(&format!(
            "UPDATE users SET {column} = $2, updated_at = $3 WHERE id = $1"
        ))
        .bind(i64::from(user))
        .bind(codes::digest(&code))
        .bind(self.clock.now())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound.into());
        }
        Ok(code)
    }
}

#[async_trait]
impl AuthProvider for PostgresAuthProvider {
    async fn authenticate(&self, credentials: &Credentials) -> ApplicationResult<User> {
        credentials.validate()?;
        let email = Email::new(credentials.login.as_str()).map_err(|_| AuthError::UserNotFound)?;

        let row = sqlx::query_as::<_, CredentialRow>(
            "SELECT id, password_hash, activated FROM users WHERE email = $1",
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or(AuthError::UserNotFound)?;

        let now = self.clock.now();
        let user_id = UserId::new(row.id)?;
        let throttle = self.throttle_status(user_id).await?;
        if throttle.banned {
            return Err(AuthError::UserBanned.into());
        }
        if throttle.is_suspended(now) {
            return Err(AuthError::UserSuspended {
                minutes: throttle.remaining_minutes(now),
            }
            .into());
        }

        if !self
            .hasher
            .verify(credentials.password.as_str(), &row.password_hash)
            .await?
        {
            self.record_failure(row.id, now).await?;
            return Err(AuthError::WrongPassword.into());
        }
        if !row.activated {
            return Err(AuthError::UserNotActivated.into());
        }

        sqlx::query(
            "UPDATE throttle SET attempts = 0, suspended_until = NULL WHERE user_id = $1",
        )
        .bind(row.id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;
        sqlx::query("UPDATE users SET last_login = $2 WHERE id = $1")
            .bind(row.id)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        self.load_user(row.id).await?.ok_or_else(|| AuthError::UserNotFound.into())
    }

    async fn create_user(&self, user: NewUser) -> ApplicationResult<User> {
        let NewUser {
            email,
            password,
            first_name,
            last_name,
            activated,
        } = user;
        let hash = self.hasher.hash(password.as_str()).await?;
        let now = self.clock.now();

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users
                 (email, password_hash, first_name, last_name, activated, activated_at, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(email.as_str())
        .bind(hash)
        .bind(first_name)
        .bind(last_name)
        .bind(activated)
        .bind(activated.then_some(now))
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match map_sqlx(err) {
            DomainError::Conflict(_) => ApplicationError::from(AuthError::UserExists),
            other => ApplicationError::from(other),
        })?;

        Ok(row.into_user(Vec::new())?)
    }

    async fn update_user(&self, update: UserUpdate) -> ApplicationResult<User> {
        let UserUpdate {
            id,
            email,
            first_name,
            last_name,
            password,
            activated,
        } = update;
        let now = self.clock.now();

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE users SET updated_at = ");
        builder.push_bind(now);
        if let Some(email) = email {
            builder.push(", email = ");
            builder.push_bind(String::from(email));
        }
        if let Some(first_name) = first_name {
            builder.push(", first_name = ");
            builder.push_bind(first_name);
        }
        if let Some(last_name) = last_name {
            builder.push(", last_name = ");
            builder.push_bind(last_name);
        }
        if let Some(password) = password {
            let hash = self.hasher.hash(password.as_str()).await?;
            builder.push(", password_hash = ");
            builder.push_bind(hash);
        }
        if let Some(activated) = activated {
            builder.push(", activated = ");
            builder.push_bind(activated);
            builder.push(", activated_at = CASE WHEN ");
            builder.push_bind(activated);
            builder.push(" THEN COALESCE(activated_at, ");
            builder.push_bind(now);
            builder.push(") ELSE NULL END");
        }
        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|err| match map_sqlx(err) {
                DomainError::Conflict(_) => ApplicationError::from(AuthError::UserExists),
                other => ApplicationError::from(other),
            })?;
        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound.into());
        }

        self.load_user(i64::from(id))
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    async fn delete_user(&self, id: UserId) -> ApplicationResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_user_by_id(&self, id: UserId) -> ApplicationResult<Option<User>> {
        self.load_user(i64::from(id)).await
    }

    async fn find_user_by_login(&self, login: &Email) -> ApplicationResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(login.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_all_users(&self) -> ApplicationResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(self.hydrate(rows).await?)
    }

    async fn find_all_groups(&self) -> ApplicationResult<Vec<Group>> {
        let rows = sqlx::query_as::<_, GroupRow>(
            "SELECT id, name, permissions FROM groups ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;
        let groups = rows
            .into_iter()
            .map(Group::try_from)
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(groups)
    }

    async fn find_group_by_id(&self, id: GroupId) -> ApplicationResult<Option<Group>> {
        let row = sqlx::query_as::<_, GroupRow>(
            "SELECT id, name, permissions FROM groups WHERE id = $1",
        )
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(row.map(Group::try_from).transpose()?)
    }

    async fn add_user_to_group(&self, user: UserId, group: GroupId) -> ApplicationResult<()> {
        sqlx::query(
            "INSERT INTO users_groups (user_id, group_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(i64::from(user))
        .bind(i64::from(group))
        .execute(&self.pool)
        .await
        .map_err(|err| match map_sqlx(err) {
            DomainError::NotFound(_) => ApplicationError::from(AuthError::GroupNotFound),
            other => ApplicationError::from(other),
        })?;
        Ok(())
    }

    async fn remove_user_from_group(&self, user: UserId, group: GroupId) -> ApplicationResult<()> {
        sqlx::query("DELETE FROM users_groups WHERE user_id = $1 AND group_id = $2")
            .bind(i64::from(user))
            .bind(i64::from(group))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }

    async fn issue_activation_code(&self, user: UserId) -> ApplicationResult<String> {
        self.store_digest(user, "activation_code_digest").await
    }

    async fn attempt_activation(&self, user: UserId, code: &str) -> ApplicationResult<bool> {
        let stored = self.stored_digest(user, "activation_code_digest").await?;
        if !codes::matches(code, stored.as_deref()) {
            return Ok(false);
        }

        let now = self.clock.now();
        sqlx::query(
            "UPDATE users SET activated = TRUE, activated_at = $2, activation_code_digest = NULL,
                 updated_at = $2
             WHERE id = $1",
        )
        .bind(i64::from(user))
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(true)
    }

    async fn issue_reset_password_code(&self, user: UserId) -> ApplicationResult<String> {
        self.store_digest(user, "reset_password_code_digest").await
    }

    async fn check_reset_password_code(&self, user: UserId, code: &str) -> ApplicationResult<bool> {
        let stored = self.stored_digest(user, "reset_password_code_digest").await?;
        Ok(codes::matches(code, stored.as_deref()))
    }

    async fn attempt_reset_password(
        &self,
        user: UserId,
        code: &str,
        password: &PlainPassword,
    ) -> ApplicationResult<bool> {
        if !self.check_reset_password_code(user, code).await? {
            return Ok(false);
        }

        let hash = self.hasher.hash(password.as_str()).await?;
        sqlx::query(
            "UPDATE users SET password_hash = $2, reset_password_code_digest = NULL, updated_at = $3
             WHERE id = $1",
        )
        .bind(i64::from(user))
        .bind(hash)
        .bind(self.clock.now())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(true)
    }

    async fn throttle_status(&self, user: UserId) -> ApplicationResult<ThrottleStatus> {
        let row = sqlx::query_as::<_, ThrottleRow>(
            "SELECT attempts, suspended_until, banned FROM throttle WHERE user_id = $1",
        )
        .bind(i64::from(user))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(row.map(ThrottleStatus::from).unwrap_or_default())
    }
}
