use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const SELECT_USER: &str = r#"
    SELECT id, username, email, password_hash, created_at, updated_at
    FROM users
"#;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            username: Username::new(row.username)?,
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<User>, UserError> {
        let query = format!("{} WHERE {} = ?", SELECT_USER, column);

        sqlx::query_as::<_, UserRow>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?
            .map(User::try_from)
            .transpose()
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.created_at)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                // SQLite reports the offending column, not a constraint name
                if db_err.is_unique_violation() {
                    if db_err.message().contains("users.username") {
                        return UserError::UsernameAlreadyExists(user.username.to_string());
                    }
                    if db_err.message().contains("users.email") {
                        return UserError::EmailAlreadyExists(user.email.to_string());
                    }
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        Ok(User {
            id: UserId(result.last_insert_rowid()),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: user.created_at,
            updated_at: user.created_at,
        })
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let query = format!("{} WHERE id = ?", SELECT_USER);

        sqlx::query_as::<_, UserRow>(&query)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        self.find_one("username", username.as_str()).await
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        self.find_one("email", email.as_str()).await
    }
}
