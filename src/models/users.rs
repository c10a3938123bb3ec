use sqlx::SqlitePool;

use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::types::{Gender, UserProfile};

/// A full user row, including the password hash. Never serialized.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub hashed_password: String,
    pub age: i64,
    pub gender: String,
    pub last_login: Option<String>,
}

impl UserRow {
    pub fn profile(&self) -> AppResult<UserProfile> {
        let gender = Gender::parse(&self.gender).ok_or_else(|| {
            AppError::Database(format!("invalid gender value stored for user {}", self.id))
        })?;
        Ok(UserProfile { id: self.id, username: self.username.clone(), age: self.age, gender })
    }
}

pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    password: &str,
    age: i64,
    gender: Gender,
) -> AppResult<i64> {
    let hashed = hash_password(password)?;
    let result = sqlx::query(
        r#"INSERT INTO users (username, hashed_password, age, gender) VALUES (?1, ?2, ?3, ?4)"#,
    )
    .bind(username)
    .bind(&hashed)
    .bind(age)
    .bind(gender.as_str())
    .execute(pool)
    .await
    .map_err(|e| match AppError::from(e) {
        AppError::Conflict(_) => AppError::Conflict(format!("Username '{}' is already taken", username)),
        other => other,
    })?;
    Ok(result.last_insert_rowid())
}

pub async fn get_user_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"SELECT id, username, hashed_password, age, gender, last_login FROM users WHERE id = ?1"#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn get_user_by_username(pool: &SqlitePool, username: &str) -> AppResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"SELECT id, username, hashed_password, age, gender, last_login FROM users
           WHERE username = ?1"#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn list_users(pool: &SqlitePool) -> AppResult<Vec<UserProfile>> {
    let rows = sqlx::query_as::<_, UserRow>(
        r#"SELECT id, username, hashed_password, age, gender, last_login FROM users ORDER BY id"#,
    )
    .fetch_all(pool)
    .await?;
    rows.iter().map(UserRow::profile).collect()
}

/// Looks the user up by name and checks the password.
/// Returns `None` for both unknown usernames and wrong passwords.
pub async fn authenticate_user(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> AppResult<Option<UserRow>> {
    let Some(user) = get_user_by_username(pool, username).await? else {
        return Ok(None);
    };
    if verify_password(&user.hashed_password, password)? {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

pub async fn touch_last_login(pool: &SqlitePool, id: i64) -> AppResult<()> {
    sqlx::query(r#"UPDATE users SET last_login = ?1 WHERE id = ?2"#)
        .bind(chrono::Utc::now().to_rfc3339())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
