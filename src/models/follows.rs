use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::models::users::UserRow;
use crate::types::UserProfile;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FollowRow {
    pub id: i64,
    pub follower_id: i64,
    pub followee_id: i64,
}

pub async fn get_follow(
    pool: &SqlitePool,
    follower_id: i64,
    followee_id: i64,
) -> AppResult<Option<FollowRow>> {
    let row = sqlx::query_as::<_, FollowRow>(
        r#"SELECT id, follower_id, followee_id FROM follows
           WHERE follower_id = ?1 AND followee_id = ?2"#,
    )
    .bind(follower_id)
    .bind(followee_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn create_follow(
    pool: &SqlitePool,
    follower_id: i64,
    followee_id: i64,
) -> AppResult<FollowRow> {
    let result =
        sqlx::query(r#"INSERT INTO follows (follower_id, followee_id) VALUES (?1, ?2)"#)
            .bind(follower_id)
            .bind(followee_id)
            .execute(pool)
            .await?;
    Ok(FollowRow { id: result.last_insert_rowid(), follower_id, followee_id })
}

pub async fn delete_follow(
    pool: &SqlitePool,
    follower_id: i64,
    followee_id: i64,
) -> AppResult<bool> {
    let result =
        sqlx::query(r#"DELETE FROM follows WHERE follower_id = ?1 AND followee_id = ?2"#)
            .bind(follower_id)
            .bind(followee_id)
            .execute(pool)
            .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn list_followers(pool: &SqlitePool, user_id: i64) -> AppResult<Vec<UserProfile>> {
    let rows = sqlx::query_as::<_, UserRow>(
        r#"SELECT u.id, u.username, u.hashed_password, u.age, u.gender, u.last_login
           FROM follows f JOIN users u ON u.id = f.follower_id
           WHERE f.followee_id = ?1
           ORDER BY f.created_at DESC, f.id DESC"#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    rows.iter().map(UserRow::profile).collect()
}

pub async fn list_following(pool: &SqlitePool, user_id: i64) -> AppResult<Vec<UserProfile>> {
    let rows = sqlx::query_as::<_, UserRow>(
        r#"SELECT u.id, u.username, u.hashed_password, u.age, u.gender, u.last_login
           FROM follows f JOIN users u ON u.id = f.followee_id
           WHERE f.follower_id = ?1
           ORDER BY f.created_at DESC, f.id DESC"#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    rows.iter().map(UserRow::profile).collect()
}

pub async fn count_followers(pool: &SqlitePool, user_id: i64) -> AppResult<i64> {
    let count: i64 =
        sqlx::query_scalar(r#"SELECT COUNT(*) FROM follows WHERE followee_id = ?1"#)
            .bind(user_id)
            .fetch_one(pool)
            .await?;
    Ok(count)
}

pub async fn count_following(pool: &SqlitePool, user_id: i64) -> AppResult<i64> {
    let count: i64 =
        sqlx::query_scalar(r#"SELECT COUNT(*) FROM follows WHERE follower_id = ?1"#)
            .bind(user_id)
            .fetch_one(pool)
            .await?;
    Ok(count)
}
