use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};
use crate::types::{MovieReactionDto, Reaction};

/// A stored review like. `is_liked = false` rows stay around after an unlike
/// so the toggle is a plain UPDATE either way.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReviewLikeRow {
    pub id: i64,
    pub user_id: i64,
    pub review_id: i64,
    pub is_liked: bool,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MovieReactionRow {
    pub id: i64,
    pub user_id: i64,
    pub movie_id: i64,
    pub reaction: String,
}

impl MovieReactionRow {
    pub fn into_dto(self) -> AppResult<MovieReactionDto> {
        let reaction = Reaction::parse(&self.reaction).ok_or_else(|| {
            AppError::Database(format!("invalid reaction value stored for row {}", self.id))
        })?;
        Ok(MovieReactionDto {
            id: self.id,
            user_id: self.user_id,
            movie_id: self.movie_id,
            reaction,
        })
    }
}

// ---- review likes ----

pub async fn get_review_like(
    pool: &SqlitePool,
    user_id: i64,
    review_id: i64,
) -> AppResult<Option<ReviewLikeRow>> {
    let row = sqlx::query_as::<_, ReviewLikeRow>(
        r#"SELECT id, user_id, review_id, is_liked FROM review_likes
           WHERE user_id = ?1 AND review_id = ?2"#,
    )
    .bind(user_id)
    .bind(review_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn create_review_like(
    pool: &SqlitePool,
    user_id: i64,
    review_id: i64,
    is_liked: bool,
) -> AppResult<ReviewLikeRow> {
    let result = sqlx::query(
        r#"INSERT INTO review_likes (user_id, review_id, is_liked) VALUES (?1, ?2, ?3)"#,
    )
    .bind(user_id)
    .bind(review_id)
    .bind(is_liked)
    .execute(pool)
    .await?;
    Ok(ReviewLikeRow { id: result.last_insert_rowid(), user_id, review_id, is_liked })
}

pub async fn set_review_like(
    pool: &SqlitePool,
    like_id: i64,
    is_liked: bool,
) -> AppResult<ReviewLikeRow> {
    sqlx::query(r#"UPDATE review_likes SET is_liked = ?1 WHERE id = ?2"#)
        .bind(is_liked)
        .bind(like_id)
        .execute(pool)
        .await?;
    let row = sqlx::query_as::<_, ReviewLikeRow>(
        r#"SELECT id, user_id, review_id, is_liked FROM review_likes WHERE id = ?1"#,
    )
    .bind(like_id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn count_review_likes(pool: &SqlitePool, review_id: i64) -> AppResult<i64> {
    let count: i64 = sqlx::query_scalar(
        r#"SELECT COUNT(*) FROM review_likes WHERE review_id = ?1 AND is_liked = 1"#,
    )
    .bind(review_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

// ---- movie reactions ----

pub async fn get_movie_reaction(
    pool: &SqlitePool,
    user_id: i64,
    movie_id: i64,
) -> AppResult<Option<MovieReactionRow>> {
    let row = sqlx::query_as::<_, MovieReactionRow>(
        r#"SELECT id, user_id, movie_id, reaction FROM movie_reactions
           WHERE user_id = ?1 AND movie_id = ?2"#,
    )
    .bind(user_id)
    .bind(movie_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn create_movie_reaction(
    pool: &SqlitePool,
    user_id: i64,
    movie_id: i64,
    reaction: Reaction,
) -> AppResult<MovieReactionDto> {
    let result = sqlx::query(
        r#"INSERT INTO movie_reactions (user_id, movie_id, reaction) VALUES (?1, ?2, ?3)"#,
    )
    .bind(user_id)
    .bind(movie_id)
    .bind(reaction.as_str())
    .execute(pool)
    .await?;
    Ok(MovieReactionDto { id: result.last_insert_rowid(), user_id, movie_id, reaction })
}

pub async fn set_movie_reaction(
    pool: &SqlitePool,
    reaction_id: i64,
    reaction: Reaction,
) -> AppResult<MovieReactionDto> {
    sqlx::query(r#"UPDATE movie_reactions SET reaction = ?1 WHERE id = ?2"#)
        .bind(reaction.as_str())
        .bind(reaction_id)
        .execute(pool)
        .await?;
    let row = sqlx::query_as::<_, MovieReactionRow>(
        r#"SELECT id, user_id, movie_id, reaction FROM movie_reactions WHERE id = ?1"#,
    )
    .bind(reaction_id)
    .fetch_one(pool)
    .await?;
    row.into_dto()
}

/// Returns `(like_count, dislike_count)` for a movie.
pub async fn count_movie_reactions(pool: &SqlitePool, movie_id: i64) -> AppResult<(i64, i64)> {
    let likes: i64 = sqlx::query_scalar(
        r#"SELECT COUNT(*) FROM movie_reactions WHERE movie_id = ?1 AND reaction = 'like'"#,
    )
    .bind(movie_id)
    .fetch_one(pool)
    .await?;
    let dislikes: i64 = sqlx::query_scalar(
        r#"SELECT COUNT(*) FROM movie_reactions WHERE movie_id = ?1 AND reaction = 'dislike'"#,
    )
    .bind(movie_id)
    .fetch_one(pool)
    .await?;
    Ok((likes, dislikes))
}
