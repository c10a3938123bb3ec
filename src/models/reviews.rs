use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::types::ReviewDto;

const SELECT_REVIEW: &str = r#"SELECT id, user_id, movie_id, title, content, review_image_url, created_at
                               FROM reviews"#;

pub async fn create_review(
    pool: &SqlitePool,
    user_id: i64,
    movie_id: i64,
    title: &str,
    content: &str,
    review_image_url: Option<&str>,
) -> AppResult<ReviewDto> {
    let result = sqlx::query(
        r#"INSERT INTO reviews (user_id, movie_id, title, content, review_image_url)
           VALUES (?1, ?2, ?3, ?4, ?5)"#,
    )
    .bind(user_id)
    .bind(movie_id)
    .bind(title)
    .bind(content)
    .bind(review_image_url)
    .execute(pool)
    .await?;

    // Read back for the DB-assigned created_at
    let review = sqlx::query_as::<_, ReviewDto>(&format!("{} WHERE id = ?1", SELECT_REVIEW))
        .bind(result.last_insert_rowid())
        .fetch_one(pool)
        .await?;
    Ok(review)
}

pub async fn get_review_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<ReviewDto>> {
    let review = sqlx::query_as::<_, ReviewDto>(&format!("{} WHERE id = ?1", SELECT_REVIEW))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(review)
}

pub async fn update_review_by_id(
    pool: &SqlitePool,
    id: i64,
    title: &str,
    content: &str,
    review_image_url: Option<&str>,
) -> AppResult<Option<ReviewDto>> {
    let result = sqlx::query(
        r#"UPDATE reviews SET title = ?1, content = ?2, review_image_url = ?3 WHERE id = ?4"#,
    )
    .bind(title)
    .bind(content)
    .bind(review_image_url)
    .bind(id)
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_review_by_id(pool, id).await
}

pub async fn delete_review_by_id(pool: &SqlitePool, id: i64) -> AppResult<bool> {
    let result = sqlx::query(r#"DELETE FROM reviews WHERE id = ?1"#).bind(id).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}

pub async fn list_reviews_by_user(pool: &SqlitePool, user_id: i64) -> AppResult<Vec<ReviewDto>> {
    let reviews = sqlx::query_as::<_, ReviewDto>(&format!(
        "{} WHERE user_id = ?1 ORDER BY created_at DESC, id DESC",
        SELECT_REVIEW
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(reviews)
}

pub async fn list_reviews_by_movie(pool: &SqlitePool, movie_id: i64) -> AppResult<Vec<ReviewDto>> {
    let reviews = sqlx::query_as::<_, ReviewDto>(&format!(
        "{} WHERE movie_id = ?1 ORDER BY created_at DESC, id DESC",
        SELECT_REVIEW
    ))
    .bind(movie_id)
    .fetch_all(pool)
    .await?;
    Ok(reviews)
}
