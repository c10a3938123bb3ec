use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};
use crate::types::{MovieBody, MovieDto};

/// Raw movie row; `genre` and `cast_list` hold JSON-encoded string arrays.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MovieRow {
    pub id: i64,
    pub title: String,
    pub plot: String,
    pub playtime: i64,
    pub genre: String,
    pub cast_list: String,
}

impl MovieRow {
    pub fn into_dto(self) -> AppResult<MovieDto> {
        let genre: Vec<String> = serde_json::from_str(&self.genre)
            .map_err(|e| AppError::Database(format!("invalid genre payload for movie {}: {}", self.id, e)))?;
        let cast: Vec<String> = serde_json::from_str(&self.cast_list)
            .map_err(|e| AppError::Database(format!("invalid cast payload for movie {}: {}", self.id, e)))?;
        Ok(MovieDto {
            id: self.id,
            title: self.title,
            plot: self.plot,
            playtime: self.playtime,
            genre,
            cast,
        })
    }
}

const SELECT_MOVIE: &str =
    r#"SELECT id, title, plot, playtime, genre, cast_list FROM movies"#;

fn encode_lists(body: &MovieBody) -> AppResult<(String, String)> {
    let genre = serde_json::to_string(&body.genre)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to encode genre list: {}", e)))?;
    let cast = serde_json::to_string(&body.cast)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to encode cast list: {}", e)))?;
    Ok((genre, cast))
}

pub async fn create_movie(pool: &SqlitePool, body: &MovieBody) -> AppResult<MovieDto> {
    let (genre_json, cast_json) = encode_lists(body)?;
    let result = sqlx::query(
        r#"INSERT INTO movies (title, plot, playtime, genre, cast_list)
           VALUES (?1, ?2, ?3, ?4, ?5)"#,
    )
    .bind(&body.title)
    .bind(&body.plot)
    .bind(body.playtime)
    .bind(&genre_json)
    .bind(&cast_json)
    .execute(pool)
    .await?;
    Ok(MovieDto {
        id: result.last_insert_rowid(),
        title: body.title.clone(),
        plot: body.plot.clone(),
        playtime: body.playtime,
        genre: body.genre.clone(),
        cast: body.cast.clone(),
    })
}

pub async fn get_movie_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<MovieDto>> {
    let row = sqlx::query_as::<_, MovieRow>(&format!("{} WHERE id = ?1", SELECT_MOVIE))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(MovieRow::into_dto).transpose()
}

/// Lists movies, optionally filtered. The title filter is a substring match
/// pushed into SQL; the genre filter matches any element of the stored genre
/// array and is applied after decoding.
pub async fn list_movies(
    pool: &SqlitePool,
    title: Option<&str>,
    genre: Option<&str>,
) -> AppResult<Vec<MovieDto>> {
    let rows = match title {
        Some(t) => {
            sqlx::query_as::<_, MovieRow>(&format!(
                "{} WHERE title LIKE '%' || ?1 || '%' ORDER BY id",
                SELECT_MOVIE
            ))
            .bind(t)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, MovieRow>(&format!("{} ORDER BY id", SELECT_MOVIE))
                .fetch_all(pool)
                .await?
        }
    };

    let mut movies = Vec::with_capacity(rows.len());
    for row in rows {
        let dto = row.into_dto()?;
        if let Some(g) = genre {
            if !dto.genre.iter().any(|entry| entry == g) {
                continue;
            }
        }
        movies.push(dto);
    }
    Ok(movies)
}

pub async fn update_movie_by_id(
    pool: &SqlitePool,
    id: i64,
    body: &MovieBody,
) -> AppResult<Option<MovieDto>> {
    let (genre_json, cast_json) = encode_lists(body)?;
    let result = sqlx::query(
        r#"UPDATE movies SET title = ?1, plot = ?2, playtime = ?3, genre = ?4, cast_list = ?5
           WHERE id = ?6"#,
    )
    .bind(&body.title)
    .bind(&body.plot)
    .bind(body.playtime)
    .bind(&genre_json)
    .bind(&cast_json)
    .bind(id)
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Ok(None);
    }
    Ok(Some(MovieDto {
        id,
        title: body.title.clone(),
        plot: body.plot.clone(),
        playtime: body.playtime,
        genre: body.genre.clone(),
        cast: body.cast.clone(),
    }))
}

pub async fn delete_movie_by_id(pool: &SqlitePool, id: i64) -> AppResult<bool> {
    let result = sqlx::query(r#"DELETE FROM movies WHERE id = ?1"#).bind(id).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}
