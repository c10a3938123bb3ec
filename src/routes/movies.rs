use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{validation, AppError, AppResult, OptionExt},
    models::movies,
    state::AppState,
    types::{MovieBody, MovieDto, MovieListQuery},
};

fn validate_movie_body(body: &MovieBody) -> AppResult<()> {
    validation::validate_str_len(&body.title, "title", 1, 255)?;
    if body.playtime <= 0 {
        return Err(AppError::Validation {
            field: "playtime".to_string(),
            message: format!("Playtime must be positive, got {}", body.playtime),
        });
    }
    if body.genre.is_empty() {
        return Err(AppError::Validation {
            field: "genre".to_string(),
            message: "At least one genre is required".to_string(),
        });
    }
    Ok(())
}

pub async fn create_movie(
    State(state): State<AppState>,
    Json(body): Json<MovieBody>,
) -> AppResult<(StatusCode, Json<MovieDto>)> {
    validate_movie_body(&body)?;
    let movie = movies::create_movie(&state.db, &body).await?;
    tracing::info!("Created movie {} ({})", movie.id, movie.title);
    Ok((StatusCode::CREATED, Json(movie)))
}

pub async fn list_movies(
    State(state): State<AppState>,
    Query(query): Query<MovieListQuery>,
) -> AppResult<Json<Vec<MovieDto>>> {
    // Treat empty filter strings as absent
    let title = query.title.as_deref().filter(|t| !t.is_empty());
    let genre = query.genre.as_deref().filter(|g| !g.is_empty());
    let movies = movies::list_movies(&state.db, title, genre).await?;
    Ok(Json(movies))
}

pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MovieDto>> {
    validation::validate_positive_id(id, "movie_id")?;
    let movie = movies::get_movie_by_id(&state.db, id).await?.ok_or_not_found("Movie")?;
    Ok(Json(movie))
}

pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<MovieBody>,
) -> AppResult<Json<MovieDto>> {
    validation::validate_positive_id(id, "movie_id")?;
    validate_movie_body(&body)?;
    let movie = movies::update_movie_by_id(&state.db, id, &body).await?.ok_or_not_found("Movie")?;
    Ok(Json(movie))
}

pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    validation::validate_positive_id(id, "movie_id")?;
    if !movies::delete_movie_by_id(&state.db, id).await? {
        return Err(AppError::NotFound("Movie not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
