use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    auth::AuthUser,
    error::{validation, AppResult, OptionExt},
    models::{likes, movies, reviews},
    state::AppState,
    types::{
        MovieReactionCount, MovieReactionDto, Reaction, ReviewLikeCount, ReviewLikeDto,
        ReviewLikedStatus,
    },
};

use likes::ReviewLikeRow;

fn like_dto(row: ReviewLikeRow) -> ReviewLikeDto {
    ReviewLikeDto {
        id: Some(row.id),
        user_id: row.user_id,
        review_id: row.review_id,
        is_liked: row.is_liked,
    }
}

// Toggle endpoints are read-then-write without a transaction; under a race
// the UNIQUE(user_id, review_id) constraint is the backstop.

pub async fn like_review(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(review_id): Path<i64>,
) -> AppResult<Json<ReviewLikeDto>> {
    validation::validate_positive_id(review_id, "review_id")?;
    reviews::get_review_by_id(&state.db, review_id).await?.ok_or_not_found("Review")?;

    let row = match likes::get_review_like(&state.db, user.id, review_id).await? {
        Some(existing) if !existing.is_liked => likes::set_review_like(&state.db, existing.id, true).await?,
        Some(existing) => existing,
        None => likes::create_review_like(&state.db, user.id, review_id, true).await?,
    };
    Ok(Json(like_dto(row)))
}

pub async fn unlike_review(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(review_id): Path<i64>,
) -> AppResult<Json<ReviewLikeDto>> {
    validation::validate_positive_id(review_id, "review_id")?;

    match likes::get_review_like(&state.db, user.id, review_id).await? {
        Some(existing) if existing.is_liked => {
            let row = likes::set_review_like(&state.db, existing.id, false).await?;
            Ok(Json(like_dto(row)))
        }
        Some(existing) => Ok(Json(like_dto(existing))),
        // Never liked: report the state without writing a row
        None => Ok(Json(ReviewLikeDto { id: None, user_id: user.id, review_id, is_liked: false })),
    }
}

pub async fn review_like_count(
    State(state): State<AppState>,
    Path(review_id): Path<i64>,
) -> AppResult<Json<ReviewLikeCount>> {
    validation::validate_positive_id(review_id, "review_id")?;
    let like_count = likes::count_review_likes(&state.db, review_id).await?;
    Ok(Json(ReviewLikeCount { review_id, like_count }))
}

pub async fn review_liked_status(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(review_id): Path<i64>,
) -> AppResult<Json<ReviewLikedStatus>> {
    validation::validate_positive_id(review_id, "review_id")?;
    let is_liked = likes::get_review_like(&state.db, user.id, review_id)
        .await?
        .map(|row| row.is_liked)
        .unwrap_or(false);
    Ok(Json(ReviewLikedStatus { review_id, user_id: user.id, is_liked }))
}

async fn react_to_movie(
    state: &AppState,
    user_id: i64,
    movie_id: i64,
    reaction: Reaction,
) -> AppResult<MovieReactionDto> {
    validation::validate_positive_id(movie_id, "movie_id")?;
    movies::get_movie_by_id(&state.db, movie_id).await?.ok_or_not_found("Movie")?;

    match likes::get_movie_reaction(&state.db, user_id, movie_id).await? {
        Some(existing) if existing.reaction != reaction.as_str() => {
            likes::set_movie_reaction(&state.db, existing.id, reaction).await
        }
        Some(existing) => existing.into_dto(),
        None => likes::create_movie_reaction(&state.db, user_id, movie_id, reaction).await,
    }
}

pub async fn like_movie(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(movie_id): Path<i64>,
) -> AppResult<Json<MovieReactionDto>> {
    let reaction = react_to_movie(&state, user.id, movie_id, Reaction::Like).await?;
    Ok(Json(reaction))
}

pub async fn dislike_movie(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(movie_id): Path<i64>,
) -> AppResult<Json<MovieReactionDto>> {
    let reaction = react_to_movie(&state, user.id, movie_id, Reaction::Dislike).await?;
    Ok(Json(reaction))
}

pub async fn movie_reaction_count(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
) -> AppResult<Json<MovieReactionCount>> {
    validation::validate_positive_id(movie_id, "movie_id")?;
    let (like_count, dislike_count) = likes::count_movie_reactions(&state.db, movie_id).await?;
    Ok(Json(MovieReactionCount { movie_id, like_count, dislike_count }))
}
