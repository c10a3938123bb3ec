use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    auth::AuthUser,
    error::{validation, AppError, AppResult, OptionExt},
    models::{follows, users},
    state::AppState,
    types::{FollowCounts, FollowStatus, UserProfile},
};

pub async fn follow_user(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(followee_id): Path<i64>,
) -> AppResult<Json<FollowStatus>> {
    validation::validate_positive_id(followee_id, "user_id")?;
    if followee_id == user.id {
        return Err(AppError::BadRequest("Cannot follow yourself".to_string()));
    }
    users::get_user_by_id(&state.db, followee_id).await?.ok_or_not_found("User")?;

    // Idempotent: an existing edge is left as-is
    if follows::get_follow(&state.db, user.id, followee_id).await?.is_none() {
        follows::create_follow(&state.db, user.id, followee_id).await?;
        tracing::info!("User {} followed user {}", user.id, followee_id);
    }
    Ok(Json(FollowStatus { follower_id: user.id, followee_id, following: true }))
}

pub async fn unfollow_user(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(followee_id): Path<i64>,
) -> AppResult<Json<FollowStatus>> {
    validation::validate_positive_id(followee_id, "user_id")?;
    // Deleting a missing edge is a no-op, not an error
    follows::delete_follow(&state.db, user.id, followee_id).await?;
    Ok(Json(FollowStatus { follower_id: user.id, followee_id, following: false }))
}

pub async fn list_followers(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<UserProfile>>> {
    validation::validate_positive_id(user_id, "user_id")?;
    users::get_user_by_id(&state.db, user_id).await?.ok_or_not_found("User")?;
    let followers = follows::list_followers(&state.db, user_id).await?;
    Ok(Json(followers))
}

pub async fn list_following(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<UserProfile>>> {
    validation::validate_positive_id(user_id, "user_id")?;
    users::get_user_by_id(&state.db, user_id).await?.ok_or_not_found("User")?;
    let following = follows::list_following(&state.db, user_id).await?;
    Ok(Json(following))
}

pub async fn follow_counts(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<FollowCounts>> {
    validation::validate_positive_id(user_id, "user_id")?;
    users::get_user_by_id(&state.db, user_id).await?.ok_or_not_found("User")?;
    let follower_count = follows::count_followers(&state.db, user_id).await?;
    let following_count = follows::count_following(&state.db, user_id).await?;
    Ok(Json(FollowCounts { user_id, follower_count, following_count }))
}
