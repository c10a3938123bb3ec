use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::AuthUser,
    error::{validation, AppError, AppResult, OptionExt},
    models::{movies, reviews},
    state::AppState,
    types::ReviewDto,
    upload,
};

/// Fields collected from a multipart review submission.
#[derive(Default)]
struct ReviewForm {
    movie_id: Option<i64>,
    title: Option<String>,
    content: Option<String>,
    image: Option<(String, Vec<u8>)>,
}

async fn read_review_form(multipart: &mut Multipart) -> AppResult<ReviewForm> {
    let mut form = ReviewForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "movie_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?;
                let id = text.trim().parse::<i64>().map_err(|_| AppError::Validation {
                    field: "movie_id".to_string(),
                    message: format!("Expected an integer, got '{}'", text),
                })?;
                form.movie_id = Some(id);
            }
            "title" | "content" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?;
                if name == "title" {
                    form.title = Some(text);
                } else {
                    form.content = Some(text);
                }
            }
            "review_image" => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| AppError::BadRequest("review_image must be a file".to_string()))?;
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?;
                // Browsers send an empty part for an untouched file input
                if !data.is_empty() {
                    form.image = Some((file_name, data.to_vec()));
                }
            }
            other => tracing::debug!("Ignoring unknown multipart field: {}", other),
        }
    }
    Ok(form)
}

fn require_text(value: Option<String>, field: &str, max: usize) -> AppResult<String> {
    let text = value.ok_or_else(|| AppError::Validation {
        field: field.to_string(),
        message: "Field is required".to_string(),
    })?;
    validation::validate_str_len(&text, field, 1, max)?;
    Ok(text)
}

pub async fn create_review(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ReviewDto>)> {
    let form = read_review_form(&mut multipart).await?;

    let movie_id = form.movie_id.ok_or_else(|| AppError::Validation {
        field: "movie_id".to_string(),
        message: "Field is required".to_string(),
    })?;
    validation::validate_positive_id(movie_id, "movie_id")?;
    let title = require_text(form.title, "title", 50)?;
    let content = require_text(form.content, "content", 255)?;

    // Reject bad extensions before anything is written anywhere
    if let Some((file_name, _)) = &form.image {
        upload::validate_image_extension(file_name)?;
    }
    movies::get_movie_by_id(&state.db, movie_id).await?.ok_or_not_found("Movie")?;

    let mut image_url: Option<String> = None;
    if let Some((file_name, data)) = &form.image {
        image_url =
            Some(upload::save_upload(&state.config.media.dir, "reviews", file_name, data).await?);
    }

    let review = reviews::create_review(
        &state.db,
        user.id,
        movie_id,
        &title,
        &content,
        image_url.as_deref(),
    )
    .await?;
    tracing::info!("User {} reviewed movie {} (review {})", user.id, movie_id, review.id);
    Ok((StatusCode::CREATED, Json(review)))
}

pub async fn get_review(
    State(state): State<AppState>,
    Path(review_id): Path<i64>,
) -> AppResult<Json<ReviewDto>> {
    validation::validate_positive_id(review_id, "review_id")?;
    let review = reviews::get_review_by_id(&state.db, review_id).await?.ok_or_not_found("Review")?;
    Ok(Json(review))
}

pub async fn update_review(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(review_id): Path<i64>,
    mut multipart: Multipart,
) -> AppResult<Json<ReviewDto>> {
    validation::validate_positive_id(review_id, "review_id")?;
    let existing =
        reviews::get_review_by_id(&state.db, review_id).await?.ok_or_not_found("Review")?;
    if existing.user_id != user.id {
        return Err(AppError::Forbidden("Not authorized to update this review".to_string()));
    }

    let form = read_review_form(&mut multipart).await?;
    let title = require_text(form.title, "title", 50)?;
    let content = require_text(form.content, "content", 255)?;

    let mut image_url = existing.review_image_url.clone();
    if let Some((file_name, data)) = &form.image {
        upload::validate_image_extension(file_name)?;
        // Replace: the old file goes away once the new one is stored
        let new_url = upload::save_upload(&state.config.media.dir, "reviews", file_name, data).await?;
        if let Some(old) = &image_url {
            upload::delete_upload(&state.config.media.dir, old).await;
        }
        image_url = Some(new_url);
    }

    let updated =
        reviews::update_review_by_id(&state.db, review_id, &title, &content, image_url.as_deref())
            .await?
            .ok_or_not_found("Review")?;
    Ok(Json(updated))
}

pub async fn delete_review(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(review_id): Path<i64>,
) -> AppResult<StatusCode> {
    validation::validate_positive_id(review_id, "review_id")?;
    let existing =
        reviews::get_review_by_id(&state.db, review_id).await?.ok_or_not_found("Review")?;
    if existing.user_id != user.id {
        return Err(AppError::Forbidden("Not authorized to delete this review".to_string()));
    }

    if !reviews::delete_review_by_id(&state.db, review_id).await? {
        return Err(AppError::NotFound("Review not found".to_string()));
    }
    if let Some(url) = &existing.review_image_url {
        upload::delete_upload(&state.config.media.dir, url).await;
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn my_reviews(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> AppResult<Json<Vec<ReviewDto>>> {
    let reviews = reviews::list_reviews_by_user(&state.db, user.id).await?;
    Ok(Json(reviews))
}

pub async fn movie_reviews(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
) -> AppResult<Json<Vec<ReviewDto>>> {
    validation::validate_positive_id(movie_id, "movie_id")?;
    let reviews = reviews::list_reviews_by_movie(&state.db, movie_id).await?;
    Ok(Json(reviews))
}
