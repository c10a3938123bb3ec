use axum::{
    extract::{Form, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::{token, AuthUser},
    error::{validation, AppError, AppResult},
    models::users,
    state::AppState,
    types::{CreateUserRequest, LoginForm, TokenResponse, UserCreated, UserProfile},
};

pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserCreated>)> {
    validation::validate_str_len(&req.username, "username", 1, 50)?;
    validation::validate_str_len(&req.password, "password", 8, 128)?;
    validation::validate_range(req.age, "age", 1, 120)?;

    let id = users::create_user(&state.db, &req.username, &req.password, req.age, req.gender).await?;
    tracing::info!("Created user {} ({})", id, req.username);
    Ok((StatusCode::CREATED, Json(UserCreated { id })))
}

pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserProfile>>> {
    let users = users::list_users(&state.db).await?;
    Ok(Json(users))
}

pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> AppResult<Json<TokenResponse>> {
    let user = users::authenticate_user(&state.db, &form.username, &form.password)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid username or password".to_string()))?;

    users::touch_last_login(&state.db, user.id).await?;
    let access_token = token::issue(user.id, &state.config.auth)?;
    Ok(Json(TokenResponse { access_token, token_type: "bearer".to_string() }))
}

pub async fn me(AuthUser(user): AuthUser) -> AppResult<Json<UserProfile>> {
    Ok(Json(user.profile()?))
}
