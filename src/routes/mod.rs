//! HTTP route handlers, one module per resource.

pub mod follows;
pub mod health;
pub mod likes;
pub mod movies;
pub mod reviews;
pub mod users;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Builds the API router. Layers (tracing, limits, CORS) are applied by the
/// caller; tests mount this router directly.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/version", get(health::version))
        // users
        .route("/users", get(users::list_users))
        .route("/users/create", post(users::create_user))
        .route("/users/login", post(users::login))
        .route("/users/me", get(users::me))
        // movies
        .route("/movies", post(movies::create_movie).get(movies::list_movies))
        .route(
            "/movies/{id}",
            get(movies::get_movie).put(movies::update_movie).delete(movies::delete_movie),
        )
        // reviews
        .route("/reviews", post(reviews::create_review))
        .route(
            "/reviews/{id}",
            get(reviews::get_review).put(reviews::update_review).delete(reviews::delete_review),
        )
        .route("/users/me/reviews", get(reviews::my_reviews))
        .route("/movies/{id}/reviews", get(reviews::movie_reviews))
        // likes & reactions
        .route("/likes/reviews/{id}/like", post(likes::like_review))
        .route("/likes/reviews/{id}/unlike", post(likes::unlike_review))
        .route("/likes/reviews/{id}/like_count", get(likes::review_like_count))
        .route("/likes/reviews/{id}/is_liked", get(likes::review_liked_status))
        .route("/likes/movies/{id}/like", post(likes::like_movie))
        .route("/likes/movies/{id}/dislike", post(likes::dislike_movie))
        .route("/likes/movies/{id}/reaction_count", get(likes::movie_reaction_count))
        // follow graph
        .route("/follows/users/{id}/follow", post(follows::follow_user))
        .route("/follows/users/{id}/unfollow", post(follows::unfollow_user))
        .route("/follows/users/{id}/followers", get(follows::list_followers))
        .route("/follows/users/{id}/following", get(follows::list_following))
        .route("/follows/users/{id}/counts", get(follows::follow_counts))
}
