use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::db;
use crate::models::{follows, likes, movies, reviews, users};
use crate::types::{Gender, MovieBody, Reaction};

async fn mk_pool() -> SqlitePool {
    let pool =
        SqlitePoolOptions::new().max_connections(1).connect("sqlite::memory:").await.unwrap();
    db::init_db(&pool).await.unwrap();
    pool
}

#[tokio::test]
async fn init_db_is_idempotent() {
    let pool = mk_pool().await;
    db::init_db(&pool).await.unwrap();
    db::init_db(&pool).await.unwrap();
}

#[tokio::test]
async fn user_passwords_are_stored_hashed() {
    let pool = mk_pool().await;
    let id = users::create_user(&pool, "alice", "plaintext-password", 30, Gender::Female)
        .await
        .unwrap();
    let row = users::get_user_by_id(&pool, id).await.unwrap().unwrap();
    assert_ne!(row.hashed_password, "plaintext-password");
    assert!(row.hashed_password.starts_with("$argon2"));
}

#[tokio::test]
async fn authenticate_user_checks_the_password() {
    let pool = mk_pool().await;
    users::create_user(&pool, "bob", "the-right-password", 40, Gender::Male).await.unwrap();

    assert!(users::authenticate_user(&pool, "bob", "the-right-password")
        .await
        .unwrap()
        .is_some());
    assert!(users::authenticate_user(&pool, "bob", "the-wrong-password")
        .await
        .unwrap()
        .is_none());
    assert!(users::authenticate_user(&pool, "nobody", "anything").await.unwrap().is_none());
}

#[tokio::test]
async fn deleting_a_movie_cascades_to_reviews_and_reactions() {
    let pool = mk_pool().await;
    let user_id = users::create_user(&pool, "carol", "a-long-password", 25, Gender::Female)
        .await
        .unwrap();
    let movie = movies::create_movie(
        &pool,
        &MovieBody {
            title: "High and Low".to_string(),
            plot: "-".to_string(),
            playtime: 143,
            genre: vec!["crime".to_string()],
            cast: vec![],
        },
    )
    .await
    .unwrap();
    let review =
        reviews::create_review(&pool, user_id, movie.id, "t", "c", None).await.unwrap();
    likes::create_review_like(&pool, user_id, review.id, true).await.unwrap();
    likes::create_movie_reaction(&pool, user_id, movie.id, Reaction::Like).await.unwrap();

    assert!(movies::delete_movie_by_id(&pool, movie.id).await.unwrap());

    assert!(reviews::get_review_by_id(&pool, review.id).await.unwrap().is_none());
    let like_rows: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM review_likes").fetch_one(&pool).await.unwrap();
    assert_eq!(like_rows, 0);
    let reaction_rows: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM movie_reactions").fetch_one(&pool).await.unwrap();
    assert_eq!(reaction_rows, 0);
}

#[tokio::test]
async fn duplicate_follow_edge_violates_unique_constraint() {
    let pool = mk_pool().await;
    let a = users::create_user(&pool, "a", "a-long-password", 20, Gender::Male).await.unwrap();
    let b = users::create_user(&pool, "b", "a-long-password", 21, Gender::Female).await.unwrap();

    follows::create_follow(&pool, a, b).await.unwrap();
    assert!(follows::create_follow(&pool, a, b).await.is_err());
}

#[tokio::test]
async fn movie_genre_roundtrips_through_json_column() {
    let pool = mk_pool().await;
    let body = MovieBody {
        title: "Seven Samurai".to_string(),
        plot: "-".to_string(),
        playtime: 207,
        genre: vec!["action".to_string(), "drama".to_string()],
        cast: vec!["Toshiro Mifune".to_string()],
    };
    let created = movies::create_movie(&pool, &body).await.unwrap();
    let fetched = movies::get_movie_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(fetched.genre, body.genre);
    assert_eq!(fetched.cast, body.cast);
}
