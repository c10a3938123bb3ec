use super::*;

#[tokio::test]
async fn create_review_without_token_is_unauthorized() {
    let (app, _state, _media) = setup_test_app().await;
    let resp = send_multipart(
        &app,
        "POST",
        "/reviews",
        "garbage-token",
        &[("movie_id", "1"), ("title", "t"), ("content", "c")],
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn review_lifecycle_without_image() {
    let (app, _state, _media) = setup_test_app().await;
    let (user_id, token) = signup_and_login(&app, "alice").await;
    let movie_id = create_test_movie(&app, "Stalker").await;

    let resp = send_multipart(
        &app,
        "POST",
        "/reviews",
        &token,
        &[
            ("movie_id", &movie_id.to_string()),
            ("title", "Slow but haunting"),
            ("content", "The zone stays with you."),
        ],
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let review = body_json(resp).await;
    let review_id = review["id"].as_i64().unwrap();
    assert_eq!(review["user_id"].as_i64().unwrap(), user_id);
    assert_eq!(review["movie_id"].as_i64().unwrap(), movie_id);
    assert!(review["review_image_url"].is_null());

    let resp = get(&app, &format!("/reviews/{}", review_id)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["title"], "Slow but haunting");

    let resp = send_multipart(
        &app,
        "PUT",
        &format!("/reviews/{}", review_id),
        &token,
        &[("title", "Haunting"), ("content", "Still thinking about it.")],
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["title"], "Haunting");

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/reviews/{}", review_id))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = get(&app, &format!("/reviews/{}", review_id)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn review_with_image_stores_and_replaces_the_file() {
    let (app, state, _media) = setup_test_app().await;
    let (_user_id, token) = signup_and_login(&app, "bob").await;
    let movie_id = create_test_movie(&app, "Solaris").await;

    let resp = send_multipart(
        &app,
        "POST",
        "/reviews",
        &token,
        &[("movie_id", &movie_id.to_string()), ("title", "t"), ("content", "c")],
        Some(("review_image", "poster.png", b"first-image")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let review = body_json(resp).await;
    let review_id = review["id"].as_i64().unwrap();
    let first_url = review["review_image_url"].as_str().unwrap().to_string();
    assert!(first_url.starts_with("/media/reviews/"));

    let media_dir = state.config.media.dir.clone();
    let first_path =
        std::path::Path::new(&media_dir).join(first_url.strip_prefix("/media/").unwrap());
    assert!(first_path.is_file());

    // Replacing the image removes the old file
    let resp = send_multipart(
        &app,
        "PUT",
        &format!("/reviews/{}", review_id),
        &token,
        &[("title", "t"), ("content", "c")],
        Some(("review_image", "better.jpg", b"second-image")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    let second_url = updated["review_image_url"].as_str().unwrap().to_string();
    assert_ne!(second_url, first_url);
    assert!(!first_path.exists());

    // Deleting the review removes the current file
    let second_path =
        std::path::Path::new(&media_dir).join(second_url.strip_prefix("/media/").unwrap());
    assert!(second_path.is_file());
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/reviews/{}", review_id))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(!second_path.exists());
}

#[tokio::test]
async fn review_rejects_non_image_upload() {
    let (app, _state, _media) = setup_test_app().await;
    let (_user_id, token) = signup_and_login(&app, "carol").await;
    let movie_id = create_test_movie(&app, "Mirror").await;

    let resp = send_multipart(
        &app,
        "POST",
        "/reviews",
        &token,
        &[("movie_id", &movie_id.to_string()), ("title", "t"), ("content", "c")],
        Some(("review_image", "script.exe", b"MZ")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn review_for_missing_movie_is_not_found() {
    let (app, _state, _media) = setup_test_app().await;
    let (_user_id, token) = signup_and_login(&app, "dave").await;

    let resp = send_multipart(
        &app,
        "POST",
        "/reviews",
        &token,
        &[("movie_id", "4242"), ("title", "t"), ("content", "c")],
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn review_field_limits_are_enforced() {
    let (app, _state, _media) = setup_test_app().await;
    let (_user_id, token) = signup_and_login(&app, "erin").await;
    let movie_id = create_test_movie(&app, "Nostalghia").await;

    let long_title = "x".repeat(51);
    let resp = send_multipart(
        &app,
        "POST",
        "/reviews",
        &token,
        &[("movie_id", &movie_id.to_string()), ("title", &long_title), ("content", "c")],
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let long_content = "y".repeat(256);
    let resp = send_multipart(
        &app,
        "POST",
        "/reviews",
        &token,
        &[("movie_id", &movie_id.to_string()), ("title", "t"), ("content", &long_content)],
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn only_the_author_may_update_or_delete() {
    let (app, _state, _media) = setup_test_app().await;
    let (_alice_id, alice_token) = signup_and_login(&app, "alice").await;
    let (_mallory_id, mallory_token) = signup_and_login(&app, "mallory").await;
    let movie_id = create_test_movie(&app, "Persona").await;

    let resp = send_multipart(
        &app,
        "POST",
        "/reviews",
        &alice_token,
        &[("movie_id", &movie_id.to_string()), ("title", "mine"), ("content", "c")],
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let review_id = body_json(resp).await["id"].as_i64().unwrap();

    let resp = send_multipart(
        &app,
        "PUT",
        &format!("/reviews/{}", review_id),
        &mallory_token,
        &[("title", "hijacked"), ("content", "c")],
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/reviews/{}", review_id))
                .header(header::AUTHORIZATION, format!("Bearer {}", mallory_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn review_listings_are_newest_first() {
    let (app, _state, _media) = setup_test_app().await;
    let (_user_id, token) = signup_and_login(&app, "frank").await;
    let movie_id = create_test_movie(&app, "Ran").await;

    for title in ["first", "second", "third"] {
        let resp = send_multipart(
            &app,
            "POST",
            "/reviews",
            &token,
            &[("movie_id", &movie_id.to_string()), ("title", title), ("content", "c")],
            None,
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = get_authed(&app, "/users/me/reviews", &token).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let mine = body_json(resp).await;
    let titles: Vec<&str> =
        mine.as_array().unwrap().iter().map(|r| r["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["third", "second", "first"]);

    let resp = get(&app, &format!("/movies/{}/reviews", movie_id)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await.as_array().unwrap().len(), 3);
}
