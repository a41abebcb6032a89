//! Content repository tests over the HTTP surface: creation rights,
//! per-kind ordering, deletion rules, and listing idempotence.

mod helpers;

use axum::http::StatusCode;
use aula_server::permissions::Role;
use helpers::TestApp;

#[tokio::test]
async fn members_and_guests_can_post_chat() {
    let app = TestApp::spawn().await;

    let alice = app.register("alice", "password123").await;
    let (status, body) = app
        .post(
            "/api/content/chat",
            Some(&alice),
            serde_json::json!({ "kind": "chat", "text": "hello everyone" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["owner"], "alice");

    let guest = app.guest_token().await;
    let (status, body) = app
        .post(
            "/api/content/chat",
            Some(&guest),
            serde_json::json!({ "kind": "chat", "text": "hi from a guest" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["owner"], "guest");
}

#[tokio::test]
async fn ratings_list_by_stars_descending() {
    let app = TestApp::spawn().await;
    let token = app.register("alice", "password123").await;

    for (book, stars) in [("A", 3), ("B", 5), ("C", 1)] {
        let (status, _) = app
            .post(
                "/api/content/rating",
                Some(&token),
                serde_json::json!({ "kind": "rating", "book_title": book, "rating": stars }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = app.get("/api/content/rating", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let books: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["book_title"].as_str().unwrap())
        .collect();
    assert_eq!(books, vec!["B", "A", "C"]);
}

#[tokio::test]
async fn chat_lists_newest_first() {
    let app = TestApp::spawn().await;
    let token = app.register("alice", "password123").await;

    for text in ["one", "two", "three"] {
        app.post(
            "/api/content/chat",
            Some(&token),
            serde_json::json!({ "kind": "chat", "text": text }),
        )
        .await;
    }

    let (_, body) = app.get("/api/content/chat", Some(&token)).await;
    let texts: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["three", "two", "one"]);
}

#[tokio::test]
async fn schedule_lists_by_date_ascending() {
    let app = TestApp::spawn().await;
    let token = app.register("alice", "password123").await;

    for (title, date) in [("exam", "2026-09-01"), ("orientation", "2026-08-15")] {
        app.post(
            "/api/content/schedule",
            Some(&token),
            serde_json::json!({ "kind": "schedule", "title": title, "date": date }),
        )
        .await;
    }

    let (_, body) = app.get("/api/content/schedule", Some(&token)).await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["orientation", "exam"]);
}

#[tokio::test]
async fn listing_twice_returns_identical_sequences() {
    let app = TestApp::spawn().await;
    let token = app.register("alice", "password123").await;

    for (book, stars) in [("A", 2), ("B", 4), ("C", 4)] {
        app.post(
            "/api/content/rating",
            Some(&token),
            serde_json::json!({ "kind": "rating", "book_title": book, "rating": stars }),
        )
        .await;
    }

    let (_, first) = app.get("/api/content/rating", Some(&token)).await;
    let (_, second) = app.get("/api/content/rating", Some(&token)).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn owners_delete_their_own_items() {
    let app = TestApp::spawn().await;
    let token = app.register("alice", "password123").await;

    let (_, item) = app
        .post(
            "/api/content/chat",
            Some(&token),
            serde_json::json!({ "kind": "chat", "text": "oops" }),
        )
        .await;
    let id = item["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .delete(&format!("/api/content/chat/{id}"), Some(&token))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = app.get("/api/content/chat", Some(&token)).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn students_cannot_delete_others_items_but_teachers_can() {
    let app = TestApp::spawn().await;
    let alice = app.register("alice", "password123").await;
    let bob = app.register("bob", "password123").await;

    let (_, item) = app
        .post(
            "/api/content/chat",
            Some(&alice),
            serde_json::json!({ "kind": "chat", "text": "mine" }),
        )
        .await;
    let id = item["id"].as_str().unwrap().to_string();
    let uri = format!("/api/content/chat/{id}");

    let (status, body) = app.delete(&uri, Some(&bob)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");

    let teacher = app
        .register_with_role("teach", "password123", Role::Teacher)
        .await;
    let (status, _) = app.delete(&uri, Some(&teacher)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = app.get("/api/content/chat", Some(&alice)).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn deleting_missing_item_is_not_found() {
    let app = TestApp::spawn().await;
    let token = app.register("alice", "password123").await;

    let (status, body) = app
        .delete(
            "/api/content/chat/018f4e6a-0000-7000-8000-000000000000",
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "CONTENT_NOT_FOUND");
}

#[tokio::test]
async fn payload_kind_must_match_path() {
    let app = TestApp::spawn().await;
    let token = app.register("alice", "password123").await;

    let (status, body) = app
        .post(
            "/api/content/homework",
            Some(&token),
            serde_json::json!({ "kind": "chat", "text": "sneaky" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "KIND_MISMATCH");
}

#[tokio::test]
async fn unknown_kind_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.register("alice", "password123").await;

    let (status, body) = app.get("/api/content/podcast", Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "UNKNOWN_KIND");
}

#[tokio::test]
async fn rating_values_are_bounded() {
    let app = TestApp::spawn().await;
    let token = app.register("alice", "password123").await;

    for stars in [0, 6] {
        let (status, body) = app
            .post(
                "/api/content/rating",
                Some(&token),
                serde_json::json!({ "kind": "rating", "book_title": "Holes", "rating": stars }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "accepted rating {stars}");
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn announcements_require_staff_even_via_content_endpoint() {
    let app = TestApp::spawn().await;
    let student = app.register("alice", "password123").await;

    let (status, body) = app
        .post(
            "/api/content/announcement",
            Some(&student),
            serde_json::json!({ "kind": "announcement", "text": "class canceled" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");

    let teacher = app
        .register_with_role("teach", "password123", Role::Teacher)
        .await;
    let (status, _) = app
        .post(
            "/api/content/announcement",
            Some(&teacher),
            serde_json::json!({ "kind": "announcement", "text": "class canceled" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn listing_is_capped() {
    let mut config = aula_server::config::Config::default_for_test();
    config.list_cap = 5;
    let app = TestApp::spawn_with(config).await;
    let token = app.register("alice", "password123").await;

    for i in 0..8 {
        app.post(
            "/api/content/chat",
            Some(&token),
            serde_json::json!({ "kind": "chat", "text": format!("message {i}") }),
        )
        .await;
    }

    let (_, body) = app.get("/api/content/chat", Some(&token)).await;
    assert_eq!(body.as_array().unwrap().len(), 5);
}
