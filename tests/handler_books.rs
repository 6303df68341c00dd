mod common;

use axum::http::StatusCode;
use library_backend::domain::repositories::BookRepository;
use serde_json::{Value, json};

fn clean_code() -> Value {
    json!({
        "title": "Clean Code",
        "author": "Robert C. Martin",
        "year": 2008,
        "isbn": "9780132350884",
        "description": "A Handbook of Agile Software Craftsmanship"
    })
}

// ─── CREATE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_then_get() {
    let app = common::spawn_app();

    let response = app.server.post("/api/v1/books").json(&clean_code()).await;

    response.assert_status(StatusCode::CREATED);
    let json = response.json::<Value>();
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Book created successfully");
    assert_eq!(json["data"]["title"], "Clean Code");
    assert!(json["data"]["created_at"].is_string());

    let id = json["data"]["id"].as_i64().unwrap();
    let response = app.server.get(&format!("/api/v1/books/{id}")).await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["data"]["id"], id);
    assert_eq!(json["data"]["isbn"], "9780132350884");
}

#[tokio::test]
async fn test_create_validation_failed() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api/v1/books")
        .json(&json!({ "title": "", "author": "Someone", "year": 999 }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<Value>();
    assert_eq!(json["success"], false);
    assert_eq!(common::error_code(&json), "VALIDATION_FAILED");
    assert!(json["details"]["title"].is_array());
    assert!(json["details"]["year"].is_array());
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_create_malformed_json() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api/v1/books")
        .text("{ not json")
        .content_type("application/json")
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        common::error_code(&response.json::<Value>()),
        "VALIDATION_FAILED"
    );
}

#[tokio::test]
async fn test_create_empty_isbn_is_absent() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api/v1/books")
        .json(&json!({
            "title": "Microservices Patterns",
            "author": "Chris Richardson",
            "year": 2018,
            "isbn": ""
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert!(response.json::<Value>()["data"].get("isbn").is_none());
}

#[tokio::test]
async fn test_create_duplicate_isbn_conflict() {
    let app = common::spawn_app();

    app.server
        .post("/api/v1/books")
        .json(&clean_code())
        .await
        .assert_status(StatusCode::CREATED);

    let response = app.server.post("/api/v1/books").json(&clean_code()).await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(common::error_code(&response.json::<Value>()), "CONFLICT");
}

// ─── GET ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_unknown_book() {
    let app = common::spawn_app();

    let response = app.server.get("/api/v1/books/999").await;

    response.assert_status_not_found();
    assert_eq!(common::error_code(&response.json::<Value>()), "NOT_FOUND");
}

#[tokio::test]
async fn test_get_non_numeric_id() {
    let app = common::spawn_app();

    let response = app.server.get("/api/v1/books/abc").await;

    response.assert_status_bad_request();
    assert_eq!(
        common::error_code(&response.json::<Value>()),
        "VALIDATION_FAILED"
    );
}

// ─── LIST ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_defaults() {
    let app = common::spawn_app();
    for i in 0..12 {
        common::create_test_book(&app, &format!("Book {i}"), "Author", 2000).await;
    }

    let response = app.server.get("/api/v1/books").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["data"].as_array().unwrap().len(), 10);
    assert_eq!(json["total"], 12);
    assert_eq!(json["page"], 1);
    assert_eq!(json["limit"], 10);
    // newest first
    assert_eq!(json["data"][0]["title"], "Book 11");
}

#[tokio::test]
async fn test_list_second_page() {
    let app = common::spawn_app();
    for i in 0..12 {
        common::create_test_book(&app, &format!("Book {i}"), "Author", 2000).await;
    }

    let response = app
        .server
        .get("/api/v1/books")
        .add_query_param("limit", 5)
        .add_query_param("offset", 10)
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["total"], 12);
    assert_eq!(json["page"], 3);
    assert_eq!(json["limit"], 5);
}

#[tokio::test]
async fn test_list_limit_is_clamped() {
    let app = common::spawn_app();
    common::create_test_book(&app, "Only", "Author", 2000).await;

    let json = app
        .server
        .get("/api/v1/books")
        .add_query_param("limit", 500)
        .await
        .json::<Value>();
    assert_eq!(json["limit"], 100);

    let json = app
        .server
        .get("/api/v1/books")
        .add_query_param("limit", 0)
        .add_query_param("offset", -4)
        .await
        .json::<Value>();
    assert_eq!(json["limit"], 10);
    assert_eq!(json["page"], 1);
    assert_eq!(json["total"], 1);
}

#[tokio::test]
async fn test_list_filters() {
    let app = common::spawn_app();
    common::create_test_book(&app, "Clean Code", "Robert C. Martin", 2008).await;
    common::create_test_book(&app, "Clean Architecture", "Robert C. Martin", 2017).await;
    common::create_test_book(&app, "Design Patterns", "Gang of Four", 1994).await;

    let json = app
        .server
        .get("/api/v1/books")
        .add_query_param("title", "CLEAN")
        .await
        .json::<Value>();
    assert_eq!(json["total"], 2);

    let json = app
        .server
        .get("/api/v1/books")
        .add_query_param("author", "martin")
        .add_query_param("year", 2017)
        .await
        .json::<Value>();
    assert_eq!(json["total"], 1);
    assert_eq!(json["data"][0]["title"], "Clean Architecture");
}

#[tokio::test]
async fn test_list_bad_year_param() {
    let app = common::spawn_app();

    let response = app
        .server
        .get("/api/v1/books")
        .add_query_param("year", "nineteen")
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_list_excludes_deleted() {
    let app = common::spawn_app();
    let keep = common::create_test_book(&app, "Keep", "Author", 2000).await;
    let gone = common::create_test_book(&app, "Gone", "Author", 2000).await;
    app.books.soft_delete(gone).await.unwrap();

    let json = app.server.get("/api/v1/books").await.json::<Value>();

    assert_eq!(json["total"], 1);
    assert_eq!(json["data"][0]["id"], keep);
}

// ─── UPDATE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_title_only() {
    let app = common::spawn_app();
    let created = app
        .server
        .post("/api/v1/books")
        .json(&clean_code())
        .await
        .json::<Value>();
    let id = created["data"]["id"].as_i64().unwrap();

    let response = app
        .server
        .put(&format!("/api/v1/books/{id}"))
        .json(&json!({ "title": "Clean Code (2nd ed.)" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["message"], "Book updated successfully");
    assert_eq!(json["data"]["title"], "Clean Code (2nd ed.)");
    assert_eq!(json["data"]["author"], "Robert C. Martin");
    assert_eq!(json["data"]["year"], 2008);
    assert_eq!(json["data"]["isbn"], "9780132350884");
    assert_eq!(json["data"]["created_at"], created["data"]["created_at"]);
}

#[tokio::test]
async fn test_update_null_clears_optional_fields() {
    let app = common::spawn_app();
    let created = app
        .server
        .post("/api/v1/books")
        .json(&clean_code())
        .await
        .json::<Value>();
    let id = created["data"]["id"].as_i64().unwrap();

    let response = app
        .server
        .put(&format!("/api/v1/books/{id}"))
        .json(&json!({ "isbn": null, "description": null }))
        .await;

    response.assert_status_ok();
    let data = &response.json::<Value>()["data"];
    assert!(data.get("isbn").is_none());
    assert!(data.get("description").is_none());
    assert_eq!(data["title"], "Clean Code");
}

#[tokio::test]
async fn test_update_invalid_year() {
    let app = common::spawn_app();
    let id = common::create_test_book(&app, "Book", "Author", 2000).await;

    let response = app
        .server
        .put(&format!("/api/v1/books/{id}"))
        .json(&json!({ "year": 3000 }))
        .await;

    response.assert_status_bad_request();
    assert!(response.json::<Value>()["details"]["year"].is_array());
}

#[tokio::test]
async fn test_update_unknown_book() {
    let app = common::spawn_app();

    let response = app
        .server
        .put("/api/v1/books/42")
        .json(&json!({ "title": "Nope" }))
        .await;

    response.assert_status_not_found();
}

// ─── DELETE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_twice() {
    let app = common::spawn_app();
    let id = common::create_test_book(&app, "Book", "Author", 2000).await;

    let response = app.server.delete(&format!("/api/v1/books/{id}")).await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Book deleted successfully");
    assert!(json.get("data").is_none());

    app.server
        .get(&format!("/api/v1/books/{id}"))
        .await
        .assert_status_not_found();
    app.server
        .delete(&format!("/api/v1/books/{id}"))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_deleted_isbn_can_be_reused() {
    let app = common::spawn_app();
    let created = app
        .server
        .post("/api/v1/books")
        .json(&clean_code())
        .await
        .json::<Value>();
    let id = created["data"]["id"].as_i64().unwrap();

    app.server
        .delete(&format!("/api/v1/books/{id}"))
        .await
        .assert_status_ok();

    app.server
        .post("/api/v1/books")
        .json(&clean_code())
        .await
        .assert_status(StatusCode::CREATED);
}

// ─── SEARCH ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_search_matches_author_and_description() {
    let app = common::spawn_app();
    app.server
        .post("/api/v1/books")
        .json(&clean_code())
        .await
        .assert_status(StatusCode::CREATED);
    app.server
        .post("/api/v1/books")
        .json(&json!({
            "title": "Microservices Patterns",
            "author": "Chris Richardson",
            "year": 2018,
            "description": "With examples in Java"
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let json = app
        .server
        .get("/api/v1/books/search")
        .add_query_param("q", "martin")
        .await
        .json::<Value>();
    assert_eq!(json["total"], 1);
    assert_eq!(json["data"][0]["title"], "Clean Code");

    let json = app
        .server
        .get("/api/v1/books/search")
        .add_query_param("q", "java")
        .await
        .json::<Value>();
    assert_eq!(json["total"], 1);
    assert_eq!(json["data"][0]["title"], "Microservices Patterns");
}

#[tokio::test]
async fn test_search_blank_query() {
    let app = common::spawn_app();

    app.server
        .get("/api/v1/books/search")
        .await
        .assert_status_bad_request();

    let response = app
        .server
        .get("/api/v1/books/search")
        .add_query_param("q", "   ")
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        common::error_code(&response.json::<Value>()),
        "VALIDATION_FAILED"
    );
}
