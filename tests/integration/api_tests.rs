//! API integration tests

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use bookshelf_server::{api, config::AppConfig, i18n::Locale, AppState};

fn app() -> Router {
    api::router(AppState::new(AppConfig::default()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).expect("Failed to build request"))
        .await
        .expect("Failed to send request");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, body)
}

fn harry_potter() -> Value {
    json!({
        "name": "Harry Potter",
        "year": 1997,
        "author": "J.K. Rowling",
        "summary": "A boy wizard",
        "publisher": "Gramedia",
        "pageCount": 200,
        "readPage": 200,
        "reading": false
    })
}

async fn create(app: &Router, payload: Value) -> String {
    let (status, body) = send(app, Method::POST, "/books", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["bookId"].as_str().expect("No book ID").to_string()
}

async fn list_names(app: &Router, query: &str) -> Vec<String> {
    let (status, body) = send(app, Method::GET, &format!("/books{}", query), None).await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["books"]
        .as_array()
        .expect("books is not an array")
        .iter()
        .map(|b| b["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    create(&app, harry_potter()).await;
    let (_, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(body["books"], 1);
    assert_eq!(body["locale"], "id");
}

#[tokio::test]
async fn test_create_and_get_book() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/books", Some(harry_potter())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Buku berhasil ditambahkan");
    let id = body["data"]["bookId"].as_str().expect("No book ID").to_string();
    assert_eq!(id.len(), 16);

    let (status, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "success",
            "data": { "books": [{ "id": id, "name": "Harry Potter", "publisher": "Gramedia" }] }
        })
    );

    let (status, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let book = &body["data"]["book"];
    assert_eq!(book["id"], id.as_str());
    assert_eq!(book["finished"], true);
    assert_eq!(book["reading"], false);
    assert_eq!(book["pageCount"], 200);
    assert_eq!(book["insertedAt"], book["updatedAt"]);
}

#[tokio::test]
async fn test_create_validation() {
    let app = app();

    let mut nameless = harry_potter();
    nameless.as_object_mut().unwrap().remove("name");
    let (status, body) = send(&app, Method::POST, "/books", Some(nameless)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "status": "fail", "message": "Gagal menambahkan buku. Mohon isi nama buku" })
    );

    let mut too_far = harry_potter();
    too_far["readPage"] = json!(201);
    let (status, body) = send(&app, Method::POST, "/books", Some(too_far)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount"
    );

    assert!(list_names(&app, "").await.is_empty());
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let app = app();
    let mut negative = harry_potter();
    negative["pageCount"] = json!(-1);

    let (status, body) = send(&app, Method::POST, "/books", Some(negative)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert!(list_names(&app, "").await.is_empty());
}

#[tokio::test]
async fn test_get_unknown_book() {
    let (status, body) = send(&app(), Method::GET, "/books/nonexistent-id", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "status": "fail", "message": "Buku tidak ditemukan" }));
}

#[tokio::test]
async fn test_update_book() {
    let app = app();
    let id = create(&app, harry_potter()).await;

    let mut change = harry_potter();
    change["name"] = json!("Harry Potter dan Batu Bertuah");
    change["readPage"] = json!(10);
    change["reading"] = json!(true);
    let (status, body) = send(&app, Method::PUT, &format!("/books/{}", id), Some(change)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "success", "message": "Buku berhasil diperbarui" }));

    let (_, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    let book = &body["data"]["book"];
    assert_eq!(book["name"], "Harry Potter dan Batu Bertuah");
    assert_eq!(book["finished"], false);
    assert_eq!(book["reading"], true);
}

#[tokio::test]
async fn test_update_failures() {
    let app = app();
    let id = create(&app, harry_potter()).await;

    let mut nameless = harry_potter();
    nameless["name"] = json!("");
    let (status, body) = send(&app, Method::PUT, "/books/unknown", Some(nameless)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Gagal memperbarui buku. Mohon isi nama buku");

    let mut too_far = harry_potter();
    too_far["readPage"] = json!(300);
    let (status, body) = send(&app, Method::PUT, &format!("/books/{}", id), Some(too_far)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Gagal memperbarui buku. readPage tidak boleh lebih besar dari pageCount"
    );

    let (status, body) = send(&app, Method::PUT, "/books/unknown", Some(harry_potter())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Gagal memperbarui buku. Id tidak ditemukan");

    let (_, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(body["data"]["book"]["readPage"], 200);
}

#[tokio::test]
async fn test_delete_book() {
    let app = app();
    let id = create(&app, harry_potter()).await;
    create(&app, json!({ "name": "Laskar Pelangi", "pageCount": 10, "readPage": 1 })).await;

    let (status, body) = send(&app, Method::DELETE, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "success", "message": "Buku berhasil dihapus" }));

    let (status, _) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(list_names(&app, "").await, vec!["Laskar Pelangi"]);

    let (status, body) = send(&app, Method::DELETE, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Buku gagal dihapus. Id tidak ditemukan");
}

#[tokio::test]
async fn test_list_filters() {
    let app = app();
    create(&app, harry_potter()).await;
    create(
        &app,
        json!({ "name": "Bumi Manusia", "publisher": "Hasta Mitra", "pageCount": 500, "readPage": 20, "reading": true }),
    )
    .await;
    create(
        &app,
        json!({ "name": "Harry Potter 2", "pageCount": 300, "readPage": 0, "reading": true }),
    )
    .await;

    assert_eq!(list_names(&app, "?name=harry").await, vec!["Harry Potter", "Harry Potter 2"]);
    assert_eq!(list_names(&app, "?name=MANUSIA").await, vec!["Bumi Manusia"]);
    assert_eq!(list_names(&app, "?reading=1").await, vec!["Bumi Manusia", "Harry Potter 2"]);
    assert_eq!(list_names(&app, "?reading=0").await, vec!["Harry Potter"]);
    assert_eq!(list_names(&app, "?finished=1").await, vec!["Harry Potter"]);
    assert_eq!(
        list_names(&app, "?finished=0&name=harry").await,
        vec!["Harry Potter 2"]
    );
    assert!(list_names(&app, "?reading=yes").await.is_empty());
}

#[tokio::test]
async fn test_list_with_repeated_keys() {
    let app = app();
    create(&app, harry_potter()).await;
    create(&app, json!({ "name": "Bumi Manusia", "pageCount": 5, "readPage": 1, "reading": true })).await;

    let (status, body) = send(&app, Method::GET, "/books?reading=0&reading=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "success", "data": { "books": [] } }));

    assert!(list_names(&app, "?name=harry&name=potter").await.is_empty());
    assert_eq!(list_names(&app, "?unknown=1&unknown=2").await.len(), 2);
}

#[tokio::test]
async fn test_absent_details_omitted() {
    let app = app();
    let id = create(&app, json!({ "name": "Tanpa Penerbit" })).await;

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(body["data"]["books"][0], json!({ "id": id, "name": "Tanpa Penerbit" }));

    let (_, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    let book = body["data"]["book"].as_object().expect("book is not an object");
    assert!(!book.contains_key("publisher"));
    assert!(!book.contains_key("year"));
    assert_eq!(book["finished"], true);
}

#[tokio::test]
async fn test_english_messages() {
    let mut config = AppConfig::default();
    config.catalog.locale = Locale::En;
    let app = api::router(AppState::new(config));

    let (status, body) = send(&app, Method::GET, "/books/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Book not found");
}
