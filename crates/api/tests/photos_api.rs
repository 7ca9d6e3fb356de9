//! Integration tests for photo sections and photo uploads.

mod common;

use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use common::{
    body_bytes, body_json, create_test_user, delete_auth, get, login, post_json_auth,
    post_multipart, put_json_auth, send_json, Auth, Part, TEST_PASSWORD,
};
use sideludi_api::error::AppError;
use sideludi_core::upload::{MAX_UPLOAD_BYTES, MULTIPART_OVERHEAD_BYTES};
use sideludi_db::models::photo::CreatePhoto;
use sideludi_db::repositories::PhotoRepo;
use sqlx::PgPool;

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot-really-a-png";

async fn token_for(pool: &PgPool, app: axum::Router) -> String {
    create_test_user(pool, "curator").await;
    login(app, "curator", TEST_PASSWORD).await.token
}

async fn create_section(app: axum::Router, token: &str, title: &str) -> serde_json::Value {
    let response =
        post_json_auth(app, "/api/photos", token, serde_json::json!({ "title": title })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

async fn upload_png(app: axum::Router, token: &str, section_id: i64) -> axum::response::Response {
    post_multipart(
        app,
        &format!("/api/photos/{section_id}/photos"),
        Auth::Bearer(token),
        &[Part::file("photo", "beach.PNG", "image/png", PNG_BYTES)],
    )
    .await
}

fn files_in(dir: &tempfile::TempDir) -> usize {
    std::fs::read_dir(dir.path()).map(|d| d.count()).unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Create, update and read back a section.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_section_round_trip(pool: PgPool) {
    let (app, _uploads) = common::build_test_app(pool.clone());
    let token = token_for(&pool, app.clone()).await;

    let section = create_section(app.clone(), &token, "Summer").await;
    let id = section["id"].as_i64().unwrap();
    assert_eq!(section["title"], "Summer");

    let response = put_json_auth(
        app.clone(),
        &format!("/api/photos/{id}"),
        &token,
        serde_json::json!({ "title": "Summer 2025" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, &format!("/api/photos/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], id);
    assert_eq!(json["title"], "Summer 2025");
    assert_eq!(json["photos"], serde_json::json!([]));
}

/// Listing is public and ordered oldest first, photos attached.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_sections_with_photos(pool: PgPool) {
    let (app, _uploads) = common::build_test_app(pool.clone());
    let token = token_for(&pool, app.clone()).await;

    let first = create_section(app.clone(), &token, "First").await;
    create_section(app.clone(), &token, "Second").await;
    let first_id = first["id"].as_i64().unwrap();
    assert_eq!(upload_png(app.clone(), &token, first_id).await.status(), StatusCode::CREATED);

    let response = get(app, "/api/photos").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let sections = json.as_array().unwrap();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0]["title"], "First");
    assert_eq!(sections[1]["title"], "Second");
    assert_eq!(sections[0]["photos"].as_array().unwrap().len(), 1);
    assert_eq!(sections[0]["photos"][0]["photoSectionId"], first_id);
    assert_eq!(sections[1]["photos"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_unknown_section(pool: PgPool) {
    let (app, _uploads) = common::build_test_app(pool);

    let response = get(app, "/api/photos/424242").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// A non-numeric id gets the JSON error body, not a plain-text rejection.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_non_numeric_section_id(pool: PgPool) {
    let (app, _uploads) = common::build_test_app(pool);

    let response = get(app, "/api/photos/abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["content-type"], "application/json");
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

/// Section writes require the gate.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_section_writes_require_auth(pool: PgPool) {
    let (app, _uploads) = common::build_test_app(pool);
    let body = serde_json::json!({ "title": "Sneaky" });

    let create = send_json(app.clone(), Method::POST, "/api/photos", Auth::None, body.clone()).await;
    assert_eq!(create.status(), StatusCode::UNAUTHORIZED);

    let update = send_json(app.clone(), Method::PUT, "/api/photos/1", Auth::None, body).await;
    assert_eq!(update.status(), StatusCode::UNAUTHORIZED);

    let delete =
        common::send_empty(app, Method::DELETE, "/api/photos/1", Auth::None).await;
    assert_eq!(delete.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_section_title_validation(pool: PgPool) {
    let (app, _uploads) = common::build_test_app(pool.clone());
    let token = token_for(&pool, app.clone()).await;

    let blank =
        post_json_auth(app.clone(), "/api/photos", &token, serde_json::json!({ "title": "" }))
            .await;
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);

    let long = "x".repeat(201);
    let too_long =
        post_json_auth(app, "/api/photos", &token, serde_json::json!({ "title": long })).await;
    assert_eq!(too_long.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(too_long).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_unknown_section(pool: PgPool) {
    let (app, _uploads) = common::build_test_app(pool.clone());
    let token = token_for(&pool, app.clone()).await;

    let response = put_json_auth(
        app,
        "/api/photos/424242",
        &token,
        serde_json::json!({ "title": "Ghost" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Deleting a section removes its photos from every read path.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_section_hides_photos(pool: PgPool) {
    let (app, uploads) = common::build_test_app(pool.clone());
    let token = token_for(&pool, app.clone()).await;

    let section = create_section(app.clone(), &token, "Doomed").await;
    let id = section["id"].as_i64().unwrap();
    let photo = body_json(upload_png(app.clone(), &token, id).await).await;
    let photo_id = photo["id"].as_i64().unwrap();

    let response = delete_auth(app.clone(), &format!("/api/photos/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(get(app.clone(), &format!("/api/photos/{id}")).await.status(), StatusCode::NOT_FOUND);
    let all = body_json(get(app.clone(), "/api/photos").await).await;
    assert_eq!(all, serde_json::json!([]));
    assert!(PhotoRepo::find_by_id(&pool, photo_id).await.unwrap().is_none());
    assert!(PhotoRepo::list_by_section(&pool, id).await.unwrap().is_empty());

    // The file itself stays on disk.
    assert_eq!(files_in(&uploads), 1);

    let again = delete_auth(app, &format!("/api/photos/{id}"), &token).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Uploads
// ---------------------------------------------------------------------------

/// A valid image is stored and served back under its public URL.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_upload_photo(pool: PgPool) {
    let (app, uploads) = common::build_test_app(pool.clone());
    let token = token_for(&pool, app.clone()).await;
    let section = create_section(app.clone(), &token, "Beach").await;
    let section_id = section["id"].as_i64().unwrap();

    let response = upload_png(app.clone(), &token, section_id).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let photo = body_json(response).await;
    assert_eq!(photo["photoSectionId"], section_id);

    let url = photo["url"].as_str().unwrap();
    assert!(url.starts_with("/uploads/photo-"), "unexpected url {url}");
    assert!(url.ends_with(".png"));
    assert_eq!(files_in(&uploads), 1);

    let served = get(app, url).await;
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(body_bytes(served).await, PNG_BYTES);
}

/// A non-image upload is rejected and nothing is stored.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_upload_rejects_non_image(pool: PgPool) {
    let (app, uploads) = common::build_test_app(pool.clone());
    let token = token_for(&pool, app.clone()).await;
    let section = create_section(app.clone(), &token, "Docs").await;
    let section_id = section["id"].as_i64().unwrap();

    let response = post_multipart(
        app,
        &format!("/api/photos/{section_id}/photos"),
        Auth::Bearer(&token),
        &[Part::file("photo", "notes.txt", "text/plain", b"hello")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_FILE_TYPE");
    assert!(PhotoRepo::list_by_section(&pool, section_id).await.unwrap().is_empty());
    assert_eq!(files_in(&uploads), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_upload_missing_file(pool: PgPool) {
    let (app, _uploads) = common::build_test_app(pool.clone());
    let token = token_for(&pool, app.clone()).await;
    let section = create_section(app.clone(), &token, "Empty").await;

    let response = post_multipart(
        app,
        &format!("/api/photos/{}/photos", section["id"]),
        Auth::Bearer(&token),
        &[Part {
            name: "caption",
            file_name: None,
            content_type: None,
            data: b"no file here",
        }],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "MISSING_FILE");
}

/// Oversized uploads are refused with 413 and leave no file behind.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_upload_too_large(pool: PgPool) {
    let (app, uploads) = common::build_test_app(pool.clone());
    let token = token_for(&pool, app.clone()).await;
    let section = create_section(app.clone(), &token, "Huge").await;
    let big = vec![0u8; MAX_UPLOAD_BYTES + 1];

    let response = post_multipart(
        app,
        &format!("/api/photos/{}/photos", section["id"]),
        Auth::Bearer(&token),
        &[Part::file("photo", "huge.jpg", "image/jpeg", &big)],
    )
    .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(files_in(&uploads), 0);
}

/// A body past the router's limit fails while streaming and still maps to
/// the upload 413.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_upload_over_body_limit(pool: PgPool) {
    let (app, uploads) = common::build_test_app(pool.clone());
    let token = token_for(&pool, app.clone()).await;
    let section = create_section(app.clone(), &token, "Enormous").await;
    let big = vec![0u8; MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES + 10];

    let response = post_multipart(
        app,
        &format!("/api/photos/{}/photos", section["id"]),
        Auth::Bearer(&token),
        &[Part::file("photo", "enormous.jpg", "image/jpeg", &big)],
    )
    .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body_json(response).await["code"], "PAYLOAD_TOO_LARGE");
    assert_eq!(files_in(&uploads), 0);
}

/// A JSON body sent to the upload route is a JSON 400, not plain text.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_upload_rejects_non_multipart_body(pool: PgPool) {
    let (app, uploads) = common::build_test_app(pool.clone());
    let token = token_for(&pool, app.clone()).await;
    let section = create_section(app.clone(), &token, "Json").await;

    let response = send_json(
        app,
        Method::POST,
        &format!("/api/photos/{}/photos", section["id"]),
        Auth::Bearer(&token),
        serde_json::json!({ "photo": "beach.png" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["content-type"], "application/json");
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
    assert_eq!(files_in(&uploads), 0);
}

/// A photo insert whose section is gone reports 404 rather than 500.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_photo_insert_for_missing_section_maps_to_404(pool: PgPool) {
    let err = PhotoRepo::create(
        &pool,
        &CreatePhoto {
            url: "/uploads/photo-gone.png".into(),
            photo_section_id: 424242,
        },
    )
    .await
    .unwrap_err();

    let response = AppError::from(err).into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

/// Uploading into a missing section is a 404 and writes nothing to disk.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_upload_unknown_section(pool: PgPool) {
    let (app, uploads) = common::build_test_app(pool.clone());
    let token = token_for(&pool, app.clone()).await;

    let response = upload_png(app, &token, 424242).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(files_in(&uploads), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_upload_requires_auth(pool: PgPool) {
    let (app, uploads) = common::build_test_app(pool);

    let response = post_multipart(
        app,
        "/api/photos/1/photos",
        Auth::None,
        &[Part::file("photo", "a.png", "image/png", PNG_BYTES)],
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(files_in(&uploads), 0);
}

/// Deleting a photo removes the row but keeps the file.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_photo(pool: PgPool) {
    let (app, uploads) = common::build_test_app(pool.clone());
    let token = token_for(&pool, app.clone()).await;
    let section = create_section(app.clone(), &token, "Mixed").await;
    let section_id = section["id"].as_i64().unwrap();
    let photo = body_json(upload_png(app.clone(), &token, section_id).await).await;
    let photo_id = photo["id"].as_i64().unwrap();

    let response = delete_auth(app.clone(), &format!("/api/photos/photos/{photo_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let section = body_json(get(app.clone(), &format!("/api/photos/{section_id}")).await).await;
    assert_eq!(section["photos"], serde_json::json!([]));
    assert_eq!(files_in(&uploads), 1);

    let again = delete_auth(app, &format!("/api/photos/photos/{photo_id}"), &token).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}
