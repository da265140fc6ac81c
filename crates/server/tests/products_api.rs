mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

use common::spawn_app;

async fn create_product(app: &common::TestApp, body: serde_json::Value) -> anyhow::Result<i64> {
    let (status, resp) = app.json("POST", "/products/", body).await?;
    assert_eq!(status, StatusCode::CREATED);
    Ok(resp["id"].as_i64().unwrap())
}

#[tokio::test]
async fn create_list_get_product() -> anyhow::Result<()> {
    let app = spawn_app().await?;

    let (status, created) = app.json("POST", "/products/", json!({"name": "X", "price": 1.5})).await?;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created, json!({"id": id, "name": "X", "price": 1.5, "description": null}));

    let (status, list) = app.get("/products/").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([{"id": id, "name": "X", "price": 1.5, "description": null}]));

    let (status, one) = app.get(&format!("/products/{id}")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(one, json!({"id": id, "name": "X", "price": 1.5, "picture": null, "description": null}));

    let (status, missing) = app.get("/products/999").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["message"], "Product not found");
    Ok(())
}

#[tokio::test]
async fn update_product_replaces_fields() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let id = create_product(&app, json!({"name": "Old", "price": 1.0, "description": "old"})).await?;

    let (status, body) = app
        .json("PUT", &format!("/products/{id}"), json!({"name": "New", "price": 2.5, "description": "new", "picture": "uploads/new.png"}))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": id, "name": "New", "price": 2.5, "description": "new"}));

    let (_, full) = app.get(&format!("/products/{id}")).await?;
    assert_eq!(full["picture"], "uploads/new.png");

    let (status, body) = app.json("PUT", "/products/999", json!({"name": "N", "price": 1.0})).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");
    Ok(())
}

#[tokio::test]
async fn delete_product_then_missing() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let id = create_product(&app, json!({"name": "Gone", "price": 3.0})).await?;

    let (status, body) = app.delete(&format!("/products/{id}")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Product deleted"}));

    let (status, body) = app.delete(&format!("/products/{id}")).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Product not found"}));
    Ok(())
}

#[tokio::test]
async fn malformed_product_body_is_400() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let (status, body) = app.json("POST", "/products/", json!({"name": "No price"})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
    Ok(())
}

#[tokio::test]
async fn upload_png_sets_picture() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let id = create_product(&app, json!({"name": "Camera", "price": 99.0, "description": "compact"})).await?;

    let (status, body) = app.upload(&format!("/products/{id}/upload_image"), "image", Some("photo.png"), b"\x89PNG fake").await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"message": "Image uploaded successfully"}));

    let expected = app.upload_dir.join("photo.png");
    assert_eq!(std::fs::read(&expected)?, b"\x89PNG fake");

    let (_, product) = app.get(&format!("/products/{id}")).await?;
    assert_eq!(product["picture"], &*expected.to_string_lossy());
    // everything else untouched
    assert_eq!(product["name"], "Camera");
    assert_eq!(product["price"], 99.0);
    assert_eq!(product["description"], "compact");
    Ok(())
}

#[tokio::test]
async fn upload_sanitizes_filename() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let id = create_product(&app, json!({"name": "Sneaky", "price": 1.0})).await?;

    let (status, _) = app.upload(&format!("/products/{id}/upload_image"), "image", Some("../../my photo.JPG"), b"jpg").await?;
    assert_eq!(status, StatusCode::CREATED);

    let expected = app.upload_dir.join("my_photo.JPG");
    assert!(expected.exists());
    let (_, product) = app.get(&format!("/products/{id}")).await?;
    assert_eq!(product["picture"], &*expected.to_string_lossy());
    Ok(())
}

#[tokio::test]
async fn upload_keeps_accented_letters_as_ascii() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let id = create_product(&app, json!({"name": "Cafe", "price": 4.0})).await?;

    let (status, _) = app.upload(&format!("/products/{id}/upload_image"), "image", Some("caf\u{e9}.png"), b"png").await?;
    assert_eq!(status, StatusCode::CREATED);

    let expected = app.upload_dir.join("cafe.png");
    assert!(expected.exists());
    let (_, product) = app.get(&format!("/products/{id}")).await?;
    assert_eq!(product["picture"], &*expected.to_string_lossy());
    Ok(())
}

#[tokio::test]
async fn upload_rejects_bad_extension() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let id = create_product(&app, json!({"name": "Exe", "price": 1.0})).await?;

    let (status, body) = app.upload(&format!("/products/{id}/upload_image"), "image", Some("photo.exe"), b"MZ").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid file type");

    let (_, product) = app.get(&format!("/products/{id}")).await?;
    assert!(product["picture"].is_null());
    Ok(())
}

#[tokio::test]
async fn upload_requires_image_part() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let id = create_product(&app, json!({"name": "NoPart", "price": 1.0})).await?;
    let uri = format!("/products/{id}/upload_image");

    let (status, body) = app.upload(&uri, "file", Some("photo.png"), b"x").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No image part");

    // a plain form field is not a file part
    let (status, body) = app.upload(&uri, "image", None, b"x").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No image part");

    // not multipart at all
    let (status, body) = app.json("POST", &uri, json!({"image": "photo.png"})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No image part");
    Ok(())
}

#[tokio::test]
async fn upload_requires_filename() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let id = create_product(&app, json!({"name": "NoName", "price": 1.0})).await?;

    let (status, body) = app.upload(&format!("/products/{id}/upload_image"), "image", Some(""), b"x").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No selected file");
    Ok(())
}

#[tokio::test]
async fn upload_to_missing_product_is_404() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let (status, body) = app.upload("/products/999/upload_image", "image", Some("photo.png"), b"x").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");
    assert!(!app.upload_dir.join("photo.png").exists());
    Ok(())
}

#[tokio::test]
async fn out_of_range_id_is_json_404() -> anyhow::Result<()> {
    let app = spawn_app().await?;

    let (status, body) = app.get("/products/99999999999").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Product not found"}));

    let (status, body) = app.delete("/products/abc").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Product not found"}));

    let (status, body) = app.upload("/products/abc/upload_image", "image", Some("photo.png"), b"x").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Product not found"}));
    Ok(())
}

#[tokio::test]
async fn health_and_docs_are_served() -> anyhow::Result<()> {
    let app = spawn_app().await?;

    let (status, body) = app.get("/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, spec) = app.get("/apispec_1.json").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(spec["paths"]["/products/{id}/upload_image"].is_object());

    let req = Request::builder().method("GET").uri("/apidocs/").body(Body::empty())?;
    let (status, _) = app.send(req).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}
