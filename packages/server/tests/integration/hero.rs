use reqwest::multipart::Form;

use crate::common::{TestApp, jpeg_part, routes};

async fn create_hero(app: &TestApp, token: &str, title: &str, display_order: i32) -> i64 {
    let form = Form::new()
        .text("title", title.to_string())
        .text("display_order", display_order.to_string())
        .part("image", jpeg_part(1024, "hero.jpg"));

    let res = app.post_multipart(routes::HERO, form, token).await;
    assert_eq!(res.status, 201, "create hero failed: {}", res.text);
    res.body["id"].as_i64().expect("id in create response")
}

#[tokio::test]
async fn create_requires_a_token() {
    let app = TestApp::spawn().await;

    let form = Form::new().part("image", jpeg_part(1024, "hero.jpg"));
    let res = app.post_multipart_without_token(routes::HERO, form).await;

    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "TOKEN_MISSING");
}

#[tokio::test]
async fn create_requires_an_image() {
    let app = TestApp::spawn().await;
    let token = app.login_default_admin().await;

    let form = Form::new().text("title", "No image");
    let res = app.post_multipart(routes::HERO, form, &token).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn created_image_round_trips_and_is_served_statically() {
    let app = TestApp::spawn().await;
    let token = app.login_default_admin().await;

    let id = create_hero(&app, &token, "Rainforest", 3).await;

    let res = app.get(&routes::hero(id)).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["title"], "Rainforest");
    assert_eq!(res.body["display_order"], 3);

    let image = res.body["image"].as_str().unwrap().to_string();
    assert!(
        image.starts_with("/uploads/beranda/"),
        "unexpected path {image}"
    );

    let file = app.get(&image).await;
    assert_eq!(file.status, 200);
    let cache = file.cache_control.expect("static cache header");
    assert!(cache.contains("immutable"), "got {cache}");

    // A conditional re-fetch with the returned ETag short-circuits to 304.
    let etag = file.etag.expect("static etag header");
    let not_modified = app.get_if_none_match(&image, &etag).await;
    assert_eq!(not_modified.status, 304);
}

#[tokio::test]
async fn list_sorts_by_display_order_then_recency() {
    let app = TestApp::spawn().await;
    let token = app.login_default_admin().await;

    // Orders [2, 0, 0]: the two zeroes tie and the newer one must win.
    let id_late = create_hero(&app, &token, "late", 2).await;
    let id_zero_old = create_hero(&app, &token, "zero-old", 0).await;
    let id_zero_new = create_hero(&app, &token, "zero-new", 0).await;

    let res = app.get(routes::HERO).await;
    assert_eq!(res.status, 200, "{}", res.text);

    let ids: Vec<i64> = res.body.as_array().unwrap().iter()
        .map(|row| row["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![id_zero_new, id_zero_old, id_late]);

    let cache = res.cache_control.expect("public cache header");
    assert!(cache.contains("max-age=300"), "got {cache}");
}

#[tokio::test]
async fn update_replaces_fields_and_the_stored_file() {
    let app = TestApp::spawn().await;
    let token = app.login_default_admin().await;

    let id = create_hero(&app, &token, "before", 1).await;
    let before = app.get(&routes::hero(id)).await;
    let old_image = before.body["image"].as_str().unwrap().to_string();

    let form = Form::new()
        .text("title", "after")
        .text("display_order", "7")
        .part("image", jpeg_part(2048, "replacement.png").mime_str("image/png").unwrap());
    let res = app.put_multipart(&routes::hero(id), form, &token).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["title"], "after");
    assert_eq!(res.body["display_order"], 7);

    let new_image = res.body["image"].as_str().unwrap();
    assert_ne!(new_image, old_image);

    // The previous file is gone from disk.
    let old = app.get(&old_image).await;
    assert_eq!(old.status, 404);
}

#[tokio::test]
async fn delete_is_not_repeatable() {
    let app = TestApp::spawn().await;
    let token = app.login_default_admin().await;

    let id = create_hero(&app, &token, "to delete", 0).await;

    let first = app.delete_with_token(&routes::hero(id), &token).await;
    assert_eq!(first.status, 204);

    // Second delete finds no row; the already-missing file is not an error.
    let second = app.delete_with_token(&routes::hero(id), &token).await;
    assert_eq!(second.status, 404);
    assert_eq!(second.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn get_unknown_id_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app.get(&routes::hero(999_999)).await;

    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn oversize_upload_is_rejected_and_creates_no_row() {
    let app = TestApp::spawn().await;
    let token = app.login_default_admin().await;

    let form = Form::new()
        .text("title", "too big")
        .part("image", jpeg_part(5 * 1024 * 1024 + 1, "big.jpg"));
    let res = app.post_multipart(routes::HERO, form, &token).await;

    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");

    let list = app.get(routes::HERO).await;
    assert_eq!(list.body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn non_image_upload_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.login_default_admin().await;

    let part = reqwest::multipart::Part::bytes(vec![0u8; 128])
        .file_name("payload.exe")
        .mime_str("application/octet-stream")
        .unwrap();
    let form = Form::new().part("image", part);
    let res = app.post_multipart(routes::HERO, form, &token).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}
