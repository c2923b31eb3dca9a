use reqwest::multipart::Form;

use crate::common::{TestApp, jpeg_part, routes};

#[tokio::test]
async fn create_round_trips_all_fields() {
    let app = TestApp::spawn().await;
    let token = app.login_default_admin().await;

    let form = Form::new()
        .text("title", "Tree planting")
        .text("description", "Community planting day")
        .text("date", "2024-06-01")
        .text("location", "Kalimantan");
    let res = app.post_multipart(routes::ACTIVITIES, form, &token).await;
    assert_eq!(res.status, 201, "{}", res.text);
    let id = res.body["id"].as_i64().unwrap();

    let got = app.get(&routes::activity(id)).await;
    assert_eq!(got.status, 200, "{}", got.text);
    assert_eq!(got.body["title"], "Tree planting");
    assert_eq!(got.body["description"], "Community planting day");
    assert_eq!(got.body["date"], "2024-06-01");
    assert_eq!(got.body["location"], "Kalimantan");
    assert_eq!(got.body["category"], "kegiatan");
    assert!(got.body["image"].is_null());
}

#[tokio::test]
async fn category_selects_the_upload_subfolder() {
    let app = TestApp::spawn().await;
    let token = app.login_default_admin().await;

    let form = Form::new()
        .text("title", "Assessment field visit")
        .text("category", "sia")
        .part("image", jpeg_part(1024, "visit.jpg"));
    let res = app.post_multipart(routes::ACTIVITIES, form, &token).await;
    assert_eq!(res.status, 201, "{}", res.text);
    let id = res.body["id"].as_i64().unwrap();

    let got = app.get(&routes::activity(id)).await;
    let image = got.body["image"].as_str().unwrap();
    assert!(
        image.starts_with("/uploads/sia/"),
        "unexpected path {image}"
    );
}

#[tokio::test]
async fn changing_category_without_a_new_file_keeps_the_stored_path() {
    let app = TestApp::spawn().await;
    let token = app.login_default_admin().await;

    let form = Form::new()
        .text("title", "Assessment field visit")
        .text("category", "sia")
        .part("image", jpeg_part(1024, "visit.jpg"));
    let res = app.post_multipart(routes::ACTIVITIES, form, &token).await;
    assert_eq!(res.status, 201, "{}", res.text);
    let id = res.body["id"].as_i64().unwrap();

    let before = app.get(&routes::activity(id)).await;
    let image_before = before.body["image"].as_str().unwrap().to_string();

    // Recategorize without uploading; the old file stays where it was.
    let form = Form::new()
        .text("title", "Assessment field visit")
        .text("category", "kegiatan");
    let updated = app
        .put_multipart(&routes::activity(id), form, &token)
        .await;
    assert_eq!(updated.status, 200, "{}", updated.text);
    assert_eq!(updated.body["category"], "kegiatan");
    assert_eq!(updated.body["image"], image_before.as_str());

    // And the file is still served from its original folder.
    let file = app.get(&image_before).await;
    assert_eq!(file.status, 200);
}

#[tokio::test]
async fn unknown_category_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.login_default_admin().await;

    let form = Form::new()
        .text("title", "Bad category")
        .text("category", "marketing");
    let res = app.post_multipart(routes::ACTIVITIES, form, &token).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn malformed_date_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.login_default_admin().await;

    let form = Form::new()
        .text("title", "Bad date")
        .text("date", "01/06/2024");
    let res = app.post_multipart(routes::ACTIVITIES, form, &token).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn title_is_required() {
    let app = TestApp::spawn().await;
    let token = app.login_default_admin().await;

    let form = Form::new().text("description", "no title here");
    let res = app.post_multipart(routes::ACTIVITIES, form, &token).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn list_is_most_recent_first() {
    let app = TestApp::spawn().await;
    let token = app.login_default_admin().await;

    for title in ["first", "second", "third"] {
        let form = Form::new().text("title", title.to_string());
        let res = app.post_multipart(routes::ACTIVITIES, form, &token).await;
        assert_eq!(res.status, 201, "{}", res.text);
    }

    let res = app.get(routes::ACTIVITIES).await;
    assert_eq!(res.status, 200);

    let titles: Vec<&str> = res.body.as_array().unwrap().iter()
        .map(|row| row["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn delete_removes_the_row_and_its_file() {
    let app = TestApp::spawn().await;
    let token = app.login_default_admin().await;

    let form = Form::new()
        .text("title", "to delete")
        .part("image", jpeg_part(512, "gone.jpg"));
    let res = app.post_multipart(routes::ACTIVITIES, form, &token).await;
    assert_eq!(res.status, 201, "{}", res.text);
    let id = res.body["id"].as_i64().unwrap();

    let image = app.get(&routes::activity(id)).await.body["image"]
        .as_str()
        .unwrap()
        .to_string();

    let deleted = app.delete_with_token(&routes::activity(id), &token).await;
    assert_eq!(deleted.status, 204);

    assert_eq!(app.get(&routes::activity(id)).await.status, 404);
    assert_eq!(app.get(&image).await.status, 404);
}

#[tokio::test]
async fn mutations_require_a_token() {
    let app = TestApp::spawn().await;

    let form = Form::new().text("title", "unauthenticated");
    let res = app
        .post_multipart_without_token(routes::ACTIVITIES, form)
        .await;

    assert_eq!(res.status, 401);
}
