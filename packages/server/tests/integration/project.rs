use reqwest::multipart::Form;

use crate::common::{TestApp, jpeg_part, routes};

async fn create_project(app: &TestApp, token: &str, title: &str, category: &str) -> i64 {
    let form = Form::new()
        .text("title", title.to_string())
        .text("category", category.to_string());
    let res = app.post_multipart(routes::PROJECTS, form, token).await;
    assert_eq!(res.status, 201, "create project failed: {}", res.text);
    res.body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn tags_are_split_trimmed_and_ordered() {
    let app = TestApp::spawn().await;
    let token = app.login_default_admin().await;

    let form = Form::new()
        .text("title", "Mangrove restoration")
        .text("tags", " reforestation, carbon ,,  water ");
    let res = app.post_multipart(routes::PROJECTS, form, &token).await;
    assert_eq!(res.status, 201, "{}", res.text);
    let id = res.body["id"].as_i64().unwrap();

    let got = app.get(&routes::project(id)).await;
    assert_eq!(
        got.body["tags"],
        serde_json::json!(["reforestation", "carbon", "water"])
    );
    // Unspecified category defaults to sia.
    assert_eq!(got.body["category"], "sia");
}

#[tokio::test]
async fn omitted_tags_keep_the_stored_list_on_update() {
    let app = TestApp::spawn().await;
    let token = app.login_default_admin().await;

    let form = Form::new()
        .text("title", "Mangrove restoration")
        .text("tags", "a,b");
    let res = app.post_multipart(routes::PROJECTS, form, &token).await;
    assert_eq!(res.status, 201, "{}", res.text);
    let id = res.body["id"].as_i64().unwrap();

    let form = Form::new().text("title", "Mangrove restoration v2");
    let updated = app.put_multipart(&routes::project(id), form, &token).await;

    assert_eq!(updated.status, 200, "{}", updated.text);
    assert_eq!(updated.body["title"], "Mangrove restoration v2");
    assert_eq!(updated.body["tags"], serde_json::json!(["a", "b"]));
}

#[tokio::test]
async fn list_filters_by_category() {
    let app = TestApp::spawn().await;
    let token = app.login_default_admin().await;

    create_project(&app, &token, "impact one", "sia").await;
    create_project(&app, &token, "impact two", "sia").await;
    create_project(&app, &token, "returns", "sroi").await;

    let all = app.get(routes::PROJECTS).await;
    assert_eq!(all.body.as_array().unwrap().len(), 3);

    let sia = app.get(&format!("{}?category=sia", routes::PROJECTS)).await;
    assert_eq!(sia.status, 200, "{}", sia.text);
    let rows = sia.body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row["category"] == "sia"));

    let sroi = app
        .get(&format!("{}?category=sroi", routes::PROJECTS))
        .await;
    assert_eq!(sroi.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_filter_category_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app
        .get(&format!("{}?category=kegiatan", routes::PROJECTS))
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn project_uploads_carry_the_proyek_prefix() {
    let app = TestApp::spawn().await;
    let token = app.login_default_admin().await;

    let form = Form::new()
        .text("title", "With image")
        .text("category", "sroi")
        .part("image", jpeg_part(1024, "chart.webp").mime_str("image/webp").unwrap());
    let res = app.post_multipart(routes::PROJECTS, form, &token).await;
    assert_eq!(res.status, 201, "{}", res.text);
    let id = res.body["id"].as_i64().unwrap();

    let image = app.get(&routes::project(id)).await.body["image"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(
        image.starts_with("/uploads/sroi/proyek-"),
        "unexpected path {image}"
    );
    assert!(image.ends_with(".webp"), "unexpected path {image}");
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let app = TestApp::spawn().await;
    let token = app.login_default_admin().await;

    let id = create_project(&app, &token, "short lived", "sia").await;

    let deleted = app.delete_with_token(&routes::project(id), &token).await;
    assert_eq!(deleted.status, 204);

    let got = app.get(&routes::project(id)).await;
    assert_eq!(got.status, 404);
    assert_eq!(got.body["code"], "NOT_FOUND");
}
