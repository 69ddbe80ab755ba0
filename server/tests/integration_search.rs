use axum::body::{Body, Bytes};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use telusur_core::config::EngineConfig;
use telusur_server::{build_app, ServerConfig};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

const BOUNDARY: &str = "telusur-test-boundary";

fn build_test_app() -> (TempDir, Router) {
    let dir = tempdir().unwrap();
    let config = ServerConfig { upload_dir: dir.path().join("uploads"), engine: EngineConfig::default() };
    let app = build_app(config).unwrap();
    (dir, app)
}

fn multipart_body(files: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (name, content) in files {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"documents\"; filename=\"{name}\"\r\nContent-Type: application/octet-stream\r\n\r\n{content}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    body
}

async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Bytes) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

async fn upload(app: &Router, files: &[(&str, &str)]) -> (StatusCode, Bytes) {
    let req = Request::post("/upload")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(multipart_body(files)))
        .unwrap();
    call(app, req).await
}

async fn search(app: &Router, form: &str) -> (StatusCode, Bytes) {
    let req = Request::post("/search")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    call(app, req).await
}

async fn search_json(app: &Router, json: &str) -> (StatusCode, Bytes) {
    let req = Request::post("/search")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap();
    call(app, req).await
}

#[tokio::test]
async fn health_is_ok() {
    let (_dir, app) = build_test_app();
    let (status, body) = call(&app, Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"ok");
}

#[tokio::test]
async fn search_returns_ranked_results() {
    let (_dir, app) = build_test_app();
    let (status, _) = upload(
        &app,
        &[
            ("doc1.txt", "Kucing itu memakan ikan segar."),
            ("doc2.txt", "Anjing memakan daging."),
            ("table.csv", "ikan,daging"),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = search(&app, "query=daging").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["query"], "daging");
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["filename"], "doc2.txt");
    assert!(results[0]["score"].as_f64().unwrap() > 0.0);
    assert_eq!(results[1]["score"].as_f64().unwrap(), 0.0);
    assert_eq!(json["skipped"][0]["filename"], "table.csv");
}

#[tokio::test]
async fn process_reports_stemmed_summaries() {
    let (_dir, app) = build_test_app();
    upload(&app, &[("resep.txt", "Makanan enak, makanan murah, dimakan bersama.")]).await;

    let (status, body) = call(&app, Request::get("/process").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    let doc = &json["documents"][0];
    assert_eq!(doc["filename"], "resep.txt");
    assert_eq!(doc["stemmed_word_count"], 6);
    assert_eq!(doc["stemmed_content"], "makan (3x), enak, murah, sama");
    assert_eq!(json["corpus"][0], "makan enak makan murah makan sama");
}

#[tokio::test]
async fn upload_replaces_previous_batch() {
    let (_dir, app) = build_test_app();
    upload(&app, &[("old.txt", "kucing")]).await;
    let (_, body) = upload(&app, &[("../new file.txt", "anjing")]).await;
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["stored"][0], "new_file.txt");

    let (_, body) = call(&app, Request::get("/process").body(Body::empty()).unwrap()).await;
    let json: Value = serde_json::from_slice(&body).unwrap();
    let docs = json["documents"].as_array().unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["filename"], "new_file.txt");
}

#[tokio::test]
async fn missing_query_and_empty_uploads_are_bad_requests() {
    let (_dir, app) = build_test_app();
    let (status, _) = upload(&app, &[]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    upload(&app, &[("a.txt", "kucing")]).await;
    let (status, _) = search(&app, "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stopword_only_batch_is_unprocessable() {
    let (_dir, app) = build_test_app();
    upload(&app, &[("a.txt", "yang dan di ... !!!")]).await;
    let (status, body) = call(&app, Request::get("/process").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(String::from_utf8_lossy(&body).contains("empty vocabulary"));

    let (status, _) = search(&app, "query=yang").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn search_accepts_a_json_body() {
    let (_dir, app) = build_test_app();
    upload(&app, &[("ikan.txt", "Ikan bakar enak."), ("nasi.txt", "Nasi putih.")]).await;

    let (status, body) = search_json(&app, r#"{"query":"ikan"}"#).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["query"], "ikan");
    assert_eq!(json["results"][0]["filename"], "ikan.txt");
    assert!(json["results"][0]["score"].as_f64().unwrap() > 0.0);

    let (status, _) = search_json(&app, "{}").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_upload_names_are_kept_apart() {
    let (_dir, app) = build_test_app();
    let (status, body) = upload(&app, &[("catatan.txt", "kucing"), ("catatan.txt", "anjing")]).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["stored"], serde_json::json!(["catatan.txt", "catatan_1.txt"]));

    let (_, body) = call(&app, Request::get("/process").body(Body::empty()).unwrap()).await;
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["documents"].as_array().unwrap().len(), 2);
    assert_eq!(json["corpus"], serde_json::json!(["kucing", "anjing"]));
}
