use docquery::config::{Config, LLMConfig, ParserConfig, StorageConfig, AuthConfig};
use docquery::{create_router, AppState};
use reqwest::{multipart, Client, StatusCode};
use tempfile::TempDir;

struct TestApp {
    base_url: String,
    _vendor: mockito::ServerGuard,
    _tmp_dir: TempDir,
}

/// Start the real server with every vendor pointed at one mock server
async fn spawn_app(vendor: mockito::ServerGuard) -> TestApp {
    let tmp_dir = TempDir::new().expect("Failed to create temp dir");

    let config = Config {
        llm: LLMConfig {
            provider: "google".to_string(),
            model: "gemini-1.5-flash".to_string(),
            api_key: "gemini-key".to_string(),
            api_base: Some(vendor.url()),
            ..LLMConfig::default()
        },
        parser: ParserConfig {
            api_key: "unstructured-key".to_string(),
            endpoint: format!("{}/general/v0/general", vendor.url()),
            strategy: "hi_res".to_string(),
        },
        storage: StorageConfig {
            upload_dir: tmp_dir.path().join("uploads"),
            output_dir: tmp_dir.path().join("output"),
        },
        auth: AuthConfig {
            supabase_url: vendor.url(),
            supabase_key: "anon-key".to_string(),
        },
        ..Config::default()
    };

    let state = AppState::from_config(config).expect("Failed to build state");
    state.uploads.ensure_dirs().await.expect("Failed to create dirs");

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        base_url: format!("http://{}", addr),
        _vendor: vendor,
        _tmp_dir: tmp_dir,
    }
}

async fn upload(client: &Client, base_url: &str, name: &str, body: &str) -> reqwest::Response {
    let form = multipart::Form::new().part(
        "file",
        multipart::Part::text(body.to_string()).file_name(name.to_string()),
    );
    client
        .post(format!("{}/upload", base_url))
        .multipart(form)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_upload_ask_and_list() {
    let mut vendor = mockito::Server::new_async().await;
    let partition = vendor
        .mock("POST", "/general/v0/general")
        .match_header("unstructured-api-key", "unstructured-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"type": "Title", "text": "Lunar rover field notes"}]"#)
        .expect(1)
        .create_async()
        .await;
    let generate = vendor
        .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
        .match_header("x-goog-api-key", "gemini-key")
        .match_body(mockito::Matcher::Regex("Lunar rover field notes".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates": [{"content": {"parts": [{"text": "They are field notes."}]}, "finishReason": "STOP"}]}"#)
        .expect(1)
        .create_async()
        .await;

    let app = spawn_app(vendor).await;
    let client = Client::new();

    let resp = upload(&client, &app.base_url, "notes.txt", "rover notes").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    let document_id = body["document_id"].as_str().unwrap().to_string();

    let resp = client
        .post(format!("{}/ask", app.base_url))
        .json(&serde_json::json!({ "document_id": document_id, "query": "What is this?" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["query"], "What is this?");
    assert_eq!(body["response"], "They are field notes.");
    assert_eq!(body["document"], "notes.txt");

    let resp = client
        .get(format!("{}/documents", app.base_url))
        .send()
        .await
        .unwrap();
    let listed: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(
        listed,
        serde_json::json!([{ "document_id": document_id, "file_name": "notes.txt" }])
    );

    let resp = client
        .get(format!("{}/health", app.base_url))
        .send()
        .await
        .unwrap();
    let health: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["documents"], 1);

    partition.assert_async().await;
    generate.assert_async().await;
}

#[tokio::test]
async fn test_partition_failure_surfaces_as_500() {
    let mut vendor = mockito::Server::new_async().await;
    let _partition = vendor
        .mock("POST", "/general/v0/general")
        .with_status(503)
        .with_body("service unavailable")
        .create_async()
        .await;

    let app = spawn_app(vendor).await;
    let client = Client::new();

    let resp = upload(&client, &app.base_url, "doc.pdf", "%PDF").await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains("service unavailable"));

    let listed: serde_json::Value = client
        .get(format!("{}/documents", app.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed, serde_json::json!([]));
}

#[tokio::test]
async fn test_signup_pending_confirmation_is_400() {
    let mut vendor = mockito::Server::new_async().await;
    let _signup = vendor
        .mock("POST", "/auth/v1/signup")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "u-1", "email": "new@example.com", "created_at": "2024-05-01T10:00:00Z"}"#)
        .create_async()
        .await;

    let app = spawn_app(vendor).await;

    let resp = Client::new()
        .post(format!("{}/signup", app.base_url))
        .json(&serde_json::json!({ "email": "new@example.com", "password": "pw123456" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["detail"], "User creation failed.");
}
