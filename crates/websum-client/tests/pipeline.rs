//! End-to-end pipeline runs against local stub servers.

use std::sync::{Arc, Mutex};

use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use websum_client::{BackendOptions, HtmlExtractor, ReqwestFetcher, SummaryBackend};
use websum_core::{BackendChoice, Summarizer};

const PAGE: &str = r#"<html>
  <head><title>Release Notes</title></head>
  <body>
    <nav>Docs | Blog</nav>
    <h1>Version 2.0</h1>
    <p>We shipped faster builds.</p>
    <script>trackVisitor();</script>
  </body>
</html>"#;

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("axum serve");
    });
    format!("http://{addr}")
}

/// Serves the page at `/page` and a stub Ollama API, recording chat bodies.
fn site_and_ollama(chats: Arc<Mutex<Vec<Value>>>) -> Router {
    Router::new()
        .route("/page", get(|| async { axum::response::Html(PAGE) }))
        .route(
            "/api/tags",
            get(|| async { Json(json!({"models": [{"name": "llama3.2:latest"}]})) }),
        )
        .route(
            "/api/chat",
            post(move |Json(body): Json<Value>| {
                let chats = Arc::clone(&chats);
                async move {
                    chats.lock().unwrap().push(body);
                    Json(json!({"message": {"role": "assistant", "content": "## Release 2.0\n- Faster builds"}}))
                }
            }),
        )
}

#[tokio::test]
async fn local_backend_summarizes_page() {
    let chats = Arc::new(Mutex::new(Vec::new()));
    let base = serve(site_and_ollama(Arc::clone(&chats))).await;

    let options = BackendOptions {
        ollama_host: base.clone(),
        ..BackendOptions::default()
    };
    let backend = SummaryBackend::from_choice(&BackendChoice::Local, &options).unwrap();
    let summarizer = Summarizer::new(ReqwestFetcher::new().unwrap(), HtmlExtractor::new(), backend);

    let summary = summarizer.summarize_url(&format!("{base}/page")).await;
    assert_eq!(summary, "## Release 2.0\n- Faster builds");

    let chats = chats.lock().unwrap();
    assert_eq!(chats.len(), 1);
    let user = chats[0]["messages"][1]["content"].as_str().unwrap();
    assert!(user.contains("Release Notes"));
    assert!(user.contains("Version 2.0\nWe shipped faster builds."));
    assert!(!user.contains("trackVisitor"));
    assert!(!user.contains("Docs | Blog"));
}

#[tokio::test]
async fn missing_page_reports_url() {
    let base = serve(Router::new()).await;

    let options = BackendOptions {
        ollama_host: base.clone(),
        ..BackendOptions::default()
    };
    let backend = SummaryBackend::from_choice(&BackendChoice::Local, &options).unwrap();
    let summarizer = Summarizer::new(ReqwestFetcher::new().unwrap(), HtmlExtractor::new(), backend);

    let url = format!("{base}/gone");
    let summary = summarizer.summarize_url(&url).await;
    assert!(summary.starts_with(&format!("Error summarizing {url}: ")));
    assert!(summary.contains("404"));
}

#[tokio::test]
async fn hosted_backend_failure_is_reported_as_string() {
    let site = serve(Router::new().route("/page", get(|| async { axum::response::Html(PAGE) }))).await;
    let openai = serve(Router::new().route(
        "/chat/completions",
        post(|| async {
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": {"message": "The server had an error"}})),
            )
        }),
    ))
    .await;

    let options = BackendOptions {
        openai_base_url: openai,
        ..BackendOptions::default()
    };
    let choice = BackendChoice::resolve(Some("sk-proj-abc")).unwrap();
    let backend = SummaryBackend::from_choice(&choice, &options).unwrap();
    let summarizer = Summarizer::new(ReqwestFetcher::new().unwrap(), HtmlExtractor::new(), backend);

    let summary = summarizer.summarize_url(&format!("{site}/page")).await;
    assert_eq!(
        summary,
        "Error summarizing with OpenAI: LLM error (HTTP 500): The server had an error"
    );
}
