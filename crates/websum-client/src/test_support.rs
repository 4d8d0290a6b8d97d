//! Local axum stub servers for exercising the HTTP clients.

use axum::Router;

/// Serve `app` on an ephemeral localhost port and return its base URL
/// (with a trailing slash).
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("axum serve");
    });
    format!("http://{addr}/")
}
