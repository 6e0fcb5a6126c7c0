//! Local HTTP server for exercising platform adapters without the network.

use axum::Router;
use tokio::net::TcpListener;
use url::Url;

/// Serve `router` on an ephemeral loopback port and return its base URL.
pub async fn spawn(router: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("mock server address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock server");
    });
    Url::parse(&format!("http://{addr}")).expect("mock server url")
}
