//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_api;

use std::net::TcpListener;
use std::sync::Arc;

use articles_client::api::{Article, ArticleId, HttpTransport};
use articles_client::config::ApiConfig;
use articles_client::reconciler::Reconciler;
use articles_client::session::MemorySessionStore;

pub use mock_api::{CapturedRequest, MockApi, MockResponse};

/// Find a port nothing is listening on.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

pub fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
        connect_timeout_seconds: 2,
        ..ApiConfig::default()
    }
}

/// Reconciler talking HTTP to `base_url`, with an in-memory session.
pub fn http_reconciler(
    base_url: &str,
    session: Arc<MemorySessionStore>,
) -> Reconciler {
    let transport = HttpTransport::new(&api_config(base_url)).expect("http client");
    Reconciler::new(Arc::new(transport), session)
}

pub fn article(id: u64, title: &str) -> Article {
    Article {
        article_id: ArticleId(id),
        title: title.to_string(),
        text: format!("{} body", title),
        topic: "React".to_string(),
    }
}

pub fn articles_json(articles: &[Article]) -> serde_json::Value {
    serde_json::to_value(articles).unwrap()
}
