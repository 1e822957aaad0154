//! HTTP transport for the articles API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::api::error::ApiError;
use crate::api::types::{
    ArticleDraft, ArticleId, ArticleResponse, ArticlesResponse, LoginRequest, LoginResponse,
    MessageResponse, UpdateRequest,
};
use crate::config::{build_auth_header, ApiConfig, AuthScheme, Credentials, SecureString};

/// One call per endpoint of the articles API.
///
/// Authenticated calls take the token as an argument rather than reading it
/// themselves; the session store stays owned by the reconciler.
#[async_trait]
pub trait Transport: Send + Sync {
    /// `POST /login`, unauthenticated.
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError>;

    /// `GET /articles`.
    async fn list_articles(&self, token: Option<&SecureString>)
        -> Result<ArticlesResponse, ApiError>;

    /// `POST /articles`.
    async fn create_article(
        &self,
        token: Option<&SecureString>,
        draft: &ArticleDraft,
    ) -> Result<ArticleResponse, ApiError>;

    /// `PUT /articles/{id}`.
    async fn update_article(
        &self,
        token: Option<&SecureString>,
        id: ArticleId,
        draft: &ArticleDraft,
    ) -> Result<MessageResponse, ApiError>;

    /// `DELETE /articles/{id}`.
    async fn delete_article(
        &self,
        token: Option<&SecureString>,
        id: ArticleId,
    ) -> Result<MessageResponse, ApiError>;
}

/// [`Transport`] backed by a `reqwest` client.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    scheme: AuthScheme,
}

impl HttpTransport {
    pub fn new(api: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(api.timeout_seconds as u64))
            .connect_timeout(Duration::from_secs(api.connect_timeout_seconds as u64))
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            client,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            scheme: api.scheme(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&SecureString>,
    ) -> Result<(Url, RequestBuilder), ApiError> {
        let raw = format!("{}{}", self.base_url, path);
        let url = Url::parse(&raw).map_err(|_| ApiError::InvalidUrl(raw))?;

        let mut builder = self.client.request(method, url.clone());
        if let Some((name, value)) = build_auth_header(self.scheme, token) {
            builder = builder.header(name, value);
        }
        Ok((url, builder))
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        url: Url,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = builder.send().await.map_err(|e| ApiError::Connection {
            url: url.to_string(),
            source: e,
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| ApiError::Connection {
            url: url.to_string(),
            source: e,
        })?;

        if !status.is_success() {
            let message = serde_json::from_slice::<MessageResponse>(&body)
                .map(|m| m.message)
                .unwrap_or_default();
            tracing::debug!(%url, status = status.as_u16(), %message, "request rejected");
            return Err(ApiError::from_status(status.as_u16(), message));
        }

        serde_json::from_slice(&body).map_err(|e| ApiError::Decode {
            url: url.to_string(),
            source: e,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let (url, builder) = self.request(Method::POST, "/login", None)?;
        tracing::debug!(%url, username = %credentials.username, "POST login");
        let body = LoginRequest {
            username: &credentials.username,
            password: credentials.password.expose(),
        };
        self.execute(url, builder.json(&body)).await
    }

    async fn list_articles(
        &self,
        token: Option<&SecureString>,
    ) -> Result<ArticlesResponse, ApiError> {
        let (url, builder) = self.request(Method::GET, "/articles", token)?;
        tracing::debug!(%url, "GET articles");
        self.execute(url, builder).await
    }

    async fn create_article(
        &self,
        token: Option<&SecureString>,
        draft: &ArticleDraft,
    ) -> Result<ArticleResponse, ApiError> {
        let (url, builder) = self.request(Method::POST, "/articles", token)?;
        tracing::debug!(%url, title = %draft.title, "POST article");
        self.execute(url, builder.json(draft)).await
    }

    async fn update_article(
        &self,
        token: Option<&SecureString>,
        id: ArticleId,
        draft: &ArticleDraft,
    ) -> Result<MessageResponse, ApiError> {
        let (url, builder) = self.request(Method::PUT, &format!("/articles/{}", id), token)?;
        tracing::debug!(%url, "PUT article");
        let body = UpdateRequest {
            article_id: id,
            draft,
        };
        self.execute(url, builder.json(&body)).await
    }

    async fn delete_article(
        &self,
        token: Option<&SecureString>,
        id: ArticleId,
    ) -> Result<MessageResponse, ApiError> {
        let (url, builder) = self.request(Method::DELETE, &format!("/articles/{}", id), token)?;
        tracing::debug!(%url, "DELETE article");
        self.execute(url, builder).await
    }
}
