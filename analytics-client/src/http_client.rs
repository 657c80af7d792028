use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::time::Duration;

use crate::api::AnalyticsApi;
use crate::error::{AnalyticsClientError, AnalyticsClientResult};
use crate::models::{Comment, Id, NewPost, Post, User};

/// Базовый адрес сервиса; переопределяется только при сборке.
pub const DEFAULT_API_BASE_URL: &str = match option_env!("ANALYTICS_API_BASE_URL") {
    Some(value) => value,
    None => "http://20.244.56.144/evaluation-service",
};

#[derive(Debug, Deserialize)]
struct ListUsersResponseDto {
    #[serde(default)]
    users: Option<Vec<User>>,
}

#[derive(Debug, Deserialize)]
struct ListPostsResponseDto {
    #[serde(default)]
    posts: Option<Vec<Post>>,
}

#[derive(Debug, Deserialize)]
struct ListCommentsResponseDto {
    #[serde(default)]
    comments: Option<Vec<Comment>>,
}

#[derive(Debug, Clone)]
/// HTTP-клиент REST API сервиса аналитики.
///
/// Хранит cookie, выставленные сервисом, и отправляет их в следующих запросах.
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Создаёт клиент с базовым URL сервиса и таймаутом подключения.
    pub fn new(
        base_url: impl Into<String>,
        connect_timeout: Duration,
    ) -> AnalyticsClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .cookie_store(true)
            .build()
            .map_err(AnalyticsClientError::Client)?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Клиент для [`DEFAULT_API_BASE_URL`].
    pub fn with_default_endpoint(connect_timeout: Duration) -> AnalyticsClientResult<Self> {
        Self::new(DEFAULT_API_BASE_URL, connect_timeout)
    }

    /// Базовый URL, к которому добавляются пути запросов.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Выполняет `GET path` и возвращает JSON-тело ответа.
    pub async fn get_json(&self, path: &str) -> AnalyticsClientResult<Value> {
        self.send::<(), Value>(Method::GET, path, None).await
    }

    /// Выполняет `POST path` с JSON-телом и возвращает JSON-тело ответа.
    pub async fn post_json<TReq: Serialize>(
        &self,
        path: &str,
        body: &TReq,
    ) -> AnalyticsClientResult<Value> {
        self.send(Method::POST, path, Some(body)).await
    }

    async fn send<TReq, TRes>(
        &self,
        method: Method,
        path: &str,
        body: Option<&TReq>,
    ) -> AnalyticsClientResult<TRes>
    where
        TReq: Serialize,
        TRes: DeserializeOwned,
    {
        let url = self.endpoint(path);
        tracing::debug!(method = method.as_str(), url = url.as_str(), "sending request");

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(AnalyticsClientError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.ok();
            return Err(AnalyticsClientError::from_http_status(status, text));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(AnalyticsClientError::from_reqwest)?;
        serde_json::from_slice(&bytes).map_err(|err| AnalyticsClientError::Decode(err.to_string()))
    }
}

#[async_trait]
impl AnalyticsApi for HttpClient {
    async fn list_users(&self) -> AnalyticsClientResult<Vec<User>> {
        let dto: ListUsersResponseDto = self.send::<(), _>(Method::GET, "/users", None).await?;
        Ok(dto.users.unwrap_or_default())
    }

    async fn list_posts(&self, user_id: &Id) -> AnalyticsClientResult<Vec<Post>> {
        let dto: ListPostsResponseDto = self
            .send::<(), _>(Method::GET, &format!("/users/{user_id}/posts"), None)
            .await?;
        Ok(dto.posts.unwrap_or_default())
    }

    async fn list_comments(&self, post_id: &Id) -> AnalyticsClientResult<Vec<Comment>> {
        let dto: ListCommentsResponseDto = self
            .send::<(), _>(Method::GET, &format!("/posts/{post_id}/comments"), None)
            .await?;
        Ok(dto.comments.unwrap_or_default())
    }

    async fn create_post(&self, input: &NewPost) -> AnalyticsClientResult<Post> {
        let body = self.post_json("/posts", input).await?;
        serde_json::from_value(body).map_err(|err| AnalyticsClientError::Decode(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(base_url: &str) -> HttpClient {
        HttpClient::new(base_url, Duration::from_secs(1)).expect("client should build")
    }

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = client("http://localhost:8080/evaluation-service/");
        let full = client.endpoint("/users/1/posts");
        assert_eq!(full, "http://localhost:8080/evaluation-service/users/1/posts");
    }

    #[test]
    fn endpoint_accepts_path_without_leading_slash() {
        let client = client("http://localhost:8080");
        assert_eq!(client.endpoint("posts"), "http://localhost:8080/posts");
    }

    #[test]
    fn default_endpoint_points_at_service() {
        let client = HttpClient::with_default_endpoint(Duration::from_secs(1))
            .expect("client should build");
        assert_eq!(client.base_url(), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn users_envelope_defaults_to_empty() {
        let absent: ListUsersResponseDto =
            serde_json::from_value(json!({})).expect("absent field should parse");
        let null: ListUsersResponseDto =
            serde_json::from_value(json!({"users": null})).expect("null field should parse");

        assert!(absent.users.unwrap_or_default().is_empty());
        assert!(null.users.unwrap_or_default().is_empty());
    }

    #[test]
    fn comments_envelope_reads_list() {
        let dto: ListCommentsResponseDto = serde_json::from_value(json!({
            "comments": [{"id": 1, "content": "nice"}, {"id": "c2", "content": "ok"}]
        }))
        .expect("comments should parse");

        let comments = dto.comments.unwrap_or_default();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[1].id, Some(Id::Text("c2".to_string())));
    }
}
