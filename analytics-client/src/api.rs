use async_trait::async_trait;

use crate::error::AnalyticsClientResult;
use crate::models::{Comment, Id, NewPost, Post, User};

/// Операции удалённого сервиса, которые нужны view-model.
#[async_trait]
pub trait AnalyticsApi: Send + Sync {
    /// `GET /users`.
    async fn list_users(&self) -> AnalyticsClientResult<Vec<User>>;

    /// `GET /users/{user_id}/posts`.
    async fn list_posts(&self, user_id: &Id) -> AnalyticsClientResult<Vec<Post>>;

    /// `GET /posts/{post_id}/comments`.
    async fn list_comments(&self, post_id: &Id) -> AnalyticsClientResult<Vec<Comment>>;

    /// `POST /posts`, возвращает ответ сервера как есть.
    async fn create_post(&self, input: &NewPost) -> AnalyticsClientResult<Post>;
}
