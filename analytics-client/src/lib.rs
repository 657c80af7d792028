//! Клиентская библиотека сервиса аналитики социальной сети.
//!
//! Состоит из двух слоёв:
//! - `HttpClient`: REST-клиент поверх `reqwest`, пересылает cookie сервиса;
//! - `AnalyticsViewModel`: состояние экрана (пользователи, посты, комментарии,
//!   черновик, флаг загрузки) и обработчики действий пользователя.
//!
//! Слой отображения читает `ViewState` и вызывает методы view-model.
#![warn(missing_docs)]

mod aggregation;
mod api;
mod error;
mod http_client;
mod models;
mod view_model;

pub use aggregation::{PostCount, post_counts_by_user};
pub use api::AnalyticsApi;
pub use error::{AnalyticsClientError, AnalyticsClientResult, SubmitPostError, ValidationError};
pub use http_client::{DEFAULT_API_BASE_URL, HttpClient};
pub use models::{Comment, Draft, Id, NewPost, Post, User};
pub use view_model::{AnalyticsViewModel, FALLBACK_AUTHOR_ID, ViewState};
