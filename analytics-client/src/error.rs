use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки транспорта клиентской библиотеки `analytics-client`.
pub enum AnalyticsClientError {
    /// Не удалось собрать HTTP-клиент (`reqwest::ClientBuilder`).
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    /// Ошибка соединения или таймаут подключения.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Сервер ответил статусом вне диапазона 2xx.
    #[error("http error {status}: {message}")]
    HttpStatus {
        /// HTTP-статус ответа.
        status: u16,
        /// Тело ответа или описание статуса.
        message: String,
    },

    /// Тело ответа не является JSON ожидаемой формы.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Результат операций `analytics-client`.
pub type AnalyticsClientResult<T> = Result<T, AnalyticsClientError>;

impl AnalyticsClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, body: Option<String>) -> Self {
        let message = body
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| status_fallback(status));

        Self::HttpStatus {
            status: status.as_u16(),
            message,
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        Self::Network(err)
    }
}

fn status_fallback(status: reqwest::StatusCode) -> String {
    match status.as_u16() {
        400 => "bad request".to_string(),
        401 => "unauthorized".to_string(),
        403 => "forbidden".to_string(),
        404 => "not found".to_string(),
        500..=599 => "server error".to_string(),
        _ => format!("http status {status}"),
    }
}

/// Ошибки проверки черновика перед отправкой поста.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Не заполнен текст поста или URL изображения.
    #[error("post content and image url are required")]
    MissingFields,

    /// Список пользователей пуст, автора назначить некому.
    #[error("no users available to associate with the post")]
    NoUsers,
}

/// Ошибка операции `submit_post`.
#[derive(Debug, Error)]
pub enum SubmitPostError {
    /// Черновик не прошёл проверку, запрос не отправлялся.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Запрос отправлен, но завершился ошибкой.
    #[error("failed to create post: {0}")]
    Request(#[from] AnalyticsClientError),
}

impl SubmitPostError {
    /// Сообщение, которое показывается пользователю.
    pub fn alert_message(&self) -> &'static str {
        match self {
            Self::Validation(ValidationError::MissingFields) => {
                "Please provide both content and an image URL."
            }
            Self::Validation(ValidationError::NoUsers) => {
                "No users available to associate with the post."
            }
            Self::Request(_) => "Failed to add post. Check the logs for details.",
        }
    }
}
