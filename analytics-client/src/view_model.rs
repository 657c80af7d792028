use std::sync::{Arc, Mutex, PoisonError};

use crate::aggregation::{PostCount, post_counts_by_user};
use crate::api::AnalyticsApi;
use crate::error::{SubmitPostError, ValidationError};
use crate::models::{Comment, Draft, Id, NewPost, Post, User};

/// Автор, которым подписывается пост, если у первого пользователя нет id.
pub const FALLBACK_AUTHOR_ID: &str = "defaultUserId";

#[derive(Debug, Clone, Default, PartialEq)]
/// Состояние экрана аналитики.
pub struct ViewState {
    /// Последний загруженный список пользователей.
    pub users: Vec<User>,
    /// Посты последнего выбранного пользователя и созданные посты.
    pub posts: Vec<Post>,
    /// Комментарии последнего выбранного поста.
    pub comments: Vec<Comment>,
    /// Черновик нового поста.
    pub draft: Draft,
    /// Сообщение для пользователя после неудачной отправки поста.
    pub alert: Option<String>,
    in_flight: usize,
}

impl ViewState {
    /// `true`, пока выполняется хотя бы одна загрузка.
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Данные для графика постов по пользователям.
    pub fn post_counts(&self) -> Vec<PostCount> {
        post_counts_by_user(&self.users, &self.posts)
    }
}

struct LoadingGuard<'a> {
    state: &'a Mutex<ViewState>,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(state: &'a Mutex<ViewState>) -> Self {
        lock(state).in_flight += 1;
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut state = lock(self.state);
        state.in_flight = state.in_flight.saturating_sub(1);
    }
}

fn lock(state: &Mutex<ViewState>) -> std::sync::MutexGuard<'_, ViewState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Владелец состояния экрана и обработчики пользовательских действий.
///
/// Клон разделяет то же состояние, поэтому обработчики можно запускать
/// из нескольких задач. Незавершённые запросы не отменяются: при
/// перекрывающихся загрузках список заменяет тот ответ, что пришёл последним.
pub struct AnalyticsViewModel<A> {
    api: Arc<A>,
    state: Arc<Mutex<ViewState>>,
}

impl<A> Clone for AnalyticsViewModel<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            state: Arc::clone(&self.state),
        }
    }
}

impl<A: AnalyticsApi> AnalyticsViewModel<A> {
    /// Создаёт view-model с пустым состоянием.
    pub fn new(api: A) -> Self {
        Self::from_shared(Arc::new(api))
    }

    /// Создаёт view-model поверх уже разделяемого клиента.
    pub fn from_shared(api: Arc<A>) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(ViewState::default())),
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut ViewState) -> R) -> R {
        f(&mut lock(&self.state))
    }

    /// Копия текущего состояния для отрисовки.
    pub fn snapshot(&self) -> ViewState {
        self.with_state(|state| state.clone())
    }

    /// Идёт ли сейчас загрузка.
    pub fn is_loading(&self) -> bool {
        self.with_state(|state| state.is_loading())
    }

    /// Загруженные пользователи.
    pub fn users(&self) -> Vec<User> {
        self.with_state(|state| state.users.clone())
    }

    /// Текущие посты.
    pub fn posts(&self) -> Vec<Post> {
        self.with_state(|state| state.posts.clone())
    }

    /// Текущие комментарии.
    pub fn comments(&self) -> Vec<Comment> {
        self.with_state(|state| state.comments.clone())
    }

    /// Текущий черновик.
    pub fn draft(&self) -> Draft {
        self.with_state(|state| state.draft.clone())
    }

    /// Сообщение об ошибке отправки, если есть.
    pub fn alert(&self) -> Option<String> {
        self.with_state(|state| state.alert.clone())
    }

    /// Скрывает сообщение об ошибке.
    pub fn dismiss_alert(&self) {
        self.with_state(|state| state.alert = None);
    }

    /// Ввод текста поста.
    pub fn set_draft_content(&self, content: impl Into<String>) {
        let content = content.into();
        self.with_state(|state| state.draft.content = content);
    }

    /// Ввод URL изображения.
    pub fn set_draft_image_url(&self, image_url: impl Into<String>) {
        let image_url = image_url.into();
        self.with_state(|state| state.draft.image_url = image_url);
    }

    /// Количество загруженных постов по каждому пользователю.
    pub fn post_counts(&self) -> Vec<PostCount> {
        self.with_state(|state| state.post_counts())
    }

    /// Загружает пользователей. Ошибка логируется, список остаётся прежним.
    pub async fn load_users(&self) {
        let _loading = LoadingGuard::acquire(&self.state);
        match self.api.list_users().await {
            Ok(users) => self.with_state(|state| state.users = users),
            Err(err) => tracing::error!(error = %err, "error fetching users"),
        }
    }

    /// Загружает посты пользователя, заменяя текущий список.
    pub async fn load_posts(&self, user_id: &Id) {
        let _loading = LoadingGuard::acquire(&self.state);
        match self.api.list_posts(user_id).await {
            Ok(posts) => self.with_state(|state| state.posts = posts),
            Err(err) => tracing::error!(error = %err, %user_id, "error fetching posts"),
        }
    }

    /// Загружает комментарии поста, заменяя текущий список.
    pub async fn load_comments(&self, post_id: &Id) {
        let _loading = LoadingGuard::acquire(&self.state);
        match self.api.list_comments(post_id).await {
            Ok(comments) => self.with_state(|state| state.comments = comments),
            Err(err) => tracing::error!(error = %err, %post_id, "error fetching comments"),
        }
    }

    /// Отправляет пост от имени первого загруженного пользователя.
    ///
    /// При успехе ответ сервера добавляется в `posts`, черновик очищается.
    /// При любой ошибке выставляется `alert`, черновик не меняется.
    pub async fn submit_post(&self, draft: Draft) -> Result<Post, SubmitPostError> {
        self.dismiss_alert();

        let result = self.send_post(draft).await;
        if let Err(err) = &result {
            if let SubmitPostError::Request(source) = err {
                tracing::error!(error = %source, "error adding post");
            }
            let message = err.alert_message().to_string();
            self.with_state(|state| state.alert = Some(message));
        }
        result
    }

    /// То же, что [`Self::submit_post`], для черновика из состояния.
    pub async fn submit_draft(&self) -> Result<Post, SubmitPostError> {
        let draft = self.draft();
        self.submit_post(draft).await
    }

    async fn send_post(&self, draft: Draft) -> Result<Post, SubmitPostError> {
        if draft.content.is_empty() || draft.image_url.is_empty() {
            return Err(ValidationError::MissingFields.into());
        }

        let user_id = self
            .with_state(|state| state.users.first().map(author_id))
            .ok_or(ValidationError::NoUsers)?;

        let input = NewPost {
            user_id,
            content: draft.content,
            image_url: draft.image_url,
        };
        tracing::debug!(body = ?input, "sending post");

        let post = self.api.create_post(&input).await?;
        tracing::debug!(response = ?post, "post created");

        self.with_state(|state| {
            state.posts.push(post.clone());
            state.draft = Draft::default();
        });
        Ok(post)
    }
}

fn author_id(user: &User) -> Id {
    user.id
        .clone()
        .filter(|id| !id.is_blank())
        .unwrap_or_else(|| Id::Text(FALLBACK_AUTHOR_ID.to_string()))
}
