use serde::{Deserialize, Serialize};

use crate::models::{Post, User};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Столбец графика: имя пользователя и число его постов.
pub struct PostCount {
    /// Имя пользователя.
    pub name: String,
    /// Количество постов этого пользователя среди загруженных.
    pub posts: usize,
}

/// Считает посты по пользователям.
///
/// Одна запись на каждого пользователя в порядке `users`. Посты без
/// подходящего автора не попадают ни в одну запись, пользователь без id
/// не совпадает ни с одним постом.
pub fn post_counts_by_user(users: &[User], posts: &[Post]) -> Vec<PostCount> {
    users
        .iter()
        .map(|user| {
            let posts = match &user.id {
                Some(id) => posts
                    .iter()
                    .filter(|post| post.user_id().as_ref() == Some(id))
                    .count(),
                None => 0,
            };
            PostCount {
                name: user.name.clone(),
                posts,
            }
        })
        .collect()
}
