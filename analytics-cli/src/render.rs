use std::fmt::Write;

use analytics_client::{Comment, Id, Post, PostCount, User};

const BAR_WIDTH: usize = 40;

fn show_id(id: Option<&Id>) -> String {
    id.map(Id::to_string).unwrap_or_else(|| "-".to_string())
}

pub(crate) fn render_users(users: &[User]) -> String {
    let mut out = format!("Пользователей: {}\n", users.len());
    for user in users {
        let _ = writeln!(out, "- [{}] {}", show_id(user.id.as_ref()), user.name);
    }
    out
}

pub(crate) fn render_posts(posts: &[Post]) -> String {
    let mut out = format!("Постов: {}\n", posts.len());
    for post in posts {
        let _ = writeln!(
            out,
            "- [{}] {} (userId={})",
            show_id(post.id().as_ref()),
            post.content().unwrap_or_default(),
            show_id(post.user_id().as_ref())
        );
        if let Some(image_url) = post.image_url() {
            let _ = writeln!(out, "  image: {image_url}");
        }
    }
    out
}

pub(crate) fn render_comments(comments: &[Comment]) -> String {
    let mut out = format!("Комментариев: {}\n", comments.len());
    for comment in comments {
        let _ = writeln!(out, "- {}", comment.content);
    }
    out
}

pub(crate) fn render_post(title: &str, post: &Post) -> String {
    let body = serde_json::to_string_pretty(post).unwrap_or_else(|_| "{}".to_string());
    format!("{title}\n{body}\n")
}

/// Горизонтальный график; самый длинный столбец занимает `BAR_WIDTH` символов.
pub(crate) fn render_chart(counts: &[PostCount]) -> String {
    let mut out = String::from("Постов по пользователям\n");
    let label_width = counts
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0);
    let max = counts.iter().map(|c| c.posts).max().unwrap_or(0);

    for count in counts {
        let bar_len = if max == 0 {
            0
        } else {
            (count.posts * BAR_WIDTH).div_ceil(max)
        };
        let padding = label_width - count.name.chars().count();
        let _ = writeln!(
            out,
            "{}{} | {} {}",
            count.name,
            " ".repeat(padding),
            "█".repeat(bar_len),
            count.posts
        );
    }
    out
}
