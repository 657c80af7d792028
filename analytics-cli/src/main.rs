use std::io;
use std::process;

use analytics_client::{AnalyticsViewModel, HttpClient, Id};
use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};

mod loading;
mod logging;
mod render;
mod settings;

use loading::with_loading_hint;
use logging::init_logging;
use settings::Settings;

#[derive(Debug, Parser)]
#[command(
    name = "analytics-cli",
    version,
    about = "CLI для просмотра аналитики социальной сети"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Список пользователей.
    Users,
    /// Посты пользователя.
    Posts {
        #[arg(long)]
        user_id: Id,
    },
    /// Комментарии к посту.
    Comments {
        #[arg(long)]
        post_id: Id,
    },
    /// Создание поста от имени первого пользователя.
    Create {
        #[arg(long, default_value = "")]
        content: String,
        #[arg(long, default_value = "")]
        image_url: String,
    },
    /// График количества постов по пользователям.
    Chart {
        #[arg(long)]
        user_id: Id,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let settings = Settings::from_env()?;
    init_logging(&settings.log_level)?;

    let client = HttpClient::with_default_endpoint(settings.connect_timeout)
        .context("не удалось создать HTTP-клиент")?;
    tracing::debug!(base_url = client.base_url(), "client ready");
    let vm = AnalyticsViewModel::new(client);
    let mut hint = io::stderr();

    match cli.command {
        Command::Users => {
            with_loading_hint(&vm, vm.load_users(), &mut hint).await;
            print!("{}", render::render_users(&vm.users()));
        }
        Command::Posts { user_id } => {
            with_loading_hint(&vm, vm.load_users(), &mut hint).await;
            with_loading_hint(&vm, vm.load_posts(&user_id), &mut hint).await;
            print!("{}", render::render_posts(&vm.posts()));
        }
        Command::Comments { post_id } => {
            with_loading_hint(&vm, vm.load_comments(&post_id), &mut hint).await;
            print!("{}", render::render_comments(&vm.comments()));
        }
        Command::Create { content, image_url } => {
            with_loading_hint(&vm, vm.load_users(), &mut hint).await;
            vm.set_draft_content(content);
            vm.set_draft_image_url(image_url);

            match vm.submit_draft().await {
                Ok(post) => print!("{}", render::render_post("Пост создан", &post)),
                Err(err) => {
                    let alert = vm.alert().unwrap_or_else(|| err.to_string());
                    return Err(anyhow!(alert));
                }
            }
        }
        Command::Chart { user_id } => {
            with_loading_hint(&vm, vm.load_users(), &mut hint).await;
            with_loading_hint(&vm, vm.load_posts(&user_id), &mut hint).await;
            print!("{}", render::render_chart(&vm.post_counts()));
        }
    }

    Ok(())
}
