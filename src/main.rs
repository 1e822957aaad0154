use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use articles_client::api::{ArticleDraft, ArticleId, HttpTransport};
use articles_client::config::{Config, Credentials};
use articles_client::logging::init_tracing;
use articles_client::reconciler::Reconciler;
use articles_client::router::Screen;
use articles_client::session::FileSessionStore;
use articles_client::ui::view::ViewState;

/// Read when `--password` is omitted, before falling back to stdin.
const PASSWORD_ENV: &str = "ARTICLES_PASSWORD";

#[derive(Parser, Debug)]
#[command(name = "articles", version, about = "Command-line client for the articles API")]
struct Cli {
    /// Path to config file (default: ~/.config/articles-client/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override api.base_url from the config file
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the session token
    Login {
        #[arg(long)]
        username: String,
        /// Visible in the process list; prefer ARTICLES_PASSWORD or stdin
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored session token
    Logout,
    /// List articles
    List,
    /// Create an article
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        text: String,
        #[arg(long)]
        topic: String,
    },
    /// Update an article; omitted fields keep their current value
    Update {
        id: ArticleId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        topic: Option<String>,
    },
    /// Delete an article
    Delete { id: ArticleId },
    /// Show whether a session token is stored
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing("warn");

    let mut config = match cli.config {
        Some(ref path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
        config.validate().context("validating --base-url")?;
    }

    let transport = HttpTransport::new(&config.api).context("building HTTP client")?;
    let session = FileSessionStore::new(config.session.resolved_path());
    let reconciler = Reconciler::new(Arc::new(transport), Arc::new(session));

    match cli.command {
        Command::Login { username, password } => {
            let password = resolve_password(password)?;
            reconciler
                .login(&Credentials::new(username, password))
                .await
                .context("login failed")?;
        }
        Command::Logout => reconciler.logout(),
        Command::List => {
            open_articles(&reconciler).await?;
            print_articles(&reconciler.state());
            return Ok(());
        }
        Command::Create { title, text, topic } => {
            require_session(&reconciler)?;
            reconciler
                .create_article(&ArticleDraft::new(title, text, topic))
                .await
                .context("create failed")?;
        }
        Command::Update {
            id,
            title,
            text,
            topic,
        } => {
            open_articles(&reconciler).await?;
            reconciler.set_editing(Some(id));
            let Some(current) = reconciler.current_article() else {
                bail!("article {} not found", id);
            };

            let mut draft = current.to_draft();
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(text) = text {
                draft.text = text;
            }
            if let Some(topic) = topic {
                draft.topic = topic;
            }
            reconciler
                .update_article(id, &draft)
                .await
                .context("update failed")?;
        }
        Command::Delete { id } => {
            require_session(&reconciler)?;
            reconciler
                .delete_article(id)
                .await
                .context("delete failed")?;
        }
        Command::Status => {
            if reconciler.has_session() {
                println!("Logged in");
            } else {
                println!("Not logged in");
            }
            return Ok(());
        }
    }

    print_banner(&reconciler.state());
    Ok(())
}

fn resolve_password(flag: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = flag.or_else(|| std::env::var(PASSWORD_ENV).ok()) {
        return Ok(password);
    }

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprint!("Password: ");
        std::io::stderr().flush().context("writing prompt")?;
    }
    read_password(stdin.lock())
}

/// First line of `reader`, without the line terminator.
fn read_password(mut reader: impl BufRead) -> anyhow::Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line).context("reading password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        bail!("no password given; pass --password, set {PASSWORD_ENV}, or pipe it on stdin");
    }
    Ok(password.to_string())
}

fn require_session(reconciler: &Reconciler) -> anyhow::Result<()> {
    if reconciler.navigate(Screen::Articles) != Screen::Articles {
        bail!("not logged in; run `articles login` first");
    }
    Ok(())
}

async fn open_articles(reconciler: &Reconciler) -> anyhow::Result<()> {
    let screen = reconciler
        .open_articles()
        .await
        .context("loading articles failed")?;
    if screen != Screen::Articles {
        bail!("not logged in; run `articles login` first");
    }
    Ok(())
}

fn print_banner(state: &ViewState) {
    if !state.message.is_empty() {
        println!("{}", state.message);
    }
}

fn print_articles(state: &ViewState) {
    print_banner(state);
    for article in &state.articles {
        println!(
            "[{}] {} ({})\n    {}",
            article.article_id, article.title, article.topic, article.text
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_from_first_line() {
        let password = read_password("s3cret pass\r\nignored\n".as_bytes()).unwrap();
        assert_eq!(password, "s3cret pass");
    }

    #[test]
    fn test_empty_password_rejected() {
        assert!(read_password("\n".as_bytes()).is_err());
        assert!(read_password("".as_bytes()).is_err());
    }

    #[test]
    fn test_flag_wins() {
        assert_eq!(resolve_password(Some("flag".into())).unwrap(), "flag");
    }
}
