use crate::api::{Article, ArticleDraft, ArticleId};
use crate::router::Screen;
use crate::ui::mvi::Intent;

use super::state::Operation;

#[derive(Debug, Clone)]
pub enum ViewIntent {
    /// A request is about to be issued. Clears the banner and shows the spinner.
    Started(Operation),
    LoggedIn { message: String },
    ArticlesLoaded { articles: Vec<Article>, message: String },
    ArticleCreated { article: Article, message: String },
    /// The server accepted `draft` for `id`; the cached copy is patched from it.
    ArticleUpdated {
        id: ArticleId,
        draft: ArticleDraft,
        message: String,
    },
    ArticleDeleted { id: ArticleId, message: String },
    Failed { operation: Operation, error: String },
    LoggedOut,
    /// Screen already resolved by the route guard.
    Navigated(Screen),
    EditingSelected(Option<ArticleId>),
}

impl Intent for ViewIntent {}
