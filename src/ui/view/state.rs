use crate::api::{Article, ArticleId};
use crate::router::Screen;
use crate::ui::mvi::UiState;

/// Network operations the reconciler performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    ListArticles,
    CreateArticle,
    UpdateArticle,
    DeleteArticle,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Login => "login",
            Operation::ListArticles => "list articles",
            Operation::CreateArticle => "create article",
            Operation::UpdateArticle => "update article",
            Operation::DeleteArticle => "delete article",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of the most recent operation.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OperationStatus {
    #[default]
    Idle,
    Pending(Operation),
    Succeeded(Operation),
    Failed { operation: Operation, error: String },
}

impl OperationStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    pub fn pending(&self) -> Option<Operation> {
        match self {
            Self::Pending(op) => Some(*op),
            _ => None,
        }
    }

    /// Error text of a failed operation, for surfacing next to the banner.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { error, .. } => Some(error.as_str()),
            _ => None,
        }
    }
}

/// Everything the rendering layer needs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    /// Banner text, usually the last server message.
    pub message: String,
    /// Client-side copy of the server's articles, in server order.
    pub articles: Vec<Article>,
    /// Article loaded into the edit form, if any.
    pub editing_id: Option<ArticleId>,
    pub screen: Screen,
    pub status: OperationStatus,
}

impl UiState for ViewState {}

impl ViewState {
    /// Loading indicator. Derived from `status`, so it cannot disagree with it.
    pub fn loading(&self) -> bool {
        self.status.is_pending()
    }

    pub fn article(&self, id: ArticleId) -> Option<&Article> {
        self.articles.iter().find(|a| a.article_id == id)
    }

    pub fn current_article(&self) -> Option<&Article> {
        self.editing_id.and_then(|id| self.article(id))
    }
}
