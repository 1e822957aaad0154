use crate::ui::mvi::Reducer;

use super::intent::ViewIntent;
use super::state::{Operation, OperationStatus, ViewState};

/// Banner text set by logout.
pub const FAREWELL_MESSAGE: &str = "Goodbye!";

pub struct ViewReducer;

impl Reducer for ViewReducer {
    type State = ViewState;
    type Intent = ViewIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ViewIntent::Started(operation) => {
                state.message.clear();
                state.status = OperationStatus::Pending(operation);
            }
            ViewIntent::LoggedIn { message } => {
                state.message = message;
                state.status = OperationStatus::Succeeded(Operation::Login);
            }
            ViewIntent::ArticlesLoaded { articles, message } => {
                state.articles = articles;
                if let Some(id) = state.editing_id {
                    if state.article(id).is_none() {
                        state.editing_id = None;
                    }
                }
                state.message = message;
                state.status = OperationStatus::Succeeded(Operation::ListArticles);
            }
            ViewIntent::ArticleCreated { article, message } => {
                state.articles.push(article);
                state.message = message;
                state.status = OperationStatus::Succeeded(Operation::CreateArticle);
            }
            ViewIntent::ArticleUpdated { id, draft, message } => {
                if let Some(article) = state.articles.iter_mut().find(|a| a.article_id == id) {
                    article.apply(&draft);
                }
                state.editing_id = None;
                state.message = message;
                state.status = OperationStatus::Succeeded(Operation::UpdateArticle);
            }
            ViewIntent::ArticleDeleted { id, message } => {
                state.articles.retain(|a| a.article_id != id);
                if state.editing_id == Some(id) {
                    state.editing_id = None;
                }
                state.message = message;
                state.status = OperationStatus::Succeeded(Operation::DeleteArticle);
            }
            ViewIntent::Failed { operation, error } => {
                state.message.clear();
                state.status = OperationStatus::Failed { operation, error };
            }
            ViewIntent::LoggedOut => {
                state.message = FAREWELL_MESSAGE.to_string();
                state.editing_id = None;
                // The in-flight request is orphaned; its result will be dropped.
                if state.status.is_pending() {
                    state.status = OperationStatus::Idle;
                }
            }
            ViewIntent::Navigated(screen) => {
                state.screen = screen;
            }
            ViewIntent::EditingSelected(id) => {
                state.editing_id = id.filter(|id| state.article(*id).is_some());
            }
        }
        state
    }
}
