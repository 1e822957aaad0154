//! Turns network outcomes into view state, session changes and navigation.
//!
//! Every network operation has the same shape:
//!
//! ```text
//! begin (guard, clear banner, spinner on)
//!   → await transport
//!   → settle: success intent | failure intent (+ teardown on 401)
//! ```
//!
//! Only one network operation may be in flight at a time; a second one is
//! rejected with [`ReconcileError::Busy`] without touching state.
//!
//! Logout starts a new session epoch. A request begun under an older epoch
//! settles as [`ReconcileError::Cancelled`] and leaves state and session alone.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use scopeguard::ScopeGuard;
use thiserror::Error;

use crate::api::{ApiError, Article, ArticleDraft, ArticleId, Transport};
use crate::config::{Credentials, SecureString};
use crate::router::{RouteGuard, Screen};
use crate::session::{SessionError, SessionStore};
use crate::ui::mvi::Reducer;
use crate::ui::view::{Operation, ViewIntent, ViewReducer, ViewState};

#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Another network operation has not settled yet.
    #[error("Cannot start: {pending} is still in progress")]
    Busy { pending: Operation },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),

    /// Login succeeded but the server sent an empty token.
    #[error("Login response did not contain a token")]
    MissingToken,

    /// A logout happened while the request was in flight.
    #[error("{operation} was cancelled by logout")]
    Cancelled { operation: Operation },
}

impl ReconcileError {
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, ReconcileError::Api(e) if e.is_auth_rejection())
    }
}

pub struct Reconciler {
    transport: Arc<dyn Transport>,
    session: Arc<dyn SessionStore>,
    state: Mutex<ViewState>,
    epoch: AtomicU64,
}

/// Identifies one in-flight request and the session epoch it was issued under.
#[derive(Debug, Clone, Copy)]
struct Ticket {
    operation: Operation,
    epoch: u64,
}

impl Reconciler {
    pub fn new(transport: Arc<dyn Transport>, session: Arc<dyn SessionStore>) -> Self {
        Self {
            transport,
            session,
            state: Mutex::new(ViewState::default()),
            epoch: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current view state.
    pub fn state(&self) -> ViewState {
        self.state.lock().clone()
    }

    pub fn session(&self) -> &dyn SessionStore {
        self.session.as_ref()
    }

    pub fn has_session(&self) -> bool {
        self.session.has_token()
    }

    /// Navigate through the route guard. Returns the screen actually shown.
    pub fn navigate(&self, requested: Screen) -> Screen {
        let admitted = RouteGuard::admit(requested, self.session.as_ref());
        self.dispatch(ViewIntent::Navigated(admitted));
        admitted
    }

    /// Show the articles screen and load its contents, as the screen does on mount.
    pub async fn open_articles(&self) -> Result<Screen, ReconcileError> {
        let screen = self.navigate(Screen::Articles);
        if screen == Screen::Articles {
            self.list_articles().await?;
        }
        Ok(screen)
    }

    /// Select the article shown in the edit form. Ids not in the list are ignored.
    pub fn set_editing(&self, id: Option<ArticleId>) {
        self.dispatch(ViewIntent::EditingSelected(id));
    }

    pub fn current_article(&self) -> Option<Article> {
        self.state.lock().current_article().cloned()
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<(), ReconcileError> {
        let pending = self.begin(Operation::Login)?;
        let ticket = *pending;
        let result = self.transport.login(credentials).await;
        let response = self.settle(pending, result)?;

        if response.token.is_empty() {
            return Err(self.fail(ticket, ReconcileError::MissingToken));
        }
        {
            // Logout bumps the epoch under this lock.
            let state = self.state.lock();
            if !self.is_current(ticket) {
                drop(state);
                return Err(self.cancelled(ticket));
            }
            let saved = self.session.save(&SecureString::new(response.token));
            drop(state);
            if let Err(e) = saved {
                return Err(self.fail(ticket, e.into()));
            }
        }

        tracing::info!(username = %credentials.username, "logged in");
        self.commit(
            ticket,
            ViewIntent::LoggedIn {
                message: response.message,
            },
        )?;
        self.navigate(Screen::Articles);
        Ok(())
    }

    /// Drop the session and return to the login screen. No network involved.
    ///
    /// Any request still in flight is orphaned: its result is discarded.
    pub fn logout(&self) {
        {
            let _state = self.state.lock();
            self.epoch.fetch_add(1, Ordering::SeqCst);
        }
        if self.session.has_token() {
            if let Err(e) = self.session.clear() {
                tracing::error!(error = %e, "failed to clear session on logout");
            }
        }
        tracing::info!("logged out");
        self.dispatch(ViewIntent::LoggedOut);
        self.navigate(Screen::Login);
    }

    pub async fn list_articles(&self) -> Result<(), ReconcileError> {
        let pending = self.begin(Operation::ListArticles)?;
        let ticket = *pending;
        let token = self.session.read();
        let result = self.transport.list_articles(token.as_ref()).await;
        let response = self.settle(pending, result)?;

        tracing::info!(count = response.articles.len(), "articles loaded");
        self.commit(
            ticket,
            ViewIntent::ArticlesLoaded {
                articles: response.articles,
                message: response.message,
            },
        )
    }

    pub async fn create_article(&self, draft: &ArticleDraft) -> Result<(), ReconcileError> {
        let pending = self.begin(Operation::CreateArticle)?;
        let ticket = *pending;
        let token = self.session.read();
        let result = self.transport.create_article(token.as_ref(), draft).await;
        let response = self.settle(pending, result)?;

        tracing::info!(id = %response.article.article_id, "article created");
        self.commit(
            ticket,
            ViewIntent::ArticleCreated {
                article: response.article,
                message: response.message,
            },
        )
    }

    pub async fn update_article(
        &self,
        id: ArticleId,
        draft: &ArticleDraft,
    ) -> Result<(), ReconcileError> {
        let pending = self.begin(Operation::UpdateArticle)?;
        let ticket = *pending;
        let token = self.session.read();
        let result = self.transport.update_article(token.as_ref(), id, draft).await;
        let response = self.settle(pending, result)?;

        tracing::info!(%id, "article updated");
        self.commit(
            ticket,
            ViewIntent::ArticleUpdated {
                id,
                draft: draft.clone(),
                message: response.message,
            },
        )
    }

    pub async fn delete_article(&self, id: ArticleId) -> Result<(), ReconcileError> {
        let pending = self.begin(Operation::DeleteArticle)?;
        let ticket = *pending;
        let token = self.session.read();
        let result = self.transport.delete_article(token.as_ref(), id).await;
        let response = self.settle(pending, result)?;

        tracing::info!(%id, "article deleted");
        self.commit(
            ticket,
            ViewIntent::ArticleDeleted {
                id,
                message: response.message,
            },
        )
    }

    fn dispatch(&self, intent: ViewIntent) {
        let mut state = self.state.lock();
        let current = std::mem::take(&mut *state);
        *state = ViewReducer::reduce(current, intent);
    }

    /// Apply a success intent unless a logout orphaned the request.
    fn commit(&self, ticket: Ticket, intent: ViewIntent) -> Result<(), ReconcileError> {
        let mut state = self.state.lock();
        if !self.is_current(ticket) {
            drop(state);
            return Err(self.cancelled(ticket));
        }
        let current = std::mem::take(&mut *state);
        *state = ViewReducer::reduce(current, intent);
        Ok(())
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        self.epoch.load(Ordering::SeqCst) == ticket.epoch
    }

    fn cancelled(&self, ticket: Ticket) -> ReconcileError {
        tracing::info!(operation = %ticket.operation, "discarding result of request orphaned by logout");
        ReconcileError::Cancelled {
            operation: ticket.operation,
        }
    }

    /// Claim the in-flight slot and enter `Pending`.
    ///
    /// The returned guard marks the operation failed if it is dropped without
    /// being settled, so a cancelled request cannot leave the spinner on.
    fn begin(
        &self,
        operation: Operation,
    ) -> Result<ScopeGuard<Ticket, impl FnOnce(Ticket) + '_>, ReconcileError> {
        let ticket = {
            let mut state = self.state.lock();
            if let Some(pending) = state.status.pending() {
                tracing::warn!(%operation, %pending, "rejected while another request is in flight");
                return Err(ReconcileError::Busy { pending });
            }
            let current = std::mem::take(&mut *state);
            *state = ViewReducer::reduce(current, ViewIntent::Started(operation));
            Ticket {
                operation,
                epoch: self.epoch.load(Ordering::SeqCst),
            }
        };
        tracing::debug!(%operation, "request started");

        Ok(scopeguard::guard(ticket, move |ticket| {
            if !self.is_current(ticket) {
                return;
            }
            tracing::warn!(operation = %ticket.operation, "request dropped before completion");
            self.dispatch(ViewIntent::Failed {
                operation: ticket.operation,
                error: "request cancelled".to_string(),
            });
        }))
    }

    fn settle<T, F>(
        &self,
        pending: ScopeGuard<Ticket, F>,
        result: Result<T, ApiError>,
    ) -> Result<T, ReconcileError>
    where
        F: FnOnce(Ticket),
    {
        let ticket = ScopeGuard::into_inner(pending);
        result.map_err(|e| self.fail(ticket, e.into()))
    }

    fn fail(&self, ticket: Ticket, error: ReconcileError) -> ReconcileError {
        let operation = ticket.operation;
        if !self.is_current(ticket) {
            tracing::debug!(%operation, error = %error, "orphaned request failed");
            return self.cancelled(ticket);
        }
        tracing::error!(%operation, error = %error, "request failed");
        self.dispatch(ViewIntent::Failed {
            operation,
            error: error.to_string(),
        });

        // A rejected login is a bad password, not a dead session.
        if operation != Operation::Login && error.is_auth_rejection() {
            tracing::warn!(%operation, "session rejected by server, signing out");
            if let Err(e) = self.session.clear() {
                tracing::error!(error = %e, "failed to clear rejected session");
            }
            self.navigate(Screen::Login);
        }
        error
    }
}
