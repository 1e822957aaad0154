//! Screens and the route guard in front of them.

use crate::session::SessionStore;

/// Logical screens of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// `/`, public.
    #[default]
    Login,
    /// `/articles`, requires a session token.
    Articles,
}

impl Screen {
    pub fn path(self) -> &'static str {
        match self {
            Screen::Login => "/",
            Screen::Articles => "/articles",
        }
    }

    /// Map a path to a screen. Trailing slashes are ignored; unknown paths yield `None`.
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "" => Some(Screen::Login),
            "/articles" | "articles" => Some(Screen::Articles),
            _ => None,
        }
    }

    pub fn is_protected(self) -> bool {
        matches!(self, Screen::Articles)
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Decides which screen a navigation attempt actually lands on.
///
/// Holds no state: the session is consulted on every call, so a token that
/// disappears between navigations is noticed on the next one.
pub struct RouteGuard;

impl RouteGuard {
    pub fn admit(requested: Screen, session: &dyn SessionStore) -> Screen {
        if requested.is_protected() && !session.has_token() {
            tracing::debug!(requested = %requested, "no session token, redirecting to login");
            return Screen::Login;
        }
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SecureString;
    use crate::session::MemorySessionStore;

    #[test]
    fn test_paths() {
        assert_eq!(Screen::Login.path(), "/");
        assert_eq!(Screen::Articles.path(), "/articles");
        assert_eq!(Screen::from_path("/"), Some(Screen::Login));
        assert_eq!(Screen::from_path("/articles/"), Some(Screen::Articles));
        assert_eq!(Screen::from_path("articles"), Some(Screen::Articles));
        assert_eq!(Screen::from_path("/nope"), None);
    }

    #[test]
    fn test_login_is_always_admitted() {
        let session = MemorySessionStore::new();
        assert_eq!(RouteGuard::admit(Screen::Login, &session), Screen::Login);
    }

    #[test]
    fn test_articles_requires_token() {
        let session = MemorySessionStore::new();
        assert_eq!(RouteGuard::admit(Screen::Articles, &session), Screen::Login);

        session.save(&SecureString::from("tok")).unwrap();
        assert_eq!(RouteGuard::admit(Screen::Articles, &session), Screen::Articles);
    }

    #[test]
    fn test_rechecked_on_every_navigation() {
        let session = MemorySessionStore::with_token("tok");
        assert_eq!(RouteGuard::admit(Screen::Articles, &session), Screen::Articles);

        session.clear().unwrap();
        assert_eq!(RouteGuard::admit(Screen::Articles, &session), Screen::Login);
    }
}
