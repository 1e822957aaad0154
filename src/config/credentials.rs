//! Sensitive values: login credentials and the session token.
//!
//! Both travel through logs and `Debug` output of larger structs, so the
//! secret parts are wrapped in [`SecureString`].

/// How the session token is placed in the `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// Header value is the token itself.
    Raw,
    /// Header value is `Bearer <token>`.
    Bearer,
}

impl AuthScheme {
    /// Parse auth scheme from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "raw" => Some(AuthScheme::Raw),
            "bearer" => Some(AuthScheme::Bearer),
            _ => None,
        }
    }
}

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when needed for API calls.
#[derive(Clone, PartialEq, Eq)]
pub struct SecureString(String);

impl SecureString {
    /// Create a new secure string.
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Expose the inner value.
    ///
    /// Use sparingly and only when actually sending to APIs or persisting.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for SecureString {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// Username and password submitted to the login endpoint.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecureString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecureString::new(password.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_scheme_parsing() {
        assert_eq!(AuthScheme::parse("raw"), Some(AuthScheme::Raw));
        assert_eq!(AuthScheme::parse("RAW"), Some(AuthScheme::Raw));
        assert_eq!(AuthScheme::parse("bearer"), Some(AuthScheme::Bearer));
        assert_eq!(AuthScheme::parse("Bearer"), Some(AuthScheme::Bearer));
        assert_eq!(AuthScheme::parse("basic"), None);
        assert_eq!(AuthScheme::parse(""), None);
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("foo", "12345678");
        let debug_output = format!("{:?}", creds);
        assert!(debug_output.contains("foo"));
        assert!(!debug_output.contains("12345678"));
    }
}
