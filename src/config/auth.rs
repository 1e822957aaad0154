//! Authentication header building for API requests.

use super::credentials::{AuthScheme, SecureString};

/// Header name and value for authentication.
pub type AuthHeader = (String, String);

/// Build the authentication header for a session token.
///
/// Returns `None` when there is no token or it is empty; the request then
/// goes out unauthenticated and the server answers 401.
pub fn build_auth_header(scheme: AuthScheme, token: Option<&SecureString>) -> Option<AuthHeader> {
    let token = token.filter(|t| !t.is_empty())?;
    let value = match scheme {
        AuthScheme::Raw => token.expose().to_string(),
        AuthScheme::Bearer => format!("Bearer {}", token.expose()),
    };
    Some(("Authorization".to_string(), value))
}
