mod auth;
mod credentials;
mod loader;
mod types;

pub use auth::{build_auth_header, AuthHeader};
pub use credentials::{AuthScheme, Credentials, SecureString};
pub use loader::ConfigError;
pub use types::{ApiConfig, Config, SessionConfig};

impl ApiConfig {
    /// Parsed auth scheme. Unknown values are rejected by `Config::validate`,
    /// so this only falls back to `Raw` for unvalidated configs.
    pub fn scheme(&self) -> AuthScheme {
        AuthScheme::parse(&self.auth_scheme).unwrap_or(AuthScheme::Raw)
    }
}
