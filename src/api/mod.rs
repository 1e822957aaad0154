//! Articles API: wire types, error taxonomy and the HTTP transport.

mod error;
mod transport;
mod types;

pub use error::{ApiError, ErrorKind};
pub use transport::{HttpTransport, Transport};
pub use types::{
    Article, ArticleDraft, ArticleId, ArticleResponse, ArticlesResponse, LoginResponse,
    MessageResponse,
};
