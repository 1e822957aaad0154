//! Base trait for intents.

/// Marker trait for intent objects.
///
/// An intent is either something the user asked for (select an article,
/// navigate) or something the server answered (articles loaded, 401).
pub trait Intent: Send + 'static {}
