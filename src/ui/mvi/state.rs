//! Base trait for view state.

/// Marker trait for state objects.
///
/// States are cloned to produce snapshots for the view and compared to detect
/// changes, so they must be `Clone + PartialEq`, and `Default` is the state a
/// fresh session starts from.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
