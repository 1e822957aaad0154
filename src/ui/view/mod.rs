//! View state of the articles client and the reducer that owns its transitions.

mod intent;
mod reducer;
mod state;

pub use intent::ViewIntent;
pub use reducer::{ViewReducer, FAREWELL_MESSAGE};
pub use state::{Operation, OperationStatus, ViewState};
