//! Client for a token-authenticated articles API.
//!
//! The crate is organised leaf-first:
//!
//! ```text
//! config ──→ api::transport ──┐
//!                              ├──→ reconciler ──→ ui::view (ViewState)
//! session ──→ router ─────────┘
//! ```
//!
//! The [`reconciler::Reconciler`] is the only component that talks to the
//! network; everything it learns is folded into a [`ui::view::ViewState`]
//! by a pure reducer.

pub mod api;
pub mod config;
pub mod logging;
pub mod reconciler;
pub mod router;
pub mod session;
pub mod ui;
