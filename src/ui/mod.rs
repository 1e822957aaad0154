//! UI-facing state. Rendering itself lives outside this crate.

pub mod mvi;
pub mod view;
