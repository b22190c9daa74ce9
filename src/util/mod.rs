//! Utility modules: turn scope, retry, text truncation.

pub mod context;
pub mod retry;
pub mod text;
