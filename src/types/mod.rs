//! Core types shared by the conversation loop, tools and callers.

pub mod content;
pub mod context;
pub mod message;
pub mod stream;
pub mod usage;

pub use content::*;
pub use context::*;
pub use message::*;
pub use stream::*;
pub use usage::*;
