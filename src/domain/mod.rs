//! Domain types for gerrit-trigger.
//! Defines the events, servers and trigger configurations the rest of the crate works with.

pub mod comment_added;
pub mod error;
pub mod event;
pub mod server;
pub mod verdict;

pub use comment_added::*;
pub use error::*;
pub use event::*;
pub use server::*;
pub use verdict::*;
