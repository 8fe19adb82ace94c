//! Event types the trigger can be configured for, and decoding of the
//! Gerrit event stream they are matched against.

pub mod registry;
pub mod stream;
