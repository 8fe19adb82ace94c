//! Application layer (use-cases, policies).
//!
//! Works on plain server lists passed in by the caller, so it can be used
//! without any configuration file or host process.

pub mod categories;
