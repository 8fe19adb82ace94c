//! Infrastructure layer (adapters/implementations).
//!
//! This module contains the config file, the shared server store and the
//! event stream decoding.

pub mod app_config;
pub mod events;
pub mod servers;
