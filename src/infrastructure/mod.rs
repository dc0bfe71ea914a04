//! Infrastructure layer for platform-specific utilities.
//!
//! Holds the pieces that know about the Zellij sandbox environment rather
//! than about recipes: filesystem paths and tilde expansion.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
