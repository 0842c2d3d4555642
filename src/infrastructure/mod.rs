//! Infrastructure layer for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`; these
//! helpers map user-facing paths onto it.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
