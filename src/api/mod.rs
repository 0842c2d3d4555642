//! REST backend mapping.
//!
//! The backend exposes five employee endpoints. This module turns the
//! application's [`ApiRequest`]s into host-agnostic [`HttpCall`]s and decodes
//! replies into [`ApiReply`]s. The plugin shim performs the actual call
//! through Zellij, so everything here is testable natively.
//!
//! - `messages`: request, tag, call and reply types
//! - `client`: `ApiClient` with `prepare` and `parse_reply`

pub mod client;
pub mod messages;

pub use client::{ApiClient, CONTEXT_KEY};
pub use messages::{ApiPayload, ApiReply, ApiRequest, HttpCall, Method, RequestTag};
