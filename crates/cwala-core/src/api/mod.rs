//! Campaignwala API surface.
//!
//! One thin client plus a module per endpoint group. All endpoint fns are
//! pure async request/response wrappers; callers own retries and state.

pub mod account;
pub mod auth;
pub mod client;
pub mod errors;
pub mod notifications;
pub mod team;
pub mod types;
pub mod wallet;

pub use client::{ApiClient, DEFAULT_BASE_URL, resolve_base_url};
pub use errors::{ApiError, ApiErrorKind};
