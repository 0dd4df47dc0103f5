//! Core Campaignwala client library (API, config, session, validation).

pub mod api;
pub mod config;
pub mod logging;
pub mod session;
pub mod validate;
