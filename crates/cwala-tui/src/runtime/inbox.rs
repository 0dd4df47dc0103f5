//! Inbox channel types for async event collection.
//!
//! Handlers send their results directly to the inbox; the runtime drains
//! it each frame. One channel for every async source keeps event
//! collection trivial.

use tokio::sync::mpsc;

use crate::events::UiEvent;

/// Sender half - cloned into every spawned handler.
pub type UiEventSender = mpsc::UnboundedSender<UiEvent>;

/// Receiver half - drained by the runtime each frame.
pub type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;
