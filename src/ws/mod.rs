//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` streams committed pool events to
//! subscribed clients and answers pool state queries.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
