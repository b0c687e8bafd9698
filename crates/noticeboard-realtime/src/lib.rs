//! # noticeboard-realtime
//!
//! Real-time WebSocket engine for Noticeboard:
//!
//! - Connection registry with bounded per-connection outbound buffers
//! - Ping/pong heartbeat that drops silent clients
//! - [`GlobalBroadcaster`], which pushes the day's global notifications to
//!   every connected client after a global notification is created

pub mod broadcast;
pub mod connection;
pub mod message;
pub mod server;

pub use broadcast::GlobalBroadcaster;
pub use connection::manager::ConnectionManager;
pub use server::RealtimeEngine;
