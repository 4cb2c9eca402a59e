//! Internal modules for the darts league client.
//!
//! This library provides the HTTP API client, live-update WebSocket client,
//! printable bracket renderer and configuration used by the dl_client binary.

pub mod api_client;
pub mod config;
pub mod logging;
pub mod render;
pub mod websocket_client;
