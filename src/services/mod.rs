/// Session-based registration and login.
pub mod auth_service;
/// Push of stored activity to live connections.
pub mod broadcast_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Game catalog management.
pub mod game_service;
/// Health check service.
pub mod health_service;
/// Display-name to user resolution.
pub mod identity_service;
/// Historical feed and per-game views.
pub mod snapshot_service;
/// Server-Sent Events streaming of the global feed.
pub mod sse_service;
/// WebSocket connection and message handling service.
pub mod websocket_service;
/// Validated creation of check-ins and comments.
pub mod write_service;
