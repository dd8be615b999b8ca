/// Activation key exchange.
pub mod activation_service;
/// Admin provisioning of teams and players.
pub mod admin_service;
/// Startup rehydration of persisted state.
pub mod bootstrap;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Session lifecycle and game events.
pub mod session_service;
/// POV stream events.
pub mod stream_service;
