//! Request and response payloads for the HTTP surface.

pub mod activation;
pub mod admin;
pub mod events;
pub mod health;
pub mod session;
