use axum::{Router, middleware};

use crate::{auth, state::SharedState};

pub mod activation;
pub mod admin;
pub mod client;
pub mod docs;
pub mod events;
pub mod health;

/// Compose all route trees and apply the authorization gate in front.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = activation::router()
        .merge(client::router())
        .merge(events::router())
        .merge(admin::router())
        .merge(health::router());

    let docs_router = docs::router(state.clone());

    api_router
        .merge(docs_router)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::bearer_auth,
        ))
        .with_state(state)
}
