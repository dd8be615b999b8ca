use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

/// Registers the bearer scheme referenced by the authenticated routes.
struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the Ionia ingestion API.
#[openapi(
    paths(
        crate::routes::activation::activate,
        crate::routes::client::heartbeat,
        crate::routes::events::champ_select_start,
        crate::routes::events::draft_complete,
        crate::routes::events::game_start,
        crate::routes::events::game_finished,
        crate::routes::events::stream_ready,
        crate::routes::admin::create_team,
        crate::routes::admin::create_player,
        crate::routes::health::healthcheck,
    ),
    components(
        schemas(
            crate::dto::activation::ActivationRequest,
            crate::dto::activation::ActivationResponse,
            crate::dto::session::HeartbeatRequest,
            crate::dto::session::ChampSelectStartRequest,
            crate::dto::session::GameSessionResponse,
            crate::dto::session::GameIdResponse,
            crate::dto::session::Ack,
            crate::dto::events::DraftCompleteRequest,
            crate::dto::events::GameStartRequest,
            crate::dto::events::GameFinishedRequest,
            crate::dto::events::StreamReadyRequest,
            crate::dto::events::StreamRole,
            crate::dto::events::StreamPlatform,
            crate::dto::admin::TeamCreateRequest,
            crate::dto::admin::TeamCreateResponse,
            crate::dto::admin::PlayerCreateRequest,
            crate::dto::admin::PlayerCreateResponse,
            crate::dto::health::HealthResponse,
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "activation", description = "One-time installation activation"),
        (name = "client", description = "Client heartbeat"),
        (name = "events", description = "Game lifecycle events"),
        (name = "admin", description = "Team and player provisioning"),
        (name = "health", description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
