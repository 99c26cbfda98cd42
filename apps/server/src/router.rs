use axum::Router;
use roster_kernel::prelude::ApiState;
use roster_kernel::server::not_found_fallback;
use roster_kernel::server::router::system_router;
use tower_http::normalize_path::NormalizePath;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(title = "Roster", description = "In-memory character registry"))]
struct ApiDoc;

/// The routed application with trailing slashes trimmed before matching.
pub type App = NormalizePath<Router>;

/// Composes the character slice, optional system routes and the catch-all fallback.
pub(crate) fn init(state: ApiState) -> App {
    let server = state.config.server.clone();

    let mut api = OpenApiRouter::with_openapi(ApiDoc::openapi()).merge(roster_characters::router());
    if server.health {
        api = api.merge(system_router());
    }

    // Separate the routes and the API documentation object
    let (routes, api_doc) = api.with_state(state).split_for_parts();

    let mut app = Router::new().merge(routes);
    if server.docs {
        app = app.merge(Scalar::with_url("/docs", api_doc));
    }

    let app = app
        .fallback(not_found_fallback)
        .method_not_allowed_fallback(not_found_fallback)
        .layer(TraceLayer::new_for_http());

    // Runs ahead of routing, so `/api/characters/` matches `/api/characters`.
    NormalizePath::trim_trailing_slash(app)
}
