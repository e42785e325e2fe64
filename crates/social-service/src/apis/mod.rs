use std::sync::Arc;

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_scalar::{Scalar, Servable};

use crate::AppState;

pub mod follow_handlers;
pub mod profile_handlers;

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "users", description = "User and follow-graph API"),
        (name = "profiles", description = "Designer profile API")
    )
)]
pub struct ApiDoc;

pub fn setup_routes() -> Router<Arc<AppState>> {
    let api_doc = ApiDoc::openapi();

    let user_router = OpenApiRouter::new()
        .routes(routes!(follow_handlers::upsert_user))
        .routes(routes!(follow_handlers::get_user))
        .routes(routes!(follow_handlers::toggle_follow))
        .routes(routes!(follow_handlers::follow_status))
        .routes(routes!(follow_handlers::get_followers))
        .routes(routes!(follow_handlers::get_following));

    let profile_router = OpenApiRouter::new().routes(routes!(profile_handlers::get_profile));

    let user_router = OpenApiRouter::with_openapi(api_doc.clone()).nest("/users", user_router);

    let profile_router =
        OpenApiRouter::with_openapi(api_doc.clone()).nest("/profiles", profile_router);

    let router = OpenApiRouter::new()
        .merge(user_router)
        .merge(profile_router);

    let (api_router, api_openapi) = OpenApiRouter::new()
        .nest("/api/v1", router)
        .split_for_parts();

    Router::new()
        .merge(Scalar::with_url("/docs", api_openapi))
        .merge(api_router)
}
