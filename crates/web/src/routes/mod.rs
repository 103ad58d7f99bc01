use axum::Router;
use storage::Database;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::features::{events, home, participants, sports, teams};
use crate::middleware::auth::ApiKeys;

/// Build the `/api` router. Write routes require one of `api_keys`.
pub fn create_router(db: Database, api_keys: ApiKeys) -> Router {
    let api = Router::new()
        .merge(home::routes::routes())
        .nest("/sports", sports::routes::routes(api_keys.clone()))
        .nest("/participants", participants::routes::routes(api_keys.clone()))
        .nest("/events", events::routes::routes(api_keys.clone()))
        .nest("/teams", teams::routes::routes(api_keys));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(db)
}
