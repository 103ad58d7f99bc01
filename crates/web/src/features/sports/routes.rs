use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use storage::Database;

use super::handlers::{
    create_sport, delete_sport, get_sport, get_sport_detailed, list_sports, update_sport,
};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_sport))
        .route("/:id", put(update_sport).delete(delete_sport))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_sports))
        .route("/:id", get(get_sport))
        .route("/:id/detailed", get(get_sport_detailed))
        .merge(protected)
}
