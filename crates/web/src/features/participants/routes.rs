use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use storage::Database;

use super::handlers::{
    create_participant, delete_participant, get_participant, get_participant_detailed,
    list_participants, update_participant,
};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_participant))
        .route("/:id", put(update_participant).delete(delete_participant))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_participants))
        .route("/:id", get(get_participant))
        .route("/:id/detailed", get(get_participant_detailed))
        .merge(protected)
}
