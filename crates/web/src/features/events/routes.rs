use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::Database;

use super::handlers::{
    create_event, delete_event, get_event, get_event_detailed, list_events, list_registrations,
    register_participant, unregister_participant, update_event,
};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_event))
        .route("/:id", put(update_event).delete(delete_event))
        .route("/:id/participants", post(register_participant))
        .route(
            "/:id/participants/:participant_id",
            delete(unregister_participant),
        )
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_events))
        .route("/:id", get(get_event))
        .route("/:id/detailed", get(get_event_detailed))
        .route("/:id/participants", get(list_registrations))
        .merge(protected)
}
