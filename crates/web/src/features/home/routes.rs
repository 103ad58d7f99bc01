use axum::{Router, routing::get};
use storage::Database;

use super::handlers::get_summary;

pub fn routes() -> Router<Database> {
    Router::new().route("/", get(get_summary))
}
