use axum::{Router, routing::{get, post}};
use crate::{AppState, controllers::data_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/data/export", get(data_controller::get_export))
        .route("/api/data/import", post(data_controller::post_import))
        .route("/api/data/clear", post(data_controller::post_clear))
}
