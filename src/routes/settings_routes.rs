use axum::{Router, routing::{get, post}};
use crate::{AppState, controllers::settings_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/api/settings",
            get(settings_controller::get_settings).post(settings_controller::post_settings),
        )
        .route("/api/settings/reset", post(settings_controller::post_reset_settings))
}
