use axum::{Router, routing::{get, post}};
use crate::{AppState, controllers::watchlist_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/api/watchlist",
            get(watchlist_controller::get_watchlist).post(watchlist_controller::post_add_to_watchlist),
        )
        .route("/api/watchlist/:symbol/delete", post(watchlist_controller::post_remove_from_watchlist))
}
