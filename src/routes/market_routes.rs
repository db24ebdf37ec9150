use axum::{Router, routing::{get, post}};
use crate::{AppState, controllers::market_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/quotes/:symbol", get(market_controller::get_quote))
        .route("/api/market/indices", get(market_controller::get_indices))
        .route("/api/market/movers", get(market_controller::get_movers))
        .route("/api/compare", post(market_controller::post_compare))
}
