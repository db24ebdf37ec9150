use axum::{Router, routing::post};
use crate::{AppState, controllers::calculator_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/calculators/sip", post(calculator_controller::post_sip))
        .route("/api/calculators/lumpsum", post(calculator_controller::post_lumpsum))
        .route("/api/calculators/target", post(calculator_controller::post_target))
        .route("/api/calculators/profit-loss", post(calculator_controller::post_profit_loss))
}
