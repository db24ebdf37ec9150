use axum::{Router, routing::{get, post}};
use crate::{AppState, controllers::portfolio_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/api/portfolio",
            get(portfolio_controller::get_portfolio).post(portfolio_controller::post_add_holding),
        )
        .route("/api/portfolio/:symbol/delete", post(portfolio_controller::post_remove_holding))
}
