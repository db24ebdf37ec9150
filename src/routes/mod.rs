use axum::Router;

use crate::{AppState, controllers::home_controller};

pub mod home_routes;
pub mod calculator_routes;
pub mod portfolio_routes;
pub mod watchlist_routes;
pub mod alerts_routes;
pub mod settings_routes;
pub mod data_routes;
pub mod market_routes;

pub fn app(state: AppState) -> Router {
    let router = Router::<AppState>::new();

    let router = home_routes::add_routes(router);
    let router = calculator_routes::add_routes(router);
    let router = portfolio_routes::add_routes(router);
    let router = watchlist_routes::add_routes(router);
    let router = alerts_routes::add_routes(router);
    let router = settings_routes::add_routes(router);
    let router = data_routes::add_routes(router);
    let router = market_routes::add_routes(router);

    router.fallback(home_controller::not_found).with_state(state)
}
