mod common;

use axum::http::StatusCode;
use marketdesk::routes;
use tower::ServiceExt;

use common::{body_json, get, post_json, test_state};

#[tokio::test]
async fn health_reports_provider() {
    let res = routes::app(test_state()).oneshot(get("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["quoteProvider"], "OFFLINE");
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let res = routes::app(test_state()).oneshot(get("/nope")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(body_json(res).await["error"].is_string());
}

#[tokio::test]
async fn offline_indices_use_fallback_values() {
    let res = routes::app(test_state()).oneshot(get("/api/market/indices")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_json(res).await;
    assert_eq!(body[0]["name"], "NIFTY");
    assert_eq!(body[0]["value"].as_f64().unwrap(), 19674.25);
    assert_eq!(body[1]["name"], "SENSEX");
    assert_eq!(body[1]["changePercent"].as_f64().unwrap(), -0.32);
}

#[tokio::test]
async fn quote_for_any_symbol() {
    let res = routes::app(test_state()).oneshot(get("/api/quotes/tcs")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_json(res).await;
    assert_eq!(body["quote"]["symbol"], "TCS");
    assert_eq!(body["name"], "Tata Consultancy Services");
    assert!(body["quote"]["price"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn movers_are_bounded_and_signed() {
    let res = routes::app(test_state())
        .oneshot(get("/api/market/movers?limit=3"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_json(res).await;
    let gainers = body["gainers"].as_array().unwrap();
    let losers = body["losers"].as_array().unwrap();
    assert!(gainers.len() <= 3 && losers.len() <= 3);
    assert!(gainers.iter().all(|m| m["changePercent"].as_f64().unwrap() > 0.0));
    assert!(losers.iter().all(|m| m["changePercent"].as_f64().unwrap() < 0.0));
}

#[tokio::test]
async fn compare_builds_metric_table() {
    let res = routes::app(test_state())
        .oneshot(post_json("/api/compare", r#"{"symbols":["tcs","INFY"]}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_json(res).await;
    assert_eq!(body["stocks"].as_array().unwrap().len(), 2);
    assert_eq!(body["metrics"].as_array().unwrap().len(), 6);
    assert_eq!(body["metrics"][5]["metric"], "Debt/Equity");
    assert_eq!(body["metrics"][5]["values"]["INFY"].as_f64().unwrap(), 0.05);
    assert_eq!(body["metrics"][1]["metric"], "P/E Ratio");
    assert_eq!(body["metrics"][1]["values"]["TCS"].as_f64().unwrap(), 28.3);
}

#[tokio::test]
async fn compare_rejects_too_many_or_unknown() {
    let too_many = r#"{"symbols":["TCS","INFY","RELIANCE","HDFCBANK","ICICIBANK"]}"#;
    let res = routes::app(test_state()).oneshot(post_json("/api/compare", too_many)).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_json(res).await["errors"]["symbols"].is_string());

    let res = routes::app(test_state())
        .oneshot(post_json("/api/compare", r#"{"symbols":["WIPRO"]}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
