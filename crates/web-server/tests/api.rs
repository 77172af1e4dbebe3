//! End-to-end tests for the dashboard HTTP API, driven in-process.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use configuration::DashboardSettings;
use dashboard::Dashboard;
use dataset::{load_orders, OrderRepository};
use serde_json::Value;
use tower::ServiceExt;

const ORDERS_CSV: &str = "\
order_id,product_id,customer_id,customer_city,product_category_name_english,payment_type,payment_value,review_score,order_approved_at
o1,p1,c1,sao paulo,health_beauty,credit_card,120.00,5,2018-01-02 14:30:00
o1,p2,c1,sao paulo,toys,credit_card,120.00,5,2018-01-02 14:30:00
o2,p3,c2,rio de janeiro,toys,boleto,35.50,4,2018-01-03 09:00:00
o3,p4,c3,sao paulo,bed_bath_table,credit_card,80.25,3,2018-01-05 18:45:00
o4,p5,c4,curitiba,,voucher,10.00,,
";

fn app() -> Router {
    let records = load_orders(ORDERS_CSV.as_bytes()).unwrap();
    let dashboard = Dashboard::new(OrderRepository::new(records), DashboardSettings::default());
    web_server::router(dashboard)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn health_check_responds() {
    let response = app()
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn date_range_spans_approved_orders() {
    let (status, body) = get("/api/date-range").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["start"], "2018-01-02T14:30:00");
    assert_eq!(body["end"], "2018-01-05T18:45:00");
}

#[tokio::test]
async fn tabs_are_listed_in_display_order() {
    let (status, body) = get("/api/tabs").await;
    assert_eq!(status, StatusCode::OK);
    let slugs: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["slug"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        slugs,
        vec!["order-items", "review-score", "total-revenue", "customer-by-city", "payment-methods"]
    );
}

#[tokio::test]
async fn payment_tab_highlights_the_most_common_method() {
    let (status, body) = get("/api/tabs/payment-methods").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["no_data"], false);
    assert_eq!(body["metrics"][0]["value"], "credit_card");
    assert_eq!(body["metrics"][1]["value"], "2");

    let points = body["charts"][0]["points"].as_array().unwrap();
    assert_eq!(points[0]["label"], "credit_card");
    assert_eq!(points[0]["highlight"], true);
    assert_eq!(points[1]["label"], "boleto");
    assert_eq!(points[1]["highlight"], false);
}

#[tokio::test]
async fn revenue_tab_respects_the_date_filter() {
    let (status, body) = get("/api/tabs/total-revenue?start=2018-01-02&end=2018-01-03").await;
    assert_eq!(status, StatusCode::OK);
    // Line items are summed individually: 120 + 120 + 35.50.
    assert_eq!(body["metrics"][0]["value"], "Rp 275,50");
    assert_eq!(body["metrics"][1]["value"], "2");
}

#[tokio::test]
async fn empty_range_reports_no_data() {
    let (status, body) = get("/api/tabs/order-items?start=2019-01-01&end=2019-01-31").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["no_data"], true);
    assert_eq!(body["message"], "No data for selected range");
    assert!(body["charts"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn reversed_range_is_a_bad_request() {
    let (status, body) = get("/api/tabs/review-score?start=2018-02-01&end=2018-01-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("after"));
}

#[tokio::test]
async fn unknown_tab_is_not_found() {
    let (status, body) = get("/api/tabs/inventory").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("inventory"));
}

#[tokio::test]
async fn report_exposes_raw_views() {
    let (status, body) = get("/api/report").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rows"], 4);
    assert_eq!(body["reviews"]["most_common"], 5);
    assert_eq!(body["cities"]["most_common"], "sao paulo");
    assert_eq!(body["categories"]["top"][0]["category"], "toys");
    assert_eq!(body["categories"]["top"][0]["products"], 2);
}

async fn get_from(dashboard: Dashboard, uri: &str) -> (StatusCode, Value) {
    let response = web_server::router(dashboard)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn empty_dashboard() -> Dashboard {
    Dashboard::new(OrderRepository::default(), DashboardSettings::default())
}

#[tokio::test]
async fn dataset_without_approvals_has_no_date_range() {
    let (status, body) = get_from(empty_dashboard(), "/api/date-range").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(
        body["error"].as_str().unwrap().contains("no approved orders"),
        "{body}"
    );
}

#[tokio::test]
async fn default_range_over_a_dataset_without_approvals_is_not_found() {
    let (status, body) = get_from(empty_dashboard(), "/api/tabs/order-items").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().is_some());

    // An explicit range needs no dataset bounds.
    let (status, body) =
        get_from(empty_dashboard(), "/api/tabs/order-items?start=2018-01-01&end=2018-01-31").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["no_data"], true);
}

#[tokio::test]
async fn malformed_query_date_is_a_bad_request() {
    let (status, _) = get("/api/tabs/order-items?start=2018-13-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get("/api/report?end=yesterday").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn last_representable_day_is_a_valid_end_bound() {
    let (status, body) = get("/api/tabs/order-items?end=%2B262142-12-31").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["no_data"], false);
    assert_eq!(body["range"]["start"], "2018-01-02T14:30:00");
}
