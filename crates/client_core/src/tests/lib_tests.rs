use super::*;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use shared::domain::ProductId;
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct CatalogueState {
    searched: Arc<Mutex<Vec<String>>>,
    created: Arc<Mutex<Vec<NewProduct>>>,
}

fn widget_json() -> serde_json::Value {
    json!({
        "id": 1,
        "name": "Widget",
        "description": "d",
        "price": 9.99,
        "created_at": "2024-01-01T00:00:00Z"
    })
}

fn unpriced_json() -> serde_json::Value {
    json!({
        "id": 2,
        "name": "Foo",
        "description": "Bar",
        "price": null,
        "created_at": "2024-01-02T10:00:00"
    })
}

async fn handle_root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Hello World! Database connection is successful." }))
}

async fn handle_count() -> Json<serde_json::Value> {
    Json(json!({ "count": 3 }))
}

async fn handle_get_product(Path(product_id): Path<String>) -> axum::response::Response {
    match product_id.as_str() {
        "1" => Json(widget_json()).into_response(),
        "2" => Json(unpriced_json()).into_response(),
        "42" => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "product not found" })),
        )
            .into_response(),
        "7" => (StatusCode::OK, "not json at all").into_response(),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "internal server error occurred" })),
        )
            .into_response(),
    }
}

async fn handle_search(
    State(state): State<CatalogueState>,
    Path(keyword): Path<String>,
) -> axum::response::Response {
    state.searched.lock().await.push(keyword.clone());
    match keyword.as_str() {
        "widget" => Json(json!([widget_json()])).into_response(),
        "o" => Json(json!([widget_json(), unpriced_json()])).into_response(),
        "garbled" => (StatusCode::OK, "[{\"id\":").into_response(),
        "boom" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        _ => Json(json!([])).into_response(),
    }
}

async fn handle_create(
    State(state): State<CatalogueState>,
    Json(draft): Json<NewProduct>,
) -> axum::response::Response {
    if draft.name == "reject" {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    state.created.lock().await.push(draft.clone());
    (
        StatusCode::CREATED,
        Json(json!({
            "id": 2,
            "name": draft.name,
            "description": draft.description,
            "price": null,
            "created_at": "2024-01-02T10:00:00"
        })),
    )
        .into_response()
}

async fn spawn_catalogue_server() -> (String, CatalogueState) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let state = CatalogueState::default();
    let app = Router::new()
        .route("/", get(handle_root))
        .route("/products", axum::routing::post(handle_create))
        .route("/products/count", get(handle_count))
        .route("/products/search/:keyword", get(handle_search))
        .route("/products/:product_id", get(handle_get_product))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), state)
}

async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}")
}

#[tokio::test]
async fn fetch_product_decodes_found_product() {
    let (server_url, _) = spawn_catalogue_server().await;
    let client = ProductClient::new(&server_url).expect("client");

    let product = client.fetch_product("1").await.expect("product");

    assert_eq!(product.id, ProductId(1));
    assert_eq!(product.name, "Widget");
    assert_eq!(product.price, Some(9.99));
}

#[tokio::test]
async fn fetch_product_maps_404_to_not_found() {
    let (server_url, _) = spawn_catalogue_server().await;
    let client = ProductClient::new(&server_url).expect("client");

    let err = client.fetch_product("42").await.expect_err("must be missing");

    assert!(matches!(err, FetchError::NotFound), "unexpected error: {err:?}");
    assert_eq!(err.lookup_message(), "product not found");
}

#[tokio::test]
async fn fetch_product_keeps_status_and_detail_for_server_errors() {
    let (server_url, _) = spawn_catalogue_server().await;
    let client = ProductClient::new(&server_url).expect("client");

    let err = client.fetch_product("13").await.expect_err("must fail");

    match &err {
        FetchError::Status { status, detail } => {
            assert_eq!(*status, 500);
            assert_eq!(detail.as_deref(), Some("internal server error occurred"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.lookup_message(), "server error occurred");
}

#[tokio::test]
async fn fetch_product_treats_malformed_body_as_transport_failure() {
    let (server_url, _) = spawn_catalogue_server().await;
    let client = ProductClient::new(&server_url).expect("client");

    let err = client.fetch_product("7").await.expect_err("must fail");

    assert!(err.is_transport(), "unexpected error: {err:?}");
    assert_eq!(err.lookup_message(), "failed to fetch product");
}

#[tokio::test]
async fn fetch_product_reports_connection_refused_as_transport_failure() {
    let client = ProductClient::new(&unreachable_url().await).expect("client");

    let err = client.fetch_product("1").await.expect_err("must fail");

    assert!(err.is_transport(), "unexpected error: {err:?}");
}

#[tokio::test]
async fn fetch_product_accepts_products_created_without_price() {
    let (server_url, _) = spawn_catalogue_server().await;
    let client = ProductClient::new(&server_url).expect("client");

    let product = client.fetch_product("2").await.expect("product");

    assert_eq!(product.name, "Foo");
    assert_eq!(product.price, None);
}

#[tokio::test]
async fn search_returns_matching_products_and_empty_lists() {
    let (server_url, state) = spawn_catalogue_server().await;
    let client = ProductClient::new(&server_url).expect("client");

    let hits = client.search_products("widget").await.expect("search");
    let misses = client.search_products("gadget").await.expect("search");

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Widget");
    assert!(misses.is_empty());
    assert_eq!(*state.searched.lock().await, vec!["widget", "gadget"]);
}

#[tokio::test]
async fn search_percent_encodes_keyword_path_segment() {
    let (server_url, state) = spawn_catalogue_server().await;
    let client = ProductClient::new(&format!("{server_url}/")).expect("client");

    client.search_products("blue widget").await.expect("search");

    assert_eq!(*state.searched.lock().await, vec!["blue widget"]);
}

#[tokio::test]
async fn search_keeps_every_match_when_one_has_no_price() {
    let (server_url, _) = spawn_catalogue_server().await;
    let client = ProductClient::new(&server_url).expect("client");

    let hits = client.search_products("o").await.expect("search");

    let names: Vec<_> = hits.iter().map(|p| (p.name.as_str(), p.price)).collect();
    assert_eq!(names, vec![("Widget", Some(9.99)), ("Foo", None)]);
}

#[tokio::test]
async fn search_treats_malformed_body_as_transport_failure() {
    let (server_url, _) = spawn_catalogue_server().await;
    let client = ProductClient::new(&server_url).expect("client");

    let err = client.search_products("garbled").await.expect_err("must fail");

    assert!(err.is_transport(), "unexpected error: {err:?}");
    assert_eq!(err.search_message(), "failed to search products");
}

#[tokio::test]
async fn search_reports_connection_refused_as_transport_failure() {
    let client = ProductClient::new(&unreachable_url().await).expect("client");

    let err = client.search_products("widget").await.expect_err("must fail");

    assert!(err.is_transport(), "unexpected error: {err:?}");
    assert_eq!(err.search_message(), "failed to search products");
}

#[tokio::test]
async fn search_maps_server_errors_to_server_message() {
    let (server_url, _) = spawn_catalogue_server().await;
    let client = ProductClient::new(&server_url).expect("client");

    let err = client.search_products("boom").await.expect_err("must fail");

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.search_message(), "server error occurred");
}

#[tokio::test]
async fn create_posts_draft_and_accepts_created_body() {
    let (server_url, state) = spawn_catalogue_server().await;
    let client = ProductClient::new(&server_url).expect("client");

    let created = client
        .create_product(&NewProduct::new("Foo", "Bar"))
        .await
        .expect("create");

    assert_eq!(created["name"], "Foo");
    assert_eq!(
        *state.created.lock().await,
        vec![NewProduct::new("Foo", "Bar")]
    );
}

#[tokio::test]
async fn create_surfaces_rejections() {
    let (server_url, _) = spawn_catalogue_server().await;
    let client = ProductClient::new(&server_url).expect("client");

    let err = client
        .create_product(&NewProduct::new("reject", "Bar"))
        .await
        .expect_err("must fail");

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.create_message(), "failed to create product");
}

#[tokio::test]
async fn create_reports_connection_refused_as_transport_failure() {
    let client = ProductClient::new(&unreachable_url().await).expect("client");

    let err = client
        .create_product(&NewProduct::new("Foo", "Bar"))
        .await
        .expect_err("must fail");

    assert!(err.is_transport(), "unexpected error: {err:?}");
    assert_eq!(err.create_message(), "failed to create product");
}

#[tokio::test]
async fn count_and_health_read_auxiliary_endpoints() {
    let (server_url, _) = spawn_catalogue_server().await;
    let client = ProductClient::new(&server_url).expect("client");

    assert_eq!(client.count_products().await.expect("count"), 3);
    assert!(client
        .health()
        .await
        .expect("health")
        .contains("Database connection is successful"));
}

#[test]
fn rejects_api_urls_that_cannot_hold_paths() {
    assert!(matches!(
        ProductClient::new("mailto:ops@example.com"),
        Err(FetchError::InvalidUrl(_))
    ));
    assert!(matches!(
        ProductClient::new("not a url"),
        Err(FetchError::InvalidUrl(_))
    ));
}

#[test]
fn builds_endpoints_under_base_path() {
    let client = ProductClient::new("http://localhost:5000/api/").expect("client");

    let url = client.endpoint(&["products", "search", "a b"]).expect("url");

    assert_eq!(url.as_str(), "http://localhost:5000/api/products/search/a%20b");
}
