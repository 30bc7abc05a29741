use super::*;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::json;
use shared::{
    domain::ProductId,
    error::{ApiError, ErrorCode},
};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct ServerState {
    pages_requested: Arc<Mutex<Vec<u32>>>,
}

async fn spawn_router(app: Router) -> std::io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

async fn spawn_catalog_server() -> std::io::Result<(String, ServerState)> {
    async fn handle(
        State(state): State<ServerState>,
        Query(query): Query<ListProductsQuery>,
    ) -> Json<serde_json::Value> {
        state
            .pages_requested
            .lock()
            .expect("lock")
            .push(query.page);
        let products: Vec<_> = (0..3)
            .map(|n| {
                json!({
                    "id": query.page * 100 + n,
                    "name": format!("Item {n} on page {}", query.page),
                    "imageUrl": format!("https://cdn.example/{n}.png"),
                })
            })
            .collect();
        Json(json!({ "products": products, "totalPages": 5 }))
    }

    let state = ServerState::default();
    let app = Router::new()
        .route("/api/products", get(handle))
        .with_state(state.clone());
    let base = spawn_router(app).await?;
    Ok((format!("{base}/api"), state))
}

#[tokio::test]
async fn list_products_sends_page_query_and_decodes_listing() {
    let (base_url, state) = spawn_catalog_server().await.expect("spawn server");
    let catalog = HttpProductCatalog::new(&base_url, Duration::from_secs(5)).expect("catalog");

    let listing = catalog.list_products(2).await.expect("listing");

    assert_eq!(listing.total_pages, 5);
    assert_eq!(listing.products.len(), 3);
    assert_eq!(listing.products[0].id, ProductId::new("200"));
    assert_eq!(listing.products[2].name, "Item 2 on page 2");
    assert_eq!(*state.pages_requested.lock().expect("lock"), vec![2]);
}

#[tokio::test]
async fn non_success_status_surfaces_api_error_message() {
    let app = Router::new().route(
        "/products",
        get(|| async {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiError::new(ErrorCode::Unavailable, "network down")),
            )
        }),
    );
    let base_url = spawn_router(app).await.expect("spawn server");
    let catalog = HttpProductCatalog::new(&base_url, Duration::from_secs(5)).expect("catalog");

    let err = catalog.list_products(1).await.expect_err("must fail");

    assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
    assert_eq!(err.message(), "network down");
    assert_eq!(FetchFailure::from(&err).message(), "network down");
}

#[tokio::test]
async fn non_success_status_without_body_uses_status_text() {
    let app = Router::new().route("/products", get(|| async { StatusCode::NOT_FOUND }));
    let base_url = spawn_router(app).await.expect("spawn server");
    let catalog = HttpProductCatalog::new(&base_url, Duration::from_secs(5)).expect("catalog");

    let err = catalog.list_products(9).await.expect_err("must fail");

    assert_eq!(err.message(), "404 Not Found");
}

#[tokio::test]
async fn malformed_listing_is_a_decode_error() {
    let app = Router::new().route(
        "/products",
        get(|| async { Json(json!({ "products": "not-a-list" })) }),
    );
    let base_url = spawn_router(app).await.expect("spawn server");
    let catalog = HttpProductCatalog::new(&base_url, Duration::from_secs(5)).expect("catalog");

    let err = catalog.list_products(1).await.expect_err("must fail");

    assert!(matches!(err, CatalogError::Decode(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let base_url = format!("http://{addr}");
    let catalog = HttpProductCatalog::new(&base_url, Duration::from_secs(5)).expect("catalog");
    let err = catalog.list_products(1).await.expect_err("must fail");

    assert!(matches!(err, CatalogError::Transport(_)), "unexpected error: {err:?}");
    assert!(!err.message().is_empty());
}

#[tokio::test]
async fn slow_catalog_times_out_as_transport_error() {
    let app = Router::new().route(
        "/products",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({ "products": [], "totalPages": 1 }))
        }),
    );
    let base_url = spawn_router(app).await.expect("spawn server");
    let catalog =
        HttpProductCatalog::new(&base_url, Duration::from_millis(200)).expect("catalog");

    let err = catalog.list_products(1).await.expect_err("must time out");

    assert!(matches!(err, CatalogError::Transport(_)), "unexpected error: {err:?}");
    assert_eq!(err.message(), "request timed out");
    assert_eq!(FetchFailure::from(&err).message(), "request timed out");
}

#[test]
fn listing_url_keeps_base_path_segments() {
    let catalog = HttpProductCatalog::new("http://shop.local/api/v1", Duration::from_secs(1))
        .expect("catalog");
    assert_eq!(
        catalog.listing_url().as_str(),
        "http://shop.local/api/v1/products"
    );

    let catalog =
        HttpProductCatalog::new("http://shop.local/", Duration::from_secs(1)).expect("catalog");
    assert_eq!(catalog.listing_url().as_str(), "http://shop.local/products");
}

#[test]
fn rejects_unparseable_base_url() {
    let err = HttpProductCatalog::new("not a url", Duration::from_secs(1)).expect_err("invalid");
    assert!(matches!(err, CatalogError::InvalidUrl { .. }));
    assert!(err.message().contains("not a url"));
}
