use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use sdash_kernel::server::system_router;
use tower::ServiceExt;

#[tokio::test]
async fn health_endpoint_reports_up() {
    let (router, _api) = system_router::<()>().split_for_parts();

    let response = router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let cache_control = response.headers().get(header::CACHE_CONTROL).unwrap();
    assert_eq!(cache_control, "no-store, no-cache, must-revalidate");

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["status"], "up");
    assert!(body["uptime"].is_u64());
}
