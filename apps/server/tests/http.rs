use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use sdash::domain::config::ApiConfig;
use sdash_server::{Server, router};
use tower::ServiceExt;

async fn test_app() -> Router {
    // Defaults use mem:// and seed the demo student.
    let server = Server::builder().config(ApiConfig::default()).build().await.unwrap();
    router::init(server.state().clone())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_grade(uri: &str, grade: f64) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(format!("{{\"grade\": {grade}}}")))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_is_up() {
    let app = test_app().await;

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn dashboard_returns_the_seeded_student() {
    let app = test_app().await;

    let response = app.oneshot(get("/api/dashboard/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["name"], "Max Mustermann");
    assert_eq!(body["matriculation"], 123_456);
    assert_eq!(body["program"], "Computer Science (Bachelor of Science)");
    assert_eq!(body["enrolledOn"], "01.10.2024");
    assert_eq!(body["progress"]["earnedEcts"], 32);
    assert_eq!(body["progress"]["totalEcts"], 180);
    assert_eq!(body["goals"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn unknown_student_is_a_404() {
    let app = test_app().await;

    let response = app.oneshot(get("/api/dashboard/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn grade_entry_round_trip() {
    let app = test_app().await;

    // Record 3 is the only enrolled record in the seed.
    let response =
        app.clone().oneshot(post_grade("/api/students/1/records/3/grade", 1.3)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // A second grade for the same record is rejected.
    let response =
        app.clone().oneshot(post_grade("/api/students/1/records/3/grade", 2.0)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Give the cache invalidation listener a beat to process the event.
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let response = app.oneshot(get("/api/dashboard/1")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["progress"]["earnedEcts"], 40);
}

#[tokio::test]
async fn out_of_scale_grade_is_unprocessable() {
    let app = test_app().await;

    let response =
        app.oneshot(post_grade("/api/students/1/records/3/grade", 6.0)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn grading_an_unknown_record_is_a_404() {
    let app = test_app().await;

    let response =
        app.oneshot(post_grade("/api/students/1/records/42/grade", 2.0)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
