use std::time::Duration;

use bookify::backend::{BackendClient, Genre};
use bookify::state::{RecommendOutcome, RecommendationController, RequestState, FETCH_FAILED};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn dune() -> serde_json::Value {
    serde_json::json!({
        "title": "Dune",
        "author": "Herbert",
        "year": 1965,
        "rating": 4.8,
        "description": "Politics and spice on a desert planet.",
        "match_reason": "The definitive space opera."
    })
}

fn book(title: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "author": "Someone",
        "year": "2001",
        "rating": 4.1,
        "description": "...",
        "match_reason": "..."
    })
}

async fn controller_with_results(server: &MockServer, titles: &[&str]) -> RecommendationController {
    let books: Vec<_> = titles.iter().map(|t| book(t)).collect();
    let guard = Mock::given(method("POST"))
        .and(path("/api/books/recommend"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "recommendations": books })),
        )
        .expect(1)
        .mount_as_scoped(server)
        .await;

    let mut controller = RecommendationController::new();
    let done = controller.submit().run(BackendClient::new(&server.uri())).await;
    controller.finish(done);
    drop(guard);
    controller
}

#[tokio::test]
async fn test_space_opera_search_shows_dune() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/books/recommend"))
        .and(body_json(serde_json::json!({
            "query": "space opera",
            "genre": "fiction",
            "min_rating": 4.0
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "recommendations": [dune()] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = RecommendationController::new();
    controller.set_query("space opera".into());
    controller.set_genre(Genre::Fiction);
    controller.set_min_rating(4.0);

    let call = controller.submit();
    assert!(controller.state().is_pending());

    let done = call.run(BackendClient::new(&server.uri())).await;
    assert!(controller.finish(done));

    assert_eq!(controller.state(), &RequestState::Succeeded);
    assert_eq!(controller.results().len(), 1);
    let result = &controller.results()[0];
    assert_eq!(result.title, "Dune");
    assert_eq!(result.year, 1965);
    assert_eq!(result.match_reason.as_deref(), Some("The definitive space opera."));
}

#[tokio::test]
async fn test_empty_recommendations_replace_previous_results() {
    let server = MockServer::start().await;
    let mut controller = controller_with_results(&server, &["A", "B"]).await;
    assert_eq!(controller.results().len(), 2);

    Mock::given(method("POST"))
        .and(path("/api/books/recommend"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "recommendations": [] })),
        )
        .mount(&server)
        .await;

    let done = controller.submit().run(BackendClient::new(&server.uri())).await;
    controller.finish(done);

    assert!(controller.results().is_empty());
    assert_eq!(controller.state(), &RequestState::Succeeded);
}

#[tokio::test]
async fn test_server_error_keeps_previous_results() {
    let server = MockServer::start().await;
    let mut controller = controller_with_results(&server, &["A", "B"]).await;

    Mock::given(method("POST"))
        .and(path("/api/books/recommend"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({ "detail": "model exploded" })),
        )
        .mount(&server)
        .await;

    let done = controller.submit().run(BackendClient::new(&server.uri())).await;
    assert_eq!(done.outcome(), &RecommendOutcome::Unavailable);
    controller.finish(done);

    let titles: Vec<_> = controller.results().iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, ["A", "B"]);
    assert_eq!(controller.state().error(), Some(FETCH_FAILED));
    assert!(controller.can_submit());
}

#[tokio::test]
async fn test_application_error_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/books/recommend"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": "Failed to parse recommendations. Please try again."
        })))
        .mount(&server)
        .await;

    let mut controller = RecommendationController::new();
    let done = controller.submit().run(BackendClient::new(&server.uri())).await;
    controller.finish(done);

    assert_eq!(
        controller.state().error(),
        Some("Failed to parse recommendations. Please try again.")
    );
    assert!(controller.results().is_empty());
}

#[tokio::test]
async fn test_error_body_on_bad_status_wins_over_generic_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/books/recommend"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(serde_json::json!({ "error": "Recommendation model is warming up" })),
        )
        .mount(&server)
        .await;

    let mut controller = RecommendationController::new();
    let done = controller.submit().run(BackendClient::new(&server.uri())).await;
    controller.finish(done);

    assert_eq!(
        controller.state().error(),
        Some("Recommendation model is warming up")
    );
}

#[tokio::test]
async fn test_unreachable_backend_shows_generic_error() {
    // Port 9 (discard) is closed on any sane test machine
    let client = BackendClient::with_timeout("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();

    let mut controller = RecommendationController::new();
    let done = controller.submit().run(client).await;
    controller.finish(done);

    assert_eq!(controller.state().error(), Some(FETCH_FAILED));
}

#[tokio::test]
async fn test_only_latest_search_is_applied() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/books/recommend"))
        .and(body_json(serde_json::json!({ "query": "old", "genre": "", "min_rating": 4.0 })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "recommendations": [book("Old")] })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/books/recommend"))
        .and(body_json(serde_json::json!({ "query": "new", "genre": "", "min_rating": 4.0 })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "recommendations": [book("New")] })),
        )
        .mount(&server)
        .await;

    let client = BackendClient::new(&server.uri());
    let mut controller = RecommendationController::new();

    controller.set_query("old".into());
    let first = controller.submit();
    controller.set_query("new".into());
    let second = controller.submit();

    let (first, second) = tokio::join!(first.run(client.clone()), second.run(client));

    // Deliver the older response last
    assert!(controller.finish(second));
    assert!(!controller.finish(first));

    assert_eq!(controller.results().len(), 1);
    assert_eq!(controller.results()[0].title, "New");
}

#[tokio::test]
async fn test_body_without_results_or_error_changes_nothing() {
    let server = MockServer::start().await;
    let mut controller = controller_with_results(&server, &["A", "B"]).await;

    Mock::given(method("POST"))
        .and(path("/api/books/recommend"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let done = controller.submit().run(BackendClient::new(&server.uri())).await;
    assert!(controller.finish(done));

    let titles: Vec<_> = controller.results().iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, ["A", "B"]);
    assert_eq!(controller.state(), &RequestState::Idle);
    assert!(controller.state().error().is_none());
    assert!(controller.can_submit());
}

#[tokio::test]
async fn test_null_rating_does_not_reject_the_batch() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/books/recommend"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "recommendations": [
                { "title": "Unrated", "author": "Nobody", "year": 1990, "rating": null },
                dune()
            ]
        })))
        .mount(&server)
        .await;

    let mut controller = RecommendationController::new();
    let done = controller.submit().run(BackendClient::new(&server.uri())).await;
    controller.finish(done);

    assert_eq!(controller.state(), &RequestState::Succeeded);
    assert_eq!(controller.results().len(), 2);
    assert_eq!(controller.results()[0].rating, 0.0);
    assert_eq!(controller.results()[1].title, "Dune");
}
