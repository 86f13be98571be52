use std::time::Duration;

use bookify::backend::BackendClient;
use bookify::state::{ChatController, Role, APOLOGY};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn reply(text: &str) -> serde_json::Value {
    serde_json::json!({ "response": text })
}

#[tokio::test]
async fn test_chat_reply_is_appended() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/books/chat"))
        .and(body_json(serde_json::json!({ "message": "recommend a mystery" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply("Try The Big Sleep.")))
        .expect(1)
        .mount(&server)
        .await;

    let mut chat = ChatController::new();
    chat.set_input("  recommend a mystery  ".into());
    let call = chat.send_input().expect("message is not blank");

    // The user's turn shows up before the reply arrives
    assert_eq!(chat.transcript().len(), 1);
    assert_eq!(chat.input(), "");

    let done = call.run(BackendClient::new(&server.uri())).await;
    assert!(done.is_success());
    chat.finish(done);

    let transcript = chat.transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].role, Role::User);
    assert_eq!(transcript[1].role, Role::Assistant);
    assert_eq!(transcript[1].text, "Try The Big Sleep.");
}

#[tokio::test]
async fn test_chat_failure_becomes_apology() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/books/chat"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut chat = ChatController::new();
    let call = chat.send("hello").unwrap();
    let done = call.run(BackendClient::new(&server.uri())).await;
    assert!(!done.is_success());
    chat.finish(done);

    assert_eq!(chat.transcript().len(), 2);
    assert_eq!(chat.transcript()[1].text, APOLOGY);
    assert_eq!(chat.awaiting_reply(), 0);
}

#[tokio::test]
async fn test_blank_messages_never_reach_the_backend() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/books/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply("unused")))
        .expect(0)
        .mount(&server)
        .await;

    let mut chat = ChatController::new();
    assert!(chat.send("").is_none());
    assert!(chat.send("   ").is_none());
    assert!(chat.transcript().is_empty());
}

#[tokio::test]
async fn test_overlapping_sends_all_get_replies() {
    let server = MockServer::start().await;

    // The first message is answered more slowly than the second
    Mock::given(method("POST"))
        .and(path("/api/books/chat"))
        .and(body_json(serde_json::json!({ "message": "recommend a fantasy" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(reply("Read Earthsea."))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/books/chat"))
        .and(body_json(serde_json::json!({ "message": "recommend a mystery" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply("Read Gaudy Night.")))
        .mount(&server)
        .await;

    let client = BackendClient::new(&server.uri());
    let mut chat = ChatController::new();
    let before = chat.transcript().len();

    let first = chat.send("recommend a fantasy").unwrap();
    let second = chat.send("recommend a mystery").unwrap();
    let (first_turn, second_turn) = (first.turn(), second.turn());

    let slow = tokio::spawn(first.run(client.clone()));
    let fast = tokio::spawn(second.run(client));

    // Apply completions in the order they arrive
    let fast = fast.await.unwrap();
    chat.finish(fast);
    let slow = slow.await.unwrap();
    chat.finish(slow);

    let transcript = chat.transcript();
    assert_eq!(transcript.len(), before + 4);
    assert_eq!(transcript[2].in_reply_to, Some(second_turn));
    assert_eq!(transcript[2].text, "Read Gaudy Night.");
    assert_eq!(transcript[3].in_reply_to, Some(first_turn));
    assert_eq!(transcript[3].text, "Read Earthsea.");
}
