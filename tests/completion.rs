//! Completion client tests against a local stand-in provider.

use ai_grow::ai::openai::{CompletionClient, CompletionError, SYSTEM_PROMPT};
use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::json;

async fn spawn_provider(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client_for(base_url: String) -> CompletionClient {
    CompletionClient::new("test-key".to_string(), Some(base_url), None, None, None)
}

#[tokio::test]
async fn returns_first_choice_text() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async {
            Json(json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "X" } },
                    { "message": { "role": "assistant", "content": "Y" } }
                ]
            }))
        }),
    );
    let base = spawn_provider(router).await;

    let reply = client_for(base).complete("hello").await.unwrap();
    assert_eq!(reply, "X");
}

#[tokio::test]
async fn forwards_prompt_verbatim_with_fixed_system_message() {
    // The provider echoes back what it was sent.
    let router = Router::new().route(
        "/chat/completions",
        post(|Json(body): Json<serde_json::Value>| async move {
            let system = body["messages"][0]["content"].as_str().unwrap_or("").to_string();
            let user = body["messages"][1]["content"].as_str().unwrap_or("").to_string();
            Json(json!({
                "choices": [
                    { "message": { "role": "assistant", "content": format!("{}|{}", system, user) } }
                ]
            }))
        }),
    );
    let base = spawn_provider(router).await;

    let reply = client_for(base)
        .complete("Tell me about CATS?!")
        .await
        .unwrap();
    assert_eq!(reply, format!("{}|Tell me about CATS?!", SYSTEM_PROMPT));
}

#[tokio::test]
async fn non_success_status_is_an_api_error() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": { "message": "provider exploded" } })),
            )
        }),
    );
    let base = spawn_provider(router).await;

    let err = client_for(base).complete("hello").await.unwrap_err();
    match err {
        CompletionError::Api { status, .. } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR)
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn body_without_choices_is_malformed() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async { Json(json!({ "nope": true })) }),
    );
    let base = spawn_provider(router).await;

    let err = client_for(base).complete("hello").await.unwrap_err();
    assert!(matches!(err, CompletionError::Malformed(_)));
}

#[tokio::test]
async fn empty_choice_list_is_an_error() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async { Json(json!({ "choices": [] })) }),
    );
    let base = spawn_provider(router).await;

    let err = client_for(base).complete("hello").await.unwrap_err();
    assert!(matches!(err, CompletionError::EmptyChoices));
}
