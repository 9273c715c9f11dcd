use crate::common::spawn_app;

mod common;

#[tokio::test]
async fn health_check_works() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/health", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    assert_eq!(Some(2), response.content_length());
}

#[tokio::test]
async fn unknown_route_returns_json_404() {
    let app = spawn_app().await;

    let response = app.api_client
        .get(&app.url("/no-such-thing"))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(404, response.status().as_u16());
    let json: serde_json::Value = response.json().await.expect("Failed to read JSON");
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], 404);
    assert_eq!(json["message"], "Resource not found");
}

#[tokio::test]
async fn responses_carry_cors_headers() {
    let app = spawn_app().await;

    let response = app.api_client
        .get(&app.url("/categories"))
        .send()
        .await
        .expect("Failed to execute request.");

    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type, Authorization");
}

#[tokio::test]
async fn preflight_is_answered() {
    let app = spawn_app().await;

    let response = app.api_client
        .request(reqwest::Method::OPTIONS, &app.url("/quizzes"))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(204, response.status().as_u16());
    assert!(response.headers().contains_key("access-control-allow-methods"));
}

#[tokio::test]
async fn openapi_document_lists_quiz_endpoint() {
    let app = spawn_app().await;

    let response = app.api_client
        .get(&app.url("/api-docs/openapi.json"))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(200, response.status().as_u16());
    let json: serde_json::Value = response.json().await.expect("Failed to read JSON");
    assert!(json["paths"]["/quizzes"]["post"].is_object());
}

#[tokio::test]
async fn openapi_document_registers_schemas() {
    let app = spawn_app().await;

    let response = app.api_client
        .get(&app.url("/api-docs/openapi.json"))
        .send()
        .await
        .expect("Failed to execute request.");

    let json: serde_json::Value = response.json().await.expect("Failed to read JSON");
    let schemas = &json["components"]["schemas"];
    for name in ["Category", "Question", "QuizRequest", "QuestionList", "ErrorResponse"] {
        assert!(schemas[name].is_object(), "missing schema {}", name);
    }
}
