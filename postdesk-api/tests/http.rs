use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use postdesk_api::server::{self, ServerState};
use postdesk_db::client::DbClient;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app() -> Router {
    let db = DbClient::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    server::app(ServerState::new(&db))
}

async fn send(app: &Router, method: Method, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(path);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

async fn create_customer(app: &Router, name: &str) -> Value {
    let (status, customer) = send(app, Method::POST, "/customer", Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::OK);
    customer
}

#[tokio::test]
async fn customer_crud() {
    let app = app().await;

    let acme = create_customer(&app, "Acme").await;
    let id = acme["customerId"].as_i64().unwrap();
    assert_eq!(acme, json!({ "customerId": id, "name": "Acme", "email": null }));

    let (status, listed) = send(&app, Method::GET, "/customer", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([acme]));

    let (status, updated) = send(
        &app,
        Method::PUT,
        "/customer",
        Some(json!({ "customerId": id, "name": "Acme", "email": "a@acme.test" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["email"], "a@acme.test");

    let (status, fetched) = send(&app, Method::GET, &format!("/customer/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn business_errors_become_500_with_message() {
    let app = app().await;
    create_customer(&app, "Acme").await;

    let (status, body) = send(&app, Method::POST, "/customer", Some(json!({ "name": "Acme" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "A customer named Acme already exists." }));

    let (status, body) = send(
        &app,
        Method::POST,
        "/post",
        Some(json!({ "customerId": 123, "body": "hi", "type": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "error": "The post references customer 123, which does not exist." })
    );

    let (status, body) = send(
        &app,
        Method::PUT,
        "/customer",
        Some(json!({ "customerId": 77, "name": "Nobody" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Customer with id 77 was not found." }));
}

#[tokio::test]
async fn post_lifecycle() {
    let app = app().await;
    let acme = create_customer(&app, "Acme").await;
    let customer_id = acme["customerId"].clone();

    let (status, post) = send(
        &app,
        Method::POST,
        "/post",
        Some(json!({
            "customerId": customer_id,
            "body": "This is a very long body text",
            "type": 2,
            "category": "ignored",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(post["body"], "This is a...");
    assert_eq!(post["category"], "Politics");
    let post_id = post["postId"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        "/post",
        Some(json!({
            "postId": post_id,
            "customerId": customer_id,
            "body": "edited",
            "type": 8,
            "category": "Weather",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["body"], "edited");
    assert_eq!(updated["category"], "Weather");

    let (_, listed) = send(&app, Method::GET, "/post", None).await;
    assert_eq!(listed, json!([updated]));

    let (status, deleted) = send(&app, Method::DELETE, "/post", Some(json!({ "postId": post_id }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, updated);

    let (status, body) = send(&app, Method::GET, &format!("/post/{post_id}"), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": format!("Post with id {post_id} was not found.") }));
}

#[tokio::test]
async fn deleting_customer_removes_posts() {
    let app = app().await;
    let acme = create_customer(&app, "Acme").await;

    for body in ["one", "two"] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/post",
            Some(json!({ "customerId": acme["customerId"], "body": body, "type": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, deleted) = send(&app, Method::DELETE, "/customer", Some(acme.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!(true));

    assert_eq!(send(&app, Method::GET, "/customer", None).await.1, json!([]));
    assert_eq!(send(&app, Method::GET, "/post", None).await.1, json!([]));

    let (status, _) = send(&app, Method::DELETE, "/customer", Some(acme)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn create_multiple_posts() {
    let app = app().await;
    let acme = create_customer(&app, "Acme").await;
    let customer_id = acme["customerId"].clone();

    let (status, created) = send(
        &app,
        Method::POST,
        "/post/create-multiple",
        Some(json!([
            { "customerId": customer_id, "body": "first", "type": 3 },
            { "customerId": customer_id, "body": "second", "type": 0, "category": "Misc" },
        ])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created.as_array().unwrap().len(), 2);
    assert_eq!(created[0]["category"], "Soccer");
    assert_eq!(created[1]["category"], "Misc");
}

#[tokio::test]
async fn create_multiple_posts_failure_is_400() {
    let app = app().await;
    let acme = create_customer(&app, "Acme").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/post/create-multiple",
        Some(json!([
            { "customerId": acme["customerId"], "body": "kept", "type": 1 },
            { "customerId": 999, "body": "rejected", "type": 1 },
        ])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!("Error creating posts: The post references customer 999, which does not exist.")
    );

    let (_, stored) = send(&app, Method::GET, "/post", None).await;
    assert_eq!(stored.as_array().unwrap().len(), 1);
    assert_eq!(stored[0]["body"], "kept");
}

#[tokio::test]
async fn rejected_requests() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Unknown route requested: /nowhere" }));

    let (status, body) = send(&app, Method::POST, "/customer", Some(json!({ "name": "" }))).await;
    assert!(status.is_client_error());
    assert!(body["error"].as_str().unwrap().starts_with("Incoming JSON rejected"));

    let (status, body) = send(&app, Method::GET, "/customer/not-a-number", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Path rejected"));

    let (status, body) = send(&app, Method::PATCH, "/customer", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        body,
        json!({ "error": "Method PATCH is not supported on /customer" })
    );

    let (status, body) = send(&app, Method::GET, "/post/create-multiple", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        body,
        json!({ "error": "Method GET is not supported on /post/create-multiple" })
    );
}
