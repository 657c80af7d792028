use std::time::Duration;

use analytics_client::{
    AnalyticsApi, AnalyticsClientError, AnalyticsViewModel, Draft, HttpClient, Id, NewPost,
    PostCount, User,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PREFIX: &str = "/evaluation-service";

fn client_for(server: &MockServer) -> HttpClient {
    HttpClient::new(format!("{}{PREFIX}", server.uri()), Duration::from_secs(2))
        .expect("client should build")
}

#[tokio::test]
async fn list_users_reads_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/users")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{"id": 1, "name": "Ann"}, {"id": "u2", "name": "Bob"}]
        })))
        .mount(&server)
        .await;

    let users = client_for(&server)
        .list_users()
        .await
        .expect("list_users must succeed");

    assert_eq!(users, vec![User::new(1, "Ann"), User::new("u2", "Bob")]);
}

#[tokio::test]
async fn list_users_defaults_to_empty_when_field_missing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/users")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 0})))
        .mount(&server)
        .await;

    let users = client_for(&server)
        .list_users()
        .await
        .expect("list_users must succeed");

    assert!(users.is_empty());
}

#[tokio::test]
async fn non_success_status_is_reported_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/users/7/posts")))
        .respond_with(ResponseTemplate::new(404).set_body_string("user not found"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_posts(&Id::Num(7))
        .await
        .expect_err("404 must fail");

    match err {
        AnalyticsClientError::HttpStatus { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "user not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/posts/3/comments")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_comments(&Id::Num(3))
        .await
        .expect_err("html body must fail");

    assert!(matches!(err, AnalyticsClientError::Decode(_)));
}

#[tokio::test]
async fn get_json_returns_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/anything")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let body = client_for(&server)
        .get_json("anything")
        .await
        .expect("get_json must succeed");

    assert_eq!(body, json!({"ok": true}));
}

#[tokio::test]
async fn create_post_sends_camel_case_body() {
    let server = MockServer::start().await;
    let echo = json!({
        "id": 501,
        "userId": 1,
        "content": "hi",
        "imageUrl": "http://x/i.png",
        "status": "queued"
    });
    Mock::given(method("POST"))
        .and(path(format!("{PREFIX}/posts")))
        .and(body_json(json!({
            "userId": 1,
            "content": "hi",
            "imageUrl": "http://x/i.png"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(echo.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let input = NewPost {
        user_id: Id::Num(1),
        content: "hi".to_string(),
        image_url: "http://x/i.png".to_string(),
    };
    let post = client_for(&server)
        .create_post(&input)
        .await
        .expect("create_post must succeed");

    assert_eq!(serde_json::to_value(&post).expect("post should serialize"), echo);
}

#[tokio::test]
async fn post_json_sends_body_and_returns_raw_echo() {
    let server = MockServer::start().await;
    let echo = json!({"accepted": true, "queue": [1, 2]});
    Mock::given(method("POST"))
        .and(path(format!("{PREFIX}/posts")))
        .and(body_json(json!({"userId": "u1", "content": "x", "imageUrl": "y"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(echo.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let input = NewPost {
        user_id: Id::Text("u1".to_string()),
        content: "x".to_string(),
        image_url: "y".to_string(),
    };
    let body = client_for(&server)
        .post_json("/posts", &input)
        .await
        .expect("post_json must succeed");

    assert_eq!(body, echo);
}

#[tokio::test]
async fn create_post_rejects_non_object_echo() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{PREFIX}/posts")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("ok")))
        .mount(&server)
        .await;

    let input = NewPost {
        user_id: Id::Num(1),
        content: "x".to_string(),
        image_url: "y".to_string(),
    };
    let err = client_for(&server)
        .create_post(&input)
        .await
        .expect_err("string echo must fail");

    assert!(matches!(err, AnalyticsClientError::Decode(_)));
}

#[tokio::test]
async fn odd_fields_do_not_drop_whole_lists() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/users")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [
                {"id": 1, "name": "Ann"},
                {"id": 2, "name": null},
                {"id": 1.5, "name": "F"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/posts/1/comments")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "comments": [{"id": 1, "content": "ok"}, {"id": 2, "content": null}]
        })))
        .mount(&server)
        .await;

    let vm = AnalyticsViewModel::new(client_for(&server));
    vm.load_users().await;
    vm.load_comments(&Id::Num(1)).await;

    let users = vm.users();
    assert_eq!(users.len(), 3);
    assert_eq!(users[0], User::new(1, "Ann"));
    assert!(users[1].name.is_empty());
    assert_eq!(users[2].id.as_ref().map(Id::to_string).as_deref(), Some("1.5"));

    let comments = vm.comments();
    assert_eq!(comments.len(), 2);
    assert!(comments[1].content.is_empty());
}

#[tokio::test]
async fn view_model_flow_against_mock_service() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/users")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/users/1/posts")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "posts": [
                {"id": 10, "userId": 1, "content": "a", "imageUrl": "i"},
                {"id": 11, "userId": 1, "content": "b", "imageUrl": "i"},
                {"id": 12, "userId": 3, "content": "c", "imageUrl": "i"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("{PREFIX}/posts")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 13, "userId": 1, "content": "new", "imageUrl": "http://x/i.png"
        })))
        .mount(&server)
        .await;

    let vm = AnalyticsViewModel::new(client_for(&server));
    vm.load_users().await;
    vm.load_posts(&Id::Num(1)).await;

    assert!(!vm.is_loading());
    assert_eq!(
        vm.post_counts(),
        vec![
            PostCount {
                name: "A".to_string(),
                posts: 2
            },
            PostCount {
                name: "B".to_string(),
                posts: 0
            },
        ]
    );

    vm.set_draft_content("new");
    vm.set_draft_image_url("http://x/i.png");
    vm.submit_draft().await.expect("submit_draft must succeed");

    assert_eq!(vm.posts().len(), 4);
    assert_eq!(vm.draft(), Draft::default());
    assert_eq!(vm.post_counts()[0].posts, 3);
}

#[tokio::test]
async fn view_model_swallows_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/users")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let vm = AnalyticsViewModel::new(client_for(&server));
    vm.load_users().await;

    assert!(!vm.is_loading());
    assert!(vm.users().is_empty());

    let result = vm.submit_post(Draft::new("hi", "http://x/i.png")).await;
    assert!(result.is_err());
    assert!(vm.alert().is_some());
}
