use axum::http::{Method, StatusCode};
use serde_json::json;

mod support;

use support::{ADMIN_TOKEN, EDITOR_TOKEN, VISITOR_ID, send_json};

#[tokio::test]
async fn e2e_user_list_reports_status() {
    let app = support::build_test_app();
    let banned = app
        .auth
        .seed_user("banned@example.com", "banned-password", true, &[]);
    app.auth.ban(banned);
    app.auth
        .seed_user("pending@example.com", "pending-password", false, &[]);

    let (status, body) =
        send_json(&app.router, Method::GET, "/api/v1/users", Some(ADMIN_TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);

    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 5);
    let status_of = |email: &str| {
        users
            .iter()
            .find(|u| u["email"] == email)
            .map(|u| u["status"].clone())
            .unwrap()
    };
    assert_eq!(status_of("admin@example.com"), "Active");
    assert_eq!(status_of("banned@example.com"), "Banned");
    assert_eq!(status_of("pending@example.com"), "Not Active");
}

#[tokio::test]
async fn e2e_lookup_by_login() {
    let app = support::build_test_app();

    let (status, body) = send_json(
        &app.router,
        Method::GET,
        "/api/v1/users/lookup?login=visitor@example.com",
        Some(ADMIN_TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], VISITOR_ID);

    let (status, body) = send_json(
        &app.router,
        Method::GET,
        "/api/v1/users/lookup?login=nobody@example.com",
        Some(ADMIN_TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "user_not_found");
}

#[tokio::test]
async fn e2e_group_selection_marks_memberships() {
    let app = support::build_test_app();

    let (status, body) = send_json(
        &app.router,
        Method::GET,
        &format!("/api/v1/groups/selection?user_id={VISITOR_ID}"),
        Some(ADMIN_TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "id": 1, "name": "Public", "field": "groups[1]", "selected": true },
            { "id": 2, "name": "Editors", "field": "groups[2]", "selected": false },
            { "id": 3, "name": "Administrators", "field": "groups[3]", "selected": false }
        ])
    );

    let (status, body) =
        send_json(&app.router, Method::GET, "/api/v1/groups/selection", Some(ADMIN_TOKEN), None)
            .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body[0].get("selected").is_none());
}

#[tokio::test]
async fn e2e_create_update_and_delete_user() {
    let app = support::build_test_app();

    let (status, created) = send_json(
        &app.router,
        Method::POST,
        "/api/v1/users",
        Some(ADMIN_TOKEN),
        Some(json!({
            "email": "staff@example.com",
            "password": "staff-password",
            "first_name": "Staff",
            "last_name": "Member",
            "activated": true,
            "groups": { "2": true }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["groups"], json!(["Editors"]));
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = send_json(
        &app.router,
        Method::PUT,
        &format!("/api/v1/users/{id}"),
        Some(ADMIN_TOKEN),
        Some(json!({ "last_name": "Lead", "groups": { "2": false, "3": true } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["last_name"], "Lead");
    assert_eq!(updated["groups"], json!(["Administrators"]));

    let uri = format!("/api/v1/users/{id}");
    let (status, _) = send_json(&app.router, Method::DELETE, &uri, Some(ADMIN_TOKEN), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send_json(&app.router, Method::DELETE, &uri, Some(ADMIN_TOKEN), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn e2e_editor_cannot_list_users() {
    let app = support::build_test_app();

    let (status, body) =
        send_json(&app.router, Method::GET, "/api/v1/users", Some(EDITOR_TOKEN), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Forbidden");
}
