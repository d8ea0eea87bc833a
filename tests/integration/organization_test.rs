//! Integration tests for the organization lifecycle.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_create_join_leave_lifecycle() {
    let app = helpers::TestApp::new().await;
    let admin = app.user();
    let key = app.create_organization(&admin, 3).await;
    assert_eq!(key.len(), 6);
    assert!(key.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));

    let member = app.user();
    let joined = app.join_organization(&member, &key).await;
    assert_eq!(joined.status, StatusCode::OK);
    assert_eq!(joined.json()["data"]["role"], "member");
    assert!(joined.json()["data"].get("secretKey").is_none());

    let members = app
        .request("GET", "/api/organization/members", None, Some(&member.token))
        .await;
    assert_eq!(members.status, StatusCode::OK);
    let list = members.json()["data"].as_array().cloned().unwrap_or_default();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["userId"], admin.id.to_string());
    assert_eq!(list[0]["role"], "admin");

    let left = app
        .request("DELETE", "/api/organization", None, Some(&member.token))
        .await;
    assert_eq!(left.status, StatusCode::OK);

    let again = app
        .request("DELETE", "/api/organization", None, Some(&member.token))
        .await;
    assert_eq!(again.status, StatusCode::OK);

    let mine = app
        .request("GET", "/api/organization", None, Some(&member.token))
        .await;
    assert_eq!(mine.status, StatusCode::OK);
    assert!(mine.json()["data"].is_null());
}

#[tokio::test]
async fn test_scenario_d_full_organization_rejects_join() {
    let app = helpers::TestApp::new().await;
    let admin = app.user();
    let key = app.create_organization(&admin, 2).await;

    let second = app.user();
    assert_eq!(app.join_organization(&second, &key).await.status, StatusCode::OK);

    let third = app.user();
    let full = app.join_organization(&third, &key).await;
    assert_eq!(full.status, StatusCode::CONFLICT);
    assert_eq!(full.error_code().as_deref(), Some("ORG_FULL"));

    let mine = app
        .request("GET", "/api/organization", None, Some(&third.token))
        .await;
    assert!(mine.json()["data"].is_null());
}

#[tokio::test]
async fn test_one_organization_per_user() {
    let app = helpers::TestApp::new().await;
    let first_admin = app.user();
    let first_key = app.create_organization(&first_admin, 5).await;
    let second_admin = app.user();
    app.create_organization(&second_admin, 5).await;

    let response = app.join_organization(&second_admin, &first_key).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code().as_deref(), Some("ALREADY_IN_ORG"));
}

#[tokio::test]
async fn test_unknown_secret_key() {
    let app = helpers::TestApp::new().await;
    let user = app.user();
    let response = app.join_organization(&user, "ZZZZZZ").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code().as_deref(), Some("INVALID_CODE"));
}

#[tokio::test]
async fn test_invalid_create_request() {
    let app = helpers::TestApp::new().await;
    let user = app.user();
    let response = app
        .request(
            "POST",
            "/api/organization",
            Some(serde_json::json!({ "action": "create", "name": "", "maxMembers": 0 })),
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code().as_deref(), Some("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_organization_files_are_member_only() {
    let app = helpers::TestApp::new().await;
    let admin = app.user();
    let key = app.create_organization(&admin, 5).await;
    let member = app.user();
    app.join_organization(&member, &key).await;

    app.share(&admin, "shared.txt", b"team", 3, true).await;
    app.share(&admin, "private.txt", b"mine", 3, false).await;

    let files = app
        .request("GET", "/api/organization/files", None, Some(&member.token))
        .await;
    assert_eq!(files.status, StatusCode::OK);
    let list = files.json()["data"].as_array().cloned().unwrap_or_default();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["fileName"], "shared.txt");
    assert!(list[0].get("objectPath").is_none());

    let outsider = app.user();
    let denied = app
        .request("GET", "/api/organization/files", None, Some(&outsider.token))
        .await;
    assert_eq!(denied.status, StatusCode::NOT_FOUND);

    let anonymous = app.request("GET", "/api/organization", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_json_is_json_400() {
    let app = helpers::TestApp::new().await;
    let user = app.user();

    let response = app
        .request_raw(
            "POST",
            "/api/organization",
            "application/json",
            "{\"action\": \"create\",",
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code().as_deref(), Some("VALIDATION_ERROR"));

    let unknown_action = app
        .request_raw(
            "POST",
            "/api/organization",
            "application/json",
            "{\"action\": \"rename\"}",
            Some(&user.token),
        )
        .await;
    assert_eq!(unknown_action.status, StatusCode::BAD_REQUEST);
    assert!(unknown_action.json()["message"].is_string());
}
