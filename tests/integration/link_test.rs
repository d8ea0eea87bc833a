//! Integration tests for upload, link management, stats, and health.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_upload_returns_share_url() {
    let app = helpers::TestApp::new().await;
    let owner = app.user();

    let response = app
        .upload(&owner.token, "my report.pdf", b"pdf", &[("max_views", "2")])
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let data = &response.json()["data"];
    let link_id = data["linkId"].as_str().unwrap_or_default().to_string();
    assert_eq!(link_id.len(), 64);
    assert_eq!(data["maxViews"], 2);
    assert_eq!(data["views"], 0);
    assert_eq!(data["fileName"], "my report.pdf");
    assert_eq!(
        data["shareUrl"],
        format!("{}/share/{link_id}", app.config.links.public_base_url)
    );
    assert!(data.get("objectPath").is_none());
}

#[tokio::test]
async fn test_upload_requires_session() {
    let app = helpers::TestApp::new().await;
    let anonymous = app.upload("not-a-token", "a.txt", b"a", &[]).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_rejects_bad_limits() {
    let app = helpers::TestApp::new().await;
    let owner = app.user();

    let zero_views = app
        .upload(&owner.token, "a.txt", b"a", &[("max_views", "0")])
        .await;
    assert_eq!(zero_views.status, StatusCode::BAD_REQUEST);

    let not_a_number = app
        .upload(&owner.token, "a.txt", b"a", &[("expires_in_hours", "soon")])
        .await;
    assert_eq!(not_a_number.status, StatusCode::BAD_REQUEST);

    let no_org = app
        .upload(
            &owner.token,
            "a.txt",
            b"a",
            &[("share_with_organization", "true")],
        )
        .await;
    assert_eq!(no_org.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_and_delete_links() {
    let app = helpers::TestApp::new().await;
    let owner = app.user();
    let first = app.share(&owner, "a.txt", b"a", 2, false).await;
    app.share(&owner, "b.txt", b"b", 2, false).await;

    let list = app
        .request("GET", "/api/links?page=1&per_page=10", None, Some(&owner.token))
        .await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.json()["data"]["total_items"], 2);

    let other = app.user();
    let forbidden = app
        .request("DELETE", &format!("/api/links/{first}"), None, Some(&other.token))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let deleted = app
        .request("DELETE", &format!("/api/links/{first}"), None, Some(&owner.token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app
        .request("GET", &format!("/api/share/{first}"), None, None)
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stats_are_admin_only() {
    let app = helpers::TestApp::new().await;
    let owner = app.user();
    let link_id = app.share(&owner, "a.pdf", b"abcd", 3, false).await;
    app.share(&owner, "b.png", b"ef", 3, false).await;
    app.request("GET", &format!("/api/share/{link_id}/download"), None, None)
        .await;

    let denied = app
        .request("GET", "/api/admin/stats", None, Some(&owner.token))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let admin = app.admin();
    let stats = app
        .request("GET", "/api/admin/stats", None, Some(&admin.token))
        .await;
    assert_eq!(stats.status, StatusCode::OK);
    let data = &stats.json()["data"];
    assert_eq!(data["totalLinks"], 2);
    assert_eq!(data["totalBytes"], 6);
    assert_eq!(data["totalViews"], 1);
    assert_eq!(data["byExtension"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_health_reports_ok() {
    let app = helpers::TestApp::new().await;
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["status"], "ok");
    assert_eq!(response.json()["store"], true);
}

#[tokio::test]
async fn test_oversized_upload_is_json_413() {
    let app = helpers::TestApp::with_config(|c| c.storage.max_upload_size_bytes = 16).await;
    let owner = app.user();

    let response = app
        .upload(&owner.token, "big.bin", &vec![b'x'; 128 * 1024], &[])
        .await;
    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.error_code().as_deref(), Some("PAYLOAD_TOO_LARGE"));
}

#[tokio::test]
async fn test_bad_query_is_json_400() {
    let app = helpers::TestApp::new().await;
    let owner = app.user();

    let response = app
        .request("GET", "/api/links?page=abc", None, Some(&owner.token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code().as_deref(), Some("VALIDATION_ERROR"));
}
