//! Integration tests for public share access.

mod helpers;

use http::{StatusCode, header};

#[tokio::test]
async fn test_download_streams_file_with_hardening_headers() {
    let app = helpers::TestApp::new().await;
    let owner = app.user();
    let link_id = app.share(&owner, "report.pdf", b"%PDF-1.7", 3, false).await;

    let response = app
        .request("GET", &format!("/api/share/{link_id}/download"), None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(&response.body[..], b"%PDF-1.7");
    assert_eq!(response.header(header::CONTENT_TYPE), Some("application/pdf"));
    assert_eq!(response.header(header::CONTENT_LENGTH), Some("8"));
    assert_eq!(
        response.header(header::CONTENT_DISPOSITION),
        Some("attachment; filename=\"report.pdf\"; filename*=UTF-8''report.pdf")
    );
    assert_eq!(
        response.header(header::CACHE_CONTROL),
        Some("no-store, must-revalidate")
    );
    assert_eq!(response.header(header::PRAGMA), Some("no-cache"));
    assert_eq!(response.header(header::EXPIRES), Some("0"));
    assert_eq!(response.header(header::X_CONTENT_TYPE_OPTIONS), Some("nosniff"));
}

#[tokio::test]
async fn test_scenario_a_single_view_link_serves_once() {
    let app = helpers::TestApp::new().await;
    let owner = app.user();
    let link_id = app.share(&owner, "once.txt", b"secret", 1, false).await;
    let path = format!("/api/share/{link_id}/download");

    let (first, second) = tokio::join!(
        app.request("GET", &path, None, None),
        app.request("GET", &path, None, None)
    );

    let mut statuses = [first.status, second.status];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::GONE]);

    let served = if first.status == StatusCode::OK { &first } else { &second };
    assert_eq!(&served.body[..], b"secret");
    let refused = if first.status == StatusCode::OK { &second } else { &first };
    assert_eq!(refused.error_code().as_deref(), Some("LINK_EXPIRED"));

    let meta = app
        .request("GET", &format!("/api/share/{link_id}"), None, None)
        .await;
    assert_eq!(meta.json()["data"]["views"], 1);
    assert_eq!(meta.json()["data"]["isExpired"], true);
}

#[tokio::test]
async fn test_scenario_b_org_file_needs_sign_in() {
    let app = helpers::TestApp::new().await;
    let owner = app.user();
    app.create_organization(&owner, 5).await;
    let link_id = app.share(&owner, "plan.txt", b"org only", 5, true).await;

    let anonymous = app
        .request("GET", &format!("/api/share/{link_id}"), None, None)
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        anonymous.error_code().as_deref(),
        Some("AUTHENTICATION_REQUIRED")
    );

    let missing = app.request("GET", "/api/share/nope", None, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.error_code().as_deref(), Some("NOT_FOUND"));

    let stranger = app.user();
    let denied = app
        .request(
            "GET",
            &format!("/api/share/{link_id}/download"),
            None,
            Some(&stranger.token),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(
        denied.error_code().as_deref(),
        Some("ORGANIZATION_ACCESS_DENIED")
    );
}

#[tokio::test]
async fn test_org_member_downloads_via_cookie_session() {
    let app = helpers::TestApp::new().await;
    let owner = app.user();
    let key = app.create_organization(&owner, 5).await;
    let member = app.user();
    assert_eq!(
        app.join_organization(&member, &key).await.status,
        StatusCode::OK
    );
    let link_id = app.share(&owner, "plan.txt", b"org only", 5, true).await;

    let response = app
        .get_with_cookie(&format!("/api/share/{link_id}/download"), &member.token)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(&response.body[..], b"org only");
}

#[tokio::test]
async fn test_scenario_c_past_expiry_wins_over_remaining_views() {
    let app = helpers::TestApp::new().await;
    let owner = app.user();
    let link_id = app.share(&owner, "old.txt", b"stale", 5, false).await;
    app.expire(&link_id).await;

    let download = app
        .request("GET", &format!("/api/share/{link_id}/download"), None, None)
        .await;
    assert_eq!(download.status, StatusCode::GONE);
    assert_eq!(download.error_code().as_deref(), Some("LINK_EXPIRED"));

    let meta = app
        .request("GET", &format!("/api/share/{link_id}"), None, None)
        .await;
    assert_eq!(meta.status, StatusCode::OK);
    assert_eq!(meta.json()["data"]["isExpired"], true);
    assert_eq!(meta.json()["data"]["views"], 0);
}

#[tokio::test]
async fn test_expired_org_link_still_asks_for_sign_in() {
    let app = helpers::TestApp::new().await;
    let owner = app.user();
    app.create_organization(&owner, 5).await;
    let link_id = app.share(&owner, "old.txt", b"stale", 5, true).await;
    app.expire(&link_id).await;

    let response = app
        .request("GET", &format!("/api/share/{link_id}"), None, None)
        .await;
    assert_eq!(
        response.error_code().as_deref(),
        Some("AUTHENTICATION_REQUIRED")
    );
}

#[tokio::test]
async fn test_preview_is_owner_only_and_does_not_count() {
    let app = helpers::TestApp::new().await;
    let owner = app.user();
    let link_id = app.share(&owner, "photo.png", b"\x89PNG", 1, false).await;
    let path = format!("/api/share/{link_id}/preview");

    let anonymous = app.request("GET", &path, None, None).await;
    assert_eq!(anonymous.status, StatusCode::FORBIDDEN);
    assert_eq!(anonymous.error_code().as_deref(), Some("OWNER_ONLY"));

    let preview = app.request("GET", &path, None, Some(&owner.token)).await;
    assert_eq!(preview.status, StatusCode::OK);
    assert_eq!(preview.header(header::CONTENT_TYPE), Some("image/png"));
    assert!(
        preview
            .header(header::CONTENT_DISPOSITION)
            .is_some_and(|v| v.starts_with("inline;"))
    );

    let download = app
        .request("GET", &format!("/api/share/{link_id}/download"), None, None)
        .await;
    assert_eq!(download.status, StatusCode::OK);
}

#[tokio::test]
async fn test_dashboard_metadata_requires_owner() {
    let app = helpers::TestApp::new().await;
    let owner = app.user();
    let link_id = app.share(&owner, "a.txt", b"a", 2, false).await;
    let path = format!("/api/share/{link_id}?source=dashboard");

    let other = app.user();
    let denied = app.request("GET", &path, None, Some(&other.token)).await;
    assert_eq!(denied.error_code().as_deref(), Some("OWNER_ONLY"));

    let allowed = app.request("GET", &path, None, Some(&owner.token)).await;
    assert_eq!(allowed.status, StatusCode::OK);
    assert_eq!(allowed.json()["data"]["isOwner"], true);
    assert_eq!(allowed.json()["data"]["fileName"], "a.txt");
}

#[tokio::test]
async fn test_filename_override_sets_disposition() {
    let app = helpers::TestApp::new().await;
    let owner = app.user();
    let link_id = app.share(&owner, "raw.bin", b"x", 2, false).await;

    let response = app
        .request(
            "GET",
            &format!("/api/share/{link_id}/download?filename=notes.txt"),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.header(header::CONTENT_TYPE),
        Some("application/octet-stream")
    );
    assert!(
        response
            .header(header::CONTENT_DISPOSITION)
            .is_some_and(|v| v.contains("filename=\"notes.txt\""))
    );
}
