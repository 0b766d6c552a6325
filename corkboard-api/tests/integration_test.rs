/// Integration tests for the Corkboard API
///
/// Two tiers:
///
/// - Hermetic tests run against a router whose pool never connects. They
///   cover everything the gateway rejects before touching Postgres:
///   session checks, request validation, and cookie handling.
/// - Live-database tests (`#[ignore = "requires a running Postgres"]`)
///   cover the CRUD surface end to end. Run them with
///   `cargo test -p corkboard-api -- --ignored` once `DATABASE_URL`
///   points at a scratch database.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, hermetic_app, json_request, session_cookie_value, TestContext};
use corkboard_shared::models::comment::Comment;
use corkboard_shared::models::member::ProjectMember;
use corkboard_shared::models::profile::ProfileRole;
use corkboard_shared::models::project::Project;
use corkboard_shared::models::task::{Task, TaskStatus};
use serde_json::json;
use tower::Service as _;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Hermetic tests (no database)
// ---------------------------------------------------------------------------

/// Health stays 200 even when the database is down, reporting degraded
#[tokio::test]
async fn test_health_degraded_without_database() {
    let mut app = hermetic_app();

    let response = app
        .call(json_request("GET", "/health", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["database"], "disconnected");
}

/// Every data route rejects requests without a session cookie
#[tokio::test]
async fn test_missing_session_is_unauthorized() {
    let mut app = hermetic_app();

    for uri in ["/projects", "/tasks", "/users", "/users/me"] {
        let response = app.call(json_request("GET", uri, None, None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "GET {}", uri);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Authentication required");
    }
}

/// A cookie that is not a signed token is rejected
#[tokio::test]
async fn test_garbage_cookie_is_unauthorized() {
    let mut app = hermetic_app();

    let response = app
        .call(json_request(
            "GET",
            "/projects",
            Some("corkboard_session=not-a-token"),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A token signed with a different secret is rejected
#[tokio::test]
async fn test_wrong_secret_cookie_is_unauthorized() {
    use corkboard_shared::auth::session::{create_session_token, SessionClaims};

    let mut app = hermetic_app();

    let claims = SessionClaims::new(Uuid::new_v4());
    let token =
        create_session_token(&claims, "a-completely-different-32-byte-secret!").unwrap();

    let response = app
        .call(json_request(
            "GET",
            "/projects",
            Some(&format!("corkboard_session={}", token)),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Register validates the email shape before doing any work
#[tokio::test]
async fn test_register_rejects_bad_email() {
    let mut app = hermetic_app();

    let response = app
        .call(json_request(
            "POST",
            "/auth/register",
            None,
            Some(json!({ "email": "not-an-email", "password": "long-enough-password" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid email format");
}

/// Register enforces the minimum password length
#[tokio::test]
async fn test_register_rejects_short_password() {
    let mut app = hermetic_app();

    let response = app
        .call(json_request(
            "POST",
            "/auth/register",
            None,
            Some(json!({ "email": "user@example.com", "password": "short" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Password must be at least 8 characters");
}

/// Task creation rejects titles shorter than 3 characters after trimming
#[tokio::test]
async fn test_create_task_rejects_short_title() {
    let mut app = hermetic_app();
    let cookie = session_cookie_value(Uuid::new_v4());

    for title in ["ab", "  ab  ", ""] {
        let response = app
            .call(json_request(
                "POST",
                "/tasks",
                Some(&cookie),
                Some(json!({ "title": title, "project_id": 1 })),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "title {:?}", title);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Invalid title: must be at least 3 characters");
    }
}

/// Task creation rejects a missing title with the title message
#[tokio::test]
async fn test_create_task_rejects_missing_title() {
    let mut app = hermetic_app();
    let cookie = session_cookie_value(Uuid::new_v4());

    let response = app
        .call(json_request(
            "POST",
            "/tasks",
            Some(&cookie),
            Some(json!({ "project_id": 1 })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid title: must be at least 3 characters");
}

/// Task creation requires a project id
#[tokio::test]
async fn test_create_task_requires_project_id() {
    let mut app = hermetic_app();
    let cookie = session_cookie_value(Uuid::new_v4());

    let response = app
        .call(json_request(
            "POST",
            "/tasks",
            Some(&cookie),
            Some(json!({ "title": "a valid title" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Project ID is required");
}

/// Role changes reject unknown role labels before the admin check
#[tokio::test]
async fn test_update_role_rejects_unknown_label() {
    let mut app = hermetic_app();
    let cookie = session_cookie_value(Uuid::new_v4());

    let response = app
        .call(json_request(
            "PUT",
            &format!("/users/{}/role", Uuid::new_v4()),
            Some(&cookie),
            Some(json!({ "role": "owner" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid role: owner");
}

/// Logout clears the session cookie and reports success
#[tokio::test]
async fn test_logout_clears_cookie() {
    let mut app = hermetic_app();
    let cookie = session_cookie_value(Uuid::new_v4());

    let response = app
        .call(json_request("POST", "/auth/logout", Some(&cookie), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("corkboard_session="));
    assert!(set_cookie.contains("Max-Age=0"));

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
}

/// Logout without a session is a 401, not a silent success
#[tokio::test]
async fn test_logout_requires_session() {
    let mut app = hermetic_app();

    let response = app
        .call(json_request("POST", "/auth/logout", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Security headers ride on every response
#[tokio::test]
async fn test_security_headers_present() {
    let mut app = hermetic_app();

    let response = app
        .call(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers.get("X-Content-Type-Options").unwrap(), "nosniff");
    assert_eq!(headers.get("X-Frame-Options").unwrap(), "DENY");
}

// ---------------------------------------------------------------------------
// Live database tests
// ---------------------------------------------------------------------------

/// Register, login, and fetch the session profile
#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_register_login_me_flow() {
    let ctx = TestContext::new().await.unwrap();
    let mut app = ctx.app.clone();

    let email = format!("test-{}@example.com", Uuid::new_v4());

    // Register sets a session cookie and returns the profile
    let response = app
        .call(json_request(
            "POST",
            "/auth/register",
            None,
            Some(json!({
                "email": email,
                "password": "test-password-123",
                "full_name": "Flow Tester"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let session = response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();

    let profile = body_json(response).await;
    assert_eq!(profile["email"], email.as_str());
    assert_eq!(profile["role"], "member");
    assert!(profile.get("password_hash").is_none(), "hash must never serialize");
    let profile_id: Uuid = profile["id"].as_str().unwrap().parse().unwrap();

    // Duplicate email conflicts
    let response = app
        .call(json_request(
            "POST",
            "/auth/register",
            None,
            Some(json!({ "email": email, "password": "test-password-123" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"], "Email already exists");

    // Wrong password rejected
    let response = app
        .call(json_request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": email, "password": "wrong-password-123" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Invalid email or password");

    // Correct password logs in
    let response = app
        .call(json_request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": email, "password": "test-password-123" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("set-cookie").is_some());

    // The registration cookie identifies the profile
    let response = app
        .call(json_request("GET", "/users/me", Some(&session), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["email"], email.as_str());

    ctx.delete_profile(profile_id).await.unwrap();
    ctx.cleanup().await.unwrap();
}

/// Project CRUD with the creator join on the detail endpoint
#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_project_crud() {
    let ctx = TestContext::new().await.unwrap();
    let mut app = ctx.app.clone();
    let cookie = ctx.cookie();

    // Blank name rejected
    let response = app
        .call(json_request(
            "POST",
            "/projects",
            Some(&cookie),
            Some(json!({ "name": "   " })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Create
    let response = app
        .call(json_request(
            "POST",
            "/projects",
            Some(&cookie),
            Some(json!({ "name": "Launch checklist", "description": "Q3 launch" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let project = body_json(response).await;
    let project_id = project["id"].as_i64().unwrap();
    assert_eq!(project["name"], "Launch checklist");

    // List contains it
    let response = app
        .call(json_request("GET", "/projects", Some(&cookie), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let projects = body_json(response).await;
    assert!(projects
        .as_array()
        .unwrap()
        .iter()
        .any(|p| p["id"].as_i64() == Some(project_id)));

    // Detail joins the creator name
    let response = app
        .call(json_request(
            "GET",
            &format!("/projects/{}", project_id),
            Some(&cookie),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let detail = body_json(response).await;
    assert_eq!(detail["creator_name"], "Test User");

    // Delete, then 404
    let response = app
        .call(json_request(
            "DELETE",
            &format!("/projects/{}", project_id),
            Some(&cookie),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);
    assert!(Project::find_by_id(&ctx.db, project_id)
        .await
        .unwrap()
        .is_none());

    let response = app
        .call(json_request(
            "GET",
            &format!("/projects/{}", project_id),
            Some(&cookie),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Project not found");

    ctx.cleanup().await.unwrap();
}

/// Task lifecycle with the manager gates enforced server-side
#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_task_lifecycle_and_role_gates() {
    let ctx = TestContext::new().await.unwrap();
    let mut app = ctx.app.clone();
    let cookie = ctx.cookie();

    ctx.set_role(ProfileRole::Manager).await.unwrap();

    let response = app
        .call(json_request(
            "POST",
            "/projects",
            Some(&cookie),
            Some(json!({ "name": "Board" })),
        ))
        .await
        .unwrap();
    let project_id = body_json(response).await["id"].as_i64().unwrap();

    // Members cannot create tasks
    ctx.set_role(ProfileRole::Member).await.unwrap();
    let response = app
        .call(json_request(
            "POST",
            "/tasks",
            Some(&cookie),
            Some(json!({ "title": "Write the launch post", "project_id": project_id })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["error"], "Requires manager role");

    // Managers can
    ctx.set_role(ProfileRole::Manager).await.unwrap();
    let response = app
        .call(json_request(
            "POST",
            "/tasks",
            Some(&cookie),
            Some(json!({ "title": "Write the launch post", "project_id": project_id })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let task = body_json(response).await;
    let task_id = task["id"].as_i64().unwrap();
    assert_eq!(task["status"], "todo");

    // Board filter sees it
    let response = app
        .call(json_request(
            "GET",
            &format!("/tasks?project_id={}", project_id),
            Some(&cookie),
            None,
        ))
        .await
        .unwrap();
    let tasks = body_json(response).await;
    assert_eq!(tasks.as_array().unwrap().len(), 1);

    // Members may move tasks between todo and in-progress
    ctx.set_role(ProfileRole::Member).await.unwrap();
    let response = app
        .call(json_request(
            "PUT",
            &format!("/tasks/{}", task_id),
            Some(&cookie),
            Some(json!({ "status": "in-progress" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);

    // But not into done
    let response = app
        .call(json_request(
            "PUT",
            &format!("/tasks/{}", task_id),
            Some(&cookie),
            Some(json!({ "status": "done" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Managers complete it
    ctx.set_role(ProfileRole::Manager).await.unwrap();
    let response = app
        .call(json_request(
            "PUT",
            &format!("/tasks/{}", task_id),
            Some(&cookie),
            Some(json!({ "status": "done" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let row = Task::find_by_id(&ctx.db, task_id).await.unwrap().unwrap();
    assert_eq!(row.status, TaskStatus::Done);

    let response = app
        .call(json_request(
            "GET",
            &format!("/tasks/{}", task_id),
            Some(&cookie),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["status"], "done");

    // An empty update body is a no-op success
    let response = app
        .call(json_request(
            "PUT",
            &format!("/tasks/{}", task_id),
            Some(&cookie),
            Some(json!({})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Unknown task id
    let response = app
        .call(json_request("GET", "/tasks/999999999", Some(&cookie), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Task not found");

    // Delete
    let response = app
        .call(json_request(
            "DELETE",
            &format!("/tasks/{}", task_id),
            Some(&cookie),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(Task::find_by_id(&ctx.db, task_id).await.unwrap().is_none());

    ctx.cleanup().await.unwrap();
}

/// Comment thread ordering and author join
#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_comment_thread() {
    let ctx = TestContext::new().await.unwrap();
    let mut app = ctx.app.clone();
    let cookie = ctx.cookie();

    ctx.set_role(ProfileRole::Manager).await.unwrap();

    let response = app
        .call(json_request(
            "POST",
            "/projects",
            Some(&cookie),
            Some(json!({ "name": "Board" })),
        ))
        .await
        .unwrap();
    let project_id = body_json(response).await["id"].as_i64().unwrap();

    let response = app
        .call(json_request(
            "POST",
            "/tasks",
            Some(&cookie),
            Some(json!({ "title": "Discuss rollout", "project_id": project_id })),
        ))
        .await
        .unwrap();
    let task_id = body_json(response).await["id"].as_i64().unwrap();

    // Blank content rejected
    let response = app
        .call(json_request(
            "POST",
            &format!("/tasks/{}/comments", task_id),
            Some(&cookie),
            Some(json!({ "content": "  " })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Two comments, one with an attachment
    let response = app
        .call(json_request(
            "POST",
            &format!("/tasks/{}/comments", task_id),
            Some(&cookie),
            Some(json!({ "content": "First pass done" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let first_id = body_json(response).await["id"].as_i64().unwrap();

    let response = app
        .call(json_request(
            "POST",
            &format!("/tasks/{}/comments", task_id),
            Some(&cookie),
            Some(json!({
                "content": "Screenshot attached",
                "image_url": "https://files.example.com/files/abc/shot.png"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Oldest first, author joined
    let response = app
        .call(json_request(
            "GET",
            &format!("/tasks/{}/comments", task_id),
            Some(&cookie),
            None,
        ))
        .await
        .unwrap();
    let comments = body_json(response).await;
    let comments = comments.as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["content"], "First pass done");
    assert_eq!(comments[0]["author_name"], "Test User");
    assert_eq!(
        comments[1]["image_url"],
        "https://files.example.com/files/abc/shot.png"
    );

    // Delete the first, thread shrinks
    let response = app
        .call(json_request(
            "DELETE",
            &format!("/comments/{}", first_id),
            Some(&cookie),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(Comment::find_by_id(&ctx.db, first_id)
        .await
        .unwrap()
        .is_none());

    let response = app
        .call(json_request(
            "GET",
            &format!("/tasks/{}/comments", task_id),
            Some(&cookie),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    ctx.cleanup().await.unwrap();
}

/// Member add is idempotent; remove is too
#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_membership_idempotency() {
    let ctx = TestContext::new().await.unwrap();
    let mut app = ctx.app.clone();
    let cookie = ctx.cookie();

    let extra = ctx.create_profile("Roster Member").await.unwrap();

    let response = app
        .call(json_request(
            "POST",
            "/projects",
            Some(&cookie),
            Some(json!({ "name": "Roster" })),
        ))
        .await
        .unwrap();
    let project_id = body_json(response).await["id"].as_i64().unwrap();

    // Add twice; both report success
    for _ in 0..2 {
        let response = app
            .call(json_request(
                "POST",
                &format!("/projects/{}/members", project_id),
                Some(&cookie),
                Some(json!({ "user_id": extra.id })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["success"], true);
    }

    assert!(ProjectMember::is_member(&ctx.db, project_id, extra.id)
        .await
        .unwrap());

    // Exactly one membership row, profile fields flattened in
    let response = app
        .call(json_request(
            "GET",
            &format!("/projects/{}/members", project_id),
            Some(&cookie),
            None,
        ))
        .await
        .unwrap();
    let members = body_json(response).await;
    let members = members.as_array().unwrap().clone();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["full_name"], "Roster Member");
    assert_eq!(members[0]["role"], "member");

    // Remove twice; both succeed, roster is empty after
    for _ in 0..2 {
        let response = app
            .call(json_request(
                "DELETE",
                &format!("/projects/{}/members", project_id),
                Some(&cookie),
                Some(json!({ "user_id": extra.id })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .call(json_request(
            "GET",
            &format!("/projects/{}/members", project_id),
            Some(&cookie),
            None,
        ))
        .await
        .unwrap();
    assert!(body_json(response).await.as_array().unwrap().is_empty());
    assert!(!ProjectMember::is_member(&ctx.db, project_id, extra.id)
        .await
        .unwrap());

    ctx.delete_profile(extra.id).await.unwrap();
    ctx.cleanup().await.unwrap();
}

/// Role administration is admin-gated and takes effect immediately
#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_role_administration() {
    let ctx = TestContext::new().await.unwrap();
    let mut app = ctx.app.clone();
    let cookie = ctx.cookie();

    let target = ctx.create_profile("Role Target").await.unwrap();

    // Members cannot change roles
    let response = app
        .call(json_request(
            "PUT",
            &format!("/users/{}/role", target.id),
            Some(&cookie),
            Some(json!({ "role": "manager" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["error"], "Requires admin role");

    // Admins can
    ctx.set_role(ProfileRole::Admin).await.unwrap();
    let response = app
        .call(json_request(
            "PUT",
            &format!("/users/{}/role", target.id),
            Some(&cookie),
            Some(json!({ "role": "manager" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);

    // The roster reflects the change
    let response = app
        .call(json_request("GET", "/users", Some(&cookie), None))
        .await
        .unwrap();
    let users = body_json(response).await;
    let row = users
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["id"] == target.id.to_string().as_str())
        .unwrap()
        .clone();
    assert_eq!(row["role"], "manager");

    // Unknown target id
    let response = app
        .call(json_request(
            "PUT",
            &format!("/users/{}/role", Uuid::new_v4()),
            Some(&cookie),
            Some(json!({ "role": "manager" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    ctx.delete_profile(target.id).await.unwrap();
    ctx.cleanup().await.unwrap();
}
