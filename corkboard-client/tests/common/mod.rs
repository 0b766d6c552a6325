//! Shared test harness: an in-process stub gateway.
//!
//! The stub serves the gateway's JSON wire shapes from in-memory
//! collections, records every request it sees, and can be told to fail
//! the next request to a given route with a given status. That is enough
//! to exercise the screens' reconciliation behavior without a database.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use uuid::Uuid;

use corkboard_client::CorkboardClient;

/// Fixed id for the stub's signed-in user.
pub const VIEWER_ID: Uuid = Uuid::from_u128(0x1111_1111_1111_1111_1111_1111_1111_1111);

/// Fixed timestamp for every stub row.
pub const STAMP: &str = "2025-06-01T12:00:00Z";

/// In-memory gateway state.
#[derive(Debug)]
pub struct StubState {
    /// Every request seen, as "METHOD /path?query".
    pub requests: Mutex<Vec<String>>,

    /// "METHOD /path" -> status to fail the next matching request with.
    pub failures: Mutex<HashMap<String, u16>>,

    /// Profile served by /users/me.
    pub viewer: Mutex<Value>,

    pub profiles: Mutex<Vec<Value>>,
    pub projects: Mutex<Vec<Value>>,
    pub tasks: Mutex<Vec<Value>>,
    pub members: Mutex<Vec<Value>>,
    pub comments: Mutex<Vec<Value>>,

    /// Object keys received by the file store, as "user_id/filename".
    pub uploads: Mutex<Vec<String>>,

    next_id: AtomicI64,
}

impl Default for StubState {
    fn default() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
            viewer: Mutex::new(profile_json(VIEWER_ID, "Stub Viewer", "viewer@example.com", "manager")),
            profiles: Mutex::new(Vec::new()),
            projects: Mutex::new(Vec::new()),
            tasks: Mutex::new(Vec::new()),
            members: Mutex::new(Vec::new()),
            comments: Mutex::new(Vec::new()),
            uploads: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1000),
        }
    }
}

impl StubState {
    fn alloc_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

fn profile_json(id: Uuid, name: &str, email: &str, role: &str) -> Value {
    json!({
        "id": id,
        "email": email,
        "full_name": name,
        "avatar_url": null,
        "role": role,
        "created_at": STAMP,
        "updated_at": STAMP,
        "last_login_at": null,
    })
}

/// A running stub gateway plus handles to poke its state.
pub struct StubHarness {
    pub addr: SocketAddr,
    pub state: Arc<StubState>,
}

impl StubHarness {
    /// Binds an ephemeral port and serves the stub until the test ends.
    pub async fn start() -> Self {
        let state = Arc::new(StubState::default());
        let app = stub_router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve stub");
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// A client pointed at the stub for both the API and the file store.
    pub fn client(&self) -> CorkboardClient {
        CorkboardClient::new(self.base_url(), self.base_url()).expect("build client")
    }

    /// Fails the next request matching "METHOD path" with the given status.
    pub fn fail_once(&self, method: &str, path: &str, status: u16) {
        self.state
            .failures
            .lock()
            .unwrap()
            .insert(format!("{} {}", method, path), status);
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }

    pub fn uploads(&self) -> Vec<String> {
        self.state.uploads.lock().unwrap().clone()
    }

    /// Swaps the signed-in user's role.
    pub fn set_viewer_role(&self, role: &str) {
        let mut viewer = self.state.viewer.lock().unwrap();
        viewer["role"] = json!(role);
    }

    // ---- Seeding ----

    pub fn seed_profile(&self, id: Uuid, name: &str, email: &str, role: &str) {
        self.state
            .profiles
            .lock()
            .unwrap()
            .push(profile_json(id, name, email, role));
    }

    pub fn seed_project(&self, id: i64, name: &str) {
        self.state.projects.lock().unwrap().push(json!({
            "id": id,
            "name": name,
            "description": "",
            "created_by": VIEWER_ID,
            "created_at": STAMP,
            "creator_name": "Stub Viewer",
        }));
    }

    pub fn seed_task(&self, id: i64, project_id: i64, title: &str, status: &str) {
        self.state.tasks.lock().unwrap().push(json!({
            "id": id,
            "project_id": project_id,
            "title": title,
            "description": "",
            "status": status,
            "assigned_to": null,
            "deadline": null,
            "created_at": STAMP,
            "updated_at": STAMP,
            "assignee_name": null,
            "assignee_email": null,
        }));
    }

    pub fn seed_member(&self, project_id: i64, user_id: Uuid, name: &str, email: &str) {
        self.state.members.lock().unwrap().push(json!({
            "project_id": project_id,
            "user_id": user_id,
            "role": "member",
            "created_at": STAMP,
            "full_name": name,
            "email": email,
        }));
    }

    pub fn seed_comment(&self, id: i64, task_id: i64, user_id: Uuid, content: &str) {
        self.state.comments.lock().unwrap().push(json!({
            "id": id,
            "task_id": task_id,
            "user_id": user_id,
            "content": content,
            "image_url": null,
            "created_at": STAMP,
            "author_name": "Stub Author",
            "author_avatar_url": null,
        }));
    }

    // ---- Introspection ----

    /// Status string currently stored for a task, None if it is gone.
    pub fn task_status(&self, id: i64) -> Option<String> {
        self.state
            .tasks
            .lock()
            .unwrap()
            .iter()
            .find(|task| task["id"] == json!(id))
            .map(|task| task["status"].as_str().unwrap_or_default().to_string())
    }

    /// How many membership rows exist for the pair.
    pub fn membership_count(&self, project_id: i64, user_id: Uuid) -> usize {
        self.state
            .members
            .lock()
            .unwrap()
            .iter()
            .filter(|member| {
                member["project_id"] == json!(project_id) && member["user_id"] == json!(user_id)
            })
            .count()
    }
}

/// Request log + failure injection, applied before every handler.
async fn intercept(State(state): State<Arc<StubState>>, req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let line = match req.uri().query() {
        Some(query) => format!("{} {}?{}", method, path, query),
        None => format!("{} {}", method, path),
    };
    state.requests.lock().unwrap().push(line);

    let key = format!("{} {}", method, path);
    let injected = state.failures.lock().unwrap().remove(&key);
    if let Some(status) = injected {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, Json(json!({ "error": "injected failure" }))).into_response();
    }

    next.run(req).await
}

fn stub_router(state: Arc<StubState>) -> Router {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/me", get(me))
        .route("/users/:id/role", put(update_role))
        .route("/projects", get(list_projects))
        .route("/projects", post(create_project))
        .route("/projects/:id", get(get_project))
        .route("/projects/:id", delete(delete_project))
        .route("/projects/:id/members", get(list_members))
        .route("/projects/:id/members", post(add_member))
        .route("/projects/:id/members", delete(remove_member))
        .route("/tasks", get(list_tasks))
        .route("/tasks", post(create_task))
        .route("/tasks/:id", get(get_task))
        .route("/tasks/:id", put(update_task))
        .route("/tasks/:id", delete(delete_task))
        .route("/tasks/:id/comments", get(list_comments))
        .route("/tasks/:id/comments", post(create_comment))
        .route("/comments/:id", delete(delete_comment))
        .route("/files/:user_id/:filename", put(upload_file))
        .layer(axum::middleware::from_fn_with_state(state.clone(), intercept))
        .with_state(state)
}

fn success() -> Json<Value> {
    Json(json!({ "success": true }))
}

fn not_found(what: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("{} not found", what) })),
    )
}

async fn me(State(state): State<Arc<StubState>>) -> Json<Value> {
    Json(state.viewer.lock().unwrap().clone())
}

async fn list_users(State(state): State<Arc<StubState>>) -> Json<Value> {
    Json(Value::Array(state.profiles.lock().unwrap().clone()))
}

async fn update_role(
    State(state): State<Arc<StubState>>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Response {
    let mut profiles = state.profiles.lock().unwrap();
    match profiles.iter_mut().find(|p| p["id"] == json!(user_id)) {
        Some(profile) => {
            profile["role"] = body["role"].clone();
            success().into_response()
        }
        None => not_found("Profile").into_response(),
    }
}

async fn list_projects(State(state): State<Arc<StubState>>) -> Json<Value> {
    Json(Value::Array(state.projects.lock().unwrap().clone()))
}

async fn create_project(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let row = json!({
        "id": state.alloc_id(),
        "name": body["name"],
        "description": body["description"],
        "created_by": VIEWER_ID,
        "created_at": STAMP,
        "creator_name": "Stub Viewer",
    });
    state.projects.lock().unwrap().push(row.clone());
    (StatusCode::CREATED, Json(row))
}

async fn get_project(State(state): State<Arc<StubState>>, Path(id): Path<i64>) -> Response {
    let projects = state.projects.lock().unwrap();
    match projects.iter().find(|p| p["id"] == json!(id)) {
        Some(project) => Json(project.clone()).into_response(),
        None => not_found("Project").into_response(),
    }
}

async fn delete_project(State(state): State<Arc<StubState>>, Path(id): Path<i64>) -> Json<Value> {
    state
        .projects
        .lock()
        .unwrap()
        .retain(|p| p["id"] != json!(id));
    state
        .tasks
        .lock()
        .unwrap()
        .retain(|t| t["project_id"] != json!(id));
    success()
}

async fn list_members(State(state): State<Arc<StubState>>, Path(id): Path<i64>) -> Json<Value> {
    let members = state
        .members
        .lock()
        .unwrap()
        .iter()
        .filter(|m| m["project_id"] == json!(id))
        .cloned()
        .collect();
    Json(Value::Array(members))
}

async fn add_member(
    State(state): State<Arc<StubState>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let user_id = body["user_id"].clone();

    let mut members = state.members.lock().unwrap();
    let exists = members
        .iter()
        .any(|m| m["project_id"] == json!(id) && m["user_id"] == user_id);

    if !exists {
        let profiles = state.profiles.lock().unwrap();
        let profile = profiles.iter().find(|p| p["id"] == user_id);
        let (name, email) = match profile {
            Some(p) => (p["full_name"].clone(), p["email"].clone()),
            None => (json!("Stub User"), json!("stub@example.com")),
        };

        members.push(json!({
            "project_id": id,
            "user_id": user_id,
            "role": body["role"].as_str().unwrap_or("member"),
            "created_at": STAMP,
            "full_name": name,
            "email": email,
        }));
    }

    success()
}

async fn remove_member(
    State(state): State<Arc<StubState>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state
        .members
        .lock()
        .unwrap()
        .retain(|m| !(m["project_id"] == json!(id) && m["user_id"] == body["user_id"]));
    success()
}

async fn list_tasks(
    State(state): State<Arc<StubState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let project_id = params.get("project_id").and_then(|v| v.parse::<i64>().ok());

    let tasks = state
        .tasks
        .lock()
        .unwrap()
        .iter()
        .filter(|t| match project_id {
            Some(pid) => t["project_id"] == json!(pid),
            None => true,
        })
        .cloned()
        .collect();
    Json(Value::Array(tasks))
}

async fn create_task(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let row = json!({
        "id": state.alloc_id(),
        "project_id": body["project_id"],
        "title": body["title"],
        "description": body.get("description").cloned().unwrap_or_else(|| json!("")),
        "status": "todo",
        "assigned_to": null,
        "deadline": null,
        "created_at": STAMP,
        "updated_at": STAMP,
        "assignee_name": null,
        "assignee_email": null,
    });
    state.tasks.lock().unwrap().push(row.clone());
    (StatusCode::CREATED, Json(row))
}

async fn get_task(State(state): State<Arc<StubState>>, Path(id): Path<i64>) -> Response {
    let tasks = state.tasks.lock().unwrap();
    match tasks.iter().find(|t| t["id"] == json!(id)) {
        Some(task) => Json(task.clone()).into_response(),
        None => not_found("Task").into_response(),
    }
}

async fn update_task(
    State(state): State<Arc<StubState>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut tasks = state.tasks.lock().unwrap();
    match tasks.iter_mut().find(|t| t["id"] == json!(id)) {
        Some(task) => {
            for field in ["title", "description", "status", "assigned_to", "deadline"] {
                if let Some(value) = body.get(field) {
                    task[field] = value.clone();
                }
            }
            success().into_response()
        }
        None => not_found("Task").into_response(),
    }
}

async fn delete_task(State(state): State<Arc<StubState>>, Path(id): Path<i64>) -> Json<Value> {
    state.tasks.lock().unwrap().retain(|t| t["id"] != json!(id));
    state
        .comments
        .lock()
        .unwrap()
        .retain(|c| c["task_id"] != json!(id));
    success()
}

async fn list_comments(State(state): State<Arc<StubState>>, Path(id): Path<i64>) -> Json<Value> {
    let comments = state
        .comments
        .lock()
        .unwrap()
        .iter()
        .filter(|c| c["task_id"] == json!(id))
        .cloned()
        .collect();
    Json(Value::Array(comments))
}

async fn create_comment(
    State(state): State<Arc<StubState>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let row = json!({
        "id": state.alloc_id(),
        "task_id": id,
        "user_id": VIEWER_ID,
        "content": body["content"],
        "image_url": body.get("image_url").cloned().unwrap_or(Value::Null),
        "created_at": STAMP,
        "author_name": "Stub Viewer",
        "author_avatar_url": null,
    });
    state.comments.lock().unwrap().push(row.clone());
    (StatusCode::CREATED, Json(row))
}

async fn delete_comment(State(state): State<Arc<StubState>>, Path(id): Path<i64>) -> Json<Value> {
    state
        .comments
        .lock()
        .unwrap()
        .retain(|c| c["id"] != json!(id));
    success()
}

async fn upload_file(
    State(state): State<Arc<StubState>>,
    Path((user_id, filename)): Path<(Uuid, String)>,
) -> StatusCode {
    state
        .uploads
        .lock()
        .unwrap()
        .push(format!("{}/{}", user_id, filename));
    StatusCode::OK
}
