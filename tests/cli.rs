use std::path::{Path, PathBuf};
use std::process::Output;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::process::Command;

const SUBMIT_BIN: &str = env!("CARGO_BIN_EXE_inventory-probe");
const SESSION_BIN: &str = env!("CARGO_BIN_EXE_session-probe");

#[derive(Clone, Default)]
struct Hits {
    listed: Arc<AtomicUsize>,
    submitted: Arc<AtomicUsize>,
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    if body["username"] != "ops" || body["password"] != "secret" {
        return (
            StatusCode::UNAUTHORIZED,
            HeaderMap::new(),
            Json(json!({ "error": "invalid credentials" })),
        );
    }
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        "connect.sid=s%3Acli; Path=/; HttpOnly".parse().unwrap(),
    );
    (
        StatusCode::OK,
        headers,
        Json(json!({
            "user": { "id": 1, "username": "ops", "name": "Operator" },
            "tenants": [{ "id": 9, "name": "Warehouse" }],
            "currentTenant": 9
        })),
    )
}

async fn list_inventory(State(hits): State<Hits>) -> impl IntoResponse {
    hits.listed.fetch_add(1, Ordering::SeqCst);
    Json(json!([]))
}

async fn create_inventory(State(hits): State<Hits>) -> impl IntoResponse {
    hits.submitted.fetch_add(1, Ordering::SeqCst);
    (StatusCode::CREATED, "created")
}

struct TestServer {
    base_url: String,
    hits: Hits,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let hits = Hits::default();
        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route(
                "/api/inventory",
                axum::routing::get(list_inventory).post(create_inventory),
            )
            .with_state(hits.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            hits,
            handle,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Fresh working directory so no stray `.env` is picked up.
fn work_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "inventory-probe-cli-{}-{}",
        name,
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn command(bin: &str, dir: &Path) -> Command {
    let mut cmd = Command::new(bin);
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("PROBE_BASE_URL")
        .env_remove("PROBE_CREDENTIALS");
    cmd
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

fn assert_quiet_success(output: &Output) {
    assert_eq!(output.status.code(), Some(0));
    assert!(
        output.stderr.is_empty(),
        "unexpected stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[tokio::test]
async fn submit_prints_status_and_body_and_exits_zero() {
    let server = TestServer::spawn().await;
    let dir = work_dir("ok");

    let output = command(SUBMIT_BIN, &dir)
        .env("PROBE_BASE_URL", &server.base_url)
        .output()
        .await
        .unwrap();

    assert_quiet_success(&output);
    assert_eq!(stdout_lines(&output), vec!["Status: 201", "Body: created"]);
    assert_eq!(server.hits.submitted.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unreachable_target_prints_one_line_and_exits_zero() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let dir = work_dir("down");

    let output = command(SUBMIT_BIN, &dir)
        .env("PROBE_BASE_URL", format!("http://{}", addr))
        .output()
        .await
        .unwrap();

    assert_quiet_success(&output);
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("request failed"), "got {:?}", lines);
}

#[tokio::test]
async fn dotenv_file_does_not_redirect_the_target() {
    let server = TestServer::spawn().await;
    let dir = work_dir("dotenv");
    std::fs::write(
        dir.join(".env"),
        format!("PROBE_BASE_URL={}\n", server.base_url),
    )
    .unwrap();

    let output = command(SUBMIT_BIN, &dir).output().await.unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(server.hits.submitted.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_credentials_print_one_line() {
    let dir = work_dir("nocreds");

    let output = command(SESSION_BIN, &dir)
        .arg("login")
        .env("PROBE_CREDENTIALS", dir.join("absent.json"))
        .output()
        .await
        .unwrap();

    assert_quiet_success(&output);
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("absent.json"), "got {:?}", lines);
}

async fn run_session(server: &TestServer, name: &str, subcommand: &str, password: &str) -> Output {
    let dir = work_dir(name);
    let creds = dir.join("creds.json");
    std::fs::write(
        &creds,
        json!({ "username": "ops", "password": password }).to_string(),
    )
    .unwrap();

    command(SESSION_BIN, &dir)
        .arg(subcommand)
        .env("PROBE_BASE_URL", &server.base_url)
        .env("PROBE_CREDENTIALS", &creds)
        .output()
        .await
        .unwrap()
}

#[tokio::test]
async fn rejected_login_does_not_list_inventory() {
    let server = TestServer::spawn().await;

    let output = run_session(&server, "login-rejected", "login", "wrong").await;

    assert_quiet_success(&output);
    assert_eq!(
        stdout_lines(&output),
        vec!["Login status: 401", "Login failed: invalid credentials"]
    );
    assert_eq!(server.hits.listed.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn rejected_login_does_not_submit() {
    let server = TestServer::spawn().await;

    let output = run_session(&server, "submit-rejected", "submit", "wrong").await;

    assert_quiet_success(&output);
    assert_eq!(
        stdout_lines(&output),
        vec!["Login status: 401", "Login failed: invalid credentials"]
    );
    assert_eq!(server.hits.submitted.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn accepted_login_then_submit_reports_both_steps() {
    let server = TestServer::spawn().await;

    let output = run_session(&server, "submit-ok", "submit", "secret").await;

    assert_quiet_success(&output);
    assert_eq!(
        stdout_lines(&output),
        vec![
            "Login status: 200",
            "User: Operator",
            "Tenant: Warehouse",
            "Status: 201",
            "Body: created",
        ]
    );
    assert_eq!(server.hits.submitted.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn accepted_login_lists_inventory() {
    let server = TestServer::spawn().await;

    let output = run_session(&server, "login-ok", "login", "secret").await;

    assert_quiet_success(&output);
    assert_eq!(
        stdout_lines(&output),
        vec![
            "Login status: 200",
            "User: Operator",
            "Tenant: Warehouse",
            "Inventory status: 200",
            "Items: 0",
        ]
    );
    assert_eq!(server.hits.listed.load(Ordering::SeqCst), 1);
}
