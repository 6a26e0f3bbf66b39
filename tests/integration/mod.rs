//! Integration tests for the healthcheck service.
//!
//! These run the real server on an ephemeral loopback port and talk to it
//! over TCP, plus tests that launch the binary itself.

use std::io::{BufRead, BufReader};
use std::net::{SocketAddr, TcpListener as StdTcpListener, TcpStream as StdTcpStream};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use healthcheck_service::api::{create_router, AppState};
use healthcheck_service::server;
use pretty_assertions::assert_eq;
use serde_json::Value;

/// Start the service on 127.0.0.1 with an OS-assigned port.
async fn spawn_service() -> SocketAddr {
    let listener = server::bind("127.0.0.1:0".parse().unwrap())
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().unwrap();

    let router = create_router(AppState::new("integration health", "integration hello"));
    tokio::spawn(server::serve(listener, router));

    addr
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_health_over_tcp() {
    let addr = spawn_service().await;

    let response = client()
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "SAMEORIGIN");
    assert!(response.headers().get("server").is_none());

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "UP");
    assert_eq!(body["author"], "integration health");
}

#[tokio::test]
async fn test_hello_over_tcp() {
    let addr = spawn_service().await;

    let body: Value = client()
        .get(format!("http://{addr}/hello"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "OK");
    assert_eq!(body["author"], "integration hello");
}

#[tokio::test]
async fn test_unknown_path_over_tcp() {
    let addr = spawn_service().await;

    let response = client()
        .get(format!("http://{addr}/unknown"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_concurrent_requests() {
    let addr = spawn_service().await;
    let client = client();

    let requests = (0..16).map(|i| {
        let client = client.clone();
        let path = if i % 2 == 0 { "health" } else { "hello" };
        async move {
            client
                .get(format!("http://{addr}/{path}"))
                .send()
                .await
                .map(|r| r.status())
        }
    });

    let mut handles = Vec::new();
    for request in requests {
        handles.push(tokio::spawn(request));
    }
    for handle in handles {
        let status = handle.await.unwrap().unwrap();
        assert_eq!(status, reqwest::StatusCode::OK);
    }
}

const BINARY: &str = env!("CARGO_BIN_EXE_healthcheck-service");

/// Upper bound for any launched binary to do what the test expects.
const PROCESS_DEADLINE: Duration = Duration::from_secs(10);

/// Command for the service binary on loopback with the given `PORT`.
fn service_command(port: u16) -> Command {
    let mut command = Command::new(BINARY);
    command
        .env("HOST", "127.0.0.1")
        .env("PORT", port.to_string())
        .env("NO_COLOR", "1")
        .stdin(Stdio::null())
        .stderr(Stdio::null());
    command
}

/// Wait for `child` to exit, killing it and failing the test on timeout.
fn wait_with_deadline(child: &mut Child, deadline: Duration) -> ExitStatus {
    let started = Instant::now();
    loop {
        if let Some(status) = child.try_wait().expect("poll child") {
            return status;
        }
        if started.elapsed() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            panic!("healthcheck-service still running after {deadline:?}");
        }
        std::thread::sleep(Duration::from_millis(50));
    }
}

/// Read the first stdout line of `child`, killing it on timeout.
fn first_stdout_line(child: &mut Child, deadline: Duration) -> String {
    let stdout = child.stdout.take().expect("stdout is piped");
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let mut line = String::new();
        let _ = BufReader::new(stdout).read_line(&mut line);
        let _ = tx.send(line);
    });

    match rx.recv_timeout(deadline) {
        Ok(line) => line,
        Err(_) => {
            let _ = child.kill();
            let _ = child.wait();
            panic!("no stdout line within {deadline:?}");
        }
    }
}

/// A port that was free a moment ago.
fn free_port() -> u16 {
    StdTcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

/// Second instance on an occupied port must exit with a failure status.
#[test]
fn test_binary_exits_nonzero_when_port_taken() {
    let occupied = StdTcpListener::bind("127.0.0.1:0").unwrap();
    let port = occupied.local_addr().unwrap().port();

    let mut child = service_command(port)
        .stdout(Stdio::null())
        .spawn()
        .expect("launch healthcheck-service");
    let status = wait_with_deadline(&mut child, PROCESS_DEADLINE);

    assert!(!status.success(), "exit status: {status:?}");

    drop(occupied);
}

/// The binary announces and listens on the port from `PORT`, even when
/// `RUST_LOG` would hide info-level events.
#[test]
fn test_binary_announces_configured_port() {
    let port = free_port();

    let mut child = service_command(port)
        .env("RUST_LOG", "warn")
        .stdout(Stdio::piped())
        .spawn()
        .expect("launch healthcheck-service");

    let line = first_stdout_line(&mut child, PROCESS_DEADLINE);
    let reachable = StdTcpStream::connect(("127.0.0.1", port)).is_ok();

    let _ = child.kill();
    let _ = child.wait();

    assert!(
        line.contains("Healthcheck service running on port"),
        "unexpected first line: {line:?}"
    );
    let announced: u16 = line
        .trim_end()
        .rsplit(' ')
        .next()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(|| panic!("no port in {line:?}"));
    assert_eq!(announced, port);
    assert!(reachable, "nothing listening on {port}");
}
