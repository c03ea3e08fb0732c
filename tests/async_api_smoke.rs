//! Smoke tests for the worker-backed async facade

use planboard::coordinator::{OpState, Operation};
use planboard::{StudioConfig, StudioHandle};
use tiny_http::{Response, Server};

fn spawn_generate_server() -> String {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr();

    std::thread::spawn(move || {
        if let Ok(request) = server.recv() {
            let body = r#"{"response": {
                "title": "Async Plan",
                "summary": "Driven from a task.",
                "successRate": 65,
                "reasonForSuccessRate": "Smoke test fixture.",
                "roadmap": [],
                "tips": [],
                "warnings": []
            }}"#;
            let response = Response::from_string(body).with_header(
                "Content-Type: application/json"
                    .parse::<tiny_http::Header>()
                    .unwrap(),
            );
            let _ = request.respond(response);
        }
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_generate_and_export_through_handle() {
    let config = StudioConfig {
        generate_endpoint: spawn_generate_server(),
        ..Default::default()
    };

    let handle = StudioHandle::new(Some(config)).await.expect("create handle");

    let plan = handle.generate("async goal").await.expect("generate");
    assert_eq!(plan.title, "Async Plan");
    assert_eq!(
        handle.state(Operation::Generate).await.expect("state"),
        OpState::Succeeded
    );

    let current = handle.plan().await.expect("plan query");
    assert_eq!(current.map(|p| p.title), Some("Async Plan".to_string()));

    let dir = tempfile::tempdir().expect("tempdir");
    let path = handle.export(dir.path()).await.expect("export");
    assert!(path.exists());

    handle.close().await.expect("close");
}

#[tokio::test]
async fn test_error_line_reported_through_handle() {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr();
    std::thread::spawn(move || {
        if let Ok(request) = server.recv() {
            let _ = request.respond(Response::from_string(r#"{"error": "rate limited"}"#));
        }
    });

    let config = StudioConfig {
        generate_endpoint: format!("http://{}", addr),
        ..Default::default()
    };
    let handle = StudioHandle::new(Some(config)).await.expect("create handle");

    assert!(handle.generate("goal").await.is_err());
    assert_eq!(
        handle.error_line().await.expect("error line").as_deref(),
        Some("rate limited Wait a few minutes")
    );

    handle.close().await.expect("close");
}
