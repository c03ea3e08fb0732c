//! Integration tests for the generate -> capture -> export pipeline

use planboard::coordinator::{OpState, Operation};
use planboard::document::EXPORT_FILE_NAME;
use planboard::{Error, Plan, Studio, StudioConfig};
use tiny_http::{Response, Server};

fn plan_json() -> &'static str {
    r#"{
        "type": "roadmap",
        "title": "Run a Marathon",
        "summary": "From couch to 42 kilometers.",
        "successRate": 72,
        "reasonForSuccesRate": "Consistent training history.",
        "roadmap": [
            {
                "quarter": "Q1",
                "months": "Jan - Mar",
                "goal": "Build an aerobic base",
                "steps": [
                    {"step": 1, "title": "Run 5k", "description": "Three easy runs per week."}
                ]
            }
        ],
        "tips": [{"tip": "Sleep eight hours."}],
        "warnings": ["Do not overtrain."]
    }"#
}

/// Start a one-shot server answering `responses` in order, returning its URL.
fn spawn_server(responses: Vec<String>) -> String {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr();

    std::thread::spawn(move || {
        for body in responses {
            let Ok(request) = server.recv() else { break };
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

fn studio_against(generate_url: &str) -> Studio {
    let config = StudioConfig {
        generate_endpoint: generate_url.to_string(),
        ..Default::default()
    };
    Studio::new(config).expect("Failed to create studio")
}

fn loaded_plan() -> Plan {
    serde_json::from_str(plan_json()).expect("parse plan fixture")
}

#[test]
fn test_generate_then_export_pdf() {
    let url = spawn_server(vec![format!(r#"{{"response": {}}}"#, plan_json())]);
    let mut studio = studio_against(&url);

    let plan = studio.generate("help me run a marathon").expect("generate");
    assert_eq!(plan.title, "Run a Marathon");
    assert_eq!(
        studio.coordinator().state(Operation::Generate),
        OpState::Succeeded
    );

    let dir = tempfile::tempdir().expect("tempdir");
    let path = studio.export_pdf(dir.path()).expect("export");
    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some(EXPORT_FILE_NAME)
    );

    let bytes = std::fs::read(&path).expect("read exported pdf");
    assert!(bytes.starts_with(b"%PDF-"), "export is not a PDF");
    assert!(bytes.len() > 500, "PDF data seems too small");
    assert_eq!(
        studio.coordinator().state(Operation::Export),
        OpState::Succeeded
    );
}

#[test]
fn test_failed_generation_keeps_previous_plan() {
    let url = spawn_server(vec![r#"{"error": "rate limited"}"#.to_string()]);
    let mut studio = studio_against(&url);
    studio.load_plan(loaded_plan());

    let err = studio.generate("again please").unwrap_err();
    assert!(matches!(err, Error::GenerationError(_)));

    // The previous plan survives untouched and the message is displayed.
    assert_eq!(studio.plan().map(|p| p.title.as_str()), Some("Run a Marathon"));
    assert_eq!(
        studio.error_line().as_deref(),
        Some("rate limited Wait a few minutes")
    );
    assert_eq!(
        studio.coordinator().state(Operation::Generate),
        OpState::Failed("rate limited".to_string())
    );
}

#[test]
fn test_reentry_clears_previous_error() {
    let url = spawn_server(vec![
        r#"{"error": "rate limited"}"#.to_string(),
        format!(r#"{{"response": {}}}"#, plan_json()),
    ]);
    let mut studio = studio_against(&url);

    assert!(studio.generate("first").is_err());
    assert!(studio.error_line().is_some());

    studio.generate("second").expect("second generation");
    assert!(studio.error_line().is_none());
}

#[test]
fn test_export_rejected_while_exporting() {
    let mut studio = studio_against("http://127.0.0.1:9/unused");
    studio.load_plan(loaded_plan());

    let dir = tempfile::tempdir().expect("tempdir");
    let _guard = studio
        .coordinator()
        .begin(Operation::Export)
        .expect("hold export flag");

    let err = studio.export_pdf(dir.path()).unwrap_err();
    assert!(matches!(err, Error::Busy("export")));
    // Rejected trigger writes no second file.
    assert!(!dir.path().join(EXPORT_FILE_NAME).exists());
}

#[test]
fn test_export_without_plan_fails_cleanly() {
    let studio = studio_against("http://127.0.0.1:9/unused");
    let dir = tempfile::tempdir().expect("tempdir");

    let err = studio.export_pdf(dir.path()).unwrap_err();
    assert!(matches!(err, Error::AssembleError(_)));
    assert!(!dir.path().join(EXPORT_FILE_NAME).exists());
    // The flag cleared despite the failure.
    assert!(!studio.coordinator().is_in_progress(Operation::Export));
}

#[test]
fn test_unreachable_generation_endpoint_reports_network_error() {
    // Port 9 (discard) is not listening.
    let mut studio = studio_against("http://127.0.0.1:9/api/generate");
    let err = studio.generate("hello").unwrap_err();
    assert!(matches!(err, Error::NetworkError(_) | Error::Timeout(_)));
    assert!(!studio.coordinator().is_in_progress(Operation::Generate));
}
