use httpmock::prelude::*;
use paws_intake::core::submission::{BOOKING_FAILURE_MESSAGE, CONTACT_FAILURE_MESSAGE};
use serde_json::json;
use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

fn write_config(server: &MockServer) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[backend]
url = "{}"
anon_key = "anon-key"

[notifications]
endpoint = "{}"

[forms]
reset_delay_ms = 0
"#,
        server.base_url(),
        server.url("/api/send-email")
    )
    .unwrap();
    file
}

fn run(config: &NamedTempFile, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_paws-intake"))
        .arg("--config")
        .arg(config.path())
        .args(args)
        .output()
        .unwrap()
}

fn user_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stderr)
        .lines()
        .filter(|line| line.starts_with("❌"))
        .map(str::to_string)
        .collect()
}

fn booking_args(start_date: &str) -> Vec<&str> {
    vec![
        "book",
        "--name",
        "Jamie Rivera",
        "--email",
        "jamie@example.com",
        "--phone",
        "9044388588",
        "--start-date",
        start_date,
    ]
}

#[test]
fn test_book_upstream_failure_prints_generic_message() {
    let server = MockServer::start();
    let booking_mock = server.mock(|when, then| {
        when.method(POST).path("/rest/v1/bookings");
        then.status(409).json_body(json!({
            "message": "duplicate key value violates unique constraint \"bookings_pkey\""
        }));
    });
    let config = write_config(&server);

    let output = run(&config, &booking_args("2099-01-01"));

    booking_mock.assert();
    assert!(!output.status.success());
    assert_eq!(user_lines(&output), vec![format!("❌ {}", BOOKING_FAILURE_MESSAGE)]);
}

#[test]
fn test_book_validation_failure_prints_field_message() {
    let server = MockServer::start();
    let booking_mock = server.mock(|when, then| {
        when.method(POST).path("/rest/v1/bookings");
        then.status(201).json_body(json!([{"id": 1}]));
    });
    let config = write_config(&server);

    let output = run(&config, &booking_args("2001-01-01"));

    booking_mock.assert_hits(0);
    assert!(!output.status.success());
    assert_eq!(
        user_lines(&output),
        vec!["❌ Start date must be tomorrow or later".to_string()]
    );
}

#[test]
fn test_book_success_exits_cleanly() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/rest/v1/bookings");
        then.status(201).json_body(json!([{"id": 1, "status": "pending"}]));
    });
    let config = write_config(&server);

    let output = run(&config, &booking_args("2099-01-01"));

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Booking Submitted!"));
}

#[test]
fn test_contact_relay_failure_prints_generic_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/send-email");
        then.status(502).json_body(json!({"error": "smtp relay refused connection"}));
    });
    let config = write_config(&server);

    let output = run(
        &config,
        &["contact", "--name", "Jo", "--email", "jo@example.com", "--message", "Hi!"],
    );

    assert!(!output.status.success());
    assert_eq!(user_lines(&output), vec![format!("❌ {}", CONTACT_FAILURE_MESSAGE)]);
}
