//! End-to-end tests of the offline runner.

use std::io::Write;

use foundry_function::cli::CliRunner;
use foundry_function::CliError;
use serde_json::{json, Value};

mod common;

fn request_file(value: Value) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(value.to_string().as_bytes()).unwrap();
    file
}

fn run(args: &[&str]) -> Result<String, CliError> {
    let runner = CliRunner::from_args(std::iter::once("main").chain(args.iter().copied()))?;
    let mut out = Vec::new();
    runner.run(&common::test_router(), &common::test_logger(), &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn report(code: u16, headers: &[(&str, &str)], payload: &str) -> String {
    let mut expected = format!(
        "\nStatus code: {code}\nResponse Header: Content-Length: {}\nResponse Header: Content-Type: application/json\n",
        payload.len()
    );
    for (name, value) in headers {
        expected.push_str(&format!("Response Header: {name}: {value}\n"));
    }
    expected.push_str(&format!("Response Payload:\n{payload}\n"));
    expected
}

#[test]
fn request_only() {
    let data = request_file(json!({"method": "POST", "url": "/request1", "body": {"hello": "world"}}));
    let out = run(&["--data", data.path().to_str().unwrap()]).unwrap();

    assert_eq!(
        out,
        report(200, &[], r#"{"code":200,"body":{"req":{"hello":"world"}}}"#)
    );
}

#[test]
fn request_and_config() {
    let data = request_file(json!({"method": "POST", "url": "/request2", "body": {"hello": "world"}}));
    let out = run(&["--data", data.path().to_str().unwrap()]).unwrap();

    assert_eq!(
        out,
        report(
            200,
            &[],
            r#"{"code":200,"body":{"config":{"a":"b"},"req":{"hello":"world"}}}"#
        )
    );
}

#[test]
fn request_config_and_logger() {
    let data = request_file(json!({"method": "POST", "url": "/request3", "body": {"hello": "world"}}));
    let out = run(&["-d", data.path().to_str().unwrap()]).unwrap();

    assert_eq!(
        out,
        report(
            200,
            &[],
            r#"{"code":200,"body":{"config":{"a":"b"},"logger":"test-logger","req":{"hello":"world"}}}"#
        )
    );
}

#[test]
fn command_line_headers_reach_the_handler() {
    let data = request_file(json!({
        "method": "POST",
        "url": "/request4",
        "body": {"hello": "world"},
        "params": {"query": {"test2": ["yes"]}}
    }));
    let out = run(&[
        "--data",
        data.path().to_str().unwrap(),
        "-H",
        "X-TEST-HEADER: test",
        "--header",
        "Accept: application/json",
        "-H",
        "x-cs-executionid: e1",
    ])
    .unwrap();

    let payload = concat!(
        r#"{"code":200,"body":{"req_body":{"hello":"world"},"#,
        r#""req_headers":{"Accept":["application/json"],"X-Cs-Executionid":["e1"],"X-Test-Header":["test"]},"#,
        r#""req_query":{"test2":["yes"]}},"#,
        r#""header":{"X-Cs-Executionid":"e1"}}"#
    );
    assert_eq!(out, report(200, &[("X-Cs-Executionid", "e1")], payload));
}

#[test]
fn not_found_is_reported() {
    let data = request_file(json!({"method": "GET", "url": "/xyz"}));
    let out = run(&["-d", data.path().to_str().unwrap()]).unwrap();

    assert_eq!(
        out,
        report(
            404,
            &[],
            r#"{"code":404,"errors":[{"code":404,"message":"Not Found: GET /xyz"}]}"#
        )
    );
}

#[test]
fn files_are_attached() {
    let data = request_file(json!({"method": "POST", "url": "/files"}));
    let mut upload = tempfile::NamedTempFile::new().unwrap();
    upload.write_all(b"  file text \n").unwrap();
    let upload_path = upload.path().to_str().unwrap();

    let out = run(&[
        "-d",
        data.path().to_str().unwrap(),
        "-H",
        "Content-Type: multipart/form-data",
        "-f",
        upload_path,
    ])
    .unwrap();

    let payload = format!(
        r#"{{"code":200,"body":{{"allText":"file text","names":[{}]}}}}"#,
        serde_json::to_string(upload_path).unwrap()
    );
    assert_eq!(out, report(200, &[], &payload));
}

#[test]
fn file_without_multipart_is_refused() {
    let err = run(&["-d", "unused.json", "-f", "a.txt"]).unwrap_err();
    assert!(matches!(err, CliError::MultipartRequired));
}

#[test]
fn malformed_header_is_refused() {
    let err = run(&["-d", "unused.json", "-H", "no separator"]).unwrap_err();
    assert!(matches!(err, CliError::InvalidHeader(h) if h == "no separator"));
}

#[test]
fn missing_data_file() {
    let err = run(&["-d", "/definitely/not/here.json"]).unwrap_err();
    assert!(matches!(err, CliError::Read { .. }));
}
