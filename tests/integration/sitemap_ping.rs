//! Integration tests for the sitemap ping command against a local HTTP stub.

use plinth::cli::{Cli, Commands, RunContext};
use plinth::config::SitemapConfig;
use plinth::error::{CommandError, SitemapError};
use plinth::sitemap;
use clap::Parser;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use tempfile::TempDir;

/// One-shot HTTP stub: answers a single request with the given status line
/// and reports the request line it saw.
fn one_shot_server(status_line: &'static str) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 4096];
            let n = stream.read(&mut buf).unwrap_or(0);
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            let request_line = request.lines().next().unwrap_or("").to_string();
            let _ = tx.send(request_line);

            let body = "ok";
            let response = format!(
                "{}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
    });

    (format!("http://{}", addr), rx)
}

fn stub_config(endpoint: String, url: Option<&str>) -> SitemapConfig {
    SitemapConfig {
        url: url.map(str::to_string),
        base_url: None,
        ping_endpoint: endpoint,
    }
}

#[test]
fn test_ping_forwards_explicit_url() {
    let (endpoint, rx) = one_shot_server("HTTP/1.1 200 OK");
    let config = stub_config(endpoint.clone(), None);

    let result = sitemap::ping_google(&config, Some("https://example.com/sitemap.xml")).unwrap();
    assert_eq!(result.status, 200);
    assert_eq!(result.sitemap_url, "https://example.com/sitemap.xml");
    assert_eq!(result.endpoint, endpoint);

    // The URL travels percent-encoded in the sitemap query parameter.
    let request_line = rx.recv().unwrap();
    assert!(request_line.starts_with("GET "));
    assert!(
        request_line.contains("sitemap=https%3A%2F%2Fexample.com%2Fsitemap.xml"),
        "unexpected request line: {}",
        request_line
    );
}

#[test]
fn test_ping_uses_configured_url_when_none_given() {
    let (endpoint, rx) = one_shot_server("HTTP/1.1 200 OK");
    let config = stub_config(endpoint, Some("https://example.com/sitemap-index.xml"));

    let result = sitemap::ping_google(&config, None).unwrap();
    assert_eq!(result.sitemap_url, "https://example.com/sitemap-index.xml");

    let request_line = rx.recv().unwrap();
    assert!(request_line.contains("sitemap-index.xml") || request_line.contains("sitemap-index"));
}

#[test]
fn test_ping_non_success_status_fails() {
    let (endpoint, _rx) = one_shot_server("HTTP/1.1 404 Not Found");
    let config = stub_config(endpoint, Some("https://example.com/sitemap.xml"));

    let err = sitemap::ping_google(&config, None).unwrap_err();
    assert!(matches!(err, SitemapError::PingFailed(_)));
}

#[test]
fn test_ping_unreachable_endpoint_fails() {
    // Bind then drop to get a port nothing listens on.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = stub_config(format!("http://127.0.0.1:{}", port), None);

    let err = sitemap::ping_google(&config, Some("https://example.com/sitemap.xml")).unwrap_err();
    assert!(matches!(err, SitemapError::PingFailed(_)));
}

#[test]
fn test_ping_command_through_run_context() {
    let (endpoint, _rx) = one_shot_server("HTTP/1.1 200 OK");

    let temp = TempDir::new().unwrap();
    let config_file = temp.path().join("plinth.toml");
    std::fs::write(
        &config_file,
        format!(
            "[sitemap]\nurl = \"https://example.com/sitemap.xml\"\nping_endpoint = \"{}\"\n",
            endpoint
        ),
    )
    .unwrap();

    let context = RunContext::new(temp.path().to_path_buf(), Some(config_file)).unwrap();
    let cli = Cli::try_parse_from([
        "plinth",
        "--workspace",
        temp.path().to_str().unwrap(),
        "ping_google",
    ])
    .unwrap();

    let output = context.execute(&cli.command).unwrap();
    assert!(output.contains("Sitemap announced"));
    assert!(output.contains("https://example.com/sitemap.xml"));
}

#[test]
fn test_ping_command_without_any_url_reports_not_found() {
    let temp = TempDir::new().unwrap();
    let config_file = temp.path().join("plinth.toml");
    std::fs::write(&config_file, "").unwrap();

    let context = RunContext::new(temp.path().to_path_buf(), Some(config_file)).unwrap();
    let err = context
        .execute(&Commands::PingGoogle { sitemap_url: None })
        .unwrap_err();
    assert!(matches!(
        err,
        CommandError::Sitemap(SitemapError::SitemapNotFound)
    ));
}
