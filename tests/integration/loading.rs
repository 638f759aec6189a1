use super::support::SAMPLE_DOCUMENT;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;
use termfolio::error::ShellError;
use termfolio::shell::Interpreter;
use termfolio::store::{load_into, FileSource, HttpSource, TreeSlot, TreeState};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use termfolio::views::{MemorySink, ResponseBody};

#[tokio::test]
async fn commands_wait_for_the_tree() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("fileTree.json");
    fs::write(&path, SAMPLE_DOCUMENT).unwrap();

    let slot = TreeSlot::new();
    let mut session = Interpreter::new(slot.clone(), MemorySink::new());
    session.submit_line("ls");
    assert_eq!(
        session.sink().last().unwrap().body,
        ResponseBody::Error(ShellError::SystemNotReady)
    );

    load_into(&slot, &FileSource::new(path)).await.unwrap();
    session.submit_line("cat Docs/resume");
    assert_eq!(
        session.sink().last().unwrap().body,
        ResponseBody::Text("Hello".to_string())
    );
}

#[tokio::test]
async fn invalid_document_disables_filesystem_commands() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("fileTree.json");
    fs::write(
        &path,
        r#"{"name":"Root","type":"folder","path":"/Root","children":{}}"#,
    )
    .unwrap();

    let slot = TreeSlot::new();
    assert!(load_into(&slot, &FileSource::new(path)).await.is_err());

    let mut session = Interpreter::new(slot, MemorySink::new());
    session.submit_line("cd Docs");
    assert!(matches!(
        session.sink().last().unwrap().body,
        ResponseBody::Error(ShellError::FileSystemUnavailable(_))
    ));
    session.submit_line("help");
    assert_eq!(session.sink().last().unwrap().body, ResponseBody::Help);
}

#[tokio::test]
async fn unreachable_url_marks_slot_unavailable() {
    let slot = TreeSlot::new();
    let source = HttpSource::new(
        "http://127.0.0.1:9/fileTree.json".to_string(),
        Duration::from_millis(500),
    );
    assert!(load_into(&slot, &source).await.is_err());
    assert!(!slot.is_ready());
}

/// Answer `count` requests: the tree document at `/fileTree.json`, 404 elsewhere.
/// Returns the raw request heads in arrival order.
async fn serve_document(listener: TcpListener, count: usize) -> Vec<String> {
    let mut requests = Vec::new();
    for _ in 0..count {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut head = Vec::new();
        let mut chunk = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&chunk[..n]);
        }
        let request = String::from_utf8_lossy(&head).into_owned();
        let (status, body) = if request.starts_with("GET /fileTree.json ") {
            ("200 OK", SAMPLE_DOCUMENT)
        } else {
            ("404 Not Found", "")
        };
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
        requests.push(request);
    }
    requests
}

#[tokio::test]
async fn http_source_loads_document_and_reports_missing_one() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(serve_document(listener, 2));

    let found = TreeSlot::new();
    let source = HttpSource::new(
        format!("http://{}/fileTree.json", addr),
        Duration::from_secs(5),
    );
    load_into(&found, &source).await.unwrap();
    assert!(found.is_ready());
    let mut session = Interpreter::new(found, MemorySink::new());
    session.submit_line("cat Docs/resume");
    assert_eq!(
        session.sink().last().unwrap().body,
        ResponseBody::Text("Hello".to_string())
    );

    let missing = TreeSlot::new();
    let source = HttpSource::new(
        format!("http://{}/absent.json", addr),
        Duration::from_secs(5),
    );
    assert!(load_into(&missing, &source).await.is_err());
    match missing.snapshot() {
        TreeState::Unavailable(reason) => assert!(reason.contains("404"), "reason: {reason}"),
        _ => panic!("expected unavailable slot"),
    }

    let requests = server.await.unwrap();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        assert!(
            request.to_lowercase().contains("accept: application/json"),
            "request: {request}"
        );
    }
}
