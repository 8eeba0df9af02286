//! End-to-end tests of the HTTP transport against a minimal local server.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use loanchat::{
    ChatClient, ChatReply, ChatRequest, ClientLogger, Error, InputType, LoanApi, LoanServer,
    LoanStatus, SessionId, UploadedFile, render,
};

struct Canned {
    status: &'static str,
    content_type: &'static str,
    body: Vec<u8>,
}

impl Canned {
    fn json(status: &'static str, body: &str) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.as_bytes().to_vec(),
        }
    }
}

/// Serves exactly one request with `canned` and hands back the raw request.
async fn serve_once(canned: Canned) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let head = format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            canned.status,
            canned.content_type,
            canned.body.len()
        );
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(&canned.body).await.unwrap();
        socket.shutdown().await.unwrap();
        String::from_utf8_lossy(&request).into_owned()
    });
    (format!("http://{}", addr), handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        if let Some(end) = find(&buf, b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let body_len = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok());
            let complete = match body_len {
                Some(len) => buf.len() >= end + 4 + len,
                None if head.contains("transfer-encoding: chunked") => {
                    find(&buf[end..], b"0\r\n\r\n").is_some()
                }
                None => true,
            };
            if complete {
                return buf;
            }
        }
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            return buf;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn server(base: &str) -> LoanServer {
    LoanServer::with_options(Some(base.to_string()), Some(Duration::from_secs(5))).unwrap()
}

#[tokio::test]
async fn chat_turn_over_http() {
    let (base, handle) = serve_once(Canned::json(
        "200 OK",
        r#"{"response":"Please enter your loan amount","session_id":"session_http_1","status":"sales","requires_input":true,"input_type":"number"}"#,
    ))
    .await;
    let client = ChatClient::with_session(server(&base), SessionId::from_string("session_http_1"));

    assert!(client.send_message("Hello").await.is_completed());

    let request = handle.await.unwrap();
    assert!(request.starts_with("POST /api/chat HTTP/1.1"));
    assert!(request.contains(r#""message":"Hello""#));
    assert!(request.contains(r#""session_id":"session_http_1""#));

    let rendered = render(&client.snapshot());
    assert_eq!(rendered.input_type, InputType::Number);
    assert_eq!(rendered.placeholder, "Enter a number...");
    assert_eq!(rendered.status_label, "Collecting Information");
}

#[tokio::test]
async fn chat_server_error_is_apology() {
    let (base, handle) = serve_once(Canned {
        status: "500 INTERNAL SERVER ERROR",
        content_type: "text/html",
        body: b"<h1>oops</h1>".to_vec(),
    })
    .await;
    let client = ChatClient::new(server(&base));

    let outcome = client.send_message("Hello").await;
    assert_eq!(outcome.error().and_then(Error::status_code), Some(500));
    handle.await.unwrap();

    let view = client.snapshot();
    assert_eq!(
        view.messages[1].content,
        "Sorry, I encountered an error. Please try again."
    );
    assert!(!view.ui.is_loading);
}

#[tokio::test]
async fn chat_unparseable_reply_is_apology() {
    let (base, handle) = serve_once(Canned::json("200 OK", r#"{"error":"oops"}"#)).await;
    let client = ChatClient::new(server(&base));

    let outcome = client.send_message("Hello").await;
    assert!(matches!(outcome.error(), Some(Error::Serialization { .. })));
    handle.await.unwrap();

    let view = client.snapshot();
    let contents: Vec<&str> = view.messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(
        contents,
        vec!["Hello", "Sorry, I encountered an error. Please try again."]
    );
    let toasts: Vec<&str> = view.toasts.iter().map(|t| t.message.as_str()).collect();
    assert_eq!(toasts, vec!["Error occurred while processing your request"]);
    assert!(!view.ui.is_loading);
}

#[tokio::test]
async fn upload_rejection_message_is_verbatim() {
    let (base, handle) = serve_once(Canned::json("400 BAD REQUEST", r#"{"error":"No file selected"}"#)).await;
    let client = ChatClient::with_session(server(&base), SessionId::from_string("session_http_2"));

    let file = UploadedFile::new("slip.pdf", "application/pdf", b"%PDF-1.4 test".to_vec());
    let outcome = client.handle_file_upload(file).await;
    assert_eq!(outcome.error().and_then(Error::server_message), Some("No file selected"));

    let request = handle.await.unwrap();
    assert!(request.starts_with("POST /api/upload HTTP/1.1"));
    assert!(request.contains("multipart/form-data"));
    assert!(request.contains(r#"name="file"; filename="slip.pdf""#));
    assert!(request.contains(r#"name="session_id""#));
    assert!(request.contains("session_http_2"));

    let toasts: Vec<String> = client
        .snapshot()
        .toasts
        .iter()
        .map(|t| t.message.clone())
        .collect();
    assert_eq!(toasts, vec!["No file selected".to_string()]);
}

#[tokio::test]
async fn upload_success_without_body() {
    let (base, handle) = serve_once(Canned {
        status: "200 OK",
        content_type: "text/plain",
        body: Vec::new(),
    })
    .await;
    let api = server(&base);
    let file = UploadedFile::new("slip.png", "image/png", vec![0x89, b'P', b'N', b'G']);
    let reply = api.upload("session_http_3", &file).await.unwrap();
    assert!(reply.filename.is_none());
    handle.await.unwrap();
}

#[tokio::test]
async fn download_saves_pdf() {
    let (base, handle) = serve_once(Canned {
        status: "200 OK",
        content_type: "application/pdf",
        body: b"%PDF-1.4 sanction".to_vec(),
    })
    .await;
    let dir = std::env::temp_dir().join(format!("loanchat-http-{}", std::process::id()));
    tokio::fs::create_dir_all(&dir).await.unwrap();
    let client = ChatClient::with_session(server(&base), SessionId::from_string("session_http_4"))
        .with_download_dir(&dir);

    assert!(client.download_sanction_letter().await.is_completed());
    let request = handle.await.unwrap();
    assert!(request.starts_with("GET /api/download/session_http_4 HTTP/1.1"));

    let saved = tokio::fs::read(dir.join("sanction_letter_session_http_4.pdf"))
        .await
        .unwrap();
    assert_eq!(saved, b"%PDF-1.4 sanction");
    tokio::fs::remove_dir_all(&dir).await.unwrap();
}

#[tokio::test]
async fn download_missing_letter() {
    let (base, handle) = serve_once(Canned::json("404 NOT FOUND", r#"{"error":"No sanction letter available"}"#)).await;
    let err = server(&base).download("session_http_5").await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.server_message(), Some("No sanction letter available"));
    handle.await.unwrap();
}

#[tokio::test]
async fn connection_refused() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = server(&format!("http://{}", addr));
    let err = api
        .chat(&ChatRequest::new("Hello", "session_http_6"))
        .await
        .unwrap_err();
    assert!(err.is_connection(), "{err:?}");
}

#[derive(Default)]
struct Recording {
    chats: Mutex<Vec<(String, bool)>>,
}

impl ClientLogger for Recording {
    fn log_chat(&self, request: &ChatRequest, reply: Result<&ChatReply, &Error>) {
        self.chats
            .lock()
            .unwrap()
            .push((request.message.clone(), reply.is_ok()));
    }
}

#[tokio::test]
async fn logger_sees_exchange() {
    let (base, handle) = serve_once(Canned::json(
        "200 OK",
        r#"{"response":"Approved!","status":"completed"}"#,
    ))
    .await;
    let logger = Arc::new(Recording::default());
    let api = server(&base).with_logger(logger.clone());

    let reply = api
        .chat(&ChatRequest::new("Accept offer", "session_http_7"))
        .await
        .unwrap();
    assert_eq!(reply.status, LoanStatus::Completed);
    handle.await.unwrap();

    assert_eq!(
        logger.chats.lock().unwrap().clone(),
        vec![("Accept offer".to_string(), true)]
    );
}
