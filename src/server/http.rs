//! The leaderboard HTTP server.
//!
//! Requests are read and parsed by hand over a tokio listener; routing and
//! response building are plain functions over the store so they can be tested
//! without sockets.

use super::store::ScoreStore;
use crate::constants::{LEADERBOARD_TOP_N, VARIANT_COUNT};
use crate::settings::GameMode;
use serde::Deserialize;
use serde_json::json;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

/// The error kinds exposed to collaborators: a malformed request, or a
/// storage write that failed. (Network unavailability is the client's third
/// kind; it never reaches this process.)
#[derive(Debug)]
pub enum ApiError {
    BadRequest(&'static str),
    Storage(io::Error),
}

impl ApiError {
    fn status(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Storage(_) => 500,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Storage(_) => "Could not save leaderboard",
        }
    }
}

/// A parsed HTTP request, just enough surface for the routes we serve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: String,
}

#[derive(Deserialize)]
struct SubmitPayload {
    username: String,
    score: u32,
}

#[derive(Deserialize)]
struct SelectVariantPayload {
    username: String,
    variant: u32,
}

/// Parses the request line and splits the query string off the path.
pub fn parse_request(head: &str, body: String) -> Option<Request> {
    let request_line = head.lines().next()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?;
    let (path, query) = match target.split_once('?') {
        Some((p, q)) => (p.to_string(), Some(q.to_string())),
        None => (target.to_string(), None),
    };
    Some(Request {
        method,
        path,
        query,
        body,
    })
}

/// Minimal percent-decoding for query values ('+' and %XX escapes).
fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                let hex = bytes
                    .get(i + 1..i + 3)
                    .and_then(|pair| std::str::from_utf8(pair).ok())
                    .and_then(|pair| u8::from_str_radix(pair, 16).ok());
                if let Some(v) = hex {
                    out.push(v);
                    i += 3;
                    continue;
                }
                out.push(b'%');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Looks up a query parameter by name, decoded.
fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    query?
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| percent_decode(v))
}

/// Dispatches one request against the store. Returns (status, JSON body).
pub fn handle_request(req: &Request, store: &mut ScoreStore) -> (u16, String) {
    let result = match (req.method.as_str(), req.path.as_str()) {
        ("POST", "/submit") => submit(req, store, GameMode::Classic),
        ("POST", "/sr-submit") => submit(req, store, GameMode::SpeedRun),
        ("GET", "/leaderboard") => Ok(top_list(store, GameMode::Classic)),
        ("GET", "/sr-leaderboard") => Ok(top_list(store, GameMode::SpeedRun)),
        ("GET", "/getQuakk") => get_variant(req, store),
        ("POST", "/selectQuakk") => select_variant(req, store),
        _ => return (404, json!({"error": "Not found"}).to_string()),
    };

    match result {
        Ok(body) => (200, body),
        Err(e) => {
            if let ApiError::Storage(ref io_err) = e {
                eprintln!("Storage error: {}", io_err);
            }
            (e.status(), json!({"error": e.message()}).to_string())
        }
    }
}

fn submit(req: &Request, store: &mut ScoreStore, mode: GameMode) -> Result<String, ApiError> {
    let payload: SubmitPayload = serde_json::from_str(&req.body)
        .map_err(|_| ApiError::BadRequest("Invalid payload"))?;
    eprintln!(
        "Score submit ({}): {} -> {}",
        mode.label(),
        payload.username,
        payload.score
    );
    store
        .submit(mode, &payload.username, payload.score)
        .map_err(ApiError::Storage)?;
    Ok(json!({"status": "ok"}).to_string())
}

fn top_list(store: &ScoreStore, mode: GameMode) -> String {
    let top = store.top(mode, LEADERBOARD_TOP_N);
    serde_json::to_string(&top).unwrap_or_else(|_| "[]".to_string())
}

fn get_variant(req: &Request, store: &ScoreStore) -> Result<String, ApiError> {
    let username = query_param(req.query.as_deref(), "username")
        .filter(|u| !u.is_empty())
        .ok_or(ApiError::BadRequest("Missing username"))?;
    Ok(json!({"variant": store.variant(&username)}).to_string())
}

fn select_variant(req: &Request, store: &mut ScoreStore) -> Result<String, ApiError> {
    let payload: SelectVariantPayload = serde_json::from_str(&req.body)
        .map_err(|_| ApiError::BadRequest("Invalid payload"))?;
    if payload.variant >= VARIANT_COUNT {
        return Err(ApiError::BadRequest("Unknown variant"));
    }
    store
        .set_variant(&payload.username, payload.variant)
        .map_err(ApiError::Storage)?;
    Ok(json!({"status": "ok"}).to_string())
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        _ => "Internal Server Error",
    }
}

/// Builds the full HTTP response bytes for a JSON body.
pub fn http_response(status: u16, body: &str) -> String {
    format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason_phrase(status),
        body.len(),
        body
    )
}

/// Runs the server until the process exits.
pub async fn run(port: u16, store: ScoreStore) -> io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    let store = Arc::new(Mutex::new(store));

    eprintln!("Leaderboard server listening on http://localhost:{}", port);

    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, store).await {
                        eprintln!("Connection error from {}: {}", peer, e);
                    }
                });
            }
            Err(e) => {
                eprintln!("Accept error: {}", e);
            }
        }
    }
}

/// Reads one request, answers it, closes the connection.
async fn handle_connection(
    mut stream: TcpStream,
    store: Arc<Mutex<ScoreStore>>,
) -> io::Result<()> {
    let (head, body) = read_request(&mut stream).await?;

    let (status, response_body) = match parse_request(&head, body) {
        Some(req) => {
            let mut store = store.lock().await;
            handle_request(&req, &mut store)
        }
        None => (400, r#"{"error":"Invalid payload"}"#.to_string()),
    };

    stream
        .write_all(http_response(status, &response_body).as_bytes())
        .await?;
    stream.shutdown().await
}

/// Reads the header block and exactly Content-Length bytes of body.
async fn read_request(stream: &mut TcpStream) -> io::Result<(String, String)> {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break buf.len();
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_header_end(&buf) {
            break pos;
        }
        if buf.len() > 64 * 1024 {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "Headers too large"));
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);

    let body_start = (header_end + 4).min(buf.len());
    let mut body_bytes = buf[body_start..].to_vec();
    while body_bytes.len() < content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        body_bytes.extend_from_slice(&chunk[..n]);
    }
    body_bytes.truncate(content_length);

    Ok((head, String::from_utf8_lossy(&body_bytes).into_owned()))
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
