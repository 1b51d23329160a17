//! Minimal HTTP/1.1 server standing in for a release host.
//!
//! Serves a fixed set of paths with GET and HEAD, answers 404 for anything
//! else, and honours single `Range: bytes=` requests.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Starts a server in a background thread. Returns the base URL without a
/// trailing slash (e.g. "http://127.0.0.1:12345"). The server runs until the
/// process exits.
pub fn start(assets: Vec<(String, Vec<u8>)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    let assets: Arc<HashMap<String, Vec<u8>>> = Arc::new(assets.into_iter().collect());
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let assets = Arc::clone(&assets);
            thread::spawn(move || handle(stream, &assets));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

fn read_request_head(stream: &mut TcpStream) -> Option<String> {
    let mut request = Vec::new();
    let mut buf = [0u8; 4096];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return None,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }
    String::from_utf8(request).ok()
}

fn parse_range(request: &str) -> Option<(usize, Option<usize>)> {
    let value = request.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        name.trim()
            .eq_ignore_ascii_case("range")
            .then(|| value.trim().to_string())
    })?;
    let (start, end) = value.strip_prefix("bytes=")?.split_once('-')?;
    let start = start.parse().ok()?;
    let end = if end.is_empty() {
        None
    } else {
        Some(end.parse().ok()?)
    };
    Some((start, end))
}

fn handle(mut stream: TcpStream, assets: &HashMap<String, Vec<u8>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let Some(request) = read_request_head(&mut stream) else {
        return;
    };
    let mut request_line = request.lines().next().unwrap_or("").split_whitespace();
    let method = request_line.next().unwrap_or("");
    let path = request_line.next().unwrap_or("");

    let Some(body) = assets.get(path) else {
        let _ = stream.write_all(
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\nConnection: close\r\n\r\nNot Found",
        );
        return;
    };

    let total = body.len();
    let (status, slice, content_range) = match parse_range(&request) {
        Some((start, end)) if start < total => {
            let end_excl = end.map_or(total, |end| (end + 1).min(total));
            (
                "206 Partial Content",
                &body[start..end_excl],
                Some(format!("bytes {}-{}/{}", start, end_excl - 1, total)),
            )
        }
        _ => ("200 OK", &body[..], None),
    };

    let mut head = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/octet-stream\r\nContent-Length: {}\r\nConnection: close\r\n",
        status,
        slice.len()
    );
    if let Some(content_range) = content_range {
        head.push_str(&format!("Content-Range: {}\r\n", content_range));
    }
    head.push_str("\r\n");

    let _ = stream.write_all(head.as_bytes());
    if method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(slice);
    }
    let _ = stream.flush();
}
