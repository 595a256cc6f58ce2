//! Minimal HTTP/1.1 server answering HEAD requests for integration tests.
//!
//! Routes are fixed: `/` and `/final` answer 200, `/moved` answers 301 to
//! `/final`, `/hop` answers 302 to `/moved`, `/loop` redirects to itself,
//! anything else is 404.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub struct RedirectServer {
    pub base: String,
    hits: Arc<AtomicUsize>,
}

impl RedirectServer {
    /// `path` joined onto the server base, e.g. `url("/moved")`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path.trim_start_matches('/'))
    }

    /// Requests served so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Starts the server in a background thread; it runs until the process exits.
pub fn start() -> RedirectServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            counter.fetch_add(1, Ordering::SeqCst);
            thread::spawn(move || handle(stream));
        }
    });
    RedirectServer {
        base: format!("http://127.0.0.1:{}/", port),
        hits,
    }
}

/// A URL on localhost nobody listens on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

fn handle(mut stream: TcpStream) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("/");

    if !method.eq_ignore_ascii_case("HEAD") {
        let _ = stream.write_all(
            b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        return;
    }

    let response = match path {
        "/" | "/final" => "HTTP/1.1 200 OK\r\nContent-Length: 5\r\n".to_string(),
        "/moved" => redirect("301 Moved Permanently", "/final"),
        "/hop" => redirect("302 Found", "/moved"),
        "/loop" => redirect("302 Found", "/loop"),
        _ => "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n".to_string(),
    };
    let _ = stream.write_all(format!("{response}Connection: close\r\n\r\n").as_bytes());
}

fn redirect(status: &str, location: &str) -> String {
    format!("HTTP/1.1 {status}\r\nLocation: {location}\r\nContent-Length: 0\r\n")
}
