//! Minimal HTTP/1.1 server standing in for the vendor page and image host.
//!
//! Routes are registered after start (the page has to embed the server's own
//! URLs). Responds to HEAD with headers only and to GET with headers and
//! body; unknown paths get 404. Every request is recorded so tests can count
//! network access.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u32,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Route {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn status(status: u32) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

#[derive(Default)]
struct State {
    routes: HashMap<String, Route>,
    requests: Vec<(String, String)>,
}

pub struct VendorServer {
    base: String,
    state: Arc<Mutex<State>>,
}

impl VendorServer {
    /// Starts the server in a background thread. It runs until the process exits.
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let state = Arc::new(Mutex::new(State::default()));
        let shared = Arc::clone(&state);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let state = Arc::clone(&shared);
                thread::spawn(move || handle(stream, &state));
            }
        });
        Self {
            base: format!("http://127.0.0.1:{}", port),
            state,
        }
    }

    /// Absolute URL for `path` (must start with `/`).
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn route(&self, path: &str, route: Route) {
        self.state
            .lock()
            .unwrap()
            .routes
            .insert(path.to_string(), route);
    }

    /// Registers an image: HEAD carries the title header, GET returns `body`.
    pub fn image(&self, path: &str, title: &str, body: &[u8]) {
        self.route(
            path,
            Route::ok(body.to_vec()).header(
                "Content-Disposition",
                &format!("inline; filename=\"{}\"", title),
            ),
        );
    }

    pub fn hits(&self, method: &str, path: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter(|(m, p)| m.eq_ignore_ascii_case(method) && p == path)
            .count()
    }
}

/// Page body embedding `records` the way the vendor does: a single-quoted JS
/// string with `\x22` quotes and `\/` slashes, passed to `JSON.parse`.
pub fn vendor_page(records: &[(Option<String>, Option<String>)]) -> String {
    let field = |v: &Option<String>| match v {
        Some(s) => format!("\\x22{}\\x22", s.replace('/', "\\/")),
        None => "null".to_string(),
    };
    let rows: Vec<String> = records
        .iter()
        .map(|(href, author)| format!("[{},{},null]", field(href), field(author)))
        .collect();
    format!(
        "<!doctype html><html><head><script>window.cast = JSON.parse('[[{}],\\x22v2\\x22]');</script></head><body></body></html>",
        rows.join(",")
    )
}

fn reason(status: u32) -> &'static str {
    match status {
        200 => "OK",
        302 => "Found",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}

fn handle(mut stream: TcpStream, state: &Mutex<State>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let path = parts.next().unwrap_or("").to_string();

    let route = {
        let mut st = state.lock().unwrap();
        st.requests.push((method.clone(), path.clone()));
        st.routes.get(&path).cloned()
    };
    let route = route.unwrap_or_else(|| Route::status(404));

    let mut head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        route.status,
        reason(route.status),
        route.body.len()
    );
    for (k, v) in &route.headers {
        head.push_str(&format!("{}: {}\r\n", k, v));
    }
    head.push_str("\r\n");
    let _ = stream.write_all(head.as_bytes());
    if method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(&route.body);
    }
}
