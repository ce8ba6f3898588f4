//! In-process HTTP server for exercising the client against canned
//! responses while recording everything it sends.
#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use std::time::Duration;

/// One request as the server saw it
pub struct ReceivedRequest {
    pub method: String,
    /// Request target, query string included
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ReceivedRequest {
    /// Header value, looked up case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Path without the query string
    pub fn path_only(&self) -> &str {
        self.path.split('?').next().unwrap_or(&self.path)
    }

    /// Query string, empty when absent
    pub fn query(&self) -> &str {
        self.path.split_once('?').map(|(_, query)| query).unwrap_or("")
    }

    /// Decoded query parameters
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        url::form_urlencoded::parse(self.query().as_bytes())
            .into_owned()
            .collect()
    }

    /// Decoded form-urlencoded body parameters
    pub fn form_pairs(&self) -> Vec<(String, String)> {
        url::form_urlencoded::parse(&self.body).into_owned().collect()
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

/// Server handing out one canned response per request, in order
pub struct MockServer {
    addr: String,
    requests: Receiver<ReceivedRequest>,
}

impl MockServer {
    /// Host string for pointing a client at this server
    pub fn host(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Next recorded request; fails the test if none arrives
    pub fn received(&self) -> ReceivedRequest {
        self.requests
            .recv_timeout(Duration::from_secs(5))
            .expect("no request received")
    }
}

/// Start a server that answers the given (status, body) responses in
/// sequence, one connection per request
pub fn spawn(responses: Vec<(u16, String)>) -> MockServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind mock server");
    let addr = listener.local_addr().expect("no local addr").to_string();
    let (sender, requests) = channel();

    thread::spawn(move || {
        for (status, body) in responses {
            let Ok((stream, _)) = listener.accept() else {
                return;
            };
            serve_one(stream, status, &body, &sender);
        }
    });

    MockServer { addr, requests }
}

/// Convenience for the common single-response case
pub fn spawn_one(status: u16, body: String) -> MockServer {
    spawn(vec![(status, body)])
}

/// A JSON envelope body
pub fn envelope(code: i32, message: &str, result: serde_json::Value) -> String {
    serde_json::json!({"code": code, "message": message, "result": result}).to_string()
}

/// A successful envelope wrapping the given result
pub fn ok_envelope(result: serde_json::Value) -> String {
    envelope(200, "OK", result)
}

fn serve_one(stream: TcpStream, status: u16, body: &str, sender: &Sender<ReceivedRequest>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    let mut parts = request_line.trim_end().splitn(3, ' ');
    let (Some(method), Some(path)) = (parts.next(), parts.next()) else {
        return;
    };
    let method = method.to_string();
    let path = path.to_string();

    let mut headers = Vec::new();
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).is_err() {
            return;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim().to_string();
            let value = value.trim().to_string();
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse().unwrap_or(0);
            }
            headers.push((name, value));
        }
    }

    let mut body_bytes = vec![0u8; content_length];
    if content_length > 0 && reader.read_exact(&mut body_bytes).is_err() {
        return;
    }

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason(status),
        body.len(),
        body
    );
    let mut stream = reader.into_inner();
    if stream.write_all(response.as_bytes()).is_err() {
        return;
    }
    let _ = stream.flush();

    let _ = sender.send(ReceivedRequest {
        method,
        path,
        headers,
        body: body_bytes,
    });
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        409 => "Conflict",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
