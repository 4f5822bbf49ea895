//! One-shot HTTP responder for tests that talk to a real socket.

use reqwest::blocking::Client;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

/// Serves `count` requests on a local port, answering paths starting with a route
/// with its body and anything else with 404. Returns the base URL.
pub fn serve(routes: Vec<(&'static str, Vec<u8>)>, count: usize) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let handle = thread::spawn(move || {
        for _ in 0..count {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buffer = [0u8; 512];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let read = stream.read(&mut buffer).unwrap();
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&buffer[..read]);
            }
            let request = String::from_utf8_lossy(&request);
            let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();
            let (status, body) = routes
                .iter()
                .find(|(route, _)| path.starts_with(route))
                .map(|(_, body)| ("200 OK", body.clone()))
                .unwrap_or(("404 Not Found", b"not found".to_vec()));
            let head = format!(
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            // The client may hang up early on error statuses
            let _ = stream
                .write_all(head.as_bytes())
                .and_then(|_| stream.write_all(&body))
                .and_then(|_| stream.flush());
        }
    });
    (base, handle)
}

pub fn client() -> Client {
    Client::builder().no_proxy().build().unwrap()
}
