use std::fs;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::thread::{self, JoinHandle};

use tempfile::TempDir;
use tiny_http::Server;

use super::*;

fn site() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("index.html"), "<html>listing</html>").unwrap();
    fs::write(temp.path().join("feed.rss"), "<rss/>").unwrap();
    fs::write(temp.path().join("feed.atom"), "<feed/>").unwrap();
    fs::write(temp.path().join("feed.json"), "{}").unwrap();
    temp
}

/// Serve `requests` requests from `root` on an ephemeral port.
fn spawn_server(root: PathBuf, requests: usize) -> (SocketAddr, JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let handle = thread::spawn(move || {
        for request in server.incoming_requests().take(requests) {
            handle_request(request, &root).unwrap();
        }
    });
    (addr, handle)
}

fn raw_request(addr: SocketAddr, method: &str, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).unwrap();
    write!(
        stream,
        "{method} {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n"
    )
    .unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    response
}

fn header<'a>(response: &'a str, name: &str) -> Option<&'a str> {
    response
        .lines()
        .take_while(|l| !l.is_empty())
        .find_map(|l| {
            let (key, value) = l.split_once(':')?;
            key.eq_ignore_ascii_case(name).then(|| value.trim())
        })
}

#[test]
fn test_serves_outputs_with_content_types() {
    let temp = site();
    let (addr, handle) = spawn_server(temp.path().to_path_buf(), 4);

    let index = raw_request(addr, "GET", "/");
    assert!(index.starts_with("HTTP/1.1 200"));
    assert!(header(&index, "Content-Type").unwrap().starts_with("text/html"));
    assert!(index.ends_with("<html>listing</html>"));

    let cases = [
        ("/feed.rss", "application/rss+xml"),
        ("/feed.atom", "application/atom+xml"),
        ("/feed.json", "application/feed+json"),
    ];
    for (path, mime) in cases {
        let response = raw_request(addr, "GET", path);
        assert!(response.starts_with("HTTP/1.1 200"), "{path}");
        assert_eq!(header(&response, "Content-Type"), Some(mime), "{path}");
    }

    handle.join().unwrap();
}

#[test]
fn test_missing_file_is_404() {
    let temp = site();
    let (addr, handle) = spawn_server(temp.path().to_path_buf(), 2);

    assert!(raw_request(addr, "GET", "/nope.xml").starts_with("HTTP/1.1 404"));
    assert!(raw_request(addr, "GET", "/../secret").starts_with("HTTP/1.1 404"));

    handle.join().unwrap();
}

#[test]
fn test_head_has_no_body() {
    let temp = site();
    let (addr, handle) = spawn_server(temp.path().to_path_buf(), 1);

    let response = raw_request(addr, "HEAD", "/feed.rss");
    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(!response.contains("<rss/>"));

    handle.join().unwrap();
}

#[test]
fn test_post_is_rejected() {
    let temp = site();
    let (addr, handle) = spawn_server(temp.path().to_path_buf(), 1);

    let response = raw_request(addr, "POST", "/feed.rss");
    assert!(response.starts_with("HTTP/1.1 405"));
    assert_eq!(header(&response, "Allow"), Some("GET, HEAD"));

    handle.join().unwrap();
}
