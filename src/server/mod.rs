//! Local HTTP server: a std::net accept loop serving the JSON API and the
//! single-page console. Requests are parsed Content-Length-aware so a large
//! create-game body (hundreds of players, many groups) is never truncated at
//! an arbitrary buffer boundary.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};

pub mod api;
pub mod routes;

/// Upper bound on an accepted request body. The largest legitimate payload is
/// a create-game request with a full 512-player group layout, well under this.
const MAX_BODY_BYTES: usize = 1 << 20;

pub fn run_server(bind_addr: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_addr)?;
    println!("thunderdome server listening on http://{bind_addr}");

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                if let Err(err) = handle_connection(&mut stream) {
                    eprintln!("request error: {err}");
                }
            }
            Err(err) => eprintln!("connection failed: {err}"),
        }
    }

    Ok(())
}

struct Request {
    method: String,
    path: String,
    body: String,
}

/// Read one request: request line, headers until the blank line, then exactly
/// `Content-Length` body bytes (capped at [MAX_BODY_BYTES]). Returns None on
/// a connection that closed before sending anything.
fn read_request(stream: &mut TcpStream) -> std::io::Result<Option<Request>> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line)? == 0 {
        return Ok(None);
    }
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("GET").to_string();
    let path = parts.next().unwrap_or("/").to_string();

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }

    let mut body = vec![0_u8; content_length.min(MAX_BODY_BYTES)];
    reader.read_exact(&mut body)?;
    Ok(Some(Request {
        method,
        path,
        body: String::from_utf8_lossy(&body).into_owned(),
    }))
}

fn handle_connection(stream: &mut TcpStream) -> std::io::Result<()> {
    let Some(request) = read_request(stream)? else {
        return Ok(());
    };
    let response = routes::route_request(&request.method, &request.path, &request.body);
    stream.write_all(response.to_http_string().as_bytes())?;
    stream.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn roundtrip(raw: &'static [u8]) -> Option<Request> {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let addr = listener.local_addr().expect("local addr");
        let writer = thread::spawn(move || {
            let mut client = TcpStream::connect(addr).expect("connect");
            client.write_all(raw).expect("write request");
            client.flush().expect("flush");
        });
        let (mut stream, _) = listener.accept().expect("accept");
        let request = read_request(&mut stream).expect("read request");
        writer.join().expect("writer thread");
        request
    }

    #[test]
    fn parses_method_path_and_full_body() {
        let request = roundtrip(
            b"POST /api/games HTTP/1.1\r\nHost: localhost\r\nContent-Length: 14\r\n\r\n{\"players\":20}",
        )
        .expect("one request");
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/api/games");
        assert_eq!(request.body, "{\"players\":20}");
    }

    #[test]
    fn missing_content_length_means_empty_body() {
        let request = roundtrip(b"GET /api/health HTTP/1.1\r\nHost: localhost\r\n\r\n")
            .expect("one request");
        assert_eq!(request.method, "GET");
        assert_eq!(request.path, "/api/health");
        assert!(request.body.is_empty());
    }

    #[test]
    fn header_name_matching_is_case_insensitive() {
        let request = roundtrip(
            b"POST /api/odds HTTP/1.1\r\ncontent-length: 2\r\n\r\n{}",
        )
        .expect("one request");
        assert_eq!(request.body, "{}");
    }

    #[test]
    fn closed_connection_yields_no_request() {
        assert!(roundtrip(b"").is_none());
    }
}
