use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// How long `/slow` waits before answering.
pub(super) const SLOW_DELAY: Duration = Duration::from_millis(400);

const HEAD_LIMIT: usize = 16 * 1024;

/// One request as the test server saw it.
#[derive(Debug, Clone)]
pub(super) struct Captured {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Captured {
    pub(super) fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

pub(super) struct TestServer {
    pub base: String,
    captured: Arc<Mutex<Vec<Captured>>>,
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl TestServer {
    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub(super) fn captured(&self) -> Vec<Captured> {
        self.captured
            .lock()
            .map(|captured| captured.clone())
            .unwrap_or_default()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawns a tiny HTTP/1.1 server for transport tests, or `None` when the
/// sandbox does not allow binding sockets.
///
/// Routes: `/slow` answers after [`SLOW_DELAY`], `/missing` answers 404,
/// everything else answers 200 with body `OK`.
pub(super) fn spawn_server_or_skip() -> AppResult<Option<TestServer>> {
    let listener = match TcpListener::bind("127.0.0.1:0") {
        Ok(listener) => listener,
        Err(err) if err.kind() == ErrorKind::PermissionDenied => return Ok(None),
        Err(err) => return Err(AppError::from(err)),
    };
    let addr = listener.local_addr()?;
    listener.set_nonblocking(true)?;

    let captured = Arc::new(Mutex::new(Vec::new()));
    let (shutdown_tx, shutdown_rx) = mpsc::channel();
    let sink = Arc::clone(&captured);
    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }
            match listener.accept() {
                Ok((stream, _)) => {
                    let sink = Arc::clone(&sink);
                    thread::spawn(move || handle_client(stream, &sink));
                }
                Err(err) if err.kind() == ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(5));
                }
                Err(_) => break,
            }
        }
    });

    Ok(Some(TestServer {
        base: format!("http://{}", addr),
        captured,
        shutdown: shutdown_tx,
        thread: Some(handle),
    }))
}

fn handle_client(mut stream: TcpStream, sink: &Mutex<Vec<Captured>>) {
    if stream.set_nonblocking(false).is_err() {
        return;
    }
    let Some(captured) = read_request(&mut stream) else {
        return;
    };
    let path = captured.path.clone();
    if let Ok(mut all) = sink.lock() {
        all.push(captured);
    }

    let response: &[u8] = match path.as_str() {
        "/slow" => {
            thread::sleep(SLOW_DELAY);
            b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK"
        }
        "/missing" => {
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 4\r\nConnection: close\r\n\r\nnope"
        }
        _ => b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK",
    };
    if stream.write_all(response).is_err() || stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

fn read_request(stream: &mut TcpStream) -> Option<Captured> {
    let mut raw = Vec::new();
    let mut chunk = [0u8; 1024];
    let head_end = loop {
        if let Some(pos) = find_head_end(&raw) {
            break pos;
        }
        if raw.len() > HEAD_LIMIT {
            return None;
        }
        let read = stream.read(&mut chunk).ok()?;
        if read == 0 {
            return None;
        }
        raw.extend_from_slice(chunk.get(..read)?);
    };

    let head = String::from_utf8_lossy(raw.get(..head_end)?).into_owned();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split(' ');
    let method = request_line.next()?.to_owned();
    let path = request_line.next()?.to_owned();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_owned(), value.trim().to_owned()))
        .collect();

    let length = headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = raw.get(head_end.saturating_add(4)..)?.to_vec();
    while body.len() < length {
        let read = stream.read(&mut chunk).ok()?;
        if read == 0 {
            break;
        }
        body.extend_from_slice(chunk.get(..read)?);
    }

    Some(Captured {
        method,
        path,
        headers,
        body,
    })
}

fn find_head_end(raw: &[u8]) -> Option<usize> {
    raw.windows(4).position(|window| window == b"\r\n\r\n")
}
