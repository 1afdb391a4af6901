use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use warp::http::{HeaderMap, Method, StatusCode};
use warp::hyper::body::Bytes;
use warp::path::FullPath;
use warp::Filter;

use kms_core::host::Host;

#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) headers: HeaderMap,
    pub(crate) body: String,
}

/// HTTP server answering each request with the next canned `(status, body)`.
pub(crate) struct CannedServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl CannedServer {
    pub(crate) fn start(responses: Vec<(u16, String)>) -> Self {
        let responses = Arc::new(Mutex::new(VecDeque::from(responses)));
        let requests = Arc::new(Mutex::new(vec![]));
        let recorded = requests.clone();
        let route = warp::method()
            .and(warp::path::full())
            .and(warp::header::headers_cloned())
            .and(warp::body::bytes())
            .map(move |method: Method, path: FullPath, headers: HeaderMap, body: Bytes| {
                recorded.lock().push(RecordedRequest {
                    method,
                    path: path.as_str().to_string(),
                    headers,
                    body: String::from_utf8_lossy(&body).to_string(),
                });
                let (status, body) = responses
                    .lock()
                    .pop_front()
                    .unwrap_or((500, "no canned response left".to_string()));
                let status =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                warp::reply::with_status(body, status)
            });
        let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
        let handle = tokio::spawn(server);
        Self {
            addr,
            requests,
            handle,
        }
    }

    pub(crate) fn host(&self) -> Host {
        Host::from(self.addr.to_string())
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }
}

impl Drop for CannedServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
