//! Local HTTP server serving in-memory fixture files.

use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use futures_util::{StreamExt, stream};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Paths under this prefix answer only after a long delay.
pub const SLOW_PREFIX: &str = "/slow/";

/// Paths under this prefix send one chunk of body, then stall.
pub const STALL_PREFIX: &str = "/stall/";

/// Paths under this prefix answer after a short delay.
pub const LATE_PREFIX: &str = "/late/";

const STALL: Duration = Duration::from_secs(30);

#[derive(Clone)]
struct Fixtures {
    files: Arc<HashMap<String, Vec<u8>>>,
    hits: Arc<AtomicUsize>,
}

/// A running fixture server bound to an ephemeral port.
pub struct FixtureServer {
    base_url: String,
    hits: Arc<AtomicUsize>,
}

impl FixtureServer {
    /// Serve `files` (`"/path" => body`); any other path is a 404.
    pub async fn start(files: Vec<(&str, Vec<u8>)>) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let state = Fixtures {
            files: Arc::new(
                files
                    .into_iter()
                    .map(|(path, body)| (path.to_string(), body))
                    .collect(),
            ),
            hits: Arc::clone(&hits),
        };

        let app = Router::new().fallback(serve).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            hits,
        }
    }

    /// Absolute URL for a fixture path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Number of requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn serve(State(state): State<Fixtures>, uri: Uri) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);

    if uri.path().starts_with(SLOW_PREFIX) {
        tokio::time::sleep(STALL).await;
    } else if uri.path().starts_with(LATE_PREFIX) {
        tokio::time::sleep(Duration::from_millis(300)).await;
    } else if uri.path().starts_with(STALL_PREFIX) {
        let first = stream::once(async {
            Ok::<_, std::io::Error>(Bytes::from_static(b"partial"))
        });
        let rest = stream::once(async {
            tokio::time::sleep(STALL).await;
            Ok(Bytes::new())
        });
        return (StatusCode::OK, Body::from_stream(first.chain(rest))).into_response();
    }

    match state.files.get(uri.path()) {
        Some(body) => (StatusCode::OK, body.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
