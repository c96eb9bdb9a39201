//! Stand-in for the anime API, served on an ephemeral local port.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{
    body::Body,
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Json, Router,
};
use reqwest::Url;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::{jikan::JikanClient, routes, stream::MockStreamLinks, AppState, PUBLIC_DIR};

pub struct StubUpstream {
    pub base: Url,
    hits: Arc<AtomicUsize>,
}

impl StubUpstream {
    /// Serves `router`, counting every request that reaches it.
    pub async fn spawn(router: Router) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let router = router.layer(middleware::from_fn(move |req: Request, next: Next| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                next.run(req).await
            }
        }));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base: Url::parse(&format!("http://{}", addr)).unwrap(),
            hits,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// The real application, pointed at this stub.
    pub fn app(&self) -> Router {
        app_for(self.base.clone())
    }
}

pub fn app_for(base: Url) -> Router {
    app_with(JikanClient::new(base).unwrap())
}

/// The real application using a caller-built upstream client.
pub fn app_with(jikan: JikanClient) -> Router {
    routes::router(AppState::new(jikan, Arc::new(MockStreamLinks)), PUBLIC_DIR)
}

pub fn anime_record(id: u64) -> Value {
    json!({
        "mal_id": id,
        "url": format!("https://myanimelist.net/anime/{}", id),
        "images": {
            "jpg": {
                "image_url": format!("https://cdn.example/{}.jpg", id),
                "small_image_url": format!("https://cdn.example/{}t.jpg", id),
                "large_image_url": format!("https://cdn.example/{}l.jpg", id)
            }
        },
        "title": format!("Anime {}", id),
        "type": "TV",
        "score": 8.5,
        "episodes": 12,
        "year": 2023,
        "synopsis": format!("Synopsis of anime {}.", id),
        "rank": id
    })
}

pub fn server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "status": 500,
            "type": "InternalException",
            "message": "upstream stack trace goes here",
            "error": "java.lang.NullPointerException"
        })),
    )
        .into_response()
}

pub fn not_json() -> Response {
    (StatusCode::OK, Body::from("<html>maintenance</html>")).into_response()
}
