#![allow(dead_code)]

use std::{
    net::TcpListener,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use actix_web::{cookie::Cookie, web, App, HttpRequest, HttpResponse, HttpServer};
use portfolio_frontend::{
    http::api_client::ApiClient,
    routes::{configure_dev_proxy, configure_routes},
    session::{InMemorySession, SessionContext},
    settings::{AppConfig, AppEnvironment},
    AppState,
};
use serde_json::json;

pub const FRESH_TOKEN: &str = "fresh";
const ECHO_BODY_LIMIT: usize = 16 * 1024 * 1024;

/// Knobs and counters shared with the fake backend's handlers.
pub struct BackendState {
    pub refresh_calls: AtomicUsize,
    pub protected_hits: AtomicUsize,
    pub refresh_succeeds: AtomicBool,
    /// Keep answering 401 on the protected route even with a fresh token.
    pub always_unauthorized: AtomicBool,
    pub refresh_delay: Duration,
}

impl Default for BackendState {
    fn default() -> Self {
        BackendState {
            refresh_calls: AtomicUsize::new(0),
            protected_hits: AtomicUsize::new(0),
            refresh_succeeds: AtomicBool::new(true),
            always_unauthorized: AtomicBool::new(false),
            refresh_delay: Duration::from_millis(200),
        }
    }
}

impl BackendState {
    pub fn refreshes(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn hits(&self) -> usize {
        self.protected_hits.load(Ordering::SeqCst)
    }
}

/// A stand-in for the REST backend, bound to an ephemeral port.
pub struct MockBackend {
    pub address: String,
    pub state: Arc<BackendState>,
}

impl MockBackend {
    pub async fn spawn() -> Self {
        Self::spawn_with(BackendState::default()).await
    }

    pub async fn spawn_with(state: BackendState) -> Self {
        let state = Arc::new(state);
        let data = web::Data::from(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .app_data(web::PayloadConfig::new(ECHO_BODY_LIMIT))
                .route("/api/protected", web::get().to(protected))
                .route("/api/auth/refresh", web::post().to(refresh))
                .route("/api/auth/login", web::post().to(login))
                .route("/api/teapot", web::get().to(teapot))
                .route("/api/profile/skills", web::get().to(skills))
                .route("/api/system/health", web::get().to(health))
                .route("/api/system/status", web::get().to(status))
                .route("/api/blogs/{slug}", web::get().to(blog_post))
                .route("/api/echo/{tail:.*}", web::route().to(echo))
        })
        .workers(1)
        .listen(listener)
        .unwrap()
        .run();

        tokio::spawn(server);

        MockBackend {
            address: format!("http://127.0.0.1:{}", port),
            state,
        }
    }

    pub fn config(&self) -> AppConfig {
        AppConfig {
            env: AppEnvironment::Testing,
            api_base_url: self.address.clone(),
            request_timeout_secs: 5,
            ..Default::default()
        }
    }

    pub fn client(&self, session: Arc<dyn SessionContext>) -> ApiClient {
        ApiClient::new(&self.config(), session).unwrap()
    }
}

/// The front server, pointed at a [`MockBackend`].
pub struct FrontServer {
    pub address: String,
    pub http: reqwest::Client,
}

impl FrontServer {
    pub async fn spawn(backend: &MockBackend) -> Self {
        let config = backend.config();
        let upload_max_bytes = config.upload_max_bytes;
        let state = web::Data::new(
            AppState::with_session(&config, Arc::new(InMemorySession::new())).unwrap(),
        );

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .configure(|cfg| configure_dev_proxy(cfg, upload_max_bytes))
                .configure(configure_routes)
        })
        .workers(1)
        .listen(listener)
        .unwrap()
        .run();

        tokio::spawn(server);

        let address = format!("http://127.0.0.1:{}", port);
        let http = reqwest::Client::new();
        while http.get(&address).send().await.is_err() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        FrontServer { address, http }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

fn unauthorized(detail: &str) -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({ "detail": detail }))
}

async fn protected(req: HttpRequest, state: web::Data<BackendState>) -> HttpResponse {
    state.protected_hits.fetch_add(1, Ordering::SeqCst);

    let fresh = req.cookie("access").is_some_and(|c| c.value() == FRESH_TOKEN);
    if fresh && !state.always_unauthorized.load(Ordering::SeqCst) {
        HttpResponse::Ok().json(json!({ "ok": true }))
    } else {
        unauthorized("Token expired")
    }
}

async fn refresh(state: web::Data<BackendState>) -> HttpResponse {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(state.refresh_delay).await;

    if state.refresh_succeeds.load(Ordering::SeqCst) {
        HttpResponse::Ok()
            .cookie(Cookie::build("access", FRESH_TOKEN).path("/").http_only(true).finish())
            .json(json!({ "message": "Token refreshed" }))
    } else {
        unauthorized("Refresh token expired")
    }
}

async fn login() -> HttpResponse {
    unauthorized("Invalid credentials")
}

async fn teapot() -> HttpResponse {
    HttpResponse::build(actix_web::http::StatusCode::IM_A_TEAPOT).finish()
}

async fn skills() -> HttpResponse {
    HttpResponse::Ok().json(json!([
        {
            "category": "Frontend",
            "color": "#3b82f6",
            "skills": [
                { "name": "React", "level": 90, "justification": "Daily driver" },
                { "name": "TypeScript", "level": 85, "justification": "" },
                { "name": "CSS", "level": 95, "justification": "" }
            ]
        },
        {
            "category": "Backend",
            "color": "#8b5cf6",
            "skills": [
                { "name": "Rust", "level": 80, "justification": "Services and CLIs" },
                { "name": "Python", "level": 75, "justification": "" },
                { "name": "SQL", "level": 80, "justification": "" }
            ]
        },
        {
            "category": "DevOps",
            "color": "#10b981",
            "skills": [
                { "name": "Docker", "level": 80, "justification": "" },
                { "name": "CI", "level": 75, "justification": "" },
                { "name": "Cloud", "level": 60, "justification": "" }
            ]
        }
    ]))
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "healthy", "database": "OK", "version": "1.0.0" }))
}

async fn status() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "maintenance_mode": false, "version": "1.0.0" }))
}

async fn blog_post(path: web::Path<String>) -> HttpResponse {
    let slug = path.into_inner();
    if slug == "missing" {
        return HttpResponse::NotFound().json(json!({ "detail": "Blog post not found" }));
    }

    HttpResponse::Ok()
        .insert_header(("x-backend", "mock"))
        .json(json!({
            "id": 1,
            "slug": slug,
            "title": "Hello",
            "excerpt": "A first post",
            "content": "<p>Hello</p>",
            "date": "2024-05-01",
            "readingTime": "2 min read",
            "tags": ["rust"],
            "featured": true,
            "published": true,
            "coverImage": null
        }))
}

/// Reports the path and body size the backend actually received.
async fn echo(req: HttpRequest, body: web::Bytes) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "method": req.method().as_str(),
        "path": req.path(),
        "received": body.len(),
    }))
}
