use actix_web::{
    http::{header, StatusCode},
    web, HttpRequest, HttpResponse,
};
use url::Url;

use crate::{errors::AppError, http::api_client::api_endpoint, AppState};

/// Headers that describe a single connection and must not be forwarded.
const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "host",
    "content-length",
];

fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP.iter().any(|h| h.eq_ignore_ascii_case(name))
}

fn upstream_url(base: &str, tail: &str, query: &str) -> Result<Url, AppError> {
    let mut url = Url::parse(base)
        .and_then(|base| api_endpoint(&base, &format!("/{}", tail)))
        .map_err(|e| AppError::InternalError(format!("Invalid upstream URL: {}", e)))?;
    if !query.is_empty() {
        url.set_query(Some(query));
    }
    Ok(url)
}

/// Development pass-through for `/api/*`: method, query, body and end-to-end
/// headers (cookies included) go to the backend and come back unchanged.
pub async fn proxy(
    req: HttpRequest,
    tail: web::Path<String>,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let url = upstream_url(&state.config.api_base_url, &tail, req.query_string())?;
    let method = reqwest::Method::from_bytes(req.method().as_str().as_bytes())
        .map_err(|_| AppError::invalid_field("method", "Unsupported HTTP method"))?;

    let mut outgoing = state.proxy_client.request(method, url.clone());
    for (name, value) in req.headers() {
        if !is_hop_by_hop(name.as_str()) {
            outgoing = outgoing.header(name.as_str(), value.as_bytes());
        }
    }

    let upstream = outgoing.body(body.to_vec()).send().await.map_err(|e| {
        tracing::warn!(%url, "Proxy request failed: {}", e);
        AppError::Unavailable("Backend is unreachable".to_string())
    })?;

    let status = StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let mut response = HttpResponse::build(status);
    for (name, value) in upstream.headers() {
        if is_hop_by_hop(name.as_str()) {
            continue;
        }
        if let (Ok(name), Ok(value)) = (
            header::HeaderName::from_bytes(name.as_str().as_bytes()),
            header::HeaderValue::from_bytes(value.as_bytes()),
        ) {
            response.append_header((name, value));
        }
    }

    let bytes = upstream.bytes().await.map_err(|e| {
        tracing::warn!(%url, "Proxy body read failed: {}", e);
        AppError::Unavailable("Backend response was cut short".to_string())
    })?;
    tracing::debug!(%url, status = status.as_u16(), "Proxied");

    Ok(response.body(bytes))
}
