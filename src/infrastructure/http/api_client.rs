use std::sync::Arc;

use reqwest::{
    multipart::{Form, Part},
    Client, Method, RequestBuilder, Response, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;
use uuid::Uuid;

use crate::{
    api_errors::ApiError,
    constants::{API_PREFIX, REQUEST_ID_HEADER},
    infrastructure::http::single_flight::SingleFlight,
    session::SessionContext,
    settings::AppConfig,
};

const REFRESH_PATH: &str = "/auth/refresh";
const NO_REFRESH_PATHS: &[&str] = &["/auth/login", "/auth/register", REFRESH_PATH];

/// Session-aware JSON client for the backend.
///
/// Credentials (cookies) go out with every request. A 401 triggers one
/// token refresh, shared by every request that hit the 401 concurrently,
/// and the original request is then retried exactly once.
pub struct ApiClient {
    http: Client,
    base_url: Url,
    session: Arc<dyn SessionContext>,
    refresh: SingleFlight<Result<(), ApiError>>,
}

impl ApiClient {
    pub fn new(config: &AppConfig, session: Arc<dyn SessionContext>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Self::with_client(http, &config.api_base_url, session)
    }

    /// Uses a caller-built reqwest client, e.g. one sharing a cookie jar.
    pub fn with_client(http: Client, base_url: &str, session: Arc<dyn SessionContext>) -> Result<Self, ApiError> {
        Ok(ApiClient {
            http,
            base_url: Url::parse(base_url)?,
            session,
            refresh: SingleFlight::new(),
        })
    }

    pub fn session(&self) -> &Arc<dyn SessionContext> {
        &self.session
    }

    /// `path` is relative to `/api`, e.g. `/blogs/hello-world`.
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(api_endpoint(&self.base_url, path)?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.json(Method::GET, path, None::<&()>).await
    }

    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        let response = self
            .send_with_refresh(path, || Ok(self.http.get(url.clone()).query(query)))
            .await?;
        decode_json(response).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.json(Method::POST, path, Some(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.json(Method::PUT, path, Some(body)).await
    }

    /// POST without a body, ignoring whatever the backend answers on success.
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        self.unit(Method::POST, path).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.unit(Method::DELETE, path).await
    }

    /// Multipart upload with a single `file` part. The form is rebuilt for the
    /// retry since multipart bodies can't be replayed.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        file_name: &str,
        bytes: &[u8],
        mime_type: &str,
    ) -> Result<T, ApiError> {
        let url = self.url(path)?;
        let response = self
            .send_with_refresh(path, || {
                let part = Part::bytes(bytes.to_vec())
                    .file_name(file_name.to_string())
                    .mime_str(mime_type)
                    .map_err(|e| ApiError::Invalid(e.to_string()))?;
                Ok(self.http.post(url.clone()).multipart(Form::new().part("file", part)))
            })
            .await?;
        decode_json(response).await
    }

    async fn json<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path)?;
        let response = self
            .send_with_refresh(path, || {
                let request = self.http.request(method.clone(), url.clone());
                Ok(match body {
                    Some(body) => request.json(body),
                    None => request,
                })
            })
            .await?;
        decode_json(response).await
    }

    async fn unit(&self, method: Method, path: &str) -> Result<(), ApiError> {
        let url = self.url(path)?;
        let response = self
            .send_with_refresh(path, || Ok(self.http.request(method.clone(), url.clone())))
            .await?;
        ensure_success(response).await.map(|_| ())
    }

    async fn send_with_refresh<F>(&self, path: &str, build: F) -> Result<Response, ApiError>
    where
        F: Fn() -> Result<RequestBuilder, ApiError>,
    {
        let seen_epoch = self.refresh.epoch();
        let response = self.send(path, build()?).await?;

        if response.status() != StatusCode::UNAUTHORIZED || NO_REFRESH_PATHS.contains(&path) {
            return Ok(response);
        }

        tracing::debug!(path, "Got 401, refreshing session");
        self.refresh.run(seen_epoch, || self.refresh_session()).await?;

        let retried = self.send(path, build()?).await?;
        if retried.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!(path, "Still unauthorized after refresh");
        }
        Ok(retried)
    }

    async fn send(&self, path: &str, request: RequestBuilder) -> Result<Response, ApiError> {
        let request_id = Uuid::new_v4();
        let response = request
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(%request_id, path, "Request failed: {}", e);
                ApiError::from(e)
            })?;

        tracing::debug!(%request_id, path, status = response.status().as_u16(), "Backend responded");
        Ok(response)
    }

    async fn refresh_session(&self) -> Result<(), ApiError> {
        let url = self.url(REFRESH_PATH)?;
        let response = self.send(REFRESH_PATH, self.http.post(url)).await?;

        match ensure_success(response).await {
            Ok(_) => {
                tracing::info!("Session refreshed");
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Session refresh failed: {}", e);
                self.session.clear();
                Err(match e {
                    ApiError::Backend { message, .. } => ApiError::Unauthorized(message),
                    other => other,
                })
            }
        }
    }
}

/// Resolves `/api{path}` under the base URL, keeping any path prefix the
/// base carries (`https://host/backend` -> `https://host/backend/api/...`).
pub fn api_endpoint(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let dir = format!("{}/", base.path());
        base.set_path(&dir);
    }
    base.join(&format!("{}{}", API_PREFIX.trim_start_matches('/'), path))
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_response(status, &body))
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = ensure_success(response).await?;
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
