//! Authenticated API client
//!
//! Every request gets the stored bearer token attached. A 401 is handed to
//! [`SessionRenewal`], which either produces a fresh token for one replay or
//! settles the failure (and, on a failed renewal, tears the session down).

use std::sync::Arc;

use moodlog_core::{Navigator, PublicEndpointPolicy, SessionRenewal, SessionStore};
use moodlog_domain::{
    AccessToken, ApiError, ClientConfig, ErrorBody, RefreshRequest, RefreshResponse, RefreshToken,
    Result,
};
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument};

use super::request::{ApiRequest, RequestBody};
use crate::errors::InfraError;
use crate::http::HttpClient;
use crate::session::{MemorySessionStore, WatchNavigator};

const JSON: &str = "application/json";

/// API client that renews the access token on 401 and replays once
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    refresh_path: String,
    session: SessionRenewal,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the base URL is invalid or the
    /// transport cannot be built.
    pub fn new(
        config: &ClientConfig,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        url::Url::parse(&config.api.base_url).map_err(|e| ApiError::from(InfraError::from(e)))?;

        let mut http = HttpClient::builder().timeout(config.api.timeout());
        if let Some(agent) = &config.api.user_agent {
            http = http.user_agent(agent.clone());
        }
        let http = http
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))?;

        let policy = PublicEndpointPolicy::new(&config.session.public_path_fragments);
        let session =
            SessionRenewal::new(store, navigator, policy, config.session.login_route.clone());

        Ok(Self {
            http,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            refresh_path: config.api.refresh_path.clone(),
            session,
        })
    }

    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn session(&self) -> &SessionRenewal {
        &self.session
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        self.session.store()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send `request`, renewing and replaying once on 401
    ///
    /// Returns the successful response. Non-success statuses become errors
    /// classified by status and carrying the server's message when present.
    ///
    /// # Errors
    ///
    /// Transport failures, non-success statuses, and the outcome of a failed
    /// renewal. Every request queued behind the same renewal sees the same
    /// error.
    #[instrument(skip(self, request), fields(method = %request.method(), path = %request.path()))]
    pub async fn execute(&self, request: ApiRequest) -> Result<Response> {
        let mut request = request;
        let mut token = self.session.store().access_token().await?;

        loop {
            let builder = self.prepare(&request, token.as_ref())?;
            let response = self.http.send(builder).await?;

            if response.status() != StatusCode::UNAUTHORIZED {
                return Self::check_status(&request, response).await;
            }

            let error = Self::error_from_response(&request, response).await;
            let renewed = self
                .session
                .handle_unauthorized(request.path(), request.is_retried(), error, |refresh_token| {
                    self.refresh(refresh_token)
                })
                .await?;

            debug!("replaying request with renewed token");
            request.mark_retried();
            token = Some(renewed);
        }
    }

    /// Send `request` and decode the JSON response body
    ///
    /// # Errors
    ///
    /// As [`ApiClient::execute`], plus `ApiError::Decode` for a body that does
    /// not match `R`.
    pub async fn send_json<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R> {
        let response = self.execute(request).await?;
        decode(&self.http, response).await
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        self.send_json(ApiRequest::get(path)).await
    }

    pub async fn post<T, R>(&self, path: &str, body: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send_json(ApiRequest::post(path).json(body)?).await
    }

    pub async fn put<T, R>(&self, path: &str, body: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send_json(ApiRequest::put(path).json(body)?).await
    }

    pub async fn patch<T, R>(&self, path: &str, body: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send_json(ApiRequest::patch(path).json(body)?).await
    }

    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        self.send_json(ApiRequest::delete(path)).await
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// Goes straight to the transport so a 401 here can never re-enter
    /// renewal.
    #[instrument(skip(self, refresh_token))]
    async fn refresh(&self, refresh_token: RefreshToken) -> Result<RefreshResponse> {
        let request = ApiRequest::post(self.refresh_path.clone())
            .json(&RefreshRequest { refresh_token: &refresh_token })?;
        let response = self.http.send(self.prepare(&request, None)?).await?;
        let response = Self::check_status(&request, response).await?;

        let renewed: RefreshResponse = decode(&self.http, response).await?;
        info!(rotated = renewed.refresh_token.is_some(), "refresh endpoint issued new token");
        Ok(renewed)
    }

    fn prepare(&self, request: &ApiRequest, token: Option<&AccessToken>) -> Result<RequestBuilder> {
        let mut builder = self.http.request(request.method().clone(), self.url(request.path()));

        if !request.query_pairs().is_empty() {
            builder = builder.query(request.query_pairs());
        }
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&token.bearer())
                .map_err(|e| ApiError::Client(format!("invalid access token: {e}")))?;
            value.set_sensitive(true);
            builder = builder.header(AUTHORIZATION, value);
        }

        Ok(match request.body() {
            RequestBody::Empty => builder.header(CONTENT_TYPE, JSON),
            RequestBody::Json(value) => builder.header(CONTENT_TYPE, JSON).json(value),
            RequestBody::Multipart(body) => builder.multipart(body.to_form()?),
        })
    }

    async fn check_status(request: &ApiRequest, response: Response) -> Result<Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::error_from_response(request, response).await)
        }
    }

    async fn error_from_response(request: &ApiRequest, response: Response) -> ApiError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| {
                format!("{} {} returned status {}", request.method(), request.path(), status)
            });

        debug!(status = %status, message = %message, "request failed");
        ApiError::from_status(status.as_u16(), message)
    }
}

async fn decode<R: DeserializeOwned>(http: &HttpClient, response: Response) -> Result<R> {
    let status = response.status();

    if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
        return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
            ApiError::Decode(format!(
                "No content response ({}), but response type cannot be deserialized from empty body",
                status.as_u16()
            ))
        });
    }

    let bytes = response.bytes().await.map_err(|e| http.map_error(e))?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::from(InfraError::from(e)))
}

/// Builder for [`ApiClient`]
///
/// The store defaults to an in-memory session and the navigator to one
/// parked at `/`.
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ClientConfig>,
    store: Option<Arc<dyn SessionStore>>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl ApiClientBuilder {
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// # Errors
    ///
    /// Returns `ApiError::Config` if no configuration was set or client
    /// creation fails.
    pub fn build(self) -> Result<ApiClient> {
        let config = self.config.ok_or_else(|| ApiError::Config("API config not set".into()))?;
        let store = self.store.unwrap_or_else(|| Arc::new(MemorySessionStore::new()));
        let navigator = self.navigator.unwrap_or_else(|| Arc::new(WatchNavigator::new("/")));

        ApiClient::new(&config, store, navigator)
    }
}
