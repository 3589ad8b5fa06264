//! Fetch-and-decode layer: cookie-carrying requests with one refresh-and-retry on 401.

use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_DISPOSITION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client as HttpClient, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::export::{filename_from_disposition, ExportFile};
use crate::models::Envelope;

pub(crate) const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Classified result of one logical call after the refresh rule has been applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// `200 OK`, carrying the decoded payload (absent when null or undecodable).
    Success(Option<T>),
    /// Any status other than 200 and 401.
    Rejected(StatusCode),
    /// `401` that survived the refresh attempt.
    Unauthorized,
}

#[derive(Clone)]
pub struct KlukkaClient {
    http: HttpClient,
    config: ClientConfig,
    jar: Arc<Jar>,
}

impl KlukkaClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_cookie_jar(config, Arc::new(Jar::default()))
    }

    /// Builds a client whose session cookies live in `jar`.
    /// The caller may pre-seed or inspect the jar.
    pub fn with_cookie_jar(config: ClientConfig, jar: Arc<Jar>) -> Result<Self> {
        let http = build_http_client(&config, jar.clone())?;
        Ok(Self { http, config, jar })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn cookie_jar(&self) -> &Arc<Jar> {
        &self.jar
    }

    pub(crate) fn http(&self) -> &HttpClient {
        &self.http
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    pub async fn get<T>(&self, path: &str) -> Result<Outcome<T>>
    where
        T: DeserializeOwned,
    {
        let response = self.send_with_refresh(Method::GET, path, None).await?;
        Self::parse_envelope(path, response).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<Outcome<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let encoded = serde_json::to_vec(body)?;
        let response = self
            .send_with_refresh(Method::POST, path, Some(encoded))
            .await?;
        Self::parse_envelope(path, response).await
    }

    /// POSTs a JSON body and returns the raw response body with its advertised filename.
    pub async fn post_binary<B>(&self, path: &str, body: &B) -> Result<Outcome<ExportFile>>
    where
        B: Serialize + ?Sized,
    {
        let encoded = serde_json::to_vec(body)?;
        let response = self
            .send_with_refresh(Method::POST, path, Some(encoded))
            .await?;
        let status = response.status();
        if status == StatusCode::OK {
            let headers = response.headers();
            let filename = filename_from_disposition(
                headers
                    .get(CONTENT_DISPOSITION)
                    .and_then(|value| value.to_str().ok()),
            );
            let mime_type = headers
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(|value| value.to_string());
            let bytes = response.bytes().await?.to_vec();
            Ok(Outcome::Success(Some(ExportFile {
                filename,
                mime_type,
                bytes,
            })))
        } else {
            Ok(Self::classify_failure(path, status))
        }
    }

    /// Asks the backend to renew the session cookie. True only on `200 OK`.
    pub async fn refresh(&self) -> Result<bool> {
        let url = self.endpoint(&self.config.refresh_path);
        let response = self
            .http
            .get(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .send()
            .await?;
        let status = response.status();
        if status != StatusCode::OK {
            warn!(%status, "session refresh rejected");
        }
        Ok(status == StatusCode::OK)
    }

    async fn send_with_refresh(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Response> {
        let response = self.send_once(method.clone(), path, body.clone()).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        debug!(path, "unauthorized, attempting session refresh");
        if self.refresh().await? {
            // exactly one retry; its outcome is final
            self.send_once(method, path, body).await
        } else {
            Ok(response)
        }
    }

    async fn send_once(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Response> {
        let url = self.endpoint(path);
        debug!(%method, %url, "sending request");
        let mut request = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        if let Some(payload) = body {
            request = request.body(payload);
        }
        request.send().await.map_err(ApiError::from)
    }

    async fn parse_envelope<T>(path: &str, response: Response) -> Result<Outcome<T>>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if status != StatusCode::OK {
            return Ok(Self::classify_failure(path, status));
        }

        let body = response.text().await?;
        match serde_json::from_str::<Envelope<T>>(&body) {
            Ok(envelope) => Ok(Outcome::Success(envelope.payload)),
            Err(err) => {
                warn!(path, error = %err, "response is not a payload envelope");
                Ok(Outcome::Success(None))
            }
        }
    }

    fn classify_failure<T>(path: &str, status: StatusCode) -> Outcome<T> {
        if status == StatusCode::UNAUTHORIZED {
            Outcome::Unauthorized
        } else {
            warn!(path, %status, "request rejected");
            Outcome::Rejected(status)
        }
    }
}

fn build_http_client(config: &ClientConfig, jar: Arc<Jar>) -> Result<HttpClient> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&config.user_agent).map_err(|err| ApiError::Other(err.to_string()))?,
    );

    HttpClient::builder()
        .default_headers(headers)
        .cookie_provider(jar)
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .build()
        .map_err(|err| ApiError::Other(err.to_string()))
}
