use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::error::ClientBuildError;

/// Minimal HTTP method set needed by the fetch pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Head,
}

/// Per-request deadline unless the caller sets another one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// One request a provider client is asked to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    /// Lowercased header names.
    pub headers: BTreeMap<String, String>,
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: BTreeMap::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn head(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Head, url)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }
}

/// HTTP response envelope returned by a provider client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport-level HTTP error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    message: String,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for HttpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for HttpError {}

/// Perform a request, return a response or a transport error.
pub trait HttpClient: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>>;
}

/// Offline transport that answers every request with an empty 200.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHttpClient;

impl HttpClient for NoopHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let _ = request;
        Box::pin(async move { Ok(HttpResponse::ok("")) })
    }
}

/// Transport for one provider, backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    insecure: bool,
}

impl ReqwestHttpClient {
    /// `insecure` skips TLS certificate verification.
    pub fn configured(insecure: bool) -> Result<Self, ClientBuildError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("aggregator/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(insecure)
            .build()
            .map_err(|error| ClientBuildError::Transport(error.to_string()))?;

        Ok(Self { client, insecure })
    }

    pub const fn is_insecure(&self) -> bool {
        self.insecure
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Head => reqwest::Method::HEAD,
        };
        let builder = request.headers.iter().fold(
            self.client
                .request(method, request.url.as_str())
                .timeout(request.timeout),
            |builder, (name, value)| builder.header(name.as_str(), value.as_str()),
        );

        let response = builder
            .send()
            .await
            .map_err(|error| transport_error(&request.url, &error))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|error| transport_error(&request.url, &error))?;

        Ok(HttpResponse { status, body })
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        Box::pin(self.send(request))
    }
}

fn transport_error(url: &str, error: &reqwest::Error) -> HttpError {
    let what = if error.is_timeout() {
        "timed out"
    } else if error.is_connect() {
        "could not connect"
    } else if error.is_body() || error.is_decode() {
        "returned an unreadable body"
    } else {
        "failed"
    };
    HttpError::new(format!("{url}: request {what}: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_names_are_lowercased() {
        let request = HttpRequest::get("https://provider.example/index.txt")
            .with_header("If-None-Match", "\"abc\"");

        assert_eq!(
            request.headers.get("if-none-match").map(String::as_str),
            Some("\"abc\"")
        );
    }

    #[test]
    fn requests_default_to_a_thirty_second_deadline() {
        let request = HttpRequest::get("https://provider.example/");
        assert_eq!(request.timeout, Duration::from_secs(30));
        assert!(request.headers.is_empty());
    }

    #[tokio::test]
    async fn unusable_url_is_reported_with_the_url() {
        let client = ReqwestHttpClient::configured(false).expect("builds");

        let error = client
            .execute(HttpRequest::get("not a url"))
            .await
            .expect_err("cannot be sent");

        assert!(error.message().starts_with("not a url: request failed"));
    }

    #[test]
    fn configured_client_remembers_tls_mode() {
        let strict = ReqwestHttpClient::configured(false).expect("builds");
        let relaxed = ReqwestHttpClient::configured(true).expect("builds");

        assert!(!strict.is_insecure());
        assert!(relaxed.is_insecure());
    }

    #[tokio::test]
    async fn noop_client_answers_ok() {
        let response = NoopHttpClient
            .execute(HttpRequest::head("https://provider.example/"))
            .await
            .expect("noop never fails");
        assert!(response.is_success());
    }
}
