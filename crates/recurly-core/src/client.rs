use std::sync::Arc;

use crate::http_client::{
    HttpAuth, HttpClient, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient,
};
use crate::xml::XmlResource;
use crate::{ClientConfig, RecurlyError};

const XML_MEDIA_TYPE: &str = "application/xml";
const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";

/// Entry point for every Recurly operation.
///
/// Cloning is cheap: the config and transport are shared.
#[derive(Clone)]
pub struct RecurlyClient {
    config: Arc<ClientConfig>,
    http_client: Arc<dyn HttpClient>,
    auth: HttpAuth,
}

impl RecurlyClient {
    pub fn new(config: ClientConfig) -> Result<Self, RecurlyError> {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn from_env() -> Result<Self, RecurlyError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn with_http_client(
        config: ClientConfig,
        http_client: Arc<dyn HttpClient>,
    ) -> Result<Self, RecurlyError> {
        config.validate()?;
        let auth = HttpAuth::Basic(config.api_key.clone());
        Ok(Self {
            config: Arc::new(config),
            http_client,
            auth,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Currency used when an operation is not given one.
    pub fn default_currency(&self) -> &str {
        &self.config.currency
    }

    /// Absolute URLs (from `Link` headers) pass through; paths are appended to the server URL.
    pub fn url_for(&self, path_or_url: &str) -> String {
        if path_or_url.starts_with("http://") || path_or_url.starts_with("https://") {
            return path_or_url.to_owned();
        }
        let server_url = self.config.server_url();
        if path_or_url.starts_with('/') {
            format!("{server_url}{path_or_url}")
        } else {
            format!("{server_url}/{path_or_url}")
        }
    }

    /// Send one request and map any non-success status to a [`RecurlyError`].
    pub async fn perform_request(
        &self,
        method: HttpMethod,
        path_or_url: &str,
        body: Option<String>,
    ) -> Result<HttpResponse, RecurlyError> {
        let url = self.url_for(path_or_url);
        let timeout_ms = if body.is_some() {
            self.config.write_timeout_ms
        } else {
            self.config.timeout_ms
        };

        let mut request = HttpRequest::new(method, url.as_str())
            .with_header("accept", XML_MEDIA_TYPE)
            .with_header("content-type", XML_CONTENT_TYPE)
            .with_header("user-agent", self.config.user_agent.as_str())
            .with_auth(&self.auth)
            .with_timeout_ms(timeout_ms);
        if let Some(body) = body {
            request = request.with_body(body);
        }

        tracing::debug!(%method, %url, "sending recurly request");
        let response = self.http_client.execute(request).await?;

        if matches!(response.status, 200 | 201 | 202 | 204) {
            tracing::debug!(%method, %url, status = response.status, "recurly request succeeded");
            return Ok(response);
        }

        tracing::warn!(%method, %url, status = response.status, "recurly request failed");
        Err(RecurlyError::from_status(response.status, &response.body))
    }

    pub(crate) async fn get_resource<T: XmlResource>(&self, path: &str) -> Result<T, RecurlyError> {
        let response = self.perform_request(HttpMethod::Get, path, None).await?;
        parse_body(&response)
    }

    /// Send an optional body and parse the resource echoed back.
    pub(crate) async fn send_resource<T: XmlResource>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
    ) -> Result<T, RecurlyError> {
        let response = self.perform_request(method, path, body).await?;
        parse_body(&response)
    }

    /// State transitions with no request body and no interesting response.
    pub(crate) async fn send_empty(&self, method: HttpMethod, path: &str) -> Result<(), RecurlyError> {
        self.perform_request(method, path, None).await.map(|_| ())
    }
}

impl std::fmt::Debug for RecurlyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecurlyClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn parse_body<T: XmlResource>(response: &HttpResponse) -> Result<T, RecurlyError> {
    if response.body.trim().is_empty() {
        return Err(RecurlyError::UnexpectedResponse(format!(
            "status {} carried no <{}> body",
            response.status,
            T::ELEMENT_NAME
        )));
    }
    Ok(T::from_xml(&response.body)?)
}

/// Percent-encode one URL path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Append percent-encoded query parameters.
pub(crate) fn with_query(path: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return path.to_owned();
    }
    let query = params
        .iter()
        .map(|(name, value)| format!("{}={}", name, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{path}{separator}{query}")
}
