use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use crate::http_client::{HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::{ClientConfig, RecurlyClient};

/// Replays canned responses in order and records every request.
pub(crate) struct ScriptedHttpClient {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    pub(crate) fn new(responses: Vec<HttpResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn xml(status: u16, body: &str) -> Self {
        Self::new(vec![HttpResponse::new(status, body)])
    }

    pub(crate) fn recorded_requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .clone()
    }

    pub(crate) fn only_request(&self) -> HttpRequest {
        let requests = self.recorded_requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().expect("one request")
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .push(request);
        let response = self
            .responses
            .lock()
            .expect("response queue should not be poisoned")
            .pop_front()
            .ok_or_else(|| HttpError::non_retryable("no scripted response left"));
        Box::pin(async move { response })
    }
}

pub(crate) fn test_client(http: Arc<ScriptedHttpClient>) -> RecurlyClient {
    RecurlyClient::with_http_client(ClientConfig::new("test-key", "acme"), http)
        .expect("test config is valid")
}
