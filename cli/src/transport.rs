//! Blocking HTTP transport backed by ureq.

use std::time::Duration;

use todo_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Transport};
use tracing::trace;

/// Executes core requests with a shared ureq agent.
///
/// ureq's status-code-as-error behavior is disabled so 4xx/5xx responses
/// come back as data and status interpretation stays in the core.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&mut self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        trace!(method = %req.method, url = %req.path, "executing request");
        let content_type = req
            .headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .map(|(_, value)| value.as_str())
            .unwrap_or("application/json");
        let body = req.body.as_deref().unwrap_or_default();

        let result = match req.method {
            HttpMethod::Get => self.agent.get(&req.path).call(),
            HttpMethod::Delete => self.agent.delete(&req.path).call(),
            HttpMethod::Post => self
                .agent
                .post(&req.path)
                .content_type(content_type)
                .send(body.as_bytes()),
            HttpMethod::Patch => self
                .agent
                .patch(&req.path)
                .content_type(content_type)
                .send(body.as_bytes()),
        };
        let mut response = result.map_err(|e| ApiError::transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::transport(e.to_string()))?;
        Ok(HttpResponse::new(status, body))
    }
}
