//! Scripted transport shared by the service tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::sync::Mutex;

use postbox_api::{ApiRequest, Error, MailApi, RawResponse, Result, StatusCode, Transport};

type Handler = Box<dyn Fn(&ApiRequest) -> Result<RawResponse> + Send + Sync>;

/// Answers each request with a handler and records what was sent.
pub struct ScriptedTransport {
    handler: Handler,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new(handler: impl Fn(&ApiRequest) -> Result<RawResponse> + Send + Sync + 'static) -> Self {
        Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests sent to a path, in order.
    pub fn requests_to(&self, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path() == path)
            .collect()
    }
}

impl Transport for ScriptedTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse> {
        let response = (self.handler)(&request);
        self.requests.lock().unwrap().push(request);
        response
    }
}

pub fn api(handler: impl Fn(&ApiRequest) -> Result<RawResponse> + Send + Sync + 'static) -> MailApi<ScriptedTransport> {
    MailApi::new(ScriptedTransport::new(handler))
}

pub fn ok(body: &str) -> Result<RawResponse> {
    Ok(RawResponse::ok(body))
}

pub fn status(code: u16, body: &str) -> Result<RawResponse> {
    Ok(RawResponse::new(StatusCode::from_u16(code).unwrap(), body))
}

/// A decoding fault, standing in for any transport-level failure.
pub fn fault() -> Result<RawResponse> {
    Err(Error::Json(serde_json::from_str::<()>("not json").unwrap_err()))
}

/// String field of the JSON body.
pub fn body_field(request: &ApiRequest, field: &str) -> String {
    request
        .body
        .as_ref()
        .and_then(|b| b[field].as_str())
        .unwrap_or_default()
        .to_string()
}
