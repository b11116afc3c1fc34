//! Typed endpoint methods.

use crate::error::Result;
use crate::transport::{ApiRequest, HttpTransport, Transport};
use crate::types::{MessageDetail, MessageRequest, MessageResponse, RecipientRequest, User};
use std::time::Duration;

/// Client for the mail directory API.
///
/// Every method performs exactly one request. Unsuccessful statuses come back
/// as [`crate::Error::Status`]; string results are returned as the server sent
/// them, so an empty id is `Ok("")` and judging it is up to the caller.
#[derive(Debug, Clone)]
pub struct MailApi<T = HttpTransport> {
    transport: T,
}

impl MailApi<HttpTransport> {
    /// Creates a client over HTTP.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn connect(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(base_url, timeout)?))
    }
}

impl<T> MailApi<T> {
    /// Creates a client over an existing transport.
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport> MailApi<T> {
    /// Registers a new user. Returns the new user id, empty if the server
    /// refused the name.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, unsuccessful status, or a
    /// structured body.
    pub async fn register(&self, user: &User) -> Result<String> {
        let request = ApiRequest::post(&["user"]).with_json(user)?;
        let response = self.transport.execute(request).await?.error_for_status()?;
        response.text()
    }

    /// Looks up the user id for a name and password. Empty if the
    /// credentials did not match.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, unsuccessful status, or a
    /// structured body.
    pub async fn login(&self, name: &str, password: &str) -> Result<String> {
        let request = ApiRequest::get(&["user"])
            .with_query("user", name)
            .with_query("password", password);
        let response = self.transport.execute(request).await?.error_for_status()?;
        response.text()
    }

    /// Lists the messages addressed to a user, in server order.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, unsuccessful status, or a body
    /// that is not a message array.
    pub async fn list_messages(&self, receiver: &str) -> Result<Vec<MessageResponse>> {
        let request = ApiRequest::get(&["handle"]).with_query("receiver", receiver);
        let response = self.transport.execute(request).await?.error_for_status()?;
        response.json()
    }

    /// Creates a message and returns the id the server assigned.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, unsuccessful status, or a
    /// structured body.
    pub async fn create_message(&self, message: &MessageRequest) -> Result<String> {
        let request = ApiRequest::post(&["message"]).with_json(message)?;
        let response = self.transport.execute(request).await?.error_for_status()?;
        response.text()
    }

    /// Delivers a message to one recipient. Returns the server's free-text
    /// status.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, unsuccessful status, or a
    /// structured body.
    pub async fn send_recipient(&self, delivery: &RecipientRequest) -> Result<String> {
        let request = ApiRequest::post(&["recipient"]).with_json(delivery)?;
        let response = self.transport.execute(request).await?.error_for_status()?;
        response.text()
    }

    /// Fetches the full content of a message.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, unsuccessful status, or a
    /// malformed body.
    pub async fn message_detail(&self, message_id: &str) -> Result<MessageDetail> {
        let request = ApiRequest::get(&["message", message_id]);
        let response = self.transport.execute(request).await?.error_for_status()?;
        response.json()
    }

    /// Removes a message from one user's inbox.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or unsuccessful status.
    pub async fn delete_message(&self, user_id: &str, message_id: &str) -> Result<()> {
        let request = ApiRequest::delete(&["recipient", user_id, "message", message_id]);
        self.transport.execute(request).await?.error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::transport::RawResponse;
    use crate::{Error, Method, StatusCode};
    use std::sync::Mutex;

    /// Replies with a fixed response and records every request.
    struct Recorder {
        response: RawResponse,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl Recorder {
        fn new(response: RawResponse) -> Self {
            Self {
                response,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn last(&self) -> ApiRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl Transport for Recorder {
        async fn execute(&self, request: ApiRequest) -> Result<RawResponse> {
            self.requests.lock().unwrap().push(request);
            Ok(self.response.clone())
        }
    }

    #[tokio::test]
    async fn test_register_posts_user() {
        let api = MailApi::new(Recorder::new(RawResponse::ok("\"u-42\"")));
        let id = api.register(&User::new("alice", "secret")).await.unwrap();
        assert_eq!(id, "u-42");

        let request = api.transport().last();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path(), "/user");
        assert_eq!(
            request.body.unwrap(),
            serde_json::json!({"name": "alice", "password": "secret"})
        );
    }

    #[tokio::test]
    async fn test_login_uses_query() {
        let api = MailApi::new(Recorder::new(RawResponse::ok("")));
        let id = api.login("alice", "secret").await.unwrap();
        assert!(id.is_empty());

        let request = api.transport().last();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path(), "/user");
        assert_eq!(request.query_param("user"), Some("alice"));
        assert_eq!(request.query_param("password"), Some("secret"));
    }

    #[tokio::test]
    async fn test_list_messages() {
        let body = r#"[{"message":"m1","receiver":"u1","sender":"bob","subject":"Hi"}]"#;
        let api = MailApi::new(Recorder::new(RawResponse::ok(body)));
        let rows = api.list_messages("u1").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sender_name, "bob");

        let request = api.transport().last();
        assert_eq!(request.path(), "/handle");
        assert_eq!(request.query_param("receiver"), Some("u1"));
    }

    #[tokio::test]
    async fn test_list_messages_malformed_body() {
        let api = MailApi::new(Recorder::new(RawResponse::ok("<html>oops</html>")));
        let err = api.list_messages("u1").await.unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[tokio::test]
    async fn test_create_message_rejected() {
        let api = MailApi::new(Recorder::new(RawResponse::new(
            StatusCode::BAD_REQUEST,
            "bad sender",
        )));
        let err = api
            .create_message(&MessageRequest::new("Hi", "Test", "u1"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(400));
        assert_eq!(api.transport().last().path(), "/message");
    }

    #[tokio::test]
    async fn test_create_message_null_id_is_empty() {
        let api = MailApi::new(Recorder::new(RawResponse::ok("null")));
        let id = api
            .create_message(&MessageRequest::new("Hi", "Test", "u1"))
            .await
            .unwrap();
        assert!(id.is_empty());
    }

    #[tokio::test]
    async fn test_create_message_object_body_is_malformed() {
        let api = MailApi::new(Recorder::new(RawResponse::ok(r#"{"id":"m1"}"#)));
        let err = api
            .create_message(&MessageRequest::new("Hi", "Test", "u1"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Malformed(_)));
    }

    #[tokio::test]
    async fn test_send_recipient_returns_status_text() {
        let api = MailApi::new(Recorder::new(RawResponse::ok("Success: delivered")));
        let status = api
            .send_recipient(&RecipientRequest::new("m1", "bob"))
            .await
            .unwrap();
        assert_eq!(status, "Success: delivered");
        assert_eq!(api.transport().last().path(), "/recipient");
    }

    #[tokio::test]
    async fn test_message_detail_path() {
        let body = r#"{"subject":"Hi","body":"Test","sent":"now","sender":"alice","idmessage":"m1"}"#;
        let api = MailApi::new(Recorder::new(RawResponse::ok(body)));
        let detail = api.message_detail("m1").await.unwrap();
        assert_eq!(detail.body, "Test");
        assert_eq!(api.transport().last().segments, vec!["message", "m1"]);
    }

    #[tokio::test]
    async fn test_delete_message() {
        let api = MailApi::new(Recorder::new(RawResponse::new(StatusCode::NO_CONTENT, "")));
        api.delete_message("u1", "m1").await.unwrap();

        let request = api.transport().last();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.path(), "/recipient/u1/message/m1");
    }

    #[tokio::test]
    async fn test_delete_message_not_found() {
        let api = MailApi::new(Recorder::new(RawResponse::new(StatusCode::NOT_FOUND, "")));
        let err = api.delete_message("u1", "m1").await.unwrap_err();
        assert!(err.is_status());
    }
}
