//! Client layer: orchestrates transport calls and maps transport ↔ domain.

mod config;

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, warn};
use url::Url;

use crate::domain::{ApiId, Response, SenderId, Sms, SmsId, StatusCode, ValidationError};

pub use config::{ClientConfig, ConfigError};

const DEFAULT_BASE_URL: &str = "https://sms.ru";
const SEND_PATH: &str = "/sms/send";
const STATUS_PATH: &str = "/sms/status";

type BoxError = Box<dyn StdError + Send + Sync>;
type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

#[derive(Debug)]
enum HttpFailure {
    /// The request never produced a response.
    Request(BoxError),
    /// Headers arrived but the body could not be read.
    Body(BoxError),
}

trait HttpTransport: Send + Sync {
    fn get<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, HttpFailure>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn get<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, HttpFailure>> {
        Box::pin(async move {
            let response = self
                .client
                .get(url)
                .query(&params)
                .send()
                .await
                .map_err(|err| HttpFailure::Request(Box::new(err)))?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|err| HttpFailure::Body(Box::new(err)))?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SmsRuClient`].
///
/// A call either succeeds completely or fails with one of these; nothing is retried.
pub enum SmsRuError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The response body could not be read.
    #[error("internal error: {0}")]
    Internal(#[source] BoxError),

    /// The response body contained no lines at all.
    #[error("no response from SMS.RU")]
    NoResponse,

    /// SMS.RU answered with a status code of 200 or above.
    #[error("Code: {code}; Status: {description}", code = .status_code.as_i64())]
    Api {
        status_code: StatusCode,
        /// Table description, `""` for codes the table does not list.
        description: &'static str,
    },

    /// `sms/send` reported success but did not return a message id line.
    #[error("send response has no message id")]
    MissingMessageId,

    /// The configured base URL cannot be used for requests.
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`SmsRuClient`].
///
/// Use this when you need to customize the base URL, timeout, or user-agent.
pub struct SmsRuClientBuilder {
    api_id: ApiId,
    sender: Option<SenderId>,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl SmsRuClientBuilder {
    /// Create a builder with the default base URL, no sender and no timeout/user-agent override.
    pub fn new(api_id: ApiId) -> Self {
        Self {
            api_id,
            sender: None,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Default sender name put into messages created with [`SmsRuClient::new_sms`].
    pub fn sender(mut self, sender: SenderId) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Override the service root; `/sms/send` and `/sms/status` are appended to it.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`SmsRuClient`].
    pub fn build(self) -> Result<SmsRuClient, SmsRuError> {
        let base_url = parse_base_url(&self.base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| SmsRuError::Transport(Box::new(err)))?;

        Ok(SmsRuClient {
            api_id: self.api_id,
            sender: self.sender,
            send_endpoint: format!("{base_url}{SEND_PATH}"),
            status_endpoint: format!("{base_url}{STATUS_PATH}"),
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

/// Validate `raw` and return it without a trailing slash.
fn parse_base_url(raw: &str) -> Result<String, SmsRuError> {
    let invalid = |reason: String| SmsRuError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason,
    };

    let url = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed".to_owned()));
    }

    Ok(url.as_str().trim_end_matches('/').to_owned())
}

#[derive(Clone)]
/// High-level SMS.RU client for the plain-text API.
///
/// Requests are sent as `GET` with a URL-encoded query to:
/// - `https://sms.ru/sms/send` for sending messages
/// - `https://sms.ru/sms/status` for checking message status
///
/// Every response starts with a status code line. Codes of 200 and above become
/// [`SmsRuError::Api`]; lower codes are returned as a [`Response`].
pub struct SmsRuClient {
    api_id: ApiId,
    sender: Option<SenderId>,
    send_endpoint: String,
    status_endpoint: String,
    http: Arc<dyn HttpTransport>,
}

impl SmsRuClient {
    /// Create a client using the default base URL.
    ///
    /// `sender` becomes the `from` of every message built with [`SmsRuClient::new_sms`].
    /// For more customization, use [`SmsRuClient::builder`].
    pub fn new(api_id: ApiId, sender: Option<SenderId>) -> Self {
        Self {
            api_id,
            sender,
            send_endpoint: format!("{DEFAULT_BASE_URL}{SEND_PATH}"),
            status_endpoint: format!("{DEFAULT_BASE_URL}{STATUS_PATH}"),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(api_id: ApiId) -> SmsRuClientBuilder {
        SmsRuClientBuilder::new(api_id)
    }

    /// Single-recipient message carrying this client's default sender.
    pub fn new_sms(&self, to: impl Into<String>, text: impl Into<String>) -> Sms {
        Sms {
            from: self.sender.clone(),
            ..Sms::new(to, text)
        }
    }

    /// Send an SMS message through SMS.RU.
    ///
    /// On success the response carries the message id from the second response line
    /// and `sms.to` as `phone`. In batch mode only that one id is returned, which
    /// belongs to the first message of the batch.
    ///
    /// Errors:
    /// - [`SmsRuError::Transport`] / [`SmsRuError::Internal`] when the HTTP exchange fails,
    /// - [`SmsRuError::NoResponse`] for an empty body,
    /// - [`SmsRuError::Api`] when SMS.RU returns an error code,
    /// - [`SmsRuError::MissingMessageId`] when the id line is absent.
    pub async fn send_sms(&self, sms: &Sms) -> Result<Response, SmsRuError> {
        let params = crate::transport::encode_send_sms_query(sms, Utc::now());
        let (mut response, lines) = self.make_request(&self.send_endpoint, params).await?;

        response.id = lines
            .into_iter()
            .nth(1)
            .ok_or(SmsRuError::MissingMessageId)?;
        response.phone = Some(sms.to.clone());
        Ok(response)
    }

    /// Check the delivery status of a message sent earlier.
    ///
    /// The returned response echoes `id` and leaves `phone` unset.
    ///
    /// Errors: same as [`SmsRuClient::send_sms`], except for `MissingMessageId`.
    pub async fn check_status(&self, id: &SmsId) -> Result<Response, SmsRuError> {
        let params = crate::transport::encode_check_status_query(id);
        let (mut response, _) = self.make_request(&self.status_endpoint, params).await?;

        response.id = id.as_str().to_owned();
        Ok(response)
    }

    async fn make_request(
        &self,
        endpoint: &str,
        mut params: Vec<(String, String)>,
    ) -> Result<(Response, Vec<String>), SmsRuError> {
        params.push((ApiId::FIELD.to_owned(), self.api_id.as_str().to_owned()));

        debug!(endpoint, "sending SMS.RU request");
        let response = self
            .http
            .get(endpoint, params)
            .await
            .map_err(|failure| match failure {
                HttpFailure::Request(err) => SmsRuError::Transport(err),
                HttpFailure::Body(err) => SmsRuError::Internal(err),
            })?;

        if !(200..=299).contains(&response.status) {
            warn!(
                endpoint,
                status = response.status,
                "unexpected HTTP status from SMS.RU"
            );
        }

        let plain = crate::transport::decode_plain_response(&response.body)
            .ok_or(SmsRuError::NoResponse)?;
        let status_code = plain.status_code;
        debug!(
            endpoint,
            status_code = status_code.as_i64(),
            lines = plain.lines.len(),
            "received SMS.RU response"
        );

        if status_code.is_error() {
            return Err(SmsRuError::Api {
                status_code,
                description: status_code.description(),
            });
        }

        Ok((Response::from_status(status_code), plain.lines))
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Mutex;

    use chrono::Duration as ChronoDuration;

    use super::*;

    #[derive(Debug, Clone, Copy)]
    enum FakeFailure {
        Request,
        Body,
    }

    #[derive(Debug, Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        last_url: Option<String>,
        last_params: Vec<(String, String)>,
        response_status: u16,
        response_body: String,
        failure: Option<FakeFailure>,
    }

    impl FakeTransport {
        fn new(response_status: u16, response_body: impl Into<String>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    last_url: None,
                    last_params: Vec::new(),
                    response_status,
                    response_body: response_body.into(),
                    failure: None,
                })),
            }
        }

        fn failing(failure: FakeFailure) -> Self {
            let transport = Self::new(200, "");
            transport.state.lock().unwrap().failure = Some(failure);
            transport
        }

        fn last_request(&self) -> (Option<String>, Vec<(String, String)>) {
            let state = self.state.lock().unwrap();
            (state.last_url.clone(), state.last_params.clone())
        }
    }

    impl HttpTransport for FakeTransport {
        fn get<'a>(
            &'a self,
            url: &'a str,
            params: Vec<(String, String)>,
        ) -> BoxFuture<'a, Result<HttpResponse, HttpFailure>> {
            Box::pin(async move {
                let (failure, status, body) = {
                    let mut state = self.state.lock().unwrap();
                    state.last_url = Some(url.to_owned());
                    state.last_params = params;
                    (
                        state.failure,
                        state.response_status,
                        state.response_body.clone(),
                    )
                };
                match failure {
                    Some(FakeFailure::Request) => Err(HttpFailure::Request(Box::new(
                        io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
                    ))),
                    Some(FakeFailure::Body) => Err(HttpFailure::Body(Box::new(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "body cut short",
                    )))),
                    None => Ok(HttpResponse { status, body }),
                }
            })
        }
    }

    fn assert_param(params: &[(String, String)], key: &str, value: &str) {
        assert!(
            params.iter().any(|(k, v)| k == key && v == value),
            "missing param {key}={value}; got: {params:?}"
        );
    }

    fn has_param(params: &[(String, String)], key: &str) -> bool {
        params.iter().any(|(k, _)| k == key)
    }

    fn make_client(sender: Option<&str>, transport: FakeTransport) -> SmsRuClient {
        SmsRuClient {
            api_id: ApiId::new("test_key").unwrap(),
            sender: sender.map(|it| SenderId::new(it).unwrap()),
            send_endpoint: "https://example.invalid/sms/send".to_owned(),
            status_endpoint: "https://example.invalid/sms/status".to_owned(),
            http: Arc::new(transport),
        }
    }

    #[tokio::test]
    async fn send_sms_single_recipient_parses_id() {
        let transport = FakeTransport::new(200, "100\nSM123");
        let client = make_client(None, transport.clone());

        let sms = client.new_sms("79990000000", "Hello");
        let response = client.send_sms(&sms).await.unwrap();
        assert_eq!(response.status, "Success");
        assert_eq!(response.status_code, StatusCode::new(100));
        assert_eq!(response.id, "SM123");
        assert_eq!(response.phone.as_deref(), Some("79990000000"));

        let (url, params) = transport.last_request();
        assert_eq!(url.as_deref(), Some("https://example.invalid/sms/send"));
        assert_eq!(
            params,
            vec![
                ("to".to_owned(), "79990000000".to_owned()),
                ("text".to_owned(), "Hello".to_owned()),
                ("api_id".to_owned(), "test_key".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn send_sms_includes_default_sender() {
        let transport = FakeTransport::new(200, "100\n000000-1");
        let client = make_client(Some("shop"), transport.clone());

        let sms = client.new_sms("79990000000", "Hello");
        assert_eq!(sms.from.as_ref().map(SenderId::as_str), Some("shop"));
        client.send_sms(&sms).await.unwrap();

        let (_, params) = transport.last_request();
        assert_param(&params, "from", "shop");
    }

    #[tokio::test]
    async fn send_sms_batch_takes_first_id_line() {
        let transport = FakeTransport::new(200, "100\nID-111\nID-222\nbalance=9.50");
        let client = make_client(None, transport.clone());

        let sms = Sms::batch([("111", "A"), ("222", "B")]);
        let response = client.send_sms(&sms).await.unwrap();
        assert_eq!(response.id, "ID-111");
        assert_eq!(response.phone.as_deref(), Some(""));

        let (_, params) = transport.last_request();
        assert_param(&params, "multi[111]", "A");
        assert_param(&params, "multi[222]", "B");
        assert_param(&params, "api_id", "test_key");
        assert!(!has_param(&params, "to"));
        assert!(!has_param(&params, "text"));
    }

    #[tokio::test]
    async fn send_sms_omits_past_schedule() {
        let transport = FakeTransport::new(200, "100\nSM1");
        let client = make_client(None, transport.clone());

        let sms = Sms {
            time: Some(Utc::now() - ChronoDuration::minutes(5)),
            ..Sms::new("79990000000", "Hello")
        };
        client.send_sms(&sms).await.unwrap();

        let (_, params) = transport.last_request();
        assert!(!has_param(&params, "time"));
    }

    #[tokio::test]
    async fn send_sms_keeps_future_schedule() {
        let transport = FakeTransport::new(200, "100\nSM1");
        let client = make_client(None, transport.clone());

        let at = Utc::now() + ChronoDuration::hours(2);
        let sms = Sms {
            time: Some(at),
            ..Sms::new("79990000000", "Hello")
        };
        client.send_sms(&sms).await.unwrap();

        let (_, params) = transport.last_request();
        assert_param(&params, "time", &at.timestamp().to_string());
    }

    #[tokio::test]
    async fn send_sms_maps_error_code_to_api_error() {
        let transport = FakeTransport::new(200, "201");
        let client = make_client(None, transport);

        let err = client
            .send_sms(&Sms::new("79990000000", "Hello"))
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("201"), "{message}");
        assert!(message.contains("Too low balance"), "{message}");
        match err {
            SmsRuError::Api {
                status_code,
                description,
            } => {
                assert_eq!(status_code.as_i64(), 201);
                assert_eq!(description, "Too low balance");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_error_code_has_empty_description() {
        let transport = FakeTransport::new(200, "299\nwhatever");
        let client = make_client(None, transport);

        let err = client
            .send_sms(&Sms::new("79990000000", "Hello"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SmsRuError::Api {
                description: "",
                ..
            }
        ));
        assert_eq!(err.to_string(), "Code: 299; Status: ");
    }

    #[tokio::test]
    async fn out_of_i32_range_code_is_api_error() {
        let transport = FakeTransport::new(200, "3000000000\n");
        let client = make_client(None, transport);

        let err = client
            .send_sms(&Sms::new("79990000000", "Hello"))
            .await
            .unwrap_err();
        match err {
            SmsRuError::Api {
                status_code,
                description,
            } => {
                assert_eq!(status_code.as_i64(), 3_000_000_000);
                assert_eq!(description, "");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn api_id_and_sender_are_sent_as_given() {
        let transport = FakeTransport::new(200, "100\nSM1");
        let client = SmsRuClient {
            api_id: ApiId::new(" key\t").unwrap(),
            ..make_client(Some(" shop "), transport.clone())
        };

        let sms = client.new_sms("79990000000", "Hello");
        client.send_sms(&sms).await.unwrap();

        let (_, params) = transport.last_request();
        assert_param(&params, "api_id", " key\t");
        assert_param(&params, "from", " shop ");
    }

    #[tokio::test]
    async fn empty_body_is_no_response() {
        let transport = FakeTransport::new(200, "");
        let client = make_client(None, transport);

        let err = client
            .send_sms(&Sms::new("79990000000", "Hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, SmsRuError::NoResponse));
    }

    #[tokio::test]
    async fn send_sms_without_id_line_fails() {
        let transport = FakeTransport::new(200, "100");
        let client = make_client(None, transport);

        let err = client
            .send_sms(&Sms::new("79990000000", "Hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, SmsRuError::MissingMessageId));
    }

    #[tokio::test]
    async fn non_numeric_status_line_is_treated_as_success() {
        let transport = FakeTransport::new(200, "OK\nSM9");
        let client = make_client(None, transport);

        let response = client
            .send_sms(&Sms::new("79990000000", "Hello"))
            .await
            .unwrap();
        assert_eq!(response.status_code, StatusCode::new(0));
        assert_eq!(response.status, "");
        assert_eq!(response.id, "SM9");
    }

    #[tokio::test]
    async fn http_status_does_not_decide_outcome() {
        let transport = FakeTransport::new(502, "100\nSM1");
        let client = make_client(None, transport);

        let response = client
            .send_sms(&Sms::new("79990000000", "Hello"))
            .await
            .unwrap();
        assert_eq!(response.id, "SM1");
    }

    #[tokio::test]
    async fn request_failure_maps_to_transport_error() {
        let client = make_client(None, FakeTransport::failing(FakeFailure::Request));

        let err = client
            .send_sms(&Sms::new("79990000000", "Hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, SmsRuError::Transport(_)));
    }

    #[tokio::test]
    async fn body_failure_maps_to_internal_error() {
        let client = make_client(None, FakeTransport::failing(FakeFailure::Body));
        let id = SmsId::new("000000-000001").unwrap();

        let err = client.check_status(&id).await.unwrap_err();
        assert!(matches!(err, SmsRuError::Internal(_)));
    }

    #[tokio::test]
    async fn check_status_uses_status_endpoint_and_echoes_id() {
        let transport = FakeTransport::new(200, "103");
        let client = make_client(Some("shop"), transport.clone());
        let id = SmsId::new("000000-000001").unwrap();

        let response = client.check_status(&id).await.unwrap();
        assert_eq!(response.status, "The message was delivered");
        assert_eq!(response.status_code, StatusCode::new(103));
        assert_eq!(response.id, "000000-000001");
        assert_eq!(response.phone, None);

        let (url, params) = transport.last_request();
        assert_eq!(url.as_deref(), Some("https://example.invalid/sms/status"));
        assert_eq!(
            params,
            vec![
                ("id".to_owned(), "000000-000001".to_owned()),
                ("api_id".to_owned(), "test_key".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn check_status_not_found_is_success() {
        let transport = FakeTransport::new(200, "-1");
        let client = make_client(None, transport);
        let id = SmsId::new("000000-000404").unwrap();

        let response = client.check_status(&id).await.unwrap();
        assert_eq!(response.status, "Not found");
    }

    #[tokio::test]
    async fn check_status_maps_auth_error() {
        let transport = FakeTransport::new(200, "200");
        let client = make_client(None, transport);
        let id = SmsId::new("000000-000001").unwrap();

        let err = client.check_status(&id).await.unwrap_err();
        match err {
            SmsRuError::Api { status_code, .. } => assert!(status_code.is_auth_error()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn builder_base_url_override_is_applied() {
        let client = SmsRuClient::builder(ApiId::new("key").unwrap())
            .base_url("http://localhost:8080/")
            .sender(SenderId::new("shop").unwrap())
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(client.send_endpoint, "http://localhost:8080/sms/send");
        assert_eq!(client.status_endpoint, "http://localhost:8080/sms/status");
        assert_eq!(
            client.new_sms("1", "x").from.as_ref().map(SenderId::as_str),
            Some("shop")
        );

        let client = SmsRuClient::builder(ApiId::new("key").unwrap())
            .base_url("https://proxy.example.invalid/smsru")
            .build()
            .unwrap();
        assert_eq!(
            client.send_endpoint,
            "https://proxy.example.invalid/smsru/sms/send"
        );
    }

    #[test]
    fn builder_rejects_unusable_base_url() {
        for bad in ["sms.ru", "ftp://sms.ru", "https://sms.ru/?x=1"] {
            let result = SmsRuClient::builder(ApiId::new("key").unwrap())
                .base_url(bad)
                .build();
            assert!(
                matches!(result, Err(SmsRuError::InvalidBaseUrl { .. })),
                "{bad} accepted"
            );
        }
    }

    #[test]
    fn new_uses_default_endpoints() {
        let client = SmsRuClient::new(ApiId::new("key").unwrap(), None);
        assert_eq!(client.send_endpoint, "https://sms.ru/sms/send");
        assert_eq!(client.status_endpoint, "https://sms.ru/sms/status");
        assert!(client.new_sms("1", "x").from.is_none());
    }
}
