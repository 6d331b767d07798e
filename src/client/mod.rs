//! Client layer: builds requests, dispatches them and delivers the classified outcome.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::domain::{
    AuthKey, Endpoint, MESSAGE_FIELD, MOBILE_FIELD, MessageTemplate, Otp, OtpExpiry, OtpRequest,
    RawResponse, ResponseData, RetryType, SENDER_FIELD, ValidationError,
};
use crate::transport::{Classified, Failure, RequestBody, classify_response, encode_request};

const DEFAULT_BASE_URL: &str = "https://control.msg91.com/api/";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

type BoxError = Box<dyn StdError + Send + Sync>;

trait HttpTransport: Send + Sync {
    fn send<'a>(
        &'a self,
        url: Url,
        body: RequestBody,
    ) -> BoxFuture<'a, Result<RawResponse, BoxError>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(
        &'a self,
        url: Url,
        body: RequestBody,
    ) -> BoxFuture<'a, Result<RawResponse, BoxError>> {
        Box::pin(async move {
            let request = match body {
                RequestBody::Query(params) => self.client.get(url).query(&params),
                RequestBody::Form(params) => self.client.post(url).form(&params),
                RequestBody::Multipart(params) => {
                    let form = params
                        .into_iter()
                        .fold(reqwest::multipart::Form::new(), |form, (key, value)| {
                            form.text(key, value)
                        });
                    self.client.post(url).multipart(form)
                }
            };

            // reqwest errors print the full URL, query string (authkey, otp) included.
            let response = request.send().await.map_err(reqwest::Error::without_url)?;
            let status = response.status();
            let mut url = response.url().clone();
            url.set_query(None);
            let url = url.to_string();
            let body = response.text().await.map_err(reqwest::Error::without_url)?;
            Ok(RawResponse {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_owned(),
                url,
                body,
            })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`OtpClient`].
///
/// The first four variants mirror how MSG91 responses are classified:
/// - no response at all ([`OtpError::Transport`]),
/// - a body that is not JSON ([`OtpError::Parse`]),
/// - a payload with an `errors` field ([`OtpError::Application`]),
/// - a non-2xx status ([`OtpError::HttpStatus`]).
pub enum OtpError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// Response body is neither empty nor valid JSON.
    #[error("JSON parseError with HTTP Status: {status} {status_text}")]
    Parse {
        status: u16,
        status_text: String,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// MSG91 reported errors in the payload.
    ///
    /// Holds the raw content of the `errors` field, usually a list, exactly as received.
    #[error("API returned errors: {0}")]
    Application(Value),

    /// Non-successful HTTP status code with an otherwise valid payload.
    #[error("HTTP Error: {status} {status_text}")]
    HttpStatus { status: u16, status_text: String },

    /// A configuration value was rejected before any request was made.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Transport,
    Parse,
    ApplicationErrors,
    HttpStatus,
    Validation,
}

impl OtpError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Transport,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::Application(_) => ErrorKind::ApplicationErrors,
            Self::HttpStatus { .. } => ErrorKind::HttpStatus,
            Self::Validation(_) => ErrorKind::Validation,
        }
    }

    /// Raw `errors` content for [`OtpError::Application`].
    pub fn application_errors(&self) -> Option<&Value> {
        match self {
            Self::Application(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Callback receiving `(error, data, response)` once a request completes.
pub type Callback = Box<dyn FnOnce(Option<OtpError>, ResponseData, Option<RawResponse>) + Send>;

/// How the outcome of a request is handed back to the caller.
pub enum Completion {
    /// Invoke the callback with `(error, data, response)`.
    Callback(Callback),
    /// Return the outcome: the payload on success, the error value alone otherwise.
    Deferred,
}

impl Completion {
    pub fn callback<F>(callback: F) -> Self
    where
        F: FnOnce(Option<OtpError>, ResponseData, Option<RawResponse>) + Send + 'static,
    {
        Self::Callback(Box::new(callback))
    }
}

enum Exchange {
    Success {
        payload: Value,
        response: RawResponse,
    },
    Failure {
        error: OtpError,
        data: ResponseData,
        response: Option<RawResponse>,
    },
}

impl Exchange {
    fn into_result(self) -> Result<Value, OtpError> {
        match self {
            Self::Success { payload, .. } => Ok(payload),
            Self::Failure { error, .. } => Err(error),
        }
    }

    fn deliver<F>(self, callback: F)
    where
        F: FnOnce(Option<OtpError>, ResponseData, Option<RawResponse>),
    {
        match self {
            Self::Success { payload, response } => {
                callback(None, ResponseData::Json(payload), Some(response))
            }
            Self::Failure {
                error,
                data,
                response,
            } => callback(Some(error), data, response),
        }
    }
}

#[derive(Debug, Clone)]
/// Builder for [`OtpClient`].
///
/// Use this when you need a custom template, timeout, user-agent or base URL.
pub struct OtpClientBuilder {
    auth_key: AuthKey,
    message_template: MessageTemplate,
    otp_expiry: OtpExpiry,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl OtpClientBuilder {
    /// Create a builder with the default template, expiry and MSG91 base URL.
    pub fn new(auth_key: AuthKey) -> Self {
        Self {
            auth_key,
            message_template: MessageTemplate::default(),
            otp_expiry: OtpExpiry::default(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    pub fn message_template(mut self, template: MessageTemplate) -> Self {
        self.message_template = template;
        self
    }

    pub fn otp_expiry(mut self, minutes: u32) -> Self {
        self.otp_expiry = OtpExpiry::minutes(minutes);
        self
    }

    /// Send requests somewhere other than `https://control.msg91.com/api/`
    /// (a local mock server or a proxy).
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

    /// Build an [`OtpClient`].
    pub fn build(self) -> Result<OtpClient, OtpError> {
        let base_url = normalize_base_url(&self.base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| OtpError::Transport(Box::new(err)))?;

        Ok(OtpClient {
            auth_key: self.auth_key,
            message_template: self.message_template,
            otp_expiry: self.otp_expiry,
            base_url,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// MSG91 SendOTP client.
///
/// Every operation comes in two flavours that share one executor:
/// - `send`/`retry`/`verify`/`execute` resolve to the parsed payload or the error,
/// - `send_with`/`retry_with`/`verify_with`/`execute_with` hand
///   `(error, data, response)` to a callback instead.
///
/// ```rust,no_run
/// use sendotp::{AuthKey, OtpClient};
///
/// # async fn run() -> Result<(), sendotp::OtpError> {
/// let client = OtpClient::new(AuthKey::new("...")?);
/// let _sent = client.send("919999999999", "OTPSMS", None).await?;
/// let _checked = client.verify("919999999999", "4321").await?;
/// # Ok(())
/// # }
/// ```
pub struct OtpClient {
    auth_key: AuthKey,
    message_template: MessageTemplate,
    otp_expiry: OtpExpiry,
    base_url: String,
    http: Arc<dyn HttpTransport>,
}

impl OtpClient {
    /// Create a client with the default message template and a one-day expiry.
    pub fn new(auth_key: AuthKey) -> Self {
        Self::with_template(auth_key, MessageTemplate::default())
    }

    /// Create a client with a custom message template.
    pub fn with_template(auth_key: AuthKey, message_template: MessageTemplate) -> Self {
        Self {
            auth_key,
            message_template,
            otp_expiry: OtpExpiry::default(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(auth_key: AuthKey) -> OtpClientBuilder {
        OtpClientBuilder::new(auth_key)
    }

    pub fn auth_key(&self) -> &AuthKey {
        &self.auth_key
    }

    pub fn message_template(&self) -> &MessageTemplate {
        &self.message_template
    }

    pub fn otp_expiry(&self) -> u32 {
        self.otp_expiry.value()
    }

    /// Change the expiry sent with subsequent [`OtpClient::send`] calls. Not range-checked.
    pub fn set_otp_expiry(&mut self, minutes: u32) {
        self.otp_expiry = OtpExpiry::minutes(minutes);
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Random 4-digit OTP; see [`Otp::generate`].
    pub fn generate_otp() -> Otp {
        Otp::generate()
    }

    /// Build the `sendotp.php` request, generating an OTP when none is given.
    pub fn send_request(
        &self,
        contact_number: &str,
        sender_id: &str,
        otp: Option<Otp>,
    ) -> OtpRequest {
        let otp = otp.unwrap_or_else(Otp::generate);
        OtpRequest::get(Endpoint::SendOtp)
            .param(AuthKey::FIELD, self.auth_key.as_str())
            .param(MOBILE_FIELD, contact_number)
            .param(SENDER_FIELD, sender_id)
            .param(MESSAGE_FIELD, self.message_template.render(&otp))
            .param(Otp::FIELD, otp.as_str())
            .param(OtpExpiry::FIELD, self.otp_expiry.value().to_string())
    }

    /// Build the `retryotp.php` request. `None` retries by voice.
    pub fn retry_request(&self, contact_number: &str, retry_voice: Option<bool>) -> OtpRequest {
        let retry_type = retry_voice.map(RetryType::from_voice).unwrap_or_default();
        OtpRequest::get(Endpoint::RetryOtp)
            .param(AuthKey::FIELD, self.auth_key.as_str())
            .param(MOBILE_FIELD, contact_number)
            .param(RetryType::FIELD, retry_type.as_str())
    }

    /// Build the `verifyRequestOTP.php` request.
    pub fn verify_request(&self, contact_number: &str, otp: impl Into<Otp>) -> OtpRequest {
        let otp = otp.into();
        OtpRequest::get(Endpoint::VerifyOtp)
            .param(AuthKey::FIELD, self.auth_key.as_str())
            .param(MOBILE_FIELD, contact_number)
            .param(Otp::FIELD, otp.as_str())
    }

    /// Send an OTP to `contact_number` (country code included).
    ///
    /// When `otp` is `None` a random one is generated. Resolves with the MSG91 payload.
    pub async fn send(
        &self,
        contact_number: &str,
        sender_id: &str,
        otp: Option<Otp>,
    ) -> Result<Value, OtpError> {
        self.execute(self.send_request(contact_number, sender_id, otp))
            .await
    }

    /// Callback flavour of [`OtpClient::send`].
    pub async fn send_with<F>(
        &self,
        contact_number: &str,
        sender_id: &str,
        otp: Option<Otp>,
        callback: F,
    ) where
        F: FnOnce(Option<OtpError>, ResponseData, Option<RawResponse>),
    {
        self.execute_with(self.send_request(contact_number, sender_id, otp), callback)
            .await;
    }

    /// Ask MSG91 to resend the pending OTP, by voice call (`Some(true)` or `None`)
    /// or by text (`Some(false)`).
    pub async fn retry(
        &self,
        contact_number: &str,
        retry_voice: Option<bool>,
    ) -> Result<Value, OtpError> {
        self.execute(self.retry_request(contact_number, retry_voice)).await
    }

    /// Callback flavour of [`OtpClient::retry`].
    pub async fn retry_with<F>(&self, contact_number: &str, retry_voice: Option<bool>, callback: F)
    where
        F: FnOnce(Option<OtpError>, ResponseData, Option<RawResponse>),
    {
        self.execute_with(self.retry_request(contact_number, retry_voice), callback)
            .await;
    }

    /// Check an OTP submitted by the user.
    ///
    /// A wrong OTP is usually reported by MSG91 as a 200 payload with `"type": "error"`,
    /// which resolves successfully; inspect it with [`crate::OtpResponse`].
    pub async fn verify(
        &self,
        contact_number: &str,
        otp: impl Into<Otp>,
    ) -> Result<Value, OtpError> {
        self.execute(self.verify_request(contact_number, otp)).await
    }

    /// Callback flavour of [`OtpClient::verify`].
    pub async fn verify_with<F>(&self, contact_number: &str, otp: impl Into<Otp>, callback: F)
    where
        F: FnOnce(Option<OtpError>, ResponseData, Option<RawResponse>),
    {
        self.execute_with(self.verify_request(contact_number, otp), callback)
            .await;
    }

    /// Dispatch an arbitrary request and resolve with the parsed payload.
    ///
    /// The raw response is not exposed here; use [`OtpClient::execute_with`] for it.
    pub async fn execute(&self, request: OtpRequest) -> Result<Value, OtpError> {
        self.exchange(request).await.into_result()
    }

    /// Dispatch an arbitrary request and pass `(error, data, response)` to `callback`.
    ///
    /// `callback` runs exactly once.
    pub async fn execute_with<F>(&self, request: OtpRequest, callback: F)
    where
        F: FnOnce(Option<OtpError>, ResponseData, Option<RawResponse>),
    {
        self.exchange(request).await.deliver(callback);
    }

    /// Dispatch `request` using the given completion strategy.
    ///
    /// Returns `None` once a callback has been invoked, or the outcome in deferred mode.
    pub async fn complete(
        &self,
        request: OtpRequest,
        completion: Completion,
    ) -> Option<Result<Value, OtpError>> {
        match completion {
            Completion::Callback(callback) => {
                self.execute_with(request, callback).await;
                None
            }
            Completion::Deferred => Some(self.execute(request).await),
        }
    }

    async fn exchange(&self, request: OtpRequest) -> Exchange {
        let (method, endpoint, params) = request.into_parts();

        let url = match endpoint_url(&self.base_url, &endpoint) {
            Ok(url) => url,
            Err(err) => {
                return Exchange::Failure {
                    error: OtpError::Validation(err),
                    data: ResponseData::None,
                    response: None,
                };
            }
        };

        debug!(%method, %endpoint, "dispatching MSG91 request");
        let response = match self.http.send(url, encode_request(method, params)).await {
            Ok(response) => response,
            Err(err) => {
                warn!(%method, %endpoint, error = %err, "MSG91 request failed");
                return Exchange::Failure {
                    error: OtpError::Transport(err),
                    data: ResponseData::None,
                    response: None,
                };
            }
        };

        match classify_response(response.status, &response.body) {
            Classified::Success(payload) => {
                debug!(%endpoint, status = response.status, "MSG91 request succeeded");
                Exchange::Success { payload, response }
            }
            Classified::Failure { failure, data } => {
                let error = match failure {
                    Failure::Parse(source) => OtpError::Parse {
                        status: response.status,
                        status_text: response.status_text.clone(),
                        body: response.body.clone(),
                        source,
                    },
                    Failure::Application(errors) => OtpError::Application(errors),
                    Failure::HttpStatus => OtpError::HttpStatus {
                        status: response.status,
                        status_text: response.status_text.clone(),
                    },
                };
                debug!(
                    %endpoint,
                    status = response.status,
                    kind = ?error.kind(),
                    "MSG91 request rejected"
                );
                Exchange::Failure {
                    error,
                    data,
                    response: Some(response),
                }
            }
        }
    }
}

fn endpoint_url(base_url: &str, endpoint: &Endpoint) -> Result<Url, ValidationError> {
    Url::parse(base_url)
        .and_then(|base| base.join(endpoint.path()))
        .map_err(|_| ValidationError::InvalidEndpoint {
            path: endpoint.path().to_owned(),
        })
}

fn normalize_base_url(raw: &str) -> Result<String, ValidationError> {
    let mut raw = raw.trim().to_owned();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    match Url::parse(&raw) {
        Ok(url) if !url.cannot_be_a_base() => Ok(url.into()),
        _ => Err(ValidationError::InvalidBaseUrl { input: raw }),
    }
}
