use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// MSG91 endpoint path, relative to the API base URL.
pub enum Endpoint {
    SendOtp,
    RetryOtp,
    VerifyOtp,
    /// Any other path under the base URL.
    Custom(String),
}

impl Endpoint {
    pub fn path(&self) -> &str {
        match self {
            Self::SendOtp => "sendotp.php",
            Self::RetryOtp => "retryotp.php",
            Self::VerifyOtp => "verifyRequestOTP.php",
            Self::Custom(path) => path,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Clone, PartialEq, Eq)]
/// A single call to the MSG91 API: method, endpoint and parameters.
///
/// Parameters are kept in insertion order and sent verbatim.
pub struct OtpRequest {
    method: Method,
    endpoint: Endpoint,
    params: Vec<(String, String)>,
}

impl OtpRequest {
    pub fn new(method: Method, endpoint: Endpoint) -> Self {
        Self {
            method,
            endpoint,
            params: Vec::new(),
        }
    }

    pub fn get(endpoint: Endpoint) -> Self {
        Self::new(Method::Get, endpoint)
    }

    pub fn post(endpoint: Endpoint) -> Self {
        Self::new(Method::Post, endpoint)
    }

    /// Append a parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// First value for `key`, if present.
    pub fn get_param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub(crate) fn into_parts(self) -> (Method, Endpoint, Vec<(String, String)>) {
        (self.method, self.endpoint, self.params)
    }
}

// Parameter values carry the auth key and OTP; only names are printed.
impl fmt::Debug for OtpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OtpRequest")
            .field("method", &self.method)
            .field("endpoint", &self.endpoint)
            .field(
                "params",
                &self.params.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
