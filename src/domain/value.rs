use std::fmt;

use rand::Rng;

use crate::domain::validation::ValidationError;

#[derive(Clone, PartialEq, Eq, Hash)]
/// MSG91 authentication key (`authkey`).
///
/// Invariant: not blank. Stored and sent exactly as given.
pub struct AuthKey(String);

impl AuthKey {
    /// Query/form field name used by MSG91 (`authkey`).
    pub const FIELD: &'static str = "authkey";

    /// Create a validated [`AuthKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keeps the key out of logs and panic messages.
impl fmt::Debug for AuthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthKey(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Message sent to the recipient, with a `{{otp}}` placeholder for the code.
///
/// Any string is accepted. A template without the placeholder is sent as-is.
pub struct MessageTemplate(String);

impl MessageTemplate {
    /// Substring replaced by the OTP when rendering.
    pub const PLACEHOLDER: &'static str = "{{otp}}";

    /// Template used when the caller does not provide one.
    pub const DEFAULT: &'static str = "Your otp is {{otp}}. Please do not share it with anybody";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Replace the first placeholder occurrence with `otp`.
    pub fn render(&self, otp: &Otp) -> String {
        self.0.replacen(Self::PLACEHOLDER, otp.as_str(), 1)
    }
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// One-time password as sent on the wire (`otp`).
///
/// Caller-supplied values are forwarded verbatim; MSG91 decides whether they are acceptable.
pub struct Otp(String);

impl Otp {
    /// Query field name used by MSG91 (`otp`).
    pub const FIELD: &'static str = "otp";

    /// Smallest generated OTP.
    pub const MIN: u32 = 1000;
    /// Largest generated OTP.
    pub const MAX: u32 = 9999;

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Uniformly random 4-digit OTP in [`Otp::MIN`]`..=`[`Otp::MAX`].
    pub fn generate() -> Self {
        Self::from(rand::rng().random_range(Self::MIN..=Self::MAX))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u32> for Otp {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for Otp {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Otp {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Otp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// OTP lifetime in minutes (`otp_expiry`). Not range-checked.
pub struct OtpExpiry(u32);

impl OtpExpiry {
    /// Query field name used by MSG91 (`otp_expiry`).
    pub const FIELD: &'static str = "otp_expiry";

    /// One day.
    pub const DEFAULT_MINUTES: u32 = 1440;

    pub fn minutes(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for OtpExpiry {
    fn default() -> Self {
        Self(Self::DEFAULT_MINUTES)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Channel used by `retryotp.php` (`retrytype`).
pub enum RetryType {
    #[default]
    Voice,
    Text,
}

impl RetryType {
    /// Query field name used by MSG91 (`retrytype`).
    pub const FIELD: &'static str = "retrytype";

    pub fn from_voice(voice: bool) -> Self {
        if voice { Self::Voice } else { Self::Text }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Voice => "voice",
            Self::Text => "text",
        }
    }
}

/// Recipient number field (`mobile`), country code included, not validated.
pub const MOBILE_FIELD: &str = "mobile";

/// Sender id field (`sender`), not validated.
pub const SENDER_FIELD: &str = "sender";

/// Rendered message field (`message`).
pub const MESSAGE_FIELD: &str = "message";
