use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidBaseUrl { input: String },
    InvalidEndpoint { path: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidBaseUrl { input } => write!(f, "invalid base url: {input}"),
            Self::InvalidEndpoint { path } => write!(f, "invalid endpoint path: {path}"),
        }
    }
}

impl std::error::Error for ValidationError {}
