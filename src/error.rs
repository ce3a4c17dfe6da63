use thiserror::Error;

/// Failure kinds surfaced by the outbound services (forecast provider,
/// advice generator), mapped from HTTP status or transport errors at the
/// client edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    Auth,
    NotFound,
    RateLimited,
    Timeout,
    Server,
    Unknown,
}

impl ProviderErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderErrorKind::Auth => "auth",
            ProviderErrorKind::NotFound => "not-found",
            ProviderErrorKind::RateLimited => "rate-limited",
            ProviderErrorKind::Timeout => "timeout",
            ProviderErrorKind::Server => "server",
            ProviderErrorKind::Unknown => "unknown",
        }
    }
}

#[derive(Error, Debug)]
#[error("{service}: {} error: {message}", .kind.as_str())]
pub struct ProviderError {
    pub service: &'static str,
    pub kind: ProviderErrorKind,
    pub message: String,
}

impl ProviderError {
    pub fn new(service: &'static str, kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            service,
            kind,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ShambaOpsError {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Unsupported crop: {0}")]
    UnsupportedCrop(String),

    #[error("Invalid parameter '{field}': {message}")]
    InvalidParameter {
        field: &'static str,
        message: String,
    },

    #[error("Invalid forecast data: {0}")]
    InvalidForecastData(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Generator response contains no structured payload")]
    NoStructuredPayload,

    #[error("Malformed generator payload: {0}")]
    MalformedPayload(String),

    #[error("Incomplete generator response, missing fields: {}", .fields.join(", "))]
    IncompleteResponse { fields: Vec<String> },

    #[error("Unknown crop: {0}")]
    UnknownCrop(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShambaOpsError>;
