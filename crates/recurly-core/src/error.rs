use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_client::HttpError;
use crate::xml::{XmlElement, XmlError};

/// Client-side precondition failures, raised before any request is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field '{field}' is required")]
    Required { field: &'static str },
    #[error("field '{field}' length {len} exceeds max {max}")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
    #[error("field '{field}' contains invalid character '{ch}' at index {index}")]
    InvalidChar {
        field: &'static str,
        ch: char,
        index: usize,
    },
    #[error("field '{field}' value {value} is out of range: {reason}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        reason: &'static str,
    },
    #[error("field '{field}' needs at least one entry")]
    Empty { field: &'static str },

    #[error("page size {value} must be between 1 and {max}")]
    InvalidPageSize { value: u32, max: u32 },

    #[error("field '{field}' must be in the future")]
    NotInFuture { field: &'static str },
    #[error("'{later}' cannot be before '{earlier}'")]
    DateOrder {
        earlier: &'static str,
        later: &'static str,
    },
    #[error("timestamp must be RFC3339: '{value}'")]
    InvalidTimestamp { value: String },

    #[error("currency must be a 3-letter uppercase ISO code: '{value}'")]
    InvalidCurrency { value: String },

    #[error("missing configuration value '{name}'")]
    MissingConfig { name: &'static str },
}

/// One `<error>` entry returned by Recurly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub symbol: String,
    pub description: String,
    pub field: Option<String>,
}

impl ApiError {
    fn from_element(element: &XmlElement) -> Self {
        // Two shapes: child elements, or attributes with the description as text.
        let symbol = element
            .child_string("symbol")
            .or_else(|| element.attr("symbol").map(str::to_owned))
            .unwrap_or_default();
        let description = element
            .child_string("description")
            .or_else(|| element.value().map(str::to_owned))
            .unwrap_or_default();
        let field = element
            .child_string("field")
            .or_else(|| element.attr("field").map(str::to_owned));

        Self {
            symbol,
            description,
            field,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{} {} ({})", field, self.description, self.symbol),
            None => write!(f, "{} ({})", self.description, self.symbol),
        }
    }
}

/// Gateway decline details attached to a failed payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionError {
    pub code: String,
    pub category: Option<String>,
    pub merchant_message: Option<String>,
    pub customer_message: Option<String>,
}

impl TransactionError {
    pub(crate) fn from_element(element: &XmlElement) -> Self {
        Self {
            code: element.child_string("error_code").unwrap_or_default(),
            category: element.child_string("error_category"),
            merchant_message: element.child_string("merchant_message"),
            customer_message: element.child_string("customer_message"),
        }
    }
}

/// Top-level error type for client operations.
#[derive(Debug, Error)]
pub enum RecurlyError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{message}")]
    NotFound {
        message: String,
        errors: Vec<ApiError>,
    },
    #[error("The API credentials for Recurly are invalid. Please check the credentials and try again.")]
    InvalidCredentials { errors: Vec<ApiError> },
    #[error("Recurly rejected the request: {}", summarize(.errors))]
    Rejected {
        errors: Vec<ApiError>,
        transaction_error: Option<TransactionError>,
    },
    #[error("Recurly is temporarily unavailable. Please try again.")]
    TemporarilyUnavailable,
    #[error("Recurly experienced an internal server error: {}", summarize(.errors))]
    Server { errors: Vec<ApiError> },
    #[error("Recurly returned unexpected status {status}: {}", summarize(.errors))]
    UnexpectedStatus { status: u16, errors: Vec<ApiError> },

    #[error("transport error: {0}")]
    Transport(#[from] HttpError),
    #[error(transparent)]
    Xml(#[from] XmlError),
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

const NOT_FOUND_MESSAGE: &str = "The requested object was not found.";

impl RecurlyError {
    /// Map a non-success status and its body to the matching error.
    pub fn from_status(status: u16, body: &str) -> Self {
        let (errors, transaction_error) = parse_error_body(body);

        match status {
            404 => Self::NotFound {
                message: errors
                    .first()
                    .map(|error| error.description.clone())
                    .filter(|message| !message.is_empty())
                    .unwrap_or_else(|| String::from(NOT_FOUND_MESSAGE)),
                errors,
            },
            401 | 403 => Self::InvalidCredentials { errors },
            412 | 422 => Self::Rejected {
                errors,
                transaction_error,
            },
            503 => Self::TemporarilyUnavailable,
            500 => Self::Server { errors },
            other => Self::UnexpectedStatus {
                status: other,
                errors,
            },
        }
    }

    pub fn errors(&self) -> &[ApiError] {
        match self {
            Self::NotFound { errors, .. }
            | Self::InvalidCredentials { errors }
            | Self::Rejected { errors, .. }
            | Self::Server { errors }
            | Self::UnexpectedStatus { errors, .. } => errors,
            _ => &[],
        }
    }

    pub fn transaction_error(&self) -> Option<&TransactionError> {
        match self {
            Self::Rejected {
                transaction_error, ..
            } => transaction_error.as_ref(),
            _ => None,
        }
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub const fn retryable(&self) -> bool {
        match self {
            Self::TemporarilyUnavailable => true,
            Self::Transport(error) => error.retryable(),
            _ => false,
        }
    }
}

fn summarize(errors: &[ApiError]) -> String {
    if errors.is_empty() {
        return String::from("no details");
    }
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Unparseable bodies yield no details rather than a second failure.
fn parse_error_body(body: &str) -> (Vec<ApiError>, Option<TransactionError>) {
    if body.trim().is_empty() {
        return (Vec::new(), None);
    }

    let root = match XmlElement::parse(body) {
        Ok(root) => root,
        Err(error) => {
            tracing::debug!(%error, "error body is not XML");
            return (Vec::new(), None);
        }
    };

    match root.name() {
        "error" => (vec![ApiError::from_element(&root)], None),
        "errors" => {
            let errors = root
                .children_named("error")
                .map(ApiError::from_element)
                .collect();
            let transaction_error = root
                .child("transaction_error")
                .map(TransactionError::from_element);
            (errors, transaction_error)
        }
        _ => (Vec::new(), None),
    }
}
