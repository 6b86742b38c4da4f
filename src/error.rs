//! Per-request failures and their HTTP mapping.
//!
//! Every variant becomes a short plain-text response. Internal detail
//! (I/O error text, offending header values) goes to the log only.

use crate::http::parser::ParseError;
use crate::http::request::Method;
use crate::http::response::{Response, StatusCode};
use crate::resource::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("unsupported method {0:?}")]
    MalformedMethod(String),

    #[error("malformed request line")]
    MalformedRequestLine,

    #[error("malformed headers: {0}")]
    MalformedHeaders(&'static str),

    #[error("request body ended before {expected} bytes arrived")]
    IncompleteBody { expected: usize },

    #[error("request body of {length} bytes exceeds limit of {limit}")]
    BodyTooLarge { length: usize, limit: usize },

    #[error("unsupported content type {content_type:?} for {method}")]
    UnsupportedMediaType {
        method: Method,
        content_type: Option<String>,
    },

    #[error("invalid resource path {0:?}")]
    InvalidPath(String),

    #[error("resource is empty")]
    EmptyResource,

    #[error("resource not found")]
    ResourceNotFound,

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

impl RequestError {
    pub fn status(&self) -> StatusCode {
        match self {
            RequestError::MalformedMethod(_) => StatusCode::MethodNotAllowed,
            RequestError::MalformedRequestLine
            | RequestError::MalformedHeaders(_)
            | RequestError::IncompleteBody { .. }
            | RequestError::BodyTooLarge { .. }
            | RequestError::UnsupportedMediaType { .. }
            | RequestError::InvalidPath(_)
            | RequestError::EmptyResource => StatusCode::BadRequest,
            RequestError::ResourceNotFound => StatusCode::NotFound,
            RequestError::Io(_) => StatusCode::InternalServerError,
        }
    }

    /// Message sent to the client.
    pub fn client_message(&self) -> String {
        match self {
            RequestError::MalformedMethod(_) => "Method Not Allowed".to_string(),
            RequestError::MalformedRequestLine => "Malformed request line".to_string(),
            RequestError::MalformedHeaders(_) => "Malformed headers".to_string(),
            RequestError::IncompleteBody { .. } => "Incomplete request body".to_string(),
            RequestError::BodyTooLarge { .. } => "Request body too large".to_string(),
            RequestError::UnsupportedMediaType { method, .. } => {
                format!("Unsupported MIME type for {} Request", method_title(*method))
            }
            RequestError::InvalidPath(_) => "Invalid resource path".to_string(),
            RequestError::EmptyResource => "Unable to find indicated file".to_string(),
            RequestError::ResourceNotFound => "Not Exists".to_string(),
            RequestError::Io(_) => "Internal Server Error".to_string(),
        }
    }

    pub fn into_response(self) -> Response {
        match self {
            RequestError::ResourceNotFound => Response::not_found(),
            RequestError::Io(_) => Response::internal_error(),
            other => Response::text(other.status(), other.client_message()),
        }
    }
}

fn method_title(method: Method) -> &'static str {
    match method {
        Method::Get => "Get",
        Method::Post => "Post",
        Method::Put => "Put",
        Method::Delete => "Delete",
    }
}

impl From<ParseError> for RequestError {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::MalformedMethod(token) => RequestError::MalformedMethod(token),
            ParseError::MalformedRequestLine => RequestError::MalformedRequestLine,
            ParseError::MalformedHeaders(reason) => RequestError::MalformedHeaders(reason),
            // The connection only surfaces Incomplete once the peer has
            // stopped sending, so the head never finished.
            ParseError::Incomplete => RequestError::MalformedHeaders("incomplete request head"),
        }
    }
}

impl From<StoreError> for RequestError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => RequestError::ResourceNotFound,
            StoreError::InvalidPath(path) => RequestError::InvalidPath(path),
            StoreError::Io(err) => RequestError::Io(err),
        }
    }
}
