use crate::http::mime::MimeType;

/// HTTP status codes the server emits.
///
/// - `Ok` (200): Request successful
/// - `BadRequest` (400): Malformed request, bad content type or path
/// - `NotFound` (404): Resource not found
/// - `MethodNotAllowed` (405): HTTP method not supported
/// - `InternalServerError` (500): Filesystem failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use fileserve::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// A complete HTTP response ready to be sent to a client.
///
/// The wire `Content-Length` is always derived from `body`, so it cannot
/// disagree with what is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Sent as the `Content-Type` header
    pub mime: MimeType,
    /// Response body as bytes
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .mime(MimeType::TextHtml)
///     .body(b"<p>hi</p>".to_vec())
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    mime: MimeType,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a builder with the given status, `text/plain` and no body.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            mime: MimeType::TextPlain,
            body: Vec::new(),
        }
    }

    pub fn mime(mut self, mime: MimeType) -> Self {
        self.mime = mime;
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            mime: self.mime,
            body: self.body,
        }
    }
}

impl Response {
    /// Creates a plain-text response with the given status and message.
    pub fn text(status: StatusCode, message: impl Into<String>) -> Self {
        ResponseBuilder::new(status)
            .body(message.into().into_bytes())
            .build()
    }

    /// Creates a 200 OK plain-text confirmation.
    pub fn ok(message: impl Into<String>) -> Self {
        Self::text(StatusCode::Ok, message)
    }

    /// Creates a 404 Not Found response.
    pub fn not_found() -> Self {
        Self::text(StatusCode::NotFound, "Not Exists")
    }

    /// Creates a 500 Internal Server Error response.
    pub fn internal_error() -> Self {
        Self::text(StatusCode::InternalServerError, "Internal Server Error")
    }

    /// Length advertised in the `Content-Length` header.
    pub fn content_length(&self) -> usize {
        self.body.len()
    }
}
