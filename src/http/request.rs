use std::collections::HashMap;

use crate::http::parser::parse_content_length;

/// HTTP request methods the server understands.
///
/// Each method maps onto one file operation. Any other verb on the
/// request line is rejected by the parser with 405 Method Not Allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Read a resource
    Get,
    /// POST - Append to a resource
    Post,
    /// PUT - Create or overwrite a resource
    Put,
    /// DELETE - Remove a resource
    Delete,
}

/// Header fields the parser keeps. Every other header is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderName {
    ContentType,
    ContentLength,
}

/// Represents a parsed HTTP request head.
///
/// The body is not part of the request: it stays on the connection and is
/// read by the handler once the head has been validated.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method
    pub method: Method,
    /// The request path, verbatim from the request line (e.g. "/notes.txt")
    pub path: String,
    /// Recognized headers
    pub headers: HashMap<HeaderName, String>,
    /// Declared body length, if the Content-Length header parsed
    pub content_length: Option<usize>,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    path: Option<String>,
    headers: HashMap<HeaderName, String>,
}

impl Method {
    /// Parses an HTTP method from a request-line token.
    ///
    /// Matching ignores ASCII case.
    ///
    /// # Example
    ///
    /// ```
    /// # use fileserve::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Some(Method::Get));
    /// assert_eq!(Method::from_token("put"), Some(Method::Put));
    /// assert_eq!(Method::from_token("PATCH"), None);
    /// ```
    pub fn from_token(s: &str) -> Option<Self> {
        [Method::Get, Method::Post, Method::Put, Method::Delete]
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// Whether the method carries a declared-length body.
    pub fn has_body(&self) -> bool {
        matches!(self, Method::Post | Method::Put)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl HeaderName {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderName::ContentType => "Content-Type",
            HeaderName::ContentLength => "Content-Length",
        }
    }

    /// Matches a header field name, ignoring ASCII case.
    pub fn from_field(s: &str) -> Option<Self> {
        [HeaderName::ContentType, HeaderName::ContentLength]
            .into_iter()
            .find(|h| h.as_str().eq_ignore_ascii_case(s))
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            path: None,
            headers: HashMap::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn header(mut self, name: HeaderName, value: impl Into<String>) -> Self {
        self.headers.insert(name, value.into());
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        let content_length = self
            .headers
            .get(&HeaderName::ContentLength)
            .and_then(|v| parse_content_length(v.trim()));

        Ok(Request {
            method: self.method.ok_or("method missing")?,
            path: self.path.ok_or("path missing")?,
            headers: self.headers,
            content_length,
        })
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    /// Retrieves a recognized header value.
    pub fn header(&self, name: HeaderName) -> Option<&str> {
        self.headers.get(&name).map(|v| v.as_str())
    }

    /// The declared Content-Type, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.header(HeaderName::ContentType)
    }
}
