//! Method dispatch onto file operations
//!
//! | Method | Operation                           |
//! |--------|-------------------------------------|
//! | GET    | read the file                       |
//! | POST   | append the body to an existing file |
//! | PUT    | create or overwrite with the body   |
//! | DELETE | remove the file                     |

use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::timeout;

use crate::error::RequestError;
use crate::http::mime::MimeType;
use crate::http::request::{Method, Request};
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::resource::store::ResourceStore;

/// Content types accepted for POST and PUT bodies.
const WRITABLE_TYPES: [MimeType; 1] = [MimeType::TextPlain];

/// Default cap on request bodies.
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Default time to wait for request bytes.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);

type HandlerResult<T> = Result<T, RequestError>;

/// Turns parsed requests into file operations and responses.
#[derive(Debug, Clone)]
pub struct FileHandler {
    store: ResourceStore,
    max_body_bytes: usize,
    read_timeout: Duration,
}

impl FileHandler {
    pub fn new(store: ResourceStore) -> Self {
        Self {
            store,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Handle one request. `body` yields the bytes following the head and
    /// is only read for POST and PUT, after their headers are validated.
    pub async fn handle<R>(&self, request: &Request, body: &mut R) -> Response
    where
        R: AsyncRead + Unpin,
    {
        let result = match request.method {
            Method::Get => self.handle_get(request).await,
            Method::Post => self.handle_post(request, body).await,
            Method::Put => self.handle_put(request, body).await,
            Method::Delete => self.handle_delete(request).await,
        };

        match result {
            Ok(response) => {
                tracing::info!(
                    method = %request.method,
                    path = %request.path,
                    status = response.status.as_u16(),
                    "Request handled"
                );
                response
            }
            Err(e) => {
                let status = e.status();
                if status == StatusCode::InternalServerError {
                    tracing::error!(
                        method = %request.method,
                        path = %request.path,
                        error = %e,
                        "Request failed"
                    );
                } else {
                    tracing::warn!(
                        method = %request.method,
                        path = %request.path,
                        status = status.as_u16(),
                        error = %e,
                        "Request rejected"
                    );
                }
                e.into_response()
            }
        }
    }

    async fn handle_get(&self, request: &Request) -> HandlerResult<Response> {
        let path = self.store.resolve(&request.path)?;

        let unsupported = || RequestError::UnsupportedMediaType {
            method: Method::Get,
            content_type: request.content_type().map(str::to_string),
        };

        let mime = MimeType::from_path(&path).ok_or_else(unsupported)?;

        // A declared type must agree with the extension
        if let Some(declared) = request.content_type() {
            if MimeType::from_type_str(declared) != Some(mime) {
                return Err(unsupported());
            }
        }

        let content = self.store.read(&path).await?;
        if content.is_empty() {
            return Err(RequestError::EmptyResource);
        }

        Ok(ResponseBuilder::new(StatusCode::Ok)
            .mime(mime)
            .body(content)
            .build())
    }

    async fn handle_post<R>(&self, request: &Request, body: &mut R) -> HandlerResult<Response>
    where
        R: AsyncRead + Unpin,
    {
        self.require_writable_type(request)?;
        let path = self.store.resolve(&request.path)?;
        let content = self.read_body(request, body).await?;

        self.store.append(&path, &content).await?;

        Ok(Response::ok("Successfully posted"))
    }

    async fn handle_put<R>(&self, request: &Request, body: &mut R) -> HandlerResult<Response>
    where
        R: AsyncRead + Unpin,
    {
        self.require_writable_type(request)?;
        let path = self.store.resolve(&request.path)?;
        let content = self.read_body(request, body).await?;

        self.store.overwrite(&path, &content).await?;

        Ok(Response::ok("Successfully put"))
    }

    async fn handle_delete(&self, request: &Request) -> HandlerResult<Response> {
        let path = self.store.resolve(&request.path)?;

        self.store.delete(&path).await?;

        Ok(Response::ok("Successfully deleted"))
    }

    fn require_writable_type(&self, request: &Request) -> HandlerResult<()> {
        let declared = request.content_type().and_then(MimeType::from_type_str);

        match declared {
            Some(mime) if WRITABLE_TYPES.contains(&mime) => Ok(()),
            _ => Err(RequestError::UnsupportedMediaType {
                method: request.method,
                content_type: request.content_type().map(str::to_string),
            }),
        }
    }

    /// Read exactly `content_length` bytes in one bounded read.
    async fn read_body<R>(&self, request: &Request, body: &mut R) -> HandlerResult<Vec<u8>>
    where
        R: AsyncRead + Unpin,
    {
        let length = request
            .content_length
            .ok_or(RequestError::MalformedHeaders("missing Content-Length"))?;

        if length > self.max_body_bytes {
            return Err(RequestError::BodyTooLarge {
                length,
                limit: self.max_body_bytes,
            });
        }

        let mut buf = vec![0u8; length];

        let outcome = timeout(self.read_timeout, body.read_exact(&mut buf)).await;

        match outcome {
            Ok(Ok(_)) => Ok(buf),
            Ok(Err(e)) => {
                tracing::debug!(error = %e, expected = length, "Body read failed");
                Err(RequestError::IncompleteBody { expected: length })
            }
            Err(_) => {
                tracing::debug!(expected = length, "Body read timed out");
                Err(RequestError::IncompleteBody { expected: length })
            }
        }
    }
}
