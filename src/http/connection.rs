use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

use crate::error::RequestError;
use crate::http::parser::{parse_request_head, ParseError, DEFAULT_MAX_HEAD_BYTES};
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;
use crate::resource::handler::{FileHandler, DEFAULT_READ_TIMEOUT};

/// Limits applied while reading from a client.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionLimits {
    pub max_head_bytes: usize,
    pub read_timeout: Duration,
}

impl Default for ConnectionLimits {
    fn default() -> Self {
        Self {
            max_head_bytes: DEFAULT_MAX_HEAD_BYTES,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

/// Serves exactly one request on a stream, then closes it.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    handler: Arc<FileHandler>,
    limits: ConnectionLimits,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

enum ReadOutcome {
    Request(Request),
    Rejected(RequestError),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, handler: Arc<FileHandler>, limits: ConnectionLimits) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(4096),
            handler,
            limits,
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            self.state = match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => match self.read_request().await? {
                    ReadOutcome::Request(req) => ConnectionState::Processing(req),
                    ReadOutcome::Rejected(e) => {
                        tracing::warn!(error = %e, status = e.status().as_u16(), "Rejected request");
                        ConnectionState::Writing(ResponseWriter::new(&e.into_response()))
                    }
                    ReadOutcome::Closed => ConnectionState::Closed,
                },

                ConnectionState::Processing(req) => {
                    // Body bytes that arrived with the head come first
                    let leftover = self.buffer.split().freeze();
                    let mut body = AsyncReadExt::chain(Cursor::new(leftover), &mut self.stream);

                    let response = self.handler.handle(&req, &mut body).await;
                    ConnectionState::Writing(ResponseWriter::new(&response))
                }

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    if let Err(e) = self.stream.shutdown().await {
                        tracing::debug!(error = %e, "Shutdown after response failed");
                    }
                    ConnectionState::Closed
                }

                ConnectionState::Closed => break,
            };
        }

        Ok(())
    }

    async fn read_request(&mut self) -> anyhow::Result<ReadOutcome> {
        loop {
            // Try parsing whatever we already have
            match parse_request_head(&self.buffer, self.limits.max_head_bytes) {
                Ok((request, consumed)) => {
                    self.buffer.advance(consumed);
                    return Ok(ReadOutcome::Request(request));
                }

                Err(ParseError::Incomplete) => {
                    // Need more data
                }

                Err(e) => {
                    return Ok(ReadOutcome::Rejected(e.into()));
                }
            }

            self.buffer.reserve(1024);
            let n = match timeout(self.limits.read_timeout, self.stream.read_buf(&mut self.buffer)).await {
                Ok(read) => read?,
                Err(_) => {
                    tracing::debug!(buffered = self.buffer.len(), "Timed out waiting for request head");
                    return Ok(ReadOutcome::Closed);
                }
            };

            if n == 0 {
                // Client closed the connection
                if self.buffer.is_empty() {
                    return Ok(ReadOutcome::Closed);
                }
                return Ok(ReadOutcome::Rejected(ParseError::Incomplete.into()));
            }
        }
    }
}
