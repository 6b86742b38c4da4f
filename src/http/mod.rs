//! HTTP protocol implementation.
//!
//! A small HTTP/1.1 server side: one request per connection, no keep-alive,
//! no chunked encoding.
//!
//! # Architecture
//!
//! - **`connection`**: Drives one client through the request-response state machine
//! - **`parser`**: Parses a request head from a byte buffer
//! - **`request`**: Request representation, methods and recognized headers
//! - **`response`**: Response representation with builder pattern
//! - **`writer`**: Serializes and writes responses to the client
//! - **`mime`**: Closed table of MIME types and their file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for the request head
//!        └──────┬──────┘
//!               │ Head parsed            (parse error → Writing)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Read body, run file operation
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response, shut down write side
//!        └──────┬───────────┘
//!               ▼
//!             Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use fileserve::http::connection::{Connection, ConnectionLimits};
//! use fileserve::resource::{FileHandler, ResourceStore};
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     let handler = Arc::new(FileHandler::new(ResourceStore::new("./data")));
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let handler = handler.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, handler, ConnectionLimits::default());
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
