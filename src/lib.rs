//! Fileserve - File-backed HTTP/1.1 server
//!
//! Exposes a directory as a CRUD resource: GET reads, POST appends, PUT
//! overwrites and DELETE removes the file named by the request path.

pub mod config;
pub mod error;
pub mod http;
pub mod resource;
pub mod server;
