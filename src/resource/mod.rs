//! Filesystem resources
//!
//! This module maps request paths onto files under a root directory and
//! implements the per-method file operations behind them.

pub mod handler;
pub mod locks;
pub mod store;

pub use handler::FileHandler;
pub use locks::PathLocks;
pub use store::{ResourceStore, StoreError};
