//! HTTP transport subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request id, timeout, trace)
//!     → routing layer (parse URL, resolve handler, invoke operation)
//!     → error kind → status code translation
//!     → Send to client
//! ```

pub mod server;

pub use server::HttpServer;
