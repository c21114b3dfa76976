//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, forward handler)
//!     → middleware/ (request log ID stamping)
//!     → request.rs (translate headers/body into the internal message)
//!     → [dispatch layer calls the runtime]
//!     → response.rs (reconstruct HTTP response or error page)
//!     → send to client
//! ```

pub mod headers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestTranslator, TranslateError};
pub use server::HttpServer;
