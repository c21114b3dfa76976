//! Runtime Gateway
//!
//! An HTTP front end that bridges edge requests into an internal
//! evaluation protocol spoken by a local application runtime.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────┐
//!                    │                RUNTIME GATEWAY                 │
//!                    │                                                │
//!   Client Request   │  ┌─────────┐   ┌────────────┐   ┌──────────┐  │
//!   ─────────────────┼─▶│  http   │──▶│  request   │──▶│ dispatch │──┼──▶ Runtime
//!                    │  │ server  │   │ translator │   │  (call)  │  │    Backend
//!                    │  └─────────┘   └────────────┘   └────┬─────┘  │
//!                    │                                       │        │
//!   Client Response  │  ┌────────────┐                       │        │
//!   ◀────────────────┼──│  response  │◀──────────────────────┘        │
//!                    │  │ translator │                                │
//!                    │  └────────────┘                                │
//!                    │                                                │
//!                    │  ┌──────────────────────────────────────────┐  │
//!                    │  │          Cross-Cutting Concerns           │  │
//!                    │  │  config    observability    lifecycle     │  │
//!                    │  └──────────────────────────────────────────┘  │
//!                    └───────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod dispatch;
pub mod http;
pub mod protocol;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
