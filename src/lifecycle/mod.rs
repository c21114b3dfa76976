//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger graceful shutdown
//!
//! Shutdown (shutdown.rs):
//!     Signal received → stop accepting → drain in-flight calls → exit
//! ```
//!
//! # Design Decisions
//! - Ordered shutdown: stop accept, drain the dispatcher, close
//! - Draining has a grace period: forced exit after it elapses

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
