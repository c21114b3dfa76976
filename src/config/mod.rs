//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → threaded explicitly into the server at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; identity and the runtime endpoint are
//!   fixed at process start by the supervisor
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{AppConfig, GatewayConfig, ObservabilityConfig};
