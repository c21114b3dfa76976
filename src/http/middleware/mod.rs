//! Tower middleware applied in front of the forward handler.

pub mod request_log_id;

pub use request_log_id::RequestLogIdLayer;
