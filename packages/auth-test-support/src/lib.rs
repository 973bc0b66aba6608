//! Auth service test support utilities
//!
//! This crate provides helpers shared by the service tests: unified logging
//! initialization, log event capture, token inspection/tampering, and
//! problem-details response assertions.

pub mod log_capture;
pub mod logging;
pub mod problem_details;
pub mod tokens;
