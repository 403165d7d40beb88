//! ## Engine Runtime
//!
//! Process-wide configuration, logging, and the worker threads that execute
//! one resampling call.
pub mod config;
pub mod dispatch;
pub mod logging;
