//! vex-core — shared types for the vex extraction server.
//!
//! - **`bbox`** — [`BoundingBox`] parsing from query parameters and the
//!   ordered validation rules
//! - **`request`** — [`ExtractionRequest`], the validated box plus the
//!   derived download filename and process arguments
//! - **`config`** — [`VexConfig`], the immutable startup configuration
//!
//! Validation order is fixed: a malformed value wins over an inverted box,
//! which wins over latitude and then longitude range errors.

pub mod bbox;
pub mod config;
pub mod error;
pub mod request;

pub use bbox::BoundingBox;
pub use config::{RelayConfig, VexConfig};
pub use error::{ConfigError, ConfigResult, ValidationError, ValidationResult};
pub use request::ExtractionRequest;
