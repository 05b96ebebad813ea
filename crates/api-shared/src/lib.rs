//! # API Shared
//!
//! Shared wire types and services for the pharma APIs.
//!
//! Contains:
//! - Request/response DTOs (`dto` module), annotated for OpenAPI
//! - `HealthService`
//!
//! Used by `api-rest`.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
