//! # Pharma Core
//!
//! Core business logic for the medication advisory tool.
//!
//! This crate contains pure domain operations:
//! - the self-medication questionnaire, its scoring and the wizard driving it
//! - the BDPM drug catalog and its search
//! - the current drug selection and the interaction analysis session
//! - a blocking client for the remote search/analysis service
//!
//! **No API concerns**: HTTP servers, OpenAPI and DTOs belong in `api-rest` or `api-shared`.

pub mod automedication;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod interaction;
pub mod selection;
pub mod validation;

pub use automedication::{FlowVariant, Outcome, Progress, RiskLevel, Wizard};
pub use catalog::{Drug, DrugCatalog, Substance};
pub use config::CoreConfig;
pub use constants::*;
pub use error::{AnalysisError, PharmaError, PharmaResult};
pub use selection::SelectionStore;
