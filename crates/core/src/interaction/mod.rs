//! Client side of the remote search and interaction analysis service.

mod client;
mod session;
mod types;

pub use client::{HttpInteractionService, InteractionService};
pub use session::{AnalysisSession, AnalysisState, AnalysisTicket};
pub use types::{AnalysisReport, GlobalSeverity, InteractionDetail, InteractionLevel};
