#[derive(Debug, thiserror::Error)]
pub enum PharmaError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid transition: cannot {action} while {step}")]
    InvalidTransition {
        step: &'static str,
        action: &'static str,
    },
    #[error("profile is incomplete: {0}")]
    ProfileIncomplete(&'static str),
    #[error("substance {0} is not part of the current selection")]
    SubstanceNotInSelection(String),
    #[error("at least {required} drugs must be selected for an analysis (got {selected})")]
    NotEnoughDrugs { required: usize, selected: usize },
    #[error("an analysis is already in flight")]
    AnalysisAlreadyPending,

    #[error("failed to read file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to serialize selection: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize selection: {0}")]
    Deserialization(serde_json::Error),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(reqwest::Error),
}

pub type PharmaResult<T> = std::result::Result<T, PharmaError>;

/// Failures of the remote interaction analysis service.
///
/// None of these are surfaced verbatim to a patient: [`AnalysisError::user_message`] maps every
/// variant to the same static text.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("analysis service unreachable at {0}")]
    ServerUnreachable(String),
    #[error("analysis service returned status {status}")]
    Status { status: u16 },
    #[error("failed to parse analysis response: {0}")]
    ResponseParsing(String),
}

/// Message shown to the user whenever an analysis cannot be obtained.
pub const SERVER_UNREACHABLE_MESSAGE: &str = "Impossible de joindre le serveur d'analyse.";

impl AnalysisError {
    pub fn user_message(&self) -> &'static str {
        SERVER_UNREACHABLE_MESSAGE
    }
}
