//! Request and response bodies of the REST API.
//!
//! Risk levels travel as lowercase strings (`green`, `orange`, `red`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    /// Always `"ok"` while the server answers.
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SubstanceDto {
    pub code_substance: String,
    pub nom: String,
    pub dosage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DrugDto {
    pub cis: String,
    pub nom: String,
    pub substances: Vec<SubstanceDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QuestionDto {
    pub id: String,
    pub text: String,
    #[schema(example = "red")]
    pub risk_if_yes: String,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QuestionsRes {
    pub substance: String,
    pub questions: Vec<QuestionDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScoreReq {
    /// Substance identifier as used by the question bank, e.g. `IBUPROFENE`.
    pub substance: String,
    /// Answer per question id; every applicable question must be answered.
    pub answers: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TriggeredRiskDto {
    pub question_id: String,
    pub question: String,
    #[schema(example = "orange")]
    pub risk: String,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScoreRes {
    #[schema(example = "green")]
    pub score: String,
    /// 0 (green), 5 (orange) or 10 (red).
    pub risk_level: u8,
    pub triggered_risks: Vec<TriggeredRiskDto>,
    pub safe_for_self_medication: bool,
    pub label: String,
    pub grade: String,
    pub advice: String,
    pub explanation: Option<String>,
}
