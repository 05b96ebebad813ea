use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

use api_shared::{
    DrugDto, HealthRes, HealthService, QuestionDto, QuestionsRes, ScoreReq, ScoreRes,
    SubstanceDto, TriggeredRiskDto,
};
use pharma_core::automedication::{
    advice_for, applicable_questions, score_report, AnswerSet, Question, QUESTION_BANK,
};
use pharma_core::validation::normalize_substance_name;
use pharma_core::Drug;

use crate::AppState;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchParams {
    q: Option<String>,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used by monitoring and load balancer health checks.
#[axum::debug_handler]
pub(crate) async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/api/search",
    params(
        ("q" = Option<String>, Query, description = "Drug name, substance name or CIS code")
    ),
    responses(
        (status = 200, description = "Matching drugs, possibly empty", body = [DrugDto])
    )
)]
/// Search the drug catalog
///
/// A missing or blank `q` returns an empty list rather than an error.
#[axum::debug_handler]
pub(crate) async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<DrugDto>> {
    let term = params.q.unwrap_or_default();
    let hits: Vec<DrugDto> = state.catalog.search(&term).into_iter().map(drug_dto).collect();
    tracing::debug!(term = %term, hits = hits.len(), "search");
    Json(hits)
}

#[utoipa::path(
    get,
    path = "/api/automedication/questions/{substance}",
    params(
        ("substance" = String, Path, description = "Substance name, accents and case are ignored")
    ),
    responses(
        (status = 200, description = "Questions applicable to the substance, in order", body = QuestionsRes)
    )
)]
/// List the self-medication questions for a substance
///
/// An unknown substance yields an empty list: no question means no identified risk.
#[axum::debug_handler]
pub(crate) async fn questions(
    State(_state): State<AppState>,
    Path(substance): Path<String>,
) -> Json<QuestionsRes> {
    let substance = normalize_substance_name(&substance);
    let questions = applicable_questions(&substance, QUESTION_BANK)
        .into_iter()
        .map(question_dto)
        .collect();

    Json(QuestionsRes {
        substance,
        questions,
    })
}

#[utoipa::path(
    post,
    path = "/api/automedication/score",
    request_body = ScoreReq,
    responses(
        (status = 200, description = "Risk score", body = ScoreRes),
        (status = 400, description = "Answers do not match the applicable questions")
    )
)]
/// Score a completed questionnaire
///
/// Every applicable question must be answered and no other question may be.
#[axum::debug_handler]
pub(crate) async fn score(
    State(_state): State<AppState>,
    Json(req): Json<ScoreReq>,
) -> Result<Json<ScoreRes>, (StatusCode, &'static str)> {
    let substance = normalize_substance_name(&req.substance);
    let applicable = applicable_questions(&substance, QUESTION_BANK);

    if let Some(unknown) = req
        .answers
        .keys()
        .find(|id| !applicable.iter().any(|q| q.id == id.as_str()))
    {
        tracing::warn!(substance = %substance, question = %unknown, "answer for a question that does not apply");
        return Err((
            StatusCode::BAD_REQUEST,
            "Answer given for a question that does not apply",
        ));
    }
    if applicable.iter().any(|q| !req.answers.contains_key(q.id)) {
        return Err((
            StatusCode::BAD_REQUEST,
            "Every applicable question must be answered",
        ));
    }

    let answers = AnswerSet::from(req.answers);
    let report = score_report(&applicable, &answers);
    let advice = advice_for(report.level, Some(&substance));

    Ok(Json(ScoreRes {
        score: report.level.to_string(),
        risk_level: report.risk_index,
        explanation: report.explanation(),
        triggered_risks: report
            .triggered
            .into_iter()
            .map(|t| TriggeredRiskDto {
                question_id: t.question_id.into(),
                question: t.question.into(),
                risk: t.risk_level.to_string(),
                explanation: t.explanation.map(Into::into),
            })
            .collect(),
        safe_for_self_medication: report.safe_for_self_medication,
        label: advice.label.into(),
        grade: advice.grade.into(),
        advice: advice.text,
    }))
}

fn drug_dto(drug: &Drug) -> DrugDto {
    DrugDto {
        cis: drug.cis.clone(),
        nom: drug.nom.clone(),
        substances: drug
            .substances
            .iter()
            .map(|s| SubstanceDto {
                code_substance: s.code_substance.clone(),
                nom: s.nom.clone(),
                dosage: s.dosage.clone(),
            })
            .collect(),
    }
}

fn question_dto(question: &Question) -> QuestionDto {
    QuestionDto {
        id: question.id.into(),
        text: question.text.into(),
        risk_if_yes: question.risk_level.to_string(),
        explanation: question.explanation.map(Into::into),
    }
}
