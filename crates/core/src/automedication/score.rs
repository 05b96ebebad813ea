//! Reduction of a completed answer set to a single risk level.

use serde::Serialize;

use super::answers::AnswerSet;
use super::questions::{Question, RiskLevel};

/// Returns the most severe risk level among questions answered "yes".
///
/// Questions are scanned in the given order; the first `red` trigger ends the scan since
/// nothing is more severe. Questions without an answer count as "no".
pub fn resolve_risk(questions: &[&Question], answers: &AnswerSet) -> RiskLevel {
    let mut max_risk = RiskLevel::Green;

    for question in questions {
        if !answers.is_yes(question.id) {
            continue;
        }
        match question.risk_level {
            RiskLevel::Red => return RiskLevel::Red,
            RiskLevel::Orange if max_risk == RiskLevel::Green => max_risk = RiskLevel::Orange,
            _ => {}
        }
    }

    max_risk
}

/// A question that was answered "yes".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggeredRisk {
    pub question_id: &'static str,
    pub question: &'static str,
    pub risk_level: RiskLevel,
    pub explanation: Option<&'static str>,
}

/// Detailed scoring result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreReport {
    pub level: RiskLevel,
    /// 0 for green, 5 for orange, 10 for red.
    pub risk_index: u8,
    pub triggered: Vec<TriggeredRisk>,
    pub safe_for_self_medication: bool,
}

impl ScoreReport {
    /// Explanations of every triggered question, joined into one paragraph.
    ///
    /// `None` when nothing triggered or no triggered question carries an explanation.
    pub fn explanation(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .triggered
            .iter()
            .filter_map(|t| t.explanation)
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// Builds the full report: level plus every triggered question.
///
/// Unlike [`resolve_risk`] this never short-circuits, so all triggered questions are listed.
pub fn score_report(questions: &[&Question], answers: &AnswerSet) -> ScoreReport {
    let level = resolve_risk(questions, answers);

    let triggered = questions
        .iter()
        .filter(|q| answers.is_yes(q.id))
        .map(|q| TriggeredRisk {
            question_id: q.id,
            question: q.text,
            risk_level: q.risk_level,
            explanation: q.explanation,
        })
        .collect();

    ScoreReport {
        level,
        risk_index: level.index(),
        triggered,
        safe_for_self_medication: level == RiskLevel::Green,
    }
}
