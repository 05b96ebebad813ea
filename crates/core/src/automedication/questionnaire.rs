//! One pass of the self-medication questionnaire for a single substance.
//!
//! The questionnaire is a small state machine:
//!
//! ```text
//! AwaitingAnswer(0) --answer--> AwaitingAnswer(1) --answer--> ... --answer--> Resolved(level)
//! ```
//!
//! A substance without applicable questions starts directly in `Resolved(Green)`. There is no
//! step back to a previous question; abandoning a pass is done by dropping it.

use serde::{Deserialize, Serialize};

use super::answers::AnswerSet;
use super::filter::applicable_questions;
use super::questions::{Question, RiskLevel};
use super::score::{resolve_risk, score_report, ScoreReport};
use crate::{PharmaError, PharmaResult};

/// The substance being evaluated: identifier used for matching plus a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstanceSelection {
    pub id: String,
    pub display_name: String,
}

impl SubstanceSelection {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> PharmaResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(PharmaError::InvalidInput(
                "substance identifier cannot be empty".into(),
            ));
        }
        let display_name = display_name.into();
        let display_name = if display_name.trim().is_empty() {
            id.clone()
        } else {
            display_name
        };
        Ok(Self { id, display_name })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    /// Waiting for the answer to the question at this index.
    AwaitingAnswer(usize),
    Resolved(RiskLevel),
}

#[derive(Debug, Clone)]
pub struct Questionnaire {
    substance: SubstanceSelection,
    questions: Vec<&'static Question>,
    answers: AnswerSet,
    state: QuizState,
}

impl Questionnaire {
    /// Starts a pass over the questions of `bank` that apply to `substance`.
    pub fn start(substance: SubstanceSelection, bank: &'static [Question]) -> Self {
        let questions = applicable_questions(&substance.id, bank);
        let state = if questions.is_empty() {
            QuizState::Resolved(RiskLevel::Green)
        } else {
            QuizState::AwaitingAnswer(0)
        };

        tracing::debug!(
            substance = %substance.id,
            questions = questions.len(),
            "questionnaire started"
        );

        Self {
            substance,
            questions,
            answers: AnswerSet::new(),
            state,
        }
    }

    pub fn substance(&self) -> &SubstanceSelection {
        &self.substance
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn questions(&self) -> &[&'static Question] {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.state, QuizState::Resolved(_))
    }

    pub fn current_question(&self) -> Option<&'static Question> {
        match self.state {
            QuizState::AwaitingAnswer(index) => self.questions.get(index).copied(),
            QuizState::Resolved(_) => None,
        }
    }

    /// One-based position of the current question and the total, e.g. `(2, 3)`.
    pub fn progress(&self) -> Option<(usize, usize)> {
        match self.state {
            QuizState::AwaitingAnswer(index) => Some((index + 1, self.questions.len())),
            QuizState::Resolved(_) => None,
        }
    }

    /// Records the answer to the current question and advances.
    ///
    /// # Errors
    ///
    /// Returns `PharmaError::InvalidTransition` if the questionnaire is already resolved.
    pub fn answer(&mut self, yes: bool) -> PharmaResult<QuizState> {
        let index = match self.state {
            QuizState::AwaitingAnswer(index) => index,
            QuizState::Resolved(_) => {
                return Err(PharmaError::InvalidTransition {
                    step: "resolved",
                    action: "answer a question",
                })
            }
        };

        let question = self.questions[index];
        self.answers.record(question.id, yes);

        self.state = if index + 1 < self.questions.len() {
            QuizState::AwaitingAnswer(index + 1)
        } else {
            let level = resolve_risk(&self.questions, &self.answers);
            tracing::debug!(substance = %self.substance.id, %level, "questionnaire resolved");
            QuizState::Resolved(level)
        };

        Ok(self.state)
    }

    /// Full report, available once resolved.
    pub fn report(&self) -> Option<ScoreReport> {
        self.is_resolved()
            .then(|| score_report(&self.questions, &self.answers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automedication::questions::QUESTION_BANK;

    fn start(id: &str) -> Questionnaire {
        Questionnaire::start(SubstanceSelection::new(id, id).unwrap(), QUESTION_BANK)
    }

    #[test]
    fn substance_without_questions_resolves_green_immediately() {
        let quiz = start("AMOXICILLINE");
        assert_eq!(quiz.state(), QuizState::Resolved(RiskLevel::Green));
        assert!(quiz.current_question().is_none());
        assert!(quiz.answers().is_empty());
        assert_eq!(quiz.report().unwrap().level, RiskLevel::Green);
    }

    #[test]
    fn ibuprofen_walkthrough_resolves_red() {
        let mut quiz = start("IBUPROFENE");
        assert_eq!(quiz.state(), QuizState::AwaitingAnswer(0));
        assert_eq!(quiz.current_question().unwrap().id, "pregnant");
        assert_eq!(quiz.progress(), Some((1, 3)));

        assert_eq!(quiz.answer(false).unwrap(), QuizState::AwaitingAnswer(1));
        assert_eq!(quiz.current_question().unwrap().id, "ulcer");
        assert_eq!(quiz.answer(true).unwrap(), QuizState::AwaitingAnswer(2));
        assert_eq!(
            quiz.answer(false).unwrap(),
            QuizState::Resolved(RiskLevel::Red)
        );
        assert_eq!(quiz.answers().len(), 3);
    }

    #[test]
    fn paracetamol_all_no_resolves_green() {
        let mut quiz = start("PARACETAMOL");
        quiz.answer(false).unwrap();
        assert_eq!(
            quiz.answer(false).unwrap(),
            QuizState::Resolved(RiskLevel::Green)
        );
    }

    #[test]
    fn answers_only_cover_applicable_questions_so_far() {
        let mut quiz = start("IBUPROFENE");
        quiz.answer(true).unwrap();

        let applicable: Vec<_> = quiz.questions().iter().map(|q| q.id).collect();
        assert_eq!(quiz.answers().len(), 1);
        assert!(quiz.answers().ids().all(|id| applicable.contains(&id)));
        assert!(!quiz.answers().contains("ulcer"));
        assert!(quiz.report().is_none());
    }

    #[test]
    fn answering_after_resolution_is_rejected() {
        let mut quiz = start("PARACETAMOL");
        quiz.answer(true).unwrap();
        quiz.answer(false).unwrap();

        let err = quiz.answer(true).unwrap_err();
        assert!(matches!(err, PharmaError::InvalidTransition { .. }));
        assert_eq!(quiz.state(), QuizState::Resolved(RiskLevel::Orange));
    }

    #[test]
    fn blank_substance_is_rejected() {
        assert!(SubstanceSelection::new("  ", "x").is_err());
    }

    #[test]
    fn blank_display_name_falls_back_to_id() {
        let selection = SubstanceSelection::new("PARACETAMOL", "").unwrap();
        assert_eq!(selection.display_name, "PARACETAMOL");
    }
}
