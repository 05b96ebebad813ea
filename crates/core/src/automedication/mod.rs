//! Self-medication risk questionnaire.
//!
//! Leaves first: the static [`questions`] bank, the relevance [`filter`], the [`answers`]
//! accumulator, the [`score`] resolver, a single-substance [`questionnaire`] state machine and
//! the multi-step [`wizard`] that sequences profile, selection, questionnaire and result.

pub mod advice;
pub mod answers;
pub mod filter;
pub mod profile;
pub mod questionnaire;
pub mod questions;
pub mod score;
pub mod wizard;

pub use advice::{advice_for, ScoreAdvice};
pub use answers::AnswerSet;
pub use filter::applicable_questions;
pub use profile::{Gender, ProfileDraft, UserProfile};
pub use questionnaire::{QuizState, Questionnaire, SubstanceSelection};
pub use questions::{Question, RiskLevel, QUESTION_BANK};
pub use score::{resolve_risk, score_report, ScoreReport, TriggeredRisk};
pub use wizard::{FlowVariant, Outcome, Progress, Wizard, WizardStep};
