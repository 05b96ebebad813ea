//! The self-medication wizard: profile, substance selection, questionnaire, result.
//!
//! One controller covers the three entry flows through [`FlowVariant`]:
//!
//! - `ProfileFirst`: profile form, then substance selection
//! - `MoleculeSearchFirst`: substance selection straight away
//! - `SelectionListFirst`: substance must come from a drug in the current selection list
//!
//! After selection the wizard runs a [`Questionnaire`] and ends in `Result`. `back` during the
//! questionnaire returns to substance selection and drops the answers; `reset` returns to the
//! first step of the flow and forgets substance, answers and profile.

use serde::Serialize;
use std::collections::BTreeMap;

use super::profile::{ProfileDraft, UserProfile};
use super::questionnaire::{QuizState, Questionnaire, SubstanceSelection};
use super::questions::{Question, RiskLevel, QUESTION_BANK};
use super::score::ScoreReport;
use crate::selection::SelectionStore;
use crate::validation::normalize_substance_name;
use crate::{PharmaError, PharmaResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowVariant {
    ProfileFirst,
    #[default]
    MoleculeSearchFirst,
    SelectionListFirst,
}

/// What the wizard hands to its caller when the questionnaire completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub substance: SubstanceSelection,
    pub risk_level: RiskLevel,
    pub explanation: Option<String>,
    pub report: ScoreReport,
    pub profile: Option<UserProfile>,
}

#[derive(Debug, Clone)]
pub enum WizardStep {
    Profile(ProfileDraft),
    SelectSubstance,
    Questionnaire(Questionnaire),
    Result(Outcome),
}

impl WizardStep {
    fn name(&self) -> &'static str {
        match self {
            WizardStep::Profile(_) => "filling the profile",
            WizardStep::SelectSubstance => "selecting a substance",
            WizardStep::Questionnaire(_) => "answering the questionnaire",
            WizardStep::Result(_) => "showing the result",
        }
    }
}

/// Result of an input that moves the questionnaire forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// Next question to ask, zero-based, out of `total`.
    Next {
        index: usize,
        total: usize,
        question: &'static Question,
    },
    Completed(Outcome),
}

#[derive(Debug, Clone)]
pub struct Wizard {
    variant: FlowVariant,
    bank: &'static [Question],
    /// Substances the user may pick in `SelectionListFirst`, keyed by accepted identifier
    /// (substance code or normalised name) to the normalised name the question bank uses.
    allowed_substances: Option<BTreeMap<String, String>>,
    profile: Option<UserProfile>,
    step: WizardStep,
}

impl Wizard {
    pub fn new(variant: FlowVariant) -> Self {
        Self::with_bank(variant, QUESTION_BANK)
    }

    pub fn with_bank(variant: FlowVariant, bank: &'static [Question]) -> Self {
        Self {
            variant,
            bank,
            allowed_substances: None,
            profile: None,
            step: initial_step(variant),
        }
    }

    /// Selection-list-first wizard restricted to the substances of the selected drugs.
    ///
    /// Both substance codes and normalised substance names are accepted as identifiers; a code
    /// is resolved to the substance name before the questionnaire starts.
    pub fn from_selection(selection: &SelectionStore) -> Self {
        let mut allowed = BTreeMap::new();
        for s in selection.drugs().iter().flat_map(|drug| drug.substances.iter()) {
            let name = normalize_substance_name(&s.nom);
            if name.is_empty() {
                continue;
            }
            if !s.code_substance.trim().is_empty() {
                allowed.insert(s.code_substance.trim().to_string(), name.clone());
            }
            allowed.insert(name.clone(), name);
        }

        Self {
            allowed_substances: Some(allowed),
            ..Self::new(FlowVariant::SelectionListFirst)
        }
    }

    pub fn variant(&self) -> FlowVariant {
        self.variant
    }

    pub fn step(&self) -> &WizardStep {
        &self.step
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn questionnaire(&self) -> Option<&Questionnaire> {
        match &self.step {
            WizardStep::Questionnaire(quiz) => Some(quiz),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.step {
            WizardStep::Result(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Mutable access to the profile form while it is shown.
    pub fn profile_draft_mut(&mut self) -> PharmaResult<&mut ProfileDraft> {
        match &mut self.step {
            WizardStep::Profile(draft) => Ok(draft),
            other => Err(PharmaError::InvalidTransition {
                step: other.name(),
                action: "edit the profile",
            }),
        }
    }

    /// Validates the profile form and moves on to substance selection.
    ///
    /// # Errors
    ///
    /// `PharmaError::ProfileIncomplete` while any field is unset; the wizard stays on the form.
    pub fn submit_profile(&mut self) -> PharmaResult<()> {
        let profile = match &self.step {
            WizardStep::Profile(draft) => draft.finish()?,
            other => {
                return Err(PharmaError::InvalidTransition {
                    step: other.name(),
                    action: "submit the profile",
                })
            }
        };

        self.profile = Some(profile);
        self.step = WizardStep::SelectSubstance;
        Ok(())
    }

    /// Starts the questionnaire for `substance`.
    ///
    /// A substance without applicable questions completes at once with `Green`.
    pub fn select_substance(
        &mut self,
        mut substance: SubstanceSelection,
    ) -> PharmaResult<Progress> {
        if !matches!(self.step, WizardStep::SelectSubstance) {
            return Err(PharmaError::InvalidTransition {
                step: self.step.name(),
                action: "select a substance",
            });
        }

        if let Some(allowed) = &self.allowed_substances {
            match allowed.get(&substance.id) {
                Some(name) => substance.id = name.clone(),
                None => return Err(PharmaError::SubstanceNotInSelection(substance.id)),
            }
        }

        tracing::info!(substance = %substance.id, variant = ?self.variant, "substance selected");

        let quiz = Questionnaire::start(substance, self.bank);
        Ok(self.settle(quiz))
    }

    /// Answers the current question.
    pub fn answer(&mut self, yes: bool) -> PharmaResult<Progress> {
        let mut quiz = match std::mem::replace(&mut self.step, WizardStep::SelectSubstance) {
            WizardStep::Questionnaire(quiz) => quiz,
            other => {
                let step = other.name();
                self.step = other;
                return Err(PharmaError::InvalidTransition {
                    step,
                    action: "answer a question",
                });
            }
        };

        if let Err(e) = quiz.answer(yes) {
            self.step = WizardStep::Questionnaire(quiz);
            return Err(e);
        }
        Ok(self.settle(quiz))
    }

    /// Leaves the current step without completing it.
    ///
    /// Questionnaire -> substance selection (answers discarded); substance selection -> profile
    /// form in the profile-first flow.
    pub fn back(&mut self) -> PharmaResult<()> {
        self.step = match (&self.step, self.variant) {
            (WizardStep::Questionnaire(_), _) => WizardStep::SelectSubstance,
            (WizardStep::SelectSubstance, FlowVariant::ProfileFirst) => {
                self.profile = None;
                WizardStep::Profile(ProfileDraft::default())
            }
            (other, _) => {
                return Err(PharmaError::InvalidTransition {
                    step: other.name(),
                    action: "go back",
                })
            }
        };
        Ok(())
    }

    /// Returns to the first step of the flow with nothing remembered.
    pub fn reset(&mut self) {
        tracing::debug!(variant = ?self.variant, "wizard reset");
        self.profile = None;
        self.step = initial_step(self.variant);
    }

    fn settle(&mut self, quiz: Questionnaire) -> Progress {
        match quiz.state() {
            QuizState::AwaitingAnswer(index) => {
                let total = quiz.questions().len();
                let question = quiz.questions()[index];
                self.step = WizardStep::Questionnaire(quiz);
                Progress::Next {
                    index,
                    total,
                    question,
                }
            }
            QuizState::Resolved(level) => {
                let report = quiz.report().unwrap_or_else(|| ScoreReport {
                    level,
                    risk_index: level.index(),
                    triggered: Vec::new(),
                    safe_for_self_medication: level == RiskLevel::Green,
                });
                let outcome = Outcome {
                    substance: quiz.substance().clone(),
                    risk_level: level,
                    explanation: report.explanation(),
                    report,
                    profile: self.profile,
                };
                self.step = WizardStep::Result(outcome.clone());
                Progress::Completed(outcome)
            }
        }
    }
}

fn initial_step(variant: FlowVariant) -> WizardStep {
    match variant {
        FlowVariant::ProfileFirst => WizardStep::Profile(ProfileDraft::default()),
        FlowVariant::MoleculeSearchFirst | FlowVariant::SelectionListFirst => {
            WizardStep::SelectSubstance
        }
    }
}
