//! Line-based interactive prompts for the questionnaire.

use std::error::Error;
use std::io::{self, BufRead, Write};

use pharma_core::automedication::{
    advice_for, Gender, Outcome, ProfileDraft, SubstanceSelection, Wizard, WizardStep,
};
use pharma_core::validation::normalize_substance_name;
use pharma_core::PharmaError;

pub struct Console<R, W> {
    input: R,
    output: W,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Yes,
    No,
    Back,
}

/// Interprets a yes/no/back reply, French or English.
pub fn parse_reply(raw: &str) -> Option<Reply> {
    match raw.trim().to_lowercase().as_str() {
        "o" | "oui" | "y" | "yes" => Some(Reply::Yes),
        "n" | "non" | "no" => Some(Reply::No),
        "r" | "retour" | "b" | "back" => Some(Reply::Back),
        _ => None,
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `prompt` and reads one line. `None` on end of input.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn ask_yes_no(&mut self, prompt: &str) -> io::Result<Option<bool>> {
        loop {
            let Some(raw) = self.ask(prompt)? else {
                return Ok(None);
            };
            match parse_reply(&raw) {
                Some(Reply::Yes) => return Ok(Some(true)),
                Some(Reply::No) => return Ok(Some(false)),
                _ => writeln!(self.output, "Répondez par o (oui) ou n (non).")?,
            }
        }
    }

    fn ask_profile(&mut self) -> io::Result<Option<ProfileDraft>> {
        writeln!(self.output, "Pour mieux vous conseiller, répondez à ces quelques questions.")?;
        let mut draft = ProfileDraft::default();

        while draft.gender.is_none() {
            let Some(raw) = self.ask("Vous êtes [h]omme ou [f]emme : ")? else {
                return Ok(None);
            };
            draft.gender = match raw.to_lowercase().as_str() {
                "h" | "homme" | "m" => Some(Gender::Male),
                "f" | "femme" => Some(Gender::Female),
                _ => None,
            };
        }

        while draft.age.is_none() {
            let Some(raw) = self.ask("Votre âge : ")? else {
                return Ok(None);
            };
            draft.age = raw.parse::<u8>().ok().filter(|age| (1..=120).contains(age));
        }

        let Some(other_meds) =
            self.ask_yes_no("Prenez-vous d'autres médicaments de façon régulière ? [o/n] ")?
        else {
            return Ok(None);
        };
        draft.has_other_meds = Some(other_meds);

        Ok(Some(draft))
    }

    fn print_outcome(&mut self, outcome: &Outcome) -> io::Result<()> {
        let advice = advice_for(outcome.risk_level, Some(&outcome.substance.display_name));
        writeln!(self.output)?;
        writeln!(self.output, "[{}] {}", advice.grade, advice.label)?;
        writeln!(self.output, "{}", advice.text)?;
        if let Some(explanation) = &outcome.explanation {
            writeln!(self.output, "{explanation}")?;
        }
        if outcome.profile.is_some_and(|p| p.has_other_meds) {
            writeln!(
                self.output,
                "Vous prenez d'autres médicaments : vérifiez les interactions avec `pharma analyze`."
            )?;
        }
        Ok(())
    }

    /// Drives `wizard` until the user quits or input ends.
    ///
    /// `substance` pre-fills the first substance selection.
    pub fn run_wizard(
        &mut self,
        mut wizard: Wizard,
        substance: Option<String>,
    ) -> Result<(), Box<dyn Error>> {
        let mut pending_substance = substance;

        loop {
            match wizard.step() {
                WizardStep::Profile(_) => {
                    let Some(draft) = self.ask_profile()? else {
                        return Ok(());
                    };
                    *wizard.profile_draft_mut()? = draft;
                    wizard.submit_profile()?;
                }
                WizardStep::SelectSubstance => {
                    let raw = match pending_substance.take() {
                        Some(raw) => raw,
                        None => match self.ask("Substance active (q pour quitter) : ")? {
                            None => return Ok(()),
                            Some(raw) if raw.eq_ignore_ascii_case("q") => return Ok(()),
                            Some(raw) => raw,
                        },
                    };
                    if raw.trim().is_empty() {
                        continue;
                    }

                    let selection =
                        SubstanceSelection::new(normalize_substance_name(&raw), raw.trim())?;
                    match wizard.select_substance(selection) {
                        Ok(_) => {}
                        Err(PharmaError::SubstanceNotInSelection(id)) => {
                            writeln!(self.output, "{id} ne fait pas partie de votre sélection.")?;
                        }
                        Err(e) => return Err(e.into()),
                    }
                }
                WizardStep::Questionnaire(quiz) => {
                    let (Some(question), Some((position, total))) =
                        (quiz.current_question(), quiz.progress())
                    else {
                        return Err("questionnaire has no current question".into());
                    };
                    let name = quiz.substance().display_name.clone();

                    writeln!(self.output)?;
                    writeln!(self.output, "À propos de votre prise de {name} ({position}/{total})")?;
                    writeln!(self.output, "{}", question.text)?;

                    let Some(raw) = self.ask("[o]ui / [n]on / [r]etour : ")? else {
                        return Ok(());
                    };
                    match parse_reply(&raw) {
                        Some(Reply::Yes) => {
                            wizard.answer(true)?;
                        }
                        Some(Reply::No) => {
                            wizard.answer(false)?;
                        }
                        Some(Reply::Back) => wizard.back()?,
                        None => writeln!(self.output, "Répondez par o, n ou r.")?,
                    }
                }
                WizardStep::Result(outcome) => {
                    self.print_outcome(outcome)?;
                    match self.ask_yes_no("Faire une autre évaluation ? [o/n] ")? {
                        Some(true) => wizard.reset(),
                        _ => return Ok(()),
                    }
                }
            }
        }
    }
}
