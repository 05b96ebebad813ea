use super::questions::Question;

/// Returns the questions of `bank` that apply to `substance`, in bank order.
///
/// Matching is exact and case-sensitive. Use
/// [`normalize_substance_name`](crate::validation::normalize_substance_name) beforehand when the
/// identifier comes from free text or the drug catalog.
pub fn applicable_questions<'a>(substance: &str, bank: &'a [Question]) -> Vec<&'a Question> {
    bank.iter().filter(|q| q.applies_to(substance)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automedication::questions::QUESTION_BANK;

    fn ids(questions: &[&Question]) -> Vec<&'static str> {
        questions.iter().map(|q| q.id).collect()
    }

    #[test]
    fn ibuprofen_gets_three_questions_in_bank_order() {
        let questions = applicable_questions("IBUPROFENE", QUESTION_BANK);
        assert_eq!(ids(&questions), vec!["pregnant", "ulcer", "fever_duration"]);
    }

    #[test]
    fn paracetamol_gets_liver_and_fever() {
        let questions = applicable_questions("PARACETAMOL", QUESTION_BANK);
        assert_eq!(ids(&questions), vec!["liver_issues", "fever_duration"]);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(applicable_questions("paracetamol", QUESTION_BANK).is_empty());
    }

    #[test]
    fn unknown_substance_yields_nothing() {
        assert!(applicable_questions("AMOXICILLINE", QUESTION_BANK).is_empty());
    }
}
