use serde::Serialize;

use super::questions::RiskLevel;

/// Patient-facing wording for a risk level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreAdvice {
    pub label: &'static str,
    /// Letter grade shown in the score badge.
    pub grade: &'static str,
    pub text: String,
}

pub fn advice_for(level: RiskLevel, molecule: Option<&str>) -> ScoreAdvice {
    let molecule = molecule.unwrap_or("ce médicament");
    match level {
        RiskLevel::Green => ScoreAdvice {
            label: "FAIBLE RISQUE",
            grade: "A",
            text: format!(
                "La prise de {molecule} semble sûre dans votre situation. Respectez toujours les doses prescrites."
            ),
        },
        RiskLevel::Orange => ScoreAdvice {
            label: "ATTENTION",
            grade: "B/C",
            text: format!(
                "La prise de {molecule} nécessite une vigilance particulière. Il est recommandé de demander l'avis de votre pharmacien."
            ),
        },
        RiskLevel::Red => ScoreAdvice {
            label: "DÉCONSEILLÉ",
            grade: "D/E",
            text: format!(
                "La prise de {molecule} est fortement déconseillée ou contre-indiquée dans votre situation. Consultez un médecin."
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grades_follow_levels() {
        assert_eq!(advice_for(RiskLevel::Green, None).grade, "A");
        assert_eq!(advice_for(RiskLevel::Orange, None).grade, "B/C");
        assert_eq!(advice_for(RiskLevel::Red, None).grade, "D/E");
    }

    #[test]
    fn text_names_the_molecule() {
        let advice = advice_for(RiskLevel::Red, Some("Ibuprofène"));
        assert!(advice.text.contains("Ibuprofène"));
        assert_eq!(advice.label, "DÉCONSEILLÉ");
    }
}
