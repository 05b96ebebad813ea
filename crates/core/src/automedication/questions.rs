//! The static self-medication question bank.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::PharmaError;

/// Traffic-light risk classification produced by the questionnaire.
///
/// Ordering is by severity: `Green < Orange < Red`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Green,
    Orange,
    Red,
}

impl RiskLevel {
    /// Numeric index used by the scoring report (0, 5 or 10).
    pub fn index(self) -> u8 {
        match self {
            RiskLevel::Green => 0,
            RiskLevel::Orange => 5,
            RiskLevel::Red => 10,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Green => "green",
            RiskLevel::Orange => "orange",
            RiskLevel::Red => "red",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = PharmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "green" => Ok(RiskLevel::Green),
            "orange" => Ok(RiskLevel::Orange),
            "red" => Ok(RiskLevel::Red),
            other => Err(PharmaError::InvalidInput(format!(
                "unknown risk level: {other}"
            ))),
        }
    }
}

/// A yes/no question contributing `risk_level` when answered "yes".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
    pub applicable_substances: &'static [&'static str],
    pub risk_level: RiskLevel,
    pub explanation: Option<&'static str>,
}

impl Question {
    pub fn applies_to(&self, substance: &str) -> bool {
        self.applicable_substances.contains(&substance)
    }
}

/// Questions in the order they are asked.
pub static QUESTION_BANK: &[Question] = &[
    Question {
        id: "pregnant",
        text: "Êtes-vous enceinte ?",
        applicable_substances: &["IBUPROFENE", "ASPIRINE"],
        risk_level: RiskLevel::Red,
        explanation: Some(
            "Les anti-inflammatoires et l'aspirine sont contre-indiqués pendant la grossesse.",
        ),
    },
    Question {
        id: "liver_issues",
        text: "Avez-vous des problèmes de foie connus ?",
        applicable_substances: &["PARACETAMOL"],
        risk_level: RiskLevel::Orange,
        explanation: Some(
            "Le paracétamol est métabolisé par le foie : la dose doit être adaptée.",
        ),
    },
    Question {
        id: "ulcer",
        text: "Avez-vous un ulcère à l'estomac ou des antécédents ?",
        applicable_substances: &["IBUPROFENE", "ASPIRINE"],
        risk_level: RiskLevel::Red,
        explanation: Some(
            "Ce médicament augmente le risque de saignement digestif en cas d'ulcère.",
        ),
    },
    Question {
        id: "fever_duration",
        text: "La fièvre dure-t-elle depuis plus de 3 jours ?",
        applicable_substances: &["PARACETAMOL", "IBUPROFENE", "ASPIRINE"],
        risk_level: RiskLevel::Orange,
        explanation: Some("Une fièvre de plus de 3 jours doit être évaluée par un médecin."),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_levels_are_ordered_by_severity() {
        assert!(RiskLevel::Green < RiskLevel::Orange);
        assert!(RiskLevel::Orange < RiskLevel::Red);
        assert_eq!(
            [RiskLevel::Orange, RiskLevel::Red, RiskLevel::Green]
                .into_iter()
                .max(),
            Some(RiskLevel::Red)
        );
    }

    #[test]
    fn risk_level_parses_case_insensitively() {
        assert_eq!("GREEN".parse::<RiskLevel>().unwrap(), RiskLevel::Green);
        assert_eq!(" red ".parse::<RiskLevel>().unwrap(), RiskLevel::Red);
        assert!("amber".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn bank_ids_are_unique() {
        let mut ids: Vec<_> = QUESTION_BANK.iter().map(|q| q.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), QUESTION_BANK.len());
    }

    #[test]
    fn serialises_risk_level_lowercase() {
        let json = serde_json::to_string(&RiskLevel::Orange).unwrap();
        assert_eq!(json, "\"orange\"");
    }
}
