use serde::{Deserialize, Serialize};

/// Overall severity reported by the analysis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GlobalSeverity {
    Rouge,
    Orange,
    Jaune,
    Bleu,
    Vert,
}

impl GlobalSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            GlobalSeverity::Rouge => "Rouge",
            GlobalSeverity::Orange => "Orange",
            GlobalSeverity::Jaune => "Jaune",
            GlobalSeverity::Bleu => "Bleu",
            GlobalSeverity::Vert => "Vert",
        }
    }
}

/// The four interaction tiers of the national thesaurus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionLevel {
    /// Contre-indication
    Ci,
    /// Association déconseillée
    Ad,
    /// Précaution d'emploi
    Pe,
    /// À prendre en compte
    Pc,
}

impl InteractionLevel {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "CI" => Some(Self::Ci),
            "AD" => Some(Self::Ad),
            "PE" => Some(Self::Pe),
            "PC" => Some(Self::Pc),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Ci => "Contre-indication",
            Self::Ad => "Association déconseillée",
            Self::Pe => "Précaution d'emploi",
            Self::Pc => "À prendre en compte",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionDetail {
    pub molecule_a: String,
    pub molecule_b: String,
    /// Raw tier code, normally one of CI, AD, PE, PC.
    pub level_risk: String,
    pub risk: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management: Option<String>,
}

impl InteractionDetail {
    pub fn level(&self) -> Option<InteractionLevel> {
        InteractionLevel::from_code(&self.level_risk)
    }

    /// Human label for the tier, falling back to the raw code.
    pub fn level_label(&self) -> &str {
        self.level()
            .map(InteractionLevel::label)
            .unwrap_or(&self.level_risk)
    }
}

/// Response of `POST /api/analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub interaction_detected: bool,
    pub global_severity: Option<GlobalSeverity>,
    pub explanation: String,
    pub conduct_to_follow: String,
    #[serde(default)]
    pub technical_details: Vec<InteractionDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_service_response() {
        let json = r#"{
            "interaction_detected": true,
            "global_severity": "Orange",
            "explanation": "Risque hémorragique",
            "conduct_to_follow": "Demandez conseil",
            "technical_details": [
                { "molecule_a": "IBUPROFENE", "molecule_b": "ACIDE ACETYLSALICYLIQUE",
                  "level_risk": "AD", "risk": "Majoration du risque ulcérogène" },
                { "molecule_a": "X", "molecule_b": "Y", "level_risk": "ZZ", "risk": "?",
                  "management": "Surveiller" }
            ]
        }"#;

        let report: AnalysisReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.global_severity, Some(GlobalSeverity::Orange));
        assert_eq!(report.technical_details[0].level(), Some(InteractionLevel::Ad));
        assert_eq!(
            report.technical_details[0].level_label(),
            "Association déconseillée"
        );
        assert_eq!(report.technical_details[1].level_label(), "ZZ");
        assert_eq!(
            report.technical_details[1].management.as_deref(),
            Some("Surveiller")
        );
    }

    #[test]
    fn null_severity_and_missing_details_are_accepted() {
        let json = r#"{ "interaction_detected": false, "global_severity": null,
                        "explanation": "", "conduct_to_follow": "" }"#;
        let report: AnalysisReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.global_severity, None);
        assert!(report.technical_details.is_empty());
    }
}
