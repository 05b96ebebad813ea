//! Input validation utilities.
//!
//! Checks applied to user and configuration inputs before they are used in operations.

use crate::{PharmaError, PharmaResult};

/// Validates that a service base URL is usable for outbound requests.
///
/// - Rejects empty or whitespace-only strings
/// - Requires an `http://` or `https://` scheme
/// - Requires a host part after the scheme
///
/// # Errors
///
/// Returns a `PharmaError::InvalidInput` if the URL is invalid.
pub fn validate_base_url(url: &str) -> PharmaResult<()> {
    let url = url.trim();

    if url.is_empty() {
        return Err(PharmaError::InvalidInput("base URL cannot be empty".into()));
    }

    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .ok_or_else(|| {
            PharmaError::InvalidInput(format!("base URL must start with http:// or https://: {url}"))
        })?;

    if rest.trim_matches('/').is_empty() {
        return Err(PharmaError::InvalidInput(format!(
            "base URL has no host: {url}"
        )));
    }

    Ok(())
}

/// Validates a declared age in years.
pub fn validate_age(age: u8) -> PharmaResult<()> {
    const MIN_AGE: u8 = 1;
    const MAX_AGE: u8 = 120;

    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(PharmaError::InvalidInput(format!(
            "age must be between {MIN_AGE} and {MAX_AGE}"
        )));
    }
    Ok(())
}

/// Upper-cases a substance name and folds French accents, so `Paracétamol` and `IBUPROFÈNE`
/// line up with the identifiers used by the question bank.
///
/// The relevance filter itself is an exact match; callers normalise before selecting.
pub fn normalize_substance_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            'à' | 'â' | 'ä' | 'À' | 'Â' | 'Ä' => 'A',
            'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'î' | 'ï' | 'Î' | 'Ï' => 'I',
            'ô' | 'ö' | 'Ô' | 'Ö' => 'O',
            'ù' | 'û' | 'ü' | 'Ù' | 'Û' | 'Ü' => 'U',
            'ç' | 'Ç' => 'C',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_http_urls() {
        assert!(validate_base_url("http://127.0.0.1:8000").is_ok());
        assert!(validate_base_url("https://pharma.example/api").is_ok());
    }

    #[test]
    fn rejects_missing_scheme_or_host() {
        assert!(validate_base_url("").is_err());
        assert!(validate_base_url("127.0.0.1:8000").is_err());
        assert!(validate_base_url("http://").is_err());
    }

    #[test]
    fn age_bounds() {
        assert!(validate_age(0).is_err());
        assert!(validate_age(1).is_ok());
        assert!(validate_age(120).is_ok());
        assert!(validate_age(121).is_err());
    }

    #[test]
    fn normalises_accents_and_case() {
        assert_eq!(normalize_substance_name(" Paracétamol "), "PARACETAMOL");
        assert_eq!(normalize_substance_name("IBUPROFÈNE"), "IBUPROFENE");
        assert_eq!(normalize_substance_name("acide acétylsalicylique"), "ACIDE ACETYLSALICYLIQUE");
    }
}
