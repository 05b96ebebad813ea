use super::Drug;

/// Case-insensitive substring search over drug names, substance names and exact CIS codes.
///
/// A blank term matches nothing.
pub(super) fn search<'a>(drugs: &'a [Drug], term: &str, limit: usize) -> Vec<&'a Drug> {
    let term = term.trim();
    if term.is_empty() || limit == 0 {
        return Vec::new();
    }
    let needle = term.to_uppercase();

    drugs
        .iter()
        .filter(|drug| {
            drug.cis == term
                || drug.nom.to_uppercase().contains(&needle)
                || drug
                    .substances
                    .iter()
                    .any(|s| s.nom.to_uppercase().contains(&needle))
        })
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DrugCatalog, Substance};

    fn catalog() -> DrugCatalog {
        let drug = |cis: &str, nom: &str, substance: &str| Drug {
            cis: cis.into(),
            nom: nom.into(),
            substances: vec![Substance {
                code_substance: String::new(),
                nom: substance.into(),
                dosage: String::new(),
            }],
        };
        DrugCatalog::new(vec![
            drug("1", "DOLIPRANE 500 mg", "PARACÉTAMOL"),
            drug("2", "DOLIPRANE 1000 mg", "PARACÉTAMOL"),
            drug("3", "ADVIL 200 mg", "IBUPROFÈNE"),
        ])
    }

    #[test]
    fn matches_name_case_insensitively() {
        let catalog = catalog();
        let hits = catalog.search("doli");
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn matches_substance_name() {
        let catalog = catalog();
        let hits = catalog.search("ibuprofène");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].cis, "3");
    }

    #[test]
    fn matches_exact_cis() {
        let catalog = catalog();
        assert_eq!(catalog.search("2")[0].nom, "DOLIPRANE 1000 mg");
    }

    #[test]
    fn blank_term_and_zero_limit_match_nothing() {
        let catalog = catalog();
        assert!(catalog.search("   ").is_empty());
        assert!(catalog.search_limited("doli", 0).is_empty());
        assert_eq!(catalog.search_limited("doli", 1).len(), 1);
    }

    #[test]
    fn lookup_by_cis() {
        let catalog = catalog();
        assert!(catalog.get("3").is_some());
        assert!(catalog.get("42").is_none());
    }
}
