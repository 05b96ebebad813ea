use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::{Drug, Substance};
use crate::constants::{CIS_FILENAME, COMPOSITION_FILENAME, TARGET_DRUGS};

/// Reads an ISO-8859-1 file into lines. Every byte maps to the code point of the same value.
fn read_latin1_lines(path: &Path) -> Option<Vec<String>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("cannot read {}: {}", path.display(), e);
            return None;
        }
    };

    Some(
        bytes
            .split(|&b| b == b'\n')
            .map(|line| line.iter().map(|&b| b as char).collect::<String>())
            .map(|line| line.trim_end_matches('\r').to_string())
            .filter(|line| !line.trim().is_empty())
            .collect(),
    )
}

/// Groups the composition file by CIS code.
pub fn load_substances(path: &Path) -> HashMap<String, Vec<Substance>> {
    let mut by_cis: HashMap<String, Vec<Substance>> = HashMap::new();

    let Some(lines) = read_latin1_lines(path) else {
        return by_cis;
    };

    for line in lines {
        let columns: Vec<&str> = line.split('\t').map(str::trim).collect();
        if columns.len() < 4 {
            tracing::debug!("skipping short composition row: {line}");
            continue;
        }

        let substance = Substance {
            code_substance: columns[2].to_string(),
            nom: columns[3].to_string(),
            dosage: columns.get(4).map(|d| d.to_string()).unwrap_or_default(),
        };
        by_cis
            .entry(columns[0].to_string())
            .or_default()
            .push(substance);
    }

    by_cis
}

fn is_target(name: &str) -> bool {
    let upper = name.to_uppercase();
    TARGET_DRUGS.iter().any(|target| upper.contains(target))
}

/// Loads the target drugs and their substances from `data_dir`.
pub fn load_drugs(data_dir: &Path) -> Vec<Drug> {
    let mut substances = load_substances(&data_dir.join(COMPOSITION_FILENAME));

    let Some(lines) = read_latin1_lines(&data_dir.join(CIS_FILENAME)) else {
        return Vec::new();
    };

    lines
        .iter()
        .filter_map(|line| {
            let mut columns = line.split('\t').map(str::trim);
            let cis = columns.next()?;
            let nom = columns.next()?;
            if cis.is_empty() || !is_target(nom) {
                return None;
            }
            Some(Drug {
                cis: cis.to_string(),
                nom: nom.to_string(),
                substances: substances.remove(cis).unwrap_or_default(),
            })
        })
        .collect()
}
