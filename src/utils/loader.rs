// File: loader.rs
// Path handling: input lists for batch runs and PDB codes from file names

use std::io::BufRead;
use std::path::Path;

use regex::Regex;

use crate::error::{Result, SocketError};

/// Read a batch list: one `pdb<TAB>dssp` pair per line.
/// Blank lines and lines starting with '#' are skipped.
pub fn load_pair_list(path: &str) -> Result<Vec<(String, String)>> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    let mut pairs = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut fields = trimmed.split('\t');
        match (fields.next(), fields.next()) {
            (Some(pdb), Some(dssp)) if !pdb.is_empty() && !dssp.is_empty() => {
                pairs.push((pdb.trim().to_string(), dssp.trim().to_string()));
            }
            _ => {
                return Err(SocketError::Parse(format!(
                    "{}:{}: expected <pdb>\\t<dssp>", path, idx + 1
                )));
            }
        }
    }
    Ok(pairs)
}

/// Derive the code printed in result lines from a structure file name.
/// A standard entry name (`1abc.pdb`, `pdb1abc.ent`, optionally compressed)
/// yields the lower-cased 4 character code; anything else yields the bare file name.
pub fn get_code(path: &str) -> String {
    let file_name = Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string());
    let lowered = file_name.to_lowercase();
    // The pattern is a literal and always compiles
    let pattern = Regex::new(r"^(?:pdb)?([0-9][0-9a-z]{3})\.(?:pdb|ent)").ok();
    match pattern.as_ref().and_then(|re| re.captures(&lowered)) {
        Some(caps) => caps[1].to_string(),
        None => file_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_code() {
        assert_eq!(get_code("data/2ZTA.pdb"), "2zta");
        assert_eq!(get_code("/tmp/pdb1aik.ent"), "1aik");
        assert_eq!(get_code("pdb1aik.ent.gz"), "1aik");
        assert_eq!(get_code("models/model_3.pdb"), "model_3.pdb");
        assert_eq!(get_code("xyz1abc.pdb"), "xyz1abc.pdb");
        assert_eq!(get_code("1abc.cif"), "1abc.cif");
    }

    #[test]
    fn test_load_pair_list() {
        let path = std::env::temp_dir().join("coildisco_pair_list_test.tsv");
        std::fs::write(&path, "# pdb\tdssp\na.pdb\ta.dssp\n\nb.pdb.gz\tb.dssp\n").unwrap();
        let pairs = load_pair_list(path.to_str().unwrap()).unwrap();
        assert_eq!(pairs, vec![
            ("a.pdb".to_string(), "a.dssp".to_string()),
            ("b.pdb.gz".to_string(), "b.dssp".to_string()),
        ]);
        std::fs::write(&path, "only_one_column\n").unwrap();
        assert!(load_pair_list(path.to_str().unwrap()).is_err());
        std::fs::remove_file(&path).ok();
    }
}
