//! Reading company id lists and posting files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::validate_company_id;
use crate::error::{HarvesterError, Result};
use crate::types::Posting;

/// Read a newline-delimited list of company ids.
///
/// Lines are trimmed and blank lines are skipped. Every remaining line must
/// be a valid CVR number.
pub fn read_company_ids(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| HarvesterError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_company_ids(&content)
}

/// Parse company ids from newline-delimited text.
pub fn parse_company_ids(content: &str) -> Result<Vec<String>> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            validate_company_id(line)?;
            Ok(line.to_string())
        })
        .collect()
}

/// Load the postings of one company from a JSON file.
///
/// The file holds an array of `{"heading": ..., "text": ...}` objects in the
/// order they appear on the company page.
pub fn load_postings(path: &Path) -> Result<Vec<Posting>> {
    let content = fs::read_to_string(path).map_err(|source| HarvesterError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Path of a company's postings file inside a postings directory.
#[must_use]
pub fn postings_path(dir: &Path, company_id: &str) -> PathBuf {
    dir.join(format!("{company_id}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_parse_company_ids() {
        let ids = parse_company_ids("12345678\n  87654321 \n\n").unwrap();
        assert_eq!(ids, vec!["12345678", "87654321"]);
    }

    #[test]
    fn test_parse_company_ids_invalid() {
        let err = parse_company_ids("12345678\nabc\n").unwrap_err();
        assert!(matches!(err, HarvesterError::InvalidCompanyId(id) if id == "abc"));
    }

    #[test]
    fn test_read_company_ids_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_company_ids(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, HarvesterError::ReadFile { .. }));
    }

    #[test]
    fn test_load_postings() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"heading": "01.02.2016 Nye selskaber", "text": "Stiftelsesdato: 01.02.2016"}}]"#
        )
        .unwrap();

        let postings = load_postings(file.path()).unwrap();
        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].heading_date, "01.02.2016");
    }

    #[test]
    fn test_load_postings_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            load_postings(file.path()).unwrap_err(),
            HarvesterError::Json(_)
        ));
    }

    #[test]
    fn test_postings_path() {
        assert_eq!(
            postings_path(Path::new("data"), "12345678"),
            PathBuf::from("data/12345678.json")
        );
    }
}
