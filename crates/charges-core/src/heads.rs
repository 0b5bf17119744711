use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ChargesError, Result};

const BUNDLED_HEADS: &str = include_str!("../data/heads.toml");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Head {
    pub code: String,
    pub label: String,
}

/// Ordered code-to-label lookup used when keying in manual ledger entries.
///
/// Callers pass a table explicitly; nothing in the crate consults a global one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadTable {
    heads: Vec<Head>,
}

#[derive(Debug, Deserialize)]
struct HeadTableFile {
    #[serde(default)]
    heads: Vec<Head>,
}

impl HeadTable {
    pub fn new(heads: Vec<Head>) -> Result<Self> {
        let mut seen = HashSet::new();
        for head in &heads {
            let code = head.code.trim();
            if code.is_empty() {
                return Err(ChargesError::Validation(format!(
                    "head '{}' has an empty code",
                    head.label
                )));
            }
            if !seen.insert(code.to_string()) {
                return Err(ChargesError::DuplicateHeadCode(code.to_string()));
            }
        }
        Ok(Self { heads })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: HeadTableFile = toml::from_str(content)?;
        Self::new(file.heads)
    }

    /// The table shipped with the crate in `data/heads.toml`.
    pub fn bundled() -> Result<Self> {
        Self::from_toml_str(BUNDLED_HEADS)
    }

    pub fn lookup(&self, code: &str) -> Option<&Head> {
        let code = code.trim();
        self.heads.iter().find(|head| head.code.trim() == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Head> {
        self.heads.iter()
    }

    pub fn len(&self) -> usize {
        self.heads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heads.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_table_loads() {
        let table = HeadTable::bundled().expect("bundled heads");
        assert_eq!(table.len(), 10);
        assert_eq!(table.lookup("101").map(|h| h.label.as_str()), Some("Rent"));
        assert_eq!(table.lookup(" 199 ").map(|h| h.label.as_str()), Some("Miscellaneous"));
        assert!(table.lookup("999").is_none());
    }

    #[test]
    fn duplicate_codes_are_rejected() {
        let content = r#"
            [[heads]]
            code = "1"
            label = "Rent"

            [[heads]]
            code = "1"
            label = "Water"
        "#;
        let err = HeadTable::from_toml_str(content).unwrap_err();
        assert!(matches!(err, ChargesError::DuplicateHeadCode(code) if code == "1"));
    }

    #[test]
    fn empty_code_is_rejected() {
        let heads = vec![Head {
            code: "  ".into(),
            label: "Rent".into(),
        }];
        assert!(matches!(
            HeadTable::new(heads),
            Err(ChargesError::Validation(_))
        ));
    }
}
