//! Facility directory
//!
//! Static table mapping a keypad code to a spoken/texted facility
//! description. Built once at startup and never mutated.

use std::collections::BTreeMap;

/// Text returned for codes that are not in the directory
pub const INVALID_SELECTION: &str = "Invalid selection.";

/// Outcome of a directory lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacilityLookup<'a> {
    Found(&'a str),
    NotFound,
}

impl<'a> FacilityLookup<'a> {
    /// Description text, or the fixed sentinel on a miss
    pub fn text(self) -> &'a str {
        match self {
            Self::Found(text) => text,
            Self::NotFound => INVALID_SELECTION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacilityDirectory {
    entries: BTreeMap<String, String>,
}

impl Default for FacilityDirectory {
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(
            "1".to_string(),
            "Facility 1: Safe House at 123 Main St.".to_string(),
        );
        entries.insert(
            "2".to_string(),
            "Facility 2: Community Center at 456 Elm St.".to_string(),
        );
        Self { entries }
    }
}

impl FacilityDirectory {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    /// Configured table, or the built-in one when none was configured
    pub fn from_config(entries: Option<&BTreeMap<String, String>>) -> Self {
        entries.cloned().map(Self::new).unwrap_or_default()
    }

    pub fn lookup(&self, code: &str) -> FacilityLookup<'_> {
        match self.entries.get(code.trim()) {
            Some(text) => FacilityLookup::Found(text),
            None => FacilityLookup::NotFound,
        }
    }

    pub fn text_for(&self, code: &str) -> &str {
        self.lookup(code).text()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_entries() {
        let directory = FacilityDirectory::default();
        assert_eq!(
            directory.lookup("1"),
            FacilityLookup::Found("Facility 1: Safe House at 123 Main St.")
        );
        assert_eq!(
            directory.text_for("2"),
            "Facility 2: Community Center at 456 Elm St."
        );
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn test_unknown_codes_return_sentinel() {
        let directory = FacilityDirectory::default();
        for code in ["0", "3", "9", "12", "", "#", "abc"] {
            assert_eq!(directory.lookup(code), FacilityLookup::NotFound);
            assert_eq!(directory.text_for(code), INVALID_SELECTION);
        }
    }

    #[test]
    fn test_every_configured_code_returns_exact_text() {
        let mut table = BTreeMap::new();
        table.insert("1".to_string(), "North shelter".to_string());
        table.insert("5".to_string(), "Mobile clinic & pharmacy".to_string());
        let directory = FacilityDirectory::from_config(Some(&table));

        for (code, text) in &table {
            assert_eq!(directory.text_for(code), text);
        }
        // Built-in entries are replaced, not merged
        assert_eq!(directory.lookup("2"), FacilityLookup::NotFound);
    }

    #[test]
    fn test_lookup_is_repeatable() {
        let directory = FacilityDirectory::default();
        let first = directory.text_for("1").to_string();
        let second = directory.text_for("1").to_string();
        assert_eq!(first, second);
        assert_eq!(directory, FacilityDirectory::default());
    }

    #[test]
    fn test_lookup_trims_gateway_whitespace() {
        let directory = FacilityDirectory::default();
        assert!(matches!(directory.lookup(" 1 "), FacilityLookup::Found(_)));
    }
}
