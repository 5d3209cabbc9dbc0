//! The alias book: named groups of handles.
//!
//! An alias maps a single name to an ordered list of handles. Expansion is a
//! single level: an alias whose targets include another alias name does not
//! recurse into it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AliasError;

/// Whether a mutation changed the book and must be written back to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasChange {
    Modified,
    Unchanged,
}

impl AliasChange {
    pub fn needs_persist(self) -> bool {
        self == Self::Modified
    }
}

/// Alias name -> handles, as stored under `[aliases]` in the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasBook {
    aliases: BTreeMap<String, Vec<String>>,
}

impl AliasBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or overwrite `alias`.
    ///
    /// Fails without touching the book if `handles` contains `alias` itself.
    pub fn add_alias<I, S>(&mut self, alias: &str, handles: I) -> Result<AliasChange, AliasError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let handles: Vec<String> = handles.into_iter().map(Into::into).collect();
        if handles.iter().any(|h| h == alias) {
            return Err(AliasError::SelfReference {
                alias: alias.to_string(),
            });
        }

        info!(alias, count = handles.len(), "setting alias");
        self.aliases.insert(alias.to_string(), handles);
        Ok(AliasChange::Modified)
    }

    /// Remove `alias`. Removing an unknown alias is not an error.
    pub fn delete_alias(&mut self, alias: &str) -> AliasChange {
        match self.aliases.remove(alias) {
            Some(_) => {
                info!(alias, "deleted alias");
                AliasChange::Modified
            }
            None => {
                debug!(alias, "alias not present, nothing to delete");
                AliasChange::Unchanged
            }
        }
    }

    pub fn alias_exists(&self, alias: &str) -> bool {
        self.aliases.contains_key(alias)
    }

    /// Replace every alias name in `handles` with its targets, then sort and
    /// deduplicate the result.
    pub fn expand<S: AsRef<str>>(&self, handles: &[S]) -> Vec<String> {
        let mut expanded: Vec<String> = Vec::with_capacity(handles.len());
        for handle in handles {
            let handle = handle.as_ref();
            match self.aliases.get(handle) {
                Some(targets) => expanded.extend(targets.iter().cloned()),
                None => expanded.push(handle.to_string()),
            }
        }

        expanded.sort();
        expanded.dedup();
        debug!(input = handles.len(), output = expanded.len(), "expanded handles");
        expanded
    }

    pub fn list_all(&self) -> &BTreeMap<String, Vec<String>> {
        &self.aliases
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl From<BTreeMap<String, Vec<String>>> for AliasBook {
    fn from(aliases: BTreeMap<String, Vec<String>>) -> Self {
        Self { aliases }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book() -> AliasBook {
        let mut book = AliasBook::new();
        book.add_alias("alias1", ["user1", "user2"]).unwrap();
        book.add_alias("alias2", ["user3", "user4"]).unwrap();
        book.add_alias("alias3", ["user5", "user6"]).unwrap();
        book
    }

    #[test]
    fn test_alias_exists() {
        let book = sample_book();
        assert!(book.alias_exists("alias1"));
        assert!(book.alias_exists("alias2"));
        assert!(book.alias_exists("alias3"));
        assert!(!book.alias_exists("alias4"));
    }

    #[test]
    fn test_expand_aliases_and_plain_handles() {
        let book = sample_book();
        assert_eq!(
            book.expand(&["alias1", "alias2", "user5"]),
            vec!["user1", "user2", "user3", "user4", "user5"]
        );
    }

    #[test]
    fn test_expand_unknown_handle_passes_through() {
        let book = sample_book();
        assert_eq!(book.expand(&["user9"]), vec!["user9"]);
    }

    #[test]
    fn test_expand_deduplicates_overlap() {
        let book = sample_book();
        assert_eq!(book.expand(&["alias1", "user1"]), vec!["user1", "user2"]);
    }

    #[test]
    fn test_expand_is_order_independent() {
        let book = sample_book();
        assert_eq!(
            book.expand(&["user5", "alias2", "alias1"]),
            book.expand(&["alias1", "alias2", "user5"])
        );
    }

    #[test]
    fn test_expand_does_not_recurse() {
        let mut book = AliasBook::new();
        book.add_alias("team", ["pair", "carol"]).unwrap();
        book.add_alias("pair", ["alice", "bob"]).unwrap();
        assert_eq!(book.expand(&["team"]), vec!["carol", "pair"]);
    }

    #[test]
    fn test_expand_empty_input() {
        let book = sample_book();
        let none: [&str; 0] = [];
        assert!(book.expand(&none).is_empty());
    }

    #[test]
    fn test_add_alias_rejects_self_reference() {
        let mut book = sample_book();
        let before = book.clone();
        let result = book.add_alias("x", ["x"]);
        assert!(matches!(result, Err(AliasError::SelfReference { ref alias }) if alias == "x"));
        assert_eq!(book, before);
    }

    #[test]
    fn test_add_alias_overwrites() {
        let mut book = sample_book();
        let change = book.add_alias("alias1", ["user7"]).unwrap();
        assert!(change.needs_persist());
        assert_eq!(book.list_all()["alias1"], vec!["user7"]);
    }

    #[test]
    fn test_delete_alias() {
        let mut book = sample_book();
        assert_eq!(book.delete_alias("alias1"), AliasChange::Modified);
        assert!(!book.alias_exists("alias1"));
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_delete_missing_alias_is_noop() {
        let mut book = sample_book();
        let change = book.delete_alias("alias4");
        assert_eq!(change, AliasChange::Unchanged);
        assert!(!change.needs_persist());
        assert_eq!(book.len(), 3);
    }

    #[test]
    fn test_list_all_is_key_sorted() {
        let mut book = AliasBook::new();
        book.add_alias("zeta", ["z"]).unwrap();
        book.add_alias("alpha", ["a"]).unwrap();
        let keys: Vec<&String> = book.list_all().keys().collect();
        assert_eq!(keys, vec!["alpha", "zeta"]);
    }
}
