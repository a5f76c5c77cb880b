use log::{debug, info};

use crate::error::BuildError;
use crate::model::ResolvedEntry;

/// Resolved entries plus a parallel alias table, fixed after construction.
#[derive(Debug, Clone, Default)]
pub struct EntryIndex {
    entries: Vec<ResolvedEntry>,
    aliases: Vec<Vec<String>>,
}

impl EntryIndex {
    /// Rejects two entries carrying the same alias list, since they could
    /// not be told apart by alias lookup.
    pub fn new(entries: Vec<ResolvedEntry>) -> Result<Self, BuildError> {
        for (i, entry) in entries.iter().enumerate() {
            if let Some(other) = entries[..i].iter().find(|e| e.aliases() == entry.aliases()) {
                return Err(BuildError::DuplicateAliases {
                    entry: entry.key().to_string(),
                    other: other.key().to_string(),
                });
            }
        }
        let aliases = entries.iter().map(|e| e.aliases().to_vec()).collect();
        info!("Entry index built with {} entries", entries.len());
        Ok(Self { entries, aliases })
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[ResolvedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose aliases contain `arg`, in index order. An absent or
    /// empty `arg` lists everything.
    pub fn query(&self, arg: Option<&str>) -> Vec<&ResolvedEntry> {
        assert_eq!(
            self.entries.len(),
            self.aliases.len(),
            "entry and alias tables out of step"
        );
        let arg = match arg {
            Some(arg) if !arg.is_empty() => arg,
            _ => return self.entries.iter().collect(),
        };
        let matched: Vec<_> = self
            .entries
            .iter()
            .zip(&self.aliases)
            .filter(|(_, aliases)| aliases.iter().any(|alias| alias.contains(arg)))
            .map(|(entry, _)| entry)
            .collect();
        debug!("Query '{}' matched {} entries", arg, matched.len());
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, aliases: &[&str]) -> ResolvedEntry {
        ResolvedEntry::new(
            key.to_string(),
            key.to_uppercase(),
            String::new(),
            String::new(),
            aliases.iter().map(|s| s.to_string()).collect(),
            format!("run {}", key),
        )
    }

    fn index() -> EntryIndex {
        EntryIndex::new(vec![
            entry("suspend", &["suspend", "sleep"]),
            entry("hibernate", &["suspend", "hibernate"]),
            entry("poweroff", &["shut down", "shutdown", "poweroff", "halt"]),
        ])
        .unwrap()
    }

    fn keys(entries: Vec<&ResolvedEntry>) -> Vec<&str> {
        entries.into_iter().map(|e| e.key()).collect()
    }

    #[test]
    fn empty_or_absent_query_lists_everything() {
        let index = index();
        assert_eq!(keys(index.query(None)), vec!["suspend", "hibernate", "poweroff"]);
        assert_eq!(keys(index.query(Some(""))), vec!["suspend", "hibernate", "poweroff"]);
    }

    #[test]
    fn query_must_be_contained_in_alias() {
        let index = index();
        assert_eq!(keys(index.query(Some("shut"))), vec!["poweroff"]);
        assert!(index.query(Some("shutdownnow")).is_empty());
    }

    #[test]
    fn results_keep_index_order_and_appear_once() {
        let index = index();
        assert_eq!(keys(index.query(Some("s"))), vec!["suspend", "hibernate", "poweroff"]);
        assert_eq!(keys(index.query(Some("sus"))), vec!["suspend", "hibernate"]);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(index().query(Some("Shut")).is_empty());
    }

    #[test]
    fn identical_alias_lists_are_rejected() {
        let err = EntryIndex::new(vec![entry("a", &["x", "y"]), entry("b", &["x", "y"])])
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::DuplicateAliases { entry: "b".to_string(), other: "a".to_string() }
        );
    }

    #[test]
    fn alias_table_mirrors_entries() {
        let index = index();
        for (entry, aliases) in index.entries.iter().zip(&index.aliases) {
            assert_eq!(entry.aliases(), aliases.as_slice());
        }
        assert_eq!(index.aliases.len(), index.len());
    }
}
