//! Unsynchronized core of the in-process stores.
//!
//! `AliasTable` is plain data; callers wrap it in a lock so every method runs
//! inside a single critical section.

use std::collections::HashMap;

use super::models::{InsertOutcome, UrlMapping};

#[derive(Debug, Clone)]
enum Slot {
    Live { seq: u64, mapping: UrlMapping },
    Retired,
}

#[derive(Debug, Default)]
pub(crate) struct AliasTable {
    slots: HashMap<String, Slot>,
    next_seq: u64,
}

impl AliasTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a persisted snapshot. `live` order becomes listing order.
    pub(crate) fn from_parts(live: Vec<UrlMapping>, retired: Vec<String>) -> Self {
        let mut table = Self::new();
        for alias in retired {
            table.slots.insert(alias, Slot::Retired);
        }
        for mapping in live {
            // An alias listed twice keeps its first entry; retired always wins.
            table.insert_if_absent(mapping);
        }
        table
    }

    pub(crate) fn insert_if_absent(&mut self, mapping: UrlMapping) -> InsertOutcome {
        if self.slots.contains_key(&mapping.alias) {
            return InsertOutcome::Taken;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.slots
            .insert(mapping.alias.clone(), Slot::Live { seq, mapping });
        InsertOutcome::Inserted
    }

    /// Undo a fresh insert. Only valid right after `insert_if_absent` returned `Inserted`.
    pub(crate) fn forget(&mut self, alias: &str) {
        self.slots.remove(alias);
    }

    pub(crate) fn get(&self, alias: &str) -> Option<&UrlMapping> {
        match self.slots.get(alias) {
            Some(Slot::Live { mapping, .. }) => Some(mapping),
            _ => None,
        }
    }

    /// Retire a live alias. Returns the removed mapping and its sequence
    /// number so a failed persist can put it back with `restore`.
    pub(crate) fn retire(&mut self, alias: &str) -> Option<(u64, UrlMapping)> {
        let slot = self.slots.get_mut(alias)?;
        match std::mem::replace(slot, Slot::Retired) {
            Slot::Live { seq, mapping } => Some((seq, mapping)),
            Slot::Retired => None,
        }
    }

    pub(crate) fn restore(&mut self, seq: u64, mapping: UrlMapping) {
        self.slots
            .insert(mapping.alias.clone(), Slot::Live { seq, mapping });
    }

    /// Live mappings in insertion order.
    pub(crate) fn live(&self) -> Vec<UrlMapping> {
        let mut entries: Vec<(u64, &UrlMapping)> = self
            .slots
            .values()
            .filter_map(|slot| match slot {
                Slot::Live { seq, mapping } => Some((*seq, mapping)),
                Slot::Retired => None,
            })
            .collect();
        entries.sort_unstable_by_key(|(seq, _)| *seq);
        entries.into_iter().map(|(_, m)| m.clone()).collect()
    }

    pub(crate) fn retired(&self) -> Vec<String> {
        let mut aliases: Vec<String> = self
            .slots
            .iter()
            .filter(|(_, slot)| matches!(slot, Slot::Retired))
            .map(|(alias, _)| alias.clone())
            .collect();
        aliases.sort_unstable();
        aliases
    }

    pub(crate) fn live_count(&self) -> usize {
        self.slots
            .values()
            .filter(|slot| matches!(slot, Slot::Live { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(alias: &str) -> UrlMapping {
        UrlMapping::new(alias, format!("https://example.com/{}", alias))
    }

    #[test]
    fn test_insert_then_taken() {
        let mut table = AliasTable::new();
        assert_eq!(table.insert_if_absent(mapping("a1")), InsertOutcome::Inserted);
        assert_eq!(table.insert_if_absent(mapping("a1")), InsertOutcome::Taken);
        assert_eq!(table.live_count(), 1);
    }

    #[test]
    fn test_retired_alias_stays_taken() {
        let mut table = AliasTable::new();
        table.insert_if_absent(mapping("gone"));
        assert!(table.retire("gone").is_some());
        assert!(table.retire("gone").is_none());
        assert!(table.get("gone").is_none());
        assert_eq!(table.insert_if_absent(mapping("gone")), InsertOutcome::Taken);
        assert_eq!(table.retired(), vec!["gone".to_string()]);
    }

    #[test]
    fn test_live_is_insertion_ordered() {
        let mut table = AliasTable::new();
        for alias in ["zz", "aa", "mm"] {
            table.insert_if_absent(mapping(alias));
        }
        table.retire("aa");
        let order: Vec<String> = table.live().into_iter().map(|m| m.alias).collect();
        assert_eq!(order, vec!["zz", "mm"]);
    }

    #[test]
    fn test_restore_keeps_position() {
        let mut table = AliasTable::new();
        for alias in ["first", "second", "third"] {
            table.insert_if_absent(mapping(alias));
        }
        let (seq, m) = table.retire("second").unwrap();
        table.restore(seq, m);
        let order: Vec<String> = table.live().into_iter().map(|m| m.alias).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_from_parts() {
        let table = AliasTable::from_parts(
            vec![mapping("b"), mapping("a")],
            vec!["old".to_string()],
        );
        let order: Vec<String> = table.live().into_iter().map(|m| m.alias).collect();
        assert_eq!(order, vec!["b", "a"]);
        assert_eq!(table.retired(), vec!["old".to_string()]);
    }
}
