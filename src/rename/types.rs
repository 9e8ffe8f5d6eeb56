use std::collections::HashSet;

/// One proposed rename: current on-disk name and the name it would get
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    pub old_name: String,
    pub new_name: String,
}

impl PlanEntry {
    pub fn new(old_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            old_name: old_name.into(),
            new_name: new_name.into(),
        }
    }

    /// An entry whose name stays the same
    pub fn unchanged(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            old_name: name.clone(),
            new_name: name,
        }
    }

    pub fn is_change(&self) -> bool {
        self.old_name != self.new_name
    }
}

/// Ordered old/new pairs, parallel to the loaded file list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenamePlan {
    entries: Vec<PlanEntry>,
}

impl RenamePlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: PlanEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlanEntry> {
        self.entries.iter()
    }

    /// Entries that actually rename something
    pub fn changes(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries.iter().filter(|e| e.is_change())
    }

    pub fn change_count(&self) -> usize {
        self.changes().count()
    }

    pub fn has_changes(&self) -> bool {
        self.entries.iter().any(PlanEntry::is_change)
    }

    /// New names that occur more than once, in first-repeat order
    pub fn duplicate_targets(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();

        for entry in &self.entries {
            if !seen.insert(entry.new_name.as_str()) && reported.insert(entry.new_name.as_str()) {
                duplicates.push(entry.new_name.clone());
            }
        }

        duplicates
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl FromIterator<PlanEntry> for RenamePlan {
    fn from_iter<I: IntoIterator<Item = PlanEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RenamePlan {
    type Item = &'a PlanEntry;
    type IntoIter = std::slice::Iter<'a, PlanEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(pairs: &[(&str, &str)]) -> RenamePlan {
        pairs.iter().map(|(o, n)| PlanEntry::new(*o, *n)).collect()
    }

    #[test]
    fn test_plan_entry_is_change() {
        assert!(PlanEntry::new("a.txt", "b.txt").is_change());
        assert!(!PlanEntry::unchanged("a.txt").is_change());
    }

    #[test]
    fn test_changes_skip_noops() {
        let plan = plan(&[("a", "x"), ("b", "b"), ("c", "y")]);

        assert_eq!(plan.len(), 3);
        assert_eq!(plan.change_count(), 2);
        assert!(plan.has_changes());
        let olds: Vec<_> = plan.changes().map(|e| e.old_name.as_str()).collect();
        assert_eq!(olds, ["a", "c"]);
    }

    #[test]
    fn test_no_changes() {
        let plan = plan(&[("a", "a")]);
        assert!(!plan.has_changes());
        assert!(!plan.is_empty());
        assert!(RenamePlan::new().is_empty());
    }

    #[test]
    fn test_duplicate_targets() {
        let plan = plan(&[("a", "x"), ("b", "x"), ("c", "x"), ("d", "d")]);
        assert_eq!(plan.duplicate_targets(), vec!["x".to_string()]);
    }

    #[test]
    fn test_duplicate_targets_include_unchanged_entries() {
        let plan = plan(&[("a", "b"), ("b", "b")]);
        assert_eq!(plan.duplicate_targets(), vec!["b".to_string()]);
    }

    #[test]
    fn test_unique_targets() {
        let plan = plan(&[("a", "1"), ("b", "2")]);
        assert!(plan.duplicate_targets().is_empty());
    }
}
