use std::collections::BTreeMap;
use std::fmt;

/// Per-entity-type tally of what happened to the records we processed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordCount {
    pub stored: usize,
    pub duplicates: usize,
    pub skipped: usize,
}

/// Running totals of how many records of each type were stored, skipped as
/// duplicates, or skipped because they could not be processed.
///
/// Mutated only by the store step; read (and rendered) once the whole
/// document has been processed.
#[derive(Debug, Default, Clone)]
pub struct ImportStats {
    counts: BTreeMap<String, RecordCount>,
}

impl ImportStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stored(&mut self, class_name: &str) {
        self.counts.entry(class_name.to_string()).or_default().stored += 1;
    }

    pub fn duplicate(&mut self, class_name: &str) {
        self.counts.entry(class_name.to_string()).or_default().duplicates += 1;
    }

    pub fn skipped(&mut self, class_name: &str) {
        self.counts.entry(class_name.to_string()).or_default().skipped += 1;
    }

    pub fn count_for(&self, class_name: &str) -> RecordCount {
        self.counts.get(class_name).cloned().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Folds another tally into this one. The importer accumulates each
    /// top-level record into a scratch tally and only merges it when the
    /// record was not rolled back.
    pub fn merge(&mut self, other: ImportStats) {
        for (name, count) in other.counts {
            let entry = self.counts.entry(name).or_default();
            entry.stored += count.stored;
            entry.duplicates += count.duplicates;
            entry.skipped += count.skipped;
        }
    }
}

impl fmt::Display for ImportStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.counts.is_empty() {
            return write!(f, "No records read in");
        }
        for (i, (name, count)) in self.counts.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{}: {} stored, {} duplicate, {} skipped",
                name, count.stored, count.duplicates, count.skipped
            )?;
        }
        Ok(())
    }
}
