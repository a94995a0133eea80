use std::fmt;

use crate::xml::record::ProcessingResult;
use crate::xml::stats::ImportStats;

/// Ordered, append-only stream of messages for the user.
///
/// Everything the user should see about an import - parse failures, schema
/// violations, version mismatches, rollback warnings - is appended here and
/// surfaced once the whole document has been processed. Nothing ever blocks
/// or interrupts processing to show a message.
#[derive(Debug, Default, Clone)]
pub struct Messages {
    lines: Vec<String>,
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// True if any message mentions the given text. Handy in tests.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

impl fmt::Display for Messages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Outcome of one top-level record in a document.
#[derive(Debug, Clone)]
pub struct TopLevelResult {
    pub tag: String,
    pub name: Option<String>,
    pub result: ProcessingResult,
}

/// What the importer hands back to the caller: one result per top-level
/// record plus the merged statistics. The message stream is appended to the
/// caller-supplied `Messages` as processing goes along.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub results: Vec<TopLevelResult>,
    pub stats: ImportStats,
}

impl ImportReport {
    /// True if no top-level record failed (duplicates are fine).
    pub fn succeeded(&self) -> bool {
        self.results
            .iter()
            .all(|r| r.result != ProcessingResult::Failed)
    }
}
