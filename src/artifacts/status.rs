//! Status report
//!
//! The status command separates collecting the repository state from
//! rendering it. The rendered text is byte-exact output the test suite
//! depends on, so nothing here decorates or colors.

use std::collections::BTreeMap;
use std::fmt::Write;

/// How an unstaged working-tree change differs from what is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Modified,
    Deleted,
}

impl ChangeKind {
    fn suffix(&self) -> &'static str {
        match self {
            ChangeKind::Modified => "(modified)",
            ChangeKind::Deleted => "(deleted)",
        }
    }
}

/// Everything `status` prints, already sorted.
#[derive(Debug, Default)]
pub struct StatusReport {
    /// All branch names in sorted order, the current one prefixed with `*`.
    pub branches: Vec<String>,
    /// Sorted names staged for addition.
    pub staged: Vec<String>,
    /// Sorted names staged for removal.
    pub removed: Vec<String>,
    /// Name-sorted unstaged changes with their kind.
    pub modifications: BTreeMap<String, ChangeKind>,
    /// Sorted names present in the working tree but unknown to the
    /// repository.
    pub untracked: Vec<String>,
}

impl StatusReport {
    pub fn render(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "=== Branches ===");
        for branch in &self.branches {
            let _ = writeln!(out, "{}", branch);
        }

        let _ = writeln!(out, "\n=== Staged Files ===");
        for name in &self.staged {
            let _ = writeln!(out, "{}", name);
        }

        let _ = writeln!(out, "\n=== Removed Files ===");
        for name in &self.removed {
            let _ = writeln!(out, "{}", name);
        }

        let _ = writeln!(out, "\n=== Modifications Not Staged For Commit ===");
        for (name, kind) in &self.modifications {
            let _ = writeln!(out, "{} {}", name, kind.suffix());
        }

        let _ = writeln!(out, "\n=== Untracked Files ===");
        for name in &self.untracked {
            let _ = writeln!(out, "{}", name);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_every_section_in_order() {
        let mut modifications = BTreeMap::new();
        modifications.insert("gone.txt".to_string(), ChangeKind::Deleted);
        modifications.insert("edited.txt".to_string(), ChangeKind::Modified);

        let report = StatusReport {
            branches: vec!["*master".to_string(), "dev".to_string()],
            staged: vec!["new.txt".to_string()],
            removed: vec!["old.txt".to_string()],
            modifications,
            untracked: vec!["stray.txt".to_string()],
        };

        assert_eq!(
            report.render(),
            "=== Branches ===\n\
             *master\n\
             dev\n\
             \n\
             === Staged Files ===\n\
             new.txt\n\
             \n\
             === Removed Files ===\n\
             old.txt\n\
             \n\
             === Modifications Not Staged For Commit ===\n\
             edited.txt (modified)\n\
             gone.txt (deleted)\n\
             \n\
             === Untracked Files ===\n\
             stray.txt\n"
        );
    }

    #[test]
    fn test_render_keeps_empty_sections() {
        let report = StatusReport {
            branches: vec!["*master".to_string()],
            ..Default::default()
        };

        assert_eq!(
            report.render(),
            "=== Branches ===\n\
             *master\n\
             \n\
             === Staged Files ===\n\
             \n\
             === Removed Files ===\n\
             \n\
             === Modifications Not Staged For Commit ===\n\
             \n\
             === Untracked Files ===\n"
        );
    }
}
