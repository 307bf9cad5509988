//! Working-directory operations
//!
//! Only plain files directly under the repository root are tracked; the
//! `.gitlet` directory and subdirectories are invisible to every command.

use anyhow::Context;
use derive_new::new;
use std::path::Path;

const IGNORED_PATHS: [&str; 1] = [".gitlet"];

/// The working directory the repository snapshots.
#[derive(Debug, new)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    /// Names of the plain files directly under the root, sorted.
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut names = std::fs::read_dir(&self.path)
            .with_context(|| format!("Unable to list directory {:?}", self.path))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| !IGNORED_PATHS.contains(&name.as_str()))
            .collect::<Vec<_>>();
        names.sort();

        Ok(names)
    }

    pub fn file_exists(&self, name: &str) -> bool {
        self.path.join(name).is_file()
    }

    pub fn read_file(&self, name: &str) -> anyhow::Result<String> {
        std::fs::read_to_string(self.path.join(name))
            .with_context(|| format!("Unable to read file {}", name))
    }

    pub fn write_file(&self, name: &str, content: &str) -> anyhow::Result<()> {
        std::fs::write(self.path.join(name), content)
            .with_context(|| format!("Unable to write file {}", name))
    }

    pub fn remove_file(&self, name: &str) -> anyhow::Result<()> {
        std::fs::remove_file(self.path.join(name))
            .with_context(|| format!("Unable to delete file {}", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;

    #[test]
    fn test_list_files_skips_directories_and_the_gitlet_dir() {
        let dir = TempDir::new().expect("temp dir");
        std::fs::create_dir(dir.path().join(".gitlet")).expect("creatable");
        std::fs::create_dir(dir.path().join("subdir")).expect("creatable");
        std::fs::write(dir.path().join("b.txt"), "b").expect("writable");
        std::fs::write(dir.path().join("a.txt"), "a").expect("writable");
        std::fs::write(dir.path().join("subdir/c.txt"), "c").expect("writable");

        let workspace = Workspace::new(dir.path().to_path_buf().into_boxed_path());

        assert_eq!(
            workspace.list_files().expect("listable"),
            vec!["a.txt".to_string(), "b.txt".to_string()]
        );
    }

    #[test]
    fn test_file_round_trip_and_removal() {
        let dir = TempDir::new().expect("temp dir");
        let workspace = Workspace::new(dir.path().to_path_buf().into_boxed_path());

        workspace.write_file("a.txt", "content").expect("writable");
        assert!(workspace.file_exists("a.txt"));
        assert_eq!(workspace.read_file("a.txt").expect("readable"), "content");

        workspace.remove_file("a.txt").expect("removable");
        assert!(!workspace.file_exists("a.txt"));
    }
}
