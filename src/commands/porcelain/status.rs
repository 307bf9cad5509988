use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::status::{ChangeKind, StatusReport};
use std::collections::BTreeMap;
use std::io::Write;

impl Repository {
    /// Print branches, the staging area, unstaged modifications, and
    /// untracked files.
    pub fn status(&self) -> anyhow::Result<()> {
        let head = self.head_commit()?;
        let current = self.current_branch()?;

        let mut index = self.index();
        index.rehydrate()?;

        let branches = self
            .refs()
            .list_branches()?
            .into_iter()
            .map(|branch| {
                if branch == current {
                    format!("*{}", branch)
                } else {
                    branch
                }
            })
            .collect();

        let mut modifications = BTreeMap::new();
        for (name, tracked_id) in head.file_map() {
            if self.workspace().file_exists(name) {
                let working_id = Blob::new(self.workspace().read_file(name)?).object_id()?;
                if &working_id != tracked_id && !index.is_staged_for_add(name) {
                    modifications.insert(name.clone(), ChangeKind::Modified);
                }
            } else if !index.is_staged_for_removal(name) {
                modifications.insert(name.clone(), ChangeKind::Deleted);
            }
        }
        for (name, staged_id) in index.add_map() {
            if self.workspace().file_exists(name) {
                let working_id = Blob::new(self.workspace().read_file(name)?).object_id()?;
                if &working_id != staged_id {
                    modifications.insert(name.clone(), ChangeKind::Modified);
                }
            } else {
                modifications.insert(name.clone(), ChangeKind::Deleted);
            }
        }

        let untracked = self
            .workspace()
            .list_files()?
            .into_iter()
            .filter(|name| !head.tracks(name) && !index.is_staged_for_add(name))
            .collect();

        let report = StatusReport {
            branches,
            staged: index.add_map().keys().cloned().collect(),
            removed: index.rm_set().iter().cloned().collect(),
            modifications,
            untracked,
        };

        write!(self.writer(), "{}", report.render())?;
        Ok(())
    }
}
