use crate::areas::repository::Repository;
use crate::artifacts::abort::Abort;
use crate::artifacts::graph::SplitFinder;
use crate::artifacts::merge::{classify, conflict_content, FileAction};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::collections::BTreeMap;
use std::io::Write;

impl Repository {
    /// Three-way merge of the given branch into the current one.
    pub fn merge(&self, branch: &str) -> anyhow::Result<()> {
        {
            let mut index = self.index();
            index.rehydrate()?;
            if !index.is_empty() {
                anyhow::bail!(Abort::UncommittedChanges);
            }
        }

        let other_id = match self.refs().read_branch(branch)? {
            Some(oid) => oid,
            None => anyhow::bail!(Abort::BranchMissing),
        };
        let current = self.current_branch()?;
        if branch == current {
            anyhow::bail!(Abort::SelfMerge);
        }

        let head_id = self.head_commit_id()?;
        let database = self.database();
        let finder = SplitFinder::new(|oid: &ObjectId| database.slim_commit(oid));
        let split_id = finder.find_split_point(&head_id, &other_id)?;

        if split_id == other_id {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(());
        }
        if split_id == head_id {
            let target = database.load_commit(&other_id)?;
            self.checkout_commit(&target)?;
            self.refs().write_branch(&current, &other_id)?;
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        let head = database.load_commit(&head_id)?;
        let other = database.load_commit(&other_id)?;
        let split = database.load_commit(&split_id)?;

        let actions = classify_universe(&split, &head, &other);

        // Precondition: nothing untracked may be overwritten. Checked over
        // the full plan before the first working-tree write.
        for (name, action) in &actions {
            let writes = matches!(action, FileAction::TakeOther | FileAction::Conflict);
            if writes && !head.tracks(name) && self.workspace().file_exists(name) {
                anyhow::bail!(Abort::UntrackedInTheWay);
            }
        }

        let mut conflicted = false;
        {
            let mut index = self.index();
            index.rehydrate()?;

            for (name, action) in &actions {
                match action {
                    FileAction::TakeOther => {
                        let blob_id = other
                            .blob_id(name)
                            .context("merge source lost a tracked file")?;
                        self.workspace()
                            .write_file(name, database.load_blob(blob_id)?.content())?;
                        index.stage_add(name, blob_id.clone());
                    }
                    FileAction::Remove => {
                        index.stage_remove(name);
                        if self.workspace().file_exists(name) {
                            self.workspace().remove_file(name)?;
                        }
                    }
                    FileAction::Conflict => {
                        conflicted = true;

                        let head_content = match head.blob_id(name) {
                            Some(oid) => Some(database.load_blob(oid)?.content().to_string()),
                            None => None,
                        };
                        let other_content = match other.blob_id(name) {
                            Some(oid) => Some(database.load_blob(oid)?.content().to_string()),
                            None => None,
                        };

                        let content =
                            conflict_content(head_content.as_deref(), other_content.as_deref());
                        self.workspace().write_file(name, &content)?;

                        let blob_id = database.store(&Blob::new(content))?;
                        index.stage_add(name, blob_id);
                    }
                    FileAction::Keep => {}
                }
            }

            index.save()?;
        }

        let message = format!("Merged {} into {}.", branch, current);
        self.write_commit(&message, Some(other_id))?;

        if conflicted {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(())
    }
}

/// Classify every name in the union of the three snapshots.
fn classify_universe(
    split: &Commit,
    head: &Commit,
    other: &Commit,
) -> BTreeMap<String, FileAction> {
    let mut actions = BTreeMap::new();

    let names = split
        .file_map()
        .keys()
        .chain(head.file_map().keys())
        .chain(other.file_map().keys());

    for name in names {
        actions.entry(name.clone()).or_insert_with(|| {
            classify(split.blob_id(name), head.blob_id(name), other.blob_id(name))
        });
    }

    actions
}
