use crate::areas::repository::Repository;
use crate::artifacts::abort::Abort;
use crate::artifacts::objects::commit::{self, Commit};
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Record the staged changes as a new commit on the current branch.
    pub fn commit(&self, message: &str) -> anyhow::Result<()> {
        if message.is_empty() {
            anyhow::bail!(Abort::EmptyMessage);
        }

        {
            let mut index = self.index();
            index.rehydrate()?;
            if index.is_empty() {
                anyhow::bail!(Abort::NothingStaged);
            }
        }

        self.write_commit(message, None)?;
        Ok(())
    }

    /// Build and store a commit from HEAD's snapshot plus the staging area,
    /// advance the current branch ref, and clear the index.
    ///
    /// Shared by `commit` and the merge engine; the caller decides whether
    /// an empty staging area is an error.
    pub(crate) fn write_commit(
        &self,
        message: &str,
        parent2: Option<ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        let head_id = self.head_commit_id()?;
        let head = self.database().load_commit(&head_id)?;

        let mut index = self.index();
        index.rehydrate()?;

        let mut file_map = head.file_map().clone();
        for (name, oid) in index.add_map() {
            file_map.insert(name.clone(), oid.clone());
        }
        for name in index.rm_set() {
            file_map.remove(name);
        }

        let new_commit = Commit::new(
            message.to_string(),
            commit::now(),
            Some(head_id),
            parent2,
            file_map,
        );

        let oid = self.database().store(&new_commit)?;
        self.refs().write_branch(&self.current_branch()?, &oid)?;

        index.clear();
        index.save()?;

        Ok(oid)
    }
}
