use crate::areas::repository::Repository;
use crate::artifacts::abort::Abort;

impl Repository {
    /// Create a branch pointing at HEAD's commit without switching to it.
    pub fn branch(&self, name: &str) -> anyhow::Result<()> {
        if self.refs().branch_exists(name) {
            anyhow::bail!(Abort::BranchExists);
        }

        let head_id = self.head_commit_id()?;
        self.refs().write_branch(name, &head_id)
    }

    /// Delete a branch ref. The commits it pointed at stay in the store.
    pub fn rm_branch(&self, name: &str) -> anyhow::Result<()> {
        if !self.refs().branch_exists(name) {
            anyhow::bail!(Abort::BranchMissing);
        }
        if name == self.current_branch()? {
            anyhow::bail!(Abort::RemoveCurrentBranch);
        }

        self.refs().delete_branch(name)
    }
}
