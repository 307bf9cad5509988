use crate::areas::refs::DEFAULT_BRANCH;
use crate::areas::repository::Repository;
use crate::artifacts::abort::Abort;
use crate::artifacts::objects::commit::Commit;
use anyhow::Context;
use std::fs;

impl Repository {
    /// Create the repository skeleton with its deterministic initial commit
    /// and the `master` branch pointing at it.
    pub fn init(&self) -> anyhow::Result<()> {
        if self.gitlet_path().exists() {
            anyhow::bail!(Abort::RepositoryExists);
        }

        fs::create_dir_all(self.database().blobs_path())
            .context("Unable to create the blobs directory")?;
        fs::create_dir_all(self.database().commits_path())
            .context("Unable to create the commits directory")?;
        fs::create_dir_all(self.refs().refs_path())
            .context("Unable to create the refs directory")?;
        fs::create_dir_all(self.remotes_path())
            .context("Unable to create the remotes directory")?;

        let oid = self.database().store(&Commit::initial())?;
        self.refs().write_branch(DEFAULT_BRANCH, &oid)?;
        self.refs().write_head(DEFAULT_BRANCH)?;
        self.index().save()?;

        Ok(())
    }
}
