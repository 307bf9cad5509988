use crate::areas::repository::Repository;
use crate::artifacts::abort::Abort;

impl Repository {
    /// Copy a remote branch's first-parent history into the local store and
    /// record its tip as the remote-tracking ref `<remote>/<branch>`. The
    /// working directory is untouched.
    pub fn fetch(&self, remote_name: &str, branch: &str) -> anyhow::Result<()> {
        let remote = self.open_remote(remote_name)?;
        if !remote.repository_exists() {
            anyhow::bail!(Abort::RemoteDirMissing);
        }

        let remote_database = remote.database();
        let tip = match remote.refs().read_branch(branch)? {
            Some(oid) => oid,
            None => anyhow::bail!(Abort::RemoteBranchMissing),
        };

        let mut cursor = Some(tip.clone());
        while let Some(oid) = cursor {
            let commit = remote_database.load_commit(&oid)?;
            for blob_id in commit.file_map().values() {
                self.database().store(&remote_database.load_blob(blob_id)?)?;
            }
            self.database().store(&commit)?;

            cursor = commit.parent().cloned();
        }

        self.refs()
            .write_branch(&format!("{}/{}", remote_name, branch), &tip)
    }
}
