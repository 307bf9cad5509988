use crate::areas::repository::Repository;
use crate::artifacts::abort::Abort;
use crate::artifacts::graph::SplitFinder;
use crate::artifacts::objects::object_id::ObjectId;
use crate::commands::porcelain::checkout::{assert_no_untracked_overwrites, materialize_commit};
use anyhow::Context;

impl Repository {
    /// Mirror the current branch's history onto a remote branch.
    ///
    /// Only fast-forwards are accepted: the remote tip must already be an
    /// ancestor of HEAD. The first-parent chain down to the remote tip is
    /// copied (commits plus every referenced blob), the remote branch ref is
    /// advanced, and HEAD's snapshot is materialized in the remote working
    /// directory against the remote's own HEAD.
    pub fn push(&self, remote_name: &str, branch: &str) -> anyhow::Result<()> {
        let remote = self.open_remote(remote_name)?;
        if !remote.repository_exists() {
            anyhow::bail!(Abort::RemoteDirMissing);
        }

        let remote_database = remote.database();
        let remote_refs = remote.refs();

        let head_id = self.head_commit_id()?;
        let remote_tip = remote_refs.read_branch(branch)?;

        if let Some(tip) = &remote_tip {
            let database = self.database();
            let finder = SplitFinder::new(|oid: &ObjectId| database.slim_commit(oid));
            if !finder.ancestors(&head_id)?.contains(tip) {
                anyhow::bail!(Abort::PushRejected);
            }
        }

        // the remote working directory reflects the pre-push HEAD
        let remote_head_branch = remote_refs.read_head()?;
        let remote_head_id = remote_refs
            .read_branch(&remote_head_branch)?
            .with_context(|| format!("remote HEAD names a missing branch {}", remote_head_branch))?;
        let remote_head = remote_database.load_commit(&remote_head_id)?;

        // Precondition: the mirror of HEAD's snapshot must not overwrite
        // anything untracked over there. Checked before the first remote
        // write, so an abort leaves the remote repository untouched.
        let target = self.database().load_commit(&head_id)?;
        assert_no_untracked_overwrites(&remote.workspace(), &remote_head, &target)?;

        // copy the first-parent chain down to the remote tip
        let mut cursor = Some(head_id.clone());
        while let Some(oid) = cursor {
            if remote_tip.as_ref() == Some(&oid) {
                break;
            }

            let commit = self.database().load_commit(&oid)?;
            for blob_id in commit.file_map().values() {
                remote_database.store(&self.database().load_blob(blob_id)?)?;
            }
            remote_database.store(&commit)?;

            cursor = commit.parent().cloned();
        }

        remote_refs.write_branch(branch, &head_id)?;

        let mut remote_index = remote.index();

        materialize_commit(
            &remote_database,
            &remote.workspace(),
            &mut remote_index,
            &remote_head,
            &target,
        )
    }
}
