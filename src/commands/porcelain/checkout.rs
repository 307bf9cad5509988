use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::abort::Abort;
use crate::artifacts::objects::commit::Commit;

impl Repository {
    /// `checkout -- F`: restore HEAD's version of one file.
    pub fn checkout_file_from_head(&self, name: &str) -> anyhow::Result<()> {
        let head = self.head_commit()?;
        checkout_file(self.database(), self.workspace(), &head, &head, name)
    }

    /// `checkout <id> -- F`: restore one file from the resolved commit.
    pub fn checkout_file_at(&self, token: &str, name: &str) -> anyhow::Result<()> {
        let (_, source) = self.resolve_commit(token)?;
        let head = self.head_commit()?;
        checkout_file(self.database(), self.workspace(), &head, &source, name)
    }

    /// `checkout <branch>`: switch the working tree and HEAD to a branch.
    pub fn checkout_branch(&self, name: &str) -> anyhow::Result<()> {
        let target_id = match self.refs().read_branch(name)? {
            Some(oid) => oid,
            None => anyhow::bail!(Abort::NoSuchBranch),
        };
        if name == self.current_branch()? {
            anyhow::bail!(Abort::CheckoutCurrentBranch);
        }

        let target = self.database().load_commit(&target_id)?;
        self.checkout_commit(&target)?;
        self.refs().write_head(name)
    }

    /// Replace the working tree's tracked contents with `target`'s snapshot
    /// and clear the staging area. HEAD and the branch refs are untouched;
    /// callers decide what moves.
    pub(crate) fn checkout_commit(&self, target: &Commit) -> anyhow::Result<()> {
        let head = self.head_commit()?;
        let mut index = self.index();

        materialize_commit(
            self.database(),
            self.workspace(),
            &mut index,
            &head,
            target,
        )
    }
}

/// Copy one file out of `source` into the working tree, refusing to clobber
/// a working file the current HEAD does not track.
pub(crate) fn checkout_file(
    database: &Database,
    workspace: &Workspace,
    head: &Commit,
    source: &Commit,
    name: &str,
) -> anyhow::Result<()> {
    if !head.tracks(name) && workspace.file_exists(name) {
        anyhow::bail!(Abort::UntrackedInTheWay);
    }

    let blob_id = match source.blob_id(name) {
        Some(oid) => oid,
        None => anyhow::bail!(Abort::FileNotInCommit),
    };

    workspace.write_file(name, database.load_blob(blob_id)?.content())
}

/// Abort if writing `target`'s snapshot would overwrite a working file
/// that `head` does not track.
pub(crate) fn assert_no_untracked_overwrites(
    workspace: &Workspace,
    head: &Commit,
    target: &Commit,
) -> anyhow::Result<()> {
    for name in target.file_map().keys() {
        if !head.tracks(name) && workspace.file_exists(name) {
            anyhow::bail!(Abort::UntrackedInTheWay);
        }
    }

    Ok(())
}

/// Write every file of `target` into the working tree, delete every file
/// `head` tracks that `target` does not, and clear the staging area.
///
/// The untracked-file check runs over the full target snapshot before the
/// first write, so an abort leaves the working tree untouched. Shared by
/// checkout, reset, and the push-side mirror of the remote working
/// directory.
pub(crate) fn materialize_commit(
    database: &Database,
    workspace: &Workspace,
    index: &mut Index,
    head: &Commit,
    target: &Commit,
) -> anyhow::Result<()> {
    assert_no_untracked_overwrites(workspace, head, target)?;

    for (name, blob_id) in target.file_map() {
        workspace.write_file(name, database.load_blob(blob_id)?.content())?;
    }

    for name in head.file_map().keys() {
        if !target.tracks(name) && workspace.file_exists(name) {
            workspace.remove_file(name)?;
        }
    }

    index.clear();
    index.save()
}
