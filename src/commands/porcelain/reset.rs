use crate::areas::repository::Repository;

impl Repository {
    /// Check out the snapshot of the resolved commit and retarget the
    /// current branch ref at it. HEAD keeps naming the same branch.
    pub fn reset(&self, token: &str) -> anyhow::Result<()> {
        let (oid, target) = self.resolve_commit(token)?;

        self.checkout_commit(&target)?;
        self.refs().write_branch(&self.current_branch()?, &oid)
    }
}
