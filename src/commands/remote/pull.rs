use crate::areas::repository::Repository;

impl Repository {
    /// `fetch` the remote branch, then `merge` the remote-tracking ref into
    /// the current branch.
    pub fn pull(&self, remote_name: &str, branch: &str) -> anyhow::Result<()> {
        self.fetch(remote_name, branch)?;
        self.merge(&format!("{}/{}", remote_name, branch))
    }
}
