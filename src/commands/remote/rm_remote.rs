use crate::areas::repository::Repository;
use crate::artifacts::abort::Abort;

impl Repository {
    /// Forget a remote alias. The mirrored repository itself is untouched.
    pub fn rm_remote(&self, name: &str) -> anyhow::Result<()> {
        if self.load_remote(name)?.is_none() {
            anyhow::bail!(Abort::RemoteMissing);
        }

        self.delete_remote(name)
    }
}
