use crate::areas::repository::Repository;
use crate::artifacts::abort::Abort;
use crate::artifacts::objects::remote::{Remote, GITLET_SUFFIX};

impl Repository {
    /// Record a named alias for another repository's `.gitlet` root. The
    /// directory does not have to exist yet.
    pub fn add_remote(&self, name: &str, path: &str) -> anyhow::Result<()> {
        if !path.ends_with(GITLET_SUFFIX) {
            anyhow::bail!(Abort::BadOperands);
        }
        if self.load_remote(name)?.is_some() {
            anyhow::bail!(Abort::RemoteExists);
        }

        self.save_remote(&Remote::new(name.to_string(), path.to_string()))
    }
}
